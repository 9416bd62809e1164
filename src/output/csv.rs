//! CSV export of subnet tables.

use crate::models::{SubnetBlock, VlsmBlock};
use itertools::Itertools;

const BLOCK_HEADER: [&str; 7] = [
    "Subnet #",
    "Network/CIDR",
    "Subnet Mask",
    "Broadcast",
    "First Host",
    "Last Host",
    "Usable Hosts",
];

/// Quote a field when it contains a comma or double quote.
pub fn escape_csv_field(input: &str) -> String {
    if input.contains(',') || input.contains('"') {
        // excel does not like spaces after comma between fields
        let escaped = input.replace('"', "\"\"");
        format!("\"{}\"", escaped)
    } else {
        input.to_string()
    }
}

fn csv_line<I, T>(fields: I) -> String
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    fields
        .into_iter()
        .map(|f| escape_csv_field(f.as_ref()))
        .join(",")
}

fn block_fields(block: &SubnetBlock) -> Vec<String> {
    vec![
        (block.index + 1).to_string(),
        block.cidr().to_string(),
        block.subnet_mask.to_string(),
        block.broadcast.to_string(),
        block.first_host.to_string(),
        block.last_host.to_string(),
        block.usable_hosts.to_string(),
    ]
}

/// Blocks as CSV, one header line then one line per block.
pub fn blocks_to_csv(blocks: &[SubnetBlock]) -> String {
    let mut out = csv_line(BLOCK_HEADER);
    out.push('\n');
    for block in blocks {
        out.push_str(&csv_line(block_fields(block)));
        out.push('\n');
    }
    out
}

/// VLSM allocation as CSV with a trailing `Hosts Needed` column.
pub fn vlsm_to_csv(blocks: &[VlsmBlock]) -> String {
    let mut out = csv_line(BLOCK_HEADER.iter().copied().chain(["Hosts Needed"]));
    out.push('\n');
    for b in blocks {
        let mut fields = block_fields(&b.block);
        fields.push(b.hosts_needed.to_string());
        out.push_str(&csv_line(fields));
        out.push('\n');
    }
    out
}
