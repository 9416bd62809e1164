//! Terminal output utilities.
//!
//! Renders calculator results as aligned text for a terminal.

use crate::models::{SubnetBlock, VlsmBlock};
use crate::processing::{Ipv4SubnetInfo, Ipv6SubnetInfo};
use colored::Colorize;
use std::fmt::Write;

/// Label/value pairs, labels padded to a common width.
fn key_values(title: &str, rows: &[(&str, String)]) -> String {
    let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    let mut out = format!("{}\n", title.bold().underline());
    for (key, value) in rows {
        let _ = writeln!(out, "  {key:<width$}  {value}");
    }
    out
}

pub fn render_ipv4_info(info: &Ipv4SubnetInfo) -> String {
    let private = if info.is_private {
        "yes".green().to_string()
    } else {
        "no".to_string()
    };
    key_values(
        &format!("IPv4 {}/{}", info.address, info.cidr),
        &[
            ("Network", format!("{}/{}", info.network, info.cidr)),
            ("Network (binary)", info.network_binary.clone()),
            ("Broadcast", info.broadcast.to_string()),
            ("Broadcast (binary)", info.broadcast_binary.clone()),
            ("Usable host range", info.usable_host_range.clone()),
            ("Subnet mask", info.subnet_mask.to_string()),
            ("Subnet mask (binary)", info.subnet_mask_binary.clone()),
            ("Wildcard mask", info.wildcard_mask.to_string()),
            ("Wildcard mask (binary)", info.wildcard_mask_binary.clone()),
            ("Total hosts", info.total_hosts.to_string()),
            ("Usable hosts", info.usable_hosts.to_string()),
            ("IP class", info.ip_class.to_string()),
            ("Private", private),
            ("Short notation", info.short_notation.clone()),
            ("Binary ID", info.binary_id.clone()),
            ("Integer ID", info.integer_id.to_string()),
            ("Hex ID", info.hex_id.clone()),
            ("in-addr.arpa", info.in_addr_arpa.clone()),
            ("IPv4-mapped IPv6", info.ipv4_mapped_address.clone()),
            ("6to4 prefix", info.six_to_four_prefix.clone()),
        ],
    )
}

pub fn render_ipv6_info(info: &Ipv6SubnetInfo) -> String {
    let private = if info.is_private {
        "yes".green().to_string()
    } else {
        "no".to_string()
    };
    key_values(
        &format!("IPv6 {}/{}", info.address, info.prefix_length),
        &[
            ("Network", format!("{}/{}", info.network, info.prefix_length)),
            ("Network (expanded)", info.network_expanded.clone()),
            ("Network (binary)", info.network_binary.clone()),
            ("First host", info.first_host.clone()),
            ("Last host", info.last_host.clone()),
            (
                "Total addresses",
                format!(
                    "{} ({})",
                    info.total_hosts,
                    info.total_hosts.power_notation()
                ),
            ),
            ("Private/local", private),
        ],
    )
}

fn block_row(out: &mut String, block: &SubnetBlock, extra: &str) {
    let _ = writeln!(
        out,
        "{:>6}  {:<18}  {:<15}  {:<15}  {:<15}  {:<15}  {:>10}{extra}",
        block.index + 1,
        block.cidr().to_string(),
        block.subnet_mask.to_string(),
        block.broadcast.to_string(),
        block.first_host.to_string(),
        block.last_host.to_string(),
        block.usable_hosts,
    );
}

fn block_header() -> String {
    let header = format!(
        "{:>6}  {:<18}  {:<15}  {:<15}  {:<15}  {:<15}  {:>10}",
        "#", "Network/CIDR", "Subnet Mask", "Broadcast", "First Host", "Last Host", "Usable"
    );
    format!("{}\n", header.bold())
}

/// Table of blocks; `total` is the full enumeration size when `blocks` was capped.
pub fn render_blocks(blocks: &[SubnetBlock], total: u64) -> String {
    let mut out = block_header();
    for block in blocks {
        block_row(&mut out, block, "");
    }
    if (blocks.len() as u64) < total {
        let _ = writeln!(
            out,
            "{}",
            format!("Showing {} of {} subnets", blocks.len(), total).yellow()
        );
    }
    out
}

pub fn render_vlsm(blocks: &[VlsmBlock]) -> String {
    let mut out = block_header();
    for b in blocks {
        block_row(&mut out, &b.block, &format!("  (needs {})", b.hosts_needed));
    }
    out
}
