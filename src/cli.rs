//! Command-line front end.
//!
//! Parses arguments with `clap`, calls the calculator and renders the result as
//! a table, CSV or JSON. `main.rs` only wires logging and configuration.

use crate::config::{Config, OutputFormat};
use crate::models::{
    format_ipv4, ipv4_to_hex, parse_prefix, prefix_to_subnet_mask, subnet_mask_to_prefix,
    wildcard_mask, Ipv4, SubnetBlock, MAX_LENGTH_V6,
};
use crate::output;
use crate::processing::{
    allocate_vlsm, block_at, compute_ipv4_subnet, compute_ipv4_subnet_with_mask,
    compute_ipv6_subnet, divide_blocks, subnet_blocks, SubnetBlocks,
};
use crate::validate::{is_valid_ipv4, is_valid_ipv6};
use clap::{Parser, Subcommand};
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::error::Error;

#[derive(Parser, Debug)]
#[command(name = "subnet-calc", version)]
#[command(about = "IPv4/IPv6 subnet calculator.")]
pub struct CommandLine {
    /// Output format, overrides SUBNET_CALC_OUTPUT
    #[arg(long, short, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Subnet details for an IPv4 address, as ADDR/LEN or ADDR --mask MASK
    #[command(alias = "4")]
    Ipv4 {
        target: String,
        #[arg(long, short)]
        mask: Option<String>,
    },
    /// Subnet details for an IPv6 address given as ADDR/LEN
    #[command(alias = "6")]
    Ipv6 { target: String },
    /// Convert a prefix length to a subnet mask or back
    Mask { value: String },
    /// Split NET/LEN into COUNT equal subnets
    Divide {
        network: String,
        #[arg(long, short)]
        count: u32,
        /// Rows to show, overrides SUBNET_CALC_MAX_ROWS
        #[arg(long, short)]
        limit: Option<usize>,
    },
    /// List the child blocks of NET/LEN for a longer prefix
    Blocks {
        network: String,
        #[arg(long, short = 'p')]
        new_prefix: u8,
        /// Rows to show, overrides SUBNET_CALC_MAX_ROWS
        #[arg(long, short)]
        limit: Option<usize>,
    },
    /// Show one child block of NET/LEN by index
    Block {
        network: String,
        #[arg(long, short = 'p')]
        new_prefix: u8,
        #[arg(long, short)]
        index: u64,
    },
    /// Allocate subnets of NET/LEN for host counts (VLSM), e.g. --hosts 50,30,20
    Vlsm {
        network: String,
        #[arg(long)]
        hosts: String,
    },
    /// Check whether a string is a valid IPv4 or IPv6 address
    Validate { address: String },
    /// Convert a 32-bit decimal integer to a dotted IPv4 address
    FromInt { value: u32 },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

lazy_static! {
    static ref LIST_SEPARATOR: Regex = Regex::new(r"[,\s]+").expect("Invalid Regex?");
}

#[derive(Serialize, Debug)]
struct MaskInfo {
    prefix: u8,
    mask: String,
    wildcard: String,
}

#[derive(Serialize, Debug)]
struct IntegerAddress {
    integer: u32,
    address: String,
    hex: String,
}

#[derive(Serialize, Debug)]
struct Validation<'a> {
    address: &'a str,
    ipv4: bool,
    ipv6: bool,
}

/// Parse a comma/space separated list of host counts.
pub fn parse_host_list(input: &str) -> Result<Vec<u32>, Box<dyn Error>> {
    LIST_SEPARATOR
        .split(input.trim())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>().map_err(|e| {
                Box::<dyn Error>::from(format!("invalid host count '{s}': {e}"))
            })
        })
        .collect()
}

/// Run one command and return the rendered output.
pub fn run(cli: &CommandLine, config: &Config) -> Result<String, Box<dyn Error>> {
    let format = cli.output.unwrap_or(config.output);
    log::debug!("run {:?} as {:?}", cli.command, format);

    let text = match &cli.command {
        Commands::Ipv4 { target, mask } => {
            let info = match (target.split_once('/'), mask) {
                (Some(_), None) => {
                    let cidr = Ipv4::new(target)?;
                    compute_ipv4_subnet(&cidr.addr.to_string(), cidr.mask)?
                }
                (None, Some(mask)) => compute_ipv4_subnet_with_mask(target.trim(), mask)?,
                (Some(_), Some(_)) => return Err("give either ADDR/LEN or --mask, not both".into()),
                (None, None) => return Err("missing prefix: use ADDR/LEN or --mask".into()),
            };
            render(format, &info, output::render_ipv4_info)?
        }
        Commands::Ipv6 { target } => {
            let (addr, len) = target
                .trim()
                .split_once('/')
                .ok_or("missing prefix: use ADDR/LEN")?;
            let info = compute_ipv6_subnet(addr, parse_prefix(len, MAX_LENGTH_V6)?)?;
            render(format, &info, output::render_ipv6_info)?
        }
        Commands::Mask { value } => {
            let value = value.trim().trim_start_matches('/');
            let prefix = if value.contains('.') {
                subnet_mask_to_prefix(value)?
            } else {
                parse_prefix(value, 32)?
            };
            let mask = prefix_to_subnet_mask(prefix)?;
            let info = MaskInfo {
                prefix,
                wildcard: wildcard_mask(&mask)?,
                mask,
            };
            render(format, &info, |m| {
                format!("/{} = {} (wildcard {})\n", m.prefix, m.mask, m.wildcard)
            })?
        }
        Commands::Divide {
            network,
            count,
            limit,
        } => {
            let base = Ipv4::new(network)?;
            let iter = divide_blocks(&base.addr.to_string(), base.mask, *count)?;
            render_capped(format, iter, limit.unwrap_or(config.max_rows))?
        }
        Commands::Blocks {
            network,
            new_prefix,
            limit,
        } => {
            let base = Ipv4::new(network)?;
            let iter = subnet_blocks(&base.addr.to_string(), base.mask, *new_prefix)?;
            render_capped(format, iter, limit.unwrap_or(config.max_rows))?
        }
        Commands::Block {
            network,
            new_prefix,
            index,
        } => {
            let base = Ipv4::new(network)?;
            let block = block_at(&base.addr.to_string(), base.mask, *new_prefix, *index)?;
            render_blocks(format, std::slice::from_ref(&block), 1)?
        }
        Commands::Vlsm { network, hosts } => {
            let base = Ipv4::new(network)?;
            let requirements = parse_host_list(hosts)?;
            let blocks = allocate_vlsm(&base.addr.to_string(), base.mask, &requirements)?;
            match format {
                OutputFormat::Table => output::render_vlsm(&blocks),
                OutputFormat::Csv => output::vlsm_to_csv(&blocks),
                OutputFormat::Json => to_json(&blocks)?,
            }
        }
        Commands::Validate { address } => {
            let result = Validation {
                address,
                ipv4: is_valid_ipv4(address),
                ipv6: is_valid_ipv6(address),
            };
            render(format, &result, |v| {
                let kind = match (v.ipv4, v.ipv6) {
                    (true, _) => "valid IPv4",
                    (_, true) => "valid IPv6",
                    _ => "invalid",
                };
                format!("{}: {kind}\n", v.address)
            })?
        }
        Commands::FromInt { value } => {
            let info = IntegerAddress {
                integer: *value,
                address: format_ipv4(*value),
                hex: ipv4_to_hex(*value),
            };
            render(format, &info, |i| {
                format!("{} = {} ({})\n", i.integer, i.address, i.hex)
            })?
        }
    };
    Ok(text)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, Box<dyn Error>> {
    Ok(serde_json::to_string_pretty(value)? + "\n")
}

/// A single record: table via `table`, CSV as `field,value` lines, or JSON.
fn render<T, F>(format: OutputFormat, value: &T, table: F) -> Result<String, Box<dyn Error>>
where
    T: Serialize,
    F: Fn(&T) -> String,
{
    match format {
        OutputFormat::Table => Ok(table(value)),
        OutputFormat::Json => to_json(value),
        OutputFormat::Csv => {
            let json = serde_json::to_value(value)?;
            let fields = json.as_object().ok_or("record is not an object")?;
            let mut out = String::from("field,value\n");
            for (key, value) in fields {
                let value = match value {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                out.push_str(
                    &[key.as_str(), value.as_str()]
                        .iter()
                        .map(|f| output::escape_csv_field(f))
                        .join(","),
                );
                out.push('\n');
            }
            Ok(out)
        }
    }
}

/// First `max_rows` blocks of `blocks`, with the full count for the table footer.
fn render_capped(
    format: OutputFormat,
    blocks: SubnetBlocks,
    max_rows: usize,
) -> Result<String, Box<dyn Error>> {
    let total = blocks.total();
    log::debug!("rendering {max_rows} of {total} x /{}", blocks.prefix());
    let rows: Vec<SubnetBlock> = blocks.take(max_rows).collect();
    render_blocks(format, &rows, total)
}

fn render_blocks(
    format: OutputFormat,
    blocks: &[SubnetBlock],
    total: u64,
) -> Result<String, Box<dyn Error>> {
    Ok(match format {
        OutputFormat::Table => output::render_blocks(blocks, total),
        OutputFormat::Csv => output::blocks_to_csv(blocks),
        OutputFormat::Json => to_json(&blocks)?,
    })
}
