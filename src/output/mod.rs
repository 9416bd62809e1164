//! Output formatting for calculator results.
//!
//! - [`csv`] - CSV export of block tables
//! - [`terminal`] - Aligned terminal output with colors
//!
//! JSON output goes straight through `serde_json`; every result type derives
//! `Serialize`.

mod csv;
mod terminal;

pub use csv::{blocks_to_csv, escape_csv_field, vlsm_to_csv};
pub use terminal::{render_blocks, render_ipv4_info, render_ipv6_info, render_vlsm};
