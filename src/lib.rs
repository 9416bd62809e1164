//! IPv4/IPv6 subnet calculator.
//!
//! Pure, synchronous address arithmetic: parsing and formatting addresses,
//! subnet details, equal division and VLSM allocation. No state is kept
//! between calls, so every function is safe to call from any thread.
//!
//! ```
//! use subnet_calculator::{allocate_vlsm, compute_ipv4_subnet};
//!
//! let info = compute_ipv4_subnet("192.168.1.0", 24).unwrap();
//! assert_eq!(info.usable_hosts, 254);
//!
//! let blocks = allocate_vlsm("192.168.1.0", 24, &[50, 30, 20, 10]).unwrap();
//! assert_eq!(blocks[3].block.cidr().to_string(), "192.168.1.128/28");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;
pub mod validate;

pub use error::{Result, SubnetError};
pub use models::{
    format_ipv4, format_ipv6_compressed, format_ipv6_expanded, parse_ipv4, parse_ipv6,
    prefix_to_subnet_mask, subnet_mask_to_prefix, HostCount, Ipv4, Ipv6Groups, SubnetBlock,
    VlsmBlock,
};
pub use processing::{
    allocate_vlsm, block_at, compute_ipv4_subnet, compute_ipv4_subnet_with_mask,
    compute_ipv6_subnet, divide_blocks, divide_equal, subnet_blocks, IpClass, Ipv4SubnetInfo,
    Ipv6SubnetInfo, SubnetBlocks,
};
pub use validate::{is_valid_ipv4, is_valid_ipv6};
