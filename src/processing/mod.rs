//! Subnet calculation logic.
//!
//! - [`ipv4_subnet`] - IPv4 subnet details and classification
//! - [`ipv6_subnet`] - IPv6 network, host range and exact size
//! - [`divide`] - Equal division and direct block lookup
//! - [`vlsm`] - Variable-length subnet allocation

mod divide;
mod ipv4_subnet;
mod ipv6_subnet;
mod vlsm;

// Re-export public functions
pub use divide::{
    block_at, divide_blocks, divide_equal, subnet_blocks, SubnetBlocks, MAX_DIVIDE_PREFIX,
};
pub use ipv4_subnet::{
    compute_ipv4_subnet, compute_ipv4_subnet_with_mask, is_private_ipv4, IpClass, Ipv4SubnetInfo,
};
pub use ipv6_subnet::{compute_ipv6_subnet, is_private_ipv6, Ipv6SubnetInfo};
pub use vlsm::{allocate_vlsm, prefix_for_hosts};
