//! Address models and codecs.
//!
//! - [`Ipv4`] - IPv4 address with CIDR notation support, plus the IPv4 integer codec
//! - IPv6 group codec with expanded/compressed rendering and [`HostCount`]
//! - [`SubnetBlock`] and [`VlsmBlock`] - partition results

mod block;
mod ipv4;
mod ipv6;

// Re-export public types
pub use block::{SubnetBlock, VlsmBlock};
pub(crate) use ipv4::parse_prefix;
pub use ipv4::{
    broadcast_addr, format_ipv4, get_cidr_mask, ipv4_to_6to4_prefix, ipv4_to_binary,
    ipv4_to_binary_id, ipv4_to_hex, ipv4_to_in_addr_arpa, ipv4_to_mapped_ipv6, num_hosts,
    num_usable_hosts, parse_ipv4, prefix_to_subnet_mask, subnet_mask_to_prefix, wildcard_mask, Ipv4,
    MAX_LENGTH,
};
pub use ipv6::{
    format_ipv6_compressed, format_ipv6_expanded, ipv6_to_binary, parse_ipv6, HostCount,
    Ipv6Groups, MAX_LENGTH_V6,
};
