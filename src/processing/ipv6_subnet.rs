//! IPv6 subnet calculation.

use crate::error::{Result, SubnetError};
use crate::models::{
    format_ipv6_compressed, format_ipv6_expanded, ipv6_to_binary, parse_ipv6, HostCount,
    Ipv6Groups, MAX_LENGTH_V6,
};
use serde::Serialize;

/// Network boundaries of an IPv6 address inside its prefix.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Ipv6SubnetInfo {
    /// The address that was asked about, compressed.
    pub address: String,
    pub network: String,
    pub network_expanded: String,
    pub network_binary: String,
    pub first_host: String,
    pub last_host: String,
    pub prefix_length: u8,
    pub total_hosts: HostCount,
    pub is_private: bool,
}

/// Compute subnet details for an IPv6 address and prefix length.
///
/// IPv6 has no broadcast address, but the host range keeps the IPv4 shape:
/// the first host has the lowest bit set and the last host clears it. Blocks
/// of /127 and /128 are too small for that and span the whole block instead.
/// The private flag is read from the network address.
///
/// # Examples
/// ```
/// use subnet_calculator::compute_ipv6_subnet;
/// let info = compute_ipv6_subnet("2001:db8::1", 64).unwrap();
/// assert_eq!(info.network, "2001:db8::");
/// assert_eq!(info.total_hosts.power_notation(), "2^64");
/// ```
pub fn compute_ipv6_subnet(address: &str, prefix: u8) -> Result<Ipv6SubnetInfo> {
    let groups = parse_ipv6(address)?;
    if prefix > MAX_LENGTH_V6 {
        return Err(SubnetError::out_of_range(
            "prefix length",
            prefix as u64,
            0,
            MAX_LENGTH_V6 as u64,
        ));
    }

    let mut network = [0u16; 8];
    let mut last = [0u16; 8];
    for (i, group) in groups.iter().enumerate() {
        let mask = group_mask(i, prefix);
        network[i] = group & mask;
        last[i] = network[i] | !mask;
    }

    let mut first_host = network;
    let mut last_host = last;
    if prefix < MAX_LENGTH_V6 - 1 {
        first_host[7] |= 1;
        last_host[7] &= 0xfffe;
    }

    log::trace!(
        "compute_ipv6_subnet({address}/{prefix}) -> {}",
        format_ipv6_compressed(&network)
    );

    Ok(Ipv6SubnetInfo {
        address: format_ipv6_compressed(&groups),
        network: format_ipv6_compressed(&network),
        network_expanded: format_ipv6_expanded(&network),
        network_binary: ipv6_to_binary(&network),
        first_host: format_ipv6_compressed(&first_host),
        last_host: format_ipv6_compressed(&last_host),
        prefix_length: prefix,
        total_hosts: HostCount::from_host_bits(MAX_LENGTH_V6 - prefix),
        is_private: is_private_ipv6(&network),
    })
}

/// Network-bit mask for group `i` (0-7) under `prefix`.
fn group_mask(i: usize, prefix: u8) -> u16 {
    let group_start = i * 16;
    let prefix = prefix as usize;
    if prefix >= group_start + 16 {
        0xFFFF
    } else if prefix <= group_start {
        0
    } else {
        0xFFFF << (16 - (prefix - group_start))
    }
}

/// Unique Local (`fc00::/7`) or Link-Local (`fe80::/10`).
pub fn is_private_ipv6(groups: &Ipv6Groups) -> bool {
    let first = groups[0];
    first & 0xFE00 == 0xFC00 || first & 0xFFC0 == 0xFE80
}
