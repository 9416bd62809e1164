//! IPv4 subnet calculation.
//!
//! Derives every field of [`Ipv4SubnetInfo`] from an address and a prefix
//! length (or a dotted-decimal mask). All work is O(1) bit arithmetic.

use crate::error::{Result, SubnetError};
use crate::models::{
    ipv4_to_6to4_prefix, ipv4_to_binary, ipv4_to_binary_id, ipv4_to_hex, ipv4_to_in_addr_arpa,
    ipv4_to_mapped_ipv6, parse_ipv4, subnet_mask_to_prefix, SubnetBlock, MAX_LENGTH,
};
use serde::Serialize;
use std::fmt;
use std::net::Ipv4Addr;

/// Classful network category of an address, taken from its first octet.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpClass {
    A,
    B,
    C,
    #[serde(rename = "D (Multicast)")]
    D,
    #[serde(rename = "E (Reserved)")]
    E,
    /// 0.x.x.x and 127.x.x.x fall outside the classful table.
    Unknown,
}

impl IpClass {
    pub fn from_first_octet(octet: u8) -> IpClass {
        match octet {
            1..=126 => IpClass::A,
            128..=191 => IpClass::B,
            192..=223 => IpClass::C,
            224..=239 => IpClass::D,
            240..=255 => IpClass::E,
            _ => IpClass::Unknown,
        }
    }
}

impl fmt::Display for IpClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IpClass::A => "A",
            IpClass::B => "B",
            IpClass::C => "C",
            IpClass::D => "D (Multicast)",
            IpClass::E => "E (Reserved)",
            IpClass::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// Everything known about an IPv4 address inside its subnet.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Ipv4SubnetInfo {
    /// The address that was asked about.
    pub address: Ipv4Addr,
    pub network: Ipv4Addr,
    pub network_binary: String,
    pub broadcast: Ipv4Addr,
    pub broadcast_binary: String,
    pub first_host: Ipv4Addr,
    pub last_host: Ipv4Addr,
    pub subnet_mask: Ipv4Addr,
    pub subnet_mask_binary: String,
    pub wildcard_mask: Ipv4Addr,
    pub wildcard_mask_binary: String,
    pub cidr: u8,
    pub total_hosts: u64,
    pub usable_hosts: u64,
    pub ip_class: IpClass,
    pub is_private: bool,
    /// `first - last`.
    pub usable_host_range: String,
    /// `address /cidr`.
    pub short_notation: String,
    pub binary_id: String,
    pub integer_id: u32,
    pub hex_id: String,
    pub in_addr_arpa: String,
    pub ipv4_mapped_address: String,
    pub six_to_four_prefix: String,
}

/// Compute subnet details for `address` with a prefix length.
///
/// # Examples
/// ```
/// use subnet_calculator::compute_ipv4_subnet;
/// let info = compute_ipv4_subnet("10.0.0.5", 30).unwrap();
/// assert_eq!(info.network.to_string(), "10.0.0.4");
/// assert_eq!(info.usable_hosts, 2);
/// ```
pub fn compute_ipv4_subnet(address: &str, prefix: u8) -> Result<Ipv4SubnetInfo> {
    let addr_bits = parse_ipv4(address)?;
    if prefix > MAX_LENGTH {
        return Err(SubnetError::out_of_range(
            "prefix length",
            prefix as u64,
            0,
            MAX_LENGTH as u64,
        ));
    }
    let address = Ipv4Addr::from(addr_bits);
    let block = SubnetBlock::new(0, address, prefix)?;
    let mask_bits = u32::from(block.subnet_mask);
    let wildcard = Ipv4Addr::from(!mask_bits);

    log::trace!("compute_ipv4_subnet({address}/{prefix}) -> {}", block.cidr());

    Ok(Ipv4SubnetInfo {
        address,
        network: block.network,
        network_binary: ipv4_to_binary(u32::from(block.network)),
        broadcast: block.broadcast,
        broadcast_binary: ipv4_to_binary(u32::from(block.broadcast)),
        first_host: block.first_host,
        last_host: block.last_host,
        subnet_mask: block.subnet_mask,
        subnet_mask_binary: ipv4_to_binary(mask_bits),
        wildcard_mask: wildcard,
        wildcard_mask_binary: ipv4_to_binary(!mask_bits),
        cidr: prefix,
        total_hosts: block.total_hosts,
        usable_hosts: block.usable_hosts,
        ip_class: IpClass::from_first_octet(address.octets()[0]),
        is_private: is_private_ipv4(addr_bits),
        usable_host_range: format!("{} - {}", block.first_host, block.last_host),
        short_notation: format!("{address} /{prefix}"),
        binary_id: ipv4_to_binary_id(addr_bits),
        integer_id: addr_bits,
        hex_id: ipv4_to_hex(addr_bits),
        in_addr_arpa: ipv4_to_in_addr_arpa(addr_bits),
        ipv4_mapped_address: ipv4_to_mapped_ipv6(addr_bits),
        six_to_four_prefix: ipv4_to_6to4_prefix(addr_bits),
    })
}

/// Compute subnet details for `address` with a dotted-decimal subnet mask.
pub fn compute_ipv4_subnet_with_mask(address: &str, mask: &str) -> Result<Ipv4SubnetInfo> {
    let prefix = subnet_mask_to_prefix(mask)?;
    compute_ipv4_subnet(address, prefix)
}

/// RFC 1918 ranges as inclusive `(start, end)` integer pairs.
const PRIVATE_RANGES: [(u32, u32); 3] = [
    (0x0A00_0000, 0x0AFF_FFFF), // 10.0.0.0/8
    (0xAC10_0000, 0xAC1F_FFFF), // 172.16.0.0/12
    (0xC0A8_0000, 0xC0A8_FFFF), // 192.168.0.0/16
];

pub fn is_private_ipv4(addr: u32) -> bool {
    PRIVATE_RANGES
        .iter()
        .any(|&(start, end)| addr >= start && addr <= end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_c_private_24() {
        let info = compute_ipv4_subnet("192.168.1.0", 24).unwrap();
        assert_eq!(info.network, Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(info.broadcast, Ipv4Addr::new(192, 168, 1, 255));
        assert_eq!(info.subnet_mask, Ipv4Addr::new(255, 255, 255, 0));
        assert_eq!(info.wildcard_mask, Ipv4Addr::new(0, 0, 0, 255));
        assert_eq!(info.first_host, Ipv4Addr::new(192, 168, 1, 1));
        assert_eq!(info.last_host, Ipv4Addr::new(192, 168, 1, 254));
        assert_eq!(info.total_hosts, 256);
        assert_eq!(info.usable_hosts, 254);
        assert_eq!(info.ip_class, IpClass::C);
        assert_eq!(info.ip_class.to_string(), "C");
        assert!(info.is_private);
        assert_eq!(info.usable_host_range, "192.168.1.1 - 192.168.1.254");
        assert_eq!(info.short_notation, "192.168.1.0 /24");
    }

    #[test]
    fn test_slash_30() {
        let info = compute_ipv4_subnet("10.0.0.5", 30).unwrap();
        assert_eq!(info.network, Ipv4Addr::new(10, 0, 0, 4));
        assert_eq!(info.broadcast, Ipv4Addr::new(10, 0, 0, 7));
        assert_eq!(info.first_host, Ipv4Addr::new(10, 0, 0, 5));
        assert_eq!(info.last_host, Ipv4Addr::new(10, 0, 0, 6));
        assert_eq!(info.usable_hosts, 2);
        assert_eq!(info.ip_class, IpClass::A);
    }

    #[test]
    fn test_slash_31_and_32() {
        let info = compute_ipv4_subnet("10.0.0.5", 31).unwrap();
        assert_eq!(info.first_host, Ipv4Addr::new(10, 0, 0, 4));
        assert_eq!(info.last_host, Ipv4Addr::new(10, 0, 0, 5));
        assert_eq!(info.total_hosts, 2);
        assert_eq!(info.usable_hosts, 0);

        let info = compute_ipv4_subnet("10.0.0.5", 32).unwrap();
        assert_eq!(info.network, Ipv4Addr::new(10, 0, 0, 5));
        assert_eq!(info.broadcast, Ipv4Addr::new(10, 0, 0, 5));
        assert_eq!(info.first_host, info.last_host);
        assert_eq!(info.subnet_mask, Ipv4Addr::BROADCAST);
        assert_eq!(info.wildcard_mask, Ipv4Addr::UNSPECIFIED);
    }

    #[test]
    fn test_slash_0() {
        let info = compute_ipv4_subnet("8.8.8.8", 0).unwrap();
        assert_eq!(info.network, Ipv4Addr::UNSPECIFIED);
        assert_eq!(info.broadcast, Ipv4Addr::BROADCAST);
        assert_eq!(info.subnet_mask, Ipv4Addr::UNSPECIFIED);
        assert_eq!(info.total_hosts, 1 << 32);
        assert_eq!(info.usable_hosts, (1 << 32) - 2);
        assert!(!info.is_private);
    }

    #[test]
    fn test_derived_encodings() {
        let info = compute_ipv4_subnet("192.168.1.1", 24).unwrap();
        assert_eq!(info.network_binary, "11000000.10101000.00000001.00000000");
        assert_eq!(info.subnet_mask_binary, "11111111.11111111.11111111.00000000");
        assert_eq!(info.wildcard_mask_binary, "00000000.00000000.00000000.11111111");
        assert_eq!(info.binary_id, "11000000101010000000000100000001");
        assert_eq!(info.integer_id, 3232235777);
        assert_eq!(info.hex_id, "0xc0a80101");
        assert_eq!(info.in_addr_arpa, "1.1.168.192.in-addr.arpa");
        assert_eq!(info.ipv4_mapped_address, "::ffff:c0a8:0101");
        assert_eq!(info.six_to_four_prefix, "2002:c0a8:0101::/48");
    }

    #[test]
    fn test_with_mask() {
        let info = compute_ipv4_subnet_with_mask("172.20.3.4", "255.240.0.0").unwrap();
        assert_eq!(info.cidr, 12);
        assert_eq!(info.network, Ipv4Addr::new(172, 16, 0, 0));
        assert_eq!(info.broadcast, Ipv4Addr::new(172, 31, 255, 255));
        assert_eq!(info.ip_class, IpClass::B);
        assert!(info.is_private);
        assert!(matches!(
            compute_ipv4_subnet_with_mask("172.20.3.4", "255.0.255.0"),
            Err(SubnetError::InvalidMask { .. })
        ));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            compute_ipv4_subnet("10.0.0.1", 33),
            Err(SubnetError::OutOfRange { value: 33, .. })
        ));
        assert!(matches!(
            compute_ipv4_subnet("10.0.0", 24),
            Err(SubnetError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_ip_class() {
        assert_eq!(IpClass::from_first_octet(0), IpClass::Unknown);
        assert_eq!(IpClass::from_first_octet(1), IpClass::A);
        assert_eq!(IpClass::from_first_octet(126), IpClass::A);
        assert_eq!(IpClass::from_first_octet(127), IpClass::Unknown);
        assert_eq!(IpClass::from_first_octet(128), IpClass::B);
        assert_eq!(IpClass::from_first_octet(223), IpClass::C);
        assert_eq!(IpClass::from_first_octet(224), IpClass::D);
        assert_eq!(IpClass::from_first_octet(240), IpClass::E);
        assert_eq!(IpClass::D.to_string(), "D (Multicast)");
        assert_eq!(
            serde_json::to_string(&IpClass::E).unwrap(),
            "\"E (Reserved)\""
        );
    }

    #[test]
    fn test_is_private_ipv4() {
        let private = ["10.0.0.0", "10.255.255.255", "172.16.0.1", "172.31.255.255", "192.168.0.0"];
        let public = ["9.255.255.255", "11.0.0.0", "172.15.255.255", "172.32.0.0", "192.169.0.0"];
        for ip in private {
            assert!(is_private_ipv4(parse_ipv4(ip).unwrap()), "{ip}");
        }
        for ip in public {
            assert!(!is_private_ipv4(parse_ipv4(ip).unwrap()), "{ip}");
        }
    }

    #[test]
    fn test_network_broadcast_invariants() {
        let addrs = ["0.0.0.0", "10.1.2.3", "172.16.254.1", "192.168.100.200", "255.255.255.255"];
        for a in addrs {
            for prefix in 0..=32u8 {
                let info = compute_ipv4_subnet(a, prefix).unwrap();
                let mask = u32::from(info.subnet_mask);
                let network = u32::from(info.network);
                let broadcast = u32::from(info.broadcast);
                assert_eq!(network & !mask, 0, "{a}/{prefix}");
                assert_eq!(broadcast & mask, network, "{a}/{prefix}");
                assert_eq!(mask.count_ones(), prefix as u32);
            }
        }
    }
}
