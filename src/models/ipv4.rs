//! IPv4 address and CIDR notation utilities.
//!
//! Provides the [`Ipv4`] CIDR value along with the integer codec, mask helpers
//! and derived encodings used by the subnet engine.

use crate::error::{Result, SubnetError};
use itertools::Itertools;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Parse a strict dotted-decimal IPv4 string into its integer form.
///
/// Exactly four parts, each the canonical decimal text of a value 0-255, so
/// `"01"`, `"+1"` and `" 1"` are all rejected.
///
/// # Examples
/// ```
/// use subnet_calculator::parse_ipv4;
/// assert_eq!(parse_ipv4("192.168.1.0").unwrap(), 0xC0A80100);
/// assert!(parse_ipv4("192.168.01.0").is_err());
/// ```
pub fn parse_ipv4(s: &str) -> Result<u32> {
    let parts: Vec<&str> = s.split('.').collect();
    if parts.len() != 4 {
        return Err(SubnetError::invalid_format(
            "IPv4 address",
            s,
            format!("expected 4 octets, found {}", parts.len()),
        ));
    }

    let mut addr: u32 = 0;
    for part in parts {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SubnetError::invalid_format(
                "IPv4 address",
                s,
                format!("octet '{part}' is not a decimal number"),
            ));
        }
        // all digits, so parsing only fails past u64::MAX
        let value: u64 = part.parse().unwrap_or(u64::MAX);
        if value > 255 {
            return Err(SubnetError::out_of_range("IPv4 octet", value, 0, 255));
        }
        if part != value.to_string() {
            return Err(SubnetError::invalid_format(
                "IPv4 address",
                s,
                format!("octet '{part}' has leading zeros"),
            ));
        }
        addr = (addr << 8) | value as u32;
    }
    Ok(addr)
}

/// Format an integer as a dotted-decimal IPv4 string.
pub fn format_ipv4(n: u32) -> String {
    Ipv4Addr::from(n).to_string()
}

/// Each octet as 8 zero-padded bits, dot-joined.
pub fn ipv4_to_binary(n: u32) -> String {
    n.to_be_bytes().iter().map(|o| format!("{o:08b}")).join(".")
}

/// All 32 bits without separators.
pub fn ipv4_to_binary_id(n: u32) -> String {
    format!("{n:032b}")
}

/// `0x` followed by 8 lowercase hex digits.
pub fn ipv4_to_hex(n: u32) -> String {
    format!("0x{n:08x}")
}

/// DNS reverse lookup name, e.g. `1.1.168.192.in-addr.arpa`.
pub fn ipv4_to_in_addr_arpa(n: u32) -> String {
    let reversed = n.to_be_bytes().iter().rev().join(".");
    format!("{reversed}.in-addr.arpa")
}

/// IPv4-mapped IPv6 address, e.g. `::ffff:c0a8:0101`.
pub fn ipv4_to_mapped_ipv6(n: u32) -> String {
    let (hi, lo) = split_groups(n);
    format!("::ffff:{hi:04x}:{lo:04x}")
}

/// 6to4 prefix of an address, e.g. `2002:c0a8:0101::/48`.
pub fn ipv4_to_6to4_prefix(n: u32) -> String {
    let (hi, lo) = split_groups(n);
    format!("2002:{hi:04x}:{lo:04x}::/48")
}

fn split_groups(n: u32) -> (u16, u16) {
    ((n >> 16) as u16, (n & 0xFFFF) as u16)
}

/// Bit mask for a prefix length; lengths above 32 saturate to a host mask.
fn prefix_mask(len: u8) -> u32 {
    match len {
        0 => 0,
        l if l >= MAX_LENGTH => u32::MAX,
        l => u32::MAX << (MAX_LENGTH - l),
    }
}

fn check_len(len: u8) -> Result<()> {
    if len > MAX_LENGTH {
        Err(SubnetError::out_of_range(
            "prefix length",
            len as u64,
            0,
            MAX_LENGTH as u64,
        ))
    } else {
        Ok(())
    }
}

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use subnet_calculator::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32> {
    check_len(len)?;
    Ok(prefix_mask(len))
}

/// Dotted-decimal subnet mask for a prefix length.
pub fn prefix_to_subnet_mask(len: u8) -> Result<String> {
    Ok(format_ipv4(get_cidr_mask(len)?))
}

/// Prefix length of a dotted-decimal subnet mask.
///
/// Fails with [`SubnetError::InvalidMask`] unless the bits are a contiguous run
/// of ones followed by zeros.
pub fn subnet_mask_to_prefix(mask: &str) -> Result<u8> {
    let bits = parse_ipv4(mask)?;
    mask_bits_to_prefix(bits).ok_or_else(|| SubnetError::InvalidMask {
        mask: mask.to_string(),
    })
}

fn mask_bits_to_prefix(bits: u32) -> Option<u8> {
    let ones = bits.leading_ones();
    if ones + bits.trailing_zeros() == MAX_LENGTH as u32 {
        Some(ones as u8)
    } else {
        None
    }
}

/// Bitwise complement of a dotted-decimal subnet mask.
pub fn wildcard_mask(mask: &str) -> Result<String> {
    Ok(format_ipv4(!parse_ipv4(mask)?))
}

/// Calculate the broadcast address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr> {
    let mask = get_cidr_mask(len)?;
    let network_bits = u32::from(addr) & mask;
    Ok(Ipv4Addr::from(network_bits | !mask))
}

/// Total number of addresses in a block of the given prefix length.
pub fn num_hosts(len: u8) -> Result<u64> {
    check_len(len)?;
    Ok(1u64 << (MAX_LENGTH - len))
}

/// Usable host addresses, excluding network and broadcast; 0 for /31 and /32.
pub fn num_usable_hosts(len: u8) -> Result<u64> {
    let total = num_hosts(len)?;
    Ok(if total > 2 { total - 2 } else { 0 })
}

/// IPv4 address with CIDR notation support.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    /// The IPv4 address.
    pub addr: Ipv4Addr,
    /// The subnet mask length (0-32).
    pub mask: u8,
}

impl Serialize for Ipv4 {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Ipv4 {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Ipv4, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv4::new(&s).map_err(de::Error::custom)
    }
}

impl Ipv4 {
    /// Create a new [`Ipv4`] from a CIDR string (e.g., "10.0.0.0/24").
    pub fn new(addr_cidr: &str) -> Result<Ipv4> {
        let addr_cidr = addr_cidr.trim();
        let (addr, len) = addr_cidr.split_once('/').ok_or_else(|| {
            SubnetError::invalid_format("CIDR", addr_cidr, "expected address/prefix")
        })?;
        let mask = parse_prefix(len, MAX_LENGTH)?;
        Ok(Ipv4 {
            addr: Ipv4Addr::from(parse_ipv4(addr)?),
            mask,
        })
    }

    /// Get the highest (broadcast) address in the subnet.
    pub fn hi(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.lo()) | !prefix_mask(self.mask))
    }

    /// Get the lowest (network) address in the subnet.
    pub fn lo(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) & prefix_mask(self.mask))
    }

    /// The same block with the address cut down to its network boundary.
    pub fn network(&self) -> Ipv4 {
        Ipv4 {
            addr: self.lo(),
            mask: self.mask,
        }
    }
}

/// Parse a decimal prefix length and bound it by `max`.
pub(crate) fn parse_prefix(s: &str, max: u8) -> Result<u8> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SubnetError::invalid_format(
            "prefix length",
            s,
            "not a decimal number",
        ));
    }
    let value: u64 = s.parse().unwrap_or(u64::MAX);
    if value > max as u64 {
        return Err(SubnetError::out_of_range(
            "prefix length",
            value,
            0,
            max as u64,
        ));
    }
    Ok(value as u8)
}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}
