//! IPv6 address codec.
//!
//! Addresses are held as eight 16-bit groups and rendered either expanded
//! (`2001:0db8:0000:...`) or compressed (`2001:db8::1`).

use super::ipv4::parse_ipv4;
use crate::error::{Result, SubnetError};
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;

/// Maximum length for an IPv6 prefix (128 bits).
pub const MAX_LENGTH_V6: u8 = 128;

/// The eight 16-bit groups of an IPv6 address, most significant first.
pub type Ipv6Groups = [u16; 8];

lazy_static! {
    static ref HEX_GROUP: Regex = Regex::new(r"^[0-9A-Fa-f]{1,4}$").expect("Invalid Regex?");
}

/// Parse an IPv6 literal, expanding `::` and an optional trailing dotted quad.
///
/// # Examples
/// ```
/// use subnet_calculator::parse_ipv6;
/// assert_eq!(parse_ipv6("2001:db8::1").unwrap(), [0x2001, 0xdb8, 0, 0, 0, 0, 0, 1]);
/// assert!(parse_ipv6("1::2::3").is_err());
/// ```
pub fn parse_ipv6(s: &str) -> Result<Ipv6Groups> {
    let halves: Vec<&str> = s.split("::").collect();
    let groups = match halves.as_slice() {
        [all] => {
            let groups = parse_groups(s, all, true)?;
            if groups.len() != 8 {
                return Err(SubnetError::invalid_format(
                    "IPv6 address",
                    s,
                    format!("expected 8 groups, found {}", groups.len()),
                ));
            }
            groups
        }
        [left, right] => {
            let left = parse_groups(s, left, false)?;
            let right = parse_groups(s, right, true)?;
            if left.len() + right.len() > 7 {
                return Err(SubnetError::invalid_format(
                    "IPv6 address",
                    s,
                    "'::' must stand for at least one group",
                ));
            }
            let fill = 8 - left.len() - right.len();
            left.into_iter()
                .chain(std::iter::repeat(0).take(fill))
                .chain(right)
                .collect()
        }
        _ => {
            return Err(SubnetError::invalid_format(
                "IPv6 address",
                s,
                "'::' may appear only once",
            ))
        }
    };

    let mut out = [0u16; 8];
    out.copy_from_slice(&groups);
    Ok(out)
}

/// Parse one side of a `::` split. An empty segment holds no groups.
fn parse_groups(s: &str, segment: &str, allow_ipv4_tail: bool) -> Result<Vec<u16>> {
    if segment.is_empty() {
        return Ok(Vec::new());
    }
    let tokens: Vec<&str> = segment.split(':').collect();
    let mut groups = Vec::with_capacity(8);
    for (i, token) in tokens.iter().enumerate() {
        let last = i == tokens.len() - 1;
        if last && allow_ipv4_tail && token.contains('.') {
            let v4 = parse_ipv4(token).map_err(|e| {
                SubnetError::invalid_format("IPv6 address", s, format!("embedded IPv4: {e}"))
            })?;
            groups.push((v4 >> 16) as u16);
            groups.push((v4 & 0xFFFF) as u16);
        } else if HEX_GROUP.is_match(token) {
            let group = u16::from_str_radix(token, 16).map_err(|_| {
                SubnetError::invalid_format("IPv6 address", s, format!("bad group '{token}'"))
            })?;
            groups.push(group);
        } else {
            return Err(SubnetError::invalid_format(
                "IPv6 address",
                s,
                format!("group '{token}' is not 1-4 hex digits"),
            ));
        }
        if groups.len() > 8 {
            return Err(SubnetError::invalid_format(
                "IPv6 address",
                s,
                "more than 8 groups",
            ));
        }
    }
    Ok(groups)
}

/// Eight groups of four lowercase hex digits.
pub fn format_ipv6_expanded(groups: &Ipv6Groups) -> String {
    groups.iter().map(|g| format!("{g:04x}")).join(":")
}

/// Shortest form: leading zeros stripped and the longest run of two or more
/// zero groups replaced by `::`. Equal-length runs resolve to the leftmost.
pub fn format_ipv6_compressed(groups: &Ipv6Groups) -> String {
    let short = |gs: &[u16]| gs.iter().map(|g| format!("{g:x}")).join(":");

    match longest_zero_run(groups) {
        Some((start, len)) => format!(
            "{}::{}",
            short(&groups[..start]),
            short(&groups[start + len..])
        ),
        None => short(groups),
    }
}

/// `(start, len)` of the leftmost longest run of at least two zero groups.
fn longest_zero_run(groups: &Ipv6Groups) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    let mut i = 0;
    while i < groups.len() {
        if groups[i] != 0 {
            i += 1;
            continue;
        }
        let start = i;
        while i < groups.len() && groups[i] == 0 {
            i += 1;
        }
        let len = i - start;
        if len >= 2 && best.map_or(true, |(_, best_len)| len > best_len) {
            best = Some((start, len));
        }
    }
    best
}

/// Each group as 16 zero-padded bits, colon-joined.
pub fn ipv6_to_binary(groups: &Ipv6Groups) -> String {
    groups.iter().map(|g| format!("{g:016b}")).join(":")
}

/// Exact size of an address block, `2^host_bits`, for any width up to 128 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HostCount {
    host_bits: u8,
}

impl HostCount {
    pub fn from_host_bits(host_bits: u8) -> HostCount {
        HostCount {
            host_bits: host_bits.min(MAX_LENGTH_V6),
        }
    }

    pub fn host_bits(&self) -> u8 {
        self.host_bits
    }

    /// The count as an integer; `None` only for a whole /0 space.
    pub fn as_u128(&self) -> Option<u128> {
        1u128.checked_shl(self.host_bits as u32)
    }

    /// `2^k` rendering for display next to very large counts.
    pub fn power_notation(&self) -> String {
        format!("2^{}", self.host_bits)
    }
}

impl fmt::Display for HostCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_u128() {
            Some(n) => write!(f, "{n}"),
            // 2^128 is one past u128::MAX
            None => f.write_str("340282366920938463463374607431768211456"),
        }
    }
}

impl Serialize for HostCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
