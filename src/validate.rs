//! Address literal validation.

use crate::models::{parse_ipv4, parse_ipv6};

/// True iff `s` is a strict dotted-decimal IPv4 address.
pub fn is_valid_ipv4(s: &str) -> bool {
    parse_ipv4(s).is_ok()
}

/// True iff `s` is an IPv6 literal: up to 8 groups of 1-4 hex digits, at most
/// one `::` standing for one or more zero groups, and an optional trailing
/// dotted quad.
pub fn is_valid_ipv6(s: &str) -> bool {
    parse_ipv6(s).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_ipv4() {
        assert!(is_valid_ipv4("192.168.1.1"));
        assert!(is_valid_ipv4("0.0.0.0"));
        assert!(is_valid_ipv4("255.255.255.255"));
        assert!(!is_valid_ipv4("256.1.1.1"));
        assert!(!is_valid_ipv4("192.168.1"));
        assert!(!is_valid_ipv4("192.168.1.01"));
        assert!(!is_valid_ipv4("192.168.1.1/24"));
        assert!(!is_valid_ipv4(""));
    }

    #[test]
    fn test_is_valid_ipv6() {
        for ok in [
            "::",
            "::1",
            "2001:db8::1",
            "2001:0db8:85a3:0000:0000:8a2e:0370:7334",
            "fe80::1:2",
            "1:2:3:4:5:6:7::",
            "::ffff:10.0.0.1",
            "64:ff9b::192.0.2.33",
            "FE80::ABCD",
        ] {
            assert!(is_valid_ipv6(ok), "{ok} should be valid");
        }
        for bad in [
            "",
            "1:2:3:4:5:6:7:8:9",
            "2001:db8:::1",
            "2001::db8::1",
            "2001:db8::12345",
            "2001:db8::g",
            "192.168.1.1",
            "::ffff:999.0.0.1",
        ] {
            assert!(!is_valid_ipv6(bad), "{bad} should be invalid");
        }
    }
}
