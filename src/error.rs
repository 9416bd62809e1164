//! Error type shared by every calculator operation.

use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, SubnetError>;

/// Everything that can go wrong while parsing or computing subnets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubnetError {
    /// Malformed address, mask or CIDR string.
    #[error("invalid {field} '{input}': {reason}")]
    InvalidFormat {
        field: &'static str,
        input: String,
        reason: String,
    },

    /// A prefix, octet, count or index outside its allowed bounds.
    #[error("{field} {value} is out of range ({min}-{max})")]
    OutOfRange {
        field: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },

    /// Mask bits are not a left-justified run of ones.
    #[error("invalid subnet mask {mask}: bits are not contiguous")]
    InvalidMask { mask: String },

    /// The requested partition does not fit in the base block.
    #[error("insufficient address space: {requested}, available {available}")]
    InsufficientAddressSpace { requested: String, available: String },

    /// Integer arithmetic would leave the address width.
    #[error("arithmetic overflow while {context}")]
    Overflow { context: String },
}

impl SubnetError {
    pub(crate) fn invalid_format(
        field: &'static str,
        input: &str,
        reason: impl Into<String>,
    ) -> Self {
        SubnetError::InvalidFormat {
            field,
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn out_of_range(field: &'static str, value: u64, min: u64, max: u64) -> Self {
        SubnetError::OutOfRange {
            field,
            value,
            min,
            max,
        }
    }

    pub(crate) fn overflow(context: impl Into<String>) -> Self {
        SubnetError::Overflow {
            context: context.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = SubnetError::invalid_format("IPv4 address", "1.2.3", "expected 4 octets");
        assert_eq!(
            e.to_string(),
            "invalid IPv4 address '1.2.3': expected 4 octets"
        );

        let e = SubnetError::out_of_range("prefix length", 33, 0, 32);
        assert_eq!(e.to_string(), "prefix length 33 is out of range (0-32)");

        let e = SubnetError::InvalidMask {
            mask: "255.0.255.0".to_string(),
        };
        assert!(e.to_string().contains("255.0.255.0"));
    }
}
