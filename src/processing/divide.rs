//! Equal-size division of an IPv4 network into child blocks.

use crate::error::{Result, SubnetError};
use crate::models::{num_hosts, parse_ipv4, Ipv4, SubnetBlock, MAX_LENGTH};
use std::net::Ipv4Addr;

/// Longest prefix equal division hands out; keeps room for network and broadcast.
pub const MAX_DIVIDE_PREFIX: u8 = 30;

/// Parse `network` and cut it down to its `prefix` boundary.
pub(crate) fn base_network(network: &str, prefix: u8) -> Result<Ipv4> {
    let addr = Ipv4Addr::from(parse_ipv4(network)?);
    if prefix > MAX_LENGTH {
        return Err(SubnetError::out_of_range(
            "base prefix",
            prefix as u64,
            0,
            MAX_LENGTH as u64,
        ));
    }
    Ok(Ipv4 { addr, mask: prefix }.network())
}

/// Split `network/base_prefix` into `count` equal, contiguous blocks.
///
/// The child prefix is `base_prefix + ceil(log2(count))`; exactly `count`
/// blocks are returned even when that is not a power of two.
///
/// # Examples
/// ```
/// use subnet_calculator::divide_equal;
/// let blocks = divide_equal("10.0.0.0", 24, 4).unwrap();
/// assert_eq!(blocks[1].cidr().to_string(), "10.0.0.64/26");
/// ```
pub fn divide_equal(network: &str, base_prefix: u8, count: u32) -> Result<Vec<SubnetBlock>> {
    Ok(divide_blocks(network, base_prefix, count)?.collect())
}

/// Lazy form of [`divide_equal`]: the same `count` blocks, produced on demand.
pub fn divide_blocks(network: &str, base_prefix: u8, count: u32) -> Result<SubnetBlocks> {
    let base = base_network(network, base_prefix)?;
    if count == 0 {
        return Err(SubnetError::out_of_range(
            "subnet count",
            0,
            1,
            u32::MAX as u64,
        ));
    }

    // ceil(log2(count)); counts above 2^31 need all 32 bits
    let bits = count
        .checked_next_power_of_two()
        .map_or(32, |p| p.trailing_zeros());
    let new_prefix = base_prefix as u32 + bits;
    if new_prefix > MAX_DIVIDE_PREFIX as u32 {
        return Err(SubnetError::InsufficientAddressSpace {
            requested: format!("{count} subnets need a /{new_prefix}"),
            available: format!("{base} splits to /{MAX_DIVIDE_PREFIX} at most"),
        });
    }

    log::debug!("divide_equal {base} into {count} x /{new_prefix}");

    let mut blocks = SubnetBlocks::new(base, new_prefix as u8)?;
    blocks.total = count as u64;
    Ok(blocks)
}

/// The `index`-th block of length `new_prefix` inside `network/base_prefix`,
/// computed directly without walking the blocks before it.
pub fn block_at(
    network: &str,
    base_prefix: u8,
    new_prefix: u8,
    index: u64,
) -> Result<SubnetBlock> {
    let base = base_network(network, base_prefix)?;
    let blocks = SubnetBlocks::new(base, new_prefix)?;
    if index >= blocks.total() {
        return Err(SubnetError::out_of_range(
            "block index",
            index,
            0,
            blocks.total() - 1,
        ));
    }
    blocks.block(index)
}

/// Lazily enumerate every block of length `new_prefix` inside
/// `network/base_prefix`, in ascending address order.
pub fn subnet_blocks(network: &str, base_prefix: u8, new_prefix: u8) -> Result<SubnetBlocks> {
    let base = base_network(network, base_prefix)?;
    SubnetBlocks::new(base, new_prefix)
}

/// Iterator over the child blocks of a network.
#[derive(Debug, Clone)]
pub struct SubnetBlocks {
    base: u32,
    prefix: u8,
    size: u64,
    total: u64,
    next: u64,
}

impl SubnetBlocks {
    fn new(base: Ipv4, prefix: u8) -> Result<SubnetBlocks> {
        if prefix > MAX_LENGTH || prefix < base.mask {
            return Err(SubnetError::out_of_range(
                "new prefix",
                prefix as u64,
                base.mask as u64,
                MAX_LENGTH as u64,
            ));
        }
        Ok(SubnetBlocks {
            base: u32::from(base.lo()),
            prefix,
            size: num_hosts(prefix)?,
            total: 1u64 << (prefix - base.mask),
            next: 0,
        })
    }

    /// Number of blocks in the whole enumeration.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    fn block(&self, index: u64) -> Result<SubnetBlock> {
        let addr = u32::try_from(self.base as u64 + index * self.size)
            .map_err(|_| SubnetError::overflow(format!("locating block {index}")))?;
        SubnetBlock::new(index as usize, Ipv4Addr::from(addr), self.prefix)
    }
}

impl Iterator for SubnetBlocks {
    type Item = SubnetBlock;

    fn next(&mut self) -> Option<SubnetBlock> {
        if self.next >= self.total {
            return None;
        }
        let block = self.block(self.next).ok()?;
        self.next += 1;
        Some(block)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.total - self.next).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divide_equal_four() {
        let blocks = divide_equal("10.0.0.0", 24, 4).unwrap();
        let cidrs: Vec<String> = blocks.iter().map(|b| b.cidr().to_string()).collect();
        assert_eq!(
            cidrs,
            vec![
                "10.0.0.0/26",
                "10.0.0.64/26",
                "10.0.0.128/26",
                "10.0.0.192/26"
            ]
        );
        assert_eq!(blocks[0].index, 0);
        assert_eq!(blocks[3].index, 3);
        assert_eq!(blocks[2].broadcast, Ipv4Addr::new(10, 0, 0, 191));
        assert_eq!(blocks[2].usable_hosts, 62);
    }

    #[test]
    fn test_divide_equal_not_power_of_two() {
        let blocks = divide_equal("10.0.0.0", 16, 5).unwrap();
        assert_eq!(blocks.len(), 5);
        assert!(blocks.iter().all(|b| b.prefix == 19));
        assert_eq!(blocks[4].network, Ipv4Addr::new(10, 0, 128, 0));
    }

    #[test]
    fn test_divide_equal_normalises_base() {
        let blocks = divide_equal("192.168.1.77", 24, 2).unwrap();
        assert_eq!(blocks[0].network, Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(blocks[1].network, Ipv4Addr::new(192, 168, 1, 128));
    }

    #[test]
    fn test_divide_equal_union_is_base() {
        for count in [1u32, 2, 3, 8, 64] {
            let blocks = divide_equal("172.16.0.0", 20, count).unwrap();
            assert_eq!(blocks.len(), count as usize);
            let size = blocks[0].total_hosts;
            for pair in blocks.windows(2) {
                assert_eq!(
                    u32::from(pair[0].broadcast) as u64 + 1,
                    u32::from(pair[1].network) as u64
                );
            }
            if count.is_power_of_two() {
                assert_eq!(blocks[0].network, Ipv4Addr::new(172, 16, 0, 0));
                assert_eq!(
                    blocks.last().unwrap().broadcast,
                    Ipv4Addr::new(172, 16, 15, 255)
                );
                assert_eq!(size * count as u64, 4096);
            }
        }
    }

    #[test]
    fn test_divide_equal_errors() {
        assert!(matches!(
            divide_equal("10.0.0.0", 24, 0),
            Err(SubnetError::OutOfRange { .. })
        ));
        assert!(matches!(
            divide_equal("10.0.0.0", 24, 128),
            Err(SubnetError::InsufficientAddressSpace { .. })
        ));
        assert!(divide_equal("10.0.0.0", 24, 64).is_ok());
        assert!(matches!(
            divide_equal("10.0.0.0", 0, u32::MAX),
            Err(SubnetError::InsufficientAddressSpace { .. })
        ));
        assert!(matches!(
            divide_equal("10.0.0.0", 33, 2),
            Err(SubnetError::OutOfRange { .. })
        ));
        assert!(matches!(
            divide_equal("10.0.0", 24, 2),
            Err(SubnetError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_divide_blocks_is_lazy() {
        let mut blocks = divide_blocks("0.0.0.0", 0, 1 << 30).unwrap();
        assert_eq!(blocks.total(), 1 << 30);
        assert_eq!(blocks.prefix(), 30);
        assert_eq!(blocks.size_hint(), (1 << 30, Some(1 << 30)));
        assert_eq!(blocks.next().unwrap().cidr().to_string(), "0.0.0.0/30");
        assert_eq!(blocks.next().unwrap().cidr().to_string(), "0.0.0.4/30");

        let five = divide_blocks("10.0.0.0", 24, 5).unwrap();
        assert_eq!(five.prefix(), 27);
        assert_eq!(five.count(), 5);
    }

    #[test]
    fn test_block_at() {
        let b = block_at("10.0.0.0", 8, 24, 65535).unwrap();
        assert_eq!(b.network, Ipv4Addr::new(10, 255, 255, 0));
        assert_eq!(b.index, 65535);

        let b = block_at("0.0.0.0", 0, 32, u32::MAX as u64).unwrap();
        assert_eq!(b.network, Ipv4Addr::BROADCAST);

        assert!(matches!(
            block_at("10.0.0.0", 8, 24, 65536),
            Err(SubnetError::OutOfRange { value: 65536, .. })
        ));
        assert!(matches!(
            block_at("10.0.0.0", 16, 8, 0),
            Err(SubnetError::OutOfRange { .. })
        ));
        assert!(block_at("10.0.0.0", 16, 33, 0).is_err());
    }

    #[test]
    fn test_subnet_blocks_iter() {
        let mut blocks = subnet_blocks("192.168.0.0", 16, 24).unwrap();
        assert_eq!(blocks.total(), 256);
        assert_eq!(blocks.size_hint(), (256, Some(256)));
        let first = blocks.next().unwrap();
        assert_eq!(first.network, Ipv4Addr::new(192, 168, 0, 0));
        let shown: Vec<SubnetBlock> = blocks.take(3).collect();
        assert_eq!(shown[2].network, Ipv4Addr::new(192, 168, 3, 0));

        let same = subnet_blocks("192.168.0.0", 16, 16).unwrap();
        assert_eq!(same.count(), 1);

        let all: Vec<SubnetBlock> = subnet_blocks("10.0.0.0", 29, 32).unwrap().collect();
        assert_eq!(all.len(), 8);
        assert_eq!(all[7].network, Ipv4Addr::new(10, 0, 0, 7));
        assert_eq!(all[7], block_at("10.0.0.0", 29, 32, 7).unwrap());
    }
}
