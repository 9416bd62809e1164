//! Partition result records.

use super::ipv4::{
    broadcast_addr, get_cidr_mask, num_hosts, num_usable_hosts, Ipv4, MAX_LENGTH,
};
use crate::error::Result;
use serde::Serialize;
use std::net::Ipv4Addr;

/// One child block of a partitioned network.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SubnetBlock {
    /// Position in ascending address order, starting at 0.
    pub index: usize,
    pub network: Ipv4Addr,
    pub broadcast: Ipv4Addr,
    pub first_host: Ipv4Addr,
    pub last_host: Ipv4Addr,
    pub prefix: u8,
    pub subnet_mask: Ipv4Addr,
    pub total_hosts: u64,
    pub usable_hosts: u64,
}

impl SubnetBlock {
    /// Build the block of length `prefix` that contains `addr`.
    ///
    /// Blocks of /31 and /32 have no separate host range: the first host is
    /// the network and the last host is the broadcast.
    pub fn new(index: usize, addr: Ipv4Addr, prefix: u8) -> Result<SubnetBlock> {
        let mask = get_cidr_mask(prefix)?;
        let network = Ipv4Addr::from(u32::from(addr) & mask);
        let broadcast = broadcast_addr(addr, prefix)?;
        let (first_host, last_host) = if prefix >= MAX_LENGTH - 1 {
            (network, broadcast)
        } else {
            (
                Ipv4Addr::from(u32::from(network) + 1),
                Ipv4Addr::from(u32::from(broadcast) - 1),
            )
        };
        Ok(SubnetBlock {
            index,
            network,
            broadcast,
            first_host,
            last_host,
            prefix,
            subnet_mask: Ipv4Addr::from(mask),
            total_hosts: num_hosts(prefix)?,
            usable_hosts: num_usable_hosts(prefix)?,
        })
    }

    /// The block as a CIDR value.
    pub fn cidr(&self) -> Ipv4 {
        Ipv4 {
            addr: self.network,
            mask: self.prefix,
        }
    }
}

/// A block handed out by VLSM allocation for one host-count requirement.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct VlsmBlock {
    /// Host count the caller asked for.
    pub hosts_needed: u32,
    /// Position of the requirement in the caller's list.
    pub requirement_index: usize,
    #[serde(flatten)]
    pub block: SubnetBlock,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subnet_block_new() {
        let b = SubnetBlock::new(3, Ipv4Addr::new(10, 0, 0, 200), 26).unwrap();
        assert_eq!(b.index, 3);
        assert_eq!(b.network, Ipv4Addr::new(10, 0, 0, 192));
        assert_eq!(b.broadcast, Ipv4Addr::new(10, 0, 0, 255));
        assert_eq!(b.first_host, Ipv4Addr::new(10, 0, 0, 193));
        assert_eq!(b.last_host, Ipv4Addr::new(10, 0, 0, 254));
        assert_eq!(b.subnet_mask, Ipv4Addr::new(255, 255, 255, 192));
        assert_eq!(b.total_hosts, 64);
        assert_eq!(b.usable_hosts, 62);
        assert_eq!(b.cidr().to_string(), "10.0.0.192/26");
    }

    #[test]
    fn test_subnet_block_point_to_point() {
        let b = SubnetBlock::new(0, Ipv4Addr::new(10, 0, 0, 7), 31).unwrap();
        assert_eq!(b.first_host, Ipv4Addr::new(10, 0, 0, 6));
        assert_eq!(b.last_host, Ipv4Addr::new(10, 0, 0, 7));
        assert_eq!(b.usable_hosts, 0);

        let b = SubnetBlock::new(0, Ipv4Addr::new(10, 0, 0, 7), 32).unwrap();
        assert_eq!(b.first_host, b.last_host);
        assert_eq!(b.total_hosts, 1);
    }

    #[test]
    fn test_subnet_block_whole_space() {
        let b = SubnetBlock::new(0, Ipv4Addr::new(1, 2, 3, 4), 0).unwrap();
        assert_eq!(b.network, Ipv4Addr::UNSPECIFIED);
        assert_eq!(b.broadcast, Ipv4Addr::BROADCAST);
        assert_eq!(b.total_hosts, 1 << 32);
        assert!(SubnetBlock::new(0, Ipv4Addr::UNSPECIFIED, 33).is_err());
    }
}
