//! Variable-length subnet allocation.
//!
//! Requirements are served largest first from the start of the base block.
//! Each gets the smallest block whose usable host count covers it. The packer
//! is greedy and never backtracks.

use super::divide::base_network;
use crate::error::{Result, SubnetError};
use crate::models::{num_hosts, SubnetBlock, VlsmBlock, MAX_LENGTH};
use std::net::Ipv4Addr;

/// Longest prefix whose usable host count (size minus network and broadcast)
/// covers `hosts`. `None` when even a /0 is too small.
pub fn prefix_for_hosts(hosts: u32) -> Option<u8> {
    let needed = hosts as u64 + 2;
    let bits = needed.next_power_of_two().trailing_zeros();
    if bits > MAX_LENGTH as u32 {
        None
    } else {
        Some(MAX_LENGTH - bits as u8)
    }
}

/// Allocate one block per host-count requirement inside `network/base_prefix`.
///
/// Requirements are sorted descending with a stable sort, so equal counts keep
/// the caller's order. Blocks come back in ascending address order, each
/// tagged with its requirement and the requirement's position in the input.
///
/// # Examples
/// ```
/// use subnet_calculator::allocate_vlsm;
/// let blocks = allocate_vlsm("192.168.1.0", 24, &[10, 50]).unwrap();
/// assert_eq!(blocks[0].hosts_needed, 50);
/// assert_eq!(blocks[0].block.cidr().to_string(), "192.168.1.0/26");
/// assert_eq!(blocks[1].block.cidr().to_string(), "192.168.1.64/28");
/// ```
pub fn allocate_vlsm(
    network: &str,
    base_prefix: u8,
    requirements: &[u32],
) -> Result<Vec<VlsmBlock>> {
    let base = base_network(network, base_prefix)?;
    if requirements.contains(&0) {
        return Err(SubnetError::out_of_range(
            "host requirement",
            0,
            1,
            u32::MAX as u64,
        ));
    }

    let mut ordered: Vec<(usize, u32)> = requirements.iter().copied().enumerate().collect();
    ordered.sort_by(|a, b| b.1.cmp(&a.1));

    log::debug!("allocate_vlsm {base} requirements={:?}", requirements);

    let base_end = u32::from(base.hi()) as u64;
    let mut cursor = u32::from(base.lo()) as u64;
    let mut blocks = Vec::with_capacity(ordered.len());

    for (index, (requirement_index, hosts_needed)) in ordered.into_iter().enumerate() {
        let prefix = match prefix_for_hosts(hosts_needed) {
            Some(p) if p >= base.mask => p,
            other => {
                return Err(SubnetError::InsufficientAddressSpace {
                    requested: match other {
                        Some(p) => format!("{hosts_needed} hosts need a /{p}"),
                        None => format!("{hosts_needed} hosts exceed the IPv4 space"),
                    },
                    available: format!("base block {base}"),
                })
            }
        };
        let size = num_hosts(prefix)?;
        if cursor + size - 1 > base_end {
            return Err(SubnetError::InsufficientAddressSpace {
                requested: format!("{hosts_needed} hosts need a /{prefix}"),
                available: format!("{} addresses left in {base}", base_end + 1 - cursor),
            });
        }

        let addr = u32::try_from(cursor)
            .map_err(|_| SubnetError::overflow(format!("allocating {hosts_needed} hosts")))?;
        let block = SubnetBlock::new(index, Ipv4Addr::from(addr), prefix)?;
        log::trace!("  {hosts_needed} hosts -> {}", block.cidr());
        blocks.push(VlsmBlock {
            hosts_needed,
            requirement_index,
            block,
        });
        cursor += size;
    }

    Ok(blocks)
}
