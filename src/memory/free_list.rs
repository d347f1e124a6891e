/*!
 * Area Free List
 *
 * Ordered list of free regions backed by an index-addressed slot pool.
 * Consumed regions return their slot to the pool's vacant set instead of
 * being deallocated, so unlinking never chases a previous pointer.
 */

use super::types::Region;
use crate::core::types::Size;

/// Free regions of one area, kept in list order
#[derive(Debug, Clone, Default)]
pub struct FreeList {
    /// Slot pool; `None` marks a vacant slot
    slots: Vec<Option<Region>>,
    /// Vacant slot indices available for reuse
    vacant: Vec<usize>,
    /// Live slot indices in list order
    order: Vec<usize>,
}

impl FreeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a region to the tail of the list, returning its slot index
    pub fn enlist(&mut self, region: Region) -> usize {
        let slot = match self.vacant.pop() {
            Some(slot) => {
                self.slots[slot] = Some(region);
                slot
            }
            None => {
                self.slots.push(Some(region));
                self.slots.len() - 1
            }
        };
        self.order.push(slot);
        slot
    }

    /// First region in list order holding at least `size` bytes
    ///
    /// Returns its list position and a copy of the region.
    pub fn first_fit(&self, size: Size) -> Option<(usize, Region)> {
        self.iter()
            .enumerate()
            .find(|(_, region)| region.len() >= size)
    }

    /// Carve `size` bytes from the front of the region at `position`
    ///
    /// A partially consumed region shrinks in place; a fully consumed one is
    /// unlinked and its slot returned to the pool. Returns `None` if the
    /// position is stale or the region is too small.
    pub fn carve(&mut self, position: usize, size: Size) -> Option<Region> {
        let slot = *self.order.get(position)?;
        let region = self.slots.get_mut(slot)?.as_mut()?;
        if region.len() < size {
            return None;
        }

        let carved = Region::with_len(region.start(), size)?;
        if region.end() > carved.end() {
            region.advance(size);
        } else {
            self.order.remove(position);
            self.slots[slot] = None;
            self.vacant.push(slot);
        }
        Some(carved)
    }

    /// Region at list `position`
    pub fn get(&self, position: usize) -> Option<Region> {
        self.order.get(position).and_then(|&slot| self.slots[slot])
    }

    /// Whether any free region shares an address with `region`
    pub fn overlaps(&self, region: &Region) -> bool {
        self.iter()
            .any(|free| free.overlaps(region.start(), region.end()))
    }

    /// Free regions in list order
    pub fn iter(&self) -> impl Iterator<Item = Region> + '_ {
        self.order.iter().filter_map(move |&slot| self.slots[slot])
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Sum of all free region lengths
    pub fn total_bytes(&self) -> Size {
        self.iter().map(|r| r.len()).sum()
    }

    /// Number of slots ever allocated by the pool
    pub fn pool_capacity(&self) -> usize {
        self.slots.len()
    }
}
