/*!
 * Virtual Memory Area
 *
 * One named logical segment of a process: fixed start, a break pointer that
 * carves fresh space, an end pushed forward by growth, and a free list of
 * regions available for reuse.
 *
 * Invariant: `start <= sbrk <= end` whenever the area is only grown through
 * [`crate::memory::VmManager::grow_area`]. A bare [`VmArea::reserve_region`]
 * at the break does not consult `end`.
 */

use super::free_list::FreeList;
use super::types::{AreaStats, Region, RegionPlan};
use crate::core::errors::{VmError, VmResult};
use crate::core::types::{Address, AreaId, Size};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct VmArea {
    id: AreaId,
    start: Address,
    end: Address,
    sbrk: Address,
    free_list: FreeList,
    /// Bytes handed out by the allocator and not yet released
    committed: Size,
}

impl VmArea {
    /// Create an area spanning `[start, end)` with the break at `start`
    pub fn new(id: AreaId, start: Address, end: Address) -> VmResult<Self> {
        if end < start {
            return Err(VmError::InvalidRange { start, end });
        }
        Ok(Self {
            id,
            start,
            end,
            sbrk: start,
            free_list: FreeList::new(),
            committed: 0,
        })
    }

    #[inline]
    pub fn id(&self) -> AreaId {
        self.id
    }

    #[inline]
    pub fn start(&self) -> Address {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Address {
        self.end
    }

    #[inline]
    pub fn sbrk(&self) -> Address {
        self.sbrk
    }

    #[inline]
    pub fn committed(&self) -> Size {
        self.committed
    }

    pub fn free_list(&self) -> &FreeList {
        &self.free_list
    }

    /// Decide where `aligned` bytes would come from without touching the area
    ///
    /// First fit over the free list in list order, else the current break.
    pub fn plan_region(&self, aligned: Size) -> VmResult<RegionPlan> {
        if aligned == 0 {
            return Err(VmError::InvalidSize { size: aligned });
        }

        if let Some((position, free)) = self.free_list.first_fit(aligned) {
            let region = Region::with_len(free.start(), aligned).ok_or_else(|| {
                VmError::AllocationFailed {
                    vmaid: self.id,
                    reason: format!("free region at 0x{:x} overflows", free.start()),
                }
            })?;
            return Ok(RegionPlan::Reuse { position, region });
        }

        let region =
            Region::with_len(self.sbrk, aligned).ok_or_else(|| VmError::AllocationFailed {
                vmaid: self.id,
                reason: format!(
                    "break 0x{:x} cannot be extended by {} bytes",
                    self.sbrk, aligned
                ),
            })?;
        Ok(RegionPlan::Break { region })
    }

    /// Apply a plan produced by [`VmArea::plan_region`] on this area
    pub fn commit_plan(&mut self, plan: RegionPlan) -> VmResult<Region> {
        let region = match plan {
            RegionPlan::Reuse { position, region } => {
                let stale = VmError::AllocationFailed {
                    vmaid: self.id,
                    reason: "free list changed since the plan was made".into(),
                };
                if self.free_list.get(position).map(|free| free.start()) != Some(region.start()) {
                    return Err(stale);
                }
                let carved = self.free_list.carve(position, region.len()).ok_or(stale)?;
                debug!(
                    vmaid = self.id,
                    start = carved.start(),
                    end = carved.end(),
                    remaining_free = self.free_list.len(),
                    "Reused free region"
                );
                carved
            }
            RegionPlan::Break { region } => {
                if region.start() != self.sbrk {
                    return Err(VmError::AllocationFailed {
                        vmaid: self.id,
                        reason: "break moved since the plan was made".into(),
                    });
                }
                self.sbrk = region.end();
                debug!(
                    vmaid = self.id,
                    start = region.start(),
                    end = region.end(),
                    "Extended break"
                );
                region
            }
        };

        self.committed += region.len();
        Ok(region)
    }

    /// Reserve `aligned` bytes inside this area, mutating the free list or break
    pub fn reserve_region(&mut self, aligned: Size) -> VmResult<Region> {
        let plan = self.plan_region(aligned)?;
        self.commit_plan(plan)
    }

    /// Return a previously reserved region to the free list
    ///
    /// The region must lie below the break and inside the bounds, and must
    /// not overlap anything already free.
    pub fn release_region(&mut self, region: Region) -> VmResult<()> {
        if !region.within(self.start, self.sbrk.min(self.end)) {
            return Err(VmError::OutOfRange {
                vmaid: self.id,
                start: region.start(),
                end: region.end(),
            });
        }

        let already_free = VmError::AlreadyFree {
            vmaid: self.id,
            start: region.start(),
            end: region.end(),
        };
        if self.free_list.overlaps(&region) {
            return Err(already_free);
        }
        self.committed = self
            .committed
            .checked_sub(region.len())
            .ok_or(already_free)?;

        self.free_list.enlist(region);
        debug!(
            vmaid = self.id,
            start = region.start(),
            end = region.end(),
            free_regions = self.free_list.len(),
            "Released region"
        );
        Ok(())
    }

    /// Push the end bound forward by `amount` bytes
    pub(crate) fn extend_end(&mut self, amount: Size) -> VmResult<Address> {
        self.end = self
            .end
            .checked_add(amount)
            .ok_or_else(|| VmError::AllocationFailed {
                vmaid: self.id,
                reason: format!("end 0x{:x} cannot grow by {} bytes", self.end, amount),
            })?;
        Ok(self.end)
    }

    pub fn stats(&self) -> AreaStats {
        AreaStats {
            id: self.id,
            start: self.start,
            end: self.end,
            sbrk: self.sbrk,
            committed_bytes: self.committed,
            free_bytes: self.free_list.total_bytes(),
            free_regions: self.free_list.len(),
            gap_bytes: self.end.saturating_sub(self.sbrk),
        }
    }

    /// Bounds ordering plus the committed + free + gap accounting identity
    pub fn is_consistent(&self) -> bool {
        self.start <= self.sbrk && self.stats().is_balanced()
    }
}
