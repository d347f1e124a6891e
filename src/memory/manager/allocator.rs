/*!
 * Region Allocation
 * Reservation, release and validation entry points of the manager
 */

use super::VmManager;
use crate::core::errors::{VmError, VmResult};
use crate::core::types::{Address, AreaId, Size};
use crate::memory::types::{AreaStats, Region};
use crate::process::Process;
use tracing::debug;

impl VmManager {
    /// Snapshot of area `vmaid` in the caller's memory map
    pub fn find_area(&self, caller: &Process, vmaid: AreaId) -> VmResult<AreaStats> {
        caller.mm().find_area(vmaid).map(|area| area.stats())
    }

    /// Reserve a page-aligned region of at least `raw_size` bytes in area `vmaid`
    ///
    /// Mutates the area's free list or break immediately and does not check
    /// the area's end bound; growth goes through [`VmManager::grow_area`].
    /// A missing area is an allocation failure.
    pub fn reserve_region(&self, caller: &Process, vmaid: AreaId, raw_size: Size) -> VmResult<Region> {
        let (aligned, _) = self.align(vmaid, raw_size)?;
        let mut mm = caller.mm();
        let area = mm
            .find_area_mut(vmaid)
            .map_err(|_| VmError::AllocationFailed {
                vmaid,
                reason: "no such area".into(),
            })?;
        let region = area.reserve_region(aligned)?;

        debug!(
            pid = caller.pid(),
            vmaid,
            raw_size,
            aligned,
            start = region.start(),
            end = region.end(),
            "Reserved region"
        );
        Ok(region)
    }

    /// Return a region to area `vmaid`'s free list
    pub fn release_region(&self, caller: &Process, vmaid: AreaId, region: Region) -> VmResult<()> {
        caller.mm().find_area_mut(vmaid)?.release_region(region)
    }

    /// Check `[start, end)` against every area other than `vmaid`
    pub fn validate_no_overlap(
        &self,
        caller: &Process,
        vmaid: AreaId,
        start: Address,
        end: Address,
    ) -> VmResult<()> {
        caller.mm().validate_no_overlap(vmaid, start, end)
    }

    /// Snapshot of every area in the caller's memory map
    pub fn stats(&self, caller: &Process) -> Vec<AreaStats> {
        caller.mm().stats()
    }
}
