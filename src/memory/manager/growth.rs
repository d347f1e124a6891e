/*!
 * Area Growth
 * Validate-first extension of an area by a page-aligned increment
 */

use super::VmManager;
use crate::core::errors::{VmError, VmResult};
use crate::core::types::{AreaId, Size};
use crate::memory::types::{GrowthOutcome, MapRequest, Region};
use crate::process::Process;
use tracing::{info, instrument, warn};

impl VmManager {
    /// Grow area `vmaid` by `inc_size` bytes, rounded up to whole pages
    ///
    /// The region and the extension `[old_end, old_end + aligned)` are
    /// overlap-checked against sibling areas before anything is committed.
    /// The growth is applied to a scratch copy of the area, the frame mapper
    /// binds the new pages, and only then is the copy stored back. An overlap leaves the area untouched; a mapping failure
    /// does too unless `rollback_on_map_failure` is disabled.
    ///
    /// # Errors
    ///
    /// Every error means the growth did not happen. Callers that only need
    /// success or failure can treat them alike; the variant names the cause:
    /// - [`VmError::InvalidSize`]: `inc_size` is zero
    /// - [`VmError::NotFound`]: no area `vmaid` in the caller's map
    /// - [`VmError::AllocationFailed`]: the break or end would overflow
    /// - [`VmError::Overlap`]: the region or extension hits a sibling area
    /// - [`VmError::Failed`]: the frame mapper rejected the new pages
    #[instrument(skip(self, caller), fields(pid = caller.pid()))]
    pub fn grow_area(
        &self,
        caller: &Process,
        vmaid: AreaId,
        inc_size: Size,
    ) -> VmResult<GrowthOutcome> {
        let (inc_amt, inc_numpages) = self.align(vmaid, inc_size)?;

        let mut mm = caller.mm();
        let mut scratch = mm.find_area(vmaid)?.clone();
        let old_end = scratch.end();

        let plan = scratch.plan_region(inc_amt)?;
        let region = plan.region();
        let extension = Region::with_len(old_end, inc_amt).ok_or_else(|| {
            VmError::AllocationFailed {
                vmaid,
                reason: format!("end 0x{:x} cannot grow by {} bytes", old_end, inc_amt),
            }
        })?;

        // A reused free region lies below the old end, so the new extent is
        // checked alongside the region itself.
        for candidate in [region, extension] {
            if let Err(e) = mm.validate_no_overlap(vmaid, candidate.start(), candidate.end()) {
                warn!(
                    start = candidate.start(),
                    end = candidate.end(),
                    error = %e,
                    "Rejected area growth"
                );
                return Err(e);
            }
        }

        scratch.commit_plan(plan)?;
        let new_end = scratch.extend_end(inc_amt)?;

        let request = MapRequest {
            region,
            prior_end: old_end,
            page_count: inc_numpages,
        };
        match self.mapper.map_logical_range(caller.ctx(), &request) {
            Ok(mapped) => {
                mm.replace_area(scratch)?;
                info!(
                    start = region.start(),
                    end = region.end(),
                    old_end,
                    new_end,
                    pages = inc_numpages,
                    "Grew area"
                );
                Ok(GrowthOutcome {
                    vmaid,
                    region,
                    old_end,
                    new_end,
                    pages: inc_numpages,
                    mapped,
                })
            }
            Err(e) => {
                if !self.config.rollback_on_map_failure {
                    mm.replace_area(scratch)?;
                }
                warn!(
                    start = region.start(),
                    end = region.end(),
                    rolled_back = self.config.rollback_on_map_failure,
                    error = %e,
                    "Frame mapping failed during area growth"
                );
                Err(VmError::failed("frame mapping", e))
            }
        }
    }
}
