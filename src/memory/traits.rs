/*!
 * Memory Traits
 * Interfaces to the page-table and swap collaborators outside the VM core
 */

use super::types::{MapRequest, Region};
use crate::core::errors::VmResult;
use crate::core::types::{DeviceId, FrameNumber};
use crate::process::CallerContext;

/// Binds newly grown logical pages to physical frames or swap storage
///
/// Called at most once per successful growth.
#[cfg_attr(test, mockall::automock)]
pub trait FrameMapper: Send + Sync {
    /// Map the pages of `request.region` at or above `request.prior_end`
    ///
    /// Returns the logical range actually bound.
    fn map_logical_range(&self, caller: &CallerContext, request: &MapRequest) -> VmResult<Region>;
}

/// Copies one frame from a memory device to a swap device
#[cfg_attr(test, mockall::automock)]
pub trait FrameCopier: Send + Sync {
    fn copy_frame(
        &self,
        ram: DeviceId,
        victim: FrameNumber,
        swap: DeviceId,
        dest: FrameNumber,
    ) -> VmResult<()>;
}
