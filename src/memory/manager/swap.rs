/*!
 * Swap Bridge
 * Hands a victim frame to the swap copy primitive
 */

use super::VmManager;
use crate::core::errors::VmResult;
use crate::core::types::FrameNumber;
use crate::process::Process;
use tracing::{debug, instrument, warn};

impl VmManager {
    /// Copy physical frame `victim` into swap frame `swap_frame` on the
    /// caller's active swap device
    ///
    /// Always succeeds from the VM core's point of view; copy failures belong
    /// to the primitive and are only logged here.
    #[instrument(skip(self, caller), fields(pid = caller.pid()))]
    pub fn swap_page(
        &self,
        caller: &Process,
        victim: FrameNumber,
        swap_frame: FrameNumber,
    ) -> VmResult<()> {
        let ctx = caller.ctx();
        match self
            .copier
            .copy_frame(ctx.mram, victim, ctx.active_mswp, swap_frame)
        {
            Ok(()) => debug!(
                ram = ctx.mram,
                swap = ctx.active_mswp,
                "Swapped frame out"
            ),
            Err(e) => warn!(
                ram = ctx.mram,
                swap = ctx.active_mswp,
                error = %e,
                "Swap frame copy failed"
            ),
        }
        Ok(())
    }
}
