/*!
 * Process Types
 * The slice of a process control block the VM core works with
 */

use crate::core::types::{DeviceId, Pid};
use crate::memory::MemoryMap;
use parking_lot::{Mutex, MutexGuard};
use serde::{Deserialize, Serialize};

/// Handles threaded explicitly through every VM call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerContext {
    pub pid: Pid,
    /// Physical memory device
    pub mram: DeviceId,
    /// Swap device currently receiving evicted frames
    pub active_mswp: DeviceId,
}

impl CallerContext {
    pub fn new(pid: Pid, mram: DeviceId, active_mswp: DeviceId) -> Self {
        Self {
            pid,
            mram,
            active_mswp,
        }
    }
}

/// A process as seen by the VM core
///
/// The memory map sits behind its own mutex: every mutating VM operation
/// holds it for the whole call, so one map has exactly one mutator at a time.
#[derive(Debug)]
pub struct Process {
    ctx: CallerContext,
    mm: Mutex<MemoryMap>,
}

impl Process {
    pub fn new(ctx: CallerContext, mm: MemoryMap) -> Self {
        Self {
            ctx,
            mm: Mutex::new(mm),
        }
    }

    #[inline]
    pub fn ctx(&self) -> &CallerContext {
        &self.ctx
    }

    #[inline]
    pub fn pid(&self) -> Pid {
        self.ctx.pid
    }

    /// Switch the swap device future evictions go to
    pub fn set_active_swap(&mut self, swap: DeviceId) {
        self.ctx.active_mswp = swap;
    }

    /// Acquire the memory map for the duration of the guard
    pub fn mm(&self) -> MutexGuard<'_, MemoryMap> {
        self.mm.lock()
    }

    pub fn into_memory_map(self) -> MemoryMap {
        self.mm.into_inner()
    }
}
