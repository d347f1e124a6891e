/*!
 * Paging VM Library
 * Per-process virtual memory area management for the paging simulator
 */

pub mod core;
pub mod memory;
pub mod monitoring;
pub mod process;

// Re-exports
pub use crate::core::{VmConfig, VmError, VmResult};
pub use memory::{
    AreaStats, FrameCopier, FrameMapper, GrowthOutcome, MapRequest, MemoryMap, Region, VmArea,
    VmManager,
};
pub use monitoring::init_tracing;
pub use process::{CallerContext, Process};
