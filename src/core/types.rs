/*!
 * Core Types
 * Common types used across the paging subsystem
 */

/// Process ID type
pub type Pid = u32;

/// Virtual memory area identifier, unique within one memory map
pub type AreaId = u32;

/// Logical address type
pub type Address = usize;

/// Size type for memory operations
pub type Size = usize;

/// Physical or swap frame number
pub type FrameNumber = usize;

/// Handle of a physical memory or swap device
pub type DeviceId = u32;
