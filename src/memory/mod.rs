/*!
 * Memory Module
 * Virtual memory areas, their free lists, and the manager that grows them
 */

pub mod area;
pub mod free_list;
pub mod manager;
pub mod map;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use area::VmArea;
pub use free_list::FreeList;
pub use manager::VmManager;
pub use map::MemoryMap;
pub use traits::*;
pub use types::*;
