/*!
 * Process Module
 * Caller context and memory-map ownership
 */

mod types;

pub use types::{CallerContext, Process};
