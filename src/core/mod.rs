/*!
 * Core Module
 * Shared types, limits, configuration and errors
 */

pub mod config;
pub mod errors;
pub mod limits;
pub mod types;

pub use config::VmConfig;
pub use errors::{VmError, VmResult};
pub use types::*;
