/*!
 * Error Types
 * Virtual memory errors with thiserror, miette, and serde support
 */

use super::types::{Address, AreaId, Size};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Virtual memory operation result
pub type VmResult<T> = Result<T, VmError>;

/// Virtual memory errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum VmError {
    #[error("VM area {vmaid} not found")]
    #[diagnostic(
        code(vm::not_found),
        help("The memory map is empty or holds no area with this id.")
    )]
    NotFound { vmaid: AreaId },

    #[error("Range [0x{start:x}, 0x{end:x}) for area {vmaid} overlaps area {sibling}")]
    #[diagnostic(
        code(vm::overlap),
        help("Areas of one memory map must never share an address. Grow a different area or free space first.")
    )]
    Overlap {
        vmaid: AreaId,
        sibling: AreaId,
        start: Address,
        end: Address,
    },

    #[error("Region allocation failed in area {vmaid}: {reason}")]
    #[diagnostic(
        code(vm::allocation_failed),
        help("The break pointer cannot be extended by the requested amount.")
    )]
    AllocationFailed { vmaid: AreaId, reason: String },

    #[error("{stage} failed: {reason}")]
    #[diagnostic(
        code(vm::failed),
        help("A frame mapping or swap collaborator reported an error. View logs for details.")
    )]
    Failed { stage: String, reason: String },

    #[error("Invalid range [0x{start:x}, 0x{end:x}): end must exceed start")]
    #[diagnostic(code(vm::invalid_range))]
    InvalidRange { start: Address, end: Address },

    #[error("Invalid size: {size} bytes")]
    #[diagnostic(code(vm::invalid_size), help("Requested sizes must be non-zero."))]
    InvalidSize { size: Size },

    #[error("Range [0x{start:x}, 0x{end:x}) lies outside area {vmaid}")]
    #[diagnostic(
        code(vm::out_of_range),
        help("Only ranges below the area's break and inside its bounds can be released to it.")
    )]
    OutOfRange {
        vmaid: AreaId,
        start: Address,
        end: Address,
    },

    #[error("Range [0x{start:x}, 0x{end:x}) in area {vmaid} is already free")]
    #[diagnostic(
        code(vm::already_free),
        help("A region may only be released once per reservation.")
    )]
    AlreadyFree {
        vmaid: AreaId,
        start: Address,
        end: Address,
    },

    #[error("VM area {0} already exists")]
    #[diagnostic(code(vm::duplicate_area))]
    DuplicateArea(AreaId),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(code(vm::invalid_config))]
    InvalidConfig(String),
}

impl VmError {
    /// Wrap a collaborator error as a composite failure of `stage`
    pub fn failed(stage: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        VmError::Failed {
            stage: stage.into(),
            reason: reason.to_string(),
        }
    }
}
