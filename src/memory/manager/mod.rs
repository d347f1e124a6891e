/*!
 * Virtual Memory Manager
 *
 * Per-process area management on top of external frame collaborators.
 *
 * ## Operations
 *
 * - **Region reservation**: first fit over an area's free list, falling back
 *   to extending the area's break
 * - **Overlap validation**: a candidate range is checked against every sibling
 *   area's committed bounds
 * - **Area growth**: validate-first; the region is planned and checked on a
 *   scratch copy of the area, and the copy is only written back once the
 *   frame mapper has bound the new pages
 * - **Swap bridge**: hands a victim frame to the swap copy primitive
 *
 * Every call takes the owning [`Process`](crate::process::Process) explicitly
 * and holds its memory-map lock for the whole operation.
 */

mod allocator;
mod growth;
mod swap;

use super::traits::{FrameCopier, FrameMapper};
use crate::core::config::VmConfig;
use crate::core::errors::{VmError, VmResult};
use crate::core::limits::{page_align, pages_in};
use crate::core::types::{AreaId, Size};
use std::sync::Arc;
use tracing::info;

/// Virtual memory manager
#[derive(Clone)]
pub struct VmManager {
    config: VmConfig,
    mapper: Arc<dyn FrameMapper>,
    copier: Arc<dyn FrameCopier>,
}

impl VmManager {
    /// Create a manager with the default configuration
    pub fn new(mapper: Arc<dyn FrameMapper>, copier: Arc<dyn FrameCopier>) -> Self {
        Self {
            config: VmConfig::default(),
            mapper,
            copier,
        }
    }

    /// Create a manager with a custom configuration
    pub fn with_config(
        config: VmConfig,
        mapper: Arc<dyn FrameMapper>,
        copier: Arc<dyn FrameCopier>,
    ) -> VmResult<Self> {
        config.validate()?;
        info!(
            page_size = config.page_size,
            rollback_on_map_failure = config.rollback_on_map_failure,
            "VM manager initialized"
        );
        Ok(Self {
            config,
            mapper,
            copier,
        })
    }

    pub fn config(&self) -> &VmConfig {
        &self.config
    }

    #[inline]
    pub fn page_size(&self) -> Size {
        self.config.page_size
    }

    /// Page-align `size`, returning the aligned size and its page count
    pub(super) fn align(&self, vmaid: AreaId, size: Size) -> VmResult<(Size, Size)> {
        if size == 0 {
            return Err(VmError::InvalidSize { size });
        }
        let aligned =
            page_align(size, self.config.page_size).ok_or_else(|| VmError::AllocationFailed {
                vmaid,
                reason: format!("{} bytes cannot be page aligned", size),
            })?;
        Ok((aligned, pages_in(aligned, self.config.page_size)))
    }
}

impl std::fmt::Debug for VmManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VmManager")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
