/*!
 * Virtual Memory Configuration
 *
 * Page geometry and growth policy, loaded from defaults or the environment.
 */

use super::errors::{VmError, VmResult};
use super::limits::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PAGE_SIZE_ENV, ROLLBACK_ENV};
use super::types::Size;
use serde::{Deserialize, Serialize};

/// Configuration for a [`crate::memory::VmManager`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmConfig {
    /// Page granularity growth requests are aligned to (default: 256 bytes)
    pub page_size: Size,

    /// Undo a growth whose frame mapping failed (default: true)
    pub rollback_on_map_failure: bool,
}

impl VmConfig {
    /// Create default configuration
    pub fn new() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            rollback_on_map_failure: true,
        }
    }

    pub fn with_page_size(mut self, page_size: Size) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_rollback_on_map_failure(mut self, rollback: bool) -> Self {
        self.rollback_on_map_failure = rollback;
        self
    }

    /// Load configuration from the environment, falling back to defaults
    ///
    /// Environment variables:
    /// - VM_PAGE_SIZE: page size in bytes (default: 256)
    /// - VM_ROLLBACK_ON_MAP_FAILURE: "1"/"true" or "0"/"false" (default: true)
    pub fn from_env() -> VmResult<Self> {
        let mut config = Self::new();

        if let Ok(raw) = std::env::var(PAGE_SIZE_ENV) {
            config.page_size = raw.trim().parse().map_err(|_| {
                VmError::InvalidConfig(format!("{}={:?} is not a size", PAGE_SIZE_ENV, raw))
            })?;
        }

        if let Ok(raw) = std::env::var(ROLLBACK_ENV) {
            config.rollback_on_map_failure = match raw.trim() {
                "1" | "true" => true,
                "0" | "false" => false,
                other => {
                    return Err(VmError::InvalidConfig(format!(
                        "{}={:?} is not a boolean",
                        ROLLBACK_ENV, other
                    )))
                }
            };
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the page size is a usable power of two
    pub fn validate(&self) -> VmResult<()> {
        if !self.page_size.is_power_of_two() {
            return Err(VmError::InvalidConfig(format!(
                "page size {} is not a power of two",
                self.page_size
            )));
        }
        if self.page_size > MAX_PAGE_SIZE {
            return Err(VmError::InvalidConfig(format!(
                "page size {} exceeds maximum {}",
                self.page_size, MAX_PAGE_SIZE
            )));
        }
        Ok(())
    }
}

impl Default for VmConfig {
    fn default() -> Self {
        Self::new()
    }
}
