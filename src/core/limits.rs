/*!
 * Paging Limits and Constants
 *
 * Page geometry of the simulated paging subsystem and the helpers
 * that align sizes to it.
 */

use super::types::Size;

// =============================================================================
// PAGE GEOMETRY
// =============================================================================

/// Default page size (256 bytes)
/// Matches the page granularity of the simulated MMU
pub const DEFAULT_PAGE_SIZE: Size = 256;

/// Largest page size a configuration may select (1MB)
pub const MAX_PAGE_SIZE: Size = 1024 * 1024;

/// Environment variable overriding the page size
pub const PAGE_SIZE_ENV: &str = "VM_PAGE_SIZE";

/// Environment variable toggling rollback of growth when frame mapping fails
pub const ROLLBACK_ENV: &str = "VM_ROLLBACK_ON_MAP_FAILURE";

/// Round `size` up to the next multiple of `page_size`.
///
/// Returns `None` if the aligned size does not fit in a `Size`.
/// `page_size` must be a power of two.
#[inline]
pub fn page_align(size: Size, page_size: Size) -> Option<Size> {
    let mask = page_size - 1;
    size.checked_add(mask).map(|s| s & !mask)
}

/// Number of pages covered by an already aligned size
#[inline]
pub fn pages_in(aligned: Size, page_size: Size) -> Size {
    aligned / page_size
}
