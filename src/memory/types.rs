/*!
 * Memory Types
 * Common types for virtual memory area management
 */

use crate::core::errors::{VmError, VmResult};
use crate::core::types::{Address, AreaId, Size};
use serde::{Deserialize, Serialize};

/// Half-open logical byte range `[start, end)` with `end > start`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    start: Address,
    end: Address,
}

impl Region {
    pub fn new(start: Address, end: Address) -> VmResult<Self> {
        if end <= start {
            return Err(VmError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Region of `len` bytes starting at `start`, `None` if empty or overflowing
    pub(crate) fn with_len(start: Address, len: Size) -> Option<Self> {
        if len == 0 {
            return None;
        }
        start.checked_add(len).map(|end| Self { start, end })
    }

    #[inline]
    pub fn start(&self) -> Address {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Address {
        self.end
    }

    #[inline]
    pub fn len(&self) -> Size {
        self.end - self.start
    }

    /// Never true for a constructed region; kept for slice-like API parity
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    /// `[A1, A2)` and `[B1, B2)` overlap iff `A1 < B2 && A2 > B1`
    #[inline]
    pub fn overlaps(&self, start: Address, end: Address) -> bool {
        ranges_overlap(self.start, self.end, start, end)
    }

    /// Whether this region lies entirely inside `[start, end)`
    #[inline]
    pub fn within(&self, start: Address, end: Address) -> bool {
        self.start >= start && self.end <= end
    }

    /// Drop the first `len` bytes, leaving the tail
    pub(crate) fn advance(&mut self, len: Size) {
        self.start += len;
    }
}

/// Half-open overlap test shared by regions and area bounds
#[inline]
pub fn ranges_overlap(a_start: Address, a_end: Address, b_start: Address, b_end: Address) -> bool {
    a_start < b_end && a_end > b_start
}

/// Where a reservation would come from, computed without mutating the area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionPlan {
    /// Carve from the free region at `position` in the free list
    Reuse { position: usize, region: Region },
    /// Carve at the current break and advance it
    Break { region: Region },
}

impl RegionPlan {
    pub fn region(&self) -> Region {
        match self {
            RegionPlan::Reuse { region, .. } | RegionPlan::Break { region } => *region,
        }
    }
}

/// Request handed to the frame mapper after an area has grown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapRequest {
    /// Region reserved for the growth
    pub region: Region,
    /// Area end before the growth; pages at or above it are new
    pub prior_end: Address,
    /// Number of pages introduced by the growth
    pub page_count: Size,
}

/// Result of a successful area growth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthOutcome {
    pub vmaid: AreaId,
    pub region: Region,
    pub old_end: Address,
    pub new_end: Address,
    pub pages: Size,
    /// Range the frame mapper reports as bound
    pub mapped: Region,
}

/// Snapshot of one area's layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaStats {
    pub id: AreaId,
    pub start: Address,
    pub end: Address,
    pub sbrk: Address,
    pub committed_bytes: Size,
    pub free_bytes: Size,
    pub free_regions: usize,
    /// Bytes in `[sbrk, end)`, zero if the break ran past the end
    pub gap_bytes: Size,
}

impl AreaStats {
    pub fn extent(&self) -> Size {
        self.end - self.start
    }

    /// committed + free + gap == end - start
    pub fn is_balanced(&self) -> bool {
        self.sbrk <= self.end
            && self.committed_bytes + self.free_bytes + self.gap_bytes == self.extent()
    }
}
