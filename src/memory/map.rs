/*!
 * Memory Map
 *
 * Ownership root for the areas of one process. Areas keep their insertion
 * order; lookup goes through an exact id -> index map so ids need not be
 * sorted or contiguous.
 */

use super::area::VmArea;
use super::types::{ranges_overlap, AreaStats};
use crate::core::errors::{VmError, VmResult};
use crate::core::types::{Address, AreaId};
use ahash::RandomState;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct MemoryMap {
    areas: Vec<VmArea>,
    index: HashMap<AreaId, usize, RandomState>,
}

impl MemoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an area; ids are unique and extents may not collide
    pub fn add_area(&mut self, area: VmArea) -> VmResult<()> {
        if self.index.contains_key(&area.id()) {
            return Err(VmError::DuplicateArea(area.id()));
        }
        if area.end() > area.start() {
            self.validate_no_overlap(area.id(), area.start(), area.end())?;
        }

        self.index.insert(area.id(), self.areas.len());
        self.areas.push(area);
        Ok(())
    }

    /// Exact-match lookup by area id
    pub fn find_area(&self, vmaid: AreaId) -> VmResult<&VmArea> {
        self.index
            .get(&vmaid)
            .map(|&i| &self.areas[i])
            .ok_or(VmError::NotFound { vmaid })
    }

    pub fn find_area_mut(&mut self, vmaid: AreaId) -> VmResult<&mut VmArea> {
        match self.index.get(&vmaid) {
            Some(&i) => Ok(&mut self.areas[i]),
            None => Err(VmError::NotFound { vmaid }),
        }
    }

    /// Replace the stored area with the same id
    pub(crate) fn replace_area(&mut self, area: VmArea) -> VmResult<()> {
        let slot = self.find_area_mut(area.id())?;
        *slot = area;
        Ok(())
    }

    /// Check `[start, end)` against the committed bounds of every area except `vmaid`
    ///
    /// The area being grown may overlap its own extent.
    pub fn validate_no_overlap(&self, vmaid: AreaId, start: Address, end: Address) -> VmResult<()> {
        match self
            .areas
            .iter()
            .filter(|area| area.id() != vmaid)
            .find(|area| ranges_overlap(start, end, area.start(), area.end()))
        {
            Some(sibling) => Err(VmError::Overlap {
                vmaid,
                sibling: sibling.id(),
                start,
                end,
            }),
            None => Ok(()),
        }
    }

    /// Areas in insertion order
    pub fn areas(&self) -> impl Iterator<Item = &VmArea> {
        self.areas.iter()
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    pub fn stats(&self) -> Vec<AreaStats> {
        self.areas.iter().map(VmArea::stats).collect()
    }
}
