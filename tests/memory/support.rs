/*!
 * Test Support
 * Recording collaborators and process fixtures shared by the memory tests
 */

#![allow(dead_code)]

use paging_vm::core::types::{AreaId, DeviceId, FrameNumber};
use paging_vm::{
    CallerContext, FrameCopier, FrameMapper, MapRequest, MemoryMap, Process, Region, VmArea,
    VmError, VmManager, VmResult,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Frame mapper that records every request and can be told to fail
#[derive(Default)]
pub struct RecordingMapper {
    pub requests: Mutex<Vec<MapRequest>>,
    pub fail: AtomicBool,
}

impl RecordingMapper {
    pub fn failing() -> Self {
        let mapper = Self::default();
        mapper.fail.store(true, Ordering::SeqCst);
        mapper
    }

    pub fn requests(&self) -> Vec<MapRequest> {
        self.requests.lock().clone()
    }
}

impl FrameMapper for RecordingMapper {
    fn map_logical_range(&self, _caller: &CallerContext, request: &MapRequest) -> VmResult<Region> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(VmError::failed("frame allocation", "out of frames"));
        }
        self.requests.lock().push(*request);
        Ok(request.region)
    }
}

/// Swap copier that records every copy
#[derive(Default)]
pub struct RecordingCopier {
    pub copies: Mutex<Vec<(DeviceId, FrameNumber, DeviceId, FrameNumber)>>,
    pub fail: AtomicBool,
}

impl FrameCopier for RecordingCopier {
    fn copy_frame(
        &self,
        ram: DeviceId,
        victim: FrameNumber,
        swap: DeviceId,
        dest: FrameNumber,
    ) -> VmResult<()> {
        self.copies.lock().push((ram, victim, swap, dest));
        if self.fail.load(Ordering::SeqCst) {
            return Err(VmError::failed("swap copy", "device offline"));
        }
        Ok(())
    }
}

pub struct Fixture {
    pub vm: VmManager,
    pub mapper: Arc<RecordingMapper>,
    pub copier: Arc<RecordingCopier>,
}

pub fn fixture() -> Fixture {
    fixture_with(RecordingMapper::default())
}

pub fn fixture_with(mapper: RecordingMapper) -> Fixture {
    let mapper = Arc::new(mapper);
    let copier = Arc::new(RecordingCopier::default());
    let vm = VmManager::new(mapper.clone(), copier.clone());
    Fixture { vm, mapper, copier }
}

/// Process whose areas are `(id, start, end)` triples
pub fn process(areas: &[(AreaId, usize, usize)]) -> Process {
    let mut mm = MemoryMap::new();
    for &(id, start, end) in areas {
        mm.add_area(VmArea::new(id, start, end).expect("valid area"))
            .expect("disjoint area");
    }
    Process::new(CallerContext::new(1, 0, 1), mm)
}

pub fn region(start: usize, end: usize) -> Region {
    Region::new(start, end).expect("valid region")
}
