/*!
 * Area Growth Tests
 * End-to-end growth through the manager with recording collaborators
 */

use crate::support::{fixture, fixture_with, process, region, RecordingMapper};
use paging_vm::{MapRequest, VmError};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::thread;

#[test]
fn test_growth_maps_new_pages() {
    let fx = fixture();
    let caller = process(&[(0, 0, 0), (1, 4096, 4096)]);

    let first = fx.vm.grow_area(&caller, 0, 100).unwrap();
    assert_eq!(first.region, region(0, 256));
    assert_eq!((first.old_end, first.new_end, first.pages), (0, 256, 1));

    let second = fx.vm.grow_area(&caller, 0, 1000).unwrap();
    assert_eq!(second.region, region(256, 1280));
    assert_eq!(second.pages, 4);

    assert_eq!(
        fx.mapper.requests(),
        vec![
            MapRequest {
                region: region(0, 256),
                prior_end: 0,
                page_count: 1
            },
            MapRequest {
                region: region(256, 1280),
                prior_end: 256,
                page_count: 4
            },
        ]
    );
}

#[test]
fn test_failed_growth_changes_nothing() {
    let fx = fixture();
    let caller = process(&[(0, 0, 0), (1, 4096, 4096)]);
    fx.vm.grow_area(&caller, 0, 1024).unwrap();
    let before = fx.vm.stats(&caller);

    let err = fx.vm.grow_area(&caller, 0, 3500).unwrap_err();
    assert!(matches!(err, VmError::Overlap { vmaid: 0, sibling: 1, .. }));

    assert_eq!(fx.vm.stats(&caller), before);
    assert_eq!(fx.mapper.requests().len(), 1);
}

#[test]
fn test_sibling_can_grow_up_to_neighbour() {
    let fx = fixture();
    let caller = process(&[(0, 0, 0), (1, 1024, 1024)]);

    fx.vm.grow_area(&caller, 0, 1024).unwrap();
    let stack = fx.vm.grow_area(&caller, 1, 256).unwrap();
    assert_eq!(stack.region, region(1024, 1280));

    assert!(fx.vm.grow_area(&caller, 0, 1).is_err());
}

#[test]
fn test_growth_reuses_released_region() {
    let fx = fixture();
    let caller = process(&[(0, 0, 0)]);

    let first = fx.vm.grow_area(&caller, 0, 512).unwrap();
    fx.vm.release_region(&caller, 0, first.region).unwrap();

    let reused = fx.vm.grow_area(&caller, 0, 256).unwrap();
    assert_eq!(reused.region, region(0, 256));
    assert_eq!(reused.new_end, 768);

    let area = fx.vm.find_area(&caller, 0).unwrap();
    assert_eq!(area.sbrk, 512);
    assert_eq!(area.free_bytes, 256);
    assert_eq!(area.gap_bytes, 256);
    assert_eq!(area.committed_bytes, 256);
    assert!(area.is_balanced());
}

#[test]
fn test_double_release_cannot_hand_out_region_twice() {
    let fx = fixture();
    let caller = process(&[(0, 0, 0)]);

    let grown = fx.vm.grow_area(&caller, 0, 256).unwrap();
    fx.vm.release_region(&caller, 0, grown.region).unwrap();
    assert!(matches!(
        fx.vm.release_region(&caller, 0, grown.region),
        Err(VmError::AlreadyFree { vmaid: 0, .. })
    ));

    let a = fx.vm.grow_area(&caller, 0, 256).unwrap();
    let b = fx.vm.grow_area(&caller, 0, 256).unwrap();
    assert_ne!(a.region, b.region);
    assert!(!a.region.overlaps(b.region.start(), b.region.end()));

    let area = fx.vm.find_area(&caller, 0).unwrap();
    assert_eq!(area.committed_bytes, 512);
    assert!(area.is_balanced());
}

#[test]
fn test_mapping_failure_is_rolled_back() {
    let fx = fixture_with(RecordingMapper::failing());
    let caller = process(&[(0, 0, 0)]);
    let before = fx.vm.stats(&caller);

    let err = fx.vm.grow_area(&caller, 0, 10).unwrap_err();
    assert!(matches!(err, VmError::Failed { .. }));
    assert_eq!(fx.vm.stats(&caller), before);
}

#[test]
fn test_concurrent_growth_on_one_map() {
    let fx = fixture();
    let caller = Arc::new(process(&[(0, 0, 0), (1, 1 << 20, 1 << 20)]));

    let handles: Vec<_> = (0..8u32)
        .map(|t| {
            let vm = fx.vm.clone();
            let caller = Arc::clone(&caller);
            thread::spawn(move || {
                (0..50)
                    .map(|_| vm.grow_area(&caller, t % 2, 200).unwrap().region)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut regions: Vec<_> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    regions.sort_by_key(|r| r.start());

    for pair in regions.windows(2) {
        assert!(pair[0].end() <= pair[1].start(), "{:?} overlaps {:?}", pair[0], pair[1]);
    }

    let heap = fx.vm.find_area(&caller, 0).unwrap();
    let stack = fx.vm.find_area(&caller, 1).unwrap();
    assert_eq!(heap.end, 4 * 50 * 256);
    assert_eq!(stack.end, (1 << 20) + 4 * 50 * 256);
    assert_eq!(fx.mapper.requests().len(), 400);
}
