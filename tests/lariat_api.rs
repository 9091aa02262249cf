//! Tests for the public container API: positional mutation, boundary
//! accessors, compaction, copying, and error reporting.

use lariat::{Error, Lariat};

// =============================================================================
// Helper functions
// =============================================================================

fn build<const N: usize>(values: &[i32]) -> Lariat<i32, N> {
    let mut lariat = Lariat::new();
    for &v in values {
        lariat.push_back(v).unwrap();
    }
    return lariat;
}

fn contents<const N: usize>(lariat: &Lariat<i32, N>) -> Vec<i32> {
    return lariat.iter().copied().collect();
}

fn block_layout<const N: usize>(lariat: &Lariat<i32, N>) -> Vec<Vec<i32>> {
    return lariat.blocks().map(|b| b.to_vec()).collect();
}

// =============================================================================
// Round trip and ordering
// =============================================================================

#[test]
fn round_trip_push_back() {
    let values: Vec<i32> = (0..50).collect();
    let lariat: Lariat<i32, 4> = build(&values);

    assert_eq!(lariat.len(), 50);
    for (i, &v) in values.iter().enumerate() {
        assert_eq!(*lariat.at(i).unwrap(), v);
    }
}

#[test]
fn split_on_fifth_push() {
    let lariat: Lariat<i32, 4> = build(&[1, 2, 3, 4, 5]);

    assert_eq!(lariat.len(), 5);
    assert_eq!(lariat.node_count(), 2);
    assert_eq!(contents(&lariat), vec![1, 2, 3, 4, 5]);

    let counts: Vec<usize> = lariat.blocks().map(|b| b.len()).collect();
    assert_eq!(counts.iter().sum::<usize>(), 5);
    assert!(counts.iter().all(|&c| c <= 4 && c > 0));
}

#[test]
fn push_front_reverses() {
    let mut lariat: Lariat<i32, 4> = Lariat::new();
    for v in 0..10 {
        lariat.push_front(v).unwrap();
    }

    assert_eq!(contents(&lariat), (0..10).rev().collect::<Vec<_>>());
}

#[test]
fn insert_at_every_position() {
    let mut lariat: Lariat<i32, 3> = Lariat::new();
    let mut model: Vec<i32> = Vec::new();

    for v in 0..30 {
        let pos = (v as usize * 7) % (model.len() + 1);
        lariat.insert(pos, v).unwrap();
        model.insert(pos, v);
        assert_eq!(contents(&lariat), model);
    }
}

// =============================================================================
// Removal
// =============================================================================

#[test]
fn remove_interior_element() {
    let mut lariat: Lariat<i32, 4> = build(&[1, 2, 3, 4, 5]);

    assert_eq!(lariat.remove(2).unwrap(), 3);
    assert_eq!(contents(&lariat), vec![1, 2, 4, 5]);
    assert_eq!(lariat.len(), 4);
}

#[test]
fn pop_both_ends() {
    let mut lariat: Lariat<i32, 4> = build(&[1, 2, 3, 4, 5]);

    assert_eq!(lariat.pop_front().unwrap(), 1);
    assert_eq!(lariat.pop_back().unwrap(), 5);
    assert_eq!(contents(&lariat), vec![2, 3, 4]);
}

#[test]
fn drain_to_empty_and_reuse() {
    let mut lariat: Lariat<i32, 2> = build(&[1, 2, 3, 4, 5]);
    while !lariat.is_empty() {
        lariat.pop_front().unwrap();
    }

    assert_eq!(lariat.node_count(), 0);
    assert_eq!(lariat.pop_front(), Err(Error::Empty));

    lariat.push_back(7).unwrap();
    assert_eq!(contents(&lariat), vec![7]);
}

#[test]
fn remove_every_element_by_index() {
    let mut lariat: Lariat<i32, 3> = build(&(0..20).collect::<Vec<_>>());
    let mut model: Vec<i32> = (0..20).collect();

    while !model.is_empty() {
        let pos = model.len() / 2;
        assert_eq!(lariat.remove(pos).unwrap(), model.remove(pos));
        assert_eq!(contents(&lariat), model);
    }
    assert!(lariat.is_empty());
}

// =============================================================================
// Compaction
// =============================================================================

#[test]
fn compact_minimizes_nodes() {
    let mut lariat: Lariat<i32, 4> = build(&(1..=9).collect::<Vec<_>>());
    assert_eq!(lariat.node_count(), 3);

    lariat.compact();

    assert_eq!(contents(&lariat), (1..=9).collect::<Vec<_>>());
    assert_eq!(lariat.len(), 9);
    assert_eq!(lariat.node_count(), 3);

    let counts: Vec<usize> = lariat.blocks().map(|b| b.len()).collect();
    assert_eq!(counts, vec![4, 4, 1]);
}

#[test]
fn compact_is_idempotent() {
    let mut lariat: Lariat<i32, 4> = build(&(0..23).collect::<Vec<_>>());
    for i in [17, 3, 11, 0, 7] {
        lariat.remove(i).unwrap();
    }

    lariat.compact();
    let once = block_layout(&lariat);
    lariat.compact();
    assert_eq!(block_layout(&lariat), once);
}

#[test]
fn compact_empty_and_single() {
    let mut empty: Lariat<i32, 4> = Lariat::new();
    empty.compact();
    assert!(empty.is_empty());

    let mut single: Lariat<i32, 4> = build(&[1]);
    single.compact();
    assert_eq!(contents(&single), vec![1]);
    assert_eq!(single.node_count(), 1);
}

// =============================================================================
// Access and search
// =============================================================================

#[test]
fn first_and_last() {
    let mut lariat: Lariat<i32, 4> = build(&(1..=9).collect::<Vec<_>>());

    assert_eq!(*lariat.first().unwrap(), 1);
    assert_eq!(*lariat.last().unwrap(), 9);

    *lariat.first_mut().unwrap() = 100;
    *lariat.last_mut().unwrap() = 200;
    assert_eq!(contents(&lariat), vec![100, 2, 3, 4, 5, 6, 7, 8, 200]);
}

#[test]
fn find_present_and_absent() {
    let lariat: Lariat<i32, 4> = build(&(1..=9).collect::<Vec<_>>());

    assert_eq!(lariat.find(&7), 6);
    assert_eq!(lariat.find(&1), 0);
    assert_eq!(lariat.find(&9), 8);
    assert_eq!(lariat.find(&42), 9);
}

#[test]
fn at_mut_writes_through() {
    let mut lariat: Lariat<i32, 4> = build(&[1, 2, 3, 4, 5]);
    *lariat.at_mut(3).unwrap() = 40;
    assert_eq!(contents(&lariat), vec![1, 2, 3, 40, 5]);
}

#[test]
fn index_operator() {
    let mut lariat: Lariat<i32, 4> = build(&[1, 2, 3]);
    assert_eq!(lariat[1], 2);
    lariat[1] = 20;
    assert_eq!(lariat[1], 20);
}

#[test]
#[should_panic(expected = "out of range")]
fn index_operator_panics_out_of_range() {
    let lariat: Lariat<i32, 4> = build(&[1, 2, 3]);
    let _ = lariat[3];
}

// =============================================================================
// Error reporting
// =============================================================================

#[test]
fn empty_container_errors() {
    let mut lariat: Lariat<i32, 4> = Lariat::new();

    assert_eq!(lariat.pop_front(), Err(Error::Empty));
    assert_eq!(lariat.pop_back(), Err(Error::Empty));
    assert_eq!(lariat.remove(0), Err(Error::Empty));
    assert_eq!(lariat.first(), Err(Error::Empty));
    assert_eq!(lariat.last(), Err(Error::Empty));
}

#[test]
fn bad_index_errors() {
    let mut lariat: Lariat<i32, 4> = build(&[1, 2, 3]);

    assert_eq!(lariat.at(3), Err(Error::BadIndex { index: 3, len: 3 }));
    assert_eq!(lariat.remove(3), Err(Error::BadIndex { index: 3, len: 3 }));
    assert_eq!(lariat.insert(4, 0), Err(Error::BadIndex { index: 4, len: 3 }));

    // An insert at index == len is valid (append).
    lariat.insert(3, 4).unwrap();
    assert_eq!(contents(&lariat), vec![1, 2, 3, 4]);
}

#[test]
fn failed_op_leaves_container_unchanged() {
    let mut lariat: Lariat<i32, 4> = build(&[1, 2, 3]);
    let before = block_layout(&lariat);

    assert!(lariat.insert(10, 0).is_err());
    assert!(lariat.remove(5).is_err());
    assert_eq!(block_layout(&lariat), before);
    assert_eq!(lariat.len(), 3);
}

#[test]
fn error_messages() {
    assert_eq!(Error::Empty.to_string(), "container is empty");
    assert_eq!(
        Error::BadIndex { index: 7, len: 3 }.to_string(),
        "index 7 out of range (len 3)"
    );
    assert_eq!(Error::OutOfMemory.to_string(), "unable to allocate a new node");
}

// =============================================================================
// Copying and comparison
// =============================================================================

#[test]
fn clone_is_deep() {
    let original: Lariat<i32, 4> = build(&(0..10).collect::<Vec<_>>());
    let mut copy = original.clone();

    copy.push_back(99).unwrap();
    assert_eq!(original.len(), 10);
    assert_eq!(copy.len(), 11);
    assert_eq!(contents(&original), (0..10).collect::<Vec<_>>());
}

#[test]
fn clone_from_replaces_contents() {
    let source: Lariat<i32, 4> = build(&[1, 2, 3]);
    let mut dest: Lariat<i32, 4> = build(&(0..20).collect::<Vec<_>>());

    dest.clone_from(&source);
    assert_eq!(contents(&dest), vec![1, 2, 3]);
}

#[test]
fn cross_capacity_copy() {
    let wide: Lariat<i32, 8> = build(&(0..17).collect::<Vec<_>>());

    let narrow: Lariat<i32, 2> = Lariat::from_other(&wide).unwrap();
    assert_eq!(contents(&narrow), (0..17).collect::<Vec<_>>());
    assert_eq!(narrow, wide);

    let mut back: Lariat<i32, 8> = Lariat::new();
    back.copy_from(&narrow).unwrap();
    assert_eq!(back, wide);
}

#[test]
fn equality_ignores_node_geometry() {
    let a: Lariat<i32, 3> = build(&[1, 2, 3, 4, 5]);
    let mut b: Lariat<i32, 3> = build(&[1, 2, 3, 4, 5]);
    b.compact();

    assert_eq!(a, b);
    assert_eq!(a, [1, 2, 3, 4, 5]);
    assert_eq!(a, *[1, 2, 3, 4, 5].as_slice());
    assert_ne!(a, [1, 2, 3, 4]);
}

// =============================================================================
// Iteration and dump
// =============================================================================

#[test]
fn owned_iterator_drains_in_order() {
    let lariat: Lariat<i32, 4> = build(&(0..9).collect::<Vec<_>>());

    let drained: Vec<i32> = lariat.into_iter().collect();
    assert_eq!(drained, (0..9).collect::<Vec<_>>());
}

#[test]
fn iterator_size_hint_is_exact() {
    let lariat: Lariat<i32, 4> = build(&(0..9).collect::<Vec<_>>());

    let mut iter = lariat.iter();
    assert_eq!(iter.size_hint(), (9, Some(9)));
    iter.next();
    assert_eq!(iter.size_hint(), (8, Some(8)));
}

#[test]
fn display_dump_lists_nodes_and_indices() {
    let lariat: Lariat<i32, 4> = build(&[1, 2, 3, 4, 5]);
    let dump = lariat.to_string();

    assert!(dump.contains("Node starting (count 3)"));
    assert!(dump.contains("Node starting (count 2)"));
    assert!(dump.contains("0 -> 1"));
    assert!(dump.contains("4 -> 5"));
}

#[test]
fn debug_shows_block_structure() {
    let lariat: Lariat<i32, 4> = build(&[1, 2, 3, 4, 5]);
    assert_eq!(format!("{:?}", lariat), "Lariat [[1, 2, 3], [4, 5]]");
}
