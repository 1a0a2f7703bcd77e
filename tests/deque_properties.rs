//! Randomized deque workloads checked against `std::collections::VecDeque`,
//! plus parameterized round-trips at the chunk and table boundaries.

use std::collections::VecDeque;

use chunked_deque::ChunkedDeque;
use proptest::prelude::*;
use rstest::rstest;

/// One step of a deque workload. Raw indices are reduced modulo the live
/// length when applied, so every generated step is valid.
#[derive(Clone, Debug)]
enum Op {
    PushBack(i32),
    PushFront(i32),
    PopBack,
    PopFront,
    Insert(usize, i32),
    Remove(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<i32>().prop_map(Op::PushBack),
        any::<i32>().prop_map(Op::PushFront),
        Just(Op::PopBack),
        Just(Op::PopFront),
        (any::<usize>(), any::<i32>()).prop_map(|(index, value)| Op::Insert(index, value)),
        any::<usize>().prop_map(Op::Remove),
    ]
}

fn apply(op: &Op, deque: &mut ChunkedDeque<i32>, model: &mut VecDeque<i32>) {
    match *op {
        Op::PushBack(value) => {
            deque.push_back(value);
            model.push_back(value);
        }
        Op::PushFront(value) => {
            deque.push_front(value);
            model.push_front(value);
        }
        Op::PopBack => assert_eq!(deque.pop_back(), model.pop_back()),
        Op::PopFront => assert_eq!(deque.pop_front(), model.pop_front()),
        Op::Insert(raw, value) => {
            let index = raw % (model.len() + 1);
            deque.insert(index, value);
            model.insert(index, value);
        }
        Op::Remove(raw) => {
            // `index == len` exercises the out-of-range path on both sides.
            let index = raw % (model.len() + 1);
            assert_eq!(deque.remove(index), model.remove(index));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Any interleaving of pushes, pops, inserts and removals leaves the
    /// deque element-for-element equal to the reference `VecDeque`.
    #[test]
    fn test_workload_matches_vecdeque(ops in prop::collection::vec(op_strategy(), 1..400)) {
        let mut deque = ChunkedDeque::new();
        let mut model = VecDeque::new();
        for op in &ops {
            apply(op, &mut deque, &mut model);
            prop_assert_eq!(deque.len(), model.len());
        }
        prop_assert!(deque.iter().eq(model.iter()));
    }

    /// `deque[i]` agrees with the source vector for every probe.
    #[test]
    fn test_indexing_matches_source(
        values in prop::collection::vec(any::<i32>(), 1..3000),
        probe in any::<usize>()
    ) {
        let deque: ChunkedDeque<i32> = values.iter().copied().collect();
        let index = probe % values.len();
        prop_assert_eq!(deque[index], values[index]);
        prop_assert_eq!(deque.iter().nth(index), deque.get(index));
        prop_assert_eq!(deque.get(values.len()), None);
    }

    /// The iterator yields the elements in order, in both directions, and
    /// reports the exact remaining length.
    #[test]
    fn test_iteration_agrees_with_contents(
        values in prop::collection::vec(any::<i64>(), 0..2500)
    ) {
        let deque: ChunkedDeque<i64> = values.iter().copied().collect();
        prop_assert_eq!(deque.iter().len(), deque.len());
        let forward: Vec<i64> = deque.iter().copied().collect();
        let mut backward: Vec<i64> = deque.iter().rev().copied().collect();
        backward.reverse();
        prop_assert_eq!(&forward, &values);
        prop_assert_eq!(&backward, &values);
    }

    /// A clone is equal to its source and shares its table geometry.
    #[test]
    fn test_clone_preserves_contents(ops in prop::collection::vec(op_strategy(), 1..200)) {
        let mut deque = ChunkedDeque::new();
        let mut model = VecDeque::new();
        for op in &ops {
            apply(op, &mut deque, &mut model);
        }
        let copied = deque.clone();
        prop_assert_eq!(copied.len(), deque.len());
        prop_assert_eq!(copied.capacity(), deque.capacity());
        prop_assert_eq!(&copied, &deque);
    }

    /// Inserting then removing at the same index is the identity.
    #[test]
    fn test_insert_remove_round_trip(
        values in prop::collection::vec(any::<i32>(), 1..2000),
        at in any::<usize>(),
        extra in any::<i32>()
    ) {
        let original: ChunkedDeque<i32> = values.iter().copied().collect();
        let mut deque = original.clone();
        let index = at % (values.len() + 1);
        deque.insert(index, extra);
        prop_assert_eq!(deque.len(), values.len() + 1);
        prop_assert_eq!(deque[index], extra);
        prop_assert_eq!(deque.remove(index), Some(extra));
        prop_assert_eq!(&deque, &original);
    }

    /// `truncate` agrees with the reference `VecDeque` for any cut point.
    #[test]
    fn test_truncate_matches_vecdeque(
        values in prop::collection::vec(any::<i32>(), 0..3000),
        cut in any::<usize>()
    ) {
        let mut deque: ChunkedDeque<i32> = values.iter().copied().collect();
        let mut model: VecDeque<i32> = values.iter().copied().collect();
        let new_len = cut % (values.len() + 1);
        deque.truncate(new_len);
        model.truncate(new_len);
        prop_assert_eq!(deque.len(), model.len());
        prop_assert!(deque.iter().eq(model.iter()));
    }

    /// The reserve is always whole chunks and never below the two-chunk
    /// floor, whatever the workload.
    #[test]
    fn test_capacity_stays_chunk_aligned(ops in prop::collection::vec(op_strategy(), 1..300)) {
        let chunk = ChunkedDeque::<i32>::CHUNK_SIZE;
        let mut deque = ChunkedDeque::new();
        let mut model = VecDeque::new();
        for op in &ops {
            apply(op, &mut deque, &mut model);
            prop_assert_eq!(deque.capacity() % chunk, 0);
            prop_assert!(deque.capacity() >= 2 * chunk);
        }
    }
}

// Sizes straddling one chunk, the two-chunk starting table, and a grown
// table.

#[rstest]
#[case(1)]
#[case(1023)]
#[case(1024)]
#[case(1025)]
#[case(2048)]
#[case(5000)]
fn test_boundary_size_back_fill_front_drain(#[case] n: usize) {
    let mut deque: ChunkedDeque<usize> = (0..n).collect();
    assert_eq!(deque.len(), n);
    for i in 0..n {
        assert_eq!(deque[i], i);
    }
    for i in 0..n {
        assert_eq!(deque.pop_front(), Some(i));
    }
    assert_eq!(deque.pop_front(), None);
}

#[rstest]
#[case(1023)]
#[case(1024)]
#[case(1025)]
#[case(4096)]
fn test_boundary_size_front_fill(#[case] n: usize) {
    let mut deque: ChunkedDeque<usize> = ChunkedDeque::new();
    for i in 0..n {
        deque.push_front(i);
    }
    assert_eq!(deque.len(), n);
    assert_eq!(deque.front(), Some(&(n - 1)));
    assert_eq!(deque.back(), Some(&0));
    for i in (0..n).rev() {
        assert_eq!(deque.pop_front(), Some(i));
    }
    assert!(deque.is_empty());
}

#[rstest]
#[case(0, 2048)]
#[case(1, 2048)]
#[case(1024, 2048)]
#[case(1025, 3072)]
#[case(5000, 6144)]
fn test_with_capacity_table_sizing(#[case] requested: usize, #[case] expected: usize) {
    let deque: ChunkedDeque<u8> = ChunkedDeque::with_capacity(requested);
    assert!(deque.is_empty());
    assert_eq!(deque.capacity(), expected);
}
