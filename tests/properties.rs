//! Property-based tests: every operation is mirrored on a `Vec` model and the
//! link structure is re-checked after each step.

use doubly_linked_sequence::{Direction, Sequence, SequenceError};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Append(i32),
    Prepend(i32),
    Pop,
    PopFirst,
    Insert(usize, i32),
    Remove(usize),
    Set(usize, i32),
    Reverse,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<i32>().prop_map(Op::Append),
        any::<i32>().prop_map(Op::Prepend),
        Just(Op::Pop),
        Just(Op::PopFirst),
        (0usize..12, any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
        (0usize..12).prop_map(Op::Remove),
        (0usize..12, any::<i32>()).prop_map(|(i, v)| Op::Set(i, v)),
        Just(Op::Reverse),
    ]
}

fn seeded(values: &[i32]) -> Sequence<i32> {
    let mut seq = Sequence::new(values[0]);
    seq.extend(&values[1..]);
    seq
}

fn out_of_range(index: usize, len: usize) -> SequenceError {
    SequenceError::OutOfRange { index, len }
}

proptest! {
    /// Any run of operations agrees with a `Vec` and keeps both chains intact.
    #[test]
    fn prop_matches_vec_model(seed in any::<i32>(), ops in prop::collection::vec(op(), 0..60)) {
        let mut seq = Sequence::new(seed);
        let mut model = vec![seed];

        for op in ops {
            match op {
                Op::Append(v) => {
                    seq.append(v);
                    model.push(v);
                }
                Op::Prepend(v) => {
                    seq.prepend(v);
                    model.insert(0, v);
                }
                Op::Pop => {
                    prop_assert_eq!(seq.pop(), model.pop().ok_or(SequenceError::Empty));
                }
                Op::PopFirst => {
                    let expected = if model.is_empty() {
                        Err(SequenceError::Empty)
                    } else {
                        Ok(model.remove(0))
                    };
                    prop_assert_eq!(seq.pop_first(), expected);
                }
                Op::Insert(i, v) => {
                    let len = model.len();
                    let expected = if i <= len {
                        model.insert(i, v);
                        Ok(())
                    } else {
                        Err(out_of_range(i, len))
                    };
                    prop_assert_eq!(seq.insert(i, v), expected);
                }
                Op::Remove(i) => {
                    let len = model.len();
                    let expected = if i < len {
                        Ok(model.remove(i))
                    } else {
                        Err(out_of_range(i, len))
                    };
                    prop_assert_eq!(seq.remove(i), expected);
                }
                Op::Set(i, v) => {
                    let len = model.len();
                    let expected = match model.get_mut(i) {
                        Some(slot) => Ok(std::mem::replace(slot, v)),
                        None => Err(out_of_range(i, len)),
                    };
                    prop_assert_eq!(seq.set_value(i, v), expected);
                }
                Op::Reverse => {
                    seq.reverse();
                    model.reverse();
                }
            }

            prop_assert_eq!(seq.check_invariants(), Ok(()));
            prop_assert_eq!(seq.len(), model.len());
            prop_assert_eq!(seq.is_empty(), seq.head().is_none());
            prop_assert_eq!(seq.is_empty(), seq.tail().is_none());
            prop_assert_eq!(seq.to_vec(), model.clone());
        }
    }

    /// Backward traversal visits the forward chain in reverse.
    #[test]
    fn prop_backward_is_reversed_forward(values in prop::collection::vec(any::<i32>(), 1..40)) {
        let seq = seeded(&values);
        let forward: Vec<i32> = seq.iter().copied().collect();
        let mut backward: Vec<i32> = seq.iter().rev().copied().collect();
        backward.reverse();
        prop_assert_eq!(forward.len(), seq.len());
        prop_assert_eq!(forward, backward);
    }

    /// `append` then `pop` restores the previous state.
    #[test]
    fn prop_append_pop_round_trip(values in prop::collection::vec(any::<i32>(), 1..20), v in any::<i32>()) {
        let mut seq = seeded(&values);
        let before = seq.clone();
        seq.append(v);
        prop_assert_eq!(seq.tail(), Some(&v));
        prop_assert_eq!(seq.pop(), Ok(v));
        prop_assert_eq!(seq.head(), before.head());
        prop_assert_eq!(seq.tail(), before.tail());
        prop_assert_eq!(seq, before);
    }

    /// `prepend` then `pop_first` restores the previous state.
    #[test]
    fn prop_prepend_pop_first_round_trip(values in prop::collection::vec(any::<i32>(), 1..20), v in any::<i32>()) {
        let mut seq = seeded(&values);
        let before = seq.clone();
        seq.prepend(v);
        prop_assert_eq!(seq.head(), Some(&v));
        prop_assert_eq!(seq.pop_first(), Ok(v));
        prop_assert_eq!(seq.head(), before.head());
        prop_assert_eq!(seq.tail(), before.tail());
        prop_assert_eq!(seq, before);
    }

    /// `insert(i, v)` then `remove(i)` leaves the values unchanged.
    #[test]
    fn prop_insert_remove_round_trip(
        values in prop::collection::vec(any::<i32>(), 1..20),
        pick in any::<prop::sample::Index>(),
        v in any::<i32>(),
    ) {
        let mut seq = seeded(&values);
        let i = pick.index(values.len() + 1);
        seq.insert(i, v).unwrap();
        prop_assert_eq!(seq.get(i), Ok(&v));
        prop_assert_eq!(seq.remove(i), Ok(v));
        prop_assert_eq!(seq.to_vec(), values);
        prop_assert_eq!(seq.check_invariants(), Ok(()));
    }

    /// `get(i)` after `set_value(i, v)` returns `v`.
    #[test]
    fn prop_get_after_set(
        values in prop::collection::vec(any::<i32>(), 1..20),
        pick in any::<prop::sample::Index>(),
        v in any::<i32>(),
    ) {
        let mut seq = seeded(&values);
        let i = pick.index(values.len());
        prop_assert_eq!(seq.set_value(i, v), Ok(values[i]));
        prop_assert_eq!(seq.get(i), Ok(&v));
        prop_assert_eq!(seq.len(), values.len());
    }

    /// Lookups start from the closer end and never walk past the middle.
    #[test]
    fn prop_lookup_takes_the_short_way(len in 1usize..50, pick in any::<prop::sample::Index>()) {
        let values: Vec<i32> = (0..len as i32).collect();
        let seq = seeded(&values);
        let index = pick.index(len);
        let walk = seq.walk(index).unwrap();
        prop_assert!(walk.hops <= len / 2);
        let expected = if 2 * index < len { Direction::FromHead } else { Direction::FromTail };
        prop_assert_eq!(walk.direction, expected);
        prop_assert_eq!(seq.get(index), Ok(&(index as i32)));
    }

    /// Reversing twice is the identity.
    #[test]
    fn prop_double_reverse(values in prop::collection::vec(any::<i32>(), 1..30)) {
        let mut seq = seeded(&values);
        seq.reverse();
        let mut reversed = values.clone();
        reversed.reverse();
        prop_assert_eq!(seq.to_vec(), reversed);
        seq.reverse();
        prop_assert_eq!(seq.to_vec(), values);
        prop_assert_eq!(seq.check_invariants(), Ok(()));
    }
}
