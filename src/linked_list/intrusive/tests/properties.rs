extern crate std;

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use proptest::prelude::*;

use crate::linked_list::intrusive::{
    list::{NodeHandle, SingleList},
    methods::Methods,
};

#[derive(Debug, Clone)]
enum Op {
    InsertFirst(i32),
    InsertLast(i32),
    InsertAfter(usize, i32),
    InsertBefore(usize, i32),
    RemoveFirst,
    RemoveLast,
    Delete(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<i32>().prop_map(Op::InsertFirst),
        any::<i32>().prop_map(Op::InsertLast),
        (any::<usize>(), any::<i32>()).prop_map(|(i, v)| Op::InsertAfter(i, v)),
        (any::<usize>(), any::<i32>()).prop_map(|(i, v)| Op::InsertBefore(i, v)),
        Just(Op::RemoveFirst),
        Just(Op::RemoveLast),
        any::<usize>().prop_map(Op::Delete),
    ]
}

/// Picks an anchor out of the model, `None` when the model is empty.
fn anchor(model: &VecDeque<(i32, NodeHandle<i32>)>, index: usize) -> Option<(usize, NodeHandle<i32>)> {
    if model.is_empty() {
        return None;
    }
    let index = index % model.len();
    Some((index, model[index].1))
}

proptest! {
    #[test]
    fn list_matches_model(ops in proptest::collection::vec(op(), 0..64)) {
        let mut list = SingleList::<i32>::default();
        let mut model: VecDeque<(i32, NodeHandle<i32>)> = VecDeque::new();
        let mut inserts = 0usize;
        let mut removes = 0usize;

        for op in ops {
            match op {
                Op::InsertFirst(v) => {
                    model.push_front((v, list.insert_first(v).unwrap()));
                    inserts += 1;
                }
                Op::InsertLast(v) => {
                    model.push_back((v, list.insert_last(v).unwrap()));
                    inserts += 1;
                }
                Op::InsertAfter(i, v) => {
                    match anchor(&model, i) {
                        Some((index, handle)) => {
                            let new = list.insert_after(Some(&handle), v).unwrap();
                            model.insert(index + 1, (v, new));
                        }
                        None => model.push_back((v, list.insert_after(None, v).unwrap())),
                    }
                    inserts += 1;
                }
                Op::InsertBefore(i, v) => {
                    match anchor(&model, i) {
                        Some((index, handle)) => {
                            let new = list.insert_before(Some(&handle), v).unwrap();
                            model.insert(index, (v, new));
                        }
                        None => model.push_front((v, list.insert_before(None, v).unwrap())),
                    }
                    inserts += 1;
                }
                Op::RemoveFirst => {
                    let expected = model.pop_front().map(|(v, _)| v);
                    prop_assert_eq!(list.remove_first(), expected);
                    removes += usize::from(expected.is_some());
                }
                Op::RemoveLast => {
                    let expected = model.pop_back().map(|(v, _)| v);
                    prop_assert_eq!(list.remove_last(), expected);
                    removes += usize::from(expected.is_some());
                }
                Op::Delete(i) => {
                    if let Some((index, handle)) = anchor(&model, i) {
                        let (expected, _) = model.remove(index).unwrap();
                        prop_assert_eq!(list.delete_node(&handle), Ok(expected));
                        removes += 1;
                    }
                }
            }

            list.assert_invariants();
            prop_assert_eq!(list.len(), inserts - removes);
            prop_assert_eq!(list.is_empty(), list.head().is_none());
            prop_assert_eq!(list.is_empty(), list.tail().is_none());
        }

        let values: Vec<i32> = list.iter().copied().collect();
        let expected: Vec<i32> = model.iter().map(|(v, _)| *v).collect();
        prop_assert_eq!(values, expected);
        for (value, handle) in &model {
            prop_assert_eq!(list.get(handle), Ok(value));
        }
    }

    #[test]
    fn destroy_releases_every_survivor(values in proptest::collection::vec(any::<i32>(), 0..32)) {
        let released = Rc::new(Cell::new(0usize));
        let counter = Rc::clone(&released);
        let mut slot = Some(SingleList::new(
            Methods::new().with_destroy(move |_: i32| counter.set(counter.get() + 1)),
        ));

        if let Some(list) = slot.as_mut() {
            prop_assert_eq!(list.load(values.iter().copied()), Ok(values.len()));
        }
        prop_assert_eq!(SingleList::destroy(&mut slot), Ok(values.len()));
        prop_assert_eq!(released.get(), values.len());
        prop_assert!(slot.is_none());
    }
}
