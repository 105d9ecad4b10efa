extern crate std;

use mola_slist_derive::Node;

use crate::linked_list::intrusive::{
    single::{SingleLink, SingleNode},
    traits::{Link, Node, NodeWithData, Tagged},
};

#[derive(Node)]
#[node(crate_path = "crate")]
#[repr(align(16), C)]
struct AlignedNode {
    link: SingleLink,
    data: u32,
}

#[test]
fn test_create_leaves_node_detached_and_unowned() {
    let node = SingleNode::create(42, 7).unwrap();
    unsafe {
        let node_ref = node.as_ref();
        assert_eq!(*node_ref.data(), 42);
        assert!(node_ref.next().is_none());
        assert!(node_ref.tag().owner().is_none());
        assert_eq!(node_ref.tag().serial(), 7);
        assert_eq!(SingleNode::destroy(node), 42);
    }
}

#[test]
fn test_destroy_hands_back_owned_data() {
    let node = SingleNode::create(std::string::String::from("moby dick"), 0).unwrap();
    let data = unsafe { SingleNode::destroy(node) };
    assert_eq!(data, "moby dick");
}

#[test]
fn test_link_after_and_detach() {
    let first = SingleNode::create(1, 0).unwrap();
    let second = SingleNode::create(2, 1).unwrap();
    let third = SingleNode::create(3, 2).unwrap();

    unsafe {
        // 1 -> 3, then 1 -> 2 -> 3
        (*third.as_ptr()).link_after(&mut *first.as_ptr());
        (*second.as_ptr()).link_after(&mut *first.as_ptr());

        assert_eq!(first.as_ref().next(), Some(second));
        assert_eq!(second.as_ref().next(), Some(third));
        assert!(third.as_ref().next().is_none());

        // Remove middle
        (*second.as_ptr()).detach(&mut *first.as_ptr());
        assert_eq!(first.as_ref().next(), Some(third));
        assert!(second.as_ref().next().is_none());

        assert_eq!(SingleNode::destroy(first), 1);
        assert_eq!(SingleNode::destroy(second), 2);
        assert_eq!(SingleNode::destroy(third), 3);
    }
}

#[test]
fn test_data_mut_through_node() {
    let node = SingleNode::create(5, 0).unwrap();
    unsafe {
        *(*node.as_ptr()).data_mut() *= 3;
        assert_eq!(SingleNode::destroy(node), 15);
    }
}

#[test]
fn test_derive_accepts_extra_repr_hints() {
    assert_eq!(core::mem::align_of::<AlignedNode>(), 16);

    let mut first = AlignedNode {
        link: SingleLink::default(),
        data: 1,
    };
    let mut second = AlignedNode {
        link: SingleLink::default(),
        data: 2,
    };
    second.link_after(&mut first);
    assert_eq!(first.next(), Some(core::ptr::NonNull::from(&mut second)));
    assert_eq!(*second.data(), 2);

    unsafe { second.detach(&mut first) };
    assert!(first.next().is_none());
    assert_eq!(first.into_data(), 1);
}
