use alloc::alloc::{Layout, alloc};
use alloc::boxed::Box;
use core::ptr::NonNull;

use mola_slist_derive::Node;

use super::{
    error::ListError,
    tag::NodeTag,
    traits::{Link, Node, NodeWithData},
};

/// A node in a singly linked list.
#[derive(Node)]
#[node(crate_path = "crate")]
#[repr(C)]
pub struct SingleNode<T> {
    link: SingleLink,
    tag: NodeTag,
    data: T,
}

impl<T> SingleNode<T> {
    /// Allocate a detached node holding `data`.
    ///
    /// The node is not linked anywhere and carries no owner until a list
    /// splices it in and stamps it.
    pub(crate) fn create(data: T, serial: u64) -> Result<NonNull<Self>, ListError> {
        // SAFETY: the layout is never zero-sized, the link alone is a pointer.
        let raw = unsafe { alloc(Layout::new::<Self>()).cast::<Self>() };
        let node = NonNull::new(raw).ok_or(ListError::OutOfMemory)?;

        // SAFETY: freshly allocated with the layout of `Self`.
        unsafe {
            node.as_ptr().write(Self {
                link: SingleLink::default(),
                tag: NodeTag::unowned(serial),
                data,
            });
        }
        Ok(node)
    }

    /// Release the node's storage and hand back the data it held.
    ///
    /// # Safety
    ///
    /// `node` must come from [`SingleNode::create`], must already be detached
    /// from its list and must not be used afterwards.
    pub(crate) unsafe fn destroy(node: NonNull<Self>) -> T {
        // SAFETY: allocated by the global allocator with `Layout::new::<Self>()`,
        // which is exactly what `Box` expects.
        let node = *unsafe { Box::from_raw(node.as_ptr()) };
        node.into_data()
    }
}

/// A link in a singly linked list.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleLink {
    next: Option<NonNull<Self>>,
}

impl Link for SingleLink {
    type Target = Self;

    #[inline]
    fn next(&self) -> Option<NonNull<Self>> {
        self.next
    }

    #[inline]
    fn set_next(&mut self, next: Option<NonNull<Self>>) {
        self.next = next;
    }
}

impl Node for SingleLink {
    #[inline]
    fn link_after<L>(&mut self, parent: &mut L)
    where
        L: Link<Target = Self>,
    {
        self.set_next(parent.next());
        parent.set_next(Some(NonNull::from(self)));
    }

    #[inline]
    unsafe fn detach<L>(&mut self, parent: &mut L)
    where
        L: Link<Target = Self>,
    {
        debug_assert_eq!(
            parent.next(),
            Some(NonNull::from(&mut *self)),
            "Parent must be the one that contains this node"
        );
        parent.set_next(self.next());
        self.set_next(None);
    }
}
