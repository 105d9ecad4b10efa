use core::ptr::NonNull;

use super::{iter::Iter, tag::NodeTag};

/// A trait for a singly linked list that owns its chain.
pub trait List: Link {
    /// Get the head of the linked list
    fn head_ptr(&self) -> Option<NonNull<Self::Target>>;

    /// Get the tail of the linked list
    fn tail_ptr(&self) -> Option<NonNull<Self::Target>>;

    /// Get the number of nodes in the linked list
    fn count(&self) -> usize;

    /// Check if the linked list is empty
    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Get an iterator over the values of the linked list
    fn iter(&self) -> Iter<'_, Self::Target>
    where
        Self::Target: NodeWithData<Target = Self::Target>,
    {
        // SAFETY: the borrow of `self` keeps the chain alive and unmodified.
        unsafe { Iter::new(self.head_ptr(), self.count()) }
    }
}

/// A trait for a link in a linked list.
pub trait Link: Sized {
    /// The target type of the link.
    type Target;

    /// Get the next pointer in the linked list
    fn next(&self) -> Option<NonNull<Self::Target>>;

    /// Set the next pointer in the linked list
    fn set_next(&mut self, next: Option<NonNull<Self::Target>>);
}

/// A trait for a node in a linked list.
pub trait Node: Link {
    /// Splice the node in directly after `parent`.
    ///
    /// `parent` is either another node or the list itself, in which case the
    /// node becomes the new head.
    fn link_after<L>(&mut self, parent: &mut L)
    where
        L: Link<Target = Self>;

    /// Detach the node from the linked list
    ///
    /// # Safety
    ///
    /// `parent` must be the node (or the list) whose next pointer is this node.
    /// It will update the parent's next pointer to skip this node.
    unsafe fn detach<L>(&mut self, parent: &mut L)
    where
        L: Link<Target = Self>;
}

/// A trait for a node that carries an ownership tag.
pub trait Tagged: Node {
    /// Get the ownership tag of the node
    fn tag(&self) -> &NodeTag;

    /// Get a mutable reference to the ownership tag of the node
    fn tag_mut(&mut self) -> &mut NodeTag;
}

/// A trait for a node that contains data.
pub trait NodeWithData: Node {
    /// The type of data stored in the node.
    type Data;

    /// Get the data associated with the node
    fn data(&self) -> &Self::Data;

    /// Get a mutable reference to the data associated with the node
    fn data_mut(&mut self) -> &mut Self::Data;

    /// Consume the node and hand back its data
    fn into_data(self) -> Self::Data;
}
