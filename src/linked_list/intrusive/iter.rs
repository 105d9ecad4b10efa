use core::{marker::PhantomData, ptr::NonNull};

use super::traits::{Link, NodeWithData};

/// An iterator over the values of a linked list, head to tail.
pub struct Iter<'a, N: NodeWithData> {
    current: Option<NonNull<N>>,
    remaining: usize,
    _marker: PhantomData<&'a N>,
}

impl<'a, N> Iter<'a, N>
where
    N: NodeWithData<Target = N>,
{
    /// Creates a new iterator starting at `head`.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the chain starting at `head` holds exactly
    /// `count` nodes and is neither freed nor modified for `'a`.
    pub unsafe fn new(head: Option<NonNull<N>>, count: usize) -> Self {
        Self {
            current: head,
            remaining: count,
            _marker: PhantomData,
        }
    }
}

impl<'a, N> Iterator for Iter<'a, N>
where
    N: NodeWithData<Target = N> + 'a,
{
    type Item = &'a N::Data;

    fn next(&mut self) -> Option<Self::Item> {
        self.current.map(|current| {
            let node = unsafe { &*current.as_ptr() };
            self.current = node.next();
            self.remaining -= 1;
            node.data()
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, N> ExactSizeIterator for Iter<'a, N> where N: NodeWithData<Target = N> + 'a {}

impl<'a, N> Clone for Iter<'a, N>
where
    N: NodeWithData,
{
    fn clone(&self) -> Self {
        Self {
            current: self.current,
            remaining: self.remaining,
            _marker: PhantomData,
        }
    }
}
