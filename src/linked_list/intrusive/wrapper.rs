use core::{marker::PhantomData, ptr::NonNull};

use super::traits::Link;

/// A wrapper that presents a `Link<Target = T>` as a `Link<Target = M>`.
///
/// The derived node impls use it to hand a node (or the list head) to the
/// embedded `SingleLink`, which only knows about other links.
pub struct LinkWrapper<'a, L, T, M>
where
    L: Link<Target = T>,
{
    inner: &'a mut L,
    _marker: PhantomData<M>,
}

impl<'a, L, T, M> LinkWrapper<'a, L, T, M>
where
    L: Link<Target = T>,
{
    /// Create a new `LinkWrapper` with the given inner link.
    ///
    /// # Safety
    ///
    /// `M` must sit at offset 0 of `T` (the node is `#[repr(C)]` with its link
    /// first), so that a pointer to one is a valid pointer to the other.
    pub unsafe fn new(inner: &'a mut L) -> Self {
        LinkWrapper {
            inner,
            _marker: PhantomData,
        }
    }
}

impl<'a, L, T, M> Link for LinkWrapper<'a, L, T, M>
where
    L: Link<Target = T>,
{
    type Target = M;

    fn next(&self) -> Option<NonNull<M>> {
        self.inner.next().map(|n| n.cast())
    }

    fn set_next(&mut self, next: Option<NonNull<M>>) {
        self.inner.set_next(next.map(|n| n.cast()));
    }
}
