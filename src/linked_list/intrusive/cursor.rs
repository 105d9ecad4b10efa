//! A restartable external cursor.
//!
//! A [`Cursor`] tracks one list at a time. Passing a different list to
//! [`Cursor::next`] rebinds it to that list's head and discards the progress
//! made on the previous one; passing `None` keeps stepping the tracked list.
//! Each cursor carries its own position, so several cursors can walk the same
//! or different lists side by side.

use core::ptr::NonNull;

use super::{
    error::ListError,
    list::SingleList,
    single::SingleNode,
    traits::{Link, List, NodeWithData},
};

/// What a cursor does once it has yielded the tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    /// Start over at the head. The sequence never ends on its own.
    #[default]
    Cycle,
    /// Report the end with `Ok(None)` until the cursor is reset or rebound.
    Stop,
}

/// A cursor over the values of a [`SingleList`].
///
/// # Examples
///
/// ```
/// use mola_slist::linked_list::intrusive::{
///     cursor::{Cursor, WrapMode},
///     list::SingleList,
/// };
///
/// let mut list = SingleList::default();
/// list.load([1, 2, 3]).unwrap();
///
/// let mut cursor = Cursor::new(WrapMode::Cycle);
/// assert_eq!(cursor.next(Some(&list)), Ok(Some(&1)));
/// assert_eq!(cursor.next(Some(&list)), Ok(Some(&2)));
/// assert_eq!(cursor.next(Some(&list)), Ok(Some(&3)));
/// assert_eq!(cursor.next(None), Ok(Some(&1)));
/// ```
#[derive(Debug)]
pub struct Cursor<'a, T> {
    tracked: Option<&'a SingleList<T>>,
    next: Option<NonNull<SingleNode<T>>>,
    mode: WrapMode,
}

impl<'a, T> Cursor<'a, T> {
    /// A cursor that tracks no list yet.
    pub fn new(mode: WrapMode) -> Self {
        Self {
            tracked: None,
            next: None,
            mode,
        }
    }

    /// A cursor positioned at the head of `list`.
    pub fn tracking(list: &'a SingleList<T>, mode: WrapMode) -> Self {
        let mut cursor = Self::new(mode);
        cursor.bind(list);
        cursor
    }

    /// What happens after the tail is yielded.
    pub fn mode(&self) -> WrapMode {
        self.mode
    }

    /// The list currently tracked, if any.
    pub fn tracked(&self) -> Option<&'a SingleList<T>> {
        self.tracked
    }

    /// Move back to the head of the tracked list.
    pub fn reset(&mut self) {
        self.next = self.tracked.and_then(|list| list.head_ptr());
    }

    /// Yield the value under the cursor and advance.
    ///
    /// `list` rebinds the cursor when it differs from the tracked list. With
    /// `None` the tracked list keeps being walked; if nothing was ever
    /// tracked this fails with `NullValue`. An empty list yields `Ok(None)`.
    pub fn next(&mut self, list: Option<&'a SingleList<T>>) -> Result<Option<&'a T>, ListError> {
        if let Some(list) = list {
            if self.tracked.is_none_or(|tracked| tracked.id() != list.id()) {
                self.bind(list);
            }
        }
        let tracked = self.tracked.ok_or(ListError::NullValue)?;

        let Some(current) = self.next else {
            return Ok(None);
        };
        // SAFETY: `tracked` is borrowed for `'a`, so its nodes stay alive and
        // the chain cannot change under the cursor.
        let node: &'a SingleNode<T> = unsafe { &*current.as_ptr() };

        self.next = match (node.next(), self.mode) {
            (Some(next), _) => Some(next),
            (None, WrapMode::Cycle) => tracked.head_ptr(),
            (None, WrapMode::Stop) => None,
        };
        Ok(Some(node.data()))
    }

    fn bind(&mut self, list: &'a SingleList<T>) {
        self.tracked = Some(list);
        self.next = list.head_ptr();
    }
}

impl<'a, T> Iterator for Cursor<'a, T> {
    type Item = &'a T;

    /// Step the tracked list. Ends when the cursor tracks nothing, the list
    /// is empty or, in [`WrapMode::Stop`], the tail has been yielded.
    fn next(&mut self) -> Option<Self::Item> {
        Cursor::next(self, None).ok().flatten()
    }
}
