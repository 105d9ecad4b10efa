//! The callback set bound to a list at construction.

use alloc::boxed::Box;
use core::cmp::Ordering;
use core::fmt;

/// Called with a value that is leaving the list for good (teardown, `clear`).
pub type DestroyFn<T> = Box<dyn FnMut(T)>;

/// Renders a value into a text sink.
pub type PrintFn<T> = Box<dyn Fn(&T, &mut dyn fmt::Write) -> fmt::Result>;

/// Compares a stored value with a probe; `Ordering::Equal` means a match.
pub type MatchFn<T> = Box<dyn Fn(&T, &T) -> Ordering>;

/// The three optional callbacks of a list.
///
/// A missing `destroy` means the caller keeps responsibility for values that
/// are dropped by the list; they are simply dropped. A missing `print` makes
/// rendering fail with `MissingMethod`, a missing `match` does the same for
/// searches.
///
/// # Examples
///
/// ```
/// use mola_slist::linked_list::intrusive::methods::Methods;
///
/// let methods = Methods::<i32>::new()
///     .with_print(|v, out| write!(out, "{v}"))
///     .with_match(|a, b| a.cmp(b));
///
/// assert!(methods.has_print());
/// assert!(!methods.has_destroy());
/// ```
pub struct Methods<T> {
    destroy: Option<DestroyFn<T>>,
    print: Option<PrintFn<T>>,
    matcher: Option<MatchFn<T>>,
}

impl<T> Methods<T> {
    /// An empty method set.
    pub fn new() -> Self {
        Self {
            destroy: None,
            print: None,
            matcher: None,
        }
    }

    /// Bind the destroy callback.
    pub fn with_destroy<F>(mut self, destroy: F) -> Self
    where
        F: FnMut(T) + 'static,
    {
        self.destroy = Some(Box::new(destroy));
        self
    }

    /// Bind the print callback.
    pub fn with_print<F>(mut self, print: F) -> Self
    where
        F: Fn(&T, &mut dyn fmt::Write) -> fmt::Result + 'static,
    {
        self.print = Some(Box::new(print));
        self
    }

    /// Bind the match callback.
    pub fn with_match<F>(mut self, matcher: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'static,
    {
        self.matcher = Some(Box::new(matcher));
        self
    }

    /// Whether a destroy callback is bound.
    pub fn has_destroy(&self) -> bool {
        self.destroy.is_some()
    }

    /// Whether a print callback is bound.
    pub fn has_print(&self) -> bool {
        self.print.is_some()
    }

    /// Whether a match callback is bound.
    pub fn has_match(&self) -> bool {
        self.matcher.is_some()
    }

    /// Hand a value to the destroy callback, or drop it if there is none.
    pub(crate) fn release(&mut self, value: T) {
        match self.destroy.as_mut() {
            Some(destroy) => destroy(value),
            None => drop(value),
        }
    }

    pub(crate) fn printer(&self) -> Option<&PrintFn<T>> {
        self.print.as_ref()
    }

    pub(crate) fn matcher(&self) -> Option<&MatchFn<T>> {
        self.matcher.as_ref()
    }
}

impl<T> Default for Methods<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Methods<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Methods")
            .field("destroy", &self.has_destroy())
            .field("print", &self.has_print())
            .field("match", &self.has_match())
            .finish()
    }
}
