//! Error taxonomy and reporter.

use core::fmt;

use thiserror::Error;

/// A callback whose absence makes an operation fail.
///
/// The destroy callback is not listed: without it values are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Value rendering callback.
    Print,
    /// Stored value vs. probe equality callback.
    Match,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Print => "print",
            Method::Match => "match",
        })
    }
}

/// Errors reported by list operations.
///
/// Every failing operation leaves the list exactly as it found it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    /// A required reference was absent (an invalidated list, an untracked cursor).
    #[error("a required argument was absent")]
    NullValue,
    /// Node storage could not be allocated.
    #[error("out of memory while allocating a node")]
    OutOfMemory,
    /// The operation needs a callback that was not bound at construction.
    #[error("the `{0}` method was not configured for this list")]
    MissingMethod(Method),
    /// The node's ownership tag names a different list.
    #[error("the node belongs to a different list")]
    ForeignNode,
    /// The node was owned by this list but has since been removed from it.
    #[error("the node is no longer part of the list")]
    StaleNode,
    /// The output sink refused the rendered text.
    #[error("failed to write the rendered list")]
    Format(#[from] fmt::Error),
}

impl ListError {
    /// A human-readable description of the error.
    pub fn message(&self) -> &'static str {
        match self {
            ListError::NullValue => "null value: a required argument was absent",
            ListError::OutOfMemory => "out of memory",
            ListError::MissingMethod(Method::Print) => "missing method: print",
            ListError::MissingMethod(Method::Match) => "missing method: match",
            ListError::ForeignNode => "foreign node: the node belongs to another list",
            ListError::StaleNode => "stale node: the node was already removed",
            ListError::Format(_) => "format error: the output sink failed",
        }
    }
}

/// Map an operation's status to a diagnostic message.
///
/// # Examples
///
/// ```
/// use mola_slist::linked_list::intrusive::error::{describe, ListError};
///
/// assert_eq!(describe(&Ok::<_, ListError>(3)), "success");
/// assert_eq!(describe::<()>(&Err(ListError::OutOfMemory)), "out of memory");
/// ```
pub fn describe<T>(status: &Result<T, ListError>) -> &'static str {
    match status {
        Ok(_) => "success",
        Err(e) => e.message(),
    }
}
