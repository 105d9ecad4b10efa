//! # Singly Linked List
//!
//! ## Core Components
//!
//! - [`traits`]: The `Link`, `Node`, `Tagged`, `NodeWithData` and `List` traits.
//! - [`single::SingleNode`]: The heap node, with its `SingleLink` at offset 0.
//! - [`tag`]: List ids and the ownership tag stamped on every node.
//! - [`methods::Methods`]: The optional destroy/print/match callbacks.
//! - [`list::SingleList`]: The list and all of its mutation algorithms.
//! - [`iter::Iter`] and [`cursor::Cursor`]: Borrowing iteration and the
//!   restartable external cursor.
//! - [`error`]: `ListError` and the status reporter.
//!
//! ## Safety
//!
//! Nodes are linked through raw pointers. The list upholds these invariants:
//!
//! - Every node reachable from the head is owned by the list and stamped with its id.
//! - `count` equals the number of reachable nodes; the tail is the last of them.
//! - Handles are only followed after they have been found in the chain.
//! - Iterators and cursors borrow the list, so it cannot change under them.
//!
//! The list is meant for a single thread; it does no synchronisation.

pub mod cursor;
pub mod error;
pub mod iter;
pub mod list;
pub mod methods;
pub mod single;
pub mod tag;
pub mod traits;
pub mod wrapper;

#[cfg(test)]
mod tests;
