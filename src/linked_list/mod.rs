//! A singly linked list with bound callbacks and ownership-tagged nodes.
//!
//! The list owns a chain of heap nodes. Each node holds one caller value and
//! is stamped with the [`ListId`](intrusive::tag::ListId) of the list that
//! inserted it, so handles taken from one list cannot be used to splice into
//! another.
//!
//! # Examples
//!
//! ```
//! use mola_slist::{ListError, Methods, SingleList};
//!
//! let methods = Methods::new()
//!     .with_print(|v: &i32, out| write!(out, "{v}"))
//!     .with_match(|a: &i32, b: &i32| a.cmp(b));
//! let mut list = SingleList::new(methods);
//! let mut other = SingleList::<i32>::default();
//!
//! list.insert_last(5).unwrap();
//! list.insert_last(3).unwrap();
//! list.insert_last(9).unwrap();
//!
//! let three = list.find(&3).unwrap().unwrap();
//! assert!(list.node_belongs(&three));
//! assert!(!other.node_belongs(&three));
//! assert_eq!(other.insert_after(Some(&three), 1), Err(ListError::ForeignNode));
//!
//! list.insert_after(Some(&three), 7).unwrap();
//! assert_eq!(list.render(None).unwrap(), "[5 -> 3 -> 7 -> 9]");
//! assert_eq!(list.remove_first(), Some(5));
//! assert_eq!(list.render(Some(", ")).unwrap(), "[3, 7, 9]");
//! ```
pub mod intrusive;
