//! Singly linked lists that own caller values behind a callback method set.
//!
//! See [`linked_list::intrusive`] for the list engine.
#![no_std]

extern crate alloc;
#[cfg(test)]
extern crate std;

pub mod linked_list;

pub use linked_list::intrusive::{
    cursor::{Cursor, WrapMode},
    error::{ListError, Method, describe},
    list::{NodeHandle, SingleList},
    methods::Methods,
    tag::ListId,
};
