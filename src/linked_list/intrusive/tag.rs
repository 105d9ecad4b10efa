//! Ownership tags.
//!
//! Every list mints a process-unique [`ListId`] when it is built. Nodes are
//! stamped with the id of the list that spliced them in, together with a
//! per-list serial number, so a node can prove which list it belongs to
//! without anyone dereferencing the list.

use core::fmt;
use core::num::NonZeroU64;
use core::sync::atomic::{AtomicU64, Ordering};

static NEXT_LIST_ID: AtomicU64 = AtomicU64::new(1);

/// A plain, comparable identifier of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListId(NonZeroU64);

impl ListId {
    /// Mint a fresh id. Ids are never reused within a process.
    pub(crate) fn next() -> Self {
        let raw = NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed);
        // The counter starts at 1 and would need 2^64 lists to wrap.
        ListId(NonZeroU64::new(raw).unwrap_or(NonZeroU64::MIN))
    }

    /// The raw numeric value of the id.
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "list#{}", self.0)
    }
}

/// The tag carried by every node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeTag {
    owner: Option<ListId>,
    serial: u64,
}

impl NodeTag {
    /// A tag for a node that has not been inserted anywhere yet.
    pub const fn unowned(serial: u64) -> Self {
        Self {
            owner: None,
            serial,
        }
    }

    /// The list this node was inserted into, if any.
    #[inline]
    pub fn owner(&self) -> Option<ListId> {
        self.owner
    }

    /// Stamp the node as belonging to `owner`.
    #[inline]
    pub fn stamp(&mut self, owner: ListId) {
        self.owner = Some(owner);
    }

    /// Serial number of the node, unique within its list.
    #[inline]
    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// Whether the node was inserted into `list`.
    #[inline]
    pub fn belongs_to(&self, list: ListId) -> bool {
        self.owner == Some(list)
    }
}
