use alloc::boxed::Box;
use alloc::string::String;
use core::cmp::Ordering;
use core::fmt;
use core::marker::PhantomData;
use core::ptr::NonNull;

use tracing::{debug, trace};

use super::{
    cursor::{Cursor, WrapMode},
    error::{ListError, Method},
    iter::Iter,
    methods::Methods,
    single::SingleNode,
    tag::ListId,
    traits::{Link, List, Node, NodeWithData, Tagged},
};

/// Separator used by [`SingleList::print`] when the caller does not pass one.
pub const DEFAULT_SEPARATOR: &str = " -> ";

/// A handle to a node of a [`SingleList`].
///
/// The handle remembers which list inserted the node and the node's serial
/// number. It never dereferences the node by itself: every operation that
/// accepts a handle first checks the ownership tag and then finds the node in
/// the chain, so a handle outliving its node is reported instead of followed.
///
/// The owner and serial are copies of the stamp written into the node when it
/// was linked. Ownership checks compare against this copy and never read the
/// node, which is why they stay O(1) and safe after the node is gone.
pub struct NodeHandle<T> {
    ptr: NonNull<SingleNode<T>>,
    owner: ListId,
    serial: u64,
}

impl<T> NodeHandle<T> {
    /// The list that inserted the node.
    pub fn owner(&self) -> ListId {
        self.owner
    }

    /// The node's serial number within its list.
    pub fn serial(&self) -> u64 {
        self.serial
    }
}

impl<T> Clone for NodeHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeHandle<T> {}

impl<T> PartialEq for NodeHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr && self.owner == other.owner && self.serial == other.serial
    }
}

impl<T> Eq for NodeHandle<T> {}

impl<T> fmt::Debug for NodeHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeHandle")
            .field("owner", &self.owner)
            .field("serial", &self.serial)
            .finish()
    }
}

/// A singly linked list that owns its nodes and the values in them.
///
/// Inserting at either end is O(1), as is removing the head. Removing the
/// tail, positional inserts and handle-based deletion scan the chain.
///
/// # Examples
///
/// ```
/// use mola_slist::linked_list::intrusive::{list::SingleList, methods::Methods};
///
/// let mut list = SingleList::new(Methods::new().with_match(|a: &i32, b: &i32| a.cmp(b)));
/// list.insert_last(5).unwrap();
/// list.insert_last(3).unwrap();
/// list.insert_last(9).unwrap();
///
/// let three = list.find(&3).unwrap().unwrap();
/// list.insert_after(Some(&three), 7).unwrap();
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [5, 3, 7, 9]);
/// ```
pub struct SingleList<T> {
    id: ListId,
    head: Option<NonNull<SingleNode<T>>>,
    tail: Option<NonNull<SingleNode<T>>>,
    count: usize,
    next_serial: u64,
    methods: Methods<T>,
    _marker: PhantomData<Box<SingleNode<T>>>,
}

impl<T> SingleList<T> {
    /// Creates a new, empty list bound to `methods`.
    pub fn new(methods: Methods<T>) -> Self {
        let list = Self {
            id: ListId::next(),
            head: None,
            tail: None,
            count: 0,
            next_serial: 0,
            methods,
            _marker: PhantomData,
        };
        debug!(list = list.id.get(), methods = ?list.methods, "created list");
        list
    }

    /// Tear down the list held in `slot` and leave the slot empty.
    ///
    /// Every remaining value is handed to the destroy callback, head first.
    /// Returns how many values were released, or `NullValue` if the slot was
    /// already invalidated.
    pub fn destroy(slot: &mut Option<Self>) -> Result<usize, ListError> {
        let mut list = slot.take().ok_or(ListError::NullValue)?;
        let released = list.clear();
        debug!(list = list.id.get(), released, "destroyed list");
        Ok(released)
    }

    /// The identifier stamped on every node of this list.
    pub fn id(&self) -> ListId {
        self.id
    }

    /// The callbacks bound at construction.
    pub fn methods(&self) -> &Methods<T> {
        &self.methods
    }

    /// Number of values in the list.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the list holds no values.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Handle to the first node.
    pub fn head(&self) -> Option<NodeHandle<T>> {
        self.head.map(|node| self.handle(node))
    }

    /// Handle to the last node.
    pub fn tail(&self) -> Option<NodeHandle<T>> {
        self.tail.map(|node| self.handle(node))
    }

    /// Iterate over the values, head to tail.
    pub fn iter(&self) -> Iter<'_, SingleNode<T>> {
        List::iter(self)
    }

    /// A cursor already tracking this list.
    pub fn cursor(&self, mode: WrapMode) -> Cursor<'_, T> {
        Cursor::tracking(self, mode)
    }

    /// Insert `value` at the head in O(1).
    pub fn insert_first(&mut self, value: T) -> Result<NodeHandle<T>, ListError> {
        let node = self.create_node(value)?;
        // SAFETY: `node` is fresh and detached, the list is its parent.
        unsafe { (*node.as_ptr()).link_after(self) };
        if self.tail.is_none() {
            self.tail = Some(node);
        }
        trace!(list = self.id.get(), count = self.count + 1, "inserted at head");
        Ok(self.adopt(node))
    }

    /// Insert `value` at the tail in O(1).
    pub fn insert_last(&mut self, value: T) -> Result<NodeHandle<T>, ListError> {
        let node = self.create_node(value)?;
        // SAFETY: `node` is fresh and detached; `tail` is a live node of this list.
        unsafe {
            match self.tail {
                Some(tail) => (*node.as_ptr()).link_after(&mut *tail.as_ptr()),
                None => (*node.as_ptr()).link_after(self),
            }
        }
        self.tail = Some(node);
        trace!(list = self.id.get(), count = self.count + 1, "inserted at tail");
        Ok(self.adopt(node))
    }

    /// Insert `value` right after `anchor`.
    ///
    /// No anchor means "at the end". A foreign anchor is rejected with
    /// `ForeignNode` and nothing is modified.
    pub fn insert_after(
        &mut self,
        anchor: Option<&NodeHandle<T>>,
        value: T,
    ) -> Result<NodeHandle<T>, ListError> {
        let Some(anchor) = anchor else {
            return self.insert_last(value);
        };
        self.check_owner(anchor)?;
        if self.points_at(self.tail, anchor) {
            return self.insert_last(value);
        }

        let (_, target) = self.locate(anchor)?;
        let node = self.create_node(value)?;
        // SAFETY: `target` is a live, non-tail node of this list.
        unsafe { (*node.as_ptr()).link_after(&mut *target.as_ptr()) };
        trace!(list = self.id.get(), anchor = anchor.serial, "inserted after node");
        Ok(self.adopt(node))
    }

    /// Insert `value` right before `anchor`.
    ///
    /// No anchor means "at the start". A foreign anchor is rejected with
    /// `ForeignNode` and nothing is modified.
    pub fn insert_before(
        &mut self,
        anchor: Option<&NodeHandle<T>>,
        value: T,
    ) -> Result<NodeHandle<T>, ListError> {
        let Some(anchor) = anchor else {
            return self.insert_first(value);
        };
        self.check_owner(anchor)?;
        if self.points_at(self.head, anchor) {
            return self.insert_first(value);
        }

        let (prev, _) = self.locate(anchor)?;
        let prev = prev.ok_or(ListError::StaleNode)?;
        let node = self.create_node(value)?;
        // SAFETY: `prev` is the live predecessor of the anchor.
        unsafe { (*node.as_ptr()).link_after(&mut *prev.as_ptr()) };
        trace!(list = self.id.get(), anchor = anchor.serial, "inserted before node");
        Ok(self.adopt(node))
    }

    /// Remove the head and return its value. `None` on an empty list.
    pub fn remove_first(&mut self) -> Option<T> {
        let head = self.head?;
        // SAFETY: the list is the parent of its head.
        unsafe { (*head.as_ptr()).detach(self) };
        if self.head.is_none() {
            self.tail = None;
        }
        self.count -= 1;
        trace!(list = self.id.get(), count = self.count, "removed head");
        // SAFETY: detached above and no longer reachable.
        Some(unsafe { SingleNode::destroy(head) })
    }

    /// Remove the tail and return its value. `None` on an empty list.
    ///
    /// Only forward links exist, so finding the new tail takes a scan.
    pub fn remove_last(&mut self) -> Option<T> {
        let tail = self.tail?;
        if self.head == Some(tail) {
            return self.remove_first();
        }

        let prev = self.predecessor(tail)?;
        // SAFETY: `prev` is the live predecessor of `tail`.
        unsafe { (*tail.as_ptr()).detach(&mut *prev.as_ptr()) };
        self.tail = Some(prev);
        self.count -= 1;
        trace!(list = self.id.get(), count = self.count, "removed tail");
        // SAFETY: detached above and no longer reachable.
        Some(unsafe { SingleNode::destroy(tail) })
    }

    /// Unlink the node behind `handle` and return its value.
    ///
    /// The value is handed back, not passed to the destroy callback.
    pub fn delete_node(&mut self, handle: &NodeHandle<T>) -> Result<T, ListError> {
        self.check_owner(handle)?;
        if self.points_at(self.head, handle) {
            return self.remove_first().ok_or(ListError::StaleNode);
        }
        if self.points_at(self.tail, handle) {
            return self.remove_last().ok_or(ListError::StaleNode);
        }

        let (prev, node) = self.locate(handle)?;
        let prev = prev.ok_or(ListError::StaleNode)?;
        // SAFETY: `prev` is the live predecessor of `node`, neither is an endpoint.
        unsafe { (*node.as_ptr()).detach(&mut *prev.as_ptr()) };
        self.count -= 1;
        trace!(list = self.id.get(), node = handle.serial, count = self.count, "deleted node");
        // SAFETY: detached above and no longer reachable.
        Ok(unsafe { SingleNode::destroy(node) })
    }

    /// Find the first node whose value matches `probe` under the bound match callback.
    pub fn find(&self, probe: &T) -> Result<Option<NodeHandle<T>>, ListError> {
        let matcher = self
            .methods
            .matcher()
            .ok_or(ListError::MissingMethod(Method::Match))?;
        Ok(self.find_with(probe, |stored, probe| matcher(stored, probe)))
    }

    /// Find the first node whose value matches `probe` under `matcher`,
    /// ignoring the bound match callback.
    pub fn find_with<F>(&self, probe: &T, matcher: F) -> Option<NodeHandle<T>>
    where
        F: Fn(&T, &T) -> Ordering,
    {
        self.nodes()
            // SAFETY: nodes yielded by `nodes` are live while `self` is borrowed.
            .find(|node| matcher(unsafe { node.as_ref() }.data(), probe) == Ordering::Equal)
            .map(|node| self.handle(node))
    }

    /// Whether `handle` was issued by this list. O(1), never touches the node.
    pub fn node_belongs(&self, handle: &NodeHandle<T>) -> bool {
        handle.owner == self.id
    }

    /// The value behind `handle`.
    pub fn get(&self, handle: &NodeHandle<T>) -> Result<&T, ListError> {
        self.check_owner(handle)?;
        let (_, node) = self.locate(handle)?;
        // SAFETY: located in the chain, so it is live.
        Ok(unsafe { &*node.as_ptr() }.data())
    }

    /// The value behind `handle`, mutably.
    pub fn get_mut(&mut self, handle: &NodeHandle<T>) -> Result<&mut T, ListError> {
        self.check_owner(handle)?;
        let (_, node) = self.locate(handle)?;
        // SAFETY: located in the chain, and `self` is borrowed mutably.
        Ok(unsafe { &mut *node.as_ptr() }.data_mut())
    }

    /// Call `f` on every value, head to tail, and return the sum of its results.
    ///
    /// The sum is the whole contract: returning 1 per element counts them,
    /// returning a status code totals the statuses. It is not an
    /// "all succeeded" flag; see [`SingleList::foreach_all`] for that.
    ///
    /// The sum wraps on overflow in every build profile.
    pub fn foreach<F>(&mut self, mut f: F) -> i64
    where
        F: FnMut(&mut T) -> i64,
    {
        let mut total = 0;
        for node in self.nodes() {
            // SAFETY: live node, `self` is borrowed mutably.
            total = i64::wrapping_add(total, f(unsafe { &mut *node.as_ptr() }.data_mut()));
        }
        total
    }

    /// Call `f` on every value, head to tail, and report whether every call
    /// returned `true`. All values are visited even after a failure.
    pub fn foreach_all<F>(&mut self, mut f: F) -> bool
    where
        F: FnMut(&mut T) -> bool,
    {
        let mut ok = true;
        for node in self.nodes() {
            // SAFETY: live node, `self` is borrowed mutably.
            ok &= f(unsafe { &mut *node.as_ptr() }.data_mut());
        }
        ok
    }

    /// Render the values as `[a -> b -> c]` with the print callback.
    pub fn print<W>(&self, out: &mut W, separator: Option<&str>) -> Result<(), ListError>
    where
        W: fmt::Write,
    {
        let print = self
            .methods
            .printer()
            .ok_or(ListError::MissingMethod(Method::Print))?;
        let separator = separator.unwrap_or(DEFAULT_SEPARATOR);
        let out: &mut dyn fmt::Write = out;

        out.write_char('[')?;
        for (index, value) in self.iter().enumerate() {
            if index > 0 {
                out.write_str(separator)?;
            }
            print(value, &mut *out)?;
        }
        out.write_char(']')?;
        Ok(())
    }

    /// [`SingleList::print`] into a fresh `String`.
    pub fn render(&self, separator: Option<&str>) -> Result<String, ListError> {
        let mut out = String::new();
        self.print(&mut out, separator)?;
        Ok(out)
    }

    /// Render one line per node with its serial, value and successor.
    ///
    /// ```text
    /// node #0 [5] -> #1
    /// node #1 [3] -> nil
    /// ```
    pub fn print_verbose<W>(&self, out: &mut W) -> Result<(), ListError>
    where
        W: fmt::Write,
    {
        let print = self
            .methods
            .printer()
            .ok_or(ListError::MissingMethod(Method::Print))?;
        let out: &mut dyn fmt::Write = out;

        for node in self.nodes() {
            // SAFETY: live node while `self` is borrowed.
            let node = unsafe { node.as_ref() };
            write!(out, "node #{} [", node.tag().serial())?;
            print(node.data(), &mut *out)?;
            match node.next() {
                // SAFETY: successor of a live node is live.
                Some(next) => writeln!(out, "] -> #{}", unsafe { next.as_ref() }.tag().serial())?,
                None => writeln!(out, "] -> nil")?,
            }
        }
        Ok(())
    }

    /// Remove every node, handing each value to the destroy callback.
    ///
    /// Returns how many values were released. The list stays usable.
    pub fn clear(&mut self) -> usize {
        let mut released = 0;
        while let Some(value) = self.remove_first() {
            self.methods.release(value);
            released += 1;
        }
        released
    }

    /// Append every item in order. Stops at the first failure.
    pub fn load<I>(&mut self, items: I) -> Result<usize, ListError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut loaded = 0;
        for item in items {
            self.insert_last(item)?;
            loaded += 1;
        }
        Ok(loaded)
    }

    fn create_node(&mut self, value: T) -> Result<NonNull<SingleNode<T>>, ListError> {
        let node = SingleNode::create(value, self.next_serial)?;
        self.next_serial += 1;
        Ok(node)
    }

    /// Stamp a freshly spliced node and account for it.
    fn adopt(&mut self, node: NonNull<SingleNode<T>>) -> NodeHandle<T> {
        // SAFETY: the node was just spliced into this list.
        unsafe { (*node.as_ptr()).tag_mut().stamp(self.id) };
        self.count += 1;
        self.handle(node)
    }

    fn handle(&self, node: NonNull<SingleNode<T>>) -> NodeHandle<T> {
        NodeHandle {
            ptr: node,
            owner: self.id,
            // SAFETY: only called with live nodes of this list.
            serial: unsafe { node.as_ref() }.tag().serial(),
        }
    }

    fn check_owner(&self, handle: &NodeHandle<T>) -> Result<(), ListError> {
        if handle.owner == self.id {
            Ok(())
        } else {
            debug!(
                list = self.id.get(),
                owner = handle.owner.get(),
                "rejected node owned by another list"
            );
            Err(ListError::ForeignNode)
        }
    }

    /// Whether `slot` holds the live node `handle` refers to.
    fn points_at(&self, slot: Option<NonNull<SingleNode<T>>>, handle: &NodeHandle<T>) -> bool {
        // SAFETY: `slot` is the head or tail of this list, hence live.
        slot.is_some_and(|node| {
            node == handle.ptr && unsafe { node.as_ref() }.tag().serial() == handle.serial
        })
    }

    /// Find the node behind `handle` and its predecessor (`None` for the head).
    fn locate(
        &self,
        handle: &NodeHandle<T>,
    ) -> Result<(Option<NonNull<SingleNode<T>>>, NonNull<SingleNode<T>>), ListError> {
        let mut prev = None;
        for node in self.nodes() {
            // SAFETY: live node while `self` is borrowed.
            if node == handle.ptr && unsafe { node.as_ref() }.tag().serial() == handle.serial {
                return Ok((prev, node));
            }
            prev = Some(node);
        }
        Err(ListError::StaleNode)
    }

    fn predecessor(&self, target: NonNull<SingleNode<T>>) -> Option<NonNull<SingleNode<T>>> {
        // SAFETY: live node while `self` is borrowed.
        self.nodes()
            .find(|node| unsafe { node.as_ref() }.next() == Some(target))
    }

    /// Walk the raw chain from the head.
    fn nodes(&self) -> impl Iterator<Item = NonNull<SingleNode<T>>> + use<T> {
        // SAFETY: every pointer in the chain is a live node owned by the list.
        core::iter::successors(self.head, |node| unsafe { node.as_ref() }.next())
    }

    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let mut walked = 0;
        let mut last = None;
        for node in self.nodes() {
            let tag = unsafe { node.as_ref() }.tag();
            assert!(tag.belongs_to(self.id), "node not stamped with its list");
            walked += 1;
            last = Some(node);
        }
        assert_eq!(walked, self.count);
        assert_eq!(last, self.tail);
        assert_eq!(self.count == 0, self.head.is_none());
        assert_eq!(self.count == 0, self.tail.is_none());
        if self.count == 1 {
            assert_eq!(self.head, self.tail);
        }
    }
}

impl<T> Link for SingleList<T> {
    type Target = SingleNode<T>;

    fn next(&self) -> Option<NonNull<SingleNode<T>>> {
        self.head
    }

    fn set_next(&mut self, next: Option<NonNull<SingleNode<T>>>) {
        self.head = next;
    }
}

impl<T> List for SingleList<T> {
    fn head_ptr(&self) -> Option<NonNull<SingleNode<T>>> {
        self.head
    }

    fn tail_ptr(&self) -> Option<NonNull<SingleNode<T>>> {
        self.tail
    }

    fn count(&self) -> usize {
        self.count
    }
}

impl<T> Default for SingleList<T> {
    fn default() -> Self {
        Self::new(Methods::default())
    }
}

impl<T> Drop for SingleList<T> {
    fn drop(&mut self) {
        let released = self.clear();
        if released > 0 {
            debug!(list = self.id.get(), released, "dropped list");
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SingleList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a SingleList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, SingleNode<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
