//! Sequence Engine
//!
//! [`Sequence`] is an owning doubly-linked list with one shared traversal
//! cursor. The cursor is part of the sequence's own state: every operation
//! that moves or removes nodes repairs it, so it always refers to a linked
//! node, or is unset exactly when the sequence is empty.
//!
//! Because there is only one cursor, interleaving two traversals over the same
//! sequence makes them observe each other's moves. Use [`Sequence::iter`] for
//! read-only traversal that leaves the cursor alone.
//!
//! # Example
//!
//! ```
//! use keepers::sequence::Sequence;
//!
//! let mut seq = Sequence::default();
//! seq.prepend('a');
//! seq.append('b');
//! seq.insert_before(&'b', 'c').unwrap();
//!
//! assert_eq!(seq.iterator_begin(), Some(&'a'));
//! assert_eq!(seq.iterator_next(), Some(&'c'));
//! assert_eq!(seq.iterator_next(), Some(&'b'));
//! assert_eq!(seq.iterator_next(), None);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use tracing::trace;

use crate::dispose::{Dispose, DropDisposer};
use crate::error::{ContainerError, Rejected};
use crate::infra::linked_list::{Chain, LinkPtr, LinkedListIterator};

/// A token naming one element of a [`Sequence`].
///
/// Obtained from [`Sequence::position`]. Once the element is removed the
/// token is stale, and [`Sequence::seek`] reports
/// [`ContainerError::StalePosition`] instead of landing on whatever element
/// reuses the storage.
pub struct Position<T>(LinkPtr<T>);

impl<T> Clone for Position<T> {
    fn clone(&self) -> Self { *self }
}

impl<T> Copy for Position<T> {}

impl<T> PartialEq for Position<T> {
    fn eq(&self, other: &Self) -> bool { self.0 == other.0 }
}

impl<T> Eq for Position<T> {}

impl<T> Hash for Position<T> {
    fn hash<H: Hasher>(&self, state: &mut H) { self.0.hash(state) }
}

impl<T> fmt::Debug for Position<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Position({})", self.0) }
}

/// An owning doubly-linked list with a shared cursor.
///
/// Elements are moved in and handed to the disposer `D` exactly once when
/// they are removed, or when the sequence is torn down.
///
/// # Type Parameters
///
/// - `T`: The element type.
/// - `D`: The disposer, [`DropDisposer`] by default.
pub struct Sequence<T, D = DropDisposer>
where
    D: Dispose<T>,
{
    chain: Chain<T>,
    cursor: Option<LinkPtr<T>>,
    disposer: D,
}

impl<T> Default for Sequence<T, DropDisposer> {
    fn default() -> Self { Self::new(DropDisposer) }
}

impl<T, D> Sequence<T, D>
where
    D: Dispose<T>,
{
    /// Create an empty sequence bound to `disposer`.
    pub fn new(disposer: D) -> Self {
        Self {
            chain: Chain::new(),
            cursor: None,
            disposer,
        }
    }

    /// Tear the sequence down, disposing every element from the tail.
    pub fn destroy(self) { drop(self) }

    /// Dispose every element from the tail and leave the sequence empty.
    pub fn clear(&mut self) {
        trace!(len = self.chain.len(), "clearing sequence");
        while self.remove_last().is_ok() {}
    }

    pub fn len(&self) -> usize { self.chain.len() }

    pub fn is_empty(&self) -> bool { self.chain.is_empty() }

    /// Link `element` at the tail.
    ///
    /// If the sequence was empty, the cursor is set to the new node.
    pub fn append(&mut self, element: T) {
        let node = self.chain.push_back(element);
        if self.cursor.is_none() {
            self.cursor = Some(node);
        }
    }

    /// Link `element` at the head.
    ///
    /// If the sequence was empty, the cursor is set to the new node.
    pub fn prepend(&mut self, element: T) {
        let node = self.chain.push_front(element);
        if self.cursor.is_none() {
            self.cursor = Some(node);
        }
    }

    /// Remove and dispose the first element.
    ///
    /// A cursor on the removed node moves to the new head, or becomes unset if
    /// the sequence is now empty.
    pub fn remove_first(&mut self) -> Result<(), ContainerError> {
        let head = self.chain.head().ok_or(ContainerError::EmptyContainer)?;
        if self.cursor == Some(head) {
            self.cursor = self.chain.next(head);
        }
        self.dispose_node(head);
        Ok(())
    }

    /// Remove and dispose the last element.
    ///
    /// A cursor on the removed node moves to the new tail, or becomes unset if
    /// the sequence is now empty.
    pub fn remove_last(&mut self) -> Result<(), ContainerError> {
        let tail = self.chain.tail().ok_or(ContainerError::EmptyContainer)?;
        if self.cursor == Some(tail) {
            self.cursor = self.chain.prev(tail);
        }
        self.dispose_node(tail);
        Ok(())
    }

    /// Insert `element` before the first element equal to `anchor`.
    ///
    /// See [`insert_before_by`](Self::insert_before_by).
    pub fn insert_before(&mut self, anchor: &T, element: T) -> Result<(), Rejected<T>>
    where
        T: PartialEq,
    {
        self.insert_before_by(anchor, element, equality)
    }

    /// Insert `element` before the first element matching `probe`.
    ///
    /// The search starts at the head, and `cmp` reports a match by returning
    /// [`Ordering::Equal`]. The cursor is restored to where it was before the
    /// call.
    ///
    /// # Returns
    ///
    /// - [`Ok`] if the element was inserted.
    /// - [`ContainerError::ItemNotFound`] with the element handed back if
    ///   nothing matched.
    pub fn insert_before_by<Q, C>(
        &mut self,
        probe: &Q,
        element: T,
        cmp: C,
    ) -> Result<(), Rejected<T>>
    where
        Q: ?Sized,
        C: FnMut(&Q, &T) -> Ordering,
    {
        let saved = self.cursor;
        self.cursor = self.chain.head();

        let result = match self.search_from_by(probe, cmp) {
            Ok(()) => {
                self.iterator_insert_before(element);
                Ok(())
            }
            Err(kind) => Err(Rejected::new(kind, element)),
        };

        // insertion never unlinks, so the saved cursor is still valid
        self.cursor = saved;
        result
    }

    /// Remove the first element equal to `probe`.
    ///
    /// See [`remove_by`](Self::remove_by).
    pub fn remove(&mut self, probe: &T) -> Result<(), ContainerError>
    where
        T: PartialEq,
    {
        self.remove_by(probe, equality)
    }

    /// Remove and dispose the first element matching `probe`.
    ///
    /// The search starts at the head. The cursor is restored to where it was
    /// before the call, unless the cursor was on the removed node, in which
    /// case it is repaired as by [`iterator_remove`](Self::iterator_remove).
    pub fn remove_by<Q, C>(&mut self, probe: &Q, cmp: C) -> Result<(), ContainerError>
    where
        Q: ?Sized,
        C: FnMut(&Q, &T) -> Ordering,
    {
        let saved = self.cursor;
        self.cursor = self.chain.head();

        if let Err(err) = self.search_from_by(probe, cmp) {
            self.cursor = saved;
            return Err(err);
        }

        let target = self.cursor;
        self.iterator_remove()?;

        if saved != target {
            self.cursor = saved;
        }
        Ok(())
    }

    /// Move the cursor to the head and return its element.
    pub fn iterator_begin(&mut self) -> Option<&T> {
        self.cursor = self.chain.head();
        self.iterator_current()
    }

    /// Move the cursor to the tail and return its element.
    pub fn iterator_end(&mut self) -> Option<&T> {
        self.cursor = self.chain.tail();
        self.iterator_current()
    }

    /// Advance the cursor one node toward the tail.
    ///
    /// Returns [`None`] without moving if the cursor is already at the tail.
    pub fn iterator_next(&mut self) -> Option<&T> {
        let next = self.chain.next(self.cursor?)?;
        self.cursor = Some(next);
        self.chain.get(next)
    }

    /// Move the cursor one node toward the head.
    ///
    /// Returns [`None`] without moving if the cursor is already at the head.
    pub fn iterator_prev(&mut self) -> Option<&T> {
        let prev = self.chain.prev(self.cursor?)?;
        self.cursor = Some(prev);
        self.chain.get(prev)
    }

    pub fn iterator_current(&self) -> Option<&T> { self.chain.get(self.cursor?) }

    pub fn iterator_current_mut(&mut self) -> Option<&mut T> { self.chain.get_mut(self.cursor?) }

    /// Walk the cursor forward from its current node until `probe` equals an
    /// element.
    ///
    /// See [`search_from_by`](Self::search_from_by).
    pub fn search_from(&mut self, probe: &T) -> Result<(), ContainerError>
    where
        T: PartialEq,
    {
        self.search_from_by(probe, equality)
    }

    /// Walk the cursor forward from its current node, inclusive, until `cmp`
    /// returns [`Ordering::Equal`].
    ///
    /// # Returns
    ///
    /// - [`Ok`] with the cursor left on the match.
    /// - [`ContainerError::ItemNotFound`] with the cursor moved to the tail.
    pub fn search_from_by<Q, C>(&mut self, probe: &Q, mut cmp: C) -> Result<(), ContainerError>
    where
        Q: ?Sized,
        C: FnMut(&Q, &T) -> Ordering,
    {
        let mut curr = self.cursor;
        while let Some(node) = curr {
            if let Some(element) = self.chain.get(node) {
                if cmp(probe, element) == Ordering::Equal {
                    self.cursor = Some(node);
                    return Ok(());
                }
            }
            curr = self.chain.next(node);
        }
        self.cursor = self.chain.tail();
        Err(ContainerError::ItemNotFound)
    }

    /// Insert `element` immediately before the cursor.
    ///
    /// The cursor stays on its node, so the new element is not visited by a
    /// following [`iterator_next`](Self::iterator_next). On an empty sequence
    /// this behaves like [`prepend`](Self::prepend).
    pub fn iterator_insert_before(&mut self, element: T) {
        match self.cursor {
            Some(cursor) => {
                // the cursor always refers to a linked node
                self.chain
                    .insert_before(cursor, element)
                    .unwrap_or_else(|_| unreachable!());
            }
            None => self.prepend(element),
        }
    }

    /// Remove and dispose the element under the cursor.
    ///
    /// The cursor moves to the following node, or to the preceding one if the
    /// removed node was the tail.
    pub fn iterator_remove(&mut self) -> Result<(), ContainerError> {
        let cursor = self.cursor.ok_or(ContainerError::EmptyContainer)?;
        if self.chain.head() == Some(cursor) {
            return self.remove_first();
        }
        if self.chain.tail() == Some(cursor) {
            return self.remove_last();
        }
        self.cursor = self
            .chain
            .next(cursor)
            .or_else(|| self.chain.prev(cursor));
        self.dispose_node(cursor);
        Ok(())
    }

    pub fn first(&self) -> Option<&T> { self.chain.get(self.chain.head()?) }

    pub fn last(&self) -> Option<&T> { self.chain.get(self.chain.tail()?) }

    pub fn first_mut(&mut self) -> Option<&mut T> { self.chain.get_mut(self.chain.head()?) }

    pub fn last_mut(&mut self) -> Option<&mut T> { self.chain.get_mut(self.chain.tail()?) }

    /// The position of the cursor, if it is set.
    pub fn position(&self) -> Option<Position<T>> { self.cursor.map(Position) }

    /// Move the cursor to `position`.
    pub fn seek(&mut self, position: Position<T>) -> Result<&T, ContainerError> {
        if !self.chain.contains(position.0) {
            return Err(ContainerError::StalePosition);
        }
        self.cursor = Some(position.0);
        self.chain
            .get(position.0)
            .ok_or(ContainerError::StalePosition)
    }

    /// Look up the element at `position` without moving the cursor.
    pub fn get(&self, position: Position<T>) -> Option<&T> { self.chain.get(position.0) }

    /// Iterate head to tail without touching the cursor.
    pub fn iter(&self) -> LinkedListIterator<'_, T> { self.chain.iter() }

    fn dispose_node(&mut self, node: LinkPtr<T>) {
        if let Some(element) = self.chain.unlink(node) {
            self.disposer.dispose(element);
        }
        debug_assert_eq!(self.cursor.is_none(), self.chain.is_empty());
    }
}

/// The comparator used when the caller does not supply one.
fn equality<T: PartialEq>(probe: &T, element: &T) -> Ordering {
    if probe == element {
        Ordering::Equal
    } else {
        Ordering::Less
    }
}

impl<T, D> Drop for Sequence<T, D>
where
    D: Dispose<T>,
{
    fn drop(&mut self) {
        if !self.is_empty() {
            self.clear();
        }
    }
}

impl<T, D> Extend<T> for Sequence<T, D>
where
    D: Dispose<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.append(element);
        }
    }
}

impl<T, D> FromIterator<T> for Sequence<T, D>
where
    D: Dispose<T> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seq = Self::new(D::default());
        seq.extend(iter);
        seq
    }
}

impl<'a, T, D> IntoIterator for &'a Sequence<T, D>
where
    D: Dispose<T>,
{
    type Item = &'a T;
    type IntoIter = LinkedListIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl<T, D> fmt::Debug for Sequence<T, D>
where
    T: fmt::Debug,
    D: Dispose<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("elements", &self.chain)
            .field("cursor", &self.iterator_current())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    /// A sequence whose disposer records every element it receives.
    fn recording<T: 'static>() -> (Sequence<T, impl FnMut(T)>, Rc<RefCell<Vec<T>>>) {
        let disposed = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&disposed);
        let seq = Sequence::new(move |element: T| log.borrow_mut().push(element));
        (seq, disposed)
    }

    fn collect<T: Copy, D: Dispose<T>>(seq: &Sequence<T, D>) -> Vec<T> {
        seq.iter().copied().collect()
    }

    #[test]
    fn test_append_prepend_cursor() {
        let mut seq = Sequence::default();
        seq.append(2);
        assert_eq!(seq.iterator_current(), Some(&2));
        seq.prepend(1);
        seq.append(3);
        // the cursor stays on the first node ever linked
        assert_eq!(seq.iterator_current(), Some(&2));
        assert_eq!(collect(&seq), vec![1, 2, 3]);
        assert_eq!(seq.first(), Some(&1));
        assert_eq!(seq.last(), Some(&3));
    }

    #[test]
    fn test_iterate_both_ways() {
        let mut seq: Sequence<i32> = (1..=4).collect();

        let mut forward = Vec::new();
        let mut curr = seq.iterator_begin().copied();
        while let Some(v) = curr {
            forward.push(v);
            curr = seq.iterator_next().copied();
        }
        assert_eq!(forward, vec![1, 2, 3, 4]);
        // at the tail, next does not move
        assert_eq!(seq.iterator_current(), Some(&4));

        let mut backward = Vec::new();
        let mut curr = seq.iterator_end().copied();
        while let Some(v) = curr {
            backward.push(v);
            curr = seq.iterator_prev().copied();
        }
        assert_eq!(backward, vec![4, 3, 2, 1]);
        assert_eq!(seq.iterator_current(), Some(&1));
    }

    #[test]
    fn test_remove_first_disposes_each_once() {
        let (mut seq, disposed) = recording();
        seq.extend(["a", "b", "c"]);
        for _ in 0..3 {
            assert_eq!(seq.remove_first(), Ok(()));
        }
        assert_eq!(seq.remove_first(), Err(ContainerError::EmptyContainer));
        assert_eq!(*disposed.borrow(), vec!["a", "b", "c"]);
        assert_eq!(seq.iterator_current(), None);
    }

    #[test]
    fn test_remove_repoints_cursor() {
        let mut seq: Sequence<i32> = (1..=3).collect();
        assert_eq!(seq.iterator_begin(), Some(&1));
        seq.remove_first().unwrap();
        assert_eq!(seq.iterator_current(), Some(&2));

        assert_eq!(seq.iterator_end(), Some(&3));
        seq.remove_last().unwrap();
        assert_eq!(seq.iterator_current(), Some(&2));

        seq.remove_last().unwrap();
        assert_eq!(seq.iterator_current(), None);
        assert_eq!(seq.first(), None);
        assert_eq!(seq.last(), None);
        assert!(seq.is_empty());
    }

    #[test]
    fn test_remove_single() {
        let mut seq = Sequence::default();
        seq.append('x');
        seq.remove_first().unwrap();
        assert_eq!(seq.iterator_begin(), None);
        assert_eq!(seq.first(), None);
        assert_eq!(seq.last(), None);
        assert_eq!(seq.remove_first(), Err(ContainerError::EmptyContainer));
    }

    #[test]
    fn test_insert_before() {
        let mut seq = Sequence::default();
        seq.prepend('A');
        seq.append('B');
        seq.insert_before(&'B', 'C').unwrap();
        assert_eq!(seq.iter().collect::<String>(), "ACB");

        seq.insert_before(&'A', 'Z').unwrap();
        assert_eq!(seq.iter().collect::<String>(), "ZACB");
        assert_eq!(seq.first(), Some(&'Z'));

        let rejected = seq.insert_before(&'Q', 'R').unwrap_err();
        assert_eq!(rejected.kind, ContainerError::ItemNotFound);
        assert_eq!(rejected.element, 'R');
        assert_eq!(seq.len(), 4);
    }

    #[test]
    fn test_insert_before_restores_cursor() {
        let mut seq: Sequence<i32> = (1..=3).collect();
        seq.iterator_end();
        seq.insert_before(&2, 10).unwrap();
        assert_eq!(seq.iterator_current(), Some(&3));
        seq.insert_before(&99, 11).unwrap_err();
        assert_eq!(seq.iterator_current(), Some(&3));
        assert_eq!(collect(&seq), vec![1, 10, 2, 3]);
    }

    #[test]
    fn test_insert_before_empty() {
        let mut seq: Sequence<i32> = Sequence::default();
        let rejected = seq.insert_before(&1, 2).unwrap_err();
        assert_eq!(rejected, ContainerError::ItemNotFound);
        assert!(seq.is_empty());
    }

    #[test]
    fn test_remove_by_comparator() {
        #[derive(Debug, PartialEq)]
        struct Employee {
            id: u32,
            name: &'static str,
        }

        let (mut seq, disposed) = recording();
        seq.append(Employee { id: 1, name: "ann" });
        seq.append(Employee { id: 2, name: "bob" });
        seq.append(Employee { id: 3, name: "cat" });

        let by_id = |id: &u32, e: &Employee| id.cmp(&e.id);
        assert_eq!(seq.remove_by(&2, by_id), Ok(()));
        assert_eq!(seq.remove_by(&7, by_id), Err(ContainerError::ItemNotFound));

        let names: Vec<_> = seq.iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["ann", "cat"]);
        assert_eq!(disposed.borrow().len(), 1);
        assert_eq!(disposed.borrow()[0].name, "bob");
    }

    #[test]
    fn test_remove_keeps_cursor_elsewhere() {
        let mut seq: Sequence<i32> = (1..=5).collect();
        seq.iterator_end();
        seq.remove(&3).unwrap();
        assert_eq!(seq.iterator_current(), Some(&5));
        seq.remove(&1).unwrap();
        assert_eq!(seq.iterator_current(), Some(&5));
        assert_eq!(collect(&seq), vec![2, 4, 5]);
        // a failed search leaves the cursor where it was
        seq.iterator_begin();
        assert_eq!(seq.remove(&42), Err(ContainerError::ItemNotFound));
        assert_eq!(seq.iterator_current(), Some(&2));
    }

    #[test]
    fn test_remove_under_cursor_repairs() {
        let mut seq: Sequence<i32> = (1..=4).collect();
        seq.iterator_begin();
        seq.iterator_next();
        assert_eq!(seq.iterator_current(), Some(&2));
        seq.remove(&2).unwrap();
        assert_eq!(seq.iterator_current(), Some(&3));

        seq.iterator_end();
        seq.remove(&4).unwrap();
        assert_eq!(seq.iterator_current(), Some(&3));

        seq.iterator_begin();
        seq.remove(&1).unwrap();
        assert_eq!(seq.iterator_current(), Some(&3));
    }

    #[test]
    fn test_search_from() {
        let mut seq: Sequence<i32> = vec![1, 2, 3, 2, 5].into_iter().collect();
        seq.iterator_begin();
        assert_eq!(seq.search_from(&2), Ok(()));
        assert_eq!(seq.iterator_current(), Some(&2));
        // inclusive: searching again stays put
        assert_eq!(seq.search_from(&2), Ok(()));
        seq.iterator_next();
        assert_eq!(seq.search_from(&2), Ok(()));
        assert_eq!(seq.iterator_next(), Some(&5));

        // nothing behind the cursor is visited
        seq.iterator_end();
        assert_eq!(seq.search_from(&1), Err(ContainerError::ItemNotFound));
        assert_eq!(seq.iterator_current(), Some(&5));

        seq.iterator_begin();
        assert_eq!(seq.search_from(&9), Err(ContainerError::ItemNotFound));
        assert_eq!(seq.iterator_current(), Some(&5));
    }

    #[test]
    fn test_iterator_insert_before() {
        let mut seq: Sequence<i32> = Sequence::default();
        seq.iterator_insert_before(2);
        assert_eq!(seq.iterator_current(), Some(&2));
        seq.iterator_insert_before(1);
        assert_eq!(seq.first(), Some(&1));
        assert_eq!(seq.iterator_current(), Some(&2));

        seq.append(4);
        seq.iterator_end();
        seq.iterator_insert_before(3);
        assert_eq!(seq.iterator_current(), Some(&4));
        assert_eq!(seq.iterator_prev(), Some(&3));
        assert_eq!(collect(&seq), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_iterator_remove() {
        let (mut seq, disposed) = recording();
        seq.extend(1..=4);

        assert_eq!(seq.iterator_begin(), Some(&1));
        seq.iterator_next();
        seq.iterator_remove().unwrap(); // interior: move to next
        assert_eq!(seq.iterator_current(), Some(&3));

        seq.iterator_end();
        seq.iterator_remove().unwrap(); // tail: move to new tail
        assert_eq!(seq.iterator_current(), Some(&3));

        seq.iterator_begin();
        seq.iterator_remove().unwrap(); // head: move to new head
        assert_eq!(seq.iterator_current(), Some(&3));

        seq.iterator_remove().unwrap();
        assert_eq!(seq.iterator_current(), None);
        assert_eq!(seq.iterator_remove(), Err(ContainerError::EmptyContainer));
        assert_eq!(*disposed.borrow(), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_positions() {
        let mut seq: Sequence<&str> = ["a", "b", "c"].into_iter().collect();
        seq.iterator_begin();
        seq.iterator_next();
        let b = seq.position().unwrap();

        seq.iterator_begin();
        assert_eq!(seq.get(b), Some(&"b"));
        assert_eq!(seq.seek(b), Ok(&"b"));
        assert_eq!(seq.iterator_current(), Some(&"b"));

        seq.remove(&"b").unwrap();
        seq.append("d"); // may reuse the storage of "b"
        assert_eq!(seq.get(b), None);
        assert_eq!(seq.seek(b), Err(ContainerError::StalePosition));
        assert_eq!(seq.iterator_current(), Some(&"c"));
    }

    #[test]
    fn test_current_mut() {
        let mut seq: Sequence<String> = Sequence::default();
        seq.append("a".to_string());
        seq.append("b".to_string());
        seq.iterator_current_mut().unwrap().push('!');
        seq.last_mut().unwrap().push('?');
        seq.first_mut().unwrap().push('.');
        assert_eq!(seq.iter().cloned().collect::<Vec<_>>(), vec!["a!.", "b?"]);
    }

    #[test]
    fn test_drop_disposes_from_tail() {
        let (mut seq, disposed) = recording();
        seq.extend(1..=3);
        seq.destroy();
        assert_eq!(*disposed.borrow(), vec![3, 2, 1]);
    }

    #[test]
    fn test_clear_then_reuse() {
        let (mut seq, disposed) = recording();
        seq.extend(1..=2);
        seq.clear();
        assert!(seq.is_empty());
        seq.append(9);
        assert_eq!(seq.iterator_current(), Some(&9));
        drop(seq);
        assert_eq!(*disposed.borrow(), vec![2, 1, 9]);
    }

    #[test]
    fn test_debug() {
        let mut seq: Sequence<i32> = (1..=2).collect();
        seq.iterator_end();
        assert_eq!(format!("{:?}", seq), "Sequence { elements: [1, 2], cursor: Some(2) }");
    }
}
