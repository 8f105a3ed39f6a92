//! Linked List Data Structure
//!
//! A doubly-linked chain whose nodes live in a
//! [`GenerationalArena`](super::storage::GenerationalArena). The chain owns the
//! arena, so the lifetime and ownership problems of a pointer-based list are
//! solved by handles instead of references, and nodes enjoy the memory
//! locality of a single vector.
//!
//! The chain only knows about links. Cursor bookkeeping and disposal are the
//! business of [`Sequence`](crate::sequence::Sequence), which is built on top
//! of it.

use std::fmt;

use super::storage::{Arena, ArenaPtr, GenerationalArena, GenerationalPtr};

/// A handle to a node of a [`Chain`].
pub type LinkPtr<T> = GenerationalPtr<Link<T>>;

/// The error type for the linked list operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkedListError<N> {
    /// The position node is not (or no longer) in this chain.
    PositionNodeNotInChain(N),
}

/// A node in the chain.
pub struct Link<T> {
    data: T,
    prev: Option<LinkPtr<T>>,
    next: Option<LinkPtr<T>>,
}

/// A doubly-linked chain of nodes stored in an arena.
///
/// The [`None`]-ness of the head and tail is always consistent: both are
/// [`None`] exactly when the chain is empty.
pub struct Chain<T> {
    nodes: GenerationalArena<Link<T>>,
    head: Option<LinkPtr<T>>,
    tail: Option<LinkPtr<T>>,
}

impl<T> Default for Chain<T> {
    fn default() -> Self {
        Self {
            nodes: GenerationalArena::default(),
            head: None,
            tail: None,
        }
    }
}

impl<T> Chain<T> {
    pub fn new() -> Self { Self::default() }

    pub fn head(&self) -> Option<LinkPtr<T>> { self.head }

    pub fn tail(&self) -> Option<LinkPtr<T>> { self.tail }

    pub fn len(&self) -> usize { self.nodes.len() }

    pub fn is_empty(&self) -> bool { self.head.is_none() }

    /// If the node is currently linked into this chain.
    pub fn contains(&self, node: LinkPtr<T>) -> bool { node.try_deref(&self.nodes).is_some() }

    pub fn next(&self, node: LinkPtr<T>) -> Option<LinkPtr<T>> {
        node.try_deref(&self.nodes).and_then(|link| link.next)
    }

    pub fn prev(&self, node: LinkPtr<T>) -> Option<LinkPtr<T>> {
        node.try_deref(&self.nodes).and_then(|link| link.prev)
    }

    pub fn get(&self, node: LinkPtr<T>) -> Option<&T> {
        node.try_deref(&self.nodes).map(|link| &link.data)
    }

    pub fn get_mut(&mut self, node: LinkPtr<T>) -> Option<&mut T> {
        node.try_deref_mut(&mut self.nodes)
            .map(|link| &mut link.data)
    }

    fn set_next(&mut self, node: LinkPtr<T>, next: Option<LinkPtr<T>>) {
        if let Some(link) = node.try_deref_mut(&mut self.nodes) {
            link.next = next;
        }
    }

    fn set_prev(&mut self, node: LinkPtr<T>, prev: Option<LinkPtr<T>>) {
        if let Some(link) = node.try_deref_mut(&mut self.nodes) {
            link.prev = prev;
        }
    }

    /// Allocate a node between `prev` and `next` and wire up both neighbours.
    fn link_between(
        &mut self,
        prev: Option<LinkPtr<T>>,
        next: Option<LinkPtr<T>>,
        data: T,
    ) -> LinkPtr<T> {
        let node = self.nodes.alloc(Link { data, prev, next });

        match prev {
            Some(prev) => self.set_next(prev, Some(node)),
            None => self.head = Some(node),
        }
        match next {
            Some(next) => self.set_prev(next, Some(node)),
            None => self.tail = Some(node),
        }

        node
    }

    /// Push a node to the front of the chain.
    ///
    /// If the chain is empty, the head and tail will both be the new node.
    pub fn push_front(&mut self, data: T) -> LinkPtr<T> { self.link_between(None, self.head, data) }

    /// Push a node to the back of the chain.
    ///
    /// If the chain is empty, the head and tail will both be the new node.
    pub fn push_back(&mut self, data: T) -> LinkPtr<T> { self.link_between(self.tail, None, data) }

    /// Insert a node before `pos`.
    ///
    /// If `pos` is the head, the head will be updated to the new node.
    ///
    /// # Returns
    ///
    /// - [`Ok`] with the new node if the operation is successful.
    /// - [`LinkedListError::PositionNodeNotInChain`] if `pos` is not linked
    ///   into this chain. `data` is handed back alongside the error.
    pub fn insert_before(
        &mut self,
        pos: LinkPtr<T>,
        data: T,
    ) -> Result<LinkPtr<T>, (LinkedListError<LinkPtr<T>>, T)> {
        match pos.try_deref(&self.nodes) {
            Some(link) => {
                let prev = link.prev;
                Ok(self.link_between(prev, Some(pos), data))
            }
            None => Err((LinkedListError::PositionNodeNotInChain(pos), data)),
        }
    }

    /// Unlink a node and free it, returning its data.
    ///
    /// Head and tail are moved to the neighbours when the node was at either
    /// end. Returns [`None`] if the node is not in this chain.
    pub fn unlink(&mut self, node: LinkPtr<T>) -> Option<T> {
        let Link { data, prev, next } = self.nodes.try_dealloc(node)?;

        match prev {
            Some(prev) => self.set_next(prev, next),
            None => self.head = next,
        }
        match next {
            Some(next) => self.set_prev(next, prev),
            None => self.tail = prev,
        }

        Some(data)
    }

    /// Create a double-ended iterator over the data, head to tail.
    pub fn iter(&self) -> LinkedListIterator<'_, T> {
        LinkedListIterator {
            chain: self,
            curr_forward: self.head,
            curr_backward: self.tail,
            remaining: self.len(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Chain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.debug_list().entries(self.iter()).finish() }
}

/// A double-ended iterator for the chain.
///
/// This is a double-ended iterator, and can be reversed by calling
/// [`rev`](Iterator::rev). The two ends never cross.
pub struct LinkedListIterator<'a, T> {
    chain: &'a Chain<T>,
    curr_forward: Option<LinkPtr<T>>,
    curr_backward: Option<LinkPtr<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for LinkedListIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let curr = self.curr_forward?;
        self.remaining -= 1;
        self.curr_forward = self.chain.next(curr);
        self.chain.get(curr)
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.remaining, Some(self.remaining)) }
}

impl<'a, T> DoubleEndedIterator for LinkedListIterator<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let curr = self.curr_backward?;
        self.remaining -= 1;
        self.curr_backward = self.chain.prev(curr);
        self.chain.get(curr)
    }
}

impl<'a, T> ExactSizeIterator for LinkedListIterator<'a, T> {}
