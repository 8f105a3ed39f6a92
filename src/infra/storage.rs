//! Storage Infrastructure
//!
//! This module provides the [`Arena`] and [`ArenaPtr`] traits together with a
//! generational implementation, [`GenerationalArena`] and [`GenerationalPtr`].
//!
//! Nodes of a [`Sequence`](crate::sequence::Sequence) live in an arena and
//! refer to each other through pointers. Every slot carries a generation that
//! is bumped on de-allocation, so a pointer kept across the removal of its
//! slot can never be mistaken for whatever is stored there next.

use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::{fmt, mem};

/// A trait for indexing into an arena.
pub trait ArenaPtr: Copy + Eq + Hash {
    /// The arena type, which should support the pointer type.
    type Arena: Arena<Self>;

    /// The internal data.
    type Data;

    /// Try to dereference the pointer with an arena.
    ///
    /// # Returns
    ///
    /// - `Some(&Self::Data)`: A reference to the data in the arena.
    /// - `None`: The pointer is stale or was never allocated by this arena.
    fn try_deref(self, arena: &Self::Arena) -> Option<&Self::Data> { arena.try_deref(self) }

    /// Try to mutably dereference the pointer with an arena.
    fn try_deref_mut(self, arena: &mut Self::Arena) -> Option<&mut Self::Data> {
        arena.try_deref_mut(self)
    }
}

/// A trait for an arena that can store data and allocate pointers.
///
/// # Type Parameters
///
/// - `Ptr`: The pointer type that is supported by the arena. The data type is
///   inferred from the pointer type by using [`ArenaPtr::Data`].
pub trait Arena<Ptr>
where
    Ptr: ArenaPtr<Arena = Self>,
{
    /// Store data into the arena and return the allocated pointer.
    fn alloc(&mut self, data: Ptr::Data) -> Ptr;

    /// Deallocate the data of the pointer from the arena.
    ///
    /// # Returns
    ///
    /// - `Some(Ptr::Data)`: The data of the deallocated pointer.
    /// - `None`: The pointer is stale.
    fn try_dealloc(&mut self, ptr: Ptr) -> Option<Ptr::Data>;

    /// Try to dereference a pointer.
    fn try_deref(&self, ptr: Ptr) -> Option<&Ptr::Data>;

    /// Try to mutably dereference a pointer.
    fn try_deref_mut(&mut self, ptr: Ptr) -> Option<&mut Ptr::Data>;
}

/// A generational arena pointer.
///
/// The pointer can only be allocated by [`GenerationalArena`]. It pairs a raw
/// slot index with the generation the slot had when the pointer was handed
/// out.
pub struct GenerationalPtr<Data> {
    index: usize,
    generation: u32,
    _phantom: PhantomData<fn() -> Data>,
}

impl<Data> GenerationalPtr<Data> {
    fn new(index: usize, generation: u32) -> Self {
        Self {
            index,
            generation,
            _phantom: PhantomData,
        }
    }

    /// The raw slot index.
    pub fn index(self) -> usize { self.index }

    /// The generation of the slot at allocation time.
    pub fn generation(self) -> u32 { self.generation }
}

impl<Data> Clone for GenerationalPtr<Data> {
    fn clone(&self) -> Self { *self }
}

impl<Data> Copy for GenerationalPtr<Data> {}

impl<Data> Hash for GenerationalPtr<Data> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.generation.hash(state);
    }
}

impl<Data> PartialEq for GenerationalPtr<Data> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}

impl<Data> Eq for GenerationalPtr<Data> {}

impl<Data> fmt::Debug for GenerationalPtr<Data> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "*{}@{}", self.index, self.generation)
    }
}

impl<Data> fmt::Display for GenerationalPtr<Data> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "*{}@{}", self.index, self.generation)
    }
}

/// An entry in a generational arena.
enum Entry<Data> {
    /// The entry is vacant.
    ///
    /// The free list is ordered by de-allocation, the last deallocated entry
    /// will be the first one reused.
    Vacant {
        /// The index of the next vacant entry.
        next: Option<usize>,
        /// The generation the next occupant will get.
        generation: u32,
    },
    /// The entry is occupied.
    Occupied { generation: u32, data: Data },
}

/// A generational arena.
///
/// # Examples
///
/// ```
/// use keepers::infra::storage::{Arena, ArenaPtr, GenerationalArena};
///
/// let mut arena = GenerationalArena::default();
///
/// let one = arena.alloc(1);
/// assert_eq!(one.try_deref(&arena), Some(&1));
///
/// assert_eq!(arena.try_dealloc(one), Some(1));
/// let two = arena.alloc(2); // reuses the slot
///
/// assert_eq!(one.index(), two.index());
/// assert_eq!(one.try_deref(&arena), None); // but the old pointer is stale
/// assert_eq!(two.try_deref(&arena), Some(&2));
/// ```
pub struct GenerationalArena<Data> {
    entries: Vec<Entry<Data>>,
    /// The head of the free list.
    free_head: Option<usize>,
    len: usize,
}

impl<Data> Default for GenerationalArena<Data> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            free_head: None,
            len: 0,
        }
    }
}

impl<Data> GenerationalArena<Data> {
    /// Number of occupied slots.
    pub fn len(&self) -> usize { self.len }

    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Iterate over the stored data in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Data> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Occupied { data, .. } => Some(data),
            Entry::Vacant { .. } => None,
        })
    }
}

impl<Data> ArenaPtr for GenerationalPtr<Data> {
    type Arena = GenerationalArena<Data>;
    type Data = Data;
}

impl<Data> Arena<GenerationalPtr<Data>> for GenerationalArena<Data> {
    fn alloc(&mut self, data: Data) -> GenerationalPtr<Data> {
        self.len += 1;
        match self.free_head.take() {
            Some(index) => {
                let entry = &mut self.entries[index];
                let generation = match *entry {
                    Entry::Vacant { next, generation } => {
                        self.free_head = next;
                        generation
                    }
                    // we have a `free_head`, this entry should be vacant
                    Entry::Occupied { .. } => unreachable!(),
                };
                *entry = Entry::Occupied { generation, data };
                GenerationalPtr::new(index, generation)
            }
            None => {
                let index = self.entries.len();
                self.entries.push(Entry::Occupied {
                    generation: 0,
                    data,
                });
                GenerationalPtr::new(index, 0)
            }
        }
    }

    fn try_dealloc(&mut self, ptr: GenerationalPtr<Data>) -> Option<Data> {
        let entry = self.entries.get_mut(ptr.index)?;
        match entry {
            Entry::Occupied { generation, .. } if *generation == ptr.generation => {}
            _ => return None,
        }
        let old_entry = mem::replace(
            entry,
            Entry::Vacant {
                next: self.free_head,
                generation: ptr.generation.wrapping_add(1),
            },
        );
        self.free_head = Some(ptr.index);
        self.len -= 1;
        match old_entry {
            Entry::Occupied { data, .. } => Some(data),
            Entry::Vacant { .. } => unreachable!(),
        }
    }

    fn try_deref(&self, ptr: GenerationalPtr<Data>) -> Option<&Data> {
        match self.entries.get(ptr.index)? {
            Entry::Occupied { generation, data } if *generation == ptr.generation => Some(data),
            _ => None,
        }
    }

    fn try_deref_mut(&mut self, ptr: GenerationalPtr<Data>) -> Option<&mut Data> {
        match self.entries.get_mut(ptr.index)? {
            Entry::Occupied { generation, data } if *generation == ptr.generation => Some(data),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_reuse_bumps_generation() {
        let mut arena = GenerationalArena::default();
        let a = arena.alloc("a");
        let b = arena.alloc("b");
        let c = arena.alloc("c");
        assert_eq!(arena.len(), 3);
        assert_eq!(arena.try_dealloc(b), Some("b"));
        assert_eq!(arena.iter().copied().collect::<String>(), "ac");

        let d = arena.alloc("d");
        assert_eq!(b.index(), d.index());
        assert_ne!(b, d);
        assert_eq!((b.generation(), d.generation()), (0, 1));
        assert_eq!(arena.iter().copied().collect::<String>(), "adc");
        assert_eq!(format!("{} {:?}", a, d), "*0@0 *1@1");
        assert_eq!(c.try_deref(&arena), Some(&"c"));
    }

    #[test]
    fn test_dealloc_twice() {
        let mut arena = GenerationalArena::default();
        let node = arena.alloc(7u8);
        assert_eq!(arena.try_dealloc(node), Some(7));
        assert_eq!(arena.try_dealloc(node), None);
        assert!(arena.is_empty());
    }

    #[test]
    fn test_stale_pointer_misses_new_occupant() {
        let mut arena = GenerationalArena::default();
        let old = arena.alloc(String::from("old"));
        arena.try_dealloc(old);
        let new = arena.alloc(String::from("new"));
        assert_eq!(old.try_deref(&arena), None);
        assert_eq!(old.try_deref_mut(&mut arena), None);
        assert_eq!(arena.try_dealloc(old), None);
        new.try_deref_mut(&mut arena).unwrap().push('!');
        assert_eq!(new.try_deref(&arena).map(String::as_str), Some("new!"));
    }

    #[test]
    fn test_generational_arena_free_list_order() {
        let mut arena = GenerationalArena::default();
        let a = arena.alloc('a');
        let b = arena.alloc('b');
        arena.try_dealloc(a);
        arena.try_dealloc(b);
        // last deallocated is reused first
        assert_eq!(arena.alloc('c').index(), b.index());
        assert_eq!(arena.alloc('d').index(), a.index());
        assert_eq!(arena.len(), 2);
    }
}
