//! Array Engine
//!
//! [`Array`] is an owning contiguous buffer of elements stored by value. It
//! keeps its own capacity bookkeeping instead of delegating to [`Vec`],
//! because the growth policy and the state of unused memory are part of its
//! contract:
//!
//! - `len <= capacity` and `capacity >= 1` at all times;
//! - every byte past the last element, up to the end of the block, is zero;
//! - capacity only grows, by [`GROWTH_FACTOR`] times the required length when
//!   the block is full.
//!
//! Elements are handed to the disposer exactly once when they are overwritten,
//! removed or torn down.
//!
//! # Example
//!
//! ```
//! use keepers::array::Array;
//! use keepers::dispose::DropDisposer;
//!
//! let mut array = Array::with_capacity(1, DropDisposer).unwrap();
//! array.append(10u64).unwrap();
//! array.append(30).unwrap();
//! array.insert(20, 1).unwrap();
//!
//! assert_eq!(array.as_slice(), &[10, 20, 30]);
//! assert_eq!(array.capacity(), 4);
//!
//! array.remove(0).unwrap();
//! assert_eq!(array.as_slice(), &[20, 30]);
//! assert!(array.spare_bytes().iter().all(|&b| b == 0));
//! ```

use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};
use std::ptr::{self, NonNull};
use std::{fmt, mem, slice};

use tracing::{trace, warn};

use crate::dispose::{Dispose, DropDisposer};
use crate::error::{ContainerError, Rejected};

/// The multiplier applied to the required length whenever the block grows.
pub const GROWTH_FACTOR: usize = 2;

/// An owning, contiguous, growable array.
///
/// # Type Parameters
///
/// - `T`: The element type. Zero-sized types are rejected at creation.
/// - `D`: The disposer, [`DropDisposer`] by default.
pub struct Array<T, D = DropDisposer>
where
    D: Dispose<T>,
{
    /// Start of a block of `capacity` slots.
    ///
    /// Slots `[0, len)` hold elements, the bytes of the rest are zero.
    ptr: NonNull<T>,
    len: usize,
    capacity: usize,
    disposer: D,
    _marker: PhantomData<T>,
}

// SAFETY: the array uniquely owns its block, like `Vec<T>`.
unsafe impl<T: Send, D: Dispose<T> + Send> Send for Array<T, D> {}

// SAFETY: shared access only hands out `&T`.
unsafe impl<T: Sync, D: Dispose<T> + Sync> Sync for Array<T, D> {}

impl<T, D> Array<T, D>
where
    D: Dispose<T>,
{
    /// Allocate a zero-filled block of `capacity` slots.
    ///
    /// # Returns
    ///
    /// - [`ContainerError::InvalidArgument`] if `capacity` is zero or `T` is
    ///   zero-sized.
    /// - [`ContainerError::AllocationFailure`] if the block cannot be
    ///   allocated.
    pub fn with_capacity(capacity: usize, disposer: D) -> Result<Self, ContainerError> {
        if capacity < 1 || mem::size_of::<T>() == 0 {
            return Err(ContainerError::InvalidArgument);
        }
        let layout = Self::layout(capacity)?;
        // SAFETY: the layout has a non-zero size.
        let raw = unsafe { alloc::alloc_zeroed(layout) };
        let ptr = NonNull::new(raw.cast::<T>()).ok_or_else(|| {
            warn!(capacity, "array allocation failed");
            ContainerError::AllocationFailure
        })?;

        Ok(Self {
            ptr,
            len: 0,
            capacity,
            disposer,
            _marker: PhantomData,
        })
    }

    fn layout(capacity: usize) -> Result<Layout, ContainerError> {
        Layout::array::<T>(capacity).map_err(|_| ContainerError::AllocationFailure)
    }

    /// Tear the array down, disposing every element from the tail.
    pub fn destroy(self) { drop(self) }

    /// Grow the block to exactly `new_capacity` slots.
    ///
    /// Existing elements keep their offsets and the new slots are zero-filled.
    ///
    /// # Returns
    ///
    /// - [`ContainerError::InvalidArgument`] if `new_capacity` is not larger
    ///   than the current capacity.
    /// - [`ContainerError::AllocationFailure`] if the block cannot be grown.
    ///   The array is left untouched.
    pub fn grow_capacity(&mut self, new_capacity: usize) -> Result<(), ContainerError> {
        if new_capacity <= self.capacity {
            return Err(ContainerError::InvalidArgument);
        }
        let old_layout = Self::layout(self.capacity)?;
        let new_layout = Self::layout(new_capacity)?;

        // SAFETY: the block was allocated with `old_layout`, and the new size
        // is non-zero and fits in `isize` as checked by `Layout::array`.
        let raw = unsafe {
            alloc::realloc(self.ptr.as_ptr().cast(), old_layout, new_layout.size())
        };
        let Some(ptr) = NonNull::new(raw.cast::<T>()) else {
            warn!(
                from = self.capacity,
                to = new_capacity,
                "array capacity growth failed"
            );
            return Err(ContainerError::AllocationFailure);
        };

        // SAFETY: the slots `[capacity, new_capacity)` are inside the new block.
        unsafe {
            ptr::write_bytes(
                ptr.as_ptr().add(self.capacity),
                0,
                new_capacity - self.capacity,
            );
        }
        trace!(from = self.capacity, to = new_capacity, "grew array capacity");

        self.ptr = ptr;
        self.capacity = new_capacity;
        Ok(())
    }

    /// Grow for one more element if the block is full.
    fn reserve_one(&mut self) -> Result<(), ContainerError> {
        if self.len < self.capacity {
            return Ok(());
        }
        let required = self.len + 1;
        let new_capacity = required
            .checked_mul(GROWTH_FACTOR)
            .ok_or(ContainerError::AllocationFailure)?;
        self.grow_capacity(new_capacity)
    }

    /// Resize to `target` elements.
    ///
    /// The block first grows to `target * GROWTH_FACTOR` slots if `target`
    /// exceeds the capacity. Then elements are chopped from the tail, or
    /// clones of `fill` are appended, until the length is `target`.
    ///
    /// The disposer runs once per clone, so `fill` should not own resources
    /// that its clones share.
    ///
    /// # Returns
    ///
    /// - [`ContainerError::NullArgument`] if the array must get longer and
    ///   `fill` is [`None`].
    /// - [`ContainerError::InvalidArgument`] if `target` is zero.
    /// - [`ContainerError::AllocationFailure`] if the block cannot be grown.
    pub fn resize(&mut self, fill: Option<&T>, target: usize) -> Result<(), ContainerError>
    where
        T: Clone,
    {
        if fill.is_none() && self.len < target {
            return Err(ContainerError::NullArgument);
        }
        if target < 1 {
            return Err(ContainerError::InvalidArgument);
        }
        if target > self.capacity {
            let new_capacity = target
                .checked_mul(GROWTH_FACTOR)
                .ok_or(ContainerError::AllocationFailure)?;
            self.grow_capacity(new_capacity)?;
        }
        while self.len > target {
            self.chop()?;
        }
        if let Some(fill) = fill {
            while self.len < target {
                self.append(fill.clone()).map_err(ContainerError::from)?;
            }
        }
        Ok(())
    }

    pub fn capacity(&self) -> usize { self.capacity }

    pub fn len(&self) -> usize { self.len }

    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// The byte width of one slot.
    pub fn element_width(&self) -> usize { mem::size_of::<T>() }

    /// The base address of the block.
    pub fn as_ptr(&self) -> *const T { self.ptr.as_ptr() }

    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the first `len` slots are initialized.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: the first `len` slots are initialized and uniquely borrowed.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// The bytes of the unused slots `[len, capacity)`, all zero.
    pub fn spare_bytes(&self) -> &[u8] {
        let width = self.element_width();
        // SAFETY: the unused slots are inside the block and have been written
        // with zero bytes, so they are initialized as `u8`.
        unsafe {
            slice::from_raw_parts(
                self.ptr.as_ptr().add(self.len).cast::<u8>(),
                (self.capacity - self.len) * width,
            )
        }
    }

    pub fn get(&self, index: usize) -> Option<&T> { self.as_slice().get(index) }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    pub fn first(&self) -> Option<&T> { self.as_slice().first() }

    pub fn last(&self) -> Option<&T> { self.as_slice().last() }

    pub fn iter(&self) -> slice::Iter<'_, T> { self.as_slice().iter() }

    /// Overwrite the element at `index`, disposing the outgoing one.
    ///
    /// # Returns
    ///
    /// - [`ContainerError::OutOfBounds`] with the element handed back if
    ///   `index` is not below the length.
    pub fn set(&mut self, element: T, index: usize) -> Result<(), Rejected<T>> {
        match self.get_mut(index) {
            Some(slot) => {
                let outgoing = mem::replace(slot, element);
                self.disposer.dispose(outgoing);
                Ok(())
            }
            None => Err(Rejected::new(ContainerError::OutOfBounds, element)),
        }
    }

    /// Move `element` into the next free slot, growing the block if full.
    pub fn append(&mut self, element: T) -> Result<(), Rejected<T>> {
        if let Err(kind) = self.reserve_one() {
            return Err(Rejected::new(kind, element));
        }
        // SAFETY: `len < capacity` after reserving.
        unsafe { ptr::write(self.ptr.as_ptr().add(self.len), element) };
        self.len += 1;
        Ok(())
    }

    /// Dispose the last element and zero its slot.
    pub fn chop(&mut self) -> Result<(), ContainerError> {
        if self.len == 0 {
            return Err(ContainerError::EmptyContainer);
        }
        self.len -= 1;
        // SAFETY: the slot at the old `len - 1` holds an element, which is
        // moved out before its bytes are cleared.
        let element = unsafe {
            let slot = self.ptr.as_ptr().add(self.len);
            let element = ptr::read(slot);
            ptr::write_bytes(slot, 0, 1);
            element
        };
        self.disposer.dispose(element);
        Ok(())
    }

    /// Insert `element` at `index`, shifting `[index, len)` one slot toward
    /// the tail.
    ///
    /// `index` must address an existing element; use [`append`](Self::append)
    /// to add at the end.
    ///
    /// # Returns
    ///
    /// - [`ContainerError::OutOfBounds`] if `index` is not below the length.
    /// - [`ContainerError::AllocationFailure`] if the block is full and cannot
    ///   be grown.
    ///
    /// The element is handed back on either error.
    pub fn insert(&mut self, element: T, index: usize) -> Result<(), Rejected<T>> {
        if index >= self.len {
            return Err(Rejected::new(ContainerError::OutOfBounds, element));
        }
        if let Err(kind) = self.reserve_one() {
            return Err(Rejected::new(kind, element));
        }
        // SAFETY: `index < len < capacity`, so both ranges are inside the block.
        unsafe {
            let slot = self.ptr.as_ptr().add(index);
            ptr::copy(slot, slot.add(1), self.len - index);
            ptr::write(slot, element);
        }
        self.len += 1;
        Ok(())
    }

    /// Dispose the element at `index`, shifting `(index, len)` one slot toward
    /// the head and zeroing the vacated trailing slot.
    pub fn remove(&mut self, index: usize) -> Result<(), ContainerError> {
        if index >= self.len {
            return Err(ContainerError::OutOfBounds);
        }
        // SAFETY: `index < len`; the element is moved out before the tail is
        // shifted over it, and the last slot is cleared afterwards.
        let element = unsafe {
            let slot = self.ptr.as_ptr().add(index);
            let element = ptr::read(slot);
            ptr::copy(slot.add(1), slot, self.len - index - 1);
            self.len -= 1;
            ptr::write_bytes(self.ptr.as_ptr().add(self.len), 0, 1);
            element
        };
        self.disposer.dispose(element);
        Ok(())
    }

    /// Dispose every element from the tail. The capacity is kept.
    pub fn clear(&mut self) { while self.chop().is_ok() {} }
}

impl<T, D> Drop for Array<T, D>
where
    D: Dispose<T>,
{
    fn drop(&mut self) {
        self.clear();
        if let Ok(layout) = Self::layout(self.capacity) {
            // SAFETY: the block was allocated with this layout.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout) };
        }
    }
}

impl<T, D> Index<usize> for Array<T, D>
where
    D: Dispose<T>,
{
    type Output = T;

    fn index(&self, index: usize) -> &T { &self.as_slice()[index] }
}

impl<T, D> IndexMut<usize> for Array<T, D>
where
    D: Dispose<T>,
{
    fn index_mut(&mut self, index: usize) -> &mut T { &mut self.as_mut_slice()[index] }
}

impl<'a, T, D> IntoIterator for &'a Array<T, D>
where
    D: Dispose<T>,
{
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl<T, D> fmt::Debug for Array<T, D>
where
    T: fmt::Debug,
    D: Dispose<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array")
            .field("elements", &self.as_slice())
            .field("capacity", &self.capacity)
            .finish()
    }
}
