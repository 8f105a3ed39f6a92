//! Error Types
//!
//! Both containers report failures through [`ContainerError`], a small closed
//! set of outcomes. Operations that take ownership of an element and then fail
//! hand the element back through [`Rejected`], so nothing is lost or disposed
//! behind the caller's back.

use std::{error, fmt};

use thiserror::Error;

/// The error type shared by [`Sequence`](crate::sequence::Sequence) and
/// [`Array`](crate::array::Array).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ContainerError {
    /// A required payload is absent.
    #[error("a required argument is absent")]
    NullArgument,
    /// A numeric argument violates a precondition.
    #[error("an invalid value has been passed")]
    InvalidArgument,
    /// Growing the backing memory failed. The container is left untouched.
    #[error("backing memory allocation has failed")]
    AllocationFailure,
    /// The index is outside `[0, len)`.
    #[error("index is out of bounds")]
    OutOfBounds,
    /// The operation requires at least one element.
    #[error("container is empty")]
    EmptyContainer,
    /// A search-based operation found no matching element.
    #[error("item not found")]
    ItemNotFound,
    /// The position refers to a node that has been removed.
    #[error("position refers to a removed element")]
    StalePosition,
}

/// An element that could not be stored, together with the reason.
///
/// Returned by insertions that fail after the element has been moved into the
/// call, so the caller gets ownership back.
pub struct Rejected<T> {
    /// Why the element was rejected.
    pub kind: ContainerError,
    /// The element, untouched.
    pub element: T,
}

impl<T> Rejected<T> {
    pub(crate) fn new(kind: ContainerError, element: T) -> Self { Self { kind, element } }

    /// Discard the element and keep the error.
    ///
    /// The element is dropped normally, the container's disposer is not
    /// involved since the element never entered the container.
    pub fn into_kind(self) -> ContainerError { self.kind }

    /// Take the element back.
    pub fn into_element(self) -> T { self.element }
}

impl<T> From<Rejected<T>> for ContainerError {
    fn from(rejected: Rejected<T>) -> Self { rejected.kind }
}

impl<T> PartialEq<ContainerError> for Rejected<T> {
    fn eq(&self, other: &ContainerError) -> bool { self.kind == *other }
}

impl<T> fmt::Debug for Rejected<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rejected")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for Rejected<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element rejected: {}", self.kind)
    }
}

impl<T> error::Error for Rejected<T> {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> { Some(&self.kind) }
}
