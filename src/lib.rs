//! Owning containers that dispose of their elements.
//!
//! - [`Sequence`]: a doubly-linked list with one shared traversal cursor.
//! - [`Array`]: a contiguous, zero-filled, growable array.
//!
//! Both take ownership of the elements put into them and give every element
//! to a [`Dispose`] implementation exactly once, when it is removed or when
//! the container is torn down.

pub mod array;
pub mod dispose;
pub mod error;
pub mod infra;
pub mod sequence;

pub use array::{Array, GROWTH_FACTOR};
pub use dispose::{Dispose, DropDisposer};
pub use error::{ContainerError, Rejected};
pub use sequence::{Position, Sequence};
