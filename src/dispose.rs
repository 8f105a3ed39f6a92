//! Element Disposal
//!
//! Every container in this crate owns its elements and gives each one to a
//! [`Dispose`] implementation exactly once, at the moment the element is
//! removed or the container is torn down.
//!
//! Closures taking the element by value are disposers:
//!
//! ```
//! use keepers::sequence::Sequence;
//!
//! let mut released = Vec::new();
//! let mut list = Sequence::new(|name: String| released.push(name));
//! list.append("alice".to_string());
//! list.remove_first().unwrap();
//! drop(list);
//!
//! assert_eq!(released, vec!["alice".to_string()]);
//! ```

/// A per-element disposal callback.
pub trait Dispose<T> {
    /// Release an element that has just left the container.
    fn dispose(&mut self, element: T);
}

impl<T, F> Dispose<T> for F
where
    F: FnMut(T),
{
    fn dispose(&mut self, element: T) { self(element) }
}

/// The default disposer, which simply drops the element.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DropDisposer;

impl<T> Dispose<T> for DropDisposer {
    fn dispose(&mut self, element: T) { drop(element) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_disposer() {
        let mut seen = Vec::new();
        {
            let mut disposer = |x: i32| seen.push(x);
            disposer.dispose(1);
            disposer.dispose(2);
        }
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn test_drop_disposer() {
        use std::rc::Rc;

        let shared = Rc::new(());
        let mut disposer = DropDisposer;
        disposer.dispose(Rc::clone(&shared));
        assert_eq!(Rc::strong_count(&shared), 1);
    }
}
