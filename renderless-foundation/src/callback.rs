//! Identity-comparable callback handles for state-change notification.
//!
//! ## Usage
//!
//! State engines expose plain data plus transition methods; the embedding
//! layer registers change handlers through [`CallbackWith`]. Handles compare
//! by identity (`Arc::ptr_eq`), so an engine holding one can still derive
//! `PartialEq` without forcing deep closure comparisons.

use std::fmt;
use std::sync::Arc;

/// Comparable change-handler handle for `Fn(T) -> R`.
///
/// This is the shape of every value-change notification in the state
/// engines: the engine passes the new value by value, the embedder decides
/// what to do with it.
pub struct CallbackWith<T, R = ()> {
    handler: Arc<dyn Fn(T) -> R + Send + Sync>,
}

impl<T, R> CallbackWith<T, R> {
    /// Creates a handle from a closure.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Invokes the handler with the changed value.
    pub fn call(&self, value: T) -> R {
        (self.handler)(value)
    }
}

impl<T, R, F> From<F> for CallbackWith<T, R>
where
    F: Fn(T) -> R + Send + Sync + 'static,
{
    fn from(handler: F) -> Self {
        Self::new(handler)
    }
}

impl<T, R> Clone for CallbackWith<T, R> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<T, R> PartialEq for CallbackWith<T, R> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
    }
}

impl<T, R> Eq for CallbackWith<T, R> {}

impl<T, R> fmt::Debug for CallbackWith<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackWith")
            .field("handler", &Arc::as_ptr(&self.handler))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;

    #[test]
    fn handles_compare_by_identity() {
        let a: CallbackWith<i32> = CallbackWith::new(|_| {});
        let b = a.clone();
        let c: CallbackWith<i32> = CallbackWith::new(|_| {});
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn call_forwards_the_value() {
        let seen = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&seen);
        let cb: CallbackWith<usize> = CallbackWith::new(move |v| {
            sink.store(v, Ordering::SeqCst);
        });
        cb.call(42);
        assert_eq!(seen.load(Ordering::SeqCst), 42);
    }
}
