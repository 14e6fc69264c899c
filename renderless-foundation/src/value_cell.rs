//! Controlled-or-internal value storage.
//!
//! ## Usage
//!
//! A [`ValueCell`] tracks its own value but yields to the caller whenever an
//! external authoritative value is supplied, mirroring the controlled versus
//! uncontrolled duality of component props: `value` (when present) wins over
//! internal state, and every `set` both records the value and notifies the
//! registered change handler.

use crate::callback::CallbackWith;

/// A value holder that prefers an externally supplied value over its own.
#[derive(Clone, PartialEq)]
pub struct ValueCell<T> {
    internal: T,
    external: Option<T>,
    on_change: Option<CallbackWith<T>>,
}

impl<T: Clone + PartialEq> ValueCell<T> {
    /// Creates an uncontrolled cell starting at `default`.
    pub fn new(default: T) -> Self {
        Self {
            internal: default,
            external: None,
            on_change: None,
        }
    }

    /// Creates a controlled cell whose authoritative value is `value`.
    ///
    /// `default` seeds the internal value used if control is later released.
    pub fn controlled(value: T, default: T) -> Self {
        Self {
            internal: default,
            external: Some(value),
            on_change: None,
        }
    }

    /// Registers the change handler invoked by [`ValueCell::set`].
    pub fn with_on_change(mut self, on_change: CallbackWith<T>) -> Self {
        self.on_change = Some(on_change);
        self
    }

    /// Returns the current value: the external one when present, otherwise
    /// the internal one.
    pub fn get(&self) -> &T {
        self.external.as_ref().unwrap_or(&self.internal)
    }

    /// Returns whether an external value currently has authority.
    pub fn is_controlled(&self) -> bool {
        self.external.is_some()
    }

    /// Records `value` internally and notifies the change handler.
    ///
    /// When controlled, the external value keeps authority until the caller
    /// supplies a new one; the notification tells it to do so.
    pub fn set(&mut self, value: T) {
        if *self.get() == value {
            return;
        }
        self.internal = value.clone();
        if let Some(on_change) = &self.on_change {
            on_change.call(value);
        }
    }

    /// Supplies or withdraws the external authoritative value.
    pub fn set_controlled(&mut self, value: Option<T>) {
        self.external = value;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[test]
    fn external_value_takes_precedence() {
        let mut cell = ValueCell::controlled(5, 1);
        assert_eq!(*cell.get(), 5);
        cell.set(9);
        assert_eq!(*cell.get(), 5, "controlled value keeps authority");
        cell.set_controlled(None);
        assert_eq!(*cell.get(), 9, "internal value surfaces once released");
    }

    #[test]
    fn set_notifies_and_skips_no_op_writes() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let mut cell = ValueCell::new(0).with_on_change(CallbackWith::new(move |v: i32| {
            sink.lock().expect("log lock").push(v);
        }));
        cell.set(3);
        cell.set(3);
        cell.set(4);
        assert_eq!(*log.lock().expect("log lock"), vec![3, 4]);
    }
}
