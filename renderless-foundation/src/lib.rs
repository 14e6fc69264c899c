//! Foundation primitives shared by the renderless state engines.
//!
//! ## Usage
//!
//! This crate carries the pieces every state engine needs but none owns:
//! range and precision arithmetic, identity-comparable callback handles,
//! and the controlled-or-internal value cell.
//!
//! ```
//! use renderless_foundation::{ValueCell, clamp};
//!
//! let mut cell = ValueCell::new(3.0_f64);
//! cell.set(clamp(12.0, 0.0, 10.0));
//! assert_eq!(*cell.get(), 10.0);
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod callback;
pub mod range;
pub mod value_cell;

pub use callback::CallbackWith;
pub use range::{
    clamp, clamp_or_zero, count_decimal_places, is_in_range, percent_to_value,
    round_to_precision, value_to_percent,
};
pub use value_cell::ValueCell;
