//! Renderless state engines for composite interactive widgets.
//!
//! ## Usage
//!
//! Each module owns the stateful logic of one widget and nothing else: no
//! rendering, no markup, no styling. An engine is a plain struct with
//! transition methods; every transition recomputes the derived fields the
//! presentation layer reads back.
//!
//! ```
//! use renderless_states::number_input::{NumberInputArgs, NumberInputState};
//!
//! let mut state = NumberInputState::new(NumberInputArgs::default().default_value(0.0));
//! state.increment();
//! assert_eq!(state.display(), "1");
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod date_picker;
pub mod format;
pub mod number_input;
pub mod progress;
pub mod segment;
pub mod slider;
pub mod time_picker;
pub mod toast;
