//! Numeric input state with step, bounds, and fixed display precision.
//!
//! ## Usage
//!
//! [`NumberInputState`] owns a numeric value and resolves every transition
//! deterministically: stepping clamps into range (when enabled) and rounds
//! to the display precision, free typing bypasses clamping so intermediate
//! invalid text stays representable, and out-of-range input snaps to the
//! nearer bound at commit points only.

use derive_setters::Setters;
use renderless_foundation::{
    CallbackWith, ValueCell, clamp, count_decimal_places, round_to_precision,
};

/// Configuration for [`NumberInputState::new`].
#[derive(Clone, PartialEq, Setters)]
pub struct NumberInputArgs {
    /// Controlled value; takes precedence over internal state when present.
    #[setters(strip_option)]
    pub value: Option<f64>,
    /// Initial value for uncontrolled use.
    #[setters(strip_option)]
    pub default_value: Option<f64>,
    /// Smallest value allowed.
    pub min: f64,
    /// Largest value allowed.
    pub max: f64,
    /// Amount applied by one increment or decrement.
    pub step: f64,
    /// Decimal places for display. Defaults to the decimal places of `step`.
    #[setters(strip_option)]
    pub precision: Option<u32>,
    /// Whether stepping clamps the result into `[min, max]`.
    pub keep_within_range: bool,
    /// Whether committing free-typed input clamps it into `[min, max]`.
    pub clamp_value_on_blur: bool,
    /// Handler invoked when the committed value changes.
    #[setters(skip)]
    pub on_change: Option<CallbackWith<Option<f64>>>,
}

impl Default for NumberInputArgs {
    fn default() -> Self {
        Self {
            value: None,
            default_value: None,
            min: f64::MIN,
            max: f64::MAX,
            step: 1.0,
            precision: None,
            keep_within_range: true,
            clamp_value_on_blur: true,
            on_change: None,
        }
    }
}

impl NumberInputArgs {
    /// Sets the change handler invoked on committed value changes.
    pub fn on_change(mut self, on_change: impl Into<CallbackWith<Option<f64>>>) -> Self {
        self.on_change = Some(on_change.into());
        self
    }
}

/// State engine for a clamped, stepped numeric input.
#[derive(Clone, PartialEq)]
pub struct NumberInputState {
    value: ValueCell<Option<f64>>,
    input: Option<String>,
    min: f64,
    max: f64,
    step: f64,
    precision: u32,
    keep_within_range: bool,
    clamp_value_on_blur: bool,
}

impl NumberInputState {
    /// Builds the state from its configuration.
    pub fn new(args: NumberInputArgs) -> Self {
        let precision = args
            .precision
            .unwrap_or_else(|| count_decimal_places(args.step));
        let mut value = match args.value {
            Some(v) => ValueCell::controlled(Some(v), args.default_value),
            None => ValueCell::new(args.default_value),
        };
        if let Some(on_change) = args.on_change {
            value = value.with_on_change(on_change);
        }
        Self {
            value,
            input: None,
            min: args.min,
            max: args.max,
            step: args.step,
            precision,
            keep_within_range: args.keep_within_range,
            clamp_value_on_blur: args.clamp_value_on_blur,
        }
    }

    /// Returns the committed value, if any.
    pub fn value(&self) -> Option<f64> {
        *self.value.get()
    }

    /// Returns the display precision in decimal places.
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Adds one step, clamping into range when configured.
    pub fn increment(&mut self) {
        self.step_by(self.step);
    }

    /// Subtracts one step, clamping into range when configured.
    pub fn decrement(&mut self) {
        self.step_by(-self.step);
    }

    /// Jumps to the minimum bound (Home).
    pub fn to_min(&mut self) {
        self.input = None;
        self.value.set(Some(round_to_precision(self.min, self.precision)));
    }

    /// Jumps to the maximum bound (End).
    pub fn to_max(&mut self) {
        self.input = None;
        self.value.set(Some(round_to_precision(self.max, self.precision)));
    }

    /// Applies one discrete wheel tick.
    ///
    /// Any nonzero delta counts as exactly one unit step; only the sign is
    /// read, never the magnitude. Wheel-up (negative delta) increments.
    pub fn wheel(&mut self, delta_y: f64) {
        if delta_y < 0.0 {
            self.increment();
        } else if delta_y > 0.0 {
            self.decrement();
        }
    }

    /// Records free-typed text without validating or clamping it.
    ///
    /// Intermediate invalid states (a lone minus sign, an incomplete
    /// decimal) stay representable until [`NumberInputState::commit`].
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = Some(text.into());
    }

    /// Returns the raw typed text, when editing is in progress.
    pub fn input(&self) -> Option<&str> {
        self.input.as_deref()
    }

    /// Resolves pending input at a commit point (blur).
    ///
    /// Out-of-range values snap to the nearer bound when clamp-on-blur is
    /// enabled; non-numeric text falls back to the last valid value, or the
    /// minimum bound when there is none.
    pub fn commit(&mut self) {
        let typed = self.input.take();
        let candidate = match typed {
            Some(text) => match text.trim().parse::<f64>() {
                Ok(parsed) => Some(parsed),
                Err(_) => {
                    tracing::debug!(input = %text, "discarding non-numeric input on commit");
                    Some(self.value().unwrap_or(self.min))
                }
            },
            None => self.value(),
        };
        let Some(candidate) = candidate else {
            return;
        };
        let resolved = if self.clamp_value_on_blur {
            clamp(candidate, self.min, self.max)
        } else {
            candidate
        };
        self.value.set(Some(round_to_precision(resolved, self.precision)));
    }

    /// Renders the current value with exactly `precision` fraction digits.
    ///
    /// While free typing is in progress the raw text is returned unchanged.
    pub fn display(&self) -> String {
        if let Some(input) = &self.input {
            return input.clone();
        }
        match self.value() {
            Some(value) => format!("{value:.prec$}", prec = self.precision as usize),
            None => String::new(),
        }
    }

    fn step_by(&mut self, amount: f64) {
        self.input = None;
        let base = self.value().unwrap_or(0.0);
        let mut next = base + amount;
        if self.keep_within_range {
            next = clamp(next, self.min, self.max);
        }
        self.value.set(Some(round_to_precision(next, self.precision)));
    }
}
