//! Progress and meter state.
//!
//! ## Usage
//!
//! [`ProgressState`] tracks completion of a task over a range, with a
//! missing value meaning indeterminate. [`MeterState`] measures a scalar
//! within a range, with optional low/high/optimum markers.

use derive_setters::Setters;
use renderless_foundation::{clamp, clamp_or_zero, is_in_range, value_to_percent};

/// Configuration for [`ProgressState::new`].
#[derive(Debug, Clone, Copy, PartialEq, Setters)]
pub struct ProgressArgs {
    /// Current value; `None` means indeterminate.
    #[setters(strip_option)]
    pub value: Option<f64>,
    /// Smallest value of the range.
    pub min: f64,
    /// Largest value of the range.
    pub max: f64,
}

impl Default for ProgressArgs {
    fn default() -> Self {
        Self {
            value: None,
            min: 0.0,
            max: 100.0,
        }
    }
}

/// State engine for a determinate or indeterminate progress indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressState {
    value: Option<f64>,
    min: f64,
    max: f64,
}

impl ProgressState {
    /// Builds the state from its configuration.
    pub fn new(args: ProgressArgs) -> Self {
        Self {
            value: args.value.map(|value| clamp(value, args.min, args.max)),
            min: args.min,
            max: args.max,
        }
    }

    /// Returns the current value, if determinate.
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Returns whether no value is known yet.
    pub fn is_indeterminate(&self) -> bool {
        self.value.is_none()
    }

    /// Returns whether the value reached the maximum.
    pub fn is_complete(&self) -> bool {
        self.value.is_some_and(|value| value >= self.max)
    }

    /// Returns completion as a percentage, `None` while indeterminate.
    pub fn percent(&self) -> Option<f64> {
        self.value
            .map(|value| value_to_percent(value, self.min, self.max))
    }

    /// Renders the percentage label, `None` while indeterminate.
    pub fn value_label(&self) -> Option<String> {
        self.percent().map(|percent| format!("{}%", percent.round()))
    }

    /// Updates the value, clamped into range. `None` switches back to
    /// indeterminate.
    pub fn set_value(&mut self, value: Option<f64>) {
        self.value = value.map(|value| clamp(value, self.min, self.max));
    }
}

/// Configuration for [`MeterState::new`].
#[derive(Debug, Clone, Copy, PartialEq, Setters)]
pub struct MeterArgs {
    /// Measured value. Missing values coerce to zero.
    #[setters(strip_option)]
    pub value: Option<f64>,
    /// Smallest value of the range.
    pub min: f64,
    /// Largest value of the range.
    pub max: f64,
    /// Upper bound of the "low" region.
    #[setters(strip_option)]
    pub low: Option<f64>,
    /// Lower bound of the "high" region.
    #[setters(strip_option)]
    pub high: Option<f64>,
    /// Value considered optimal.
    #[setters(strip_option)]
    pub optimum: Option<f64>,
}

impl Default for MeterArgs {
    fn default() -> Self {
        Self {
            value: None,
            min: 0.0,
            max: 1.0,
            low: None,
            high: None,
            optimum: None,
        }
    }
}

/// State engine for a scalar measurement within a range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeterState {
    value: f64,
    min: f64,
    max: f64,
    low: f64,
    high: f64,
    optimum: f64,
}

impl MeterState {
    /// Builds the state from its configuration.
    ///
    /// Low and high markers are clamped into the range; the optimum
    /// defaults to the midpoint.
    pub fn new(args: MeterArgs) -> Self {
        let value = clamp_or_zero(args.value, args.min, args.max);
        let low = clamp(args.low.unwrap_or(args.min), args.min, args.max);
        let high = clamp(args.high.unwrap_or(args.max), low, args.max);
        let optimum = clamp(
            args.optimum.unwrap_or((args.min + args.max) / 2.0),
            args.min,
            args.max,
        );
        Self {
            value,
            min: args.min,
            max: args.max,
            low,
            high,
            optimum,
        }
    }

    /// Returns the measured value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns the value as a percentage of the range.
    pub fn percent(&self) -> f64 {
        value_to_percent(self.value, self.min, self.max)
    }

    /// Returns whether the value sits inside the configured range.
    pub fn is_in_range(&self) -> bool {
        is_in_range(self.value, self.min, self.max)
    }

    /// Returns whether the value sits in the same region as the optimum.
    pub fn is_optimal(&self) -> bool {
        let region = |value: f64| {
            if value < self.low {
                0
            } else if value > self.high {
                2
            } else {
                1
            }
        };
        region(self.value) == region(self.optimum)
    }

    /// Updates the measured value, clamping it into range. Missing values
    /// coerce to zero.
    pub fn set_value(&mut self, value: Option<f64>) {
        self.value = clamp_or_zero(value, self.min, self.max);
    }
}
