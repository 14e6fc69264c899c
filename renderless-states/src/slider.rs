//! Multi-thumb slider state.
//!
//! ## Usage
//!
//! [`SliderState`] owns an ordered set of thumb values over one shared
//! range. Each thumb is clamped between its neighbors, snapped to the step,
//! and tracked for focus, editability, and drag lifecycle; the presentation
//! layer reads back percents and formatted labels.

use derive_setters::Setters;
use renderless_foundation::{
    CallbackWith, clamp, count_decimal_places, percent_to_value, round_to_precision,
    value_to_percent,
};

/// Axis along which the slider travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Left-to-right travel.
    #[default]
    Horizontal,
    /// Bottom-to-top travel.
    Vertical,
}

/// Configuration for [`SliderState::new`].
#[derive(Clone, PartialEq, Setters)]
pub struct SliderArgs {
    /// Initial thumb values in ascending order. Empty means one thumb at
    /// the minimum.
    pub values: Vec<f64>,
    /// Smallest value of the range.
    pub min: f64,
    /// Largest value of the range.
    pub max: f64,
    /// Step the thumb values snap to.
    pub step: f64,
    /// Whether the whole slider rejects edits.
    pub disabled: bool,
    /// Travel axis.
    pub orientation: Orientation,
    /// Whether the visual direction is reversed.
    pub reversed: bool,
    /// Handler invoked with `(thumb index, new value)` on every change.
    #[setters(skip)]
    pub on_change: Option<CallbackWith<(usize, f64)>>,
}

impl Default for SliderArgs {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            min: 0.0,
            max: 100.0,
            step: 1.0,
            disabled: false,
            orientation: Orientation::default(),
            reversed: false,
            on_change: None,
        }
    }
}

impl SliderArgs {
    /// Sets the per-thumb change handler.
    pub fn on_change(mut self, on_change: impl Into<CallbackWith<(usize, f64)>>) -> Self {
        self.on_change = Some(on_change.into());
        self
    }
}

/// State engine for a single- or multi-thumb slider.
#[derive(Clone, PartialEq)]
pub struct SliderState {
    values: Vec<f64>,
    min: f64,
    max: f64,
    step: f64,
    disabled: bool,
    orientation: Orientation,
    reversed: bool,
    focused_thumb: Option<usize>,
    dragging: Vec<bool>,
    editable: Vec<bool>,
    on_change: Option<CallbackWith<(usize, f64)>>,
}

impl SliderState {
    /// Builds the state from its configuration.
    pub fn new(args: SliderArgs) -> Self {
        let mut values = args.values;
        if values.is_empty() {
            values.push(args.min);
        }
        for value in &mut values {
            *value = clamp(*value, args.min, args.max);
        }
        let count = values.len();
        Self {
            values,
            min: args.min,
            max: args.max,
            step: args.step,
            disabled: args.disabled,
            orientation: args.orientation,
            reversed: args.reversed,
            focused_thumb: None,
            dragging: vec![false; count],
            editable: vec![true; count],
            on_change: args.on_change,
        }
    }

    /// Returns all thumb values in thumb order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the number of thumbs.
    pub fn thumb_count(&self) -> usize {
        self.values.len()
    }

    /// Returns the travel axis.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Returns whether the visual direction is reversed.
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Returns whether the slider rejects edits entirely.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Returns the value of one thumb.
    pub fn thumb_value(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Returns the smallest value one thumb may take: the range minimum for
    /// the first thumb, the previous thumb's value otherwise.
    pub fn thumb_min_value(&self, index: usize) -> Option<f64> {
        if index >= self.values.len() {
            return None;
        }
        Some(match index.checked_sub(1) {
            Some(previous) => self.values[previous],
            None => self.min,
        })
    }

    /// Returns the largest value one thumb may take: the range maximum for
    /// the last thumb, the next thumb's value otherwise.
    pub fn thumb_max_value(&self, index: usize) -> Option<f64> {
        if index >= self.values.len() {
            return None;
        }
        Some(if index + 1 < self.values.len() {
            self.values[index + 1]
        } else {
            self.max
        })
    }

    /// Maps a value onto its percentage of the range.
    pub fn value_percent(&self, value: f64) -> f64 {
        value_to_percent(value, self.min, self.max)
    }

    /// Maps a percentage of the range back onto a value.
    pub fn percent_value(&self, percent: f64) -> f64 {
        percent_to_value(percent, self.min, self.max)
    }

    /// Returns one thumb's percentage of the range.
    pub fn thumb_percent(&self, index: usize) -> Option<f64> {
        self.thumb_value(index).map(|value| self.value_percent(value))
    }

    /// Renders one thumb's value with the precision implied by the step.
    pub fn formatted_value(&self, index: usize) -> Option<String> {
        let precision = count_decimal_places(self.step) as usize;
        self.thumb_value(index)
            .map(|value| format!("{value:.precision$}"))
    }

    /// Returns whether one thumb accepts edits.
    pub fn is_thumb_editable(&self, index: usize) -> bool {
        self.editable.get(index).copied().unwrap_or(false)
    }

    /// Marks one thumb editable or read-only.
    pub fn set_thumb_editable(&mut self, index: usize, editable: bool) {
        if let Some(slot) = self.editable.get_mut(index) {
            *slot = editable;
        }
    }

    /// Returns whether one thumb is mid-drag.
    pub fn is_thumb_dragging(&self, index: usize) -> bool {
        self.dragging.get(index).copied().unwrap_or(false)
    }

    /// Starts or ends a drag on one thumb.
    ///
    /// Only one gesture may be active per slider instance: starting a drag
    /// while another thumb is dragging is ignored.
    pub fn set_thumb_dragging(&mut self, index: usize, dragging: bool) {
        if index >= self.dragging.len() {
            return;
        }
        if dragging {
            let other_active = self
                .dragging
                .iter()
                .enumerate()
                .any(|(i, active)| *active && i != index);
            if other_active || self.disabled || !self.is_thumb_editable(index) {
                return;
            }
        }
        self.dragging[index] = dragging;
    }

    /// Returns the focused thumb, if any.
    pub fn focused_thumb(&self) -> Option<usize> {
        self.focused_thumb
    }

    /// Moves keyboard focus to a thumb, or clears it.
    pub fn set_focused_thumb(&mut self, index: Option<usize>) {
        self.focused_thumb = index.filter(|i| *i < self.values.len());
    }

    /// Assigns one thumb's value, snapped to the step and clamped between
    /// its neighbors.
    pub fn set_thumb_value(&mut self, index: usize, value: f64) {
        if self.disabled || !self.is_thumb_editable(index) {
            return;
        }
        let (Some(min), Some(max)) = (self.thumb_min_value(index), self.thumb_max_value(index))
        else {
            return;
        };
        let snapped = clamp(self.snap_to_step(value), min, max);
        if self.values[index] == snapped {
            return;
        }
        self.values[index] = snapped;
        if let Some(on_change) = &self.on_change {
            on_change.call((index, snapped));
        }
    }

    /// Assigns one thumb's value from a percentage of the range.
    pub fn set_thumb_percent(&mut self, index: usize, percent: f64) {
        self.set_thumb_value(index, self.percent_value(percent));
    }

    /// Moves one thumb up a step.
    pub fn increment_thumb(&mut self, index: usize) {
        if let Some(value) = self.thumb_value(index) {
            self.set_thumb_value(index, value + self.step);
        }
    }

    /// Moves one thumb down a step.
    pub fn decrement_thumb(&mut self, index: usize) {
        if let Some(value) = self.thumb_value(index) {
            self.set_thumb_value(index, value - self.step);
        }
    }

    fn snap_to_step(&self, value: f64) -> f64 {
        if self.step <= 0.0 {
            return value;
        }
        let steps = ((value - self.min) / self.step).round();
        round_to_precision(
            self.min + steps * self.step,
            count_decimal_places(self.step) + 2,
        )
    }
}
