//! Date range picker state built on two segmented fields.
//!
//! ## Usage
//!
//! [`DateRangePickerState`] pairs a start and an end segmented field over
//! one shared format. Edits go through [`DateRangePickerState::update_start`]
//! and [`DateRangePickerState::update_end`], which re-evaluate the range
//! after every transition; the range handler only fires once both fields are
//! complete and the range is ordered.

use chrono::NaiveDateTime;
use derive_setters::Setters;
use renderless_foundation::CallbackWith;

use crate::format::FormatOptions;
use crate::segment::{SegmentState, SegmentStateArgs};

/// Configuration for [`DateRangePickerState::new`].
#[derive(Clone, PartialEq, Default, Setters)]
pub struct DateRangePickerArgs {
    /// Initial start of the range; also confirms every start segment.
    #[setters(strip_option)]
    pub default_start: Option<NaiveDateTime>,
    /// Initial end of the range; also confirms every end segment.
    #[setters(strip_option)]
    pub default_end: Option<NaiveDateTime>,
    /// Working date both fields show while their segments are placeholders.
    #[setters(strip_option)]
    pub placeholder_date: Option<NaiveDateTime>,
    /// Format options shared by both fields.
    pub format_options: FormatOptions,
    /// Whether the calendar popover starts open.
    pub visible: bool,
    /// Handler invoked with `(start, end)` when a complete, ordered range
    /// changes.
    #[setters(skip)]
    pub on_change: Option<CallbackWith<(NaiveDateTime, NaiveDateTime)>>,
}

impl DateRangePickerArgs {
    /// Sets the handler invoked on complete, ordered range changes.
    pub fn on_change(
        mut self,
        on_change: impl Into<CallbackWith<(NaiveDateTime, NaiveDateTime)>>,
    ) -> Self {
        self.on_change = Some(on_change.into());
        self
    }
}

/// State engine for a start/end date range picker.
#[derive(Clone, PartialEq)]
pub struct DateRangePickerState {
    start: SegmentState,
    end: SegmentState,
    visible: bool,
    on_change: Option<CallbackWith<(NaiveDateTime, NaiveDateTime)>>,
    last_notified: Option<(NaiveDateTime, NaiveDateTime)>,
}

impl DateRangePickerState {
    /// Builds the state from its configuration.
    pub fn new(args: DateRangePickerArgs) -> Self {
        let field = |default: Option<NaiveDateTime>| {
            let mut field_args =
                SegmentStateArgs::default().format_options(args.format_options);
            if let Some(default) = default {
                field_args = field_args.default_value(default);
            }
            if let Some(placeholder) = args.placeholder_date {
                field_args = field_args.placeholder_date(placeholder);
            }
            SegmentState::new(field_args)
        };
        Self {
            start: field(args.default_start),
            end: field(args.default_end),
            visible: args.visible,
            on_change: args.on_change,
            last_notified: None,
        }
    }

    /// Returns the start field.
    pub fn start(&self) -> &SegmentState {
        &self.start
    }

    /// Returns the end field.
    pub fn end(&self) -> &SegmentState {
        &self.end
    }

    /// Applies a transition to the start field and re-evaluates the range.
    pub fn update_start(&mut self, edit: impl FnOnce(&mut SegmentState)) {
        edit(&mut self.start);
        self.after_edit();
    }

    /// Applies a transition to the end field and re-evaluates the range.
    pub fn update_end(&mut self, edit: impl FnOnce(&mut SegmentState)) {
        edit(&mut self.end);
        self.after_edit();
    }

    /// Returns the selected range once both fields are complete and ordered.
    pub fn value(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let (start, end) = (self.start.value()?, self.end.value()?);
        (start <= end).then_some((start, end))
    }

    /// Returns whether the selected range is complete and ordered.
    ///
    /// An incomplete field fails validity, so partially typed ranges never
    /// read as valid.
    pub fn is_range_valid(&self) -> bool {
        self.value().is_some()
    }

    /// Returns whether the calendar popover is open.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Opens the calendar popover.
    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Closes the calendar popover.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Toggles the calendar popover.
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    fn after_edit(&mut self) {
        let Some(range) = self.value() else {
            return;
        };
        if self.last_notified == Some(range) {
            return;
        }
        self.last_notified = Some(range);
        if let Some(on_change) = &self.on_change {
            on_change.call(range);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::NaiveDate;

    use crate::format::SegmentKind;

    use super::*;

    fn dt(y: i32, mo: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .expect("valid test date")
    }

    #[test]
    fn starts_invalid_until_both_fields_are_complete() {
        let mut picker = DateRangePickerState::new(
            DateRangePickerArgs::default().placeholder_date(dt(2021, 1, 1)),
        );
        assert!(!picker.is_range_valid());
        assert_eq!(picker.value(), None);

        picker.update_start(|field| {
            field.confirm_placeholder(SegmentKind::Month);
            field.confirm_placeholder(SegmentKind::Day);
            field.confirm_placeholder(SegmentKind::Year);
        });
        assert!(!picker.is_range_valid(), "end field is still partial");

        picker.update_end(|field| {
            field.confirm_placeholder(SegmentKind::Month);
            field.increment(SegmentKind::Day);
            field.confirm_placeholder(SegmentKind::Year);
        });
        assert_eq!(picker.value(), Some((dt(2021, 1, 1), dt(2021, 1, 2))));
    }

    #[test]
    fn inverted_ranges_fail_closed() {
        let mut picker = DateRangePickerState::new(
            DateRangePickerArgs::default()
                .default_start(dt(2021, 6, 10))
                .default_end(dt(2021, 6, 20)),
        );
        assert!(picker.is_range_valid());

        picker.update_start(|field| field.increment_page(SegmentKind::Month));
        assert!(!picker.is_range_valid());
        assert_eq!(picker.value(), None);
    }

    #[test]
    fn a_single_day_range_is_ordered() {
        let picker = DateRangePickerState::new(
            DateRangePickerArgs::default()
                .default_start(dt(2021, 6, 10))
                .default_end(dt(2021, 6, 10)),
        );
        assert!(picker.is_range_valid());
    }

    #[test]
    fn the_handler_fires_only_for_complete_ordered_ranges() {
        let log: Arc<Mutex<Vec<(NaiveDateTime, NaiveDateTime)>>> =
            Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let mut picker = DateRangePickerState::new(
            DateRangePickerArgs::default()
                .default_start(dt(2021, 6, 10))
                .default_end(dt(2021, 6, 20))
                .on_change(move |range: (NaiveDateTime, NaiveDateTime)| {
                    sink.lock().expect("log lock").push(range);
                }),
        );

        // Inverting the range produces no notification.
        picker.update_start(|field| field.increment_page(SegmentKind::Month));
        assert!(log.lock().expect("log lock").is_empty());

        // Restoring order produces exactly one.
        picker.update_start(|field| field.decrement_page(SegmentKind::Month));
        assert_eq!(
            *log.lock().expect("log lock"),
            vec![(dt(2021, 6, 10), dt(2021, 6, 20))]
        );
    }

    #[test]
    fn repeated_identical_ranges_do_not_renotify() {
        let log: Arc<Mutex<Vec<(NaiveDateTime, NaiveDateTime)>>> =
            Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let mut picker = DateRangePickerState::new(
            DateRangePickerArgs::default()
                .default_start(dt(2021, 6, 10))
                .default_end(dt(2021, 6, 20))
                .on_change(move |range: (NaiveDateTime, NaiveDateTime)| {
                    sink.lock().expect("log lock").push(range);
                }),
        );

        picker.update_start(|field| field.increment(SegmentKind::Day));
        picker.update_end(|_| {});
        picker.update_start(|_| {});
        assert_eq!(
            *log.lock().expect("log lock"),
            vec![(dt(2021, 6, 11), dt(2021, 6, 20))]
        );
    }

    #[test]
    fn popover_visibility_toggles() {
        let mut picker = DateRangePickerState::new(DateRangePickerArgs::default());
        assert!(!picker.is_visible());
        picker.show();
        assert!(picker.is_visible());
        picker.toggle();
        assert!(!picker.is_visible());
    }
}
