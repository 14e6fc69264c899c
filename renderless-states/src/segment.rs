//! Segmented date/time field state.
//!
//! ## Usage
//!
//! [`SegmentState`] owns one date/time value, decomposes it into the ordered
//! segments of its resolved format, and exposes per-segment transitions:
//! increment, decrement, paging, direct assignment, and placeholder
//! confirmation.
//!
//! The value is only treated as real once every editable segment has been
//! confirmed at least once. Until then edits accumulate on an internal
//! placeholder date and no change notification fires. Supplying an external
//! value confirms all segments immediately, since a fully specified value is
//! never partial.

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, Timelike, Utc};
use derive_setters::Setters;
use renderless_foundation::{CallbackWith, ValueCell};
use smallvec::SmallVec;

use crate::format::{FieldFormat, FormatOptions, FormatPart, SegmentKind, hour_on_12_hour_clock};

/// One formatted piece of the field value.
///
/// Segments are recomputed from the authoritative value on every state
/// change; they are never stored independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateSegment {
    /// Which part of the value this segment renders.
    pub kind: SegmentKind,
    /// Rendered text for display.
    pub text: String,
    /// Current numeric value, for editable kinds.
    pub value: Option<i32>,
    /// Smallest value the segment accepts, for editable kinds.
    pub min_value: Option<i32>,
    /// Largest value the segment accepts, for editable kinds.
    pub max_value: Option<i32>,
    /// True until the user has confirmed or edited this segment.
    pub is_placeholder: bool,
}

/// Set of segment kinds the user has confirmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentValidity {
    confirmed: SmallVec<[SegmentKind; 7]>,
}

impl SegmentValidity {
    /// Returns whether `kind` has been confirmed.
    pub fn is_confirmed(&self, kind: SegmentKind) -> bool {
        self.confirmed.contains(&kind)
    }

    /// Counts the confirmed segments.
    pub fn confirmed_count(&self) -> usize {
        self.confirmed.len()
    }

    fn confirm(&mut self, kind: SegmentKind) {
        if kind.is_editable() && !self.confirmed.contains(&kind) {
            self.confirmed.push(kind);
        }
    }
}

/// Authoritative value of the field.
///
/// `Partial` accumulates edits on a placeholder date; the switch to
/// `Complete` is explicit and happens at most once per edit sequence, when
/// the confirmed count reaches the editable segment count.
#[derive(Debug, Clone, PartialEq)]
enum FieldValue {
    Complete,
    Partial {
        placeholder: NaiveDateTime,
        validity: SegmentValidity,
    },
}

/// Configuration for [`SegmentState::new`].
#[derive(Clone, PartialEq, Default, Setters)]
pub struct SegmentStateArgs {
    /// Controlled value. When present it takes precedence over internal
    /// state and marks every segment confirmed.
    #[setters(strip_option)]
    pub value: Option<NaiveDateTime>,
    /// Initial value for uncontrolled use; also confirms every segment.
    #[setters(strip_option)]
    pub default_value: Option<NaiveDateTime>,
    /// Working date shown while segments are still placeholders. Defaults
    /// to January 1st of the current year.
    #[setters(strip_option)]
    pub placeholder_date: Option<NaiveDateTime>,
    /// Format options resolved into the segment layout.
    pub format_options: FormatOptions,
    /// Handler invoked when a complete value changes.
    #[setters(skip)]
    pub on_change: Option<CallbackWith<NaiveDateTime>>,
}

impl SegmentStateArgs {
    /// Sets the change handler invoked for complete values.
    pub fn on_change(mut self, on_change: impl Into<CallbackWith<NaiveDateTime>>) -> Self {
        self.on_change = Some(on_change.into());
        self
    }
}

/// State engine for a segmented date/time field.
#[derive(Clone, PartialEq)]
pub struct SegmentState {
    format: FieldFormat,
    date: ValueCell<NaiveDateTime>,
    value: FieldValue,
}

impl SegmentState {
    /// Builds the state from its configuration.
    pub fn new(args: SegmentStateArgs) -> Self {
        let format = FieldFormat::resolve(&args.format_options);
        let placeholder = args.placeholder_date.unwrap_or_else(default_placeholder_date);
        let seeded = args.value.is_some() || args.default_value.is_some();
        let default_date = args.default_value.unwrap_or(placeholder);

        let mut date = match args.value {
            Some(value) => ValueCell::controlled(value, default_date),
            None => ValueCell::new(default_date),
        };
        if let Some(on_change) = args.on_change {
            date = date.with_on_change(on_change);
        }

        let value = if seeded {
            FieldValue::Complete
        } else {
            FieldValue::Partial {
                placeholder,
                validity: SegmentValidity::default(),
            }
        };

        Self {
            format,
            date,
            value,
        }
    }

    /// Returns the resolved format of this field.
    pub fn format(&self) -> &FieldFormat {
        &self.format
    }

    /// Returns the date currently used for display: the confirmed value once
    /// complete, the placeholder date before that.
    pub fn display_value(&self) -> NaiveDateTime {
        match &self.value {
            FieldValue::Complete => *self.date.get(),
            FieldValue::Partial { placeholder, .. } => *placeholder,
        }
    }

    /// Returns the confirmed value, if every segment has been confirmed.
    pub fn value(&self) -> Option<NaiveDateTime> {
        match self.value {
            FieldValue::Complete => Some(*self.date.get()),
            FieldValue::Partial { .. } => None,
        }
    }

    /// Returns whether every editable segment has been confirmed.
    pub fn is_complete(&self) -> bool {
        matches!(self.value, FieldValue::Complete)
    }

    /// Supplies or withdraws an external controlled value.
    ///
    /// A non-null external value is fully specified by definition, so it
    /// confirms every segment.
    pub fn set_external_value(&mut self, value: Option<NaiveDateTime>) {
        let adopting = value.is_some();
        self.date.set_controlled(value);
        if adopting {
            self.value = FieldValue::Complete;
        }
    }

    /// Adjusts `kind` by one unit, carrying into higher-order segments as
    /// calendar arithmetic requires. Marks the segment confirmed.
    pub fn increment(&mut self, kind: SegmentKind) {
        self.adjust(kind, 1);
    }

    /// Adjusts `kind` by minus one unit. Marks the segment confirmed.
    pub fn decrement(&mut self, kind: SegmentKind) {
        self.adjust(kind, -1);
    }

    /// Adjusts `kind` by its page step. Marks the segment confirmed.
    pub fn increment_page(&mut self, kind: SegmentKind) {
        self.adjust(kind, page_step(kind));
    }

    /// Adjusts `kind` by minus its page step. Marks the segment confirmed.
    pub fn decrement_page(&mut self, kind: SegmentKind) {
        self.adjust(kind, -page_step(kind));
    }

    /// Assigns a segment's numeric value directly, clamped to the segment's
    /// current bounds. Marks the segment confirmed.
    ///
    /// Hour values on a 12-hour clock are clock-face readings (1-12) and
    /// keep the currently displayed day period. Day-period values are 0 for
    /// AM and 1 for PM.
    pub fn set_segment(&mut self, kind: SegmentKind, value: i32) {
        if !kind.is_editable() || !self.format.contains(kind) {
            return;
        }
        self.confirm(kind);
        let next = set_field(
            self.display_value(),
            kind,
            value,
            self.format.uses_12_hour_clock(),
        );
        self.assign(next);
    }

    /// Marks a segment confirmed without changing its value, accepting the
    /// placeholder digit as final.
    pub fn confirm_placeholder(&mut self, kind: SegmentKind) {
        if !kind.is_editable() || !self.format.contains(kind) {
            return;
        }
        self.confirm(kind);
        let current = self.display_value();
        self.assign(current);
    }

    /// Recomputes the ordered segment sequence for the current value,
    /// literal separators included.
    pub fn segments(&self) -> Vec<DateSegment> {
        let value = self.display_value();
        self.format
            .parts()
            .iter()
            .map(|part| match part {
                FormatPart::Literal(text) => DateSegment {
                    kind: SegmentKind::Literal,
                    text: (*text).to_string(),
                    value: None,
                    min_value: None,
                    max_value: None,
                    is_placeholder: false,
                },
                FormatPart::Field(kind) => {
                    let limits = segment_limits(*kind, &value, self.format.uses_12_hour_clock());
                    DateSegment {
                        kind: *kind,
                        text: self.format.format_field(*kind, &value),
                        value: limits.map(|l| l.value),
                        min_value: limits.map(|l| l.min),
                        max_value: limits.map(|l| l.max),
                        is_placeholder: self.is_placeholder(*kind),
                    }
                }
            })
            .collect()
    }

    fn is_placeholder(&self, kind: SegmentKind) -> bool {
        match &self.value {
            FieldValue::Complete => false,
            FieldValue::Partial { validity, .. } => !validity.is_confirmed(kind),
        }
    }

    fn confirm(&mut self, kind: SegmentKind) {
        if let FieldValue::Partial { validity, .. } = &mut self.value {
            validity.confirm(kind);
        }
    }

    fn adjust(&mut self, kind: SegmentKind, amount: i64) {
        if !kind.is_editable() || !self.format.contains(kind) {
            return;
        }
        self.confirm(kind);
        let next = add_to_field(self.display_value(), kind, amount);
        self.assign(next);
    }

    fn assign(&mut self, next: NaiveDateTime) {
        let needed = self.format.editable_segment_count();
        match &mut self.value {
            FieldValue::Complete => self.date.set(next),
            FieldValue::Partial { placeholder, validity } => {
                if validity.confirmed_count() >= needed {
                    tracing::debug!(value = %next, "segmented field completed");
                    self.value = FieldValue::Complete;
                    self.date.set(next);
                } else {
                    *placeholder = next;
                }
            }
        }
    }
}

#[derive(Clone, Copy)]
struct SegmentLimits {
    value: i32,
    min: i32,
    max: i32,
}

fn segment_limits(
    kind: SegmentKind,
    value: &NaiveDateTime,
    twelve_hour: bool,
) -> Option<SegmentLimits> {
    let limits = match kind {
        SegmentKind::Year => SegmentLimits {
            value: value.year(),
            min: 1,
            max: 9999,
        },
        SegmentKind::Month => SegmentLimits {
            value: value.month() as i32,
            min: 1,
            max: 12,
        },
        SegmentKind::Day => SegmentLimits {
            value: value.day() as i32,
            min: 1,
            max: days_in_month(value.year(), value.month()) as i32,
        },
        SegmentKind::Hour => {
            if twelve_hour {
                SegmentLimits {
                    value: hour_on_12_hour_clock(value.hour()) as i32,
                    min: 1,
                    max: 12,
                }
            } else {
                SegmentLimits {
                    value: value.hour() as i32,
                    min: 0,
                    max: 23,
                }
            }
        }
        SegmentKind::Minute => SegmentLimits {
            value: value.minute() as i32,
            min: 0,
            max: 59,
        },
        SegmentKind::Second => SegmentLimits {
            value: value.second() as i32,
            min: 0,
            max: 59,
        },
        SegmentKind::DayPeriod => SegmentLimits {
            value: i32::from(value.hour() >= 12),
            min: 0,
            max: 1,
        },
        SegmentKind::Literal => return None,
    };
    Some(limits)
}

fn page_step(kind: SegmentKind) -> i64 {
    match kind {
        SegmentKind::Year => 5,
        SegmentKind::Month => 2,
        SegmentKind::Day => 7,
        SegmentKind::Hour => 2,
        SegmentKind::Minute | SegmentKind::Second => 15,
        _ => 1,
    }
}

/// Rebuilds `value` with `year` clamped to 1-9999, the day clamped to the
/// new month length, and the time of day preserved.
fn set_year_clamped(value: NaiveDateTime, year: i32) -> NaiveDateTime {
    let year = year.clamp(1, 9999);
    let day = value.day().min(days_in_month(year, value.month()));
    NaiveDate::from_ymd_opt(year, value.month(), day)
        .map(|date| date.and_time(value.time()))
        .unwrap_or(value)
}

/// Number of days in the given month, leap years included.
fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

fn add_to_field(value: NaiveDateTime, kind: SegmentKind, amount: i64) -> NaiveDateTime {
    match kind {
        SegmentKind::Year => set_year_clamped(value, value.year().saturating_add(amount as i32)),
        SegmentKind::Month => {
            let months = Months::new(amount.unsigned_abs() as u32);
            let adjusted = if amount >= 0 {
                value.checked_add_months(months)
            } else {
                value.checked_sub_months(months)
            };
            adjusted.unwrap_or(value)
        }
        SegmentKind::Day => value + Duration::days(amount),
        SegmentKind::Hour => value + Duration::hours(amount),
        SegmentKind::Minute => value + Duration::minutes(amount),
        SegmentKind::Second => value + Duration::seconds(amount),
        SegmentKind::DayPeriod => toggle_day_period(value),
        SegmentKind::Literal => value,
    }
}

fn set_field(value: NaiveDateTime, kind: SegmentKind, raw: i32, twelve_hour: bool) -> NaiveDateTime {
    match kind {
        SegmentKind::Year => set_year_clamped(value, raw),
        SegmentKind::Month => {
            let month = raw.clamp(1, 12) as u32;
            let day = value.day().min(days_in_month(value.year(), month));
            NaiveDate::from_ymd_opt(value.year(), month, day)
                .map(|date| date.and_time(value.time()))
                .unwrap_or(value)
        }
        SegmentKind::Day => {
            let day = raw.clamp(1, days_in_month(value.year(), value.month()) as i32) as u32;
            value.with_day(day).unwrap_or(value)
        }
        SegmentKind::Hour => {
            if twelve_hour {
                let display = raw.clamp(1, 12) as u32;
                let offset = if value.hour() >= 12 { 12 } else { 0 };
                value.with_hour(display % 12 + offset).unwrap_or(value)
            } else {
                value.with_hour(raw.clamp(0, 23) as u32).unwrap_or(value)
            }
        }
        SegmentKind::Minute => value.with_minute(raw.clamp(0, 59) as u32).unwrap_or(value),
        SegmentKind::Second => value.with_second(raw.clamp(0, 59) as u32).unwrap_or(value),
        SegmentKind::DayPeriod => {
            let offset = if raw.clamp(0, 1) == 1 { 12 } else { 0 };
            value.with_hour(value.hour() % 12 + offset).unwrap_or(value)
        }
        SegmentKind::Literal => value,
    }
}

/// Toggles AM/PM by shifting the underlying 24-hour value twelve hours,
/// keeping the displayed 12-hour reading unchanged.
fn toggle_day_period(value: NaiveDateTime) -> NaiveDateTime {
    value.with_hour((value.hour() + 12) % 24).unwrap_or(value)
}

fn default_placeholder_date() -> NaiveDateTime {
    let year = Utc::now().date_naive().year();
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("January 1st is always a valid date")
}
