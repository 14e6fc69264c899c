//! Field format resolution for segmented date/time values.
//!
//! ## Usage
//!
//! A [`FieldFormat`] is the ordered part list a segmented field renders:
//! editable fields interleaved with literal separators, in the positional
//! order of the chosen layout. It stands in for a locale formatting
//! capability; the segment engine only consumes the resolved parts.

use chrono::{Datelike, NaiveDateTime, Timelike};
use derive_setters::Setters;
use smallvec::SmallVec;

/// Kind of one formatted piece of a date/time value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Calendar year.
    Year,
    /// Month of year, 1-12.
    Month,
    /// Day of month.
    Day,
    /// Hour of day.
    Hour,
    /// Minute of hour.
    Minute,
    /// Second of minute.
    Second,
    /// AM/PM marker for 12-hour clocks.
    DayPeriod,
    /// Non-editable separator text.
    Literal,
}

impl SegmentKind {
    /// Returns whether segments of this kind accept user edits.
    ///
    /// Kinds outside the editable set pass through as display-only and are
    /// never placeholder-eligible.
    pub fn is_editable(self) -> bool {
        !matches!(self, SegmentKind::Literal)
    }
}

/// Date layout presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `MM/DD/YYYY`.
    Short,
    /// `YYYY-MM-DD`.
    Iso,
}

/// Time layout presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeStyle {
    /// Hour and minute.
    Short,
    /// Hour, minute, and second.
    Medium,
}

/// Clock convention for hour fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HourCycle {
    /// 12-hour clock with a day-period segment.
    #[default]
    H12,
    /// 24-hour clock, hours 0-23.
    H23,
}

/// One entry in a resolved field format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatPart {
    /// An editable field of the given kind.
    Field(SegmentKind),
    /// Literal separator text rendered between fields.
    Literal(&'static str),
}

/// Options controlling which fields a segmented value exposes.
///
/// Defaults resolve to a short date when neither style is set, so a field
/// built from malformed or empty options still formats something sensible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Setters)]
pub struct FormatOptions {
    /// Date layout, when the field edits a calendar date.
    #[setters(strip_option)]
    pub date_style: Option<DateStyle>,
    /// Time layout, when the field edits a time of day.
    #[setters(strip_option)]
    pub time_style: Option<TimeStyle>,
    /// Clock convention used by hour fields.
    pub hour_cycle: HourCycle,
}

/// An ordered part list resolved from [`FormatOptions`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFormat {
    parts: SmallVec<[FormatPart; 12]>,
    hour_cycle: HourCycle,
}

impl FieldFormat {
    /// Resolves options into the positional part list of the layout.
    pub fn resolve(options: &FormatOptions) -> Self {
        let mut parts: SmallVec<[FormatPart; 12]> = SmallVec::new();

        let date_style = match (options.date_style, options.time_style) {
            (None, None) => Some(DateStyle::Short),
            (date_style, _) => date_style,
        };

        match date_style {
            Some(DateStyle::Short) => {
                parts.push(FormatPart::Field(SegmentKind::Month));
                parts.push(FormatPart::Literal("/"));
                parts.push(FormatPart::Field(SegmentKind::Day));
                parts.push(FormatPart::Literal("/"));
                parts.push(FormatPart::Field(SegmentKind::Year));
            }
            Some(DateStyle::Iso) => {
                parts.push(FormatPart::Field(SegmentKind::Year));
                parts.push(FormatPart::Literal("-"));
                parts.push(FormatPart::Field(SegmentKind::Month));
                parts.push(FormatPart::Literal("-"));
                parts.push(FormatPart::Field(SegmentKind::Day));
            }
            None => {}
        }

        if let Some(time_style) = options.time_style {
            if !parts.is_empty() {
                parts.push(FormatPart::Literal(", "));
            }
            parts.push(FormatPart::Field(SegmentKind::Hour));
            parts.push(FormatPart::Literal(":"));
            parts.push(FormatPart::Field(SegmentKind::Minute));
            if time_style == TimeStyle::Medium {
                parts.push(FormatPart::Literal(":"));
                parts.push(FormatPart::Field(SegmentKind::Second));
            }
            if options.hour_cycle == HourCycle::H12 {
                parts.push(FormatPart::Literal(" "));
                parts.push(FormatPart::Field(SegmentKind::DayPeriod));
            }
        }

        Self {
            parts,
            hour_cycle: options.hour_cycle,
        }
    }

    /// Returns the resolved parts in display order.
    pub fn parts(&self) -> &[FormatPart] {
        &self.parts
    }

    /// Returns whether hour fields use the 12-hour clock.
    pub fn uses_12_hour_clock(&self) -> bool {
        self.hour_cycle == HourCycle::H12
    }

    /// Counts the editable segments of this layout.
    pub fn editable_segment_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|part| matches!(part, FormatPart::Field(kind) if kind.is_editable()))
            .count()
    }

    /// Returns whether the layout contains a field of `kind`.
    pub fn contains(&self, kind: SegmentKind) -> bool {
        self.parts.contains(&FormatPart::Field(kind))
    }

    /// Renders the text of one field for `value`.
    ///
    /// Two-digit fields are zero-padded; 12-hour hours render unpadded the
    /// way clock faces do.
    pub fn format_field(&self, kind: SegmentKind, value: &NaiveDateTime) -> String {
        match kind {
            SegmentKind::Year => format!("{}", value.year()),
            SegmentKind::Month => format!("{:02}", value.month()),
            SegmentKind::Day => format!("{:02}", value.day()),
            SegmentKind::Hour => {
                if self.uses_12_hour_clock() {
                    format!("{}", hour_on_12_hour_clock(value.hour()))
                } else {
                    format!("{:02}", value.hour())
                }
            }
            SegmentKind::Minute => format!("{:02}", value.minute()),
            SegmentKind::Second => format!("{:02}", value.second()),
            SegmentKind::DayPeriod => {
                if value.hour() >= 12 { "PM" } else { "AM" }.to_string()
            }
            SegmentKind::Literal => String::new(),
        }
    }

    /// Renders the full field text, literals included.
    pub fn format(&self, value: &NaiveDateTime) -> String {
        self.parts
            .iter()
            .map(|part| match part {
                FormatPart::Field(kind) => self.format_field(*kind, value),
                FormatPart::Literal(text) => (*text).to_string(),
            })
            .collect()
    }
}

/// Converts a 24-hour value to its 12-hour clock face reading (1-12).
pub fn hour_on_12_hour_clock(hour: u32) -> u32 {
    let hour = hour % 12;
    if hour == 0 { 12 } else { hour }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .and_then(|date| date.and_hms_opt(h, mi, s))
            .expect("valid test date")
    }

    #[test]
    fn default_options_resolve_to_a_short_date() {
        let format = FieldFormat::resolve(&FormatOptions::default());
        assert_eq!(format.editable_segment_count(), 3);
        assert_eq!(format.format(&dt(2021, 3, 14, 0, 0, 0)), "03/14/2021");
    }

    #[test]
    fn twelve_hour_layout_appends_a_day_period() {
        let options = FormatOptions::default().time_style(TimeStyle::Short);
        let format = FieldFormat::resolve(&options);
        assert!(format.contains(SegmentKind::DayPeriod));
        assert_eq!(format.editable_segment_count(), 6);
        assert_eq!(
            format.format(&dt(2021, 3, 14, 15, 5, 0)),
            "03/14/2021, 3:05 PM"
        );
    }

    #[test]
    fn twenty_four_hour_layout_has_no_day_period() {
        let options = FormatOptions::default()
            .date_style(DateStyle::Iso)
            .time_style(TimeStyle::Medium)
            .hour_cycle(HourCycle::H23);
        let format = FieldFormat::resolve(&options);
        assert!(!format.contains(SegmentKind::DayPeriod));
        assert_eq!(
            format.format(&dt(2021, 3, 14, 15, 5, 9)),
            "2021-03-14, 15:05:09"
        );
    }

    #[test]
    fn clock_face_hours_wrap_midnight_and_noon_to_twelve() {
        assert_eq!(hour_on_12_hour_clock(0), 12);
        assert_eq!(hour_on_12_hour_clock(12), 12);
        assert_eq!(hour_on_12_hour_clock(15), 3);
    }
}
