//! Time picker state with clock-face columns.
//!
//! ## Usage
//!
//! [`TimePickerState`] owns a wall-clock [`Time`] and the popover visibility
//! of a column picker: hours on a 12-hour face, minutes, and the meridiem.
//! Selecting a column value updates the time and closes the popover;
//! stepper operations wrap within their column.

use std::fmt;

use derive_setters::Setters;
use renderless_foundation::{CallbackWith, ValueCell};
use thiserror::Error;

use crate::format::hour_on_12_hour_clock;

/// Errors from parsing a time literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    /// The text is not of the form `HH:MM` (with optional seconds).
    #[error("expected an HH:MM literal, got {0:?}")]
    Malformed(String),
    /// The hour component is outside 0-23.
    #[error("hour {0} is out of range 0-23")]
    HourOutOfRange(u32),
    /// The minute component is outside 0-59.
    #[error("minute {0} is out of range 0-59")]
    MinuteOutOfRange(u32),
}

/// Ante or post meridiem for the 12-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    /// Before noon.
    Am,
    /// Noon and after.
    Pm,
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        })
    }
}

/// A wall-clock time of day with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Time {
    hour: u8,
    minute: u8,
}

impl Time {
    /// Creates a time, clamping the components into range.
    pub fn new(hour: u8, minute: u8) -> Self {
        Self {
            hour: hour.min(23),
            minute: minute.min(59),
        }
    }

    /// Parses an `HH:MM` literal; trailing seconds are accepted and
    /// ignored.
    pub fn parse(text: &str) -> Result<Self, TimeParseError> {
        let mut pieces = text.trim().splitn(3, ':');
        let (Some(hour), Some(minute)) = (pieces.next(), pieces.next()) else {
            return Err(TimeParseError::Malformed(text.to_string()));
        };
        let hour: u32 = hour
            .parse()
            .map_err(|_| TimeParseError::Malformed(text.to_string()))?;
        let minute: u32 = minute
            .parse()
            .map_err(|_| TimeParseError::Malformed(text.to_string()))?;
        if hour > 23 {
            return Err(TimeParseError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(TimeParseError::MinuteOutOfRange(minute));
        }
        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    /// Returns the hour in 24-hour form (0-23).
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Returns the hour as a clock-face reading (1-12).
    pub fn hour_on_clock_face(&self) -> u8 {
        hour_on_12_hour_clock(self.hour as u32) as u8
    }

    /// Returns the meridiem of this time.
    pub fn meridiem(&self) -> Meridiem {
        if self.hour >= 12 {
            Meridiem::Pm
        } else {
            Meridiem::Am
        }
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Configuration for [`TimePickerState::new`].
#[derive(Clone, PartialEq, Default, Setters)]
pub struct TimePickerArgs {
    /// Controlled value; takes precedence over internal state when present.
    #[setters(strip_option)]
    pub value: Option<Time>,
    /// Initial value for uncontrolled use.
    #[setters(strip_option)]
    pub default_value: Option<Time>,
    /// Whether the column popover starts open.
    pub visible: bool,
    /// Handler invoked when the selected time changes.
    #[setters(skip)]
    pub on_change: Option<CallbackWith<Time>>,
}

impl TimePickerArgs {
    /// Sets the change handler invoked on time changes.
    pub fn on_change(mut self, on_change: impl Into<CallbackWith<Time>>) -> Self {
        self.on_change = Some(on_change.into());
        self
    }
}

/// State engine for a column-based time picker.
#[derive(Clone, PartialEq)]
pub struct TimePickerState {
    time: ValueCell<Time>,
    visible: bool,
}

impl TimePickerState {
    /// Builds the state from its configuration.
    pub fn new(args: TimePickerArgs) -> Self {
        let default = args.default_value.unwrap_or_default();
        let mut time = match args.value {
            Some(value) => ValueCell::controlled(value, default),
            None => ValueCell::new(default),
        };
        if let Some(on_change) = args.on_change {
            time = time.with_on_change(on_change);
        }
        Self {
            time,
            visible: args.visible,
        }
    }

    /// Returns the selected time.
    pub fn time(&self) -> Time {
        *self.time.get()
    }

    /// Returns the selectable hour column values (clock face, 1-12).
    pub fn hours(&self) -> Vec<u8> {
        (1..=12).collect()
    }

    /// Returns the selectable minute column values (0-59).
    pub fn minutes(&self) -> Vec<u8> {
        (0..60).collect()
    }

    /// Returns the selectable meridiem column values.
    pub fn meridies(&self) -> [Meridiem; 2] {
        [Meridiem::Am, Meridiem::Pm]
    }

    /// Returns whether the column popover is open.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Opens the column popover.
    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Closes the column popover.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Toggles the column popover.
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Selects an hour from the clock-face column (1-12), keeping the
    /// current meridiem, and closes the popover.
    pub fn set_hour(&mut self, face_hour: u8) {
        let face_hour = face_hour.clamp(1, 12);
        let offset = if self.time().hour() >= 12 { 12 } else { 0 };
        let hour = face_hour % 12 + offset;
        self.select(Time::new(hour, self.time().minute()));
    }

    /// Selects a minute from the minute column and closes the popover.
    pub fn set_minute(&mut self, minute: u8) {
        self.select(Time::new(self.time().hour(), minute));
    }

    /// Selects a meridiem, shifting the hour by twelve when it changes,
    /// and closes the popover.
    pub fn set_meridiem(&mut self, meridiem: Meridiem) {
        let time = self.time();
        let hour = match (meridiem, time.meridiem()) {
            (Meridiem::Am, Meridiem::Pm) => time.hour() - 12,
            (Meridiem::Pm, Meridiem::Am) => time.hour() + 12,
            _ => time.hour(),
        };
        self.select(Time::new(hour, time.minute()));
    }

    /// Steps the hour forward, wrapping past 23 to 0.
    pub fn increment_hour(&mut self, step: u8) {
        let time = self.time();
        let hour = ((time.hour() as u16 + step as u16) % 24) as u8;
        self.time.set(Time::new(hour, time.minute()));
    }

    /// Steps the hour backward, wrapping past 0 to 23.
    pub fn decrement_hour(&mut self, step: u8) {
        let time = self.time();
        let hour = (time.hour() as i16 - step as i16).rem_euclid(24) as u8;
        self.time.set(Time::new(hour, time.minute()));
    }

    /// Steps the minute forward, wrapping past 59 to 0.
    pub fn increment_minute(&mut self, step: u8) {
        let time = self.time();
        let minute = ((time.minute() as u16 + step as u16) % 60) as u8;
        self.time.set(Time::new(time.hour(), minute));
    }

    /// Steps the minute backward, wrapping past 0 to 59.
    pub fn decrement_minute(&mut self, step: u8) {
        let time = self.time();
        let minute = (time.minute() as i16 - step as i16).rem_euclid(60) as u8;
        self.time.set(Time::new(time.hour(), minute));
    }

    fn select(&mut self, time: Time) {
        self.time.set(time);
        self.hide();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_renders_hh_mm_literals() {
        assert_eq!(Time::parse("09:30"), Ok(Time::new(9, 30)));
        assert_eq!(Time::parse("23:59:59"), Ok(Time::new(23, 59)));
        assert_eq!(Time::new(7, 5).to_string(), "07:05");
    }

    #[test]
    fn rejects_malformed_and_out_of_range_literals() {
        assert_eq!(
            Time::parse("nope"),
            Err(TimeParseError::Malformed("nope".to_string()))
        );
        assert_eq!(Time::parse("24:00"), Err(TimeParseError::HourOutOfRange(24)));
        assert_eq!(
            Time::parse("12:75"),
            Err(TimeParseError::MinuteOutOfRange(75))
        );
    }

    #[test]
    fn clock_face_reading_tracks_the_meridiem() {
        assert_eq!(Time::new(0, 0).hour_on_clock_face(), 12);
        assert_eq!(Time::new(15, 0).hour_on_clock_face(), 3);
        assert_eq!(Time::new(15, 0).meridiem(), Meridiem::Pm);
    }

    #[test]
    fn selecting_an_hour_keeps_the_meridiem_and_closes_the_popover() {
        let mut state = TimePickerState::new(
            TimePickerArgs::default()
                .default_value(Time::new(15, 30))
                .visible(true),
        );
        state.set_hour(7);
        assert_eq!(state.time(), Time::new(19, 30));
        assert!(!state.is_visible());
    }

    #[test]
    fn selecting_twelve_maps_to_the_meridiem_boundary() {
        let mut state =
            TimePickerState::new(TimePickerArgs::default().default_value(Time::new(9, 0)));
        state.set_hour(12);
        assert_eq!(state.time().hour(), 0, "12 AM is midnight");

        let mut state =
            TimePickerState::new(TimePickerArgs::default().default_value(Time::new(15, 0)));
        state.set_hour(12);
        assert_eq!(state.time().hour(), 12, "12 PM is noon");
    }

    #[test]
    fn switching_meridiem_shifts_the_hour_by_twelve() {
        let mut state =
            TimePickerState::new(TimePickerArgs::default().default_value(Time::new(9, 15)));
        state.set_meridiem(Meridiem::Pm);
        assert_eq!(state.time(), Time::new(21, 15));
        state.set_meridiem(Meridiem::Pm);
        assert_eq!(state.time(), Time::new(21, 15));
        state.set_meridiem(Meridiem::Am);
        assert_eq!(state.time(), Time::new(9, 15));
    }

    #[test]
    fn steppers_wrap_within_their_column() {
        let mut state =
            TimePickerState::new(TimePickerArgs::default().default_value(Time::new(23, 59)));
        state.increment_hour(1);
        assert_eq!(state.time().hour(), 0);
        state.decrement_hour(1);
        assert_eq!(state.time().hour(), 23);
        state.increment_minute(1);
        assert_eq!(state.time().minute(), 0);
        state.decrement_minute(15);
        assert_eq!(state.time().minute(), 45);
    }

    #[test]
    fn selections_notify_the_change_handler() {
        use std::sync::{Arc, Mutex};

        let log: Arc<Mutex<Vec<Time>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let mut state = TimePickerState::new(
            TimePickerArgs::default()
                .default_value(Time::new(8, 0))
                .on_change(move |time: Time| {
                    sink.lock().expect("log lock").push(time);
                }),
        );
        state.set_minute(45);
        assert_eq!(*log.lock().expect("log lock"), vec![Time::new(8, 45)]);
    }
}
