//! DateTime display utilities.
//!
//! Wrapper types for formatting timestamps and lesson schedules in a
//! consistent, human-readable form.

use std::fmt;

use jiff::{
    Timestamp,
    civil::{Date, Time},
    tz::TimeZone,
};

/// A wrapper around `Timestamp` that formats it in the system timezone.
///
/// # Format
///
/// `YYYY-MM-DD HH:MM:SS TZ`, 24-hour clock, with the timezone abbreviation
/// (e.g. UTC, EST, JST).
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// When a lesson takes place. Lesson dates and times are civil values with
/// no timezone, so they are printed as entered.
pub struct LessonSchedule(pub Option<Date>, pub Option<Time>);

impl fmt::Display for LessonSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.0, self.1) {
            (Some(date), Some(time)) => write!(f, "{date} {}", time.strftime("%H:%M")),
            (Some(date), None) => write!(f, "{date}"),
            (None, Some(time)) => write!(f, "{}", time.strftime("%H:%M")),
            (None, None) => write!(f, "unscheduled"),
        }
    }
}
