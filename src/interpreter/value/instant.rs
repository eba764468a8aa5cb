use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta, Timelike, Utc};

use crate::{
    error::RuntimeError,
    interpreter::value::number::Number,
    util::num::f64_to_i64_checked,
};

/// Date and time forms accepted between the `#` markers, tried in order.
const DATE_TIME_FORMATS: [&str; 4] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A point in time with whole-second resolution and no time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(NaiveDateTime);

impl Instant {
    /// The current UTC time, truncated to the second.
    ///
    /// # Errors
    /// `InvalidInstant` if the clock cannot be truncated, which chrono only
    /// reports for leap seconds it cannot represent.
    pub fn now() -> Result<Self, RuntimeError> {
        let now = Utc::now().naive_utc();
        now.with_nanosecond(0)
           .map(Self)
           .ok_or_else(|| RuntimeError::InvalidInstant { text: now.to_string() })
    }

    /// Parses the text between the `#` markers of a date literal.
    ///
    /// Accepted forms are `YYYY-MM-DD`, `YYYY-MM-DD HH:MM` and
    /// `YYYY-MM-DDTHH:MM:SS`; the date and time may be separated by either a
    /// space or `T`, and seconds are optional.
    ///
    /// # Errors
    /// `InvalidInstant` for anything else, including impossible dates such as
    /// `2023-02-29`.
    ///
    /// # Example
    /// ```
    /// use ka::interpreter::value::instant::Instant;
    ///
    /// let t = Instant::parse("1970-01-02 00:01").unwrap();
    /// assert_eq!(t.to_string(), "1970-01-02T00:01:00");
    /// assert_eq!(Instant::parse("1970-01-02T00:01:00").unwrap(), t);
    /// assert!(Instant::parse("2023-02-29").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, RuntimeError> {
        let trimmed = text.trim();
        if let Some(parsed) = DATE_TIME_FORMATS.iter()
                                               .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        {
            return Ok(Self(parsed));
        }
        NaiveDate::parse_from_str(trimmed, DATE_FORMAT).ok()
                                                       .and_then(|date| date.and_hms_opt(0, 0, 0))
                                                       .map(Self)
                                                       .ok_or_else(|| RuntimeError::InvalidInstant { text: text.to_string() })
    }

    /// Moves the instant by a number of seconds, rounded to the nearest whole
    /// second.
    ///
    /// # Errors
    /// `NumericOverflow` when the result falls outside the supported range of
    /// dates.
    pub fn offset(self, seconds: &Number) -> Result<Self, RuntimeError> {
        let delta = f64_to_i64_checked(seconds.to_f64()?.round())?;
        TimeDelta::try_seconds(delta).and_then(|delta| self.0.checked_add_signed(delta))
                                     .map(Self)
                                     .ok_or(RuntimeError::NumericOverflow)
    }

    /// Seconds from `earlier` to `self`.
    #[must_use]
    pub fn since(self, earlier: Self) -> Number {
        Number::from(self.0.signed_duration_since(earlier.0).num_seconds())
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S"))
    }
}
