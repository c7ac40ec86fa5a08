// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Millisecond time intervals and hour-based distances.
//!
//! A [`TimeInterval`] is a [`ClosedInterval`] whose endpoints are
//! milliseconds since the Unix epoch. Calendar conversions go through
//! `chrono`; distances are reported in (fractional) hours.

use chrono::{DateTime, TimeZone, Utc};
use interlude_core::{
    math::interval::{ClosedInterval, IntervalError},
    nearest::Tolerance,
};

/// A closed interval of milliseconds since the Unix epoch.
pub type TimeInterval = ClosedInterval<i64>;

/// The number of milliseconds in one hour.
pub const MILLIS_PER_HOUR: i64 = 1000 * 60 * 60;

/// Converts a (possibly negative) millisecond count into hours.
///
/// # Examples
///
/// ```rust
/// # use interlude_time::time::millis_to_hours;
/// assert_eq!(millis_to_hours(5_400_000), 1.5);
/// ```
#[inline]
pub fn millis_to_hours(ms: i64) -> f64 {
    ms as f64 / MILLIS_PER_HOUR as f64
}

/// Returns the signed difference in hours from `from_ms` to `to_ms`.
///
/// # Examples
///
/// ```rust
/// # use interlude_time::time::hours_between;
/// assert_eq!(hours_between(0, 7_200_000), 2.0);
/// assert_eq!(hours_between(7_200_000, 0), -2.0);
/// ```
#[inline]
pub fn hours_between(from_ms: i64, to_ms: i64) -> f64 {
    (to_ms as f64 - from_ms as f64) / MILLIS_PER_HOUR as f64
}

/// A nearest-match [`Tolerance`] of `hours` over millisecond endpoints.
///
/// # Examples
///
/// ```rust
/// # use interlude_time::time::within_hours;
/// let tol = within_hours(24.0);
/// assert_eq!(tol.max_distance(), 24.0);
/// assert_eq!(tol.to_units(3_600_000i64), 1.0);
/// ```
#[inline]
pub fn within_hours(hours: f64) -> Tolerance {
    Tolerance::new(hours, MILLIS_PER_HOUR as f64)
}

/// Parses an RFC 3339 timestamp such as `2012-08-20T08:00:00-07:00` into
/// milliseconds since the Unix epoch.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns the `chrono` parse error for malformed input.
///
/// # Examples
///
/// ```rust
/// # use interlude_time::time::parse_rfc3339;
/// assert_eq!(parse_rfc3339("1970-01-01T01:00:00+00:00"), Ok(3_600_000));
/// assert_eq!(parse_rfc3339("1970-01-01T01:00:00+01:00"), Ok(0));
/// assert!(parse_rfc3339("yesterday").is_err());
/// ```
pub fn parse_rfc3339(s: &str) -> Result<i64, chrono::ParseError> {
    Ok(DateTime::parse_from_rfc3339(s.trim())?.timestamp_millis())
}

/// Calendar and hour-based helpers for [`TimeInterval`].
pub trait TimeIntervalExt: Sized {
    /// Builds an interval spanning two calendar instants.
    ///
    /// # Errors
    ///
    /// Returns [`IntervalError::ReversedBounds`] if `start` is after `stop`.
    fn from_datetimes<Tz: TimeZone>(
        start: &DateTime<Tz>,
        stop: &DateTime<Tz>,
    ) -> Result<Self, IntervalError<i64>>;

    /// Builds the instant at a calendar time.
    fn at_datetime<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self;

    /// The start as a UTC calendar time, if representable.
    fn start_datetime(&self) -> Option<DateTime<Utc>>;

    /// The stop as a UTC calendar time, if representable.
    fn stop_datetime(&self) -> Option<DateTime<Utc>>;

    /// Hours from `ms` to the nearest endpoint, or `0.0` when contained.
    fn hours_apart(&self, ms: i64) -> f64;

    /// The smaller of [`TimeIntervalExt::hours_apart`] evaluated at either
    /// endpoint of `other`.
    fn hours_apart_from(&self, other: &Self) -> f64;
}

impl TimeIntervalExt for TimeInterval {
    fn from_datetimes<Tz: TimeZone>(
        start: &DateTime<Tz>,
        stop: &DateTime<Tz>,
    ) -> Result<Self, IntervalError<i64>> {
        TimeInterval::try_new(start.timestamp_millis(), stop.timestamp_millis())
    }

    #[inline]
    fn at_datetime<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        TimeInterval::instant(instant.timestamp_millis())
    }

    #[inline]
    fn start_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.start())
    }

    #[inline]
    fn stop_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.stop())
    }

    #[inline]
    fn hours_apart(&self, ms: i64) -> f64 {
        millis_to_hours(self.distance_to(ms))
    }

    #[inline]
    fn hours_apart_from(&self, other: &Self) -> f64 {
        millis_to_hours(self.distance_to_interval(*other))
    }
}
