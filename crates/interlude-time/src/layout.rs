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

//! Keyed, ordered sequences of time intervals.
//!
//! A [`TimeLayout`] names a sequence of [`TimeInterval`]s, e.g.
//! `"k-p24h-n7-1"`, so that several value series can share the same time
//! axis. Each entry is built from a start time and an optional stop time;
//! entries without a stop are instants.
//!
//! Layouts are expected to be sorted ascending by start and to be
//! non-overlapping (endpoints may touch). Construction does not enforce this,
//! but [`TimeLayout::is_ordered`] reports whether it holds, and the
//! nearest-match lookups are only meaningful when it does.

use crate::time::{TimeInterval, parse_rfc3339};
use chrono::{DateTime, TimeZone};
use interlude_core::{
    math::interval::IntervalError,
    nearest::{Tolerance, find_closest},
};
use tracing::debug;

/// The error type for building a [`TimeLayout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The layout key is empty.
    EmptyKey,
    /// The entry at `index` has a stop time before its start time.
    Interval {
        /// The position of the offending entry.
        index: usize,
        /// The underlying interval error.
        source: IntervalError<i64>,
    },
    /// The timestamp at `index` is not valid RFC 3339.
    Timestamp {
        /// The position of the offending timestamp.
        index: usize,
        /// The underlying parse error.
        source: chrono::ParseError,
    },
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyKey => write!(f, "Time layout key must not be empty"),
            Self::Interval { index, source } => {
                write!(f, "Invalid interval at position {}: {}", index, source)
            }
            Self::Timestamp { index, source } => {
                write!(f, "Invalid timestamp at position {}: {}", index, source)
            }
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EmptyKey => None,
            Self::Interval { source, .. } => Some(source),
            Self::Timestamp { source, .. } => Some(source),
        }
    }
}

/// A named, ordered sequence of time intervals.
///
/// Two layouts are equal when their keys are equal; the key identifies the
/// layout within a document.
#[derive(Debug, Clone)]
pub struct TimeLayout {
    key: String,
    intervals: Vec<TimeInterval>,
    has_stop_times: bool,
}

impl TimeLayout {
    /// Creates an empty layout.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::EmptyKey`] if `key` is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, LayoutError> {
        let key = key.into();
        if key.is_empty() {
            return Err(LayoutError::EmptyKey);
        }
        Ok(Self {
            key,
            intervals: Vec::new(),
            has_stop_times: false,
        })
    }

    /// Builds a layout from millisecond start and stop times.
    ///
    /// Entry `n` spans `starts[n]..=stops[n]` when `stops` has an `n`-th
    /// element and is the instant `starts[n]` otherwise. Surplus stop times
    /// are ignored. The layout reports stop times whenever `stops` is
    /// non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::EmptyKey`] for an empty key, or
    /// [`LayoutError::Interval`] for the first entry whose stop precedes
    /// its start.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use interlude_time::layout::TimeLayout;
    /// let layout = TimeLayout::from_millis("k-p12h-n2-1", &[0, 100, 200], &[50, 150])?;
    /// assert_eq!(layout.len(), 3);
    /// assert!(layout.has_stop_times());
    /// assert!(layout.intervals()[2].is_instant());
    /// # Ok::<(), interlude_time::layout::LayoutError>(())
    /// ```
    pub fn from_millis(
        key: impl Into<String>,
        starts: &[i64],
        stops: &[i64],
    ) -> Result<Self, LayoutError> {
        Self::build(key, starts, stops, !stops.is_empty())
    }

    fn build(
        key: impl Into<String>,
        starts: &[i64],
        stops: &[i64],
        has_stop_times: bool,
    ) -> Result<Self, LayoutError> {
        let mut layout = Self::new(key)?;
        layout.has_stop_times = has_stop_times;
        layout.intervals.reserve(starts.len());

        for (index, &start) in starts.iter().enumerate() {
            let stop = stops.get(index).copied().unwrap_or(start);
            let interval = TimeInterval::try_new(start, stop)
                .map_err(|source| LayoutError::Interval { index, source })?;
            layout.intervals.push(interval);
        }

        debug!(
            key = %layout.key,
            len = layout.intervals.len(),
            has_stop_times = layout.has_stop_times,
            "built time layout"
        );
        Ok(layout)
    }

    /// Builds a layout from RFC 3339 start and stop timestamps.
    ///
    /// Pairing follows [`TimeLayout::from_millis`]; surplus stop timestamps
    /// are not parsed.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Timestamp`] for the first malformed
    /// timestamp, or any error of [`TimeLayout::from_millis`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use interlude_time::layout::TimeLayout;
    /// let layout = TimeLayout::from_rfc3339(
    ///     "k-p24h-n7-1",
    ///     &["2012-08-20T08:00:00-07:00", "2012-08-21T08:00:00-07:00"],
    ///     &["2012-08-20T20:00:00-07:00", "2012-08-21T20:00:00-07:00"],
    /// )?;
    /// assert_eq!(layout.key(), "k-p24h-n7-1");
    /// assert_eq!(layout.intervals()[0].len(), 12 * 3_600_000);
    /// # Ok::<(), interlude_time::layout::LayoutError>(())
    /// ```
    pub fn from_rfc3339<S>(
        key: impl Into<String>,
        starts: &[S],
        stops: &[S],
    ) -> Result<Self, LayoutError>
    where
        S: AsRef<str>,
    {
        let parse_all = |stamps: &[S]| -> Result<Vec<i64>, LayoutError> {
            stamps
                .iter()
                .enumerate()
                .map(|(index, s)| {
                    parse_rfc3339(s.as_ref())
                        .map_err(|source| LayoutError::Timestamp { index, source })
                })
                .collect()
        };

        // Surplus stops are never paired, so they are not parsed either.
        let paired = starts.len().min(stops.len());
        let start_ms = parse_all(starts)?;
        let stop_ms = parse_all(&stops[..paired])?;
        Self::build(key, &start_ms, &stop_ms, !stops.is_empty())
    }

    /// Appends the entry starting at `start`, spanning to `stop` when one is
    /// given and an instant otherwise.
    ///
    /// As with [`TimeLayout::from_millis`], supplying a stop marks the layout
    /// as carrying stop times, even when it equals the start. Ordering is not
    /// checked.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Interval`] if `stop` precedes `start`; the
    /// layout is left unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use interlude_time::layout::TimeLayout;
    /// let mut layout = TimeLayout::new("k-p3h")?;
    /// layout.push(0, None)?;
    /// assert!(!layout.has_stop_times());
    /// layout.push(100, Some(100))?;
    /// assert!(layout.has_stop_times());
    /// assert!(layout.push(300, Some(200)).is_err());
    /// assert_eq!(layout.len(), 2);
    /// # Ok::<(), interlude_time::layout::LayoutError>(())
    /// ```
    pub fn push(&mut self, start: i64, stop: Option<i64>) -> Result<(), LayoutError> {
        let index = self.intervals.len();
        let interval = TimeInterval::try_new(start, stop.unwrap_or(start))
            .map_err(|source| LayoutError::Interval { index, source })?;
        self.has_stop_times |= stop.is_some();
        self.intervals.push(interval);
        Ok(())
    }

    /// Returns the layout key.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the intervals in layout order.
    #[inline]
    pub fn intervals(&self) -> &[TimeInterval] {
        &self.intervals
    }

    /// Returns the interval at `idx`, if any.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<&TimeInterval> {
        self.intervals.get(idx)
    }

    /// Returns the number of intervals.
    #[inline]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Returns `true` if the layout holds no intervals.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Returns `true` if the layout was built with explicit stop times.
    #[inline]
    pub fn has_stop_times(&self) -> bool {
        self.has_stop_times
    }

    /// Returns `true` if the intervals are sorted by start and no interval
    /// stops after its successor starts.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use interlude_time::layout::TimeLayout;
    /// assert!(TimeLayout::from_millis("a", &[0, 10, 20], &[10, 20, 20])?.is_ordered());
    /// assert!(!TimeLayout::from_millis("b", &[0, 10], &[15, 20])?.is_ordered());
    /// # Ok::<(), interlude_time::layout::LayoutError>(())
    /// ```
    pub fn is_ordered(&self) -> bool {
        self.intervals
            .windows(2)
            .all(|w| w[0].start() <= w[1].start() && w[0].stop() <= w[1].start())
    }

    /// Finds the index of the interval closest to `point_ms` within
    /// `tolerance`. See [`find_closest`] for the exact rules.
    #[inline]
    pub fn find_closest_index(&self, point_ms: i64, tolerance: &Tolerance) -> Option<usize> {
        find_closest(&self.intervals, point_ms, tolerance)
    }

    /// Like [`TimeLayout::find_closest_index`], for a calendar instant.
    #[inline]
    pub fn find_closest_at<Tz: TimeZone>(
        &self,
        instant: &DateTime<Tz>,
        tolerance: &Tolerance,
    ) -> Option<usize> {
        self.find_closest_index(instant.timestamp_millis(), tolerance)
    }
}

impl PartialEq for TimeLayout {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for TimeLayout {}

impl std::hash::Hash for TimeLayout {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl AsRef<[TimeInterval]> for TimeLayout {
    #[inline]
    fn as_ref(&self) -> &[TimeInterval] {
        &self.intervals
    }
}

impl std::fmt::Display for TimeLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TimeLayout({}, {} intervals)", self.key, self.intervals.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{MILLIS_PER_HOUR, within_hours};
    use chrono::Utc;
    use std::collections::HashSet;

    const H: i64 = MILLIS_PER_HOUR;

    #[test]
    fn test_new_rejects_empty_key() {
        assert_eq!(TimeLayout::new("").unwrap_err(), LayoutError::EmptyKey);
        let layout = TimeLayout::new("k-p3h-n40-3").unwrap();
        assert!(layout.is_empty());
        assert!(!layout.has_stop_times());
    }

    #[test]
    fn test_from_millis_instants_only() {
        let layout = TimeLayout::from_millis("k-p3h", &[0, 3 * H, 6 * H], &[]).unwrap();
        assert!(!layout.has_stop_times());
        assert!(layout.intervals().iter().all(|iv| iv.is_instant()));
        assert!(layout.is_ordered());
    }

    #[test]
    fn test_from_millis_reversed_entry() {
        let err = TimeLayout::from_millis("bad", &[0, 10], &[5, 2]).unwrap_err();
        assert_eq!(
            err,
            LayoutError::Interval {
                index: 1,
                source: IntervalError::ReversedBounds { start: 10, stop: 2 },
            }
        );
        assert_eq!(
            err.to_string(),
            "Invalid interval at position 1: Invalid interval: start 10 is greater than stop 2"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_from_rfc3339_reports_position() {
        let err = TimeLayout::from_rfc3339(
            "k",
            &["2012-08-20T08:00:00-07:00", "not a time"],
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::Timestamp { index: 1, .. }));
    }

    #[test]
    fn test_push() {
        let mut layout = TimeLayout::new("k").unwrap();
        layout.push(0, None).unwrap();
        assert!(!layout.has_stop_times());
        layout.push(H, Some(2 * H)).unwrap();
        assert!(layout.has_stop_times());
        assert_eq!(layout.len(), 2);
        assert_eq!(layout.get(0), Some(&TimeInterval::instant(0)));
        assert_eq!(layout.get(1), Some(&TimeInterval::new(H, 2 * H)));
        assert_eq!(layout.get(2), None);

        let err = layout.push(5 * H, Some(4 * H)).unwrap_err();
        assert!(matches!(err, LayoutError::Interval { index: 2, .. }));
        assert_eq!(layout.len(), 2);
    }

    #[test]
    fn test_stop_times_agree_between_push_and_from_millis() {
        // Explicit stops equal to their starts still count as stop times.
        let built = TimeLayout::from_millis("k", &[0, H], &[0, H]).unwrap();
        let mut pushed = TimeLayout::new("k").unwrap();
        pushed.push(0, Some(0)).unwrap();
        pushed.push(H, Some(H)).unwrap();

        assert!(built.intervals().iter().all(|iv| iv.is_instant()));
        assert_eq!(built.intervals(), pushed.intervals());
        assert!(built.has_stop_times());
        assert_eq!(built.has_stop_times(), pushed.has_stop_times());

        let mut bare = TimeLayout::new("k").unwrap();
        bare.push(0, None).unwrap();
        bare.push(H, None).unwrap();
        let no_stops = TimeLayout::from_millis("k", &[0, H], &[]).unwrap();
        assert_eq!(bare.intervals(), no_stops.intervals());
        assert_eq!(bare.has_stop_times(), no_stops.has_stop_times());
    }

    #[test]
    fn test_from_rfc3339_ignores_surplus_stops() {
        let layout = TimeLayout::from_rfc3339(
            "k",
            &["2012-08-20T08:00:00-07:00"],
            &["2012-08-20T20:00:00-07:00", "not a time"],
        )
        .unwrap();
        assert_eq!(layout.len(), 1);
        assert_eq!(layout.intervals()[0].len(), 12 * H);
        assert!(layout.has_stop_times());

        // A malformed paired stop is still reported.
        let err = TimeLayout::from_rfc3339(
            "k",
            &["2012-08-20T08:00:00-07:00", "2012-08-21T08:00:00-07:00"],
            &["2012-08-20T20:00:00-07:00", "not a time"],
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::Timestamp { index: 1, .. }));
    }

    #[test]
    fn test_equality_by_key() {
        let a = TimeLayout::from_millis("k-1", &[0], &[]).unwrap();
        let b = TimeLayout::from_millis("k-1", &[5, 6], &[]).unwrap();
        let c = TimeLayout::from_millis("k-2", &[0], &[]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<TimeLayout> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_find_closest_index() {
        // Twelve-hour day periods, one per day.
        let starts: Vec<i64> = (0..3).map(|d| d * 24 * H + 8 * H).collect();
        let stops: Vec<i64> = starts.iter().map(|s| s + 12 * H).collect();
        let layout = TimeLayout::from_millis("k-p24h-n3-1", &starts, &stops).unwrap();

        let tol = within_hours(24.0);
        // Inside the first period the forward candidate is still reported.
        assert_eq!(layout.find_closest_index(9 * H, &tol), Some(1));
        assert_eq!(layout.find_closest_index(24 * H + 10 * H, &tol), Some(1));
        // Overnight, between day 0 and day 1: forward candidate.
        assert_eq!(layout.find_closest_index(21 * H, &tol), Some(1));
        assert_eq!(layout.find_closest_index(21 * H, &within_hours(0.5)), None);
        // Before the first period.
        assert_eq!(layout.find_closest_index(0, &tol), Some(0));
        assert_eq!(layout.find_closest_index(0, &within_hours(8.0)), None);

        let at = Utc.timestamp_millis_opt(2 * 24 * H + 9 * H).unwrap();
        assert_eq!(layout.find_closest_at(&at, &tol), Some(2));
    }

    #[test]
    fn test_display() {
        let layout = TimeLayout::from_millis("k-p12h", &[0, 1], &[]).unwrap();
        assert_eq!(layout.to_string(), "TimeLayout(k-p12h, 2 intervals)");
    }
}
