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

//! Value series aligned with a shared [`TimeLayout`].
//!
//! A [`Series`] pairs every interval of a layout with one value, e.g. the
//! forecast temperature for each three-hour period. Several series may
//! share a layout through an [`Arc`].
//!
//! Lookups come in two flavours: by relation (which samples relate to a
//! window in a given way) and by instant (which sample describes a given
//! moment).

use crate::{
    layout::TimeLayout,
    time::{TimeInterval, within_hours},
};
use interlude_core::{
    matcher::exemplar_accepts_indices,
    nearest::{Tolerance, select_at},
    predicate::RelationPredicate,
    relation::{Classify, RelationCapability, RelationCode, classify},
};
use std::sync::Arc;
use tracing::debug;

/// The units reported for series created without any.
pub const DEFAULT_UNITS: &str = "?";

/// The tolerance, in hours, used by [`Series::sample_at`].
pub const DEFAULT_LOOKUP_HOURS: f64 = 24.0;

/// The error type for building a [`Series`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeriesError {
    /// The number of values differs from the number of layout intervals.
    LengthMismatch {
        /// The key of the layout.
        layout: String,
        /// The number of intervals in the layout.
        intervals: usize,
        /// The number of values supplied.
        values: usize,
    },
}

impl std::fmt::Display for SeriesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LengthMismatch {
                layout,
                intervals,
                values,
            } => write!(
                f,
                "Layout {} has {} intervals but {} values were given",
                layout, intervals, values
            ),
        }
    }
}

impl std::error::Error for SeriesError {}

/// One value together with the interval it describes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample<V> {
    /// The interval the value applies to.
    pub interval: TimeInterval,
    /// The value.
    pub value: V,
}

impl<V> Sample<V> {
    /// Creates a new `Sample`.
    #[inline]
    pub fn new(interval: TimeInterval, value: V) -> Self {
        Self { interval, value }
    }
}

impl<V> AsRef<TimeInterval> for Sample<V> {
    #[inline]
    fn as_ref(&self) -> &TimeInterval {
        &self.interval
    }
}

impl<V> Classify for Sample<V> {
    #[inline]
    fn classify(&self, other: &Self) -> RelationCode {
        classify(&self.interval, &other.interval)
    }
}

impl<V> Classify<TimeInterval> for Sample<V> {
    #[inline]
    fn classify(&self, other: &TimeInterval) -> RelationCode {
        classify(&self.interval, other)
    }
}

impl<V> RelationCapability for Sample<V> {
    #[inline]
    fn intrinsic() -> Option<fn(&Self, &Self) -> RelationCode> {
        let intrinsic: fn(&Self, &Self) -> RelationCode =
            |a, b| classify(&a.interval, &b.interval);
        Some(intrinsic)
    }
}

/// A sequence of values, one per interval of a [`TimeLayout`].
#[derive(Debug, Clone)]
pub struct Series<V> {
    layout: Arc<TimeLayout>,
    units: String,
    values: Vec<V>,
}

impl<V> Series<V> {
    /// Creates a new `Series`.
    ///
    /// `units` defaults to [`DEFAULT_UNITS`].
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::LengthMismatch`] unless there is exactly one
    /// value per layout interval.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use std::sync::Arc;
    /// # use interlude_time::layout::TimeLayout;
    /// # use interlude_time::series::Series;
    /// let layout = Arc::new(TimeLayout::from_millis("k-p3h", &[0, 10_800_000], &[])?);
    /// let temps = Series::new(layout.clone(), Some("F"), vec![71, 68])?;
    /// assert_eq!(temps.units(), "F");
    /// assert_eq!(temps.value(1), Some(&68));
    ///
    /// assert!(Series::new(layout, None, vec![71]).is_err());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(
        layout: Arc<TimeLayout>,
        units: Option<&str>,
        values: Vec<V>,
    ) -> Result<Self, SeriesError> {
        if layout.len() != values.len() {
            return Err(SeriesError::LengthMismatch {
                layout: layout.key().to_owned(),
                intervals: layout.len(),
                values: values.len(),
            });
        }

        let units = units.unwrap_or(DEFAULT_UNITS).to_owned();
        debug!(layout = layout.key(), %units, len = values.len(), "built series");
        Ok(Self {
            layout,
            units,
            values,
        })
    }

    /// Returns the shared layout.
    #[inline]
    pub fn layout(&self) -> &Arc<TimeLayout> {
        &self.layout
    }

    /// Returns the units of the values.
    #[inline]
    pub fn units(&self) -> &str {
        &self.units
    }

    /// Returns the value at `idx`, if any.
    #[inline]
    pub fn value(&self, idx: usize) -> Option<&V> {
        self.values.get(idx)
    }

    /// Returns all values in layout order.
    #[inline]
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// Returns the number of values.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the series holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the sample at `idx`, if any.
    #[inline]
    pub fn sample(&self, idx: usize) -> Option<Sample<&V>> {
        let interval = *self.layout.get(idx)?;
        let value = self.values.get(idx)?;
        Some(Sample::new(interval, value))
    }

    /// Returns every sample in layout order.
    pub fn samples(&self) -> Vec<Sample<&V>> {
        self.layout
            .intervals()
            .iter()
            .zip(&self.values)
            .map(|(&interval, value)| Sample::new(interval, value))
            .collect()
    }

    /// Returns the value whose interval is closest to `point_ms`, following
    /// the nearest-match rules of [`TimeLayout::find_closest_index`].
    #[inline]
    pub fn value_closest_to(&self, point_ms: i64, tolerance: &Tolerance) -> Option<&V> {
        self.layout
            .find_closest_index(point_ms, tolerance)
            .and_then(|idx| self.values.get(idx))
    }

    /// Returns the samples `x` such that `predicate` accepts
    /// `(window, x.interval)`, in layout order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use std::sync::Arc;
    /// # use interlude_core::predicate::RelationPredicate;
    /// # use interlude_time::layout::TimeLayout;
    /// # use interlude_time::series::Series;
    /// # use interlude_time::time::TimeInterval;
    /// let layout = TimeLayout::from_millis("k", &[0, 10, 20, 30], &[10, 20, 30, 40])?;
    /// let pop = Series::new(Arc::new(layout), Some("%"), vec![10, 20, 30, 40])?;
    ///
    /// let window = TimeInterval::new(10, 30);
    /// let inside: Vec<_> = pop
    ///     .samples_within(&window, RelationPredicate::CONTAINS)
    ///     .into_iter()
    ///     .map(|s| *s.value)
    ///     .collect();
    /// assert_eq!(inside, vec![20, 30]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn samples_within(
        &self,
        window: &TimeInterval,
        predicate: RelationPredicate,
    ) -> Vec<Sample<&V>> {
        exemplar_accepts_indices(window, self.layout.intervals(), predicate)
            .into_iter()
            .filter_map(|idx| self.sample(idx))
            .collect()
    }

    /// Returns the sample describing the instant `point_ms`, looking at most
    /// [`DEFAULT_LOOKUP_HOURS`] away.
    ///
    /// See [`Series::sample_at_within`].
    #[inline]
    pub fn sample_at(&self, point_ms: i64) -> Option<Sample<&V>> {
        self.sample_at_within(point_ms, &within_hours(DEFAULT_LOOKUP_HOURS))
    }

    /// Returns the sample describing the instant `point_ms`.
    ///
    /// A sample whose interval contains the instant wins outright when it is
    /// the only one. Otherwise the nearest-match search picks among the
    /// containing samples, or among all samples when none contains it.
    pub fn sample_at_within(&self, point_ms: i64, tolerance: &Tolerance) -> Option<Sample<&V>> {
        let samples = self.samples();
        select_at(&samples, point_ms, tolerance).copied()
    }
}
