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

use num_traits::PrimInt;
use std::cmp::{max, min};

/// A closed interval `[start, stop]` over a primitive integer domain.
///
/// Both endpoints belong to the interval. An interval whose endpoints
/// coincide is an *instant*: it still contains exactly one point.
///
/// Ordering, equality and hashing are structural on `(start, stop)`.
///
/// # Invariants
/// `start` must always be less than or equal to `stop`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClosedInterval<T>
where
    T: PrimInt,
{
    start: T,
    stop: T,
}

/// The error returned when an interval cannot be built from the given bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalError<T> {
    /// The start bound lies after the stop bound.
    ReversedBounds {
        /// The offending start bound.
        start: T,
        /// The offending stop bound.
        stop: T,
    },
}

impl<T> std::fmt::Display for IntervalError<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReversedBounds { start, stop } => write!(
                f,
                "Invalid interval: start {} is greater than stop {}",
                start, stop
            ),
        }
    }
}

impl<T> std::error::Error for IntervalError<T> where T: std::fmt::Debug + std::fmt::Display {}

impl<T> ClosedInterval<T>
where
    T: PrimInt,
{
    /// Creates a new `ClosedInterval`.
    ///
    /// # Panics
    ///
    /// Panics if `start > stop`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use interlude_core::math::interval::ClosedInterval;
    ///
    /// let iv = ClosedInterval::new(0, 10);
    /// assert_eq!(iv.len(), 10);
    /// ```
    #[inline]
    pub fn new(start: T, stop: T) -> Self {
        assert!(
            start <= stop,
            "Invalid interval: start must be less than or equal to stop"
        );
        Self { start, stop }
    }

    /// Creates a new `ClosedInterval` if the bounds are ordered.
    ///
    /// # Errors
    ///
    /// Returns [`IntervalError::ReversedBounds`] if `start > stop`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use interlude_core::math::interval::{ClosedInterval, IntervalError};
    ///
    /// assert!(ClosedInterval::try_new(0, 10).is_ok());
    /// assert_eq!(
    ///     ClosedInterval::try_new(10, 0),
    ///     Err(IntervalError::ReversedBounds { start: 10, stop: 0 })
    /// );
    /// ```
    #[inline]
    pub fn try_new(start: T, stop: T) -> Result<Self, IntervalError<T>> {
        if start <= stop {
            Ok(Self { start, stop })
        } else {
            Err(IntervalError::ReversedBounds { start, stop })
        }
    }

    /// Creates a new `ClosedInterval` without checking invariants in release builds.
    ///
    /// The caller must ensure `start <= stop`.
    /// This function contains a `debug_assert!` to catch errors during development.
    #[inline]
    pub fn new_unchecked(start: T, stop: T) -> Self {
        debug_assert!(
            start <= stop,
            "Invalid interval: start must be less than or equal to stop"
        );
        Self { start, stop }
    }

    /// Creates an instant, an interval whose start and stop coincide.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use interlude_core::math::interval::ClosedInterval;
    ///
    /// let now = ClosedInterval::instant(42);
    /// assert!(now.is_instant());
    /// assert!(now.contains_point(42));
    /// ```
    #[inline]
    pub fn instant(at: T) -> Self {
        Self {
            start: at,
            stop: at,
        }
    }

    /// Returns the inclusive start bound of the interval.
    #[inline]
    pub const fn start(&self) -> T {
        self.start
    }

    /// Returns the inclusive stop bound of the interval.
    #[inline]
    pub const fn stop(&self) -> T {
        self.stop
    }

    /// Returns `true` if the interval has zero length (`start == stop`).
    #[inline]
    pub fn is_instant(&self) -> bool {
        self.start == self.stop
    }

    /// Returns the length of the interval (`stop - start`).
    ///
    /// An instant has length zero even though it contains one point. Lengths
    /// that do not fit in `T` saturate at `T::max_value()`.
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> T {
        self.stop.saturating_sub(self.start)
    }

    /// Returns `true` if `value` lies within `[start, stop]`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use interlude_core::math::interval::ClosedInterval;
    ///
    /// let iv = ClosedInterval::new(0, 10);
    /// assert!(iv.contains_point(0));
    /// assert!(iv.contains_point(10));
    /// assert!(!iv.contains_point(11));
    /// ```
    #[inline]
    pub fn contains_point(&self, value: T) -> bool {
        self.start <= value && value <= self.stop
    }

    /// Returns `true` if the interval starts strictly after `value`.
    #[inline]
    pub fn after(&self, value: T) -> bool {
        self.start > value
    }

    /// Returns `true` if the interval stops strictly before `value`.
    #[inline]
    pub fn before(&self, value: T) -> bool {
        self.stop < value
    }

    /// Returns the distance from `value` to the nearest endpoint, or zero
    /// if the interval contains `value`.
    ///
    /// Distances that do not fit in `T` saturate at `T::max_value()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use interlude_core::math::interval::ClosedInterval;
    ///
    /// let iv = ClosedInterval::new(10, 20);
    /// assert_eq!(iv.distance_to(15), 0);
    /// assert_eq!(iv.distance_to(4), 6);
    /// assert_eq!(iv.distance_to(23), 3);
    /// ```
    #[inline]
    pub fn distance_to(&self, value: T) -> T {
        if self.contains_point(value) {
            T::zero()
        } else if value < self.start {
            self.start.saturating_sub(value)
        } else {
            value.saturating_sub(self.stop)
        }
    }

    /// Returns the smaller of the distances from this interval to either
    /// endpoint of `other`.
    ///
    /// This is zero whenever one of `other`'s endpoints lies within `self`.
    #[inline]
    pub fn distance_to_interval(&self, other: Self) -> T {
        min(self.distance_to(other.start), self.distance_to(other.stop))
    }

    /// Returns `true` if the intervals share at least one point.
    ///
    /// Touching endpoints count as shared, since both bounds are inclusive.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use interlude_core::math::interval::ClosedInterval;
    ///
    /// let a = ClosedInterval::new(0, 10);
    /// assert!(a.intersects(ClosedInterval::new(10, 20)));
    /// assert!(!a.intersects(ClosedInterval::new(11, 20)));
    /// ```
    #[inline]
    pub fn intersects(&self, other: Self) -> bool {
        self.start <= other.stop && other.start <= self.stop
    }

    /// Returns `true` if every point of `other` lies within `self`.
    #[inline]
    pub fn contains_interval(&self, other: Self) -> bool {
        self.start <= other.start && other.stop <= self.stop
    }

    /// Calculates the intersection of two intervals.
    ///
    /// Returns `None` if the intervals share no point. Intervals touching at a
    /// single endpoint intersect in an instant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use interlude_core::math::interval::ClosedInterval;
    ///
    /// let a = ClosedInterval::new(0, 10);
    /// assert_eq!(a.intersection(ClosedInterval::new(5, 15)), Some(ClosedInterval::new(5, 10)));
    /// assert_eq!(a.intersection(ClosedInterval::new(10, 15)), Some(ClosedInterval::instant(10)));
    /// assert_eq!(a.intersection(ClosedInterval::new(12, 15)), None);
    /// ```
    #[inline]
    pub fn intersection(&self, other: Self) -> Option<Self> {
        let start = max(self.start, other.start);
        let stop = min(self.stop, other.stop);

        if start <= stop {
            Some(Self::new_unchecked(start, stop))
        } else {
            None
        }
    }

    /// Returns the smallest interval covering both `self` and `other`.
    ///
    /// Unlike a union, the hull also covers any gap between the two.
    #[inline]
    pub fn hull(&self, other: Self) -> Self {
        Self::new_unchecked(min(self.start, other.start), max(self.stop, other.stop))
    }
}

impl<T> AsRef<ClosedInterval<T>> for ClosedInterval<T>
where
    T: PrimInt,
{
    #[inline]
    fn as_ref(&self) -> &ClosedInterval<T> {
        self
    }
}

impl<T> std::fmt::Debug for ClosedInterval<T>
where
    T: PrimInt + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClosedInterval")
            .field("start", &self.start)
            .field("stop", &self.stop)
            .finish()
    }
}

impl<T> std::fmt::Display for ClosedInterval<T>
where
    T: PrimInt + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.stop)
    }
}

impl<T> std::ops::RangeBounds<T> for ClosedInterval<T>
where
    T: PrimInt,
{
    fn start_bound(&self) -> std::ops::Bound<&T> {
        std::ops::Bound::Included(&self.start)
    }

    fn end_bound(&self) -> std::ops::Bound<&T> {
        std::ops::Bound::Included(&self.stop)
    }
}

impl<T> From<std::ops::RangeInclusive<T>> for ClosedInterval<T>
where
    T: PrimInt,
{
    #[inline]
    fn from(range: std::ops::RangeInclusive<T>) -> Self {
        let (start, stop) = range.into_inner();
        Self::new(start, stop)
    }
}

impl<T> From<ClosedInterval<T>> for std::ops::RangeInclusive<T>
where
    T: PrimInt,
{
    #[inline]
    fn from(iv: ClosedInterval<T>) -> Self {
        iv.start..=iv.stop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ops::{Bound, RangeBounds};

    #[test]
    fn test_construction_valid() {
        let iv = ClosedInterval::new(10, 20);
        assert_eq!(iv.start(), 10);
        assert_eq!(iv.stop(), 20);
        assert_eq!(iv.len(), 10);
        assert!(!iv.is_instant());
    }

    #[test]
    fn test_construction_instant() {
        let iv = ClosedInterval::new(10, 10);
        assert_eq!(iv, ClosedInterval::instant(10));
        assert_eq!(iv.len(), 0);
        assert!(iv.is_instant());
        assert!(iv.contains_point(10));
    }

    #[test]
    fn test_try_new() {
        assert!(ClosedInterval::try_new(5, 10).is_ok());
        assert!(ClosedInterval::try_new(5, 5).is_ok());
        assert_eq!(
            ClosedInterval::try_new(10, 5),
            Err(IntervalError::ReversedBounds { start: 10, stop: 5 })
        );
    }

    #[test]
    #[should_panic(expected = "Invalid interval")]
    fn test_new_panic() {
        ClosedInterval::new(10, 5);
    }

    #[test]
    fn test_error_display() {
        let err = ClosedInterval::try_new(7i64, 3).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid interval: start 7 is greater than stop 3"
        );
    }

    #[test]
    fn test_contains_point_inclusive() {
        let a = ClosedInterval::new(0, 10);
        assert!(a.contains_point(0));
        assert!(a.contains_point(5));
        assert!(a.contains_point(10));
        assert!(!a.contains_point(-1));
        assert!(!a.contains_point(11));
    }

    #[test]
    fn test_after_and_before() {
        let a = ClosedInterval::new(5, 10);
        assert!(a.after(4));
        assert!(!a.after(5));
        assert!(a.before(11));
        assert!(!a.before(10));
    }

    #[test]
    fn test_distance_to() {
        let a = ClosedInterval::new(10, 20);
        assert_eq!(a.distance_to(10), 0);
        assert_eq!(a.distance_to(20), 0);
        assert_eq!(a.distance_to(0), 10);
        assert_eq!(a.distance_to(25), 5);

        // Unsigned endpoints never subtract past zero.
        let b: ClosedInterval<u32> = ClosedInterval::new(10, 20);
        assert_eq!(b.distance_to(3), 7);
        assert_eq!(b.distance_to(30), 10);
    }

    #[test]
    fn test_extreme_bounds_saturate() {
        let top = ClosedInterval::new(i32::MAX - 1, i32::MAX);
        assert_eq!(top.distance_to(i32::MIN), i32::MAX);
        assert_eq!(top.distance_to(0), i32::MAX - 1);

        let bottom = ClosedInterval::new(i32::MIN, i32::MIN + 1);
        assert_eq!(bottom.distance_to(i32::MAX), i32::MAX);
        assert_eq!(
            bottom.distance_to_interval(ClosedInterval::new(i32::MAX - 1, i32::MAX)),
            i32::MAX
        );

        assert_eq!(ClosedInterval::new(i32::MIN, i32::MAX).len(), i32::MAX);
        assert_eq!(ClosedInterval::new(i64::MIN, 0).len(), i64::MAX);
        assert_eq!(ClosedInterval::new(0u8, u8::MAX).len(), u8::MAX);
    }

    #[test]
    fn test_distance_to_interval() {
        let a = ClosedInterval::new(10, 20);
        assert_eq!(a.distance_to_interval(ClosedInterval::new(22, 30)), 2);
        assert_eq!(a.distance_to_interval(ClosedInterval::new(0, 4)), 6);
        assert_eq!(a.distance_to_interval(ClosedInterval::new(15, 40)), 0);
    }

    #[test]
    fn test_intersects() {
        let a = ClosedInterval::new(0, 10);

        // Disjoint left
        assert!(!a.intersects(ClosedInterval::new(-5, -1)));
        // Touching left
        assert!(a.intersects(ClosedInterval::new(-5, 0)));
        // Contained
        assert!(a.intersects(ClosedInterval::new(2, 8)));
        // Identity
        assert!(a.intersects(a));
        // Touching right
        assert!(a.intersects(ClosedInterval::new(10, 15)));
        // Disjoint right
        assert!(!a.intersects(ClosedInterval::new(11, 15)));
    }

    #[test]
    fn test_contains_interval() {
        let main = ClosedInterval::new(0, 10);
        assert!(main.contains_interval(main));
        assert!(main.contains_interval(ClosedInterval::new(2, 8)));
        assert!(main.contains_interval(ClosedInterval::instant(10)));
        assert!(!main.contains_interval(ClosedInterval::new(-1, 5)));
        assert!(!main.contains_interval(ClosedInterval::new(5, 11)));
    }

    #[test]
    fn test_intersection_and_hull() {
        let a = ClosedInterval::new(0, 10);
        let b = ClosedInterval::new(20, 30);
        assert_eq!(a.intersection(b), None);
        assert_eq!(a.hull(b), ClosedInterval::new(0, 30));
        assert_eq!(b.hull(a), ClosedInterval::new(0, 30));
    }

    #[test]
    fn test_structural_ordering() {
        let mut v = vec![
            ClosedInterval::new(4, 6),
            ClosedInterval::new(2, 8),
            ClosedInterval::new(2, 2),
            ClosedInterval::new(4, 4),
        ];
        v.sort();
        assert_eq!(
            v,
            vec![
                ClosedInterval::new(2, 2),
                ClosedInterval::new(2, 8),
                ClosedInterval::new(4, 4),
                ClosedInterval::new(4, 6),
            ]
        );
    }

    #[test]
    fn test_traits_display_debug() {
        let a = ClosedInterval::new(10, 20);
        assert_eq!(format!("{}", a), "[10, 20]");
        assert_eq!(
            format!("{:?}", a),
            "ClosedInterval { start: 10, stop: 20 }"
        );
    }

    #[test]
    fn test_range_conversions() {
        let iv = ClosedInterval::from(3..=9);
        assert_eq!(iv.start(), 3);
        assert_eq!(iv.stop(), 9);

        let back: std::ops::RangeInclusive<i32> = iv.into();
        assert_eq!(back, 3..=9);

        match iv.start_bound() {
            Bound::Included(&x) => assert_eq!(x, 3),
            _ => panic!("Wrong start bound"),
        }
        match iv.end_bound() {
            Bound::Included(&x) => assert_eq!(x, 9),
            _ => panic!("Wrong end bound"),
        }
    }
}
