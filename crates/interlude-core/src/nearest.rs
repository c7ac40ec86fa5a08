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

//! Nearest-match search over a sorted sequence of intervals.
//!
//! The search space is a slice of intervals sorted ascending by start and
//! pairwise non-overlapping (touching endpoints are fine). That ordering is
//! a caller contract and is not checked; results on unsorted input are
//! unspecified but the search always terminates.
//!
//! Distances are measured in ticks of the endpoint domain and converted to
//! the caller's unit through a [`Tolerance`] before they are compared
//! against the maximum allowed distance.

use crate::{
    math::interval::ClosedInterval,
    predicate::RelationPredicate,
    relation::classify,
};
use num_traits::PrimInt;
use tracing::trace;

/// The distance bound of a nearest-match query.
///
/// `max_distance` is expressed in units of `ticks_per_unit` ticks. With
/// millisecond endpoints and `ticks_per_unit = 3_600_000.0`, distances are
/// compared in hours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    max_distance: f64,
    ticks_per_unit: f64,
}

impl Tolerance {
    /// Creates a new `Tolerance`.
    ///
    /// # Panics
    ///
    /// Panics if `ticks_per_unit` is not a positive finite number, or if
    /// `max_distance` is NaN.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use interlude_core::nearest::Tolerance;
    /// let two_hours = Tolerance::new(2.0, 3_600_000.0);
    /// assert_eq!(two_hours.to_units(7_200_000i64), 2.0);
    /// ```
    pub fn new(max_distance: f64, ticks_per_unit: f64) -> Self {
        assert!(
            ticks_per_unit.is_finite() && ticks_per_unit > 0.0,
            "called `Tolerance::new` with a non-positive tick scale: {}",
            ticks_per_unit
        );
        assert!(
            !max_distance.is_nan(),
            "called `Tolerance::new` with a NaN maximum distance"
        );
        Self {
            max_distance,
            ticks_per_unit,
        }
    }

    /// Creates a `Tolerance` measured directly in ticks.
    #[inline]
    pub fn ticks(max_distance: f64) -> Self {
        Self::new(max_distance, 1.0)
    }

    /// Returns a copy of this tolerance with a different bound.
    #[inline]
    pub fn with_max_distance(self, max_distance: f64) -> Self {
        Self::new(max_distance, self.ticks_per_unit)
    }

    /// The maximum allowed distance, in units.
    #[inline]
    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    /// The number of ticks in one unit.
    #[inline]
    pub fn ticks_per_unit(&self) -> f64 {
        self.ticks_per_unit
    }

    /// Converts a tick count into units.
    #[inline]
    pub fn to_units<T>(&self, ticks: T) -> f64
    where
        T: PrimInt,
    {
        as_f64(ticks) / self.ticks_per_unit
    }

    #[inline]
    fn gap_to_units(&self, gap: f64) -> f64 {
        gap / self.ticks_per_unit
    }
}

impl std::fmt::Display for Tolerance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Tolerance({} units of {} ticks)",
            self.max_distance, self.ticks_per_unit
        )
    }
}

// Primitive integers always have an f64 approximation.
#[inline]
fn as_f64<T: PrimInt>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Finds the index of the interval closest to `point`, or `None` if no
/// interval lies within the tolerance.
///
/// * A point before the whole sequence matches index `0` when its distance
///   to the first start is strictly below the bound.
/// * A point after the whole sequence matches the last index when its
///   distance to the last stop is strictly below the bound.
/// * Otherwise the search scans forward from index `1` to the first interval
///   whose stop is not before the point. That interval is returned outright
///   if it contains the point; failing that, it is returned when the smaller
///   of the forward gap (to its start) and the backward gap (to the previous
///   stop) is at most the bound.
///
/// The interior case always answers with the forward candidate, even when the
/// previous interval is strictly closer, and never examines index `0`.
///
/// # Examples
///
/// ```rust
/// # use interlude_core::math::interval::ClosedInterval;
/// # use interlude_core::nearest::{find_closest, Tolerance};
/// let sequence = [ClosedInterval::new(0, 100), ClosedInterval::new(200, 300)];
/// assert_eq!(find_closest(&sequence, 250, &Tolerance::ticks(10.0)), Some(1));
/// assert_eq!(find_closest(&sequence, 150, &Tolerance::ticks(50.0)), Some(1));
/// assert_eq!(find_closest(&sequence, 150, &Tolerance::ticks(49.0)), None);
/// assert_eq!(find_closest(&sequence, 500, &Tolerance::ticks(10.0)), None);
/// ```
pub fn find_closest<I, T>(sequence: &[I], point: T, tolerance: &Tolerance) -> Option<usize>
where
    I: AsRef<ClosedInterval<T>>,
    T: PrimInt,
{
    let (first, last) = match (sequence.first(), sequence.last()) {
        (Some(first), Some(last)) => (first.as_ref(), last.as_ref()),
        _ => return None,
    };
    let last_index = sequence.len() - 1;

    if first.after(point) {
        let distance = tolerance.gap_to_units(as_f64(first.start()) - as_f64(point));
        let found = (distance < tolerance.max_distance()).then_some(0);
        trace!(distance, ?found, "point precedes sequence");
        return found;
    }
    if last.before(point) {
        let distance = tolerance.gap_to_units(as_f64(point) - as_f64(last.stop()));
        let found = (distance < tolerance.max_distance()).then_some(last_index);
        trace!(distance, ?found, "point follows sequence");
        return found;
    }

    // The point lies within the only interval.
    if last_index == 0 {
        return Some(0);
    }

    // Terminates at the latest on the last interval, whose stop is >= point.
    let mut idx = 1;
    while point > sequence[idx].as_ref().stop() {
        idx += 1;
    }

    let candidate = sequence[idx].as_ref();
    if candidate.contains_point(point) {
        return Some(idx);
    }

    let previous = sequence[idx - 1].as_ref();
    let forward = as_f64(candidate.start()) - as_f64(point);
    let backward = as_f64(point) - as_f64(previous.stop());
    let distance = tolerance.gap_to_units(forward.min(backward));

    let found = (distance <= tolerance.max_distance()).then_some(idx);
    trace!(idx, distance, ?found, "point falls between intervals");
    found
}

/// Selects the item describing the instant `point`.
///
/// Items that contain or equal the instant are collected first. If there is
/// exactly one, it is the answer. Otherwise the nearest-match search runs
/// over those items, or over all items when none contains the instant.
///
/// # Examples
///
/// ```rust
/// # use interlude_core::math::interval::ClosedInterval;
/// # use interlude_core::nearest::{select_at, Tolerance};
/// let periods = [ClosedInterval::new(0, 12), ClosedInterval::new(12, 24)];
/// let tol = Tolerance::ticks(6.0);
/// assert_eq!(select_at(&periods, 6, &tol), Some(&periods[0]));
/// assert_eq!(select_at(&periods, 27, &tol), Some(&periods[1]));
/// assert_eq!(select_at(&periods, 40, &tol), None);
/// ```
pub fn select_at<'a, I, T>(items: &'a [I], point: T, tolerance: &Tolerance) -> Option<&'a I>
where
    I: AsRef<ClosedInterval<T>>,
    T: PrimInt,
{
    let now = ClosedInterval::instant(point);
    let containing: Vec<&'a I> = items
        .iter()
        .filter(|item| RelationPredicate::CONTAINS.accept(classify(item.as_ref(), &now)))
        .collect();

    match containing.len() {
        1 => Some(containing[0]),
        0 => find_closest(items, point, tolerance).map(|i| &items[i]),
        _ => find_closest(&containing, point, tolerance).map(|i| containing[i]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Iv = ClosedInterval<i64>;

    fn iv(start: i64, stop: i64) -> Iv {
        ClosedInterval::new(start, stop)
    }

    const HOUR: f64 = 3_600_000.0;

    #[test]
    fn test_empty_sequence() {
        let empty: Vec<Iv> = Vec::new();
        assert_eq!(find_closest(&empty, 0, &Tolerance::ticks(f64::MAX)), None);
    }

    #[test]
    fn test_single_interval() {
        let seq = [iv(0, 100)];
        assert_eq!(find_closest(&seq, 0, &Tolerance::ticks(0.0)), Some(0));
        assert_eq!(find_closest(&seq, 50, &Tolerance::ticks(0.0)), Some(0));
        assert_eq!(find_closest(&seq, 100, &Tolerance::ticks(0.0)), Some(0));
        assert_eq!(find_closest(&seq, 10_000, &Tolerance::ticks(100.0)), None);
        assert_eq!(find_closest(&seq, -10_000, &Tolerance::ticks(100.0)), None);
    }

    #[test]
    fn test_between_prefers_forward_candidate() {
        let seq = [iv(0, 100), iv(200, 300)];
        let tol = Tolerance::new(1.0, HOUR);
        // Equidistant from both neighbours.
        assert_eq!(find_closest(&seq, 150, &tol), Some(1));
        // Strictly closer to index 0, still answered with index 1.
        assert_eq!(find_closest(&seq, 110, &tol), Some(1));
    }

    #[test]
    fn test_point_inside_first_of_many_reports_second() {
        // The interior scan starts at index 1, so a point inside interval 0
        // yields a negative backward gap and the forward candidate wins.
        let seq = [iv(0, 100), iv(200, 300)];
        assert_eq!(find_closest(&seq, 50, &Tolerance::ticks(0.0)), Some(1));
    }

    #[test]
    fn test_containment_overrides_distance() {
        let seq = [iv(0, 100), iv(200, 300), iv(400, 500)];
        let tol = Tolerance::ticks(0.0);
        assert_eq!(find_closest(&seq, 250, &tol), Some(1));
        assert_eq!(find_closest(&seq, 200, &tol), Some(1));
        assert_eq!(find_closest(&seq, 300, &tol), Some(1));
        assert_eq!(find_closest(&seq, 450, &tol), Some(2));
    }

    #[test]
    fn test_touching_and_instant_sequences() {
        let seq = [iv(0, 10), iv(10, 20), iv(20, 20), iv(30, 30)];
        let tol = Tolerance::ticks(0.0);
        assert_eq!(find_closest(&seq, 10, &tol), Some(1));
        assert_eq!(find_closest(&seq, 15, &tol), Some(1));
        assert_eq!(find_closest(&seq, 20, &tol), Some(1));
        assert_eq!(find_closest(&seq, 30, &tol), Some(3));
        assert_eq!(find_closest(&seq, 25, &tol), None);
        assert_eq!(find_closest(&seq, 25, &Tolerance::ticks(5.0)), Some(3));
    }

    #[test]
    fn test_boundary_comparators_are_asymmetric() {
        let seq = [iv(1_000, 2_000), iv(3_000, 4_000)];

        // Before the sequence: strict.
        assert_eq!(find_closest(&seq, 900, &Tolerance::ticks(100.0)), None);
        assert_eq!(find_closest(&seq, 900, &Tolerance::ticks(101.0)), Some(0));

        // After the sequence: strict.
        assert_eq!(find_closest(&seq, 4_100, &Tolerance::ticks(100.0)), None);
        assert_eq!(find_closest(&seq, 4_100, &Tolerance::ticks(101.0)), Some(1));

        // Between intervals: inclusive.
        assert_eq!(find_closest(&seq, 2_500, &Tolerance::ticks(500.0)), Some(1));
        assert_eq!(find_closest(&seq, 2_500, &Tolerance::ticks(499.0)), None);
    }

    #[test]
    fn test_hour_units() {
        let h = 3_600_000i64;
        let seq = [iv(0, h), iv(3 * h, 4 * h), iv(6 * h, 7 * h)];
        let tol = Tolerance::new(1.0, HOUR);
        assert_eq!(find_closest(&seq, 2 * h, &tol), Some(1));
        assert_eq!(find_closest(&seq, 5 * h + h / 2, &tol), Some(2));
        assert_eq!(find_closest(&seq, 8 * h, &tol), None);
        assert_eq!(find_closest(&seq, 8 * h - 1, &tol), Some(2));
    }

    #[test]
    fn test_unsigned_endpoints() {
        let seq: [ClosedInterval<u32>; 2] = [ClosedInterval::new(5, 10), ClosedInterval::new(20, 30)];
        assert_eq!(find_closest(&seq, 7u32, &Tolerance::ticks(0.0)), Some(1));
        assert_eq!(find_closest(&seq, 0u32, &Tolerance::ticks(6.0)), Some(0));
        assert_eq!(find_closest(&seq, 14u32, &Tolerance::ticks(4.0)), Some(1));
    }

    #[test]
    fn test_tolerance_accessors() {
        let tol = Tolerance::new(24.0, HOUR);
        assert_eq!(tol.max_distance(), 24.0);
        assert_eq!(tol.ticks_per_unit(), HOUR);
        assert_eq!(tol.with_max_distance(2.0).max_distance(), 2.0);
        assert_eq!(tol.to_units(1_800_000i64), 0.5);
    }

    #[test]
    #[should_panic(expected = "non-positive tick scale")]
    fn test_tolerance_rejects_zero_scale() {
        Tolerance::new(1.0, 0.0);
    }

    #[test]
    fn test_select_at_single_containing() {
        let items = [iv(0, 10), iv(20, 30)];
        assert_eq!(select_at(&items, 5, &Tolerance::ticks(0.0)), Some(&items[0]));
    }

    #[test]
    fn test_select_at_falls_back_to_nearest() {
        let items = [iv(0, 10), iv(20, 30)];
        let tol = Tolerance::ticks(5.0);
        assert_eq!(select_at(&items, 14, &tol), Some(&items[1]));
        assert_eq!(select_at(&items, 33, &tol), Some(&items[1]));
        assert_eq!(select_at(&items, 50, &tol), None);
    }

    #[test]
    fn test_select_at_many_containing() {
        // Overlapping daily and half-day periods both contain the instant.
        let items = [iv(0, 24), iv(0, 12), iv(12, 24)];
        let picked = select_at(&items, 6, &Tolerance::ticks(1.0));
        assert_eq!(picked, Some(&items[1]));
    }
}
