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

//! Classification of how one interval relates to another.
//!
//! Comparing interval `A` against interval `B` yields exactly one of seven
//! [`RelationCode`]s. The integer encoding of each code is fixed and
//! deliberately non-contiguous (`-4, -2, -1, 0, 1, 2, 4`) so that the
//! codes can be packed into bitmasks and so that swapping the operands
//! negates the code:
//!
//! ```rust
//! # use interlude_core::math::interval::ClosedInterval;
//! # use interlude_core::relation::{classify, RelationCode};
//! let a = ClosedInterval::new(3, 7);
//! let b = ClosedInterval::new(6, 8);
//! assert_eq!(classify(&a, &b), RelationCode::OverlapsLt);
//! assert_eq!(classify(&b, &a), -RelationCode::OverlapsLt);
//! ```

use crate::math::interval::ClosedInterval;
use num_traits::PrimInt;
use std::cmp::Ordering;

/// The outcome of comparing interval `A` against interval `B`.
#[repr(i8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RelationCode {
    /// `A` lies entirely at or before the start of `B` (`A.stop <= B.start`).
    StrictlyLt = -4,
    /// `A` starts before `B` and stops inside it.
    OverlapsLt = -2,
    /// `A` lies inside `B` without being equal to it.
    ContainedBy = -1,
    /// Both endpoints coincide.
    Eq = 0,
    /// `B` lies inside `A` without being equal to it.
    Contains = 1,
    /// `A` starts inside `B` and stops after it.
    OverlapsGt = 2,
    /// `A` lies entirely at or after the stop of `B` (`A.start >= B.stop`).
    StrictlyGt = 4,
}

impl RelationCode {
    /// Every relation code in ascending order of its encoding.
    pub const ALL: [RelationCode; 7] = [
        RelationCode::StrictlyLt,
        RelationCode::OverlapsLt,
        RelationCode::ContainedBy,
        RelationCode::Eq,
        RelationCode::Contains,
        RelationCode::OverlapsGt,
        RelationCode::StrictlyGt,
    ];

    /// Returns the fixed integer encoding of this code.
    #[inline]
    pub const fn raw(self) -> i8 {
        self as i8
    }

    /// Decodes a raw integer encoding.
    ///
    /// Returns `None` for integers that do not name a relation, such as `3`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use interlude_core::relation::RelationCode;
    /// assert_eq!(RelationCode::from_raw(-1), Some(RelationCode::ContainedBy));
    /// assert_eq!(RelationCode::from_raw(3), None);
    /// ```
    #[inline]
    pub const fn from_raw(raw: i8) -> Option<Self> {
        match raw {
            -4 => Some(Self::StrictlyLt),
            -2 => Some(Self::OverlapsLt),
            -1 => Some(Self::ContainedBy),
            0 => Some(Self::Eq),
            1 => Some(Self::Contains),
            2 => Some(Self::OverlapsGt),
            4 => Some(Self::StrictlyGt),
            _ => None,
        }
    }

    /// Returns the code obtained by swapping the compared operands.
    ///
    /// This is the algebraic negation of the encoding; [`RelationCode::Eq`]
    /// is its own reverse.
    #[inline]
    pub const fn reverse(self) -> Self {
        match self {
            Self::StrictlyLt => Self::StrictlyGt,
            Self::OverlapsLt => Self::OverlapsGt,
            Self::ContainedBy => Self::Contains,
            Self::Eq => Self::Eq,
            Self::Contains => Self::ContainedBy,
            Self::OverlapsGt => Self::OverlapsLt,
            Self::StrictlyGt => Self::StrictlyLt,
        }
    }

    /// Returns the upper-snake name of the code, e.g. `"CONTAINED_BY"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::StrictlyLt => "STRICTLY_LT",
            Self::OverlapsLt => "OVERLAPS_LT",
            Self::ContainedBy => "CONTAINED_BY",
            Self::Eq => "EQ",
            Self::Contains => "CONTAINS",
            Self::OverlapsGt => "OVERLAPS_GT",
            Self::StrictlyGt => "STRICTLY_GT",
        }
    }
}

impl std::ops::Neg for RelationCode {
    type Output = RelationCode;

    #[inline]
    fn neg(self) -> Self::Output {
        self.reverse()
    }
}

impl std::fmt::Display for RelationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<RelationCode> for i8 {
    #[inline]
    fn from(code: RelationCode) -> Self {
        code.raw()
    }
}

/// Types that know how to classify themselves against another range.
pub trait Classify<Rhs: ?Sized = Self> {
    /// Classifies `self` (operand `A`) against `other` (operand `B`).
    fn classify(&self, other: &Rhs) -> RelationCode;
}

/// A capability check for types that may or may not classify themselves.
///
/// Matchers that take an optional external comparator consult this trait
/// when none is supplied. Types without an intrinsic classification
/// implement it with the default body, which reports `None`.
pub trait RelationCapability {
    /// Returns the intrinsic classifier of the type, if it has one.
    fn intrinsic() -> Option<fn(&Self, &Self) -> RelationCode> {
        None
    }
}

/// Classifies interval `a` against interval `b`.
///
/// Exact equality is tested first: without it, two coinciding instants
/// would fall into the `a.stop <= b.start` branch and be reported as
/// strictly less.
///
/// # Examples
///
/// ```rust
/// # use interlude_core::math::interval::ClosedInterval;
/// # use interlude_core::relation::{classify, RelationCode};
/// let day = ClosedInterval::new(0, 24);
/// let noon = ClosedInterval::instant(12);
/// assert_eq!(classify(&day, &noon), RelationCode::Contains);
/// assert_eq!(classify(&noon, &noon), RelationCode::Eq);
/// assert_eq!(classify(&day, &ClosedInterval::new(24, 48)), RelationCode::StrictlyLt);
/// ```
pub fn classify<T>(a: &ClosedInterval<T>, b: &ClosedInterval<T>) -> RelationCode
where
    T: PrimInt,
{
    if a.start() == b.start() && a.stop() == b.stop() {
        return RelationCode::Eq;
    }
    if a.stop() <= b.start() {
        return RelationCode::StrictlyLt;
    }
    if a.start() >= b.stop() {
        return RelationCode::StrictlyGt;
    }

    match (a.start().cmp(&b.start()), a.stop().cmp(&b.stop())) {
        (Ordering::Less, Ordering::Less) => RelationCode::OverlapsLt,
        (Ordering::Less, _) => RelationCode::Contains,
        (Ordering::Greater, Ordering::Greater) => RelationCode::OverlapsGt,
        (Ordering::Greater, _) => RelationCode::ContainedBy,
        (Ordering::Equal, Ordering::Less) => RelationCode::ContainedBy,
        (Ordering::Equal, Ordering::Equal) => RelationCode::Eq,
        (Ordering::Equal, Ordering::Greater) => RelationCode::Contains,
    }
}

impl<T> Classify for ClosedInterval<T>
where
    T: PrimInt,
{
    #[inline]
    fn classify(&self, other: &Self) -> RelationCode {
        classify(self, other)
    }
}

impl<T> RelationCapability for ClosedInterval<T>
where
    T: PrimInt,
{
    #[inline]
    fn intrinsic() -> Option<fn(&Self, &Self) -> RelationCode> {
        let intrinsic: fn(&Self, &Self) -> RelationCode = classify::<T>;
        Some(intrinsic)
    }
}
