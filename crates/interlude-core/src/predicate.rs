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

//! Reusable acceptance tests over [`RelationCode`]s.
//!
//! A [`RelationPredicate`] is a set of accepted relation codes. Set
//! membership is a single bit test: each code occupies bit `code + 8` of a
//! `u16`, the shift keeping the negative encodings in range.
//!
//! The one exception is [`RelationPredicate::OVERLAPS`], which tests the raw
//! encoding directly (see its documentation).

use crate::relation::{Classify, RelationCode};

const SHIFT: i8 = 8;

#[inline]
const fn bit(code: RelationCode) -> u16 {
    1u16 << (code.raw() + SHIFT) as u32
}

#[derive(Clone, Copy)]
enum Repr {
    Mask(u16),
    RawOverlapBits,
}

/// A set of accepted [`RelationCode`]s.
///
/// Equality and hashing follow the accepted set, however the predicate was
/// built.
///
/// # Examples
///
/// ```rust
/// # use interlude_core::predicate::RelationPredicate;
/// # use interlude_core::relation::RelationCode;
/// let p = RelationPredicate::CONTAINS;
/// assert!(p.accept(RelationCode::Eq));
/// assert!(p.accept(RelationCode::Contains));
/// assert!(!p.accept(RelationCode::ContainedBy));
/// ```
#[derive(Clone, Copy)]
pub struct RelationPredicate {
    repr: Repr,
}

impl RelationPredicate {
    /// Accepts only equal ranges.
    pub const EQUALS: Self = Self::from_codes(&[RelationCode::Eq]);

    /// The first range contains or equals the second.
    pub const CONTAINS: Self = Self::from_codes(&[RelationCode::Eq, RelationCode::Contains]);

    /// The first range is contained by or equals the second.
    pub const CONTAINED_BY: Self =
        Self::from_codes(&[RelationCode::Eq, RelationCode::ContainedBy]);

    /// The first range contains the second and is not equal to it.
    pub const STRICTLY_CONTAINS: Self = Self::from_codes(&[RelationCode::Contains]);

    /// The first range is contained by the second and is not equal to it.
    pub const STRICTLY_CONTAINED_BY: Self = Self::from_codes(&[RelationCode::ContainedBy]);

    /// The ranges partially overlap, from either side.
    pub const STRICTLY_OVERLAPS: Self =
        Self::from_codes(&[RelationCode::OverlapsLt, RelationCode::OverlapsGt]);

    /// The first range lies entirely before the second.
    pub const STRICTLY_LESS: Self = Self::from_codes(&[RelationCode::StrictlyLt]);

    /// The first range lies entirely after the second.
    pub const STRICTLY_GREATER: Self = Self::from_codes(&[RelationCode::StrictlyGt]);

    /// Accepts nothing.
    pub const NONE: Self = Self::from_codes(&[]);

    /// Overlap in the broad sense, evaluated as `(code & 3) != 0` on the raw
    /// encoding.
    ///
    /// With the fixed encodings this accepts `OVERLAPS_LT`, `CONTAINED_BY`,
    /// `CONTAINS` and `OVERLAPS_GT`, and rejects `STRICTLY_LT`,
    /// `STRICTLY_GT` and also `EQ`, although equal ranges are described
    /// elsewhere as overlapping. Callers depend on the bit test's exact
    /// outcome, so it is kept as is.
    pub const OVERLAPS: Self = Self {
        repr: Repr::RawOverlapBits,
    };

    /// Builds a predicate accepting exactly the given codes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use interlude_core::predicate::RelationPredicate;
    /// # use interlude_core::relation::RelationCode;
    /// let outside = RelationPredicate::from_codes(&[
    ///     RelationCode::StrictlyLt,
    ///     RelationCode::StrictlyGt,
    /// ]);
    /// assert!(outside.accept(RelationCode::StrictlyGt));
    /// assert!(!outside.accept(RelationCode::Eq));
    /// ```
    pub const fn from_codes(codes: &[RelationCode]) -> Self {
        let mut mask = 0u16;
        let mut i = 0;
        while i < codes.len() {
            mask |= bit(codes[i]);
            i += 1;
        }
        Self {
            repr: Repr::Mask(mask),
        }
    }

    /// Returns `true` if `code` is accepted.
    #[inline]
    pub const fn accept(&self, code: RelationCode) -> bool {
        match self.repr {
            Repr::Mask(mask) => mask & bit(code) != 0,
            // Bit trick on the raw encoding; rejects EQ. Kept for compatibility.
            Repr::RawOverlapBits => code.raw() & 3 != 0,
        }
    }

    /// Returns the accepted codes as a mask over bit `code + 8`.
    const fn accepted_mask(&self) -> u16 {
        match self.repr {
            Repr::Mask(mask) => mask,
            Repr::RawOverlapBits => {
                let mut mask = 0u16;
                let mut i = 0;
                while i < RelationCode::ALL.len() {
                    let code = RelationCode::ALL[i];
                    if self.accept(code) {
                        mask |= bit(code);
                    }
                    i += 1;
                }
                mask
            }
        }
    }

    /// Classifies `a` against `b` and tests the outcome.
    #[inline]
    pub fn accept_pair<I>(&self, a: &I, b: &I) -> bool
    where
        I: Classify,
    {
        self.accept(a.classify(b))
    }

    /// Returns an iterator over the accepted codes, in ascending encoding order.
    pub fn codes(&self) -> impl Iterator<Item = RelationCode> + '_ {
        RelationCode::ALL
            .into_iter()
            .filter(move |&code| self.accept(code))
    }

    /// Returns `true` if no code is accepted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.codes().next().is_none()
    }

    /// Returns the predicate that accepts `(b, a)` whenever `self` accepts
    /// `(a, b)`.
    ///
    /// Filtering items against an exemplar with `p.inverse()` selects the
    /// same items as filtering the exemplar against the items with `p`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use interlude_core::predicate::RelationPredicate;
    /// assert_eq!(RelationPredicate::CONTAINS.inverse(), RelationPredicate::CONTAINED_BY);
    /// assert_eq!(RelationPredicate::OVERLAPS.inverse(), RelationPredicate::OVERLAPS);
    /// ```
    pub fn inverse(&self) -> Self {
        match self.repr {
            Repr::Mask(_) => {
                let mut mask = 0u16;
                for code in self.codes() {
                    mask |= bit(code.reverse());
                }
                Self {
                    repr: Repr::Mask(mask),
                }
            }
            // (-c) & 3 != 0 exactly when c & 3 != 0 for every encoding.
            Repr::RawOverlapBits => *self,
        }
    }

    /// Returns the predicate accepting every code accepted by either operand.
    pub fn union(&self, other: Self) -> Self {
        match (self.repr, other.repr) {
            (Repr::Mask(a), Repr::Mask(b)) => Self {
                repr: Repr::Mask(a | b),
            },
            _ => {
                let mut mask = 0u16;
                for code in self.codes().chain(other.codes()) {
                    mask |= bit(code);
                }
                Self {
                    repr: Repr::Mask(mask),
                }
            }
        }
    }

    /// Keeps every item `x` of `items` for which `self` accepts `(exemplar, x)`.
    ///
    /// Shorthand for [`crate::matcher::exemplar_accepts`].
    #[inline]
    pub fn exemplar_accepts<'a, I>(&self, exemplar: &I, items: &'a [I]) -> Vec<&'a I>
    where
        I: Classify,
    {
        crate::matcher::exemplar_accepts(exemplar, items, *self)
    }

    /// Keeps every item `x` of `items` for which `self` accepts `(x, exemplar)`.
    ///
    /// Shorthand for [`crate::matcher::items_accept`].
    #[inline]
    pub fn items_accept<'a, I>(&self, items: &'a [I], exemplar: &I) -> Vec<&'a I>
    where
        I: Classify,
    {
        crate::matcher::items_accept(items, exemplar, *self)
    }
}

impl PartialEq for RelationPredicate {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.accepted_mask() == other.accepted_mask()
    }
}

impl Eq for RelationPredicate {}

impl std::hash::Hash for RelationPredicate {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.accepted_mask().hash(state);
    }
}

impl Default for RelationPredicate {
    fn default() -> Self {
        Self::NONE
    }
}

impl std::ops::BitOr for RelationPredicate {
    type Output = RelationPredicate;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl std::fmt::Debug for RelationPredicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.repr {
            Repr::Mask(_) => f.debug_set().entries(self.codes()).finish(),
            Repr::RawOverlapBits => write!(f, "RelationPredicate(OVERLAPS)"),
        }
    }
}

impl std::fmt::Display for RelationPredicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, code) in self.codes().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", code)?;
        }
        write!(f, "}}")
    }
}
