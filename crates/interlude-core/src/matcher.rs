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

//! Filtering collections of ranges against an exemplar.
//!
//! Every function here is pure: the input slice is only borrowed, the result
//! is a freshly allocated `Vec` that preserves the relative order of the
//! input, and no sorting or de-duplication takes place.
//!
//! Two operand orders are offered because classification is antisymmetric
//! and predicates need not be symmetric:
//!
//! * `exemplar_accepts*` tests `predicate.accept(classify(exemplar, item))`.
//! * `items_accept*` tests `predicate.accept(classify(item, exemplar))`.
//!
//! The `*_by` variants classify with an external comparator and place no
//! bound on the item type. The `*_with` variants take an optional
//! comparator; when none is given they fall back to the item type's
//! [`RelationCapability`] and fail with [`MatchError::MissingComparator`] if
//! the type cannot classify itself.

use crate::{
    predicate::RelationPredicate,
    relation::{Classify, RelationCapability, RelationCode},
};
use tracing::trace;

/// An external classifier: `comparator(a, b)` classifies `a` against `b`.
pub type Comparator<'c, I> = &'c dyn Fn(&I, &I) -> RelationCode;

/// The error type for the comparator-optional matchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchError {
    /// No comparator was supplied and the item type has no intrinsic
    /// classification to fall back on.
    MissingComparator {
        /// The name of the item type.
        type_name: &'static str,
    },
}

impl std::fmt::Display for MatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingComparator { type_name } => write!(
                f,
                "A comparator is required because {} does not classify itself",
                type_name
            ),
        }
    }
}

impl std::error::Error for MatchError {}

/// Selects every item `x` such that `predicate` accepts `(exemplar, x)`.
///
/// # Examples
///
/// ```rust
/// # use interlude_core::math::interval::ClosedInterval;
/// # use interlude_core::matcher::exemplar_accepts;
/// # use interlude_core::predicate::RelationPredicate;
/// let items = [
///     ClosedInterval::new(0, 2),
///     ClosedInterval::new(4, 6),
///     ClosedInterval::new(5, 5),
/// ];
/// let window = ClosedInterval::new(3, 7);
/// let inside = exemplar_accepts(&window, &items, RelationPredicate::CONTAINS);
/// assert_eq!(inside, vec![&items[1], &items[2]]);
/// ```
pub fn exemplar_accepts<'a, I>(
    exemplar: &I,
    items: &'a [I],
    predicate: RelationPredicate,
) -> Vec<&'a I>
where
    I: Classify,
{
    select(items, predicate, |item| exemplar.classify(item))
}

/// Selects every item `x` such that `predicate` accepts `(x, exemplar)`.
///
/// # Examples
///
/// ```rust
/// # use interlude_core::math::interval::ClosedInterval;
/// # use interlude_core::matcher::items_accept;
/// # use interlude_core::predicate::RelationPredicate;
/// let items = [ClosedInterval::new(0, 10), ClosedInterval::new(4, 6)];
/// let now = ClosedInterval::instant(2);
/// assert_eq!(items_accept(&items, &now, RelationPredicate::CONTAINS), vec![&items[0]]);
/// ```
pub fn items_accept<'a, I>(
    items: &'a [I],
    exemplar: &I,
    predicate: RelationPredicate,
) -> Vec<&'a I>
where
    I: Classify,
{
    select(items, predicate, |item| item.classify(exemplar))
}

/// Returns the positions of every item `x` such that `predicate` accepts
/// `(exemplar, x)`.
///
/// Positions are 0-based and strictly increasing.
pub fn exemplar_accepts_indices<I>(
    exemplar: &I,
    items: &[I],
    predicate: RelationPredicate,
) -> Vec<usize>
where
    I: Classify,
{
    let indices: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| predicate.accept(exemplar.classify(item)))
        .map(|(i, _)| i)
        .collect();

    trace!(
        total = items.len(),
        matched = indices.len(),
        %predicate,
        "selected indices against exemplar"
    );
    indices
}

/// Like [`exemplar_accepts`], but classifies with `comparator`.
///
/// Any item type works, including tuples and foreign types.
///
/// # Examples
///
/// ```rust
/// # use interlude_core::math::interval::ClosedInterval;
/// # use interlude_core::matcher::exemplar_accepts_by;
/// # use interlude_core::predicate::RelationPredicate;
/// # use interlude_core::relation::{classify, RelationCode};
/// let as_pair = |a: &(i64, i64), b: &(i64, i64)| -> RelationCode {
///     classify(&ClosedInterval::new(a.0, a.1), &ClosedInterval::new(b.0, b.1))
/// };
/// let items: [(i64, i64); 2] = [(0, 2), (4, 6)];
/// let inside = exemplar_accepts_by(&(3, 7), &items, &as_pair, RelationPredicate::CONTAINS);
/// assert_eq!(inside, vec![&(4, 6)]);
/// ```
pub fn exemplar_accepts_by<'a, I>(
    exemplar: &I,
    items: &'a [I],
    comparator: Comparator<'_, I>,
    predicate: RelationPredicate,
) -> Vec<&'a I> {
    select(items, predicate, |item| comparator(exemplar, item))
}

/// Like [`items_accept`], but classifies with `comparator`.
pub fn items_accept_by<'a, I>(
    items: &'a [I],
    exemplar: &I,
    comparator: Comparator<'_, I>,
    predicate: RelationPredicate,
) -> Vec<&'a I> {
    select(items, predicate, |item| comparator(item, exemplar))
}

/// Like [`exemplar_accepts`], but classifies with `comparator` when given.
///
/// # Errors
///
/// Returns [`MatchError::MissingComparator`] if `comparator` is `None` and
/// `I` has no intrinsic classification.
///
/// # Examples
///
/// ```rust
/// # use interlude_core::math::interval::ClosedInterval;
/// # use interlude_core::matcher::exemplar_accepts_with;
/// # use interlude_core::predicate::RelationPredicate;
/// # use interlude_core::relation::classify;
/// let items = [ClosedInterval::new(1, 2), ClosedInterval::new(8, 9)];
/// let window = ClosedInterval::new(0, 5);
///
/// let natural = exemplar_accepts_with(&window, &items, None, RelationPredicate::CONTAINS)?;
/// let external = exemplar_accepts_with(
///     &window,
///     &items,
///     Some(&|a: &ClosedInterval<i32>, b: &ClosedInterval<i32>| classify(a, b)),
///     RelationPredicate::CONTAINS,
/// )?;
/// assert_eq!(natural, external);
/// # Ok::<(), interlude_core::matcher::MatchError>(())
/// ```
pub fn exemplar_accepts_with<'a, I>(
    exemplar: &I,
    items: &'a [I],
    comparator: Option<Comparator<'_, I>>,
    predicate: RelationPredicate,
) -> Result<Vec<&'a I>, MatchError>
where
    I: RelationCapability,
{
    let relate = Relate::resolve(comparator)?;
    Ok(exemplar_accepts_by(
        exemplar,
        items,
        relate.comparator(),
        predicate,
    ))
}

/// Like [`items_accept`], but classifies with `comparator` when given.
///
/// # Errors
///
/// Returns [`MatchError::MissingComparator`] if `comparator` is `None` and
/// `I` has no intrinsic classification.
pub fn items_accept_with<'a, I>(
    items: &'a [I],
    exemplar: &I,
    comparator: Option<Comparator<'_, I>>,
    predicate: RelationPredicate,
) -> Result<Vec<&'a I>, MatchError>
where
    I: RelationCapability,
{
    let relate = Relate::resolve(comparator)?;
    Ok(items_accept_by(
        items,
        exemplar,
        relate.comparator(),
        predicate,
    ))
}

/// The classifier chosen for one comparator-optional call.
enum Relate<'c, I> {
    External(Comparator<'c, I>),
    Intrinsic(fn(&I, &I) -> RelationCode),
}

impl<'c, I> Relate<'c, I>
where
    I: RelationCapability,
{
    fn resolve(comparator: Option<Comparator<'c, I>>) -> Result<Self, MatchError> {
        match comparator {
            Some(c) => Ok(Self::External(c)),
            None => I::intrinsic()
                .map(Self::Intrinsic)
                .ok_or(MatchError::MissingComparator {
                    type_name: std::any::type_name::<I>(),
                }),
        }
    }

    #[inline]
    fn comparator(&self) -> Comparator<'_, I> {
        match self {
            Self::External(c) => *c,
            Self::Intrinsic(f) => {
                let intrinsic: Comparator<'_, I> = f;
                intrinsic
            }
        }
    }
}

fn select<'a, I, F>(items: &'a [I], predicate: RelationPredicate, mut relate: F) -> Vec<&'a I>
where
    F: FnMut(&I) -> RelationCode,
{
    let selected: Vec<&'a I> = items
        .iter()
        .filter(|item| predicate.accept(relate(*item)))
        .collect();

    trace!(
        total = items.len(),
        matched = selected.len(),
        %predicate,
        "filtered collection against exemplar"
    );
    selected
}
