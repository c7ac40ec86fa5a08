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

//! # Interlude Core
//!
//! A domain-agnostic engine for relating closed intervals to one another.
//! Endpoints are any primitive integer type; time instants expressed as
//! integer ticks since an epoch are the motivating case.
//!
//! ## Modules
//!
//! - `math`: The immutable closed interval `[start, stop]` with validated
//!   construction, point and interval queries, and conversions to/from
//!   `std::ops::RangeInclusive`.
//! - `relation`: The seven fixed relation codes, the classifier that maps a
//!   pair of intervals onto one of them, and the traits through which other
//!   types take part in classification.
//! - `predicate`: Reusable acceptance tests over relation codes, including
//!   the standard named predicates.
//! - `matcher`: Order-preserving filters of a collection against an
//!   exemplar, returning matching items or their positions.
//! - `nearest`: Tolerance-bounded search for the interval closest to a
//!   point in a sorted, non-overlapping sequence.
//!
//! Everything here is pure and synchronous: no shared state, no I/O, and
//! results that depend only on the inputs.

pub mod math;
pub mod matcher;
pub mod nearest;
pub mod predicate;
pub mod relation;
