//! interval arithmetic

use std::cmp::Ordering;

use serde::ser::SerializeTuple;
use serde::{Serialize, Serializer};

use super::Endpoint;

/// an interval `(min_inclusive, min, max, max_inclusive)`
///
/// equal bounds that are both inclusive mean exact equality; equal bounds
/// with an exclusive end are empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range<T> {
    pub min_inclusive: bool,
    pub min: T,
    pub max: T,
    pub max_inclusive: bool,
}

impl<T: Endpoint> Range<T> {
    pub fn new(min_inclusive: bool, min: T, max: T, max_inclusive: bool) -> Self {
        Self {
            min_inclusive,
            min,
            max,
            max_inclusive,
        }
    }

    /// (-inf, +inf), both ends inclusive
    pub fn unbounded() -> Self {
        Self::new(true, T::NEG_INFINITY, T::INFINITY, true)
    }

    /// [0, +inf]
    pub fn non_negative() -> Self {
        Self::new(true, T::ZERO, T::INFINITY, true)
    }

    pub fn exact(value: T) -> Self {
        Self::new(true, value, value, true)
    }

    pub fn at_least(value: T, inclusive: bool) -> Self {
        Self::new(inclusive, value, T::INFINITY, true)
    }

    pub fn at_most(value: T, inclusive: bool) -> Self {
        Self::new(true, T::NEG_INFINITY, value, inclusive)
    }

    pub fn is_empty(&self) -> bool {
        match self.min.compare(&self.max) {
            Ordering::Greater => true,
            Ordering::Equal => !(self.min_inclusive && self.max_inclusive),
            Ordering::Less => false,
        }
    }

    pub fn contains(&self, value: &T) -> bool {
        let above_min = match value.compare(&self.min) {
            Ordering::Greater => true,
            Ordering::Equal => self.min_inclusive,
            Ordering::Less => false,
        };
        let below_max = match value.compare(&self.max) {
            Ordering::Less => true,
            Ordering::Equal => self.max_inclusive,
            Ordering::Greater => false,
        };
        above_min && below_max
    }

    /// same interval, comparing endpoints with [`Endpoint::compare`]
    pub fn same_as(&self, other: &Self) -> bool {
        self.min_inclusive == other.min_inclusive
            && self.max_inclusive == other.max_inclusive
            && self.min.compare(&other.min) == Ordering::Equal
            && self.max.compare(&other.max) == Ordering::Equal
    }
}

/// outcome of bounding a range to its domain
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bounded<T> {
    /// covers the whole domain
    True,
    /// empty
    False,
    Range(Range<T>),
}

/// intersect two ranges, `None` when the result is empty
pub fn and_range<T: Endpoint>(a: &Range<T>, b: &Range<T>) -> Option<Range<T>> {
    let (min, min_inclusive) = match a.min.compare(&b.min) {
        Ordering::Greater => (a.min, a.min_inclusive),
        Ordering::Less => (b.min, b.min_inclusive),
        Ordering::Equal => (a.min, a.min_inclusive && b.min_inclusive),
    };
    let (max, max_inclusive) = match a.max.compare(&b.max) {
        Ordering::Less => (a.max, a.max_inclusive),
        Ordering::Greater => (b.max, b.max_inclusive),
        Ordering::Equal => (a.max, a.max_inclusive && b.max_inclusive),
    };

    let range = Range::new(min_inclusive, min, max, max_inclusive);
    (!range.is_empty()).then_some(range)
}

/// clip a range to a feature domain
pub fn bound_range<T: Endpoint>(range: &Range<T>, domain: &Range<T>) -> Bounded<T> {
    match and_range(range, domain) {
        None => Bounded::False,
        Some(bounded) if bounded.same_as(domain) => Bounded::True,
        Some(bounded) => Bounded::Range(bounded),
    }
}

/// complement of a range inside its domain
///
/// returns zero, one or two ranges; an empty result means the input already
/// covered the whole domain.
pub fn not_range<T: Endpoint>(range: &Range<T>, domain: &Range<T>) -> Vec<Range<T>> {
    let below = Range::new(
        domain.min_inclusive,
        domain.min,
        range.min,
        !range.min_inclusive,
    );
    let above = Range::new(
        !range.max_inclusive,
        range.max,
        domain.max,
        domain.max_inclusive,
    );

    [below, above]
        .iter()
        .filter_map(|candidate| and_range(candidate, domain))
        .collect()
}

/// union of two ranges: one range when they overlap or touch, else both
pub fn or_range<T: Endpoint>(a: &Range<T>, b: &Range<T>) -> Vec<Range<T>> {
    if a.is_empty() {
        return vec![*b];
    }
    if b.is_empty() {
        return vec![*a];
    }

    let (lo, hi) = match a.min.compare(&b.min) {
        Ordering::Greater => (b, a),
        Ordering::Equal if b.min_inclusive && !a.min_inclusive => (b, a),
        _ => (a, b),
    };

    let joined = match lo.max.compare(&hi.min) {
        Ordering::Greater => true,
        Ordering::Equal => lo.max_inclusive || hi.min_inclusive,
        Ordering::Less => false,
    };
    if !joined {
        return vec![*lo, *hi];
    }

    let (max, max_inclusive) = match lo.max.compare(&hi.max) {
        Ordering::Greater => (lo.max, lo.max_inclusive),
        Ordering::Less => (hi.max, hi.max_inclusive),
        Ordering::Equal => (lo.max, lo.max_inclusive || hi.max_inclusive),
    };
    vec![Range::new(lo.min_inclusive, lo.min, max, max_inclusive)]
}

struct EndpointRef<'a, T>(&'a T);

impl<T: Endpoint> Serialize for EndpointRef<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize_endpoint(serializer)
    }
}

impl<T: Endpoint> Serialize for Range<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(4)?;
        tuple.serialize_element(&self.min_inclusive)?;
        tuple.serialize_element(&EndpointRef(&self.min))?;
        tuple.serialize_element(&EndpointRef(&self.max))?;
        tuple.serialize_element(&self.max_inclusive)?;
        tuple.end()
    }
}
