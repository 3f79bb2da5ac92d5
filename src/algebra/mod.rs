//! constraint algebra over intervals
//!
//! every range feature is stored as `(min_inclusive, min, max, max_inclusive)`
//! over either plain numbers or exact ratios. this module provides:
//! - AND of two ranges
//! - bounding a range to a feature domain
//! - complement of a range inside its domain
//! - OR of two ranges (for presentation)

mod range;
mod ratio;

use std::cmp::Ordering;
use std::fmt::Debug;

use serde::Serializer;

pub use range::{and_range, bound_range, not_range, or_range, Bounded, Range};
pub use ratio::Ratio;

/// a value that can sit at either end of a [`Range`]
pub trait Endpoint: Copy + Debug {
    const NEG_INFINITY: Self;
    const INFINITY: Self;
    const ZERO: Self;

    /// total ordering used by the algebra, never looks at raw field equality
    fn compare(&self, other: &Self) -> Ordering;

    fn serialize_endpoint<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error>;
}

impl Endpoint for f64 {
    const NEG_INFINITY: Self = f64::NEG_INFINITY;
    const INFINITY: Self = f64::INFINITY;
    const ZERO: Self = 0.0;

    fn compare(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap_or(Ordering::Equal)
    }

    fn serialize_endpoint<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_number(*self, serializer)
    }
}

/// JSON has no infinities, so they are written as strings
pub(crate) fn serialize_number<S: Serializer>(value: f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(value)
    } else if value.is_nan() {
        serializer.serialize_str("NaN")
    } else if value > 0.0 {
        serializer.serialize_str("Infinity")
    } else {
        serializer.serialize_str("-Infinity")
    }
}
