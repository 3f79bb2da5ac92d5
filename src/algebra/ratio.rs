//! exact ratios for `aspect-ratio` style features

use std::cmp::Ordering;

use serde::ser::SerializeTuple;
use serde::{Serialize, Serializer};

use super::{serialize_number, Endpoint};

/// a `numerator / denominator` pair, kept unreduced
///
/// `n/0` with `n > 0` sits above every finite ratio; `0/0` compares equal to
/// any ratio with a zero numerator or denominator and below everything else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ratio {
    pub numerator: f64,
    pub denominator: f64,
}

impl Ratio {
    pub const fn new(numerator: f64, denominator: f64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// either side is zero
    pub fn is_degenerate(&self) -> bool {
        self.numerator == 0.0 || self.denominator == 0.0
    }

    pub fn is_zero_over_zero(&self) -> bool {
        self.numerator == 0.0 && self.denominator == 0.0
    }

    /// the ratio as a float, for ordering only
    pub fn quotient(&self) -> f64 {
        if self.denominator == 0.0 {
            if self.numerator == 0.0 {
                0.0
            } else {
                f64::INFINITY.copysign(self.numerator)
            }
        } else {
            self.numerator / self.denominator
        }
    }
}

impl Endpoint for Ratio {
    const NEG_INFINITY: Self = Ratio::new(f64::NEG_INFINITY, 1.0);
    const INFINITY: Self = Ratio::new(f64::INFINITY, 1.0);
    const ZERO: Self = Ratio::new(0.0, 1.0);

    fn compare(&self, other: &Self) -> Ordering {
        if self.is_zero_over_zero() || other.is_zero_over_zero() {
            let (zz, rest) = if self.is_zero_over_zero() {
                (Ordering::Less, other)
            } else {
                (Ordering::Greater, self)
            };
            if rest.is_degenerate() {
                return Ordering::Equal;
            }
            // 0/0 sits below every non-degenerate ratio
            return zz;
        }

        let lhs = self.numerator * other.denominator;
        let rhs = other.numerator * self.denominator;
        if lhs.is_nan() || rhs.is_nan() {
            return self
                .quotient()
                .partial_cmp(&other.quotient())
                .unwrap_or(Ordering::Equal);
        }
        lhs.partial_cmp(&rhs).unwrap_or(Ordering::Equal)
    }

    fn serialize_endpoint<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.serialize(serializer)
    }
}

struct Num(f64);

impl Serialize for Num {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_number(self.0, serializer)
    }
}

impl Serialize for Ratio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&Num(self.numerator))?;
        tuple.serialize_element(&Num(self.denominator))?;
        tuple.end()
    }
}
