//! three-valued logic

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

use serde::{Deserialize, Serialize};

/// strong Kleene truth value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kleene3 {
    True,
    False,
    #[default]
    Unknown,
}

impl Kleene3 {
    pub fn is_true(self) -> bool {
        self == Kleene3::True
    }

    pub fn is_false(self) -> bool {
        self == Kleene3::False
    }

    pub fn is_unknown(self) -> bool {
        self == Kleene3::Unknown
    }
}

impl From<bool> for Kleene3 {
    fn from(value: bool) -> Self {
        if value {
            Kleene3::True
        } else {
            Kleene3::False
        }
    }
}

impl Not for Kleene3 {
    type Output = Kleene3;

    fn not(self) -> Kleene3 {
        match self {
            Kleene3::True => Kleene3::False,
            Kleene3::False => Kleene3::True,
            Kleene3::Unknown => Kleene3::Unknown,
        }
    }
}

impl BitAnd for Kleene3 {
    type Output = Kleene3;

    fn bitand(self, rhs: Kleene3) -> Kleene3 {
        match (self, rhs) {
            (Kleene3::False, _) | (_, Kleene3::False) => Kleene3::False,
            (Kleene3::True, Kleene3::True) => Kleene3::True,
            _ => Kleene3::Unknown,
        }
    }
}

impl BitOr for Kleene3 {
    type Output = Kleene3;

    fn bitor(self, rhs: Kleene3) -> Kleene3 {
        match (self, rhs) {
            (Kleene3::True, _) | (_, Kleene3::True) => Kleene3::True,
            (Kleene3::False, Kleene3::False) => Kleene3::False,
            _ => Kleene3::Unknown,
        }
    }
}

impl fmt::Display for Kleene3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kleene3::True => write!(f, "true"),
            Kleene3::False => write!(f, "false"),
            Kleene3::Unknown => write!(f, "unknown"),
        }
    }
}
