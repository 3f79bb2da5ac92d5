//! compiled clause types

use std::collections::BTreeMap;
use std::ops::Not;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::algebra::{Range, Ratio};
use crate::features::DiscreteValue;

/// media type tag carried by a clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaTypeTag {
    All,
    Screen,
    Print,
    NotScreen,
    NotPrint,
}

/// which of the four gamut bands a condition covers, lowest band first:
/// below sRGB, sRGB up to P3, P3 up to Rec.2020, Rec.2020 and above
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GamutMask(pub [bool; 4]);

impl GamutMask {
    pub fn and(self, other: GamutMask) -> GamutMask {
        let mut bands = [false; 4];
        for (i, band) in bands.iter_mut().enumerate() {
            *band = self.0[i] && other.0[i];
        }
        GamutMask(bands)
    }

    pub fn is_empty(self) -> bool {
        self.0.iter().all(|band| !band)
    }

    pub fn is_full(self) -> bool {
        self.0.iter().all(|band| *band)
    }
}

impl Not for GamutMask {
    type Output = GamutMask;

    fn not(self) -> GamutMask {
        GamutMask(self.0.map(|band| !band))
    }
}

/// what one clause requires of one feature
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// no constraint
    True,
    /// unsatisfiable
    False,
    Discrete(DiscreteValue),
    Gamut(GamutMask),
    Range(Range<f64>),
    Ratio(Range<Ratio>),
}

impl Serialize for Constraint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Constraint::True => serializer.serialize_bool(true),
            Constraint::False => serializer.serialize_bool(false),
            Constraint::Discrete(value) => value.serialize(serializer),
            Constraint::Gamut(mask) => mask.serialize(serializer),
            Constraint::Range(range) => range.serialize(serializer),
            Constraint::Ratio(range) => range.serialize(serializer),
        }
    }
}

/// one conjunctive clause of the compiled disjunction
///
/// a clause with no features and no invalid markers always matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Permutation {
    pub media_type: Option<MediaTypeTag>,
    /// names or raw text of features that could not be understood
    pub invalid_features: Vec<String>,
    pub features: BTreeMap<&'static str, Constraint>,
}

impl Permutation {
    /// a clause constraining a single feature
    pub fn with(key: &'static str, constraint: Constraint) -> Self {
        let mut perm = Self::default();
        perm.features.insert(key, constraint);
        perm
    }

    /// a clause that can never match because `name` was not understood
    pub fn invalid(name: impl Into<String>) -> Self {
        Self {
            invalid_features: vec![name.into()],
            ..Self::default()
        }
    }

    pub fn tagged(mut self, media_type: MediaTypeTag) -> Self {
        self.media_type = Some(media_type);
        self
    }

    pub fn is_invalid(&self) -> bool {
        !self.invalid_features.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Constraint> {
        self.features.get(key)
    }
}

impl Serialize for Permutation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.features.len()
            + usize::from(self.media_type.is_some())
            + usize::from(self.is_invalid());
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(media_type) = &self.media_type {
            map.serialize_entry("media-type", media_type)?;
        }
        if self.is_invalid() {
            map.serialize_entry("invalid-features", &self.invalid_features)?;
        }
        for (key, constraint) in &self.features {
            map.serialize_entry(key, constraint)?;
        }
        map.end()
    }
}

/// the public compiled form: `OR(simple_perms)` plus diagnostics
///
/// equality ignores the order of `simple_perms`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateResult {
    pub simple_perms: Vec<Permutation>,
    /// sorted, deduplicated
    pub invalid_features: Vec<String>,
    /// sorted, deduplicated
    pub false_features: Vec<String>,
}

impl PartialEq for EvaluateResult {
    fn eq(&self, other: &Self) -> bool {
        self.invalid_features == other.invalid_features
            && self.false_features == other.false_features
            && self.simple_perms.len() == other.simple_perms.len()
            && self
                .simple_perms
                .iter()
                .all(|perm| other.simple_perms.contains(perm))
            && other
                .simple_perms
                .iter()
                .all(|perm| self.simple_perms.contains(perm))
    }
}

impl EvaluateResult {
    /// no clause can ever match
    pub fn never_matches(&self) -> bool {
        self.simple_perms.is_empty()
    }

    /// some clause has no constraints left
    pub fn always_matches(&self) -> bool {
        self.simple_perms
            .iter()
            .any(|perm| perm.features.is_empty() && perm.media_type.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_gamut_mask_ops() {
        let srgb = GamutMask([false, true, true, true]);
        let p3 = GamutMask([false, false, true, true]);
        assert_eq!(srgb.and(p3), p3);
        assert_eq!(!srgb, GamutMask([true, false, false, false]));
        assert!(srgb.and(!srgb).is_empty());
        assert!(GamutMask([true; 4]).is_full());
    }

    #[test]
    fn test_serialize_permutation() {
        let mut perm = Permutation::with("width", Constraint::Range(Range::at_least(120.0, true)))
            .tagged(MediaTypeTag::NotPrint);
        perm.features
            .insert("hover", Constraint::Discrete(DiscreteValue::Keyword("hover")));
        perm.features.insert("grid", Constraint::Discrete(DiscreteValue::Integer(1)));

        assert_eq!(
            serde_json::to_value(&perm).unwrap(),
            json!({
                "media-type": "not-print",
                "width": [true, 120.0, "Infinity", true],
                "hover": "hover",
                "grid": 1,
            })
        );
    }

    #[test]
    fn test_serialize_invalid_and_ratio() {
        let perm = Permutation::invalid("fake");
        assert_eq!(
            serde_json::to_value(&perm).unwrap(),
            json!({ "invalid-features": ["fake"] })
        );

        let perm = Permutation::with(
            "aspect-ratio",
            Constraint::Ratio(Range::exact(Ratio::new(16.0, 9.0))),
        );
        assert_eq!(
            serde_json::to_value(&perm).unwrap(),
            json!({ "aspect-ratio": [true, [16.0, 9.0], [16.0, 9.0], true] })
        );
    }

    #[test]
    fn test_serialize_evaluate_result() {
        let result = EvaluateResult {
            simple_perms: vec![Permutation::default()],
            invalid_features: vec!["fake".to_string()],
            false_features: vec![],
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "simplePerms": [{}], "invalidFeatures": ["fake"], "falseFeatures": [] })
        );
        assert!(result.always_matches());
        assert!(!result.never_matches());
    }
}
