//! what the solver knows about each feature's possible values

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::features::{FeatureKind, NumericKind, FEATURES};

/// value domain of a range feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeKind {
    Integer,
    /// unitless number
    Number,
    Length,
    Resolution,
    Ratio,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FeatureKnowledge {
    /// a closed set of values
    #[serde(rename_all = "camelCase")]
    Discrete {
        values: Vec<String>,
        /// boolean context can be false even though no value is falsy
        #[serde(default)]
        can_be_false: bool,
    },
    /// a numeric or ratio interval
    #[serde(rename_all = "camelCase")]
    Range {
        kind: RangeKind,
        #[serde(default)]
        can_be_zero: bool,
        #[serde(default)]
        can_be_negative: bool,
        /// identifiers accepted besides numbers, e.g. `infinite`
        #[serde(default)]
        extra_values: Vec<String>,
    },
}

impl FeatureKnowledge {
    pub fn discrete(values: &[&str]) -> Self {
        FeatureKnowledge::Discrete {
            values: values.iter().map(|v| v.to_string()).collect(),
            can_be_false: false,
        }
    }

    pub fn range(kind: RangeKind, can_be_zero: bool) -> Self {
        FeatureKnowledge::Range {
            kind,
            can_be_zero,
            can_be_negative: false,
            extra_values: Vec::new(),
        }
    }

    pub fn is_range(&self) -> bool {
        matches!(self, FeatureKnowledge::Range { .. })
    }

    /// whether boolean context may evaluate to false
    pub fn can_be_falsy(&self) -> bool {
        match self {
            FeatureKnowledge::Discrete {
                values,
                can_be_false,
            } => {
                *can_be_false
                    || values
                        .iter()
                        .any(|v| matches!(v.as_str(), "none" | "no-preference" | "0"))
            }
            FeatureKnowledge::Range { can_be_zero, .. } => *can_be_zero,
        }
    }
}

/// ranges that can never be zero on a real device
const NEVER_ZERO: &[&str] = &[
    "device-width",
    "device-height",
    "resolution",
    "-webkit-device-pixel-ratio",
    "horizontal-viewport-segments",
    "vertical-viewport-segments",
];

fn knowledge_for(name: &str, kind: FeatureKind) -> FeatureKnowledge {
    let can_be_zero = !NEVER_ZERO.contains(&name);
    match kind {
        FeatureKind::Discrete(values) => FeatureKnowledge::Discrete {
            values: values.iter().map(|v| v.to_text()).collect(),
            can_be_false: false,
        },
        FeatureKind::Gamut => FeatureKnowledge::Discrete {
            values: vec!["srgb".to_string(), "p3".to_string(), "rec2020".to_string()],
            can_be_false: true,
        },
        FeatureKind::Orientation => FeatureKnowledge::discrete(&["portrait", "landscape"]),
        FeatureKind::Range(NumericKind::Length) => {
            FeatureKnowledge::range(RangeKind::Length, can_be_zero)
        }
        FeatureKind::Range(NumericKind::Integer) => {
            FeatureKnowledge::range(RangeKind::Integer, can_be_zero)
        }
        FeatureKind::Range(NumericKind::Resolution) => FeatureKnowledge::Range {
            kind: RangeKind::Resolution,
            can_be_zero,
            can_be_negative: false,
            extra_values: vec!["infinite".to_string()],
        },
        FeatureKind::Ratio => FeatureKnowledge::range(RangeKind::Ratio, can_be_zero),
        FeatureKind::PixelRatio => FeatureKnowledge::range(RangeKind::Number, can_be_zero),
    }
}

lazy_static! {
    /// built-in knowledge for every standard media feature
    pub static ref DEFAULT_KNOWN_FEATURES: HashMap<String, FeatureKnowledge> = FEATURES
        .iter()
        .map(|spec| (spec.name.to_string(), knowledge_for(spec.name, spec.kind)))
        .collect();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_covers_all_features() {
        assert_eq!(DEFAULT_KNOWN_FEATURES.len(), FEATURES.len());
        assert!(DEFAULT_KNOWN_FEATURES.contains_key("prefers-reduced-motion"));
    }

    #[test]
    fn test_default_flags() {
        assert_eq!(
            DEFAULT_KNOWN_FEATURES["width"],
            FeatureKnowledge::range(RangeKind::Length, true)
        );
        assert_eq!(
            DEFAULT_KNOWN_FEATURES["device-width"],
            FeatureKnowledge::range(RangeKind::Length, false)
        );
        assert_eq!(
            DEFAULT_KNOWN_FEATURES["grid"],
            FeatureKnowledge::discrete(&["0", "1"])
        );
        match &DEFAULT_KNOWN_FEATURES["resolution"] {
            FeatureKnowledge::Range { extra_values, can_be_zero, .. } => {
                assert_eq!(extra_values, &vec!["infinite".to_string()]);
                assert!(!can_be_zero);
            }
            other => panic!("unexpected knowledge {:?}", other),
        }
    }

    #[test]
    fn test_can_be_falsy() {
        assert!(DEFAULT_KNOWN_FEATURES["hover"].can_be_falsy());
        assert!(DEFAULT_KNOWN_FEATURES["grid"].can_be_falsy());
        assert!(DEFAULT_KNOWN_FEATURES["color-gamut"].can_be_falsy());
        assert!(!DEFAULT_KNOWN_FEATURES["orientation"].can_be_falsy());
        assert!(!DEFAULT_KNOWN_FEATURES["prefers-color-scheme"].can_be_falsy());
        assert!(DEFAULT_KNOWN_FEATURES["color"].can_be_falsy());
        assert!(!DEFAULT_KNOWN_FEATURES["resolution"].can_be_falsy());
    }

    #[test]
    fn test_knowledge_json() {
        let knowledge: FeatureKnowledge = serde_json::from_str(
            r#"{ "type": "range", "kind": "length", "canBeZero": false }"#,
        )
        .unwrap();
        assert_eq!(knowledge, FeatureKnowledge::range(RangeKind::Length, false));

        let knowledge: FeatureKnowledge =
            serde_json::from_str(r#"{ "type": "discrete", "values": ["a", "b"] }"#).unwrap();
        assert_eq!(knowledge, FeatureKnowledge::discrete(&["a", "b"]));
    }
}
