//! static media feature table
//!
//! every feature name maps to exactly one kind. the compiler, matcher and
//! solver all read this table instead of guessing from the value they see.

use serde::{Serialize, Serializer};
use strsim::levenshtein;

use crate::algebra::{Range, Ratio};

/// one legal value of a discrete feature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscreteValue {
    Keyword(&'static str),
    Integer(i64),
}

impl DiscreteValue {
    /// `none`, `no-preference` and `0` are what boolean context treats as false
    pub fn is_falsy(self) -> bool {
        matches!(
            self,
            DiscreteValue::Keyword("none") | DiscreteValue::Keyword("no-preference") | DiscreteValue::Integer(0)
        )
    }

    /// text form, as used in solver knowledge tables
    pub fn to_text(self) -> String {
        match self {
            DiscreteValue::Keyword(k) => k.to_string(),
            DiscreteValue::Integer(i) => i.to_string(),
        }
    }
}

impl Serialize for DiscreteValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DiscreteValue::Keyword(k) => serializer.serialize_str(k),
            DiscreteValue::Integer(i) => serializer.serialize_i64(*i),
        }
    }
}

/// numeric domain of a range feature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    /// px
    Length,
    Integer,
    /// dppx, accepts `infinite`
    Resolution,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    Discrete(&'static [DiscreteValue]),
    /// `color-gamut` style 4-band mask
    Gamut,
    Range(NumericKind),
    /// exact ratio ranges
    Ratio,
    /// portrait / landscape, stored as an `aspect-ratio` range
    Orientation,
    /// `-webkit-device-pixel-ratio`, a plain number stored as `resolution`
    PixelRatio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSpec {
    pub name: &'static str,
    pub kind: FeatureKind,
}

/// `min-` / `max-` on a range feature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePrefix {
    Min,
    Max,
}

const GAMUT_VALUES: &[&str] = &["srgb", "p3", "rec2020"];

impl FeatureSpec {
    /// the key the feature is stored under in a compiled clause
    pub fn key(&self) -> &'static str {
        match self.kind {
            FeatureKind::Orientation => "aspect-ratio",
            FeatureKind::PixelRatio => "resolution",
            _ => self.name,
        }
    }

    /// whether `min-`/`max-` and range syntax apply
    pub fn is_range(&self) -> bool {
        matches!(
            self.kind,
            FeatureKind::Range(_) | FeatureKind::Ratio | FeatureKind::PixelRatio
        )
    }

    /// a value every device satisfies
    pub fn is_universal(&self, value: DiscreteValue) -> bool {
        matches!(
            (self.name, value),
            ("dynamic-range" | "video-dynamic-range", DiscreteValue::Keyword("standard"))
        )
    }

    /// find the legal discrete value a written identifier or integer names
    pub fn discrete_value(&self, ident: Option<&str>, integer: Option<i64>) -> Option<DiscreteValue> {
        let FeatureKind::Discrete(values) = self.kind else {
            return None;
        };
        values.iter().copied().find(|v| match v {
            DiscreteValue::Keyword(k) => ident == Some(*k),
            DiscreteValue::Integer(i) => integer == Some(*i),
        })
    }

    /// discrete value names in text form, gamut bands included
    pub fn value_names(&self) -> Vec<String> {
        match self.kind {
            FeatureKind::Discrete(values) => values.iter().map(|v| v.to_text()).collect(),
            FeatureKind::Gamut => GAMUT_VALUES.iter().map(|v| v.to_string()).collect(),
            FeatureKind::Orientation => vec!["portrait".to_string(), "landscape".to_string()],
            _ => Vec::new(),
        }
    }
}

/// domain for every numeric range feature
pub fn number_domain() -> Range<f64> {
    Range::non_negative()
}

/// domain for every ratio range feature
pub fn ratio_domain() -> Range<Ratio> {
    Range::non_negative()
}

// ============================================================================
// Feature table
// ============================================================================

use DiscreteValue::{Integer as I, Keyword as K};

const HOVER: &[DiscreteValue] = &[K("none"), K("hover")];
const POINTER: &[DiscreteValue] = &[K("none"), K("coarse"), K("fine")];
const GRID: &[DiscreteValue] = &[I(0), I(1)];
const UPDATE: &[DiscreteValue] = &[K("none"), K("slow"), K("fast")];
const OVERFLOW_BLOCK: &[DiscreteValue] = &[K("none"), K("scroll"), K("paged")];
const OVERFLOW_INLINE: &[DiscreteValue] = &[K("none"), K("scroll")];
const SCAN: &[DiscreteValue] = &[K("interlace"), K("progressive")];
const ENVIRONMENT_BLENDING: &[DiscreteValue] = &[K("opaque"), K("additive"), K("subtractive")];
const DISPLAY_MODE: &[DiscreteValue] = &[
    K("fullscreen"),
    K("standalone"),
    K("minimal-ui"),
    K("browser"),
    K("picture-in-picture"),
    K("window-controls-overlay"),
];
const DYNAMIC_RANGE: &[DiscreteValue] = &[K("standard"), K("high")];
const FORCED_COLORS: &[DiscreteValue] = &[K("none"), K("active")];
const INVERTED_COLORS: &[DiscreteValue] = &[K("none"), K("inverted")];
const NAV_CONTROLS: &[DiscreteValue] = &[K("none"), K("back")];
const COLOR_SCHEME: &[DiscreteValue] = &[K("light"), K("dark")];
const CONTRAST: &[DiscreteValue] = &[K("no-preference"), K("less"), K("more"), K("custom")];
const REDUCE: &[DiscreteValue] = &[K("no-preference"), K("reduce")];
const SCRIPTING: &[DiscreteValue] = &[K("none"), K("initial-only"), K("enabled")];

const fn spec(name: &'static str, kind: FeatureKind) -> FeatureSpec {
    FeatureSpec { name, kind }
}

pub static FEATURES: &[FeatureSpec] = &[
    spec("width", FeatureKind::Range(NumericKind::Length)),
    spec("height", FeatureKind::Range(NumericKind::Length)),
    spec("device-width", FeatureKind::Range(NumericKind::Length)),
    spec("device-height", FeatureKind::Range(NumericKind::Length)),
    spec("aspect-ratio", FeatureKind::Ratio),
    spec("device-aspect-ratio", FeatureKind::Ratio),
    spec("orientation", FeatureKind::Orientation),
    spec("resolution", FeatureKind::Range(NumericKind::Resolution)),
    spec("-webkit-device-pixel-ratio", FeatureKind::PixelRatio),
    spec("color", FeatureKind::Range(NumericKind::Integer)),
    spec("color-index", FeatureKind::Range(NumericKind::Integer)),
    spec("monochrome", FeatureKind::Range(NumericKind::Integer)),
    spec("horizontal-viewport-segments", FeatureKind::Range(NumericKind::Integer)),
    spec("vertical-viewport-segments", FeatureKind::Range(NumericKind::Integer)),
    spec("color-gamut", FeatureKind::Gamut),
    spec("video-color-gamut", FeatureKind::Gamut),
    spec("grid", FeatureKind::Discrete(GRID)),
    spec("any-hover", FeatureKind::Discrete(HOVER)),
    spec("hover", FeatureKind::Discrete(HOVER)),
    spec("any-pointer", FeatureKind::Discrete(POINTER)),
    spec("pointer", FeatureKind::Discrete(POINTER)),
    spec("update", FeatureKind::Discrete(UPDATE)),
    spec("overflow-block", FeatureKind::Discrete(OVERFLOW_BLOCK)),
    spec("overflow-inline", FeatureKind::Discrete(OVERFLOW_INLINE)),
    spec("scan", FeatureKind::Discrete(SCAN)),
    spec("environment-blending", FeatureKind::Discrete(ENVIRONMENT_BLENDING)),
    spec("display-mode", FeatureKind::Discrete(DISPLAY_MODE)),
    spec("dynamic-range", FeatureKind::Discrete(DYNAMIC_RANGE)),
    spec("video-dynamic-range", FeatureKind::Discrete(DYNAMIC_RANGE)),
    spec("forced-colors", FeatureKind::Discrete(FORCED_COLORS)),
    spec("inverted-colors", FeatureKind::Discrete(INVERTED_COLORS)),
    spec("nav-controls", FeatureKind::Discrete(NAV_CONTROLS)),
    spec("prefers-color-scheme", FeatureKind::Discrete(COLOR_SCHEME)),
    spec("prefers-contrast", FeatureKind::Discrete(CONTRAST)),
    spec("prefers-reduced-data", FeatureKind::Discrete(REDUCE)),
    spec("prefers-reduced-motion", FeatureKind::Discrete(REDUCE)),
    spec("prefers-reduced-transparency", FeatureKind::Discrete(REDUCE)),
    spec("scripting", FeatureKind::Discrete(SCRIPTING)),
];

/// exact lookup by lowercased name
pub fn lookup(name: &str) -> Option<&'static FeatureSpec> {
    FEATURES.iter().find(|spec| spec.name == name)
}

/// resolve a written name, peeling off `min-`/`max-` (or `-webkit-min-` /
/// `-webkit-max-`) when the remaining feature takes a range
pub fn resolve(name: &str) -> Option<(Option<RangePrefix>, &'static FeatureSpec)> {
    if let Some(spec) = lookup(name) {
        return Some((None, spec));
    }

    let (prefix, rest, webkit) = if let Some(rest) = name.strip_prefix("min-") {
        (RangePrefix::Min, rest, false)
    } else if let Some(rest) = name.strip_prefix("max-") {
        (RangePrefix::Max, rest, false)
    } else if let Some(rest) = name.strip_prefix("-webkit-min-") {
        (RangePrefix::Min, rest, true)
    } else if let Some(rest) = name.strip_prefix("-webkit-max-") {
        (RangePrefix::Max, rest, true)
    } else {
        return None;
    };

    let spec = if webkit {
        lookup(&format!("-webkit-{}", rest))?
    } else {
        lookup(rest)?
    };
    spec.is_range().then_some((Some(prefix), spec))
}

/// closest known feature name, for "did you mean" hints
pub fn suggest(name: &str) -> Option<&'static str> {
    FEATURES
        .iter()
        .map(|spec| (levenshtein(name, spec.name), spec.name))
        .filter(|(distance, _)| *distance <= 3)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, name)| name)
}
