//! unit conversion for media feature values
//!
//! maps raw query values to canonical units:
//! - lengths to px
//! - resolutions to dppx (rounded to 3 decimal places)
//! - times to ms, frequencies to Hz
//! - `a/b` to exact ratios
//!
//! font and viewport relative lengths come from a caller supplied
//! [`UnitConversions`] record.

use serde::{Deserialize, Serialize};

use crate::algebra::Ratio;
use crate::query::Value;

const PX_PER_IN: f64 = 96.0;
const PX_PER_CM: f64 = PX_PER_IN / 2.54;
const PX_PER_MM: f64 = PX_PER_CM / 10.0;
const PX_PER_Q: f64 = PX_PER_CM / 40.0;
const PX_PER_PC: f64 = PX_PER_IN / 6.0;
const PX_PER_PT: f64 = PX_PER_IN / 72.0;

const DPPX_PER_DPI: f64 = 1.0 / 96.0;
const DPPX_PER_DPCM: f64 = 2.54 / 96.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WritingMode {
    #[default]
    HorizontalTb,
    VerticalLr,
    VerticalRl,
    SidewaysLr,
    SidewaysRl,
}

impl WritingMode {
    pub fn is_vertical(self) -> bool {
        !matches!(self, WritingMode::HorizontalTb)
    }
}

/// base metrics used to resolve relative units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UnitConversions {
    /// viewport width, for `vw` and friends
    pub width_px: f64,
    /// viewport height, for `vh` and friends
    pub height_px: f64,
    pub em_px: f64,
    pub rem_px: f64,
    pub ex_px: f64,
    pub ch_px: f64,
    pub cap_px: f64,
    pub ic_px: f64,
    pub lh_px: f64,
    pub rlh_px: f64,
    /// picks whether `vi`/`vb` follow width or height
    pub writing_mode: WritingMode,
}

impl Default for UnitConversions {
    fn default() -> Self {
        Self {
            width_px: 1920.0,
            height_px: 1080.0,
            em_px: 16.0,
            rem_px: 16.0,
            ex_px: 8.0,
            ch_px: 8.0,
            cap_px: 11.0,
            ic_px: 16.0,
            lh_px: 19.2,
            rlh_px: 19.2,
            writing_mode: WritingMode::HorizontalTb,
        }
    }
}

/// a feature value resolved to a canonical unit
#[derive(Debug, Clone, PartialEq)]
pub enum Canonical {
    Number { value: f64, integer: bool },
    /// px
    Length(f64),
    /// ms
    Time(f64),
    /// Hz
    Frequency(f64),
    /// dppx
    Resolution(f64),
    Ratio(Ratio),
    /// the `infinite` keyword
    Infinite,
    /// identifiers, and dimensions with unknown units
    Ident(String),
}

impl Canonical {
    /// length in px, a unitless zero counts as `0px`
    pub fn as_length(&self) -> Option<f64> {
        match self {
            Canonical::Length(px) => Some(*px),
            Canonical::Number { value, .. } if *value == 0.0 => Some(0.0),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<f64> {
        match self {
            Canonical::Number {
                value,
                integer: true,
            } => Some(*value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Canonical::Number { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// resolution in dppx, `infinite` maps to +inf
    pub fn as_resolution(&self) -> Option<f64> {
        match self {
            Canonical::Resolution(dppx) => Some(*dppx),
            Canonical::Infinite => Some(f64::INFINITY),
            _ => None,
        }
    }

    /// non-negative ratio, a bare number `n` reads as `n/1`
    pub fn as_ratio(&self) -> Option<Ratio> {
        let ratio = match self {
            Canonical::Ratio(r) => *r,
            Canonical::Number { value, .. } => Ratio::new(*value, 1.0),
            _ => return None,
        };
        (ratio.numerator >= 0.0 && ratio.denominator >= 0.0).then_some(ratio)
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn length_px(value: f64, unit: &str, units: &UnitConversions) -> Option<f64> {
    let (inline, block) = if units.writing_mode.is_vertical() {
        (units.height_px, units.width_px)
    } else {
        (units.width_px, units.height_px)
    };

    let per_unit = match unit {
        "px" => 1.0,
        "cm" => PX_PER_CM,
        "mm" => PX_PER_MM,
        "q" => PX_PER_Q,
        "in" => PX_PER_IN,
        "pc" => PX_PER_PC,
        "pt" => PX_PER_PT,
        "em" => units.em_px,
        "rem" => units.rem_px,
        "ex" => units.ex_px,
        "ch" => units.ch_px,
        "cap" => units.cap_px,
        "ic" => units.ic_px,
        "lh" => units.lh_px,
        "rlh" => units.rlh_px,
        "vw" | "svw" | "lvw" | "dvw" => units.width_px / 100.0,
        "vh" | "svh" | "lvh" | "dvh" => units.height_px / 100.0,
        "vi" | "svi" | "lvi" | "dvi" => inline / 100.0,
        "vb" | "svb" | "lvb" | "dvb" => block / 100.0,
        "vmin" | "svmin" | "lvmin" | "dvmin" => units.width_px.min(units.height_px) / 100.0,
        "vmax" | "svmax" | "lvmax" | "dvmax" => units.width_px.max(units.height_px) / 100.0,
        _ => return None,
    };
    Some(value * per_unit)
}

fn resolution_dppx(value: f64, unit: &str) -> Option<f64> {
    match unit {
        "dppx" | "x" => Some(value),
        "dpi" => Some(round3(value * DPPX_PER_DPI)),
        "dpcm" => Some(round3(value * DPPX_PER_DPCM)),
        _ => None,
    }
}

/// resolve a raw value to its canonical unit
pub fn convert(value: &Value, units: &UnitConversions) -> Canonical {
    match value {
        Value::Number { value, integer } => Canonical::Number {
            value: *value,
            integer: *integer,
        },
        Value::Ratio {
            numerator,
            denominator,
        } => Canonical::Ratio(Ratio::new(*numerator, *denominator)),
        Value::Ident(name) if name == "infinite" => Canonical::Infinite,
        Value::Ident(name) => Canonical::Ident(name.clone()),
        Value::Dimension { value, unit } => {
            if let Some(px) = length_px(*value, unit, units) {
                return Canonical::Length(px);
            }
            if let Some(dppx) = resolution_dppx(*value, unit) {
                return Canonical::Resolution(dppx);
            }
            match unit.as_str() {
                "ms" => Canonical::Time(*value),
                "s" => Canonical::Time(*value * 1000.0),
                "hz" => Canonical::Frequency(*value),
                "khz" => Canonical::Frequency(*value * 1000.0),
                _ => Canonical::Ident(format!("{}{}", value, unit)),
            }
        }
    }
}
