//! concrete matcher
//!
//! decides whether a compiled query holds for one fully known device

mod environment;

pub use environment::{
    ColorGamut, ColorIndex, ColorScheme, Contrast, DeviceMediaType, DisplayMode, DynamicRange,
    Environment, EnvironmentBlending, ForcedColors, Hover, InvertedColors, Monochrome,
    NavControls, NoColorIndex, NotMonochrome, OverflowBlock, OverflowInline, Pointer, Reduce,
    Scan, Scripting, Update,
};

use crate::algebra::Ratio;
use crate::compile::{Constraint, EvaluateResult, MediaTypeTag, Permutation};
use crate::error::EnvironmentError;
use crate::features::DiscreteValue;

/// whether any clause of `result` holds in `env`
///
/// the environment is validated first; a value outside its domain is an
/// error rather than a non-match.
pub fn matches(result: &EvaluateResult, env: &Environment) -> Result<bool, EnvironmentError> {
    env.validate()?;
    Ok(result
        .simple_perms
        .iter()
        .any(|perm| perm_matches(perm, env)))
}

/// whether one clause holds in `env`, assuming `env` is valid
pub fn perm_matches(perm: &Permutation, env: &Environment) -> bool {
    if perm.is_invalid() {
        return false;
    }
    if let Some(tag) = perm.media_type {
        if !media_type_matches(tag, env.media_type) {
            return false;
        }
    }
    perm.features
        .iter()
        .all(|(key, constraint)| constraint_matches(key, constraint, env))
}

fn media_type_matches(tag: MediaTypeTag, actual: DeviceMediaType) -> bool {
    match tag {
        MediaTypeTag::All => true,
        MediaTypeTag::Screen => actual == DeviceMediaType::Screen,
        MediaTypeTag::Print => actual == DeviceMediaType::Print,
        MediaTypeTag::NotScreen => actual != DeviceMediaType::Screen,
        MediaTypeTag::NotPrint => actual != DeviceMediaType::Print,
    }
}

fn aspect_ratio(env: &Environment, key: &str) -> Option<Ratio> {
    match key {
        "aspect-ratio" => Some(Ratio::new(env.width_px, env.height_px)),
        "device-aspect-ratio" => Some(Ratio::new(env.device_width_px, env.device_height_px)),
        _ => None,
    }
}

fn constraint_matches(key: &str, constraint: &Constraint, env: &Environment) -> bool {
    match constraint {
        Constraint::True => true,
        Constraint::False => false,
        Constraint::Discrete(DiscreteValue::Keyword(expected)) => {
            env.keyword(key).is_some_and(|actual| actual == *expected)
        }
        Constraint::Discrete(DiscreteValue::Integer(expected)) => match key {
            "grid" => i64::from(env.grid) == *expected,
            _ => false,
        },
        Constraint::Gamut(mask) => env.gamut_band(key).is_some_and(|band| mask.0[band]),
        Constraint::Range(range) => env.number(key).is_some_and(|value| range.contains(&value)),
        Constraint::Ratio(range) => aspect_ratio(env, key).is_some_and(|ratio| range.contains(&ratio)),
    }
}
