//! three-valued solver
//!
//! walks the parsed query tree directly and answers `true`, `false` or
//! `unknown` from partial knowledge about the device:
//! - media type and legacy browser flags from [`SolverConfig`]
//! - value domains from the feature knowledge table
//! - everything else from the configured [`UnknownSolver`]

mod config;
mod environment;
mod kleene;
mod knowledge;

pub use config::{AssumeUnknown, SolverConfig, UnknownSolver};
pub use environment::EnvironmentSolver;
pub use kleene::Kleene3;
pub use knowledge::{FeatureKnowledge, RangeKind, DEFAULT_KNOWN_FEATURES};

use crate::query::{Condition, Feature, InParens, MediaType, Prefix, Query, QueryList, RangeOp, Value};
use crate::units::{convert, Canonical, UnitConversions};

/// OR over the queries of a list
pub fn solve_media_query_list(list: &QueryList, config: &SolverConfig) -> Kleene3 {
    let mut verdict = Kleene3::False;
    for query in &list.queries {
        verdict = verdict | solve_media_query(query, config);
        if verdict.is_true() {
            break;
        }
    }
    log::debug!("solved '{}' as {}", list, verdict);
    verdict
}

pub fn solve_media_query(query: &Query, config: &SolverConfig) -> Kleene3 {
    let media_type = match &query.media_type {
        MediaType::All => Kleene3::True,
        MediaType::Screen => config.is_media_type_screen,
        MediaType::Print => !config.is_media_type_screen,
        MediaType::Other(_) => Kleene3::False,
    };
    let condition = query
        .condition
        .as_ref()
        .map_or(Kleene3::True, |condition| solve_media_condition(condition, config));
    let verdict = media_type & condition;

    match query.prefix {
        Some(Prefix::Not) => !verdict,
        Some(Prefix::Only) => verdict & !config.is_legacy_browser,
        None => verdict,
    }
}

pub fn solve_media_condition(condition: &Condition, config: &SolverConfig) -> Kleene3 {
    match condition {
        Condition::And(items) => items.iter().fold(Kleene3::True, |acc, item| {
            acc & solve_media_in_parens(item, config)
        }),
        Condition::Or(items) => items.iter().fold(Kleene3::False, |acc, item| {
            acc | solve_media_in_parens(item, config)
        }),
        Condition::Not(item) => !solve_media_in_parens(item, config),
    }
}

pub fn solve_media_in_parens(item: &InParens, config: &SolverConfig) -> Kleene3 {
    match item {
        InParens::Condition(condition) => solve_media_condition(condition, config),
        InParens::Feature(feature) => solve_media_feature(feature, config),
        InParens::GeneralEnclosed(text) => config.unknown.solve_general_enclosed(text),
    }
}

// ============================================================================
// Features
// ============================================================================

/// split `min-`/`max-` (or `-webkit-min-`/`-webkit-max-`) off a range name
fn strip_range_prefix(name: &str) -> Option<(RangeOp, String)> {
    if let Some(rest) = name.strip_prefix("min-") {
        Some((RangeOp::Ge, rest.to_string()))
    } else if let Some(rest) = name.strip_prefix("max-") {
        Some((RangeOp::Le, rest.to_string()))
    } else if let Some(rest) = name.strip_prefix("-webkit-min-") {
        Some((RangeOp::Ge, format!("-webkit-{}", rest)))
    } else if let Some(rest) = name.strip_prefix("-webkit-max-") {
        Some((RangeOp::Le, format!("-webkit-{}", rest)))
    } else {
        None
    }
}

pub fn solve_media_feature(feature: &Feature, config: &SolverConfig) -> Kleene3 {
    let name = feature.name();
    let Some(knowledge) = config.knowledge(name) else {
        // `(min-width: 10px)` is solved as `(width >= 10px)`
        if let Feature::Plain { value, .. } = feature {
            if let Some((op, base)) = strip_range_prefix(name) {
                if config.knowledge(&base).is_some_and(|k| k.is_range()) {
                    return solve_media_feature(&Feature::compare(base, op, value.clone()), config);
                }
            }
        }
        return Kleene3::False;
    };

    match (feature, knowledge) {
        (Feature::Boolean { .. }, knowledge) => {
            if knowledge.can_be_falsy() {
                config.unknown.solve_unknown_feature(feature)
            } else {
                Kleene3::True
            }
        }
        (Feature::Plain { value, .. }, FeatureKnowledge::Discrete { values, .. }) => {
            match discrete_text(value) {
                Some(text) if values.contains(&text) => config.unknown.solve_unknown_feature(feature),
                _ => Kleene3::False,
            }
        }
        (Feature::Plain { value, .. }, FeatureKnowledge::Range { .. }) => {
            solve_comparison(feature, RangeOp::Eq, value, knowledge, config)
        }
        (Feature::Range { left, right, .. }, FeatureKnowledge::Range { .. }) => match (left, right) {
            (Some((min, min_op)), Some(_)) => {
                let lower = Feature::compare(name, min_op.flip(), min.clone());
                let upper = Feature::Range {
                    name: name.to_string(),
                    left: None,
                    right: right.clone(),
                };
                solve_media_feature(&lower, config) & solve_media_feature(&upper, config)
            }
            (Some((value, op)), None) => {
                let flipped = Feature::compare(name, op.flip(), value.clone());
                solve_comparison(&flipped, op.flip(), value, knowledge, config)
            }
            (None, Some((op, value))) => solve_comparison(feature, *op, value, knowledge, config),
            (None, None) => Kleene3::False,
        },
        (Feature::Range { .. }, FeatureKnowledge::Discrete { .. }) => Kleene3::False,
    }
}

fn discrete_text(value: &Value) -> Option<String> {
    match value {
        Value::Ident(ident) => Some(ident.clone()),
        Value::Number { .. } => value.as_integer().map(|i| i.to_string()),
        _ => None,
    }
}

/// the value as a number in the feature's domain, `None` when it has the
/// wrong type
fn range_value(
    value: &Value,
    kind: RangeKind,
    extra_values: &[String],
    units: &UnitConversions,
) -> Option<f64> {
    if let Value::Ident(ident) = value {
        if !extra_values.contains(ident) {
            return None;
        }
        return match ident.as_str() {
            "infinite" => Some(f64::INFINITY),
            _ => Some(f64::NAN),
        };
    }

    let canonical = convert(value, units);
    match kind {
        RangeKind::Integer => canonical.as_integer(),
        RangeKind::Number => canonical.as_number(),
        RangeKind::Length => canonical.as_length(),
        RangeKind::Resolution => match canonical {
            Canonical::Resolution(dppx) => Some(dppx),
            _ => None,
        },
        RangeKind::Ratio => match canonical {
            Canonical::Number { value, .. } => Some(value),
            Canonical::Ratio(ratio) if ratio.numerator >= 0.0 && ratio.denominator >= 0.0 => {
                Some(ratio.quotient())
            }
            _ => None,
        },
    }
}

/// `name op value`, decided from the domain when possible
fn solve_comparison(
    feature: &Feature,
    op: RangeOp,
    value: &Value,
    knowledge: &FeatureKnowledge,
    config: &SolverConfig,
) -> Kleene3 {
    let FeatureKnowledge::Range {
        kind,
        can_be_zero,
        can_be_negative,
        extra_values,
    } = knowledge
    else {
        return Kleene3::False;
    };

    let Some(v) = range_value(value, *kind, extra_values, &config.units) else {
        return Kleene3::False;
    };
    let defer = || config.unknown.solve_unknown_feature(feature);
    if v.is_nan() || *can_be_negative {
        return defer();
    }

    // x lies in [0, inf], or (0, inf] when zero is impossible
    let zero = *can_be_zero;
    let inf = v == f64::INFINITY;
    match op {
        RangeOp::Eq if v < 0.0 || (v == 0.0 && !zero) => Kleene3::False,
        RangeOp::Gt if v < 0.0 || (v == 0.0 && !zero) => Kleene3::True,
        RangeOp::Gt if inf => Kleene3::False,
        RangeOp::Ge if v <= 0.0 => Kleene3::True,
        RangeOp::Lt if v <= 0.0 => Kleene3::False,
        RangeOp::Le if v < 0.0 || (v == 0.0 && !zero) => Kleene3::False,
        RangeOp::Le if inf => Kleene3::True,
        _ => defer(),
    }
}
