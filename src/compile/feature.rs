//! single feature to clauses

use crate::algebra::{and_range, not_range, Endpoint, Range, Ratio};
use crate::features::{self, FeatureKind, FeatureSpec, NumericKind, RangePrefix};
use crate::query::{Feature, RangeOp, Value};
use crate::units::{convert, Canonical, UnitConversions};

use super::types::{Constraint, GamutMask, Permutation};

const SRGB: GamutMask = GamutMask([false, true, true, true]);
const P3: GamutMask = GamutMask([false, false, true, true]);
const REC2020: GamutMask = GamutMask([false, false, false, true]);

/// compile one feature test into clauses
///
/// anything that cannot be understood becomes a single invalid clause
/// carrying the feature name as written.
pub fn feature_to_perms(feature: &Feature, units: &UnitConversions) -> Vec<Permutation> {
    match compile_feature(feature, units) {
        Some((key, constraints)) => constraints
            .into_iter()
            .map(|constraint| Permutation::with(key, constraint))
            .collect(),
        None => {
            let name = feature.name();
            match features::suggest(name).filter(|s| features::resolve(name).is_none() && *s != name) {
                Some(suggestion) => log::warn!(
                    "invalid media feature {} (did you mean '{}'?)",
                    feature,
                    suggestion
                ),
                None => log::warn!("invalid media feature {}", feature),
            }
            vec![Permutation::invalid(name)]
        }
    }
}

fn compile_feature(
    feature: &Feature,
    units: &UnitConversions,
) -> Option<(&'static str, Vec<Constraint>)> {
    let (prefix, spec) = features::resolve(feature.name())?;

    let constraints = match feature {
        Feature::Boolean { .. } => {
            if prefix.is_some() {
                return None;
            }
            boolean_constraints(spec)
        }
        Feature::Plain { value, .. } => vec![plain_constraint(spec, prefix, value, units)?],
        Feature::Range { left, right, .. } => {
            if prefix.is_some() {
                return None;
            }
            vec![range_constraint(spec, left.as_ref(), right.as_ref(), units)?]
        }
    };
    Some((spec.key(), constraints))
}

// ============================================================================
// Boolean context
// ============================================================================

fn boolean_constraints(spec: &FeatureSpec) -> Vec<Constraint> {
    match spec.kind {
        FeatureKind::Discrete(values) => {
            if !values.iter().any(|v| v.is_falsy()) {
                return vec![Constraint::True];
            }
            values
                .iter()
                .filter(|v| !v.is_falsy())
                .map(|v| Constraint::Discrete(*v))
                .collect()
        }
        FeatureKind::Gamut => vec![Constraint::Gamut(SRGB)],
        FeatureKind::Orientation => vec![Constraint::True],
        FeatureKind::Range(_) | FeatureKind::PixelRatio => {
            not_range(&Range::exact(0.0), &features::number_domain())
                .into_iter()
                .map(Constraint::Range)
                .collect()
        }
        FeatureKind::Ratio => not_range(&Range::exact(Ratio::ZERO), &features::ratio_domain())
            .into_iter()
            .map(Constraint::Ratio)
            .collect(),
    }
}

// ============================================================================
// Plain context
// ============================================================================

fn prefixed_range<T: Endpoint>(prefix: Option<RangePrefix>, value: T) -> Range<T> {
    match prefix {
        Some(RangePrefix::Min) => Range::at_least(value, true),
        Some(RangePrefix::Max) => Range::at_most(value, true),
        None => Range::exact(value),
    }
}

fn plain_constraint(
    spec: &FeatureSpec,
    prefix: Option<RangePrefix>,
    value: &Value,
    units: &UnitConversions,
) -> Option<Constraint> {
    match spec.kind {
        FeatureKind::Discrete(_) => {
            let found = spec.discrete_value(value.as_ident(), value.as_integer())?;
            if spec.is_universal(found) {
                Some(Constraint::True)
            } else {
                Some(Constraint::Discrete(found))
            }
        }
        FeatureKind::Gamut => match value.as_ident()? {
            "srgb" => Some(Constraint::Gamut(SRGB)),
            "p3" => Some(Constraint::Gamut(P3)),
            "rec2020" => Some(Constraint::Gamut(REC2020)),
            _ => None,
        },
        FeatureKind::Orientation => match value.as_ident()? {
            "portrait" => Some(Constraint::Ratio(Range::new(
                true,
                Ratio::ZERO,
                Ratio::new(1.0, 1.0),
                true,
            ))),
            "landscape" => Some(Constraint::Ratio(Range::at_least(Ratio::new(1.0, 1.0), false))),
            _ => None,
        },
        FeatureKind::Range(_) | FeatureKind::PixelRatio => {
            let number = numeric_value(spec.kind, value, units)?;
            Some(Constraint::Range(prefixed_range(prefix, number)))
        }
        FeatureKind::Ratio => {
            let ratio = convert(value, units).as_ratio()?;
            Some(Constraint::Ratio(prefixed_range(prefix, ratio)))
        }
    }
}

fn numeric_value(kind: FeatureKind, value: &Value, units: &UnitConversions) -> Option<f64> {
    let canonical = convert(value, units);
    match kind {
        FeatureKind::Range(NumericKind::Length) => canonical.as_length(),
        FeatureKind::Range(NumericKind::Integer) => canonical.as_integer(),
        FeatureKind::Range(NumericKind::Resolution) => canonical.as_resolution(),
        FeatureKind::PixelRatio => match canonical {
            Canonical::Number { value, .. } => Some(value),
            _ => None,
        },
        _ => None,
    }
}

// ============================================================================
// Range context
// ============================================================================

/// `name op value` as an interval
fn side_range<T: Endpoint>(op: RangeOp, value: T) -> Range<T> {
    match op {
        RangeOp::Lt => Range::at_most(value, false),
        RangeOp::Le => Range::at_most(value, true),
        RangeOp::Gt => Range::at_least(value, false),
        RangeOp::Ge => Range::at_least(value, true),
        RangeOp::Eq => Range::exact(value),
    }
}

/// intersect both sides, `value op name` is read as `name flip(op) value`
fn sides_to_range<T: Endpoint>(
    left: Option<(T, RangeOp)>,
    right: Option<(RangeOp, T)>,
) -> Option<Range<T>> {
    let mut range = Range::unbounded();
    if let Some((value, op)) = left {
        range = and_range(&range, &side_range(op.flip(), value))?;
    }
    if let Some((op, value)) = right {
        range = and_range(&range, &side_range(op, value))?;
    }
    Some(range)
}

fn range_constraint(
    spec: &FeatureSpec,
    left: Option<&(Value, RangeOp)>,
    right: Option<&(RangeOp, Value)>,
    units: &UnitConversions,
) -> Option<Constraint> {
    match spec.kind {
        FeatureKind::Range(_) | FeatureKind::PixelRatio => {
            let left = match left {
                Some((value, op)) => Some((numeric_value(spec.kind, value, units)?, *op)),
                None => None,
            };
            let right = match right {
                Some((op, value)) => Some((*op, numeric_value(spec.kind, value, units)?)),
                None => None,
            };
            Some(
                sides_to_range(left, right)
                    .map(Constraint::Range)
                    .unwrap_or(Constraint::False),
            )
        }
        FeatureKind::Ratio => {
            let left = match left {
                Some((value, op)) => Some((convert(value, units).as_ratio()?, *op)),
                None => None,
            };
            let right = match right {
                Some((op, value)) => Some((*op, convert(value, units).as_ratio()?)),
                None => None,
            };
            Some(
                sides_to_range(left, right)
                    .map(Constraint::Ratio)
                    .unwrap_or(Constraint::False),
            )
        }
        FeatureKind::Discrete(_) | FeatureKind::Gamut | FeatureKind::Orientation => None,
    }
}
