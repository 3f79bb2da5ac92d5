//! clause algebra: AND, De Morgan negation

use crate::algebra::{and_range, not_range};
use crate::features::{self, FeatureKind};

use super::types::{Constraint, Permutation};

fn merge_constraint(a: &Constraint, b: &Constraint) -> Constraint {
    match (a, b) {
        (Constraint::False, _) | (_, Constraint::False) => Constraint::False,
        (Constraint::True, other) | (other, Constraint::True) => other.clone(),
        (Constraint::Discrete(x), Constraint::Discrete(y)) if x == y => Constraint::Discrete(*x),
        (Constraint::Gamut(x), Constraint::Gamut(y)) => Constraint::Gamut(x.and(*y)),
        (Constraint::Range(x), Constraint::Range(y)) => and_range(x, y)
            .map(Constraint::Range)
            .unwrap_or(Constraint::False),
        (Constraint::Ratio(x), Constraint::Ratio(y)) => and_range(x, y)
            .map(Constraint::Ratio)
            .unwrap_or(Constraint::False),
        _ => Constraint::False,
    }
}

/// conjunction of two clauses
///
/// a media type from `b` overrides the one from `a`; invalid markers
/// accumulate.
pub fn merge_perms(a: &Permutation, b: &Permutation) -> Permutation {
    let mut merged = a.clone();
    if b.media_type.is_some() {
        merged.media_type = b.media_type;
    }
    merged
        .invalid_features
        .extend(b.invalid_features.iter().cloned());

    for (key, constraint) in &b.features {
        let combined = match merged.features.get(key) {
            Some(existing) => merge_constraint(existing, constraint),
            None => constraint.clone(),
        };
        merged.features.insert(*key, combined);
    }
    merged
}

/// pairwise product of two disjunctions
pub fn and_perms(a: &[Permutation], b: &[Permutation]) -> Vec<Permutation> {
    let mut out = Vec::with_capacity(a.len() * b.len());
    for x in a {
        for y in b {
            out.push(merge_perms(x, y));
        }
    }
    out
}

/// negation of one conjunct
fn invert_constraint(key: &'static str, constraint: &Constraint) -> Vec<Permutation> {
    match constraint {
        Constraint::True => Vec::new(),
        Constraint::False => vec![Permutation::default()],
        Constraint::Discrete(value) => match features::lookup(key).map(|spec| spec.kind) {
            Some(FeatureKind::Discrete(values)) => values
                .iter()
                .filter(|other| *other != value)
                .map(|other| Permutation::with(key, Constraint::Discrete(*other)))
                .collect(),
            _ => vec![Permutation::invalid(key)],
        },
        Constraint::Gamut(mask) => vec![Permutation::with(key, Constraint::Gamut(!*mask))],
        Constraint::Range(range) => not_range(range, &features::number_domain())
            .into_iter()
            .map(|r| Permutation::with(key, Constraint::Range(r)))
            .collect(),
        Constraint::Ratio(range) => not_range(range, &features::ratio_domain())
            .into_iter()
            .map(|r| Permutation::with(key, Constraint::Ratio(r)))
            .collect(),
    }
}

/// De Morgan for one clause: `not (k1 and k2 ...)` is `not k1 or not k2 ...`
///
/// negating an invalid clause keeps it invalid. the media type is left out,
/// the query level handles it.
pub fn invert_perm(perm: &Permutation) -> Vec<Permutation> {
    if perm.is_invalid() {
        return vec![Permutation {
            invalid_features: perm.invalid_features.clone(),
            ..Permutation::default()
        }];
    }

    let mut out = Vec::new();
    for (key, constraint) in &perm.features {
        if *constraint == Constraint::False {
            // the clause never held, so its negation always does
            return vec![Permutation::default()];
        }
        out.extend(invert_constraint(*key, constraint));
    }
    out
}

/// a key whose merged constraint admits no value
fn is_contradiction(perm: &Permutation) -> bool {
    perm.features.values().any(|constraint| match constraint {
        Constraint::False => true,
        Constraint::Gamut(mask) => mask.is_empty(),
        _ => false,
    })
}

/// `not (c1 or c2 ...)` is `not c1 and not c2 ...`
///
/// cross terms that contradict themselves, like `pointer: none` with
/// `pointer: fine`, are dropped as they appear.
pub fn not_perms(perms: &[Permutation]) -> Vec<Permutation> {
    perms.iter().fold(vec![Permutation::default()], |acc, perm| {
        and_perms(&acc, &invert_perm(perm))
            .into_iter()
            .filter(|merged| merged.is_invalid() || !is_contradiction(merged))
            .collect()
    })
}
