//! clause simplification

use std::collections::BTreeSet;

use crate::algebra::{and_range, bound_range, Bounded};
use crate::features;

use super::types::{Constraint, EvaluateResult, MediaTypeTag, Permutation};

fn simplify_constraint(constraint: &Constraint) -> Constraint {
    match constraint {
        Constraint::Range(range) => match bound_range(range, &features::number_domain()) {
            Bounded::True => Constraint::True,
            Bounded::False => Constraint::False,
            Bounded::Range(bounded) => Constraint::Range(bounded),
        },
        Constraint::Ratio(range) => match bound_range(range, &features::ratio_domain()) {
            Bounded::True => Constraint::True,
            Bounded::False => Constraint::False,
            Bounded::Range(bounded) => Constraint::Ratio(bounded),
        },
        Constraint::Gamut(mask) if mask.is_empty() => Constraint::False,
        Constraint::Gamut(mask) if mask.is_full() => Constraint::True,
        other => other.clone(),
    }
}

/// every value `b` admits is admitted by `a`
fn constraint_covers(a: &Constraint, b: &Constraint) -> bool {
    match (a, b) {
        (Constraint::True, _) | (_, Constraint::False) => true,
        (Constraint::Discrete(x), Constraint::Discrete(y)) => x == y,
        (Constraint::Gamut(x), Constraint::Gamut(y)) => x.and(*y) == *y,
        (Constraint::Range(x), Constraint::Range(y)) => {
            and_range(x, y).is_some_and(|common| common.same_as(y))
        }
        (Constraint::Ratio(x), Constraint::Ratio(y)) => {
            and_range(x, y).is_some_and(|common| common.same_as(y))
        }
        _ => false,
    }
}

/// every device matching `b` also matches `a`
fn perm_covers(a: &Permutation, b: &Permutation) -> bool {
    let media_type = match a.media_type {
        None => true,
        Some(tag) => b.media_type == Some(tag),
    };
    media_type
        && a.features.iter().all(|(key, constraint)| {
            b.features
                .get(key)
                .is_some_and(|other| constraint_covers(constraint, other))
        })
}

/// drop duplicates and clauses implied by another clause, keeping the
/// first of equivalent clauses and the original order
fn drop_redundant(perms: Vec<Permutation>) -> Vec<Permutation> {
    let keep: Vec<bool> = perms
        .iter()
        .enumerate()
        .map(|(i, perm)| {
            !perms.iter().enumerate().any(|(j, other)| {
                j != i && perm_covers(other, perm) && (j < i || !perm_covers(perm, other))
            })
        })
        .collect();

    perms
        .into_iter()
        .zip(keep)
        .filter_map(|(perm, keep)| keep.then_some(perm))
        .collect()
}

/// bound every range, drop satisfied keys and unmatchable clauses
///
/// clauses with an unsatisfiable key are dropped and the key is recorded in
/// `false_features`; clauses with invalid markers are dropped and the
/// markers recorded in `invalid_features`. duplicate clauses and clauses
/// implied by another one are removed.
pub fn simplify_perms(perms: &[Permutation]) -> EvaluateResult {
    let mut invalid_features = BTreeSet::new();
    let mut false_features = BTreeSet::new();
    let mut simple_perms = Vec::new();

    for perm in perms {
        if perm.is_invalid() {
            invalid_features.extend(perm.invalid_features.iter().cloned());
            continue;
        }

        let mut simple = Permutation {
            media_type: perm.media_type.filter(|tag| *tag != MediaTypeTag::All),
            ..Permutation::default()
        };
        let mut unsatisfiable = false;

        for (key, constraint) in &perm.features {
            match simplify_constraint(constraint) {
                Constraint::True => {}
                Constraint::False => {
                    false_features.insert(key.to_string());
                    unsatisfiable = true;
                }
                other => {
                    simple.features.insert(*key, other);
                }
            }
        }

        if !unsatisfiable {
            simple_perms.push(simple);
        }
    }

    EvaluateResult {
        simple_perms: drop_redundant(simple_perms),
        invalid_features: invalid_features.into_iter().collect(),
        false_features: false_features.into_iter().collect(),
    }
}
