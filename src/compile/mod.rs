//! DNF compiler
//!
//! turns a parsed query list into a disjunction of clauses. each clause maps
//! feature names to a constraint; the public [`EvaluateResult`] holds the
//! simplified clauses plus the features that made clauses invalid or
//! unsatisfiable.

mod feature;
mod merge;
mod simplify;
mod types;

pub use feature::feature_to_perms;
pub use merge::{and_perms, invert_perm, merge_perms, not_perms};
pub use simplify::simplify_perms;
pub use types::{Constraint, EvaluateResult, GamutMask, MediaTypeTag, Permutation};

use crate::error::ParseError;
use crate::query::{parse_query_list, Condition, InParens, MediaType, Prefix, Query, QueryList};
use crate::units::UnitConversions;

/// compile a query string with the default unit metrics
pub fn compile_query(query: &str) -> Result<EvaluateResult, ParseError> {
    compile_query_with(query, &UnitConversions::default())
}

/// compile a query string, resolving relative units with `units`
pub fn compile_query_with(
    query: &str,
    units: &UnitConversions,
) -> Result<EvaluateResult, ParseError> {
    let list = parse_query_list(query)?;
    Ok(compile_ast(&list, units))
}

/// compile an already parsed query list
pub fn compile_ast(list: &QueryList, units: &UnitConversions) -> EvaluateResult {
    let perms: Vec<Permutation> = list
        .queries
        .iter()
        .flat_map(|query| query_to_perms(query, units))
        .collect();
    let result = simplify_perms(&perms);

    log::debug!(
        "compiled '{}' to {} clause(s) ({} raw, {} invalid, {} false)",
        list,
        result.simple_perms.len(),
        perms.len(),
        result.invalid_features.len(),
        result.false_features.len()
    );
    result
}

/// clauses for one query of a list, before simplification
pub fn query_to_perms(query: &Query, units: &UnitConversions) -> Vec<Permutation> {
    let condition = query
        .condition
        .as_ref()
        .map(|condition| condition_to_perms(condition, units));

    if query.prefix == Some(Prefix::Not) {
        // not (type and cond) is (not type) or (not cond)
        let mut perms = match &query.media_type {
            MediaType::All => Vec::new(),
            MediaType::Screen => vec![Permutation::default().tagged(MediaTypeTag::NotScreen)],
            MediaType::Print => vec![Permutation::default().tagged(MediaTypeTag::NotPrint)],
            MediaType::Other(_) => vec![Permutation::default()],
        };
        if let Some(condition) = condition {
            perms.extend(
                not_perms(&condition)
                    .into_iter()
                    .map(|perm| perm.tagged(MediaTypeTag::All)),
            );
        }
        return perms;
    }

    let tag = match &query.media_type {
        MediaType::All => MediaTypeTag::All,
        MediaType::Screen => MediaTypeTag::Screen,
        MediaType::Print => MediaTypeTag::Print,
        MediaType::Other(_) => return Vec::new(),
    };
    condition
        .unwrap_or_else(|| vec![Permutation::default()])
        .into_iter()
        .map(|perm| perm.tagged(tag))
        .collect()
}

/// clauses for a condition
pub fn condition_to_perms(condition: &Condition, units: &UnitConversions) -> Vec<Permutation> {
    match condition {
        Condition::And(items) => items.iter().fold(vec![Permutation::default()], |acc, item| {
            and_perms(&acc, &in_parens_to_perms(item, units))
        }),
        Condition::Or(items) => items
            .iter()
            .flat_map(|item| in_parens_to_perms(item, units))
            .collect(),
        Condition::Not(item) => not_perms(&in_parens_to_perms(item, units)),
    }
}

fn in_parens_to_perms(item: &InParens, units: &UnitConversions) -> Vec<Permutation> {
    match item {
        InParens::Condition(condition) => condition_to_perms(condition, units),
        InParens::Feature(feature) => feature_to_perms(feature, units),
        InParens::GeneralEnclosed(text) => {
            log::warn!("unrecognised media condition {}", text);
            vec![Permutation::invalid(text.clone())]
        }
    }
}
