// integration tests for the compiler and its JSON form

use crate::common::compile;
use mquery::{compile_ast, compile_query, compile_query_with, parse_query_list, UnitConversions};
use serde_json::json;

// ============================================================================
// Compiled Shapes
// ============================================================================

#[test]
fn test_min_width_json() {
    let result = compile("(min-width: 120px)");
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "simplePerms": [{ "width": [true, 120.0, "Infinity", true] }],
            "invalidFeatures": [],
            "falseFeatures": []
        })
    );
}

#[test]
fn test_negated_min_width_json() {
    let result = compile("not (min-width: 120px)");
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "simplePerms": [{ "width": [true, 0.0, 120.0, false] }],
            "invalidFeatures": [],
            "falseFeatures": []
        })
    );
}

#[test]
fn test_unknown_feature_json() {
    let result = compile("(fake: feature)");
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({ "simplePerms": [], "invalidFeatures": ["fake"], "falseFeatures": [] })
    );
}

#[test]
fn test_media_type_and_discrete_json() {
    let result = compile("screen and (hover: hover)");
    assert_eq!(
        serde_json::to_value(&result.simple_perms).unwrap(),
        json!([{ "media-type": "screen", "hover": "hover" }])
    );

    let result = compile("not print");
    assert_eq!(
        serde_json::to_value(&result.simple_perms).unwrap(),
        json!([{ "media-type": "not-print" }])
    );
}

#[test]
fn test_ratio_json() {
    let result = compile("(aspect-ratio: 16/9)");
    assert_eq!(
        serde_json::to_value(&result.simple_perms).unwrap(),
        json!([{ "aspect-ratio": [true, [16.0, 9.0], [16.0, 9.0], true] }])
    );
}

#[test]
fn test_gamut_json() {
    let result = compile("(color-gamut: p3)");
    assert_eq!(
        serde_json::to_value(&result.simple_perms).unwrap(),
        json!([{ "color-gamut": [false, false, true, true] }])
    );
}

// ============================================================================
// Diagnostics
// ============================================================================

#[test]
fn test_unsatisfiable_is_reported() {
    let result = compile("(110px <= width <= 50px)");
    assert!(result.never_matches());
    assert_eq!(result.false_features, vec!["width"]);
    assert!(result.invalid_features.is_empty());
}

#[test]
fn test_negated_disjunction_reports_nothing_false() {
    let result = compile("not (not ((hover: hover) or (pointer: fine)))");
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "simplePerms": [{ "hover": "hover" }, { "pointer": "fine" }],
            "invalidFeatures": [],
            "falseFeatures": []
        })
    );
}

#[test]
fn test_explicit_contradiction_is_still_false() {
    let result = compile("(min-width: 300px) and (max-width: 200px)");
    assert!(result.never_matches());
    assert_eq!(result.false_features, vec!["width"]);
}

#[test]
fn test_redundant_clauses_are_merged() {
    let result = compile("(hover: hover), (hover: hover) and (pointer: fine), (hover: hover)");
    assert_eq!(
        serde_json::to_value(&result.simple_perms).unwrap(),
        json!([{ "hover": "hover" }])
    );
}

#[test]
fn test_invalid_values_are_reported() {
    let result = compile("(width: infinite)");
    assert!(result.never_matches());
    assert_eq!(result.invalid_features, vec!["width"]);

    let result = compile("(hover: sometimes)");
    assert!(result.never_matches());
    assert_eq!(result.invalid_features, vec!["hover"]);
}

#[test]
fn test_diagnostics_are_sorted_and_unique() {
    let result = compile("(zzz: 1), (aaa: 1), (zzz: 2)");
    assert_eq!(result.invalid_features, vec!["aaa", "zzz"]);
}

#[test]
fn test_valid_clause_survives_invalid_sibling() {
    let result = compile("(fake: feature), (min-width: 100px)");
    assert_eq!(result.simple_perms.len(), 1);
    assert_eq!(result.invalid_features, vec!["fake"]);
}

#[test]
fn test_parse_errors() {
    for query in ["(width", "screen and", "(min-width: 100px) and or (hover)", "((hover)"] {
        assert!(compile_query(query).is_err(), "'{}' should not parse", query);
    }
}

// ============================================================================
// Entry Points
// ============================================================================

#[test]
fn test_compile_ast_matches_compile_query() {
    let query = "screen and (min-width: 40em), print and (orientation: portrait)";
    let list = parse_query_list(query).unwrap();
    assert_eq!(
        compile_ast(&list, &UnitConversions::default()),
        compile(query)
    );
}

#[test]
fn test_relative_units() {
    let units = UnitConversions {
        rem_px: 20.0,
        ..UnitConversions::default()
    };
    let result = compile_query_with("(min-width: 10rem)", &units).unwrap();
    assert_eq!(
        serde_json::to_value(&result.simple_perms).unwrap(),
        json!([{ "width": [true, 200.0, "Infinity", true] }])
    );
}

#[test]
fn test_always_matching() {
    assert!(compile("all").always_matches());
    assert!(compile("not all").never_matches());
}
