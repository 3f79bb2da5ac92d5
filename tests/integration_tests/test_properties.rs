// properties that hold across the compiler, matcher and solver

use std::cmp::Ordering;

use crate::common::{compile, desktop, phone, printer, solve, CONCRETE_QUERIES};
use mquery::algebra::{Endpoint, Ratio};
use mquery::compile::{simplify_perms, Constraint};
use mquery::{matches, SolverConfig};

/// condition trees covering single features, conjunctions and disjunctions
const ROUND_TRIP_CONDITIONS: &[&str] = &[
    "(min-width: 120px)",
    "(max-height: 50px)",
    "(width > 100px)",
    "(width: 100px)",
    "(hover: hover)",
    "(pointer: fine)",
    "(color-gamut: p3)",
    "(orientation: portrait)",
    "(min-aspect-ratio: 4/3)",
    "(hover: none) and (min-width: 10px)",
    "(color) and (max-resolution: 2dppx)",
    "(hover: hover) or (pointer: fine)",
    "(min-width: 100px) or (hover)",
    "(width < 100px) or (width > 200px)",
    "(pointer: none) or (pointer: coarse)",
    "((hover: none) and (min-width: 10px)) or (color-gamut: p3)",
    "(orientation: landscape) or ((any-hover: hover) and (not (pointer: coarse)))",
];

#[test]
fn test_double_negation_round_trip() {
    for condition in ROUND_TRIP_CONDITIONS {
        let negated_twice = format!("not (not ({}))", condition);
        assert_eq!(
            compile(&negated_twice),
            compile(condition),
            "double negation changed '{}'",
            condition
        );
    }
}

#[test]
fn test_simplify_is_idempotent() {
    for query in CONCRETE_QUERIES.iter().chain(ROUND_TRIP_CONDITIONS) {
        let once = compile(query);
        let twice = simplify_perms(&once.simple_perms);
        assert_eq!(twice.simple_perms, once.simple_perms, "'{}'", query);
    }
}

#[test]
fn test_ranges_stay_in_domain() {
    let queries = [
        "(width > -100px)",
        "(width < -5px)",
        "not (width: 0px)",
        "not (min-width: 0px)",
        "(-10px < height < 10px)",
        "(aspect-ratio: 0/0)",
        "not (aspect-ratio > 1/2)",
        "(resolution < infinite)",
        "not (color)",
    ];
    for query in queries.iter().chain(CONCRETE_QUERIES) {
        for perm in compile(query).simple_perms {
            for (key, constraint) in &perm.features {
                match constraint {
                    Constraint::Range(range) => {
                        assert!(!range.is_empty(), "'{}' left {} empty", query, key);
                        assert!(range.min >= 0.0, "'{}' left {} negative", query, key);
                    }
                    Constraint::Ratio(range) => {
                        assert!(!range.is_empty(), "'{}' left {} empty", query, key);
                        assert_ne!(range.min.compare(&Ratio::ZERO), Ordering::Less);
                    }
                    Constraint::True | Constraint::False => {
                        panic!("'{}' kept a sentinel for {}", query, key)
                    }
                    _ => {}
                }
            }
        }
    }
}

#[test]
fn test_solver_double_negation() {
    let configs = [
        SolverConfig::default(),
        SolverConfig::default().with_media_type_screen(true),
        SolverConfig::for_environment(phone()),
    ];
    for config in &configs {
        for condition in CONCRETE_QUERIES.iter().filter(|q| q.starts_with('(')) {
            let negated_twice = format!("not (not ({}))", condition);
            assert_eq!(
                solve(&negated_twice, config),
                solve(condition, config),
                "'{}' with {:?}",
                condition,
                config
            );
        }
    }
}

#[test]
fn test_solver_and_is_kleene_and() {
    let config = SolverConfig::default();
    let parts = ["(width > 10px)", "(width > -1px)", "(width < 0px)", "(hover)"];
    for a in parts {
        for b in parts {
            let joined = format!("{} and {}", a, b);
            assert_eq!(
                solve(&joined, &config),
                solve(a, &config) & solve(b, &config),
                "'{}'",
                joined
            );
        }
    }
}

#[test]
fn test_matcher_agrees_with_solver() {
    for env in [desktop(), phone(), printer()] {
        let config = SolverConfig::for_environment(env.clone());
        for query in CONCRETE_QUERIES {
            let matched = matches(&compile(query), &env).unwrap();
            let solved = solve(query, &config);
            assert!(!solved.is_unknown(), "'{}' left unknown", query);
            assert_eq!(matched, solved.is_true(), "'{}' on {:?}", query, env.media_type);
        }
    }
}
