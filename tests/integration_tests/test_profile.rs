// integration tests for device profiles on disk

use std::fs;

use crate::common::{compile, solve};
use mquery::config::{self, Profile};
use mquery::matcher::Pointer;
use mquery::solver::RangeKind;
use mquery::{matches, FeatureKnowledge, Kleene3};
use tempfile::TempDir;

#[test]
fn test_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("profile.json");

    let mut profile = Profile::default();
    config::set_value(&mut profile, "environment.widthPx", "390").unwrap();
    config::set_value(&mut profile, "environment.pointer", "coarse").unwrap();
    config::set_value(&mut profile, "solver.isMediaTypeScreen", "true").unwrap();
    config::save(&profile, &path).unwrap();

    let loaded = config::load(&path).unwrap();
    assert_eq!(loaded, profile);
    assert_eq!(loaded.environment.pointer, Pointer::Coarse);
    assert!(matches(&compile("(max-width: 400px)"), &loaded.environment).unwrap());
}

#[test]
fn test_load_json5() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("phone.json5");
    fs::write(
        &path,
        r#"{
            // a small phone
            environment: { widthPx: 320, heightPx: 568, hover: "none" },
            solver: {
                isMediaTypeScreen: "true",
                features: {
                    "-x-notch": { type: "discrete", values: ["none", "top"] },
                },
            },
        }"#,
    )
    .unwrap();

    let profile = config::load(&path).unwrap();
    assert_eq!(profile.environment.width_px, 320.0);
    assert_eq!(profile.solver.is_media_type_screen, Kleene3::True);

    let config = profile.solver_config();
    assert_eq!(solve("screen", &config), Kleene3::True);
    assert_eq!(solve("(-x-notch: side)", &config), Kleene3::False);
    assert_eq!(solve("(-x-notch: top)", &config), Kleene3::Unknown);

    let config = profile.environment_solver_config();
    assert_eq!(solve("(hover: none) and (max-width: 320px)", &config), Kleene3::True);
}

#[test]
fn test_load_rejects_invalid_environment() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("profile.json");
    fs::write(&path, r#"{ "environment": { "dppx": 0 } }"#).unwrap();
    assert!(config::load(&path).is_err());

    fs::write(&path, "{ not json").unwrap();
    assert!(config::load(&path).is_err());
}

#[test]
fn test_verify_reports_problems() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("profile.json");

    let mut profile = Profile::default();
    profile.units.em_px = -1.0;
    profile
        .solver
        .features
        .insert("hover".to_string(), FeatureKnowledge::discrete(&["laser"]));
    profile
        .solver
        .features
        .insert("pointer".to_string(), FeatureKnowledge::range(RangeKind::Length, true));
    config::save(&profile, &path).unwrap();

    let problems = config::verify(&path).unwrap();
    assert_eq!(problems.len(), 3, "{:?}", problems);
    assert!(problems[0].starts_with("units.emPx"));
    assert!(problems[1].starts_with("solver.features.hover"));
    assert!(problems[2].starts_with("solver.features.pointer"));
}

#[test]
fn test_verify_clean_profile() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("profile.json");
    config::save(&Profile::default(), &path).unwrap();
    assert!(config::verify(&path).unwrap().is_empty());

    assert!(config::verify(&dir.path().join("missing.json")).is_err());
}
