// integration tests for the three-valued solver

use crate::common::{desktop, phone, printer, solve};
use mquery::query::Feature;
use mquery::solver::{EnvironmentSolver, RangeKind};
use mquery::{FeatureKnowledge, Kleene3, SolverConfig, UnknownSolver};

#[test]
fn test_not_all_or_all() {
    assert_eq!(solve("not all, all", &SolverConfig::default()), Kleene3::True);
    assert_eq!(solve("not all", &SolverConfig::default()), Kleene3::False);
}

#[test]
fn test_width_without_knowledge() {
    let config = SolverConfig::default();
    assert_eq!(solve("(width > 1000px)", &config), Kleene3::Unknown);
    assert_eq!(solve("(width > -1px)", &config), Kleene3::True);
    assert_eq!(solve("(width < 0px)", &config), Kleene3::False);
    assert_eq!(solve("(min-width: 0px)", &config), Kleene3::True);
}

#[test]
fn test_media_types() {
    let unknown = SolverConfig::default();
    assert_eq!(solve("screen", &unknown), Kleene3::Unknown);
    assert_eq!(solve("print", &unknown), Kleene3::Unknown);
    assert_eq!(solve("tv", &unknown), Kleene3::False);
    assert_eq!(solve("not tv", &unknown), Kleene3::True);
    assert_eq!(solve("screen, print", &unknown), Kleene3::Unknown);

    let screen = SolverConfig::default().with_media_type_screen(true);
    assert_eq!(solve("screen", &screen), Kleene3::True);
    assert_eq!(solve("not print", &screen), Kleene3::True);
}

#[test]
fn test_only_and_legacy_browsers() {
    let modern = SolverConfig::default().with_media_type_screen(true);
    assert_eq!(solve("only screen", &modern), Kleene3::True);

    let legacy = SolverConfig::default()
        .with_media_type_screen(true)
        .with_legacy_browser(true);
    assert_eq!(solve("only screen", &legacy), Kleene3::False);
    assert_eq!(solve("screen", &legacy), Kleene3::True);
}

#[test]
fn test_unknown_features_are_false() {
    let config = SolverConfig::default();
    assert_eq!(solve("(fake: feature)", &config), Kleene3::False);
    assert_eq!(solve("not all and (fake)", &config), Kleene3::True);
    assert_eq!(solve("(hover: sometimes)", &config), Kleene3::False);
}

#[test]
fn test_domain_always_true() {
    let config = SolverConfig::default();
    // orientation and non-zero features hold in boolean context
    assert_eq!(solve("(orientation)", &config), Kleene3::True);
    assert_eq!(solve("(resolution)", &config), Kleene3::True);
    assert_eq!(solve("(device-width)", &config), Kleene3::True);
    // zero is possible for width
    assert_eq!(solve("(width)", &config), Kleene3::Unknown);
    assert_eq!(solve("(resolution: 0dppx)", &config), Kleene3::False);
    assert_eq!(solve("(resolution: infinite)", &config), Kleene3::Unknown);
    assert_eq!(solve("(max-resolution: infinite)", &config), Kleene3::True);
}

#[test]
fn test_kleene_folding() {
    let config = SolverConfig::default();
    assert_eq!(solve("(width > -1px) and (width > 10px)", &config), Kleene3::Unknown);
    assert_eq!(solve("(width < 0px) and (width > 10px)", &config), Kleene3::False);
    assert_eq!(solve("(width < 0px) or (width > 10px)", &config), Kleene3::Unknown);
    assert_eq!(solve("(width > -1px) or (width > 10px)", &config), Kleene3::True);
    assert_eq!(solve("(not (width < 0px))", &config), Kleene3::True);
}

#[test]
fn test_custom_unknown_solver() {
    struct Narrow;

    impl UnknownSolver for Narrow {
        fn solve_unknown_feature(&self, feature: &Feature) -> Kleene3 {
            (feature.name() == "width").into()
        }

        fn solve_general_enclosed(&self, text: &str) -> Kleene3 {
            (text == "(custom thing)").into()
        }
    }

    let config = SolverConfig::default().with_unknown_solver(Narrow);
    assert_eq!(solve("(width > 1000px)", &config), Kleene3::True);
    assert_eq!(solve("(height > 1000px)", &config), Kleene3::False);
    assert_eq!(solve("(custom thing)", &config), Kleene3::True);
    assert_eq!(solve("(other thing)", &config), Kleene3::False);
}

#[test]
fn test_custom_feature_knowledge() {
    let config = SolverConfig::default()
        .with_feature("-x-fold-count", FeatureKnowledge::range(RangeKind::Integer, false));
    assert_eq!(solve("(-x-fold-count)", &config), Kleene3::True);
    assert_eq!(solve("(-x-fold-count: 0)", &config), Kleene3::False);
    assert_eq!(solve("(-x-fold-count > 2)", &config), Kleene3::Unknown);

    let config = SolverConfig::default()
        .with_feature("hover", FeatureKnowledge::discrete(&["hover"]));
    assert_eq!(solve("(hover: none)", &config), Kleene3::False);
    assert_eq!(solve("(hover)", &config), Kleene3::True);
}

#[test]
fn test_environment_solver() {
    let phone = SolverConfig::for_environment(phone());
    assert_eq!(solve("(max-width: 599px) and (pointer: coarse)", &phone), Kleene3::True);
    assert_eq!(solve("(hover: hover)", &phone), Kleene3::False);
    assert_eq!(solve("(unknown stuff)", &phone), Kleene3::False);

    let print = SolverConfig::for_environment(printer());
    assert_eq!(solve("print and (orientation: portrait)", &print), Kleene3::True);
    assert_eq!(solve("screen", &print), Kleene3::False);

    // only the unknowns are delegated, the media type stays undecided
    let partial = SolverConfig::default().with_unknown_solver(EnvironmentSolver::new(desktop()));
    assert_eq!(solve("(min-width: 1000px)", &partial), Kleene3::True);
    assert_eq!(solve("screen and (min-width: 1000px)", &partial), Kleene3::Unknown);
}
