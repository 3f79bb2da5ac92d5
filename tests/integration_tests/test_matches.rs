// integration tests for matching compiled queries against devices

use crate::common::{compile, desktop, phone, printer};
use mquery::matcher::{ColorGamut, ColorScheme, Monochrome};
use mquery::{matches, Environment, EnvironmentError};

fn matches_env(query: &str, env: &Environment) -> bool {
    matches(&compile(query), env).unwrap()
}

#[test]
fn test_exact_width() {
    let env = Environment {
        width_px: 1280.0,
        ..Environment::default()
    };
    assert!(matches_env("(width: 1280px)", &env));

    let env = Environment {
        width_px: 1600.0,
        ..Environment::default()
    };
    assert!(!matches_env("(width: 1280px)", &env));
}

#[test]
fn test_breakpoints() {
    let query = "screen and (max-width: 599px), print";
    assert!(!matches_env(query, &desktop()));
    assert!(matches_env(query, &phone()));
    assert!(matches_env(query, &printer()));
}

#[test]
fn test_exclusive_bounds() {
    let env = Environment {
        width_px: 1000.0,
        ..Environment::default()
    };
    assert!(!matches_env("(400px < width < 1000px)", &env));
    assert!(matches_env("(400px < width <= 1000px)", &env));
    assert!(matches_env("(1000px >= width)", &env));
}

#[test]
fn test_interaction_features() {
    assert!(matches_env("(hover: hover) and (pointer: fine)", &desktop()));
    assert!(!matches_env("(hover: hover) and (pointer: fine)", &phone()));
    assert!(matches_env("(any-pointer: coarse)", &phone()));
    assert!(!matches_env("(hover)", &phone()));
}

#[test]
fn test_orientation_and_aspect_ratio() {
    assert!(matches_env("(orientation: landscape)", &desktop()));
    assert!(matches_env("(orientation: portrait)", &phone()));
    assert!(matches_env("(min-aspect-ratio: 16/9)", &desktop()));
    assert!(!matches_env("(min-aspect-ratio: 16/9)", &phone()));
    assert!(matches_env("(device-aspect-ratio: 16/9)", &desktop()));
}

#[test]
fn test_resolution() {
    assert!(matches_env("(min-resolution: 2dppx)", &phone()));
    assert!(!matches_env("(min-resolution: 2dppx)", &desktop()));
    assert!(matches_env("(resolution: 96dpi)", &desktop()));
    assert!(matches_env("(-webkit-min-device-pixel-ratio: 3)", &phone()));
}

#[test]
fn test_color_features() {
    assert!(matches_env("(color)", &desktop()));
    assert!(matches_env("(min-color: 8)", &desktop()));
    assert!(!matches_env("(monochrome)", &desktop()));
    assert!(matches_env("(monochrome: 0)", &desktop()));

    let env = Environment {
        monochrome_bits: Monochrome::Bits(2),
        ..Environment::default()
    };
    assert!(matches_env("(monochrome)", &env));
    assert!(matches_env("(min-monochrome: 2)", &env));
}

#[test]
fn test_gamut() {
    let env = Environment {
        color_gamut: ColorGamut::P3,
        ..Environment::default()
    };
    assert!(matches_env("(color-gamut: srgb)", &env));
    assert!(matches_env("(color-gamut: p3)", &env));
    assert!(!matches_env("(color-gamut: rec2020)", &env));
    assert!(!matches_env("(color-gamut: p3)", &desktop()));
}

#[test]
fn test_preferences() {
    let env = Environment {
        prefers_color_scheme: ColorScheme::Dark,
        ..Environment::default()
    };
    assert!(matches_env("(prefers-color-scheme: dark)", &env));
    assert!(!matches_env("(prefers-color-scheme: dark)", &desktop()));
    assert!(!matches_env("(prefers-reduced-motion)", &desktop()));
}

#[test]
fn test_environment_from_json() {
    let env = Environment::from_json(r#"{ "widthPx": 320, "pointer": "coarse" }"#).unwrap();
    assert!(matches_env("(max-width: 320px) and (pointer: coarse)", &env));
    // omitted fields keep the desktop profile
    assert!(matches_env("(hover: hover)", &env));
}

#[test]
fn test_invalid_environment_is_an_error() {
    let env = Environment {
        width_px: -1.0,
        ..Environment::default()
    };
    let err = matches(&compile("(min-width: 0px)"), &env).unwrap_err();
    assert!(matches!(err, EnvironmentError::InvalidField { field: "widthPx", .. }));
    assert!(err.to_string().contains("widthPx"));

    assert!(Environment::from_json(r#"{ "hover": "sometimes" }"#).is_err());
}
