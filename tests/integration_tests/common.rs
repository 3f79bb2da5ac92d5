// shared utilities for integration tests

#![allow(dead_code)]

use mquery::matcher::{DeviceMediaType, Hover, Pointer};
use mquery::{compile_query, parse_query_list, Environment, EvaluateResult, Kleene3, SolverConfig};

/// compile, panicking on parse errors
pub fn compile(query: &str) -> EvaluateResult {
    compile_query(query).unwrap_or_else(|e| panic!("failed to compile '{}': {}", query, e))
}

/// solve a query list with `config`
pub fn solve(query: &str, config: &SolverConfig) -> Kleene3 {
    let list =
        parse_query_list(query).unwrap_or_else(|e| panic!("failed to parse '{}': {}", query, e));
    mquery::solve_media_query_list(&list, config)
}

/// default desktop profile
pub fn desktop() -> Environment {
    Environment::default()
}

/// a touch phone in portrait
pub fn phone() -> Environment {
    Environment {
        any_hover: Hover::None,
        hover: Hover::None,
        any_pointer: Pointer::Coarse,
        pointer: Pointer::Coarse,
        width_px: 375.0,
        height_px: 812.0,
        device_width_px: 375.0,
        device_height_px: 812.0,
        dppx: 3.0,
        ..Environment::default()
    }
}

/// a printer page
pub fn printer() -> Environment {
    Environment {
        media_type: DeviceMediaType::Print,
        any_hover: Hover::None,
        hover: Hover::None,
        any_pointer: Pointer::None,
        pointer: Pointer::None,
        width_px: 794.0,
        height_px: 1123.0,
        device_width_px: 794.0,
        device_height_px: 1123.0,
        dppx: 3.125,
        ..Environment::default()
    }
}

/// queries without unknown features or general-enclosed parts
pub const CONCRETE_QUERIES: &[&str] = &[
    "all",
    "screen",
    "print",
    "not print",
    "not all",
    "only screen and (color)",
    "(min-width: 800px)",
    "(max-width: 500px)",
    "(width: 375px)",
    "(400px < width < 1000px)",
    "(width >= 1920px)",
    "(hover: hover)",
    "(hover: none) and (pointer: coarse)",
    "(prefers-color-scheme: dark) or (pointer: coarse)",
    "not all and (monochrome)",
    "(monochrome)",
    "not (color-gamut: p3)",
    "(color-gamut: srgb)",
    "(orientation: landscape)",
    "(orientation: portrait)",
    "(aspect-ratio > 16/10)",
    "(min-aspect-ratio: 1/1)",
    "(min-resolution: 2dppx)",
    "(resolution <= 96dpi)",
    "screen and (min-width: 100px) and (max-width: 1000px)",
    "print, (max-width: 500px)",
    "not screen and (hover: hover)",
    "(grid)",
    "(color) and (not (hover: none))",
];
