//! solver configuration

use std::collections::HashMap;
use std::fmt;

use crate::query::Feature;
use crate::units::UnitConversions;

use super::kleene::Kleene3;
use super::knowledge::{FeatureKnowledge, DEFAULT_KNOWN_FEATURES};

/// caller supplied answers for what the solver cannot decide on its own
pub trait UnknownSolver {
    /// a known feature whose verdict depends on the device
    fn solve_unknown_feature(&self, _feature: &Feature) -> Kleene3 {
        Kleene3::Unknown
    }

    /// raw text of a general-enclosed condition
    fn solve_general_enclosed(&self, _text: &str) -> Kleene3 {
        Kleene3::Unknown
    }
}

/// answers `unknown` to everything
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeUnknown;

impl UnknownSolver for AssumeUnknown {}

pub struct SolverConfig {
    pub known_features: HashMap<String, FeatureKnowledge>,
    pub is_media_type_screen: Kleene3,
    /// a legacy browser ignores queries starting with `only`
    pub is_legacy_browser: Kleene3,
    /// metrics for relative units in feature values
    pub units: UnitConversions,
    pub unknown: Box<dyn UnknownSolver + Send + Sync>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            known_features: DEFAULT_KNOWN_FEATURES.clone(),
            is_media_type_screen: Kleene3::Unknown,
            is_legacy_browser: Kleene3::False,
            units: UnitConversions::default(),
            unknown: Box::new(AssumeUnknown),
        }
    }
}

impl fmt::Debug for SolverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolverConfig")
            .field("known_features", &self.known_features.len())
            .field("is_media_type_screen", &self.is_media_type_screen)
            .field("is_legacy_browser", &self.is_legacy_browser)
            .field("units", &self.units)
            .finish_non_exhaustive()
    }
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// add or replace knowledge about one feature
    pub fn with_feature(mut self, name: impl Into<String>, knowledge: FeatureKnowledge) -> Self {
        self.known_features.insert(name.into(), knowledge);
        self
    }

    pub fn with_media_type_screen(mut self, value: impl Into<Kleene3>) -> Self {
        self.is_media_type_screen = value.into();
        self
    }

    pub fn with_legacy_browser(mut self, value: impl Into<Kleene3>) -> Self {
        self.is_legacy_browser = value.into();
        self
    }

    pub fn with_units(mut self, units: UnitConversions) -> Self {
        self.units = units;
        self
    }

    pub fn with_unknown_solver(mut self, solver: impl UnknownSolver + Send + Sync + 'static) -> Self {
        self.unknown = Box::new(solver);
        self
    }

    pub fn knowledge(&self, name: &str) -> Option<&FeatureKnowledge> {
        self.known_features.get(name)
    }
}
