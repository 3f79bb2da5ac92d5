//! answering unknowns from a concrete environment

use crate::compile::{feature_to_perms, simplify_perms};
use crate::matcher::{matches, DeviceMediaType, Environment};
use crate::query::Feature;
use crate::units::UnitConversions;

use super::config::{SolverConfig, UnknownSolver};
use super::kleene::Kleene3;

/// decides every deferred feature by compiling it and matching it against
/// one device
#[derive(Debug, Clone)]
pub struct EnvironmentSolver {
    env: Environment,
    units: UnitConversions,
}

impl EnvironmentSolver {
    pub fn new(env: Environment) -> Self {
        Self {
            env,
            units: UnitConversions::default(),
        }
    }

    pub fn with_units(mut self, units: UnitConversions) -> Self {
        self.units = units;
        self
    }
}

impl UnknownSolver for EnvironmentSolver {
    fn solve_unknown_feature(&self, feature: &Feature) -> Kleene3 {
        let result = simplify_perms(&feature_to_perms(feature, &self.units));
        match matches(&result, &self.env) {
            Ok(matched) => matched.into(),
            Err(e) => {
                log::warn!("cannot decide {}: {}", feature, e);
                Kleene3::Unknown
            }
        }
    }

    fn solve_general_enclosed(&self, _text: &str) -> Kleene3 {
        Kleene3::False
    }
}

impl SolverConfig {
    /// a configuration that knows everything about `env`
    pub fn for_environment(env: Environment) -> Self {
        Self::for_environment_with_units(env, UnitConversions::default())
    }

    /// like [`SolverConfig::for_environment`], resolving relative units the
    /// same way in the domain checks and in the deferred matching
    pub fn for_environment_with_units(env: Environment, units: UnitConversions) -> Self {
        SolverConfig::default()
            .with_media_type_screen(env.media_type == DeviceMediaType::Screen)
            .with_legacy_browser(false)
            .with_units(units)
            .with_unknown_solver(EnvironmentSolver::new(env).with_units(units))
    }
}
