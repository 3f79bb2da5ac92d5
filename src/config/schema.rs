use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::matcher::Environment;
use crate::solver::{FeatureKnowledge, Kleene3, SolverConfig};
use crate::units::UnitConversions;

/// everything needed to compile, match and solve queries for one device
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    pub units: UnitConversions,
    pub environment: Environment,
    pub solver: SolverSettings,
}

/// serializable part of a [`SolverConfig`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SolverSettings {
    pub is_media_type_screen: Kleene3,
    pub is_legacy_browser: Kleene3,
    /// merged over the built-in feature table
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub features: HashMap<String, FeatureKnowledge>,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            is_media_type_screen: Kleene3::Unknown,
            is_legacy_browser: Kleene3::False,
            features: HashMap::new(),
        }
    }
}

impl SolverSettings {
    /// solver configuration that answers `unknown` for undecided features
    pub fn to_config(&self) -> SolverConfig {
        let mut config = SolverConfig::default()
            .with_media_type_screen(self.is_media_type_screen)
            .with_legacy_browser(self.is_legacy_browser);
        for (name, knowledge) in &self.features {
            config = config.with_feature(name.clone(), knowledge.clone());
        }
        config
    }
}

impl Profile {
    /// solver configuration from the solver settings alone
    pub fn solver_config(&self) -> SolverConfig {
        self.solver.to_config().with_units(self.units)
    }

    /// solver configuration that decides every feature from the environment
    pub fn environment_solver_config(&self) -> SolverConfig {
        let mut config =
            SolverConfig::for_environment_with_units(self.environment.clone(), self.units)
                .with_legacy_browser(self.solver.is_legacy_browser);
        for (name, knowledge) in &self.solver.features {
            config = config.with_feature(name.clone(), knowledge.clone());
        }
        config
    }
}
