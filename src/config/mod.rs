mod schema;

pub use schema::{Profile, SolverSettings};

use anyhow::{anyhow, Context, Result};
use serde_json::Value as JsonValue;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::features::{self, FeatureKind};
use crate::solver::{FeatureKnowledge, Kleene3};

const PROFILE_ENV_VAR: &str = "MQUERY_PROFILE";

/// profile location: `$MQUERY_PROFILE`, else `~/.mquery/profile.json`
pub fn get_profile_path() -> Result<PathBuf> {
    if let Ok(path) = env::var(PROFILE_ENV_VAR) {
        return Ok(PathBuf::from(path));
    }

    Ok(dirs::home_dir()
        .ok_or_else(|| anyhow!("Could not find home directory"))?
        .join(".mquery")
        .join("profile.json"))
}

fn parse_profile(path: &Path, content: &str) -> Result<Profile> {
    let is_json5 = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json5"));

    if is_json5 {
        json5::from_str(content)
            .with_context(|| format!("Failed to parse profile file: {}", path.display()))
    } else {
        serde_json::from_str(content)
            .with_context(|| format!("Failed to parse profile file: {}", path.display()))
    }
}

/// read a profile, `.json5` files are parsed as JSON5
pub fn load(path: &Path) -> Result<Profile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile file: {}", path.display()))?;

    let profile = parse_profile(path, &content)?;
    profile
        .environment
        .validate()
        .with_context(|| format!("Invalid environment in profile: {}", path.display()))?;

    log::debug!("loaded profile from {}", path.display());
    Ok(profile)
}

/// load the profile at [`get_profile_path`], or the desktop default when
/// there is none
pub fn load_default() -> Result<Profile> {
    let path = get_profile_path()?;
    if !path.exists() {
        return Ok(Profile::default());
    }
    load(&path)
}

pub fn save(profile: &Profile, path: &Path) -> Result<()> {
    // ensure directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(profile).context("Failed to serialize profile")?;

    fs::write(path, content)
        .with_context(|| format!("Failed to write profile file: {}", path.display()))?;

    Ok(())
}

/// Verify a profile file and return a list of problems
pub fn verify(path: &Path) -> Result<Vec<String>> {
    let mut errors = Vec::new();

    if !path.exists() {
        return Err(anyhow!("profile file not found: {}", path.display()));
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read profile file: {}", path.display()))?;

    let profile = parse_profile(path, &content)?;

    if let Err(e) = profile.environment.validate() {
        errors.push(format!("environment: {}", e));
    }

    let units = &profile.units;
    for (field, value) in [
        ("widthPx", units.width_px),
        ("heightPx", units.height_px),
        ("emPx", units.em_px),
        ("remPx", units.rem_px),
        ("exPx", units.ex_px),
        ("chPx", units.ch_px),
        ("capPx", units.cap_px),
        ("icPx", units.ic_px),
        ("lhPx", units.lh_px),
        ("rlhPx", units.rlh_px),
    ] {
        if !value.is_finite() || value < 0.0 {
            errors.push(format!("units.{}: {} is not a non-negative number", field, value));
        }
    }

    let mut names: Vec<&String> = profile.solver.features.keys().collect();
    names.sort();
    for name in names {
        if let Err(e) = validate_knowledge(name, &profile.solver.features[name]) {
            errors.push(format!("solver.features.{}: {}", name, e));
        }
    }

    Ok(errors)
}

fn validate_knowledge(name: &str, knowledge: &FeatureKnowledge) -> Result<(), String> {
    let builtin = features::lookup(name);

    match knowledge {
        FeatureKnowledge::Discrete { values, .. } => {
            if values.is_empty() {
                return Err("discrete feature needs at least one value".to_string());
            }
            let Some(spec) = builtin else {
                return Ok(());
            };
            if spec.is_range() {
                return Err(format!("'{}' is a {} feature", name, feature_kind_name(spec.kind)));
            }
            let known = spec.value_names();
            for value in values {
                if !known.contains(value) {
                    return Err(format!(
                        "unknown value '{}': valid values are {}",
                        value,
                        known.join(", ")
                    ));
                }
            }
            Ok(())
        }
        FeatureKnowledge::Range { .. } => match builtin {
            Some(spec) if !spec.is_range() => Err(format!(
                "'{}' is a {} feature",
                name,
                feature_kind_name(spec.kind)
            )),
            _ => Ok(()),
        },
    }
}

/// set one value by dotted key, e.g. `environment.widthPx` or
/// `solver.isLegacyBrowser`
pub fn set_value(profile: &mut Profile, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["solver", "isMediaTypeScreen"] => {
            profile.solver.is_media_type_screen = parse_kleene(value)?;
        }
        ["solver", "isLegacyBrowser"] => {
            profile.solver.is_legacy_browser = parse_kleene(value)?;
        }
        [section @ ("units" | "environment"), field] => {
            let mut json = serde_json::to_value(&*profile).context("Failed to serialize profile")?;
            let object = json
                .get_mut(*section)
                .and_then(JsonValue::as_object_mut)
                .ok_or_else(|| anyhow!("Missing section: {}", section))?;
            if !object.contains_key(*field) {
                return Err(anyhow!("Unknown key: {}", key));
            }
            object.insert(field.to_string(), parse_scalar(value));

            let updated: Profile = serde_json::from_value(json)
                .with_context(|| format!("Invalid value for {}: {}", key, value))?;
            updated.environment.validate()?;
            *profile = updated;
        }
        _ => {
            return Err(anyhow!("Unknown key: {}", key));
        }
    }

    Ok(())
}

fn parse_scalar(value: &str) -> JsonValue {
    if let Ok(n) = value.parse::<u64>() {
        return JsonValue::from(n);
    }
    if let Ok(n) = value.parse::<f64>() {
        return JsonValue::from(n);
    }
    match value {
        "true" => JsonValue::Bool(true),
        "false" => JsonValue::Bool(false),
        _ => JsonValue::String(value.to_string()),
    }
}

fn parse_kleene(value: &str) -> Result<Kleene3> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(Kleene3::True),
        "false" | "no" | "0" | "off" => Ok(Kleene3::False),
        "unknown" | "?" => Ok(Kleene3::Unknown),
        _ => Err(anyhow!("Invalid value: {} (use true, false or unknown)", value)),
    }
}

fn feature_kind_name(kind: FeatureKind) -> &'static str {
    match kind {
        FeatureKind::Discrete(_) => "discrete",
        FeatureKind::Gamut => "gamut",
        FeatureKind::Range(_) => "range",
        FeatureKind::Ratio => "ratio",
        FeatureKind::Orientation => "orientation",
        FeatureKind::PixelRatio => "pixel-ratio",
    }
}
