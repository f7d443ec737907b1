use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment};
use crate::fusion_config::load_fusion_config;
use crate::{ConfigError, FusionConfig, Modality};

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid or the fusion config file
/// cannot be loaded.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid or the fusion config file
/// cannot be loaded.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Fusion settings are layered: defaults, then the YAML file named by
/// `POSTVIBE_FUSION_CONFIG` (if any), then individual env overrides. The
/// merged result is validated once at the end.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>().map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| invalid(var, e.to_string()))
    };

    let parse_f64_opt = |var: &str| -> Result<Option<f64>, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|e| invalid(var, e.to_string())),
            Err(_) => Ok(None),
        }
    };

    let env = parse_environment(&or_default("POSTVIBE_ENV", "development"))?;
    let log_level = or_default("POSTVIBE_LOG_LEVEL", "info");
    let posts_path = PathBuf::from(or_default("POSTVIBE_POSTS_PATH", "./data/posts.json"));
    let fusion_config_path = lookup("POSTVIBE_FUSION_CONFIG").ok().map(PathBuf::from);

    let max_concurrent_posts = parse_usize("POSTVIBE_MAX_CONCURRENT_POSTS", "8")?;
    if max_concurrent_posts == 0 {
        return Err(invalid(
            "POSTVIBE_MAX_CONCURRENT_POSTS",
            "must be at least 1".to_string(),
        ));
    }
    let scorer_timeout_ms = parse_u64("POSTVIBE_SCORER_TIMEOUT_MS", "5000")?;

    let mut fusion = match &fusion_config_path {
        Some(path) => load_fusion_config(path)?,
        None => FusionConfig::default(),
    };

    for modality in Modality::ALL {
        let var = weight_var(modality);
        if let Some(w) = parse_f64_opt(&var)? {
            fusion.weights = fusion.weights.with(modality, w);
        }
    }
    if let Some(v) = parse_f64_opt("POSTVIBE_POSITIVE_THRESHOLD")? {
        fusion.thresholds.positive = v;
    }
    if let Some(v) = parse_f64_opt("POSTVIBE_NEGATIVE_THRESHOLD")? {
        fusion.thresholds.negative = v;
    }
    if let Some(v) = parse_f64_opt("POSTVIBE_CONFIDENCE_FLOOR")? {
        fusion.confidence_floor = v;
    }
    fusion.validate()?;

    Ok(AppConfig {
        env,
        log_level,
        posts_path,
        fusion_config_path,
        max_concurrent_posts,
        scorer_timeout_ms,
        fusion,
    })
}

fn weight_var(modality: Modality) -> String {
    format!("POSTVIBE_WEIGHT_{}", modality.as_str().to_uppercase())
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for unrecognized values.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "POSTVIBE_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
