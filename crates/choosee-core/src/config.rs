use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment};
use crate::draft::Coords;
use crate::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "https://weats-backend.onrender.com/api";
pub const DEFAULT_PLACES_BASE_URL: &str = "https://places.googleapis.com/v1/";
pub const DEFAULT_GEOCODE_BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from the variables already in the process,
/// without reading `.env`.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<f64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("CHOOSEE_ENV", "development"))?;

    let api_base_url = or_default("CHOOSEE_API_BASE_URL", DEFAULT_API_BASE_URL);
    let log_level = or_default("CHOOSEE_LOG_LEVEL", "info");
    let state_dir = PathBuf::from(or_default("CHOOSEE_STATE_DIR", "./.choosee"));
    let request_timeout_secs = match optional("CHOOSEE_REQUEST_TIMEOUT_SECS") {
        Some(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
            ConfigError::InvalidEnvVar {
                var: "CHOOSEE_REQUEST_TIMEOUT_SECS".to_string(),
                reason: e.to_string(),
            }
        })?),
        None => None,
    };
    let user_agent = or_default(
        "CHOOSEE_USER_AGENT",
        "choosee/0.1 (restaurant-recommendations)",
    );
    let google_maps_api_key = optional("GOOGLE_MAPS_API_KEY");
    let places_base_url = or_default("CHOOSEE_PLACES_BASE_URL", DEFAULT_PLACES_BASE_URL);
    let geocode_base_url = or_default("CHOOSEE_GEOCODE_BASE_URL", DEFAULT_GEOCODE_BASE_URL);

    let default_center = Coords::new(
        parse_f64("CHOOSEE_DEFAULT_LAT", "10.3157")?,
        parse_f64("CHOOSEE_DEFAULT_LNG", "123.8854")?,
    );
    if !default_center.is_valid() {
        return Err(ConfigError::InvalidEnvVar {
            var: "CHOOSEE_DEFAULT_LAT".to_string(),
            reason: format!("coordinates out of range: {default_center}"),
        });
    }

    Ok(AppConfig {
        env,
        api_base_url,
        log_level,
        state_dir,
        request_timeout_secs,
        user_agent,
        google_maps_api_key,
        places_base_url,
        geocode_base_url,
        default_center,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CHOOSEE_ENV".to_string(),
            reason: format!("expected development, test, or production; got {other:?}"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
