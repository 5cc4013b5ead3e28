use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-preview-09-2025";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/";
pub const DEFAULT_USER_AGENT: &str = "audiencelab/0.1 (market-research)";

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

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it from a map.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let parse_optional_u64 = |var: &str| -> Result<Option<u64>, ConfigError> {
        optional(var)
            .map(|raw| {
                raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()
    };

    let env = parse_environment(&or_default("AUDIENCELAB_ENV", "development"))?;

    let log_level = or_default("AUDIENCELAB_LOG_LEVEL", "info");
    let data_dir = PathBuf::from(or_default("AUDIENCELAB_DATA_DIR", "./data"));
    let seed_path = PathBuf::from(or_default(
        "AUDIENCELAB_SEED_PATH",
        "./config/audiences.yaml",
    ));

    let gemini_api_key = optional("GEMINI_API_KEY").or_else(|| optional("API_KEY"));
    let gemini_model = or_default("AUDIENCELAB_GEMINI_MODEL", DEFAULT_GEMINI_MODEL);
    let gemini_base_url = or_default("AUDIENCELAB_GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL);
    let request_timeout_secs = parse_optional_u64("AUDIENCELAB_REQUEST_TIMEOUT_SECS")?;
    let user_agent = or_default("AUDIENCELAB_USER_AGENT", DEFAULT_USER_AGENT);

    Ok(AppConfig {
        env,
        log_level,
        data_dir,
        seed_path,
        gemini_api_key,
        gemini_model,
        gemini_base_url,
        request_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "AUDIENCELAB_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
