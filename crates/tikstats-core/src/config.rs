use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_PROFILE_BASE_URL: &str = "https://www.tiktok.com";

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
/// Decoupled from the real environment so tests can pass a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let bind_addr = or_default("TIKSTATS_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("TIKSTATS_BIND_ADDR", e.to_string()))?;

    let request_timeout_secs = or_default("TIKSTATS_REQUEST_TIMEOUT_SECS", "30")
        .parse::<u64>()
        .map_err(|e| invalid("TIKSTATS_REQUEST_TIMEOUT_SECS", e.to_string()))?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "TIKSTATS_REQUEST_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }

    let profile_base_url = or_default("TIKSTATS_PROFILE_BASE_URL", DEFAULT_PROFILE_BASE_URL)
        .trim_end_matches('/')
        .to_string();
    if !(profile_base_url.starts_with("http://") || profile_base_url.starts_with("https://")) {
        return Err(invalid(
            "TIKSTATS_PROFILE_BASE_URL",
            format!("\"{profile_base_url}\" is not an http(s) URL"),
        ));
    }

    let env = parse_environment(&or_default("TIKSTATS_ENV", "development"));
    let log_level = or_default("TIKSTATS_LOG_LEVEL", "info");
    let user_agent = lookup("TIKSTATS_USER_AGENT")
        .ok()
        .map(|ua| ua.trim().to_string())
        .filter(|ua| !ua.is_empty());

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        profile_base_url,
        request_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
