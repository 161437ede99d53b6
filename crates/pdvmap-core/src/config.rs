use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

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
/// Returns `ConfigError` if a value is present but invalid, or if
/// `PDVMAP_API_URL` is unset in production.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a working
/// development config pointed at a local backend. Production must name its
/// backend explicitly.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("PDVMAP_ENV", "development"))?;
    let raw_api_url = match lookup("PDVMAP_API_URL") {
        Ok(url) => url,
        Err(_) if env == Environment::Production => {
            return Err(ConfigError::MissingEnvVar("PDVMAP_API_URL".to_string()));
        }
        Err(_) => "http://localhost:4000".to_string(),
    };
    let api_base_url = parse_base_url(&raw_api_url)?;
    let log_level = or_default("PDVMAP_LOG_LEVEL", "info");

    let api_timeout_secs = parse_u64("PDVMAP_API_TIMEOUT_SECS", "15")?;
    if api_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PDVMAP_API_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least one second".to_string(),
        });
    }
    let api_user_agent = or_default("PDVMAP_API_USER_AGENT", "pdvmap/0.1 (store-locator)");
    let api_max_retries = parse_u32("PDVMAP_API_MAX_RETRIES", "2")?;
    let api_retry_backoff_base_ms = parse_u64("PDVMAP_API_RETRY_BACKOFF_BASE_MS", "250")?;

    let map_style = or_default("PDVMAP_MAP_STYLE", "mapbox://styles/mapbox/streets-v11");
    let map_access_token = lookup("PDVMAP_MAP_ACCESS_TOKEN")
        .ok()
        .filter(|t| !t.trim().is_empty());

    Ok(AppConfig {
        env,
        api_base_url,
        log_level,
        api_timeout_secs,
        api_user_agent,
        api_max_retries,
        api_retry_backoff_base_ms,
        map_style,
        map_access_token,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PDVMAP_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

/// Require an absolute http(s) URL with a host and drop trailing slashes so
/// paths can be appended with a single `/`.
fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "PDVMAP_API_URL".to_string(),
        reason,
    };

    let url = url::Url::parse(trimmed).map_err(|e| invalid(format!("'{raw}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(invalid(format!("'{raw}' is not an absolute http(s) URL")));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
