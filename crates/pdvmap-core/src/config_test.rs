use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_is_error() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "PDVMAP_ENV"));
}

#[test]
fn build_app_config_empty_env_uses_defaults() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.api_base_url, "http://localhost:4000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.api_timeout_secs, 15);
    assert_eq!(cfg.api_user_agent, "pdvmap/0.1 (store-locator)");
    assert_eq!(cfg.api_max_retries, 2);
    assert_eq!(cfg.api_retry_backoff_base_ms, 250);
    assert_eq!(cfg.map_style, "mapbox://styles/mapbox/streets-v11");
    assert!(cfg.map_access_token.is_none());
}

#[test]
fn build_app_config_trims_trailing_slashes_from_api_url() {
    let mut map = HashMap::new();
    map.insert("PDVMAP_API_URL", "https://pdv.example.com/api///");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base_url, "https://pdv.example.com/api");
}

#[test]
fn build_app_config_rejects_relative_api_url() {
    let mut map = HashMap::new();
    map.insert("PDVMAP_API_URL", "/api");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PDVMAP_API_URL"),
        "expected InvalidEnvVar(PDVMAP_API_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_scheme_without_host() {
    let mut map = HashMap::new();
    map.insert("PDVMAP_API_URL", "https://");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
}

#[test]
fn build_app_config_rejects_non_http_scheme() {
    let mut map = HashMap::new();
    map.insert("PDVMAP_API_URL", "ftp://pdv.example.com");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
}

#[test]
fn build_app_config_rejects_unparseable_authority() {
    let mut map = HashMap::new();
    map.insert("PDVMAP_API_URL", "http://localhost:99999");
    assert!(build_app_config(lookup_from_map(&map)).is_err());

    map.insert("PDVMAP_API_URL", "http://pdv example.com");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
}

#[test]
fn build_app_config_accepts_host_with_port() {
    let mut map = HashMap::new();
    map.insert("PDVMAP_API_URL", "http://127.0.0.1:4000/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base_url, "http://127.0.0.1:4000");
}

#[test]
fn api_timeout_secs_override() {
    let mut map = HashMap::new();
    map.insert("PDVMAP_API_TIMEOUT_SECS", "60");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_timeout_secs, 60);
}

#[test]
fn api_timeout_secs_invalid() {
    let mut map = HashMap::new();
    map.insert("PDVMAP_API_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PDVMAP_API_TIMEOUT_SECS"),
        "expected InvalidEnvVar(PDVMAP_API_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn api_timeout_secs_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("PDVMAP_API_TIMEOUT_SECS", "0");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
}

#[test]
fn api_max_retries_override() {
    let mut map = HashMap::new();
    map.insert("PDVMAP_API_MAX_RETRIES", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_max_retries, 0);
}

#[test]
fn api_max_retries_invalid() {
    let mut map = HashMap::new();
    map.insert("PDVMAP_API_MAX_RETRIES", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PDVMAP_API_MAX_RETRIES"),
        "expected InvalidEnvVar(PDVMAP_API_MAX_RETRIES), got: {result:?}"
    );
}

#[test]
fn api_retry_backoff_base_ms_override() {
    let mut map = HashMap::new();
    map.insert("PDVMAP_API_RETRY_BACKOFF_BASE_MS", "1000");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_retry_backoff_base_ms, 1000);
}

#[test]
fn map_access_token_blank_is_none() {
    let mut map = HashMap::new();
    map.insert("PDVMAP_MAP_ACCESS_TOKEN", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.map_access_token.is_none());
}

#[test]
fn debug_output_redacts_map_access_token() {
    let mut map = HashMap::new();
    map.insert("PDVMAP_MAP_ACCESS_TOKEN", "pk.secret-token");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("pk.secret-token"));
    assert!(rendered.contains("[redacted]"));
}

#[test]
fn production_requires_api_url() {
    let mut map = HashMap::new();
    map.insert("PDVMAP_ENV", "production");
    let err = build_app_config(lookup_from_map(&map)).unwrap_err();
    assert!(matches!(err, ConfigError::MissingEnvVar(ref var) if var == "PDVMAP_API_URL"));
}

#[test]
fn production_with_api_url_loads() {
    let mut map = HashMap::new();
    map.insert("PDVMAP_ENV", "production");
    map.insert("PDVMAP_API_URL", "https://pdv.example.com/api/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.api_base_url, "https://pdv.example.com/api");
}
