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

/// Returns a map with the Twitter credentials populated.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("TWITTER_BEARER_TOKEN", "test-bearer");
    m
}

#[test]
fn build_app_config_succeeds_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.twitter_bearer_token.is_none());
    assert_eq!(cfg.twitter_base_url, "https://api.twitter.com/");
    assert_eq!(cfg.linkedin_base_url, "https://www.linkedin.com/voyager/api/");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.min_engagement, 10);
    assert_eq!(cfg.rate_window_secs, 900);
    assert_eq!(cfg.rate_max_requests, 15);
    assert_eq!(cfg.rate_spacing_secs, 3);
}

#[test]
fn require_twitter_bearer_fails_when_absent() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let result = cfg.require_twitter_bearer();
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "TWITTER_BEARER_TOKEN"),
        "expected MissingEnvVar(TWITTER_BEARER_TOKEN), got: {result:?}"
    );
}

#[test]
fn require_twitter_bearer_returns_token() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.require_twitter_bearer().unwrap(), "test-bearer");
}

#[test]
fn empty_bearer_token_is_treated_as_missing() {
    let mut map = full_env();
    map.insert("TWITTER_BEARER_TOKEN", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.twitter_bearer_token.is_none());
}

#[test]
fn require_linkedin_credentials_names_missing_password() {
    let mut map = full_env();
    map.insert("LINKEDIN_USERNAME", "operator@example.com");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let result = cfg.require_linkedin_credentials();
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "LINKEDIN_PASSWORD"),
        "expected MissingEnvVar(LINKEDIN_PASSWORD), got: {result:?}"
    );
}

#[test]
fn require_linkedin_credentials_returns_pair() {
    let mut map = full_env();
    map.insert("LINKEDIN_USERNAME", "operator@example.com");
    map.insert("LINKEDIN_PASSWORD", "hunter2");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.require_linkedin_credentials().unwrap(),
        ("operator@example.com", "hunter2")
    );
}

#[test]
fn min_engagement_override() {
    let mut map = full_env();
    map.insert("TECHTRENDS_MIN_ENGAGEMENT", "25");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.min_engagement, 25);
}

#[test]
fn min_engagement_invalid() {
    let mut map = full_env();
    map.insert("TECHTRENDS_MIN_ENGAGEMENT", "lots");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TECHTRENDS_MIN_ENGAGEMENT"),
        "expected InvalidEnvVar(TECHTRENDS_MIN_ENGAGEMENT), got: {result:?}"
    );
}

#[test]
fn request_timeout_secs_invalid() {
    let mut map = full_env();
    map.insert("TECHTRENDS_REQUEST_TIMEOUT_SECS", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TECHTRENDS_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(TECHTRENDS_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn rate_limit_overrides() {
    let mut map = full_env();
    map.insert("TECHTRENDS_RATE_WINDOW_SECS", "60");
    map.insert("TECHTRENDS_RATE_MAX_REQUESTS", "5");
    map.insert("TECHTRENDS_RATE_SPACING_SECS", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.rate_window_secs, 60);
    assert_eq!(cfg.rate_max_requests, 5);
    assert_eq!(cfg.rate_spacing_secs, 0);
}

#[test]
fn rate_max_requests_zero_is_rejected() {
    let mut map = full_env();
    map.insert("TECHTRENDS_RATE_MAX_REQUESTS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TECHTRENDS_RATE_MAX_REQUESTS"),
        "expected InvalidEnvVar(TECHTRENDS_RATE_MAX_REQUESTS), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_secrets() {
    let mut map = full_env();
    map.insert("LINKEDIN_PASSWORD", "hunter2");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("test-bearer"));
    assert!(!rendered.contains("hunter2"));
    assert!(rendered.contains("[redacted]"));
}
