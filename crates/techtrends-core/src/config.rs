use crate::app_config::AppConfig;
use crate::ConfigError;

const DEFAULT_TWITTER_BASE_URL: &str = "https://api.twitter.com/";
const DEFAULT_LINKEDIN_BASE_URL: &str = "https://www.linkedin.com/voyager/api/";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
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
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Credentials are optional here; commands that need them call the
/// `require_*` accessors on [`AppConfig`].
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let optional = |var: &str| -> Option<String> { lookup(var).ok().filter(|v| !v.is_empty()) };

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

    let twitter_bearer_token = optional("TWITTER_BEARER_TOKEN");
    let twitter_base_url = or_default("TWITTER_BASE_URL", DEFAULT_TWITTER_BASE_URL);
    let linkedin_username = optional("LINKEDIN_USERNAME");
    let linkedin_password = optional("LINKEDIN_PASSWORD");
    let linkedin_base_url = or_default("LINKEDIN_BASE_URL", DEFAULT_LINKEDIN_BASE_URL);
    let log_level = or_default("TECHTRENDS_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("TECHTRENDS_REQUEST_TIMEOUT_SECS", "30")?;
    let min_engagement = parse_u64("TECHTRENDS_MIN_ENGAGEMENT", "10")?;
    let rate_window_secs = parse_u64("TECHTRENDS_RATE_WINDOW_SECS", "900")?;
    let rate_max_requests = parse_u32("TECHTRENDS_RATE_MAX_REQUESTS", "15")?;
    let rate_spacing_secs = parse_u64("TECHTRENDS_RATE_SPACING_SECS", "3")?;

    if rate_max_requests == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "TECHTRENDS_RATE_MAX_REQUESTS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        twitter_bearer_token,
        twitter_base_url,
        linkedin_username,
        linkedin_password,
        linkedin_base_url,
        log_level,
        request_timeout_secs,
        min_engagement,
        rate_window_secs,
        rate_max_requests,
        rate_spacing_secs,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
