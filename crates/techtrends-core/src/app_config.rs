use crate::ConfigError;

#[derive(Clone)]
pub struct AppConfig {
    pub twitter_bearer_token: Option<String>,
    pub twitter_base_url: String,
    pub linkedin_username: Option<String>,
    pub linkedin_password: Option<String>,
    pub linkedin_base_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub min_engagement: u64,
    pub rate_window_secs: u64,
    pub rate_max_requests: u32,
    pub rate_spacing_secs: u64,
}

impl AppConfig {
    /// Returns the Twitter bearer token, which the `collect` command needs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if `TWITTER_BEARER_TOKEN` was not set.
    pub fn require_twitter_bearer(&self) -> Result<&str, ConfigError> {
        self.twitter_bearer_token
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("TWITTER_BEARER_TOKEN".to_string()))
    }

    /// Returns the company-feed `(username, password)` pair.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] naming the first absent variable.
    pub fn require_linkedin_credentials(&self) -> Result<(&str, &str), ConfigError> {
        let username = self
            .linkedin_username
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("LINKEDIN_USERNAME".to_string()))?;
        let password = self
            .linkedin_password
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("LINKEDIN_PASSWORD".to_string()))?;
        Ok((username, password))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "twitter_bearer_token",
                &self.twitter_bearer_token.as_ref().map(|_| "[redacted]"),
            )
            .field("twitter_base_url", &self.twitter_base_url)
            .field("linkedin_username", &self.linkedin_username)
            .field(
                "linkedin_password",
                &self.linkedin_password.as_ref().map(|_| "[redacted]"),
            )
            .field("linkedin_base_url", &self.linkedin_base_url)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("min_engagement", &self.min_engagement)
            .field("rate_window_secs", &self.rate_window_secs)
            .field("rate_max_requests", &self.rate_max_requests)
            .field("rate_spacing_secs", &self.rate_spacing_secs)
            .finish()
    }
}
