use std::time::Duration;

use feedboard_db::RestConfig;

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{name} must be a positive integer, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },

    #[error("No voter email given: pass --email or set FEEDBOARD_USER_EMAIL")]
    MissingEmail,
}

/// CLI configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub api_url: String,
    pub api_key: String,
    pub request_timeout_secs: u64,
    /// Default voter for `vote` and `react`.
    pub user_email: Option<String>,
}

impl CliConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                          | Default |
    /// |----------------------------------|---------|
    /// | `FEEDBOARD_API_URL`              | required |
    /// | `FEEDBOARD_API_KEY`              | required |
    /// | `FEEDBOARD_REQUEST_TIMEOUT_SECS` | `30`    |
    /// | `FEEDBOARD_USER_EMAIL`           | none    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let api_url = required("FEEDBOARD_API_URL")?;
        let api_key = required("FEEDBOARD_API_KEY")?;

        let request_timeout_secs = match lookup("FEEDBOARD_REQUEST_TIMEOUT_SECS") {
            None => DEFAULT_TIMEOUT_SECS,
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        name: "FEEDBOARD_REQUEST_TIMEOUT_SECS",
                        value,
                    })
                }
            },
        };

        let user_email = lookup("FEEDBOARD_USER_EMAIL").filter(|v| !v.trim().is_empty());

        Ok(Self {
            api_url,
            api_key,
            request_timeout_secs,
            user_email,
        })
    }

    /// Data-layer view of this configuration.
    pub fn rest(&self) -> RestConfig {
        RestConfig::new(&self.api_url, &self.api_key)
            .with_timeout(Duration::from_secs(self.request_timeout_secs))
    }

    /// `explicit`, falling back to `FEEDBOARD_USER_EMAIL`.
    pub fn voter_email(&self, explicit: Option<String>) -> Result<String, ConfigError> {
        explicit
            .or_else(|| self.user_email.clone())
            .ok_or(ConfigError::MissingEmail)
    }
}
