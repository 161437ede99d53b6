#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    /// Backend base URL without a trailing slash.
    pub api_base_url: String,
    pub log_level: String,
    pub api_timeout_secs: u64,
    pub api_user_agent: String,
    pub api_max_retries: u32,
    pub api_retry_backoff_base_ms: u64,
    pub map_style: String,
    /// Public map token. Never compiled in; only read from the environment.
    pub map_access_token: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("api_base_url", &self.api_base_url)
            .field("log_level", &self.log_level)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field("api_user_agent", &self.api_user_agent)
            .field("api_max_retries", &self.api_max_retries)
            .field("api_retry_backoff_base_ms", &self.api_retry_backoff_base_ms)
            .field("map_style", &self.map_style)
            .field(
                "map_access_token",
                &self.map_access_token.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
