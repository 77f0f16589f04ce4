//! Environment configuration.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use auth_api::AuthApiConfig;
use session_auth::OAuthConfig;

pub const DEFAULT_API_URL: &str = "http://localhost:5050";
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 1000;

#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub api_url: String,
    pub store_path: Option<PathBuf>,
    pub client_id: Option<String>,
    pub http_timeout: Duration,
    pub debug: bool,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            api_url: env_string_opt("CHAT_SESSION_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_owned()),
            store_path: env_string_opt("CHAT_SESSION_STORE_PATH").map(PathBuf::from),
            client_id: env_string_opt("CHAT_SESSION_CLIENT_ID"),
            http_timeout: Duration::from_millis(
                env_string_opt("CHAT_SESSION_HTTP_TIMEOUT_MS")
                    .and_then(|value| value.trim().parse().ok())
                    .unwrap_or(DEFAULT_HTTP_TIMEOUT_MS),
            ),
            debug: env_flag("CHAT_SESSION_DEBUG"),
        }
    }

    pub fn auth_api(&self) -> AuthApiConfig {
        AuthApiConfig::new(self.api_url.clone()).with_timeout(self.http_timeout)
    }

    pub fn oauth(&self) -> OAuthConfig {
        OAuthConfig::new(self.client_id.clone().unwrap_or_default())
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
