use std::collections::BTreeMap;
use std::time::Duration;

/// Default API origin used by the chat web client.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5050";
/// Redirect URI expected by the server for codes minted by the JS SDK popup flow.
pub const DEFAULT_REDIRECT_URI: &str = "postmessage";

/// Transport configuration for authentication requests.
#[derive(Debug, Clone)]
pub struct AuthApiConfig {
    /// Base URL the endpoint paths are resolved against.
    pub base_url: String,
    /// `redirect_uri` sent alongside the authorization code.
    pub redirect_uri: String,
    /// Optional `User-Agent` override.
    pub user_agent: Option<String>,
    /// Additional headers merged into request headers.
    pub extra_headers: BTreeMap<String, String>,
    /// Optional per-request timeout.
    pub timeout: Option<Duration>,
}

impl Default for AuthApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            user_agent: None,
            extra_headers: BTreeMap::new(),
            timeout: None,
        }
    }
}

impl AuthApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = redirect_uri.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn insert_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }
}
