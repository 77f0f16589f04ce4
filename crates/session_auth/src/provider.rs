use std::collections::BTreeMap;
use std::future::Future;

use serde::Serialize;

pub const DEFAULT_SCOPE: &str = "profile email https://www.googleapis.com/auth/plus.login";
pub const DEFAULT_DISCOVERY_DOCS: &[&str] =
    &["https://www.googleapis.com/discovery/v1/apis/drive/v3/rest"];

/// Consent UI policy for one authorization attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    /// Succeeds only when consent was already granted.
    None,
    /// Lets the provider show its consent UI.
    Default,
}

impl PromptMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Default => "",
        }
    }
}

/// Parameters handed to the provider's `authorize` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationRequest {
    pub client_id: String,
    pub scope: String,
    #[serde(rename = "discoveryDocs", skip_serializing_if = "Vec::is_empty")]
    pub discovery_docs: Vec<String>,
    pub prompt: String,
    pub response_type: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationResponse {
    pub code: String,
}

impl AuthorizationResponse {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

/// Caller-supplied OAuth client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthConfig {
    pub client_id: String,
    pub scope: String,
    pub discovery_docs: Vec<String>,
    pub extra: BTreeMap<String, String>,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            scope: DEFAULT_SCOPE.to_owned(),
            discovery_docs: DEFAULT_DISCOVERY_DOCS
                .iter()
                .map(|doc| (*doc).to_owned())
                .collect(),
            extra: BTreeMap::new(),
        }
    }
}

impl OAuthConfig {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            ..Self::default()
        }
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    pub fn with_discovery_docs(mut self, docs: impl IntoIterator<Item = String>) -> Self {
        self.discovery_docs = docs.into_iter().collect();
        self
    }

    pub fn insert_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Builds the request for one attempt; `response_type` is always `code`.
    #[must_use]
    pub fn request(&self, prompt: PromptMode) -> AuthorizationRequest {
        AuthorizationRequest {
            client_id: self.client_id.clone(),
            scope: self.scope.clone(),
            discovery_docs: self.discovery_docs.clone(),
            prompt: prompt.as_str().to_owned(),
            response_type: "code".to_owned(),
            extra: self.extra.clone(),
        }
    }
}

/// The external identity SDK as seen by the OAuth flow.
///
/// Rejections are the provider's error codes (for example
/// `immediate_failed` or `popup_closed_by_user`).
pub trait IdentityProvider: Send + Sync {
    /// Whether the SDK script is already injected.
    fn script_present(&self) -> bool;

    /// Injects the SDK script and resolves on its ready signal.
    fn load_script(&self) -> impl Future<Output = Result<(), String>> + Send;

    /// Whether the in-memory authorization module is available yet.
    fn auth_module_ready(&self) -> bool;

    fn authorize(
        &self,
        request: &AuthorizationRequest,
    ) -> impl Future<Output = Result<AuthorizationResponse, String>> + Send;
}
