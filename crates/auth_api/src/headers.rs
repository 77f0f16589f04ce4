use std::collections::BTreeMap;

use crate::config::AuthApiConfig;
use crate::error::AuthApiError;

pub const HEADER_ACCEPT: &str = "accept";
pub const HEADER_CONTENT_TYPE: &str = "content-type";
pub const HEADER_AUTHORIZATION: &str = "authorization";
pub const HEADER_USER_AGENT: &str = "user-agent";

/// Build a deterministic header map for auth requests.
///
/// `authorization` is sent verbatim: the session stores tokens already
/// `Bearer `-prefixed.
pub fn build_headers(
    config: &AuthApiConfig,
    authorization: Option<&str>,
) -> Result<BTreeMap<String, String>, AuthApiError> {
    let mut headers = BTreeMap::new();

    headers.insert(HEADER_ACCEPT.to_owned(), "application/json".to_owned());
    headers.insert(
        HEADER_CONTENT_TYPE.to_owned(),
        "application/json".to_owned(),
    );

    let ua = config
        .user_agent
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(default_user_agent);
    headers.insert(HEADER_USER_AGENT.to_owned(), ua);

    for (key, value) in &config.extra_headers {
        headers.insert(key.trim().to_ascii_lowercase(), value.trim().to_owned());
    }

    if let Some(authorization) = authorization {
        let authorization = authorization.trim();
        if authorization.is_empty() {
            return Err(AuthApiError::MissingToken);
        }
        headers.insert(HEADER_AUTHORIZATION.to_owned(), authorization.to_owned());
    }

    Ok(headers)
}

fn default_user_agent() -> String {
    format!("chat-session/{}", env!("CARGO_PKG_VERSION"))
}
