use url::Url;

use crate::config::DEFAULT_API_BASE_URL;
use crate::error::AuthApiError;

pub const EXCHANGE_PATH: &str = "/auth/google";
pub const HEALTH_PATH: &str = "/api/health";

/// Resolve an endpoint path against the API base URL.
///
/// Any path prefix on the base is kept: `http://host/chat` + `/api/health`
/// resolves to `http://host/chat/api/health`. A blank base falls back to
/// [`DEFAULT_API_BASE_URL`].
pub fn endpoint_url(base: &str, path: &str) -> Result<Url, AuthApiError> {
    let base = if base.trim().is_empty() {
        DEFAULT_API_BASE_URL
    } else {
        base.trim()
    };

    let mut parsed =
        Url::parse(base).map_err(|error| AuthApiError::InvalidBaseUrl(format!("{base}: {error}")))?;
    if parsed.cannot_be_a_base() {
        return Err(AuthApiError::InvalidBaseUrl(base.to_owned()));
    }
    if !parsed.path().ends_with('/') {
        let with_slash = format!("{}/", parsed.path());
        parsed.set_path(&with_slash);
    }

    parsed
        .join(path.trim_start_matches('/'))
        .map_err(|error| AuthApiError::InvalidBaseUrl(format!("{base}{path}: {error}")))
}
