use auth_api::AuthApiError;
use thiserror::Error;
use token_store::StoreError;

use crate::wait::WaitError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authorization code exchange failed: {0}")]
    Exchange(#[source] AuthApiError),

    #[error("token storage failed: {0}")]
    Storage(#[from] StoreError),

    #[error("auth request was cancelled")]
    Cancelled,
}

#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("identity SDK unavailable: {reason}")]
    SdkUnavailable { reason: String },

    #[error("authorization denied (silent: {silent}; interactive: {interactive})")]
    AuthorizationDenied { silent: String, interactive: String },

    #[error(transparent)]
    Session(#[from] AuthError),

    #[error("OAuth flow was cancelled")]
    Cancelled,
}

impl From<WaitError> for OAuthError {
    fn from(error: WaitError) -> Self {
        match error {
            WaitError::Cancelled => Self::Cancelled,
            other => Self::SdkUnavailable {
                reason: other.to_string(),
            },
        }
    }
}
