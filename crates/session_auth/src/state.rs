use serde::Serialize;

/// Bearer credential plus whether it has been positively confirmed.
///
/// A non-empty `token` with `valid == false` is a credential loaded from
/// storage that has not been checked yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthState {
    token: String,
    valid: bool,
}

impl AuthState {
    pub(crate) fn unverified(token: String) -> Self {
        Self {
            token,
            valid: false,
        }
    }

    pub(crate) fn authenticated(token: String) -> Self {
        Self { token, valid: true }
    }

    pub(crate) fn set_valid(&mut self, valid: bool) {
        self.valid = valid;
    }

    /// Full `Authorization` header value, or `""` when logged out.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    #[must_use]
    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }
}
