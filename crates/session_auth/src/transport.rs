use std::future::Future;

use auth_api::{AuthApiClient, AuthApiError, CancellationSignal};

/// Outbound calls the lifecycle manager depends on.
pub trait AuthTransport: Send + Sync {
    /// Returns the raw token for `code`.
    fn exchange_code(
        &self,
        code: &str,
        cancellation: Option<&CancellationSignal>,
    ) -> impl Future<Output = Result<String, AuthApiError>> + Send;

    /// `token` is the full `Authorization` header value.
    fn check_health(
        &self,
        token: &str,
        cancellation: Option<&CancellationSignal>,
    ) -> impl Future<Output = Result<(), AuthApiError>> + Send;
}

impl AuthTransport for AuthApiClient {
    fn exchange_code(
        &self,
        code: &str,
        cancellation: Option<&CancellationSignal>,
    ) -> impl Future<Output = Result<String, AuthApiError>> + Send {
        AuthApiClient::exchange_code(self, code, cancellation)
    }

    fn check_health(
        &self,
        token: &str,
        cancellation: Option<&CancellationSignal>,
    ) -> impl Future<Output = Result<(), AuthApiError>> + Send {
        AuthApiClient::check_health(self, token, cancellation)
    }
}
