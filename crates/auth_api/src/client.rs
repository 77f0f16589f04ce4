use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cancel::{await_or_cancel, is_cancelled, CancellationSignal};
use crate::config::AuthApiConfig;
use crate::error::{parse_error_message, AuthApiError};
use crate::headers::build_headers;
use crate::url::{endpoint_url, EXCHANGE_PATH, HEALTH_PATH};

/// Body of `POST /auth/google`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeExchangeRequest {
    pub code: String,
    pub redirect_uri: String,
}

/// Successful exchange response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug)]
pub struct AuthApiClient {
    http: Client,
    config: AuthApiConfig,
}

impl AuthApiClient {
    pub fn new(config: AuthApiConfig) -> Result<Self, AuthApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(AuthApiError::from)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &AuthApiConfig {
        &self.config
    }

    pub fn build_headers(&self, authorization: Option<&str>) -> Result<HeaderMap, AuthApiError> {
        let headers = build_headers(&self.config, authorization)?;
        let mut out = HeaderMap::new();
        for (key, value) in headers {
            out.insert(
                HeaderName::from_bytes(key.as_bytes())
                    .map_err(|_| AuthApiError::InvalidHeader(format!("invalid header key: {key}")))?,
                HeaderValue::from_str(&value).map_err(|_| {
                    AuthApiError::InvalidHeader(format!("invalid header value for {key}"))
                })?,
            );
        }
        Ok(out)
    }

    pub fn build_exchange_request(&self, code: &str) -> Result<RequestBuilder, AuthApiError> {
        let url = endpoint_url(&self.config.base_url, EXCHANGE_PATH)?;
        let headers = self.build_headers(None)?;
        let body = CodeExchangeRequest {
            code: code.to_owned(),
            redirect_uri: self.config.redirect_uri.clone(),
        };
        Ok(self.http.post(url).headers(headers).json(&body))
    }

    /// `token` is the full `Authorization` value, e.g. `Bearer abc`.
    pub fn build_health_request(&self, token: &str) -> Result<RequestBuilder, AuthApiError> {
        let url = endpoint_url(&self.config.base_url, HEALTH_PATH)?;
        let headers = self.build_headers(Some(token))?;
        Ok(self.http.get(url).headers(headers))
    }

    /// Trade an authorization code for a raw (unprefixed) token.
    pub async fn exchange_code(
        &self,
        code: &str,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<String, AuthApiError> {
        let request = self.build_exchange_request(code)?;
        let response = self.send(request, cancellation).await?;
        let body = await_or_cancel(response.text(), cancellation).await??;
        let parsed = serde_json::from_str::<TokenResponse>(&body)?;
        if parsed.token.is_empty() {
            return Err(AuthApiError::EmptyTokenResponse);
        }
        Ok(parsed.token)
    }

    /// Succeeds only on a 2xx health response.
    pub async fn check_health(
        &self,
        token: &str,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<(), AuthApiError> {
        let request = self.build_health_request(token)?;
        self.send(request, cancellation).await.map(|_| ())
    }

    async fn send(
        &self,
        request: RequestBuilder,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<Response, AuthApiError> {
        if is_cancelled(cancellation) {
            return Err(AuthApiError::Cancelled);
        }

        let response = await_or_cancel(request.send(), cancellation).await??;
        let status = response.status();
        debug!(%status, url = %response.url(), "auth request completed");
        if status.is_success() {
            return Ok(response);
        }

        let body = await_or_cancel(response.text(), cancellation)
            .await?
            .unwrap_or_default();
        Err(AuthApiError::Status(
            status,
            parse_error_message(status, &body),
        ))
    }
}
