use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Error as JsonError;

#[derive(Debug)]
pub enum AuthApiError {
    InvalidBaseUrl(String),
    InvalidHeader(String),
    MissingToken,
    Request(reqwest::Error),
    Status(StatusCode, String),
    Serde(JsonError),
    EmptyTokenResponse,
    Cancelled,
}

impl AuthApiError {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// HTTP status for errors that carried a response.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status(status, _) => Some(*status),
            Self::Request(error) => error.status(),
            _ => None,
        }
    }
}

impl fmt::Display for AuthApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBaseUrl(value) => write!(f, "invalid base URL: {value}"),
            Self::InvalidHeader(message) => write!(f, "invalid header: {message}"),
            Self::MissingToken => write!(f, "bearer token is required"),
            Self::Request(error) => write!(f, "request error: {error}"),
            Self::Status(status, message) => write!(f, "HTTP {status} {message}"),
            Self::Serde(error) => write!(f, "serialization error: {error}"),
            Self::EmptyTokenResponse => write!(f, "token response did not contain a token"),
            Self::Cancelled => write!(f, "request was cancelled"),
        }
    }
}

impl std::error::Error for AuthApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Request(error) => Some(error),
            Self::Serde(error) => Some(error),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AuthApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Request(error)
    }
}

impl From<JsonError> for AuthApiError {
    fn from(error: JsonError) -> Self {
        Self::Serde(error)
    }
}

/// Error bodies come as `{"message": ..}`, `{"error": ..}`, or a bare JSON string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorPayload {
    Message { message: String },
    Error { error: String },
    Bare(String),
}

impl ErrorPayload {
    fn into_message(self) -> String {
        match self {
            Self::Message { message } | Self::Error { error: message } | Self::Bare(message) => {
                message
            }
        }
    }
}

pub fn parse_error_message(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string();
    }

    match serde_json::from_str::<ErrorPayload>(body) {
        Ok(payload) => {
            let message = payload.into_message();
            if message.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                message
            }
        }
        Err(_) => body.to_string(),
    }
}
