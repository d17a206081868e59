use choosee_core::{CoreError, RegistrationError};
use thiserror::Error;

pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Errors returned by the Choosee backend and places clients.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("API returned status {status}: {body}")]
    Api { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The access token was rejected and could not be refreshed. Stored
    /// credentials have already been cleared.
    #[error("your session has expired; please log in again")]
    SessionExpired,

    #[error("you need to be logged in to do that")]
    NotAuthenticated,

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("local state error: {0}")]
    Storage(String),

    #[error(transparent)]
    Incomplete(#[from] CoreError),

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error("GOOGLE_MAPS_API_KEY is not set; place search is unavailable")]
    MissingPlacesKey,
}

impl ClientError {
    /// The single human-readable line shown for a failed request.
    ///
    /// For API errors the body is searched for a structured `error` field
    /// (a string or an object carrying `message`), then a plain `message` or
    /// `detail`, falling back to a generic line. Other errors use their own
    /// message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { body, .. } => {
                body_message(body).unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string())
            }
            other => other.to_string(),
        }
    }

    /// The backend's machine-readable `code`, when the body carries one.
    #[must_use]
    pub fn api_code(&self) -> Option<String> {
        let ClientError::Api { body, .. } = self else {
            return None;
        };
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        value
            .get("code")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
    }

    #[must_use]
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ClientError::SessionExpired)
    }
}

fn body_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let text = |v: Option<&serde_json::Value>| {
        v.and_then(serde_json::Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    if let Some(error) = value.get("error") {
        if let Some(s) = text(Some(error)) {
            return Some(s);
        }
        if let Some(s) = text(error.get("message")) {
            return Some(s);
        }
    }
    text(value.get("message")).or_else(|| text(value.get("detail")))
}
