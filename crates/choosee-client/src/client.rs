//! HTTP client for the Choosee backend.
//!
//! Wraps `reqwest` with bearer-token handling. Protected calls attach the
//! stored access token; a `401` triggers one refresh followed by one replay
//! of the original request. When the refresh cannot succeed the stored
//! credentials are cleared and [`ClientError::SessionExpired`] is returned.

use std::time::Duration;

use choosee_core::auth::{RefreshRequest, RefreshResponse};
use choosee_core::AppConfig;
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::session::Session;

const REFRESH_PATH: &str = "users/refresh/";

/// Whether a request carries the stored access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Auth {
    Public,
    Bearer,
}

/// Client for the Choosee REST API.
///
/// Use [`ChooseeClient::new`] with loaded configuration or
/// [`ChooseeClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct ChooseeClient {
    http: Client,
    base_url: Url,
    session: Session,
}

impl ChooseeClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` cannot be built
    /// or [`ClientError::InvalidBaseUrl`] if the configured URL is invalid.
    pub fn new(config: &AppConfig, session: Session) -> Result<Self, ClientError> {
        Self::with_base_url(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
            session,
        )
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` cannot be built
    /// or [`ClientError::InvalidBaseUrl`] if `base_url` is not a valid URL.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: Option<u64>,
        user_agent: &str,
        session: Session,
    ) -> Result<Self, ClientError> {
        let http = build_http_client(timeout_secs, user_agent)?;
        let base_url = normalise_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Resolves an API path such as `"visited/check_visited/"` against the
    /// base URL.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::InvalidBaseUrl {
                url: format!("{}{path}", self.base_url),
                reason: e.to_string(),
            })
    }

    /// Fails fast with [`ClientError::NotAuthenticated`] when no access token
    /// is stored.
    pub(crate) fn require_login(&self) -> Result<(), ClientError> {
        if self.session.is_authenticated()? {
            Ok(())
        } else {
            Err(ClientError::NotAuthenticated)
        }
    }

    /// Sends a JSON request and decodes a JSON response.
    ///
    /// With [`Auth::Bearer`], a `401` causes one token refresh and one replay.
    pub(crate) async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        auth: Auth,
    ) -> Result<T, ClientError> {
        let url = self.endpoint(path)?;
        let token = match auth {
            Auth::Public => None,
            Auth::Bearer => self.session.access_token()?,
        };

        let response = self
            .send(method.clone(), &url, body, token.as_deref())
            .await?;
        if auth == Auth::Public || response.status() != StatusCode::UNAUTHORIZED {
            return read_json(response, path).await;
        }

        tracing::debug!(path, "access token rejected; refreshing once");
        let access = self.refresh_or_expire().await?;
        let response = self.send(method, &url, body, Some(&access)).await?;
        read_json(response, path).await
    }

    /// One request with an explicit token and no refresh handling.
    pub(crate) async fn request_with_token<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        token: &str,
    ) -> Result<T, ClientError> {
        let url = self.endpoint(path)?;
        let response = self.send(method, &url, None, Some(token)).await?;
        read_json(response, path).await
    }

    async fn send(
        &self,
        method: Method,
        url: &Url,
        body: Option<&serde_json::Value>,
        token: Option<&str>,
    ) -> Result<reqwest::Response, ClientError> {
        let mut request = self.http.request(method, url.clone());
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }

    /// Trades the stored refresh token for a new access token and stores it.
    pub(crate) async fn exchange_refresh_token(&self) -> Result<String, ClientError> {
        let refresh = self
            .session
            .refresh_token()?
            .ok_or(ClientError::NotAuthenticated)?;
        let url = self.endpoint(REFRESH_PATH)?;
        let body = to_json_value(&RefreshRequest { refresh }, REFRESH_PATH)?;
        let response = self.send(Method::POST, &url, Some(&body), None).await?;
        let refreshed: RefreshResponse = read_json(response, REFRESH_PATH).await?;
        let access = refreshed
            .access
            .filter(|a| !a.is_empty())
            .ok_or(ClientError::SessionExpired)?;
        self.session.store_access_token(&access)?;
        Ok(access)
    }

    async fn refresh_or_expire(&self) -> Result<String, ClientError> {
        match self.exchange_refresh_token().await {
            Ok(access) => Ok(access),
            Err(e) => {
                tracing::warn!(error = %e, "token refresh failed; clearing stored credentials");
                self.session.clear_credentials()?;
                Err(ClientError::SessionExpired)
            }
        }
    }
}

pub(crate) fn build_http_client(
    timeout_secs: Option<u64>,
    user_agent: &str,
) -> Result<Client, ClientError> {
    let mut builder = Client::builder().user_agent(user_agent);
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

/// Ensures the base URL ends with exactly one slash so relative paths are
/// appended rather than replacing the last segment.
pub(crate) fn normalise_base_url(base_url: &str) -> Result<Url, ClientError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}

/// Reads the body, mapping non-2xx statuses to [`ClientError::Api`]. An empty
/// success body decodes as JSON `null`.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    context: &str,
) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ClientError::Api {
            status: status.as_u16(),
            body,
        });
    }
    let body = if body.trim().is_empty() { "null" } else { &body };
    serde_json::from_str(body).map_err(|e| ClientError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}

pub(crate) fn to_json_value<B: serde::Serialize>(
    body: &B,
    context: &str,
) -> Result<serde_json::Value, ClientError> {
    serde_json::to_value(body).map_err(|e| ClientError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
