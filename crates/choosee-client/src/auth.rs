//! Credential lifecycle: login, registration, refresh, logout, current user.

use choosee_core::auth::{LoginRequest, LoginResponse, RegisterForm, User};
use reqwest::Method;

use crate::client::{to_json_value, Auth, ChooseeClient};
use crate::error::ClientError;

impl ChooseeClient {
    /// Signs in and persists the returned tokens and user.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] if the backend rejects the credentials.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the response shape is unexpected.
    pub async fn login(&self, email: &str, password: &str) -> Result<Option<User>, ClientError> {
        let body = to_json_value(
            &LoginRequest {
                email: email.trim().to_string(),
                password: password.to_string(),
            },
            "users/login",
        )?;
        let response: LoginResponse = self
            .request_json(Method::POST, "users/login", Some(&body), Auth::Public)
            .await?;

        self.session().store_tokens(&response.tokens())?;
        if let Some(user) = &response.user {
            self.session().store_user(user)?;
        }
        tracing::info!(email = %email.trim(), "signed in");
        Ok(response.user)
    }

    /// Validates the form locally, then creates the account.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Registration`] if local validation fails; nothing is sent.
    /// - [`ClientError::Api`] if the backend rejects the registration.
    /// - [`ClientError::Http`] on network failure.
    pub async fn register(&self, form: &RegisterForm) -> Result<serde_json::Value, ClientError> {
        form.validate()?;
        let body = to_json_value(form, "users/register")?;
        self.request_json(Method::POST, "users/register", Some(&body), Auth::Public)
            .await
    }

    /// Exchanges the stored refresh token for a new access token.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotAuthenticated`] if no refresh token is stored.
    /// - [`ClientError::SessionExpired`] if the response carries no token.
    /// - [`ClientError::Api`] if the backend rejects the refresh token.
    pub async fn refresh(&self) -> Result<String, ClientError> {
        self.exchange_refresh_token().await
    }

    /// Clears local credentials, then tells the backend.
    ///
    /// Credentials stay cleared even when the backend call fails.
    ///
    /// # Errors
    ///
    /// Returns the backend call's error after local state is already cleared.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let token = self.session().access_token()?;
        self.session().clear_credentials()?;

        let Some(token) = token else {
            return Ok(());
        };
        let _: serde_json::Value = self
            .request_with_token(Method::POST, "users/logout", &token)
            .await?;
        Ok(())
    }

    /// Fetches the signed-in user and refreshes the stored copy.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotAuthenticated`] if no access token is stored.
    /// - [`ClientError::SessionExpired`] if the token cannot be refreshed.
    pub async fn current_user(&self) -> Result<User, ClientError> {
        self.require_login()?;
        let user: User = self
            .request_json(Method::GET, "users/user", None, Auth::Bearer)
            .await?;
        self.session().store_user(&user)?;
        Ok(user)
    }
}
