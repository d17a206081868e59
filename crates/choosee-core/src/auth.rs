//! Credential and session records for the `/users/*` endpoints.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_PASSWORD_LEN: usize = 8;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub username: Option<String>,
    pub email: String,
}

impl User {
    /// Name shown in the user menu.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.email)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    #[serde(default)]
    pub user: Option<User>,
}

impl LoginResponse {
    #[must_use]
    pub fn tokens(&self) -> TokenPair {
        TokenPair {
            access: self.access.clone(),
            refresh: self.refresh.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    #[serde(default)]
    pub access: Option<String>,
}

/// Local checks run before the register form is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("Username is required")]
    MissingUsername,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least 8 characters")]
    PasswordTooShort,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

impl RegisterForm {
    /// Validates the form in the order the register page reports problems.
    ///
    /// # Errors
    ///
    /// Returns the first [`RegistrationError`] found.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        if self.username.trim().is_empty() {
            return Err(RegistrationError::MissingUsername);
        }
        if !is_valid_email(&self.email) {
            return Err(RegistrationError::InvalidEmail);
        }
        if self.password != self.password_confirmation {
            return Err(RegistrationError::PasswordMismatch);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(RegistrationError::PasswordTooShort);
        }
        Ok(())
    }
}

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}
