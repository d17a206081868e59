//! Saved suggestion bundles.

use choosee_core::suggestion::SaveSuggestionRequest;
use choosee_core::{SaveOutcome, SavedSuggestion};
use reqwest::Method;

use crate::client::{to_json_value, Auth, ChooseeClient};
use crate::error::ClientError;
use crate::types::SuggestionList;

pub const DUPLICATE_SUGGESTION_CODE: &str = "DUPLICATE_SUGGESTION";

impl ChooseeClient {
    /// Saves the current prompt and its results.
    ///
    /// A `DUPLICATE_SUGGESTION` answer, whatever its status, is reported as
    /// [`SaveOutcome::AlreadySaved`] rather than as an error.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotAuthenticated`] if no access token is stored.
    /// - [`ClientError::SessionExpired`] if the token cannot be refreshed.
    /// - [`ClientError::Api`] / [`ClientError::Http`] on other failures.
    pub async fn save_suggestions(
        &self,
        request: &SaveSuggestionRequest,
    ) -> Result<SaveOutcome, ClientError> {
        self.require_login()?;
        let path = "suggestions/save_suggestions/";
        let body = to_json_value(request, path)?;
        let result: Result<serde_json::Value, ClientError> = self
            .request_json(Method::POST, path, Some(&body), Auth::Bearer)
            .await;

        match result {
            Ok(body) if is_duplicate(&body) => Ok(SaveOutcome::AlreadySaved),
            Ok(_) => Ok(SaveOutcome::Saved),
            Err(e) if e.api_code().as_deref() == Some(DUPLICATE_SUGGESTION_CODE) => {
                tracing::debug!("suggestion bundle already saved");
                Ok(SaveOutcome::AlreadySaved)
            }
            Err(e) => Err(e),
        }
    }

    /// Lists the user's previously saved bundles.
    ///
    /// # Errors
    ///
    /// As [`ChooseeClient::save_suggestions`].
    pub async fn user_suggestions(&self) -> Result<Vec<SavedSuggestion>, ClientError> {
        self.require_login()?;
        let list: SuggestionList<SavedSuggestion> = self
            .request_json(
                Method::GET,
                "suggestions/user_suggestions/",
                None,
                Auth::Bearer,
            )
            .await?;
        Ok(list.into_vec())
    }
}

fn is_duplicate(body: &serde_json::Value) -> bool {
    body.get("code").and_then(serde_json::Value::as_str) == Some(DUPLICATE_SUGGESTION_CODE)
}
