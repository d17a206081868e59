//! The recommendation search endpoint.

use choosee_core::recommendation::SearchResponse;
use choosee_core::{PreferenceDraft, RestaurantRecommendation, SearchRequest};
use reqwest::Method;

use crate::client::{to_json_value, Auth, ChooseeClient};
use crate::error::ClientError;

const SEARCH_PATH: &str = "maps/search_places/";

impl ChooseeClient {
    /// Asks the backend for restaurants matching `request`.
    ///
    /// The stored access token is attached when present; anonymous searches
    /// go out without one. An empty list is a normal result.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] on a non-2xx response.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the response does not match the
    ///   expected shape.
    /// - [`ClientError::SessionExpired`] if a stored token was rejected and
    ///   could not be refreshed.
    pub async fn search_places(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<RestaurantRecommendation>, ClientError> {
        let auth = if self.session().is_authenticated()? {
            Auth::Bearer
        } else {
            Auth::Public
        };
        let body = to_json_value(request, SEARCH_PATH)?;
        let response: SearchResponse = self
            .request_json(Method::POST, SEARCH_PATH, Some(&body), auth)
            .await?;

        tracing::debug!(
            returned = response.restaurants.len(),
            count = ?response.count,
            "search_places completed"
        );
        Ok(response.restaurants)
    }

    /// Builds the request from a draft and searches.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Incomplete`] before any request when the draft
    /// lacks a location or a resolved preference, otherwise as
    /// [`ChooseeClient::search_places`].
    pub async fn search_draft(
        &self,
        draft: &PreferenceDraft,
    ) -> Result<Vec<RestaurantRecommendation>, ClientError> {
        let request = draft.to_search_request()?;
        self.search_places(&request).await
    }
}
