//! Visited-location endpoints. All require a signed-in user.

use choosee_core::recommendation::VisitedList;
use choosee_core::{RestaurantRecommendation, VisitedLocation};
use reqwest::Method;

use crate::client::{to_json_value, Auth, ChooseeClient};
use crate::error::ClientError;
use crate::types::{
    CheckVisitedRequest, LocationRef, ToggleVisitedRequest, VisitedPayload, VisitedStatus,
};

impl ChooseeClient {
    /// Lists every place the user has marked as visited.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotAuthenticated`] if no access token is stored.
    /// - [`ClientError::SessionExpired`] if the token cannot be refreshed.
    /// - [`ClientError::Api`] / [`ClientError::Http`] on request failure.
    pub async fn visited_locations(&self) -> Result<Vec<VisitedLocation>, ClientError> {
        self.require_login()?;
        let list: VisitedList = self
            .request_json(Method::GET, "visited/", None, Auth::Bearer)
            .await?;
        Ok(list.into_vec())
    }

    /// Asks whether `rec` is already marked as visited.
    ///
    /// # Errors
    ///
    /// As [`ChooseeClient::visited_locations`].
    pub async fn check_visited(&self, rec: &RestaurantRecommendation) -> Result<bool, ClientError> {
        self.require_login()?;
        let path = "visited/check_visited/";
        let body = to_json_value(
            &CheckVisitedRequest {
                location: LocationRef {
                    name: &rec.name,
                    address: &rec.address,
                },
            },
            path,
        )?;
        let status: VisitedStatus = self
            .request_json(Method::POST, path, Some(&body), Auth::Bearer)
            .await?;
        Ok(status.is_visited)
    }

    /// Flips the visited flag server-side and returns the new status.
    ///
    /// The caller applies the returned value; nothing is assumed locally.
    ///
    /// # Errors
    ///
    /// As [`ChooseeClient::visited_locations`].
    pub async fn toggle_visited(&self, rec: &RestaurantRecommendation) -> Result<bool, ClientError> {
        self.require_login()?;
        let path = "visited/toggle_visited/";
        let body = to_json_value(
            &ToggleVisitedRequest {
                location: VisitedPayload::from(rec),
                notes: format!("Visited {}", rec.name),
            },
            path,
        )?;
        let status: VisitedStatus = self
            .request_json(Method::POST, path, Some(&body), Auth::Bearer)
            .await?;

        tracing::info!(name = %rec.name, is_visited = status.is_visited, "visited status updated");
        Ok(status.is_visited)
    }
}
