//! Google place text search and reverse geocoding for the location step.

use choosee_core::{AppConfig, Coords, PlaceSuggestion};
use reqwest::{Client, Url};

use crate::client::{build_http_client, normalise_base_url, read_json};
use crate::error::ClientError;
use crate::types::{
    Circle, GeocodeResponse, LatLng, LocationBias, TextSearchRequest, TextSearchResponse,
};

const FIELD_MASK: &str = "places.id,places.displayName,places.formattedAddress,places.location";
const MAX_RESULTS: u32 = 5;
const BIAS_CENTER: LatLng = LatLng {
    latitude: 14.5995,
    longitude: 120.9842,
};
const BIAS_RADIUS_METERS: f64 = 50_000.0;
const DROPPED_PIN_LABEL: &str = "Dropped Pin";

#[derive(Debug, Clone)]
pub struct PlacesClient {
    http: Client,
    api_key: String,
    places_base_url: Url,
    geocode_base_url: Url,
}

impl PlacesClient {
    /// # Errors
    ///
    /// Returns [`ClientError::MissingPlacesKey`] when no maps key is
    /// configured, or the errors of [`PlacesClient::with_base_urls`].
    pub fn new(config: &AppConfig) -> Result<Self, ClientError> {
        let api_key = config
            .google_maps_api_key
            .as_deref()
            .ok_or(ClientError::MissingPlacesKey)?;
        Self::with_base_urls(
            api_key,
            &config.places_base_url,
            &config.geocode_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` cannot be built
    /// or [`ClientError::InvalidBaseUrl`] if either URL is invalid.
    pub fn with_base_urls(
        api_key: &str,
        places_base_url: &str,
        geocode_base_url: &str,
        timeout_secs: Option<u64>,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            http: build_http_client(timeout_secs, user_agent)?,
            api_key: api_key.to_owned(),
            places_base_url: normalise_base_url(places_base_url)?,
            geocode_base_url: normalise_base_url(geocode_base_url)?,
        })
    }

    /// Text search for places matching `query`, at most five results.
    ///
    /// A blank query returns an empty list without a request. Places without
    /// coordinates are skipped.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] on a non-2xx response.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] on an unexpected response shape.
    pub async fn search_text(&self, query: &str) -> Result<Vec<PlaceSuggestion>, ClientError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = join(&self.places_base_url, "./places:searchText")?;
        let body = TextSearchRequest {
            text_query: query,
            max_result_count: MAX_RESULTS,
            location_bias: LocationBias {
                circle: Circle {
                    center: BIAS_CENTER,
                    radius: BIAS_RADIUS_METERS,
                },
            },
        };
        let response = self
            .http
            .post(url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(&body)
            .send()
            .await?;
        let parsed: TextSearchResponse = read_json(response, "places:searchText").await?;

        let suggestions: Vec<PlaceSuggestion> = parsed
            .places
            .into_iter()
            .filter_map(|place| {
                let location = place.location?;
                let secondary_text = place.formatted_address.unwrap_or_default();
                let main_text = place
                    .display_name
                    .map(|d| d.text)
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| "Unknown Location".to_string());
                Some(PlaceSuggestion {
                    place_id: place.id,
                    main_text,
                    secondary_text,
                    coords: Coords::new(location.latitude, location.longitude),
                })
            })
            .collect();

        tracing::debug!(query, results = suggestions.len(), "place search completed");
        Ok(suggestions)
    }

    /// Describes a dropped pin. Returns `None` when the geocoder finds
    /// nothing at that point.
    ///
    /// # Errors
    ///
    /// As [`PlacesClient::search_text`].
    pub async fn reverse_geocode(
        &self,
        coords: Coords,
    ) -> Result<Option<PlaceSuggestion>, ClientError> {
        let mut url = join(&self.geocode_base_url, "json")?;
        url.query_pairs_mut()
            .append_pair("latlng", &format!("{},{}", coords.lat, coords.lng))
            .append_pair("key", &self.api_key);

        let response = self.http.get(url).send().await?;
        let parsed: GeocodeResponse = read_json(response, "geocode/json").await?;
        if parsed.status != "OK" {
            tracing::debug!(status = %parsed.status, "reverse geocode returned no result");
            return Ok(None);
        }

        Ok(parsed.results.into_iter().next().map(|result| {
            let main_text = result
                .address_components
                .first()
                .map(|c| c.long_name.clone())
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| DROPPED_PIN_LABEL.to_string());
            PlaceSuggestion {
                place_id: result.place_id,
                main_text,
                secondary_text: result.formatted_address,
                coords: Coords::new(result.geometry.location.lat, result.geometry.location.lng),
            }
        }))
    }
}

fn join(base: &Url, path: &str) -> Result<Url, ClientError> {
    base.join(path).map_err(|e| ClientError::InvalidBaseUrl {
        url: format!("{base}{path}"),
        reason: e.to_string(),
    })
}
