//! Request and response bodies that exist only on the wire.

use choosee_core::RestaurantRecommendation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct LocationRef<'a> {
    pub name: &'a str,
    pub address: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CheckVisitedRequest<'a> {
    pub location: LocationRef<'a>,
}

/// The restaurant fields the backend stores for a visited place.
#[derive(Debug, Serialize)]
pub(crate) struct VisitedPayload<'a> {
    pub name: &'a str,
    pub address: &'a str,
    pub lat: f64,
    pub lng: f64,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    pub price_level: Option<u8>,
    pub types: &'a [String],
    pub description: Option<&'a str>,
    pub recommendation_reason: Option<&'a str>,
    pub photo_url: Option<&'a str>,
}

impl<'a> From<&'a RestaurantRecommendation> for VisitedPayload<'a> {
    fn from(rec: &'a RestaurantRecommendation) -> Self {
        Self {
            name: &rec.name,
            address: &rec.address,
            lat: rec.lat,
            lng: rec.lng,
            rating: rec.rating,
            user_ratings_total: rec.user_ratings_total,
            price_level: rec.price_level,
            types: &rec.types,
            description: rec.description.as_deref(),
            recommendation_reason: rec.recommendation_reason.as_deref(),
            photo_url: rec.photo_url.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ToggleVisitedRequest<'a> {
    pub location: VisitedPayload<'a>,
    pub notes: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VisitedStatus {
    pub is_visited: bool,
}

/// `GET /suggestions/user_suggestions/` is a bare array on current backends.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SuggestionList<T> {
    Bare(Vec<T>),
    Wrapped { suggestions: Vec<T> },
}

impl<T> SuggestionList<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            SuggestionList::Bare(v) | SuggestionList::Wrapped { suggestions: v } => v,
        }
    }
}

// Google Places (New) text search.

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TextSearchRequest<'a> {
    pub text_query: &'a str,
    pub max_result_count: u32,
    pub location_bias: LocationBias,
}

#[derive(Debug, Serialize)]
pub(crate) struct LocationBias {
    pub circle: Circle,
}

#[derive(Debug, Serialize)]
pub(crate) struct Circle {
    pub center: LatLng,
    pub radius: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TextSearchResponse {
    #[serde(default)]
    pub places: Vec<Place>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Place {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<LocalizedText>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub location: Option<LatLng>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LocalizedText {
    pub text: String,
}

// Geocoding API reverse lookup.

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResult {
    pub place_id: String,
    #[serde(default)]
    pub formatted_address: String,
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddressComponent {
    pub long_name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Geometry {
    pub location: GeocodeLatLng,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeLatLng {
    pub lat: f64,
    pub lng: f64,
}
