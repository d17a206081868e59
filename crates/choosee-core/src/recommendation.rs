//! Recommendation and visited-location records.
//!
//! The backend is loose about shapes: `rank` arrives as a number or a numeric
//! string, optional fields are sometimes missing, and the visited list is
//! either a bare array or wrapped in an object. Deserialization absorbs those
//! differences so the rest of the crate sees one canonical form.

use serde::{Deserialize, Deserializer, Serialize};

use crate::draft::Coords;

/// Identity used to match recommendations against each other and against
/// visited locations.
///
/// Prefers the server `id`. Falling back to `name` collides when two
/// distinct restaurants share a name, which is a known gap in the backend
/// contract rather than intended behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecommendationKey {
    Id(String),
    Name(String),
}

/// A server-returned restaurant candidate with display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantRecommendation {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub price_level: Option<u8>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub types: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub recommendation_reason: Option<String>,
    #[serde(default, deserialize_with = "lenient_rank")]
    pub rank: Option<u32>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default, rename = "isVisited", skip_serializing)]
    pub is_visited: bool,
}

impl RestaurantRecommendation {
    #[must_use]
    pub fn key(&self) -> RecommendationKey {
        match &self.id {
            Some(id) if !id.is_empty() => RecommendationKey::Id(id.clone()),
            _ => RecommendationKey::Name(self.name.clone()),
        }
    }

    #[must_use]
    pub fn coords(&self) -> Coords {
        Coords::new(self.lat, self.lng)
    }

    /// First cuisine type with underscores turned into spaces.
    #[must_use]
    pub fn primary_type(&self) -> Option<String> {
        self.types.first().map(|t| t.replace('_', " "))
    }
}

/// Response of `POST /maps/search_places/`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub restaurants: Vec<RestaurantRecommendation>,
    #[serde(default)]
    pub count: Option<u32>,
}

/// A place the user marked as visited, persisted server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitedLocation {
    #[serde(deserialize_with = "lenient_required_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_id")]
    pub place_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub price_level: Option<u8>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub types: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub recommendation_reason: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl VisitedLocation {
    /// Whether this visited record refers to the given recommendation.
    ///
    /// Matches on the restaurant id when both sides carry one, otherwise on
    /// the `(name, address)` pair the backend itself uses for lookups.
    #[must_use]
    pub fn matches(&self, rec: &RestaurantRecommendation) -> bool {
        match (&self.place_id, &rec.id) {
            (Some(a), Some(b)) => a == b,
            _ => self.name == rec.name && self.address == rec.address,
        }
    }

    /// Presents the visited record through the recommendation view model.
    #[must_use]
    pub fn to_recommendation(&self) -> RestaurantRecommendation {
        RestaurantRecommendation {
            id: self.place_id.clone(),
            name: self.name.clone(),
            address: self.address.clone(),
            lat: self.lat,
            lng: self.lng,
            rating: self.rating,
            user_ratings_total: self.user_ratings_total,
            price_level: self.price_level,
            types: self.types.clone(),
            description: self.description.clone(),
            recommendation_reason: self.recommendation_reason.clone(),
            rank: None,
            photo_url: self.photo_url.clone(),
            is_visited: true,
        }
    }
}

impl From<&RestaurantRecommendation> for VisitedLocation {
    /// Local stand-in for a record the backend just created by a toggle.
    fn from(rec: &RestaurantRecommendation) -> Self {
        Self {
            id: rec.id.clone().unwrap_or_else(|| rec.name.clone()),
            place_id: rec.id.clone(),
            name: rec.name.clone(),
            address: rec.address.clone(),
            lat: rec.lat,
            lng: rec.lng,
            rating: rec.rating,
            user_ratings_total: rec.user_ratings_total,
            price_level: rec.price_level,
            types: rec.types.clone(),
            description: rec.description.clone(),
            recommendation_reason: rec.recommendation_reason.clone(),
            photo_url: rec.photo_url.clone(),
            notes: Some(format!("Visited {}", rec.name)),
        }
    }
}

/// `GET /visited/` returns either `[...]` or `{"visited_locations": [...]}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum VisitedList {
    Bare(Vec<VisitedLocation>),
    Wrapped {
        visited_locations: Vec<VisitedLocation>,
    },
}

impl VisitedList {
    #[must_use]
    pub fn into_vec(self) -> Vec<VisitedLocation> {
        match self {
            VisitedList::Bare(v) | VisitedList::Wrapped { visited_locations: v } => v,
        }
    }
}

/// Sets `is_visited` on every recommendation that appears in `visited`.
pub fn merge_visited(recs: &mut [RestaurantRecommendation], visited: &[VisitedLocation]) {
    for rec in recs.iter_mut() {
        rec.is_visited = visited.iter().any(|v| v.matches(rec));
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Accepts `3`, `3.0`, `"3"` or `" 3 "`; anything else becomes `None`.
fn lenient_rank<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrString>::deserialize(deserializer)?;
    Ok(match raw {
        Some(NumberOrString::Int(n)) => u32::try_from(n).ok(),
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Some(NumberOrString::Float(f)) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 => {
            Some(f as u32)
        }
        Some(NumberOrString::Text(s)) => s.trim().parse::<u32>().ok(),
        _ => None,
    })
}

/// Ids are strings on some endpoints and integers on others.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrString>::deserialize(deserializer)?;
    Ok(match raw {
        Some(NumberOrString::Int(n)) => Some(n.to_string()),
        Some(NumberOrString::Float(f)) => Some(f.to_string()),
        Some(NumberOrString::Text(s)) if !s.is_empty() => Some(s),
        _ => None,
    })
}

fn lenient_required_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_id(deserializer)?.ok_or_else(|| serde::de::Error::custom("missing visited id"))
}
