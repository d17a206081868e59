//! Saved suggestion bundles: a prompt plus the restaurants it produced.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::draft::{Coords, PreferenceDraft, SearchPreferences, SearchRequest};
use crate::preference::{Preference, PreferenceKind};
use crate::recommendation::RestaurantRecommendation;

/// Body of `POST /suggestions/save_suggestions/`.
#[derive(Debug, Clone, Serialize)]
pub struct SaveSuggestionRequest {
    pub lat: f64,
    pub lng: f64,
    pub preferences: SearchPreferences,
    pub restaurants: Vec<RestaurantRecommendation>,
}

impl SaveSuggestionRequest {
    #[must_use]
    pub fn new(search: &SearchRequest, restaurants: Vec<RestaurantRecommendation>) -> Self {
        Self {
            lat: search.lat,
            lng: search.lng,
            preferences: search.preferences.clone(),
            restaurants,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// The backend already holds an identical bundle (`DUPLICATE_SUGGESTION`).
    AlreadySaved,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SavedPrompt {
    pub lat: f64,
    pub lng: f64,
    pub food_preference: String,
    pub dietary_preference: String,
    #[serde(default, alias = "price")]
    pub max_price: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SavedSuggestion {
    pub id: serde_json::Value,
    #[serde(default)]
    pub date_created: Option<DateTime<Utc>>,
    pub prompt: SavedPrompt,
    #[serde(default)]
    pub locations: Vec<RestaurantRecommendation>,
}

impl SavedSuggestion {
    #[must_use]
    pub fn center(&self) -> Coords {
        Coords::new(self.prompt.lat, self.prompt.lng)
    }

    /// Rebuilds a submitted draft from the saved prompt so the results view
    /// can show it without walking the wizard again.
    #[must_use]
    pub fn to_draft(&self) -> PreferenceDraft {
        let mut draft = PreferenceDraft {
            food_preference: Preference::from_selection(
                PreferenceKind::Food,
                &self.prompt.food_preference,
            ),
            dietary_preference: Preference::from_selection(
                PreferenceKind::Diet,
                &self.prompt.dietary_preference,
            ),
            location_enabled: true,
            location: Some(self.center()),
            wizard_completed: true,
            ..PreferenceDraft::default()
        };
        if let Some(price) = self.prompt.max_price {
            draft.set_max_price(price);
        }
        draft
    }
}
