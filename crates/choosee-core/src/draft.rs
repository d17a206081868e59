use serde::{Deserialize, Serialize};

use crate::preference::{Preference, PreferenceKind};
use crate::CoreError;

pub const MAX_PRICE_LIMIT: u16 = 1000;
pub const DEFAULT_MAX_PRICE: u16 = 75;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

impl std::fmt::Display for Coords {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}

/// The in-progress preference record collected by the wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceDraft {
    pub max_price: u16,
    pub food_preference: Preference,
    pub dietary_preference: Preference,
    pub location_enabled: bool,
    pub location: Option<Coords>,
    pub wizard_completed: bool,
}

impl Default for PreferenceDraft {
    fn default() -> Self {
        Self {
            max_price: DEFAULT_MAX_PRICE,
            food_preference: Preference::default_for(PreferenceKind::Food),
            dietary_preference: Preference::default_for(PreferenceKind::Diet),
            location_enabled: false,
            location: None,
            wizard_completed: false,
        }
    }
}

impl PreferenceDraft {
    /// Sets the budget, clamped to the slider bounds.
    pub fn set_max_price(&mut self, value: u32) {
        self.max_price = u16::try_from(value.min(u32::from(MAX_PRICE_LIMIT))).unwrap_or(MAX_PRICE_LIMIT);
    }

    #[must_use]
    pub fn preference(&self, kind: PreferenceKind) -> &Preference {
        match kind {
            PreferenceKind::Food => &self.food_preference,
            PreferenceKind::Diet => &self.dietary_preference,
        }
    }

    pub fn preference_mut(&mut self, kind: PreferenceKind) -> &mut Preference {
        match kind {
            PreferenceKind::Food => &mut self.food_preference,
            PreferenceKind::Diet => &mut self.dietary_preference,
        }
    }

    /// Builds the `search_places` request body.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::IncompleteDraft`] when the location is missing or
    /// a custom preference was left blank, so the caller can report the
    /// specific gap instead of a generic network failure.
    pub fn to_search_request(&self) -> Result<SearchRequest, CoreError> {
        let location = self.location.ok_or(CoreError::IncompleteDraft("location"))?;
        let food = self
            .food_preference
            .resolved()
            .ok_or(CoreError::IncompleteDraft("food preference"))?;
        let diet = self
            .dietary_preference
            .resolved()
            .ok_or(CoreError::IncompleteDraft("dietary preference"))?;

        Ok(SearchRequest {
            lat: location.lat,
            lng: location.lng,
            preferences: SearchPreferences {
                food_preference: food.to_string(),
                dietary_preference: diet.to_string(),
                max_price: self.max_price,
            },
        })
    }
}

/// Body of `POST /maps/search_places/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub lat: f64,
    pub lng: f64,
    pub preferences: SearchPreferences,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPreferences {
    pub food_preference: String,
    pub dietary_preference: String,
    pub max_price: u16,
}

impl SearchRequest {
    #[must_use]
    pub fn center(&self) -> Coords {
        Coords::new(self.lat, self.lng)
    }
}
