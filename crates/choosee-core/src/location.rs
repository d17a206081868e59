//! Location acquisition state for the last wizard step.
//!
//! Coordinates can come from the device, from a place-search suggestion, or
//! from a pin dropped on the map. Whichever path fires last owns the draft's
//! location; the others lose their selection state.

use serde::{Deserialize, Serialize};

use crate::draft::Coords;

/// A selectable place returned by text search or reverse geocoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSuggestion {
    pub place_id: String,
    pub main_text: String,
    pub secondary_text: String,
    pub coords: Coords,
}

/// Which acquisition path supplied the current coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationSource {
    Device,
    Suggestion(String),
    Pin,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationPicker {
    pub search_query: String,
    pub suggestions: Vec<PlaceSuggestion>,
    pub selected: Option<PlaceSuggestion>,
    pub pin: Option<Coords>,
    /// Reverse-geocoded label for the dropped pin, listed above the search
    /// results until the user types again.
    pub pin_suggestion: Option<PlaceSuggestion>,
    pub source: Option<LocationSource>,
}

impl LocationPicker {
    pub(crate) fn use_device(&mut self) {
        self.selected = None;
        self.pin = None;
        self.pin_suggestion = None;
        self.source = Some(LocationSource::Device);
    }

    /// Selects a suggestion, or deselects it when it is already selected.
    ///
    /// Returns the coordinates the draft should now hold: `Some` for a new
    /// selection, `None` when the deselected suggestion owned the location,
    /// and the unchanged `current` otherwise.
    pub(crate) fn toggle_suggestion(
        &mut self,
        suggestion: PlaceSuggestion,
        current: Option<Coords>,
    ) -> Option<Coords> {
        let already_selected = self
            .selected
            .as_ref()
            .is_some_and(|s| s.place_id == suggestion.place_id);

        if already_selected {
            self.selected = None;
            if self.source == Some(LocationSource::Suggestion(suggestion.place_id)) {
                self.source = None;
                return None;
            }
            return current;
        }

        let coords = suggestion.coords;
        self.source = Some(LocationSource::Suggestion(suggestion.place_id.clone()));
        self.selected = Some(suggestion);
        self.pin = None;
        Some(coords)
    }

    pub(crate) fn drop_pin(&mut self, coords: Coords) {
        self.selected = None;
        self.pin = Some(coords);
        self.pin_suggestion = None;
        self.source = Some(LocationSource::Pin);
    }

    pub(crate) fn pin_resolved(&mut self, suggestion: PlaceSuggestion) {
        if self.pin.is_some() && self.selected.is_none() {
            self.pin_suggestion = Some(suggestion);
        }
    }

    pub(crate) fn set_query(&mut self, query: String) {
        if query.trim().is_empty() {
            self.suggestions.clear();
        }
        self.search_query = query;
        self.pin_suggestion = None;
    }

    /// Applies search results only if they answer the current query.
    pub(crate) fn suggestions_loaded(&mut self, query: &str, results: Vec<PlaceSuggestion>) {
        if query == self.search_query {
            self.suggestions = results;
        }
    }
}
