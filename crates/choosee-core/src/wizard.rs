//! The four-step preference wizard as a pure state machine.
//!
//! [`Wizard::reduce`] consumes the current state and one [`WizardAction`] and
//! returns the next state. Steps are strictly linear; `Next` only advances
//! after the current step validates.

use thiserror::Error;

use crate::draft::{Coords, PreferenceDraft};
use crate::location::{LocationPicker, PlaceSuggestion};
use crate::preference::{Preference, PreferenceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Budget,
    Food,
    Diet,
    Location,
    Submitted,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Budget,
        WizardStep::Food,
        WizardStep::Diet,
        WizardStep::Location,
    ];

    /// One-based position shown in the step indicator. `Submitted` is 5.
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            WizardStep::Budget => 1,
            WizardStep::Food => 2,
            WizardStep::Diet => 3,
            WizardStep::Location => 4,
            WizardStep::Submitted => 5,
        }
    }

    #[must_use]
    pub fn next(self) -> WizardStep {
        match self {
            WizardStep::Budget => WizardStep::Food,
            WizardStep::Food => WizardStep::Diet,
            WizardStep::Diet => WizardStep::Location,
            WizardStep::Location | WizardStep::Submitted => WizardStep::Submitted,
        }
    }

    /// Step reached by `Back`; `Budget` and `Submitted` stay put.
    #[must_use]
    pub fn previous(self) -> WizardStep {
        match self {
            WizardStep::Budget | WizardStep::Food => WizardStep::Budget,
            WizardStep::Diet => WizardStep::Food,
            WizardStep::Location => WizardStep::Diet,
            WizardStep::Submitted => WizardStep::Submitted,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Budget => "What's your price range?",
            WizardStep::Food => "What kind of food are you in the mood for?",
            WizardStep::Diet => "Any dietary preferences?",
            WizardStep::Location => "Where are you eating?",
            WizardStep::Submitted => "All set!",
        }
    }
}

/// Blocking notice raised when `Next` fails a step's validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please put in your food preferences!")]
    FoodPreferenceRequired,
    #[error("Please put in your dietary preferences!")]
    DietaryPreferenceRequired,
    #[error("Please choose your location!")]
    LocationRequired,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardAction {
    SetMaxPrice(u32),
    SelectOption(PreferenceKind, String),
    EditCustomText(PreferenceKind, String),
    ToggleLocationEnabled,
    UseDeviceLocation(Coords),
    SearchQueryChanged(String),
    SuggestionsLoaded {
        query: String,
        results: Vec<PlaceSuggestion>,
    },
    SelectSuggestion(PlaceSuggestion),
    DropPin(Coords),
    PinResolved(PlaceSuggestion),
    DismissNotice,
    Next,
    Back,
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Wizard {
    pub step: WizardStep,
    pub draft: PreferenceDraft,
    pub notice: Option<ValidationError>,
    pub picker: LocationPicker,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    #[must_use]
    pub fn new() -> Self {
        Self::from_draft(PreferenceDraft::default())
    }

    /// Starts the wizard over an existing draft, e.g. one rehydrated from a
    /// saved suggestion.
    #[must_use]
    pub fn from_draft(draft: PreferenceDraft) -> Self {
        Self {
            step: WizardStep::Budget,
            draft,
            notice: None,
            picker: LocationPicker::default(),
        }
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.step == WizardStep::Submitted
    }

    /// Filled dots of the step indicator.
    #[must_use]
    pub fn progress(&self) -> [bool; 4] {
        WizardStep::ALL.map(|s| s.number() <= self.step.number())
    }

    #[must_use]
    pub fn reduce(mut self, action: WizardAction) -> Self {
        match action {
            WizardAction::SetMaxPrice(value) => self.draft.set_max_price(value),
            WizardAction::SelectOption(kind, value) => {
                *self.draft.preference_mut(kind) = Preference::from_selection(kind, &value);
            }
            WizardAction::EditCustomText(kind, text) => {
                let pref = self.draft.preference_mut(kind);
                if pref.is_custom() {
                    *pref = Preference::Custom(text);
                }
            }
            WizardAction::ToggleLocationEnabled => {
                self.draft.location_enabled = !self.draft.location_enabled;
            }
            WizardAction::UseDeviceLocation(coords) => {
                self.picker.use_device();
                self.draft.location = Some(coords);
                self.draft.location_enabled = true;
            }
            WizardAction::SearchQueryChanged(query) => self.picker.set_query(query),
            WizardAction::SuggestionsLoaded { query, results } => {
                self.picker.suggestions_loaded(&query, results);
            }
            WizardAction::SelectSuggestion(suggestion) => {
                self.draft.location = self
                    .picker
                    .toggle_suggestion(suggestion, self.draft.location);
            }
            WizardAction::DropPin(coords) => {
                self.picker.drop_pin(coords);
                self.draft.location = Some(coords);
            }
            WizardAction::PinResolved(suggestion) => self.picker.pin_resolved(suggestion),
            WizardAction::DismissNotice => self.notice = None,
            WizardAction::Next => self.advance(),
            WizardAction::Back => {
                self.notice = None;
                self.step = self.step.previous();
            }
            WizardAction::Reset => return Self::new(),
        }
        self
    }

    fn advance(&mut self) {
        if self.step == WizardStep::Submitted {
            return;
        }
        if let Err(notice) = self.validate_step() {
            self.notice = Some(notice);
            return;
        }
        self.commit_custom_text();
        self.notice = None;
        self.step = self.step.next();
        if self.step == WizardStep::Submitted {
            self.draft.wizard_completed = true;
        }
    }

    fn validate_step(&self) -> Result<(), ValidationError> {
        match self.step {
            WizardStep::Food => {
                if self.draft.food_preference.resolved().is_none() {
                    return Err(ValidationError::FoodPreferenceRequired);
                }
            }
            WizardStep::Diet => {
                if self.draft.dietary_preference.resolved().is_none() {
                    return Err(ValidationError::DietaryPreferenceRequired);
                }
            }
            WizardStep::Location => {
                if self.draft.location.is_none() {
                    return Err(ValidationError::LocationRequired);
                }
            }
            WizardStep::Budget | WizardStep::Submitted => {}
        }
        Ok(())
    }

    fn commit_custom_text(&mut self) {
        let kind = match self.step {
            WizardStep::Food => PreferenceKind::Food,
            WizardStep::Diet => PreferenceKind::Diet,
            _ => return,
        };
        let pref = self.draft.preference_mut(kind);
        if let Preference::Custom(text) = pref {
            *text = text.trim().to_string();
        }
    }
}

#[cfg(test)]
#[path = "wizard_test.rs"]
mod tests;
