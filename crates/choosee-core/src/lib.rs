//! Domain types and pure state transitions for the Choosee client.
//!
//! Nothing in this crate performs network I/O; `choosee-client` talks to the
//! backend and feeds results back through [`store::AppState::reduce`].

pub mod app_config;
pub mod auth;
pub mod config;
pub mod draft;
pub mod location;
pub mod preference;
pub mod presentation;
pub mod recommendation;
pub mod store;
pub mod suggestion;
pub mod wizard;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use auth::{RegisterForm, RegistrationError, TokenPair, User};
pub use config::{load_app_config, load_app_config_from_env};
pub use draft::{Coords, PreferenceDraft, SearchPreferences, SearchRequest};
pub use location::{LocationSource, PlaceSuggestion};
pub use preference::{Preference, PreferenceKind};
pub use recommendation::{
    RecommendationKey, RestaurantRecommendation, SearchResponse, VisitedLocation,
};
pub use store::{Action, AppState, Overlay, Route};
pub use suggestion::{SaveOutcome, SavedSuggestion};
pub use wizard::{ValidationError, Wizard, WizardAction, WizardStep};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("missing {0}; go back and complete the wizard")]
    IncompleteDraft(&'static str),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
