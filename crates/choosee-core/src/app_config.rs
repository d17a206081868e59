use std::path::PathBuf;

use crate::draft::Coords;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub api_base_url: String,
    pub log_level: String,
    /// Directory holding the persisted tokens, user, and wizard draft.
    pub state_dir: PathBuf,
    /// `None` leaves requests without a timeout.
    pub request_timeout_secs: Option<u64>,
    pub user_agent: String,
    pub google_maps_api_key: Option<String>,
    pub places_base_url: String,
    pub geocode_base_url: String,
    /// Where the place search and map start before a location is chosen.
    pub default_center: Coords,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("api_base_url", &self.api_base_url)
            .field("log_level", &self.log_level)
            .field("state_dir", &self.state_dir)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field(
                "google_maps_api_key",
                &self.google_maps_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("places_base_url", &self.places_base_url)
            .field("geocode_base_url", &self.geocode_base_url)
            .field("default_center", &self.default_center)
            .finish()
    }
}
