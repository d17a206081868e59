//! Typed application state with a pure reducer.
//!
//! Views hold an [`AppState`], dispatch [`Action`]s through
//! [`AppState::reduce`], and perform network calls themselves, reporting the
//! outcome back as further actions. Nothing here performs I/O.

mod detail;
mod results;

pub use detail::{DetailState, TOGGLE_FAILED_MESSAGE};
pub use results::{RecentlyViewed, RequestTag, ResultsState, RECENTLY_VIEWED_LIMIT};

use crate::auth::User;
use crate::draft::Coords;
use crate::recommendation::{RecommendationKey, RestaurantRecommendation, VisitedLocation};
use crate::suggestion::SavedSuggestion;
use crate::wizard::{Wizard, WizardAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Start,
    Wizard,
    Dashboard,
    Login,
    Register,
}

impl Route {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Route::Start => "/",
            Route::Wizard => "/startingWizard",
            Route::Dashboard => "/dashboard",
            Route::Login => "/login",
            Route::Register => "/register",
        }
    }
}

/// Which side panel the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    Restaurants,
    RecentlyViewed,
    PreviousPrompts,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Navigate(Route),
    Wizard(WizardAction),

    SessionRestored { has_access_token: bool, user: Option<User> },
    LoginStarted,
    LoginSucceeded(Option<User>),
    LoginFailed(String),
    UserLoaded(User),
    LoggedOut,
    /// Refresh failed on a protected call; credentials are already cleared.
    SessionExpired,

    FetchStarted { center: Coords },
    FetchSucceeded { tag: RequestTag, recommendations: Vec<RestaurantRecommendation> },
    FetchFailed { tag: RequestTag, message: String },
    /// The stored draft cannot produce a request; reported without a fetch.
    DraftRejected(String),
    VisitedLoaded(Vec<VisitedLocation>),
    SavedSuggestionSelected(SavedSuggestion),

    SetOverlay(Overlay),
    ToggleOverlay,
    Select(RecommendationKey),
    SelectVisited(VisitedLocation),
    CloseDetail,
    VisitedChecked { key: RecommendationKey, is_visited: bool },
    ToggleStarted,
    ToggleSucceeded { key: RecommendationKey, is_visited: bool },
    ToggleFailed { key: RecommendationKey },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub route: Route,
    pub auth: AuthState,
    pub wizard: Wizard,
    pub results: ResultsState,
    pub detail: DetailState,
    pub recent: RecentlyViewed,
    pub overlay: Overlay,
    pub overlay_visible: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            route: Route::Start,
            auth: AuthState::default(),
            wizard: Wizard::new(),
            results: ResultsState::default(),
            detail: DetailState::default(),
            recent: RecentlyViewed::default(),
            overlay: Overlay::default(),
            overlay_visible: true,
        }
    }
}

impl AppState {
    /// The visited toggle is only offered to signed-in users.
    #[must_use]
    pub fn can_toggle_visited(&self) -> bool {
        self.auth.is_authenticated && self.detail.is_open()
    }

    fn detail_key(&self) -> Option<RecommendationKey> {
        self.detail.restaurant.as_ref().map(RestaurantRecommendation::key)
    }

    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub fn reduce(mut self, action: Action) -> Self {
        match action {
            Action::Navigate(route) => self.route = route,
            Action::Wizard(wizard_action) => {
                self.wizard = self.wizard.reduce(wizard_action);
                if self.wizard.is_submitted() {
                    self.route = Route::Dashboard;
                }
            }

            Action::SessionRestored {
                has_access_token,
                user,
            } => {
                self.auth.is_authenticated = has_access_token;
                self.auth.user = user;
            }
            Action::LoginStarted => {
                self.auth.loading = true;
                self.auth.error = None;
            }
            Action::LoginSucceeded(user) => {
                self.auth = AuthState {
                    user,
                    is_authenticated: true,
                    loading: false,
                    error: None,
                };
                self.route = Route::Dashboard;
            }
            Action::LoginFailed(message) => {
                self.auth.loading = false;
                self.auth.error = Some(message);
            }
            Action::UserLoaded(user) => self.auth.user = Some(user),
            Action::LoggedOut | Action::SessionExpired => {
                self.auth = AuthState::default();
                self.detail.close();
                self.results.set_visited(Vec::new());
                self.route = Route::Login;
            }

            Action::FetchStarted { center } => {
                self.results.start(center);
                self.detail.close();
            }
            Action::FetchSucceeded {
                tag,
                recommendations,
            } => {
                self.results.succeed(tag, recommendations);
            }
            Action::FetchFailed { tag, message } => {
                self.results.fail(tag, message);
            }
            Action::DraftRejected(message) => self.results.reject(message),
            Action::VisitedLoaded(visited) => self.results.set_visited(visited),
            Action::SavedSuggestionSelected(saved) => {
                let center = saved.center();
                self.wizard = Wizard::from_draft(saved.to_draft());
                let tag = self.results.start(center);
                self.results.succeed(tag, saved.locations);
                self.detail.close();
                self.overlay = Overlay::Restaurants;
            }

            Action::SetOverlay(overlay) => self.overlay = overlay,
            Action::ToggleOverlay => {
                self.overlay_visible = !self.overlay_visible;
                self.detail.close();
            }
            Action::Select(key) => {
                if let Some(rec) = self.results.find(&key).cloned() {
                    self.recent.push(rec.clone());
                    self.detail.open(rec);
                }
            }
            Action::SelectVisited(visited) => self.detail.open(visited.to_recommendation()),
            Action::CloseDetail => self.detail.close(),
            Action::VisitedChecked { key, is_visited } => {
                if self.detail_key() == Some(key) {
                    self.detail.is_visited = is_visited;
                }
            }
            Action::ToggleStarted => {
                if self.can_toggle_visited() {
                    self.detail.pending = true;
                    self.detail.error = None;
                }
            }
            Action::ToggleSucceeded { key, is_visited } => {
                let toggled = self
                    .results
                    .find(&key)
                    .or(self.detail.restaurant.as_ref().filter(|r| r.key() == key))
                    .cloned();
                if let Some(rec) = toggled {
                    self.results.record_toggle(&rec, is_visited);
                }
                self.results.mark_visited(&key, is_visited);
                if self.detail_key() == Some(key) {
                    self.detail.is_visited = is_visited;
                    self.detail.pending = false;
                }
            }
            Action::ToggleFailed { key } => {
                if self.detail_key() == Some(key) {
                    self.detail.pending = false;
                    self.detail.error = Some(TOGGLE_FAILED_MESSAGE.to_string());
                }
            }
        }
        self
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
