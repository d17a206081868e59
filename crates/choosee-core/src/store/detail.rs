use crate::recommendation::RestaurantRecommendation;

pub const TOGGLE_FAILED_MESSAGE: &str = "Failed to update visited status. Please try again.";

/// The open restaurant detail view and its visited toggle.
///
/// `is_visited` only ever holds a value the backend returned; a failed toggle
/// leaves it untouched and sets `error` instead.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetailState {
    pub restaurant: Option<RestaurantRecommendation>,
    pub is_visited: bool,
    pub pending: bool,
    pub error: Option<String>,
}

impl DetailState {
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.restaurant.is_some()
    }

    pub(crate) fn open(&mut self, rec: RestaurantRecommendation) {
        self.is_visited = rec.is_visited;
        self.restaurant = Some(rec);
        self.pending = false;
        self.error = None;
    }

    pub(crate) fn close(&mut self) {
        *self = Self::default();
    }

    /// Label of the toggle button for the current status.
    #[must_use]
    pub fn toggle_label(&self) -> &'static str {
        if self.pending {
            "Updating..."
        } else if self.is_visited {
            "Remove from Visited"
        } else {
            "Mark as Visited"
        }
    }
}
