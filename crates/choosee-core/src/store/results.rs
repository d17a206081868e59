use crate::draft::Coords;
use crate::recommendation::{merge_visited, RecommendationKey, RestaurantRecommendation, VisitedLocation};

pub const RECENTLY_VIEWED_LIMIT: usize = 10;

/// Monotonic tag identifying one recommendation fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct RequestTag(pub u64);

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultsState {
    pub center: Option<Coords>,
    pub recommendations: Vec<RestaurantRecommendation>,
    pub visited: Vec<VisitedLocation>,
    pub loading: bool,
    pub error: Option<String>,
    latest: RequestTag,
}

impl ResultsState {
    /// Tag of the most recently started fetch; only its completion is applied.
    #[must_use]
    pub fn latest_tag(&self) -> RequestTag {
        self.latest
    }

    pub(crate) fn start(&mut self, center: Coords) -> RequestTag {
        self.latest = RequestTag(self.latest.0 + 1);
        self.center = Some(center);
        self.recommendations.clear();
        self.error = None;
        self.loading = true;
        self.latest
    }

    /// Returns `false` when the completion belongs to a superseded fetch.
    pub(crate) fn succeed(&mut self, tag: RequestTag, mut recs: Vec<RestaurantRecommendation>) -> bool {
        if tag != self.latest {
            return false;
        }
        merge_visited(&mut recs, &self.visited);
        self.recommendations = recs;
        self.loading = false;
        true
    }

    pub(crate) fn fail(&mut self, tag: RequestTag, message: String) -> bool {
        if tag != self.latest {
            return false;
        }
        self.error = Some(message);
        self.loading = false;
        true
    }

    /// Rejects the current draft. Bumps the tag so a fetch still in flight
    /// cannot overwrite the rejection.
    pub(crate) fn reject(&mut self, message: String) {
        self.latest = RequestTag(self.latest.0 + 1);
        self.error = Some(message);
        self.loading = false;
    }

    /// Keeps the visited list in step with a toggle the backend confirmed,
    /// so later merges do not resurrect the old status.
    pub(crate) fn record_toggle(&mut self, rec: &RestaurantRecommendation, is_visited: bool) {
        let known = self.visited.iter().any(|v| v.matches(rec));
        if is_visited && !known {
            self.visited.push(VisitedLocation::from(rec));
        } else if !is_visited {
            self.visited.retain(|v| !v.matches(rec));
        }
    }

    pub(crate) fn set_visited(&mut self, visited: Vec<VisitedLocation>) {
        self.visited = visited;
        merge_visited(&mut self.recommendations, &self.visited);
    }

    pub(crate) fn mark_visited(&mut self, key: &RecommendationKey, is_visited: bool) {
        for rec in &mut self.recommendations {
            if &rec.key() == key {
                rec.is_visited = is_visited;
            }
        }
    }

    #[must_use]
    pub fn find(&self, key: &RecommendationKey) -> Option<&RestaurantRecommendation> {
        self.recommendations.iter().find(|r| &r.key() == key)
    }
}

/// Places the user opened in this session, newest first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecentlyViewed {
    items: Vec<RestaurantRecommendation>,
}

impl RecentlyViewed {
    pub(crate) fn push(&mut self, rec: RestaurantRecommendation) {
        let key = rec.key();
        if self.items.iter().any(|r| r.key() == key) {
            return;
        }
        self.items.insert(0, rec);
        self.items.truncate(RECENTLY_VIEWED_LIMIT);
    }

    #[must_use]
    pub fn items(&self) -> &[RestaurantRecommendation] {
        &self.items
    }
}
