//! Marker and list view-models for the results map.
//!
//! The map library itself is an external collaborator; this module only
//! decides what each marker looks like.

use crate::draft::Coords;
use crate::recommendation::RestaurantRecommendation;

pub const COLOR_DEFAULT: &str = "#E26F43";
pub const COLOR_TOP_RATED: &str = "#4CAF50";
pub const COLOR_VISITED: &str = "#4CAF50";
pub const COLOR_PREMIUM: &str = "#9C27B0";
pub const COLOR_USER_LOCATION: &str = "#4285F4";

const TOP_RATED_THRESHOLD: f64 = 4.5;
const PREMIUM_PRICE_LEVEL: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewport {
    Desktop,
    Mobile,
}

impl Viewport {
    /// Layouts narrower than 768px use the mobile presentation.
    #[must_use]
    pub fn from_width(width_px: u32) -> Self {
        if width_px < 768 {
            Viewport::Mobile
        } else {
            Viewport::Desktop
        }
    }

    #[must_use]
    pub fn base_scale(self) -> f64 {
        match self {
            Viewport::Desktop => 10.0,
            Viewport::Mobile => 8.0,
        }
    }

    fn ranked_scale_top(self) -> f64 {
        match self {
            Viewport::Desktop => 14.0,
            Viewport::Mobile => 12.0,
        }
    }

    #[must_use]
    pub fn initial_zoom(self) -> u8 {
        match self {
            Viewport::Desktop => 15,
            Viewport::Mobile => 14,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Coords,
    pub title: String,
    pub label: String,
    pub color: &'static str,
    pub scale: f64,
}

#[must_use]
pub fn marker_color(rec: &RestaurantRecommendation) -> &'static str {
    if rec.is_visited {
        COLOR_VISITED
    } else if rec.rating.is_some_and(|r| r >= TOP_RATED_THRESHOLD) {
        COLOR_TOP_RATED
    } else if rec.price_level.is_some_and(|p| p >= PREMIUM_PRICE_LEVEL) {
        COLOR_PREMIUM
    } else {
        COLOR_DEFAULT
    }
}

/// `"V"` for visited places, otherwise the rank, otherwise nothing.
#[must_use]
pub fn marker_label(rec: &RestaurantRecommendation) -> String {
    if rec.is_visited {
        "V".to_string()
    } else {
        rec.rank.map(|r| r.to_string()).unwrap_or_default()
    }
}

/// Higher-ranked places get larger markers, never below the base size.
#[must_use]
pub fn marker_scale(rec: &RestaurantRecommendation, viewport: Viewport) -> f64 {
    let base = viewport.base_scale();
    match rec.rank {
        Some(rank) if rank > 0 => base.max(viewport.ranked_scale_top() - f64::from(rank) * 0.5),
        _ => base,
    }
}

#[must_use]
pub fn markers(recs: &[RestaurantRecommendation], viewport: Viewport) -> Vec<Marker> {
    recs.iter()
        .map(|rec| Marker {
            position: rec.coords(),
            title: rec.name.clone(),
            label: marker_label(rec),
            color: marker_color(rec),
            scale: marker_scale(rec, viewport),
        })
        .collect()
}

/// Marker for the searched-from location.
#[must_use]
pub fn user_marker(center: Coords, viewport: Viewport) -> Marker {
    Marker {
        position: center,
        title: "Your location".to_string(),
        label: String::new(),
        color: COLOR_USER_LOCATION,
        scale: viewport.base_scale(),
    }
}

/// One row of the restaurant list overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub name: String,
    pub rating: String,
    pub cuisine: Option<String>,
    pub visited: bool,
}

#[must_use]
pub fn list_items(recs: &[RestaurantRecommendation]) -> Vec<ListItem> {
    recs.iter()
        .map(|rec| ListItem {
            name: rec.name.clone(),
            rating: rec
                .rating
                .map_or_else(|| "None".to_string(), |r| format!("{r:.1}")),
            cuisine: rec.primary_type(),
            visited: rec.is_visited,
        })
        .collect()
}

/// External map link for a coordinate pair.
#[must_use]
pub fn maps_link(coords: Coords) -> String {
    format!("https://www.google.com/maps?q={},{}", coords.lat, coords.lng)
}
