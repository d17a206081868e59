//! Food and dietary preferences collected by the wizard.
//!
//! Both dropdowns follow the same pattern: a fixed list of options, one of
//! which is a sentinel that unlocks a free-text field. [`Preference`] models
//! that as a sum type instead of comparing against the sentinel string.

use serde::{Deserialize, Serialize};

pub const FOOD_CUSTOM_SENTINEL: &str = "I'm picky I want...";
pub const DIET_CUSTOM_SENTINEL: &str = "I have!";

pub const FOOD_OPTIONS: &[&str] = &[
    "Surprise me, Choosee!",
    FOOD_CUSTOM_SENTINEL,
    "Mediterranean",
    "Greek",
    "Turkish",
    "Middle Eastern",
    "French",
    "Spanish",
    "Italian",
    "Chinese",
    "Japanese",
    "Korean",
    "Thai",
    "Vietnamese",
    "Indian",
    "Filipino",
    "American",
    "Mexican",
    "Brazilian",
    "Caribbean",
    "German",
    "BBQ",
    "Fast Food",
    "Seafood",
    "Desserts",
];

/// Dietary options paired with the blurb shown under each one.
pub const DIET_OPTIONS: &[(&str, &str)] = &[
    ("Not choosy atm!", ""),
    (DIET_CUSTOM_SENTINEL, ""),
    (
        "Vegetarian",
        "Excludes meat, but may include dairy and eggs.",
    ),
    (
        "Vegan",
        "Excludes all animal products including dairy and eggs.",
    ),
    (
        "Pescatarian",
        "Includes fish and seafood, but avoids other meats.",
    ),
    (
        "Flexitarian",
        "Primarily plant-based, but occasionally includes meat.",
    ),
    ("Gluten-Free", "Avoids gluten found in wheat, barley, and rye."),
    ("Keto", "High-fat, low-carb diet promoting fat burning."),
    (
        "Paleo",
        "Focuses on whole foods; excludes grains, dairy, and processed foods.",
    ),
    (
        "Halal",
        "Follows Islamic dietary laws; excludes pork and alcohol.",
    ),
    (
        "Kosher",
        "Follows Jewish dietary laws including meat and dairy separation.",
    ),
    (
        "Low FODMAP",
        "Limits certain carbs to reduce digestive symptoms like bloating.",
    ),
];

/// Which of the two preference dropdowns a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceKind {
    Food,
    Diet,
}

impl PreferenceKind {
    #[must_use]
    pub fn sentinel(self) -> &'static str {
        match self {
            PreferenceKind::Food => FOOD_CUSTOM_SENTINEL,
            PreferenceKind::Diet => DIET_CUSTOM_SENTINEL,
        }
    }

    /// Option shown before the user touches the dropdown.
    #[must_use]
    pub fn default_option(self) -> &'static str {
        match self {
            PreferenceKind::Food => FOOD_OPTIONS[0],
            PreferenceKind::Diet => DIET_OPTIONS[0].0,
        }
    }

    #[must_use]
    pub fn is_option(self, value: &str) -> bool {
        match self {
            PreferenceKind::Food => FOOD_OPTIONS.contains(&value),
            PreferenceKind::Diet => DIET_OPTIONS.iter().any(|(name, _)| *name == value),
        }
    }

    /// Description blurb for a dietary option; food options have none.
    #[must_use]
    pub fn description(self, option: &str) -> Option<&'static str> {
        match self {
            PreferenceKind::Food => None,
            PreferenceKind::Diet => DIET_OPTIONS
                .iter()
                .find(|(name, _)| *name == option)
                .map(|(_, desc)| *desc)
                .filter(|desc| !desc.is_empty()),
        }
    }
}

impl std::fmt::Display for PreferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreferenceKind::Food => write!(f, "food"),
            PreferenceKind::Diet => write!(f, "dietary"),
        }
    }
}

/// A dropdown choice: either one of the fixed options or free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Preference {
    Enumerated(String),
    Custom(String),
}

impl Preference {
    #[must_use]
    pub fn default_for(kind: PreferenceKind) -> Self {
        Preference::Enumerated(kind.default_option().to_string())
    }

    /// Interprets a dropdown selection (or a previously stored wire string).
    ///
    /// The sentinel opens an empty custom field; any value outside the option
    /// list is treated as text the user already typed.
    #[must_use]
    pub fn from_selection(kind: PreferenceKind, value: &str) -> Self {
        if value == kind.sentinel() {
            Preference::Custom(String::new())
        } else if kind.is_option(value) {
            Preference::Enumerated(value.to_string())
        } else {
            Preference::Custom(value.to_string())
        }
    }

    #[must_use]
    pub fn is_custom(&self) -> bool {
        matches!(self, Preference::Custom(_))
    }

    /// The string sent to the backend, or `None` when custom text is blank.
    #[must_use]
    pub fn resolved(&self) -> Option<&str> {
        match self {
            Preference::Enumerated(option) => Some(option.as_str()),
            Preference::Custom(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then_some(trimmed)
            }
        }
    }

    /// Label shown on the dropdown button: the option, or the sentinel when
    /// the custom field is open.
    #[must_use]
    pub fn button_label(&self, kind: PreferenceKind) -> &str {
        match self {
            Preference::Enumerated(option) => option.as_str(),
            Preference::Custom(_) => kind.sentinel(),
        }
    }
}
