//! Preference wizard driven from command-line flags.
//!
//! Each flag feeds the same actions the interactive wizard dispatches, and
//! `Next` is applied once per step. A step that fails validation stops the
//! run with its notice, leaving the stored draft untouched.

use choosee_client::{ChooseeClient, PlacesClient};
use choosee_core::preference::{DIET_OPTIONS, FOOD_OPTIONS};
use choosee_core::store::{Action, AppState, Route};
use choosee_core::{AppConfig, Coords, PreferenceKind, WizardAction};
use clap::Args;

use crate::places::print_suggestions;
use crate::restore_state;

#[derive(Debug, Args)]
pub struct WizardArgs {
    /// Maximum price per person (0-1000)
    #[arg(long)]
    pub max_price: Option<u32>,
    /// Food option (see --options); any other text is used as a custom preference
    #[arg(long)]
    pub food: Option<String>,
    /// Custom food preference text
    #[arg(long)]
    pub food_custom: Option<String>,
    /// Dietary option (see --options); any other text is used as a custom preference
    #[arg(long)]
    pub diet: Option<String>,
    /// Custom dietary preference text
    #[arg(long)]
    pub diet_custom: Option<String>,
    /// Search from the configured default location
    #[arg(long, conflicts_with_all = ["lat", "search"])]
    pub here: bool,
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,
    /// Treat --lat/--lng as a dropped pin and look up what is there
    #[arg(long, requires = "lat")]
    pub pin: bool,
    /// Search for the location by name
    #[arg(long, conflicts_with = "lat")]
    pub search: Option<String>,
    /// Which search result to use (starting at 1)
    #[arg(long, default_value_t = 1)]
    pub pick: usize,
    /// Start over from the default preferences
    #[arg(long)]
    pub reset: bool,
    /// List the food and dietary options and exit
    #[arg(long)]
    pub options: bool,
}

pub(crate) async fn run_wizard(
    client: &ChooseeClient,
    config: &AppConfig,
    args: &WizardArgs,
) -> anyhow::Result<()> {
    if args.options {
        print_options();
        return Ok(());
    }

    let session = client.session();
    let mut state = restore_state(session)?;
    if args.reset {
        state = dispatch(state, WizardAction::Reset);
    }
    state = state.reduce(Action::Navigate(Route::Wizard));

    if let Some(price) = args.max_price {
        state = dispatch(state, WizardAction::SetMaxPrice(price));
    }
    state = next(state)?;

    for action in preference_actions(
        PreferenceKind::Food,
        args.food.as_deref(),
        args.food_custom.as_deref(),
    ) {
        state = dispatch(state, action);
    }
    state = next(state)?;

    for action in preference_actions(
        PreferenceKind::Diet,
        args.diet.as_deref(),
        args.diet_custom.as_deref(),
    ) {
        state = dispatch(state, action);
    }
    state = next(state)?;

    state = choose_location(state, config, args).await?;
    state = next(state)?;

    session.save_draft(&state.wizard.draft)?;
    tracing::info!(route = state.route.path(), "preferences saved");

    let draft = &state.wizard.draft;
    println!("{}", state.wizard.step.title());
    println!("  max price: {}", draft.max_price);
    println!(
        "  food:      {}",
        draft.food_preference.button_label(PreferenceKind::Food)
    );
    println!(
        "  diet:      {}",
        draft.dietary_preference.button_label(PreferenceKind::Diet)
    );
    if let Some(location) = draft.location {
        println!("  location:  {location}");
    }
    println!("run `choosee recommend` to see restaurants");
    Ok(())
}

fn dispatch(state: AppState, action: WizardAction) -> AppState {
    state.reduce(Action::Wizard(action))
}

fn next(state: AppState) -> anyhow::Result<AppState> {
    let step = state.wizard.step;
    let state = dispatch(state, WizardAction::Next);
    if let Some(notice) = state.wizard.notice {
        anyhow::bail!("step {} ({}): {notice}", step.number(), step.title());
    }
    tracing::debug!(step = step.number(), "wizard step completed");
    Ok(state)
}

/// Actions that set one preference from an option and optional custom text.
///
/// Custom text alone selects the custom sentinel first so the text is kept.
fn preference_actions(
    kind: PreferenceKind,
    option: Option<&str>,
    custom: Option<&str>,
) -> Vec<WizardAction> {
    let mut actions = Vec::new();
    match (option, custom) {
        (Some(option), _) => actions.push(WizardAction::SelectOption(kind, option.to_string())),
        (None, Some(_)) => {
            actions.push(WizardAction::SelectOption(kind, kind.sentinel().to_string()));
        }
        (None, None) => {}
    }
    if let Some(text) = custom {
        actions.push(WizardAction::EditCustomText(kind, text.to_string()));
    }
    actions
}

async fn choose_location(
    mut state: AppState,
    config: &AppConfig,
    args: &WizardArgs,
) -> anyhow::Result<AppState> {
    if args.here {
        return Ok(dispatch(
            state,
            WizardAction::UseDeviceLocation(config.default_center),
        ));
    }

    if let (Some(lat), Some(lng)) = (args.lat, args.lng) {
        let coords = Coords::new(lat, lng);
        if !coords.is_valid() {
            anyhow::bail!("coordinates out of range: {coords}");
        }
        if !args.pin {
            return Ok(dispatch(state, WizardAction::UseDeviceLocation(coords)));
        }

        state = dispatch(state, WizardAction::DropPin(coords));
        match PlacesClient::new(config) {
            Ok(places) => match places.reverse_geocode(coords).await {
                Ok(Some(place)) => {
                    println!("pinned {} ({})", place.main_text, place.secondary_text);
                    state = dispatch(state, WizardAction::PinResolved(place));
                }
                Ok(None) => println!("pinned {coords}"),
                Err(e) => tracing::warn!(error = %e, "reverse geocode failed"),
            },
            Err(e) => tracing::debug!(error = %e, "skipping pin lookup"),
        }
        return Ok(state);
    }

    if let Some(query) = &args.search {
        let places = PlacesClient::new(config)?;
        state = dispatch(state, WizardAction::SearchQueryChanged(query.clone()));
        let results = places.search_text(query).await?;
        state = dispatch(
            state,
            WizardAction::SuggestionsLoaded {
                query: query.clone(),
                results,
            },
        );

        let suggestions = &state.wizard.picker.suggestions;
        if suggestions.is_empty() {
            anyhow::bail!("no places found for '{}'", query.trim());
        }
        print_suggestions(suggestions);
        let picked = args
            .pick
            .checked_sub(1)
            .and_then(|i| suggestions.get(i))
            .cloned()
            .ok_or_else(|| {
                anyhow::anyhow!("--pick {} is out of range (1-{})", args.pick, suggestions.len())
            })?;
        println!("using {}", picked.main_text);
        state = dispatch(state, WizardAction::SelectSuggestion(picked));
    }

    Ok(state)
}

fn print_options() {
    println!("food options:");
    for option in FOOD_OPTIONS {
        println!("  {option}");
    }
    println!();
    println!("dietary options:");
    for (name, description) in DIET_OPTIONS {
        println!("  {name:<20}{description}");
    }
}
