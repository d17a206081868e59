//! Recommendation fetch cycle and the map/list rendering of its results.

use choosee_client::{ChooseeClient, ClientError};
use choosee_core::presentation::{self, Viewport};
use choosee_core::store::{Action, AppState};
use choosee_core::{RecommendationKey, RestaurantRecommendation};

use crate::restore_state;

/// Runs one fetch cycle for the stored draft.
///
/// Visited places are loaded first for signed-in users so the results come
/// back already marked. An incomplete draft is rejected without a request.
///
/// # Errors
///
/// Returns an error when no preferences are stored or the session expired
/// mid-cycle (stored credentials are cleared by the client in that case).
pub(crate) async fn fetch_recommendations(
    client: &ChooseeClient,
    state: AppState,
) -> anyhow::Result<AppState> {
    if !state.wizard.draft.wizard_completed {
        anyhow::bail!("no saved preferences; run `choosee wizard` first");
    }

    let search = match state.wizard.draft.to_search_request() {
        Ok(search) => search,
        Err(e) => return Ok(state.reduce(Action::DraftRejected(e.to_string()))),
    };

    let mut state = state.reduce(Action::FetchStarted {
        center: search.center(),
    });
    let tag = state.results.latest_tag();

    if state.auth.is_authenticated {
        match client.visited_locations().await {
            Ok(visited) => state = state.reduce(Action::VisitedLoaded(visited)),
            Err(e) if e.is_session_expired() => return Err(session_expired(state)),
            Err(e) => tracing::warn!(error = %e, "failed to load visited places"),
        }
    }

    let state = match client.search_places(&search).await {
        Ok(recommendations) => state.reduce(Action::FetchSucceeded {
            tag,
            recommendations,
        }),
        Err(e) if e.is_session_expired() => return Err(session_expired(state)),
        Err(e) => {
            tracing::warn!(error = %e, "recommendation fetch failed");
            state.reduce(Action::FetchFailed {
                tag,
                message: e.user_message(),
            })
        }
    };
    Ok(state)
}

/// Applies `SessionExpired` and reports where the user was sent.
pub(crate) fn session_expired(state: AppState) -> anyhow::Error {
    let state = state.reduce(Action::SessionExpired);
    anyhow::anyhow!(
        "{}; run `choosee login` ({})",
        ClientError::SessionExpired,
        state.route.path()
    )
}

/// Finds a result by name, ignoring case.
pub(crate) fn find_by_name(
    recs: &[RestaurantRecommendation],
    name: &str,
) -> Option<RecommendationKey> {
    let name = name.trim();
    recs.iter()
        .find(|r| r.name.eq_ignore_ascii_case(name))
        .map(RestaurantRecommendation::key)
}

pub(crate) async fn run_recommend(
    client: &ChooseeClient,
    mobile: bool,
    open: Option<&str>,
) -> anyhow::Result<()> {
    let state = restore_state(client.session())?;
    let mut state = fetch_recommendations(client, state).await?;

    let viewport = if mobile {
        Viewport::Mobile
    } else {
        Viewport::Desktop
    };
    render_results(&state, viewport)?;

    if let Some(name) = open {
        let key = find_by_name(&state.results.recommendations, name)
            .ok_or_else(|| anyhow::anyhow!("no restaurant named '{name}' in these results"))?;
        state = state.reduce(Action::Select(key.clone()));

        if state.auth.is_authenticated {
            if let Some(rec) = state.detail.restaurant.clone() {
                match client.check_visited(&rec).await {
                    Ok(is_visited) => {
                        state = state.reduce(Action::VisitedChecked { key, is_visited });
                    }
                    Err(e) if e.is_session_expired() => return Err(session_expired(state)),
                    Err(e) => tracing::warn!(error = %e, "visited check failed"),
                }
            }
        }
        println!();
        render_detail(&state);
    }

    Ok(())
}

/// Prints the map markers and the list overlay for the current results.
///
/// # Errors
///
/// Returns the fetch error message when the cycle failed.
pub(crate) fn render_results(state: &AppState, viewport: Viewport) -> anyhow::Result<()> {
    if let Some(error) = &state.results.error {
        anyhow::bail!("{error}");
    }

    if let Some(center) = state.results.center {
        let you = presentation::user_marker(center, viewport);
        println!(
            "{} at {} (zoom {}) {}",
            you.title,
            center,
            viewport.initial_zoom(),
            presentation::maps_link(center)
        );
    }

    let recs = &state.results.recommendations;
    if recs.is_empty() {
        println!("no restaurants matched these preferences");
        return Ok(());
    }

    println!();
    let header = format!(
        "{:<4}{:<32}{:<8}{:<22}{:<10}{:<7}VISITED",
        "#", "NAME", "RATING", "CUISINE", "COLOR", "SCALE"
    );
    println!("{header}");
    let markers = presentation::markers(recs, viewport);
    let items = presentation::list_items(recs);
    for (marker, item) in markers.iter().zip(&items) {
        println!(
            "{:<4}{:<32}{:<8}{:<22}{:<10}{:<7.2}{}",
            marker.label,
            truncate(&item.name, 30),
            item.rating,
            item.cuisine.as_deref().unwrap_or("-"),
            marker.color,
            marker.scale,
            if item.visited { "yes" } else { "" }
        );
    }
    Ok(())
}

pub(crate) fn render_detail(state: &AppState) {
    let Some(rec) = &state.detail.restaurant else {
        return;
    };
    println!("{}", rec.name);
    println!("{}", rec.address);
    if let Some(rating) = rec.rating {
        let total = rec.user_ratings_total.unwrap_or(0);
        println!("rating {rating:.1} ({total} reviews)");
    }
    if let Some(level) = rec.price_level {
        println!("price {}", "$".repeat(usize::from(level.max(1))));
    }
    if let Some(description) = &rec.description {
        println!("{description}");
    }
    if let Some(reason) = &rec.recommendation_reason {
        println!("why: {reason}");
    }
    println!("{}", presentation::maps_link(rec.coords()));
    if state.can_toggle_visited() {
        let status = if state.detail.is_visited {
            "visited"
        } else {
            "not visited"
        };
        println!("{status} [{}]", state.detail.toggle_label());
    }
    if let Some(error) = &state.detail.error {
        println!("{error}");
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars - 3).collect::<String>())
    } else {
        text.to_string()
    }
}
