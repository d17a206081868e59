//! Visited-place command handlers.

use choosee_client::{ChooseeClient, ClientError};
use choosee_core::store::{Action, AppState};
use clap::Subcommand;

use crate::recommend::{fetch_recommendations, find_by_name, render_detail, session_expired};
use crate::restore_state;

/// Sub-commands available under `visited`.
#[derive(Debug, Subcommand)]
pub enum VisitedCommands {
    /// List the places you have marked as visited
    List,
    /// Show whether a restaurant is marked as visited
    Check {
        /// Restaurant name from the current results or the visited list
        name: String,
    },
    /// Mark a restaurant as visited, or unmark it
    Toggle {
        /// Restaurant name from the current results or the visited list
        name: String,
    },
}

pub(crate) async fn run_visited(
    client: &ChooseeClient,
    command: VisitedCommands,
) -> anyhow::Result<()> {
    match command {
        VisitedCommands::List => run_visited_list(client).await,
        VisitedCommands::Check { name } => run_visited_check(client, &name).await,
        VisitedCommands::Toggle { name } => run_visited_toggle(client, &name).await,
    }
}

async fn run_visited_list(client: &ChooseeClient) -> anyhow::Result<()> {
    let visited = match client.visited_locations().await {
        Ok(visited) => visited,
        Err(ClientError::NotAuthenticated) => {
            println!("not signed in; run `choosee login`");
            return Ok(());
        }
        Err(e) => anyhow::bail!("{}", e.user_message()),
    };

    if visited.is_empty() {
        println!("no visited places yet");
        return Ok(());
    }

    let header = format!("{:<32}{:<8}ADDRESS", "NAME", "RATING");
    println!("{header}");
    for place in &visited {
        let rating = place
            .rating
            .map_or_else(|| "-".to_string(), |r| format!("{r:.1}"));
        println!("{:<32}{:<8}{}", place.name, rating, place.address);
    }
    Ok(())
}

/// Opens the detail view for `name`, looking in fresh results for the
/// stored preferences first and then in the visited list.
async fn open_detail(client: &ChooseeClient, name: &str) -> anyhow::Result<AppState> {
    let state = restore_state(client.session())?;
    if !state.auth.is_authenticated {
        anyhow::bail!("{}; run `choosee login`", ClientError::NotAuthenticated);
    }

    let state = if state.wizard.draft.wizard_completed {
        fetch_recommendations(client, state).await?
    } else {
        match client.visited_locations().await {
            Ok(visited) => state.reduce(Action::VisitedLoaded(visited)),
            Err(e) if e.is_session_expired() => return Err(session_expired(state)),
            Err(e) => anyhow::bail!("{}", e.user_message()),
        }
    };

    if let Some(key) = find_by_name(&state.results.recommendations, name) {
        return Ok(state.reduce(Action::Select(key)));
    }
    let visited = state
        .results
        .visited
        .iter()
        .find(|v| v.name.eq_ignore_ascii_case(name.trim()))
        .cloned();
    match visited {
        Some(place) => Ok(state.reduce(Action::SelectVisited(place))),
        None => anyhow::bail!("no restaurant named '{name}' in your results or visited list"),
    }
}

async fn run_visited_check(client: &ChooseeClient, name: &str) -> anyhow::Result<()> {
    let mut state = open_detail(client, name).await?;
    let Some(rec) = state.detail.restaurant.clone() else {
        return Ok(());
    };

    match client.check_visited(&rec).await {
        Ok(is_visited) => {
            state = state.reduce(Action::VisitedChecked {
                key: rec.key(),
                is_visited,
            });
        }
        Err(e) if e.is_session_expired() => return Err(session_expired(state)),
        Err(e) => anyhow::bail!("{}", e.user_message()),
    }

    render_detail(&state);
    Ok(())
}

async fn run_visited_toggle(client: &ChooseeClient, name: &str) -> anyhow::Result<()> {
    let state = open_detail(client, name).await?;
    let Some(rec) = state.detail.restaurant.clone() else {
        return Ok(());
    };
    let key = rec.key();

    let state = state.reduce(Action::ToggleStarted);
    let state = match client.toggle_visited(&rec).await {
        Ok(is_visited) => {
            tracing::info!(restaurant = %rec.name, is_visited, "visited status updated");
            state.reduce(Action::ToggleSucceeded { key, is_visited })
        }
        Err(e) if e.is_session_expired() => return Err(session_expired(state)),
        Err(e) => {
            tracing::warn!(restaurant = %rec.name, error = %e, "visited toggle failed");
            state.reduce(Action::ToggleFailed { key })
        }
    };

    if let Some(error) = &state.detail.error {
        anyhow::bail!("{error}");
    }
    render_detail(&state);
    Ok(())
}
