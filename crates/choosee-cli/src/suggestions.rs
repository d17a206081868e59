//! Saved suggestion bundles: list, save, and reopen previous prompts.

use chrono::{DateTime, Utc};
use choosee_client::{ChooseeClient, ClientError};
use choosee_core::presentation::Viewport;
use choosee_core::store::Action;
use choosee_core::suggestion::SaveSuggestionRequest;
use choosee_core::SaveOutcome;
use clap::Subcommand;

use crate::recommend::{fetch_recommendations, render_results, session_expired};
use crate::restore_state;

/// Sub-commands available under `suggestions`.
#[derive(Debug, Subcommand)]
pub enum SuggestionsCommands {
    /// List previously saved prompts, newest as returned by the server
    List,
    /// Fetch recommendations for the stored preferences and save them
    Save,
    /// Reopen a saved prompt and make it the stored preferences
    Show {
        /// Position in `suggestions list` (starting at 1)
        index: usize,
        /// Use the mobile marker sizes
        #[arg(long)]
        mobile: bool,
    },
}

pub(crate) async fn run_suggestions(
    client: &ChooseeClient,
    command: SuggestionsCommands,
) -> anyhow::Result<()> {
    match command {
        SuggestionsCommands::List => run_suggestions_list(client).await,
        SuggestionsCommands::Save => run_suggestions_save(client).await,
        SuggestionsCommands::Show { index, mobile } => {
            run_suggestions_show(client, index, mobile).await
        }
    }
}

fn fmt_date(date: Option<DateTime<Utc>>) -> String {
    date.map_or_else(
        || "-".to_string(),
        |d| d.format("%Y-%m-%d %H:%M").to_string(),
    )
}

async fn run_suggestions_list(client: &ChooseeClient) -> anyhow::Result<()> {
    let saved = match client.user_suggestions().await {
        Ok(saved) => saved,
        Err(ClientError::NotAuthenticated) => {
            println!("not signed in; run `choosee login`");
            return Ok(());
        }
        Err(e) => anyhow::bail!("{}", e.user_message()),
    };

    if saved.is_empty() {
        println!("no saved prompts yet; run `choosee suggestions save`");
        return Ok(());
    }

    let header = format!(
        "{:<4}{:<18}{:<24}{:<20}{:<7}PLACES",
        "#", "SAVED", "FOOD", "DIET", "PRICE"
    );
    println!("{header}");
    for (i, bundle) in saved.iter().enumerate() {
        let price = bundle
            .prompt
            .max_price
            .map_or_else(|| "-".to_string(), |p| p.to_string());
        println!(
            "{:<4}{:<18}{:<24}{:<20}{:<7}{}",
            i + 1,
            fmt_date(bundle.date_created),
            bundle.prompt.food_preference,
            bundle.prompt.dietary_preference,
            price,
            bundle.locations.len()
        );
    }
    Ok(())
}

async fn run_suggestions_save(client: &ChooseeClient) -> anyhow::Result<()> {
    let state = restore_state(client.session())?;
    if !state.auth.is_authenticated {
        anyhow::bail!("{}; run `choosee login`", ClientError::NotAuthenticated);
    }

    let state = fetch_recommendations(client, state).await?;
    if let Some(error) = &state.results.error {
        anyhow::bail!("{error}");
    }
    if state.results.recommendations.is_empty() {
        println!("no restaurants matched these preferences; nothing to save");
        return Ok(());
    }

    let search = state.wizard.draft.to_search_request()?;
    let request = SaveSuggestionRequest::new(&search, state.results.recommendations.clone());
    match client.save_suggestions(&request).await {
        Ok(SaveOutcome::Saved) => {
            println!("saved {} restaurants", request.restaurants.len());
        }
        Ok(SaveOutcome::AlreadySaved) => println!("these suggestions are already saved"),
        Err(e) if e.is_session_expired() => return Err(session_expired(state)),
        Err(e) => anyhow::bail!("{}", e.user_message()),
    }
    Ok(())
}

async fn run_suggestions_show(
    client: &ChooseeClient,
    index: usize,
    mobile: bool,
) -> anyhow::Result<()> {
    let mut state = restore_state(client.session())?;
    let saved = match client.user_suggestions().await {
        Ok(saved) => saved,
        Err(e) if e.is_session_expired() => return Err(session_expired(state)),
        Err(e) => anyhow::bail!("{}", e.user_message()),
    };
    let bundle = index
        .checked_sub(1)
        .and_then(|i| saved.get(i))
        .cloned()
        .ok_or_else(|| {
            anyhow::anyhow!("no saved prompt #{index}; {} available", saved.len())
        })?;

    match client.visited_locations().await {
        Ok(visited) => state = state.reduce(Action::VisitedLoaded(visited)),
        Err(e) => tracing::warn!(error = %e, "failed to load visited places"),
    }

    let state = state.reduce(Action::SavedSuggestionSelected(bundle));
    client.session().save_draft(&state.wizard.draft)?;

    let viewport = if mobile {
        Viewport::Mobile
    } else {
        Viewport::Desktop
    };
    render_results(&state, viewport)
}
