mod account;
mod places;
mod recommend;
mod suggestions;
mod visited;
mod wizard;

use anyhow::Context;
use choosee_client::{ChooseeClient, Session};
use choosee_core::store::{Action, AppState};
use choosee_core::AppConfig;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::places::PlacesCommands;
use crate::suggestions::SuggestionsCommands;
use crate::visited::VisitedCommands;
use crate::wizard::WizardArgs;

#[derive(Debug, Parser)]
#[command(name = "choosee")]
#[command(about = "Restaurant recommendations from your food, diet, and budget preferences")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Sign in and store the session locally
    Login {
        #[arg(long)]
        email: String,
        /// Account password (falls back to `CHOOSEE_PASSWORD`)
        #[arg(long, env = "CHOOSEE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        password_confirmation: String,
    },
    /// Sign out and forget stored tokens
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Walk the preference wizard and store the result
    Wizard(WizardArgs),
    /// Fetch recommendations for the stored preferences
    Recommend {
        /// Use the mobile marker sizes
        #[arg(long)]
        mobile: bool,
        /// Open the detail view for this restaurant name
        #[arg(long)]
        open: Option<String>,
    },
    /// Visited places
    Visited {
        #[command(subcommand)]
        command: VisitedCommands,
    },
    /// Saved suggestion bundles
    Suggestions {
        #[command(subcommand)]
        command: SuggestionsCommands,
    },
    /// Place search for the location step
    Places {
        #[command(subcommand)]
        command: PlacesCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = choosee_core::load_app_config().context("failed to load configuration")?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let Some(command) = cli.command else {
        println!("choosee: run `choosee wizard` to set preferences, then `choosee recommend`");
        return Ok(());
    };

    let client = open_client(&config)?;
    match command {
        Commands::Login { email, password } => {
            account::run_login(&client, &email, &password).await?;
        }
        Commands::Register {
            username,
            email,
            password,
            password_confirmation,
        } => {
            account::run_register(&client, username, email, password, password_confirmation)
                .await?;
        }
        Commands::Logout => account::run_logout(&client).await?,
        Commands::Whoami => account::run_whoami(&client).await?,
        Commands::Wizard(args) => wizard::run_wizard(&client, &config, &args).await?,
        Commands::Recommend { mobile, open } => {
            recommend::run_recommend(&client, mobile, open.as_deref()).await?;
        }
        Commands::Visited { command } => visited::run_visited(&client, command).await?,
        Commands::Suggestions { command } => {
            suggestions::run_suggestions(&client, command).await?;
        }
        Commands::Places { command } => places::run_places(&config, command).await?,
    }

    Ok(())
}

fn open_client(config: &AppConfig) -> anyhow::Result<ChooseeClient> {
    tracing::debug!(?config, "loaded configuration");
    let session = Session::in_dir(&config.state_dir);
    ChooseeClient::new(config, session).context("failed to build API client")
}

/// Rebuilds the application state from what the session has persisted.
pub(crate) fn restore_state(session: &Session) -> anyhow::Result<AppState> {
    let has_access_token = session.is_authenticated()?;
    let user = session.user()?;
    let mut state = AppState::default().reduce(Action::SessionRestored {
        has_access_token,
        user,
    });
    if let Some(draft) = session.load_draft()? {
        state.wizard = choosee_core::Wizard::from_draft(draft);
    }
    Ok(state)
}

#[cfg(test)]
mod tests;
