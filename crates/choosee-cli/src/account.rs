//! Account command handlers: login, register, logout, whoami.

use choosee_client::{ChooseeClient, ClientError};
use choosee_core::auth::RegisterForm;
use choosee_core::store::Action;

use crate::restore_state;

pub(crate) async fn run_login(
    client: &ChooseeClient,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    let state = restore_state(client.session())?.reduce(Action::LoginStarted);
    let state = match client.login(email, password).await {
        Ok(user) => state.reduce(Action::LoginSucceeded(user)),
        Err(e) => state.reduce(Action::LoginFailed(e.user_message())),
    };

    if let Some(error) = &state.auth.error {
        anyhow::bail!("login failed: {error}");
    }
    match &state.auth.user {
        Some(user) => println!("signed in as {}", user.display_name()),
        None => println!("signed in"),
    }
    Ok(())
}

pub(crate) async fn run_register(
    client: &ChooseeClient,
    username: String,
    email: String,
    password: String,
    password_confirmation: String,
) -> anyhow::Result<()> {
    let form = RegisterForm {
        username,
        email,
        password,
        password_confirmation,
    };
    match client.register(&form).await {
        Ok(_) => {
            println!(
                "account created for {}; run `choosee login --email {}` to sign in",
                form.username, form.email
            );
            Ok(())
        }
        Err(e) => anyhow::bail!("registration failed: {}", e.user_message()),
    }
}

pub(crate) async fn run_logout(client: &ChooseeClient) -> anyhow::Result<()> {
    if let Err(e) = client.logout().await {
        tracing::warn!(error = %e, "logout request failed; local session already cleared");
    }
    let state = restore_state(client.session())?.reduce(Action::LoggedOut);
    println!("signed out ({})", state.route.path());
    Ok(())
}

pub(crate) async fn run_whoami(client: &ChooseeClient) -> anyhow::Result<()> {
    match client.current_user().await {
        Ok(user) => {
            println!("{}", user.display_name());
            if user.username.is_some() {
                println!("{}", user.email);
            }
            Ok(())
        }
        Err(ClientError::NotAuthenticated) => {
            println!("not signed in; run `choosee login`");
            Ok(())
        }
        Err(e) => anyhow::bail!("{}", e.user_message()),
    }
}
