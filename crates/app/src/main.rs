//! Solid Auth - command-line client
//!
//! Logs in to Solid identity providers with a client certificate or the
//! WebID-OIDC redirect flow, keeps the session, and fetches resources as the
//! logged-in user.

mod cli;
mod context;
mod error;

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use solid_auth_application::{LoginOptions, StorageOptions};
use solid_auth_domain::FetchRequest;
use solid_auth_infrastructure::load_settings;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Command};
use context::build_broker;
use error::CliResult;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Command::Login { idp, redirect_uri } => {
            let broker = build_broker(&settings, None, cli.ephemeral)?;
            let mut options = LoginOptions::new();
            if let Some(redirect_uri) = redirect_uri.or_else(|| settings.redirect_uri.clone()) {
                options = options.with_redirect_uri(redirect_uri);
            }

            let response = broker.login(&idp, options).await?;
            match response.session {
                Some(session) => println!("Logged in as {} ({})", session.web_id, session.auth_type),
                None => println!(
                    "Finish logging in with the provider, then run:\n  solid-auth whoami {idp} --callback-url <the URL you were sent to>"
                ),
            }
        }

        Command::Whoami { idp, callback_url } => {
            let broker = build_broker(&settings, callback_url.as_deref(), cli.ephemeral)?;
            let response = broker.current_user(&idp, StorageOptions::new()).await?;
            match response.session {
                Some(session) => println!("{} ({})", session.web_id, session.auth_type),
                None => println!("Not logged in to {idp}"),
            }
        }

        Command::Logout { idp } => {
            let broker = build_broker(&settings, None, cli.ephemeral)?;
            broker.logout(&idp, StorageOptions::new()).await?;
            println!("Logged out of {idp}");
        }

        Command::Fetch { idp, url, method } => {
            let broker = build_broker(&settings, None, cli.ephemeral)?;
            let response = broker.current_user(&idp, StorageOptions::new()).await?;
            if let Some(web_id) = response.web_id() {
                tracing::info!(web_id, "fetching as current user");
            }

            let fetched = response.fetch.fetch(FetchRequest::new(method, url)).await?;
            eprintln!("HTTP {}", fetched.status);
            std::io::stdout().write_all(&fetched.body)?;
        }
    }

    Ok(())
}
