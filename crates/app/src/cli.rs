//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use solid_auth_domain::HttpMethod;

/// solid-auth - log in to Solid identity providers
#[derive(Debug, Parser)]
#[command(name = "solid-auth")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Keep sessions in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in to an identity provider
    Login {
        /// Identity provider URL
        idp: String,
        /// Where the provider should return after authorization
        #[arg(long)]
        redirect_uri: Option<String>,
    },

    /// Show the current user for an identity provider
    Whoami {
        /// Identity provider URL
        idp: String,
        /// The URL the provider redirected to after login
        #[arg(long)]
        callback_url: Option<String>,
    },

    /// Log out of an identity provider
    Logout {
        /// Identity provider URL
        idp: String,
    },

    /// Fetch a resource as the current user
    Fetch {
        /// Identity provider URL
        idp: String,
        /// Resource URL
        url: String,
        /// HTTP method
        #[arg(long, default_value = "GET")]
        method: HttpMethod,
    },
}
