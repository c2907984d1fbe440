use clap::{Parser, Subcommand};
use igcore::{Envelope, IgResult, NormalizedMedia};

use crate::server::AppState;

#[derive(Parser)]
#[command(name = "igapi")]
#[command(version, about = "Resolve Instagram post, reel and story URLs into normalized media metadata", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve {
        /// Port to listen on, overrides PORT
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Resolve one URL and print the envelope as JSON
    Fetch {
        /// Post, reel or story URL
        url: String,

        /// Use the cookie strategy with the configured COOKIE
        #[arg(long)]
        cookie: bool,

        /// Use the cookie strategy with this cookie instead of COOKIE
        #[arg(long)]
        cookie_value: Option<String>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn command_or_default(self) -> Commands {
        self.command.unwrap_or(Commands::Serve { port: None })
    }
}

/// One-off lookup for the `fetch` subcommand.
///
/// `--cookie-value` implies `--cookie`.
pub async fn run_fetch(
    state: &AppState,
    url: &str,
    cookie: bool,
    cookie_value: Option<&str>,
) -> IgResult<Envelope<NormalizedMedia>> {
    if cookie || cookie_value.is_some() {
        state.by_cookie.fetch(url, cookie_value).await
    } else {
        state.graphql.fetch(url, None).await
    }
}
