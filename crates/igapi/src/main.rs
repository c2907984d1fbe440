use anyhow::Result;
use igapi::cli::{self, Cli, Commands};
use igapi::logging::{init_logger, log_configuration};
use igapi::server::{self, AppState};
use igapi::settings::ServerSettings;
use igcore::IgConfig;
use simplelog::TerminalMode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse_args();
    let command = cli.command_or_default();
    let settings = ServerSettings::load()?;

    let mode = match command {
        Commands::Fetch { .. } => TerminalMode::Stderr,
        Commands::Serve { .. } => TerminalMode::Mixed,
    };
    init_logger(&settings.log_level, settings.log_file.as_deref(), mode)?;

    let config = Arc::new(IgConfig::from_env()?);

    match command {
        Commands::Serve { port } => {
            let settings = settings.with_port(port);
            log_configuration(&config, &settings);
            let state = AppState::from_config(config)?;
            server::start_server(&settings.addr(), state).await
        }
        Commands::Fetch {
            url,
            cookie,
            cookie_value,
        } => {
            let state = AppState::from_config(config)?;
            let envelope = cli::run_fetch(&state, &url, cookie, cookie_value.as_deref()).await?;
            println!("{}", serde_json::to_string_pretty(&envelope)?);
            Ok(())
        }
    }
}
