//! Logging initialization and startup diagnostics

use anyhow::Result;
use igcore::IgConfig;
use simplelog::*;
use std::fs::File;
use std::str::FromStr;

use crate::settings::ServerSettings;

/// Initialize the terminal logger, plus a file logger when `log_file` is set.
///
/// `mode` picks the terminal stream; `fetch` logs to stderr so stdout carries
/// only the JSON envelope. Unknown level names fall back to `info`.
pub fn init_logger(level: &str, log_file: Option<&str>, mode: TerminalMode) -> Result<()> {
    let level = LevelFilter::from_str(level.trim()).unwrap_or(LevelFilter::Info);

    let mut loggers: Vec<Box<dyn SharedLogger>> =
        vec![TermLogger::new(level, Config::default(), mode, ColorChoice::Auto)];

    if let Some(path) = log_file {
        let file = File::create(path).map_err(|e| anyhow::anyhow!("Failed to create log file: {}", e))?;
        loggers.push(WriteLogger::new(level, Config::default(), file));
    }

    CombinedLogger::init(loggers).map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Logs the effective configuration at startup. The cookie itself is never
/// printed, only whether one is configured.
pub fn log_configuration(config: &IgConfig, settings: &ServerSettings) {
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("igapi configuration");
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("Listen address: {}", settings.addr());
    log::info!("Upstream: {}", config.base_url);
    log::info!("X-IG-App-ID: {}", config.app_id);
    log::info!("GraphQL doc_id: {}", config.doc_id);

    if config.has_cookie() {
        log::info!("✅ COOKIE: configured (by-cookie route works without x-ig-cookie)");
    } else {
        log::warn!("⚠️  COOKIE: not set");
        log::warn!("   /api/instagram/by-cookie will answer 400 unless x-ig-cookie is sent");
    }
}
