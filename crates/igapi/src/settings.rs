//! Server-side settings (listen address, logging).
//!
//! Read from the same `igmeta.toml` + environment stack as [`igcore::IgConfig`],
//! extended with the server keys.

use figment::providers::Env;
use figment::Figment;
use serde::Deserialize;

const SERVER_KEYS: &[&str] = &["PORT", "BIND_ADDR", "LOG_LEVEL", "LOG_FILE"];

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub port: u16,
    pub bind_addr: String,
    pub log_level: String,
    /// Also write logs to this file when set
    pub log_file: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_file: None,
        }
    }
}

impl ServerSettings {
    pub fn load() -> Result<Self, figment::Error> {
        Self::from_figment(&figment())
    }

    pub fn from_figment(figment: &Figment) -> Result<Self, figment::Error> {
        let mut settings: Self = figment.extract()?;
        settings.log_file = settings.log_file.filter(|path| !path.trim().is_empty());
        Ok(settings)
    }

    /// Apply a `--port` given on the command line.
    pub fn with_port(mut self, port: Option<u16>) -> Self {
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn figment() -> Figment {
    igcore::config::figment().merge(Env::raw().only(SERVER_KEYS))
}
