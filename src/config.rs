use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use serde::Deserialize;

/// How accepted connections are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerMode {
    /// One connection at a time, fully handled before the next accept.
    #[default]
    Single,
    /// One task per connection.
    #[serde(alias = "forking")]
    Concurrent,
}

impl FromStr for ServerMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "single" => Ok(ServerMode::Single),
            "concurrent" | "forking" => Ok(ServerMode::Concurrent),
            other => anyhow::bail!("unknown server mode: {}", other),
        }
    }
}

impl fmt::Display for ServerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerMode::Single => f.write_str("single"),
            ServerMode::Concurrent => f.write_str("concurrent"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen_addr: String,
    pub mode: ServerMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:9898".to_string(),
            mode: ServerMode::default(),
        }
    }
}

impl Config {
    /// Loads the configuration.
    ///
    /// Starts from the YAML file named by `SPINDLE_CONFIG` (or the
    /// defaults), then applies `LISTEN` and `SERVER_MODE` from the
    /// environment.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var("SPINDLE_CONFIG") {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(addr) = std::env::var("LISTEN") {
            cfg.listen_addr = addr;
        }
        if let Ok(mode) = std::env::var("SERVER_MODE") {
            cfg.mode = mode.parse()?;
        }

        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&text)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}
