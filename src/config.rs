use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The static config instance.
pub static INSTANCE: Lazy<Config> = Lazy::new(|| {
    #[cfg(not(test))]
    {
        return Config::load("./data/config.toml").unwrap_or_default();
    }

    #[cfg(test)]
    Config::default()
});

/// Describing the client configuration.
#[derive(Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api: Api,
    pub session: Session,
    pub log: Log,
}

impl Config {
    /// Reads a config file.
    ///
    /// A missing file yields the default config.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, crate::Error> {
        match std::fs::read_to_string(path) {
            Ok(string) => Ok(toml::from_str(&string)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Describing where the REST API lives.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Api {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for Api {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_owned(),
            timeout_secs: 30,
        }
    }
}

/// Describing the persisted login.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Session {
    /// File holding the token between runs.
    /// Sessions live in memory only when absent.
    pub path: Option<PathBuf>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            #[cfg(not(test))]
            path: Some(PathBuf::from("./data/session.json")),
            #[cfg(test)]
            path: None,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Log {
    /// One of `trace`, `debug`, `info`, `warn`, `error`.
    pub level: String,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
        }
    }
}
