//! Runtime configuration read from the environment.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file in the working directory:
//!
//! ```text
//! TAIGA_URL=https://tree.taiga.io
//! TAIGA_USER=jane
//! TAIGA_PASSWORD=secret
//! PROJECT_SLUG=jane-demo
//! # optional
//! TAIGA_USER_AGENT=my-agent/1.0
//! TAIGA_LOG_DIR=logs
//! ```
//!
//! The four connection values are required. Lookups go through a closure so
//! that tests can supply values without mutating the process environment.

use crate::api::taiga::{TaigaConfig, DEFAULT_USER_AGENT};
use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub const TAIGA_URL: &str = "TAIGA_URL";
pub const TAIGA_USER: &str = "TAIGA_USER";
pub const TAIGA_PASSWORD: &str = "TAIGA_PASSWORD";
pub const PROJECT_SLUG: &str = "PROJECT_SLUG";
pub const TAIGA_USER_AGENT: &str = "TAIGA_USER_AGENT";
pub const TAIGA_LOG_DIR: &str = "TAIGA_LOG_DIR";

/// Directory for the created-tasks logs and the error log.
pub const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required configuration value {0}")]
    Missing(&'static str),
}

/// Loads `.env` into the process environment when the file exists.
pub fn load_env() {
    let _ = dotenv::dotenv();
}

/// Log directory: explicit value first, then `TAIGA_LOG_DIR`, then `logs`.
pub fn log_dir<F>(explicit: Option<PathBuf>, lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    explicit
        .or_else(|| non_empty(lookup(TAIGA_LOG_DIR)).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub taiga: TaigaConfig,
    pub username: String,
    pub password: String,
    pub project_slug: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("taiga", &self.taiga)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("project_slug", &self.project_slug)
            .finish()
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn read() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| non_empty(lookup(key)).ok_or(ConfigError::Missing(key));

        let api_url = required(TAIGA_URL)?;
        let username = required(TAIGA_USER)?;
        let password = required(TAIGA_PASSWORD)?;
        let project_slug = required(PROJECT_SLUG)?;
        let user_agent = non_empty(lookup(TAIGA_USER_AGENT)).unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        Ok(Self {
            taiga: TaigaConfig::new(api_url).with_user_agent(user_agent),
            username,
            password,
            project_slug,
        })
    }
}
