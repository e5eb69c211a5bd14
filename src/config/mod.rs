//! Configuration management for `helpdesk`.
//!
//! Configuration is layered, lowest precedence first:
//! - Built-in defaults
//! - YAML file (`--config <path>`, else `helpdesk.yaml` in the working directory)
//! - Environment variables (`PORT`, `HELPDESK_*`)
//! - Command-line flags

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{HelpdeskError, Result};

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "helpdesk.yaml";

/// Default request body limit (10 MiB).
pub const DEFAULT_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Server and storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Interface to bind.
    pub host: String,
    /// TCP port to bind.
    pub port: u16,
    /// JSON file holding the ticket store.
    pub data_file: PathBuf,
    /// Origin allowed by CORS (the browser front-end).
    pub cors_origin: String,
    /// Maximum accepted request body, in bytes.
    pub body_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            data_file: PathBuf::from("tickets.json"),
            cors_origin: "http://localhost:8080".to_string(),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

/// Values supplied on the command line; `None` leaves the lower layer alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub data_file: Option<PathBuf>,
}

impl Config {
    /// Load defaults, the YAML file and the process environment.
    ///
    /// # Errors
    ///
    /// Returns `Config` if an explicitly named file is missing, a file does
    /// not parse, or an environment variable holds an invalid value.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    Self::from_file(fallback)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a YAML config file. Unset keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            HelpdeskError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config = Self::from_yaml(&raw)
            .map_err(|e| HelpdeskError::Config(format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Parse YAML config text.
    ///
    /// # Errors
    ///
    /// Returns `Config` on malformed YAML or unknown keys.
    pub fn from_yaml(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw).map_err(|e| HelpdeskError::Config(e.to_string()))
    }

    /// Apply environment overrides through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `Config` if `PORT` is not a valid port number.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HELPDESK_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| HelpdeskError::Config(format!("PORT must be a port number, got '{port}'")))?;
        }
        if let Some(path) = lookup("HELPDESK_DATA_FILE") {
            self.data_file = PathBuf::from(path);
        }
        if let Some(origin) = lookup("HELPDESK_CORS_ORIGIN") {
            self.cors_origin = origin;
        }
        Ok(())
    }

    /// Apply command-line overrides.
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(host) = overrides.host {
            self.host = host;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(path) = overrides.data_file {
            self.data_file = path;
        }
    }

    /// `host:port` string suitable for binding.
    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Absolute path of the data file.
    ///
    /// An existing file is canonicalized; otherwise the path is joined onto
    /// the working directory.
    #[must_use]
    pub fn resolved_data_file(&self) -> PathBuf {
        if let Ok(path) = dunce::canonicalize(&self.data_file) {
            return path;
        }
        if self.data_file.is_absolute() {
            return self.data_file.clone();
        }
        std::env::current_dir()
            .map(|cwd| cwd.join(&self.data_file))
            .unwrap_or_else(|_| self.data_file.clone())
    }
}
