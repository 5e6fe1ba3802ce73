//! Configuration management for the CLI.
//!
//! ```toml
//! store = "src/_data/sourceVerification.json"
//!
//! [fetch]
//! timeout_secs = 30
//! max_redirects = 5
//!
//! [runner]
//! request_delay_ms = 2000
//!
//! [output]
//! color = true
//! format = "table"
//! ```

use crate::cli::CheckArgs;
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use sourcewatch_fetch::FetchConfig;
use sourcewatch_verifier::RunnerConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Store location used when neither the file nor a flag names one
pub const DEFAULT_STORE_PATH: &str = "src/_data/sourceVerification.json";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Verification store location
    #[serde(default = "default_store")]
    pub store: PathBuf,

    /// HTTP settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Run settings
    #[serde(default)]
    pub runner: RunnerConfig,

    /// Output settings
    #[serde(default)]
    pub output: Settings,
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Text and tables
    Table,
    /// JSON format
    Json,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".sourcewatch").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default path is read
    /// when present and defaults are used otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides for a check run.
    pub fn apply_check_args(&mut self, args: &CheckArgs) -> Result<()> {
        if let Some(store) = &args.store {
            self.store = store.clone();
        }
        if let Some(delay_ms) = args.delay_ms {
            self.runner.request_delay_ms = delay_ms;
        }
        if let Some(timeout_secs) = args.timeout_secs {
            self.fetch.timeout_secs = timeout_secs;
        }
        if let Some(max_redirects) = args.max_redirects {
            self.fetch.max_redirects = max_redirects;
        }
        if let Some(user_agent) = &args.user_agent {
            self.fetch.user_agent = user_agent.clone();
        }
        if args.dry_run {
            self.runner.dry_run = true;
        }
        self.validate()
    }

    fn validate(&self) -> Result<()> {
        if self.fetch.timeout_secs == 0 {
            return Err(CliError::Config("timeout_secs must be at least 1".into()));
        }
        if self.fetch.user_agent.trim().is_empty() {
            return Err(CliError::Config("user_agent must not be empty".into()));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: default_store(),
            fetch: FetchConfig::default(),
            runner: RunnerConfig::default(),
            output: Settings::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_store() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_PATH)
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
