use crate::error::{LedgerError, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

const MINER_ADDRESS_KEY: &str = "LEDGER_MINER_ADDRESS";
const LOG_LEVEL_KEY: &str = "LEDGER_LOG_LEVEL";

static DEFAULT_LOG_LEVEL: &str = "info";

/// Runtime settings for a process hosting the ledger.
///
/// Nothing in here changes consensus; protocol constants live in
/// [`crate::config::params`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub miner: MinerConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MinerConfig {
    /// Address credited by reward transactions. A fresh wallet is used when unset.
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValidationConfig {
    /// Run the ledger rules when a candidate chain is offered
    #[serde(default = "default_true")]
    pub validate_ledger: bool,
    /// Also require every block hash to meet its difficulty
    #[serde(default)]
    pub enforce_work: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            validate_ledger: true,
            enforce_work: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load settings from an optional TOML file, then apply environment
    /// overrides. The merged result is checked as a whole.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        Self::load_with(path, |key| env::var(key).ok())
    }

    fn load_with<F>(path: Option<&Path>, var: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };
        config.apply_overrides(var);
        config.check()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(|e| {
            LedgerError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Config> {
        let config: Config = toml::from_str(contents)?;
        config.check()?;
        Ok(config)
    }

    fn apply_overrides<F: Fn(&str) -> Option<String>>(&mut self, var: F) {
        if let Some(addr) = var(MINER_ADDRESS_KEY) {
            if !addr.is_empty() {
                self.miner.address = Some(addr);
            }
        }
        if let Some(level) = var(LOG_LEVEL_KEY) {
            if !level.is_empty() {
                self.logging.level = level;
            }
        }
    }

    fn check(&self) -> Result<()> {
        if let Some(addr) = &self.miner.address {
            if addr.is_empty() {
                return Err(LedgerError::Config(
                    "miner.address must not be empty when set".to_string(),
                ));
            }
        }
        self.log_level_filter()?;
        Ok(())
    }

    pub fn log_level_filter(&self) -> Result<log::LevelFilter> {
        self.logging
            .level
            .parse::<log::LevelFilter>()
            .map_err(|_| {
                LedgerError::Config(format!("Unknown log level: {}", self.logging.level))
            })
    }
}
