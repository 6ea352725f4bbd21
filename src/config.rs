//! Runtime configuration collected from the environment.
//!
//! Read once at startup by `main.rs`; everything downstream receives plain
//! values.

use std::path::PathBuf;

use crate::adapters::narrative::{
    NarrativeConfig, DEFAULT_IDLE_TIMEOUT, DEFAULT_NARRATIVE_MODEL, DEFAULT_NARRATIVE_URL,
};
use crate::HemoscanError;

const DB_PATH_ENV: &str = "HEMOSCAN_DB_PATH";
const LOG_MODE_ENV: &str = "HEMOSCAN_LOG_MODE";
const LOG_FILE_ENV: &str = "HEMOSCAN_LOG_FILE";
const REPORT_DIR_ENV: &str = "HEMOSCAN_REPORT_DIR";
const NARRATIVE_URL_ENV: &str = "HEMOSCAN_NARRATIVE_URL";
const NARRATIVE_MODEL_ENV: &str = "HEMOSCAN_NARRATIVE_MODEL";
const NARRATIVE_KEY_FILE_ENV: &str = "HEMOSCAN_NARRATIVE_API_KEY_FILE";
const NARRATIVE_KEY_ENV_DEV: &str = "HEMOSCAN_NARRATIVE_API_KEY";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when stdout is a terminal, stdout otherwise
    Auto,
    File,
    Stdout,
}

impl LogMode {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => Self::File,
            "stdout" => Self::Stdout,
            _ => Self::Auto,
        }
    }

    /// Resolve `Auto` against whether stdout is interactive.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

/// Application settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
    pub report_dir: PathBuf,
    pub narrative: NarrativeConfig,
}

impl AppConfig {
    /// Load settings from process environment variables.
    ///
    /// # Errors
    /// Returns error if an API key file is configured but cannot be read.
    pub fn from_env() -> Result<Self, HemoscanError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns error if an API key file is configured but cannot be read.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, HemoscanError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let api_key = Self::read_api_key(&lookup)?;

        Ok(Self {
            db_path: PathBuf::from(var(DB_PATH_ENV, "hemoscan.db")),
            log_mode: LogMode::parse(&var(LOG_MODE_ENV, "auto")),
            log_file: PathBuf::from(var(LOG_FILE_ENV, "hemoscan.log")),
            report_dir: PathBuf::from(var(REPORT_DIR_ENV, "reports")),
            narrative: NarrativeConfig {
                url: var(NARRATIVE_URL_ENV, DEFAULT_NARRATIVE_URL),
                model: var(NARRATIVE_MODEL_ENV, DEFAULT_NARRATIVE_MODEL),
                api_key,
                idle_timeout: DEFAULT_IDLE_TIMEOUT,
            },
        })
    }

    /// Whether AI insights can be requested.
    #[must_use]
    pub fn narrative_enabled(&self) -> bool {
        self.narrative.api_key.is_some()
    }

    /// Key file first; the plain env var is honoured in debug builds only.
    fn read_api_key<F>(lookup: &F) -> Result<Option<String>, HemoscanError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(NARRATIVE_KEY_FILE_ENV) {
            let content = std::fs::read_to_string(path.trim())?;
            let key = content.trim_end_matches(['\n', '\r']).to_string();
            return Ok(Some(key).filter(|k| !k.is_empty()));
        }

        if cfg!(debug_assertions) {
            if let Some(v) = lookup(NARRATIVE_KEY_ENV_DEV) {
                let key = v.trim_end_matches(['\n', '\r']).to_string();
                return Ok(Some(key).filter(|k| !k.is_empty()));
            }
        }

        Ok(None)
    }
}
