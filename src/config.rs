//! Coding configuration helpers.
//!
//! The ignore-set, non-answer vocabulary, and sentinel text are source
//! conventions of the LimeSurvey export; they live here verbatim so a run can
//! override them from a JSON file without touching the coder.
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_SCHEMA_VERSION: u32 = 1;
pub const DEFAULT_MAX_NAME_LEN: usize = 22;
pub const QUESTION_NOT_SHOWN: &str = "{question_not_shown}";
pub const STATUS_PREFIX: &str = "responseStatus_";
pub const OUTPUT_PREFIX: &str = "translated_EDNA_";
pub const IGNORED_COLUMNS: [&str; 9] = [
    "id",
    "token",
    "submitdate",
    "lastpage",
    "startlanguage",
    "startdate",
    "datestamp",
    "ipaddr",
    "",
];
pub const NON_ANSWERS: [&str; 5] = ["NA", "N/A", "NOT AVAILABLE", "NONE", "?"];

const CONFIG_DIR_NAME: &str = "edna-translate";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodingConfig {
    pub schema_version: u32,
    /// Longest variable name the destination accepts without collisions.
    pub max_name_len: usize,
    /// Platform bookkeeping columns that never get a status column.
    pub ignored_columns: Vec<String>,
    /// Upper-case values treated as explicit non-answers.
    pub non_answers: Vec<String>,
    /// Cell text LimeSurvey writes for options hidden from the respondent.
    pub question_not_shown: String,
    pub status_prefix: String,
    pub output_prefix: String,
}

impl Default for CodingConfig {
    fn default() -> Self {
        default_config()
    }
}

impl CodingConfig {
    pub fn is_ignored(&self, name: &str) -> bool {
        let name = name.trim();
        self.ignored_columns.iter().any(|ignored| ignored == name)
    }

    pub fn is_non_answer(&self, value: &str) -> bool {
        let upper = value.to_uppercase();
        self.non_answers.iter().any(|candidate| *candidate == upper)
    }

    pub fn output_file_name(&self, sid: &str) -> String {
        format!("{}{sid}.txt", self.output_prefix)
    }
}

/// Build the configuration matching the LimeSurvey VV export conventions.
pub fn default_config() -> CodingConfig {
    CodingConfig {
        schema_version: CONFIG_SCHEMA_VERSION,
        max_name_len: DEFAULT_MAX_NAME_LEN,
        ignored_columns: IGNORED_COLUMNS.iter().map(|s| s.to_string()).collect(),
        non_answers: NON_ANSWERS.iter().map(|s| s.to_string()).collect(),
        question_not_shown: QUESTION_NOT_SHOWN.to_string(),
        status_prefix: STATUS_PREFIX.to_string(),
        output_prefix: OUTPUT_PREFIX.to_string(),
    }
}

/// Render a pretty JSON config stub users can copy and edit.
pub fn config_stub() -> Result<String> {
    serde_json::to_string_pretty(&default_config()).context("serialize config stub")
}

/// Per-user config location, e.g. `~/.config/edna-translate/config.json`.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

pub fn load_config(path: &Path) -> Result<CodingConfig> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let config: CodingConfig =
        serde_json::from_slice(&bytes).context("parse coding config JSON")?;
    validate_config(&config)?;
    Ok(config)
}

/// Resolve the effective config: an explicit path, then the per-user file,
/// then the built-in defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<CodingConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match user_config_path() {
        Some(path) if path.is_file() => {
            tracing::debug!(path = %path.display(), "using user config");
            load_config(&path)
        }
        _ => Ok(default_config()),
    }
}

pub fn validate_config(config: &CodingConfig) -> Result<()> {
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported coding config schema_version {}",
            config.schema_version
        ));
    }
    if config.max_name_len == 0 {
        return Err(anyhow!("max_name_len must be positive"));
    }
    if config.status_prefix.trim().is_empty() {
        return Err(anyhow!("status_prefix must be non-empty"));
    }
    if config.output_prefix.trim().is_empty() {
        return Err(anyhow!("output_prefix must be non-empty"));
    }
    if let Some(bad) = config
        .non_answers
        .iter()
        .find(|value| value.to_uppercase() != **value)
    {
        return Err(anyhow!("non_answers entries must be upper case (got {bad:?})"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
