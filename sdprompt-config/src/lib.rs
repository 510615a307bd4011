use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CATEGORY_DIR: &str = "config";
pub const DEFAULT_LOG_FILE: &str = "generated_prompts.txt";
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_MODEL_CLI: &str = "ollama";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine configuration directory")]
    ConfigDirUnavailable,
    #[error("failed to read or write settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to deserialize settings: {0}")]
    Deserialize(#[from] toml::de::Error),
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Persistent knobs for the prompt generator.
///
/// Relative paths are resolved against the working directory the tool is
/// launched from, so a project folder keeps its own categories and log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding one JSON file per category plus the `_backup` folder.
    pub category_dir: String,
    /// Append-only log of generated prompt pairs.
    pub log_file: String,
    /// Number of options shown before asking to page further.
    pub page_size: usize,
    /// Executable used to discover locally installed models.
    pub model_cli: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            category_dir: DEFAULT_CATEGORY_DIR.to_string(),
            log_file: DEFAULT_LOG_FILE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            model_cli: DEFAULT_MODEL_CLI.to_string(),
        }
    }
}

impl Settings {
    pub fn category_dir(&self) -> PathBuf {
        PathBuf::from(&self.category_dir)
    }

    pub fn log_file(&self) -> PathBuf {
        PathBuf::from(&self.log_file)
    }

    /// Page size with a floor of one so pagination always makes progress.
    pub fn effective_page_size(&self) -> usize {
        self.page_size.max(1)
    }
}

#[derive(Debug)]
pub struct LoadOutcome {
    pub settings: Settings,
    pub path: PathBuf,
    pub created: bool,
}

/// Loads the settings from `~/.sdprompt/config.toml`, creating a default file if absent.
pub fn load_or_init() -> Result<LoadOutcome, ConfigError> {
    let path = settings_file_path()?;
    load_or_init_at(&path)
}

/// Loads the settings stored at `path`, writing defaults there if the file does not exist.
///
/// Fields missing from an existing file are backfilled with their defaults and
/// the file is rewritten so it documents every available setting.
pub fn load_or_init_at(path: &Path) -> Result<LoadOutcome, ConfigError> {
    if path.exists() {
        let contents = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&contents)?;
        let normalized = toml::to_string_pretty(&settings)?;
        if normalized != contents {
            fs::write(path, normalized)?;
        }
        Ok(LoadOutcome {
            settings,
            path: path.to_path_buf(),
            created: false,
        })
    } else {
        let settings = Settings::default();
        save(&settings, path)?;
        Ok(LoadOutcome {
            settings,
            path: path.to_path_buf(),
            created: true,
        })
    }
}

/// Persist the given settings to disk at the provided path.
pub fn save(settings: &Settings, path: &Path) -> Result<(), ConfigError> {
    ensure_parent_exists(path)?;
    let serialized = toml::to_string_pretty(settings)?;
    fs::write(path, serialized)?;
    Ok(())
}

fn ensure_parent_exists(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn settings_file_path() -> Result<PathBuf, ConfigError> {
    let base_dirs = BaseDirs::new().ok_or(ConfigError::ConfigDirUnavailable)?;
    Ok(base_dirs.home_dir().join(".sdprompt").join("config.toml"))
}
