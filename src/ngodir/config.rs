use crate::debounce::DEFAULT_SEARCH_DELAY;
use crate::error::{DirectoryError, Result};
use crate::query::CategoryTable;
use crate::state::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for the directory, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirectoryConfig {
    /// Records per page; constant for a session
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Quiet period before a typed search is applied
    #[serde(default = "default_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Directory document to load; the built-in sample set is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,

    /// Category name to tag keywords
    #[serde(default)]
    pub categories: CategoryTable,

    /// Fixed service facet values; derived from the records when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<String>>,

    /// Fixed focus-group facet values; derived from the records when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_groups: Option<Vec<String>>,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_debounce_ms() -> u64 {
    DEFAULT_SEARCH_DELAY.as_millis() as u64
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce_ms: default_debounce_ms(),
            data_file: None,
            categories: CategoryTable::default(),
            services: None,
            focus_groups: None,
        }
    }
}

impl DirectoryConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: DirectoryConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        self.validate()?;
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(DirectoryError::Config(
                "page-size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn search_delay(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Apply a `key = value` pair as typed on the command line
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut next = self.clone();
        match key {
            "page-size" => {
                next.page_size = value.parse().map_err(|_| {
                    DirectoryError::Config(format!("invalid page-size '{}'", value))
                })?;
            }
            "debounce-ms" => {
                next.search_debounce_ms = value.parse().map_err(|_| {
                    DirectoryError::Config(format!("invalid debounce-ms '{}'", value))
                })?;
            }
            "data-file" => {
                next.data_file = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            other => {
                return Err(DirectoryError::Config(format!(
                    "unknown config key '{}'",
                    other
                )))
            }
        }
        next.validate()?;
        *self = next;
        Ok(())
    }

    /// Look up a single key's display value
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "page-size" => Ok(self.page_size.to_string()),
            "debounce-ms" => Ok(self.search_debounce_ms.to_string()),
            "data-file" => Ok(self
                .data_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()),
            other => Err(DirectoryError::Config(format!(
                "unknown config key '{}'",
                other
            ))),
        }
    }

    pub fn keys() -> &'static [&'static str] {
        &["page-size", "debounce-ms", "data-file"]
    }
}
