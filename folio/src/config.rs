//! Configuration loading.
//!
//! One file is used, the first found of:
//! 1. `--config <file>` (must exist)
//! 2. `./folio.json`
//! 3. `<config dir>/folio/config.json`
//!
//! Missing keys take their defaults and command line flags win over the file.
//! Without any file the defaults are used as they are.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const LOCAL_FILE: &str = "folio.json";
const APP_DIR: &str = "folio";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Portfolio content file; the built-in content when unset.
    pub content: Option<PathBuf>,
    /// Route shown at startup.
    pub start_path: String,
    /// File the theme preference is saved in.
    pub theme_store: Option<PathBuf>,
    /// Below this many columns the link bar turns into the menu drawer.
    pub compact_width: u16,
    /// Animation tick in milliseconds.
    pub tick_ms: u64,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            content: None,
            start_path: "/".to_string(),
            theme_store: None,
            compact_width: 80,
            tick_ms: 100,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl FolioConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(10))
    }

    /// Where the theme preference lives when no store is configured.
    pub fn theme_store_path(&self) -> Option<PathBuf> {
        self.theme_store
            .clone()
            .or_else(|| dirs::data_local_dir().map(|dir| dir.join(APP_DIR).join("prefs.json")))
    }
}

/// Finds the config file and applies flag overrides.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config_override: Option<PathBuf>,
    search_dirs: Option<Vec<PathBuf>>,
    content_override: Option<PathBuf>,
    path_override: Option<String>,
    theme_store_override: Option<PathBuf>,
    log_file_override: Option<PathBuf>,
    log_level_override: Option<String>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config_override(mut self, path: PathBuf) -> Self {
        self.config_override = Some(path);
        self
    }

    /// Replace the working directory and user config directory searched for
    /// a config file.
    pub fn with_search_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.search_dirs = Some(dirs);
        self
    }

    pub fn with_content_override(mut self, path: PathBuf) -> Self {
        self.content_override = Some(path);
        self
    }

    pub fn with_path_override(mut self, path: String) -> Self {
        self.path_override = Some(path);
        self
    }

    pub fn with_theme_store_override(mut self, path: PathBuf) -> Self {
        self.theme_store_override = Some(path);
        self
    }

    pub fn with_log_file_override(mut self, path: PathBuf) -> Self {
        self.log_file_override = Some(path);
        self
    }

    pub fn with_log_level_override(mut self, level: String) -> Self {
        self.log_level_override = Some(level);
        self
    }

    /// Load the config. Also returns the file it came from, if any.
    pub fn load(&self) -> Result<(FolioConfig, Option<PathBuf>)> {
        let (mut config, source) = match &self.config_override {
            Some(path) => {
                let config = load_file(path).with_context(|| {
                    format!("Failed to load config from override path: {}", path.display())
                })?;
                (config, Some(path.clone()))
            }
            None => self.search_and_load()?,
        };

        if let Some(content) = &self.content_override {
            config.content = Some(content.clone());
        }
        if let Some(path) = &self.path_override {
            config.start_path = path.clone();
        }
        if let Some(store) = &self.theme_store_override {
            config.theme_store = Some(store.clone());
        }
        if let Some(log_file) = &self.log_file_override {
            config.log_file = Some(log_file.clone());
        }
        if let Some(level) = &self.log_level_override {
            config.log_level = level.clone();
        }
        config.start_path = normalize_path(&config.start_path);

        Ok((config, source))
    }

    fn candidates(&self) -> Vec<PathBuf> {
        match &self.search_dirs {
            Some(dirs) => dirs.iter().map(|dir| dir.join(LOCAL_FILE)).collect(),
            None => {
                let mut candidates = vec![PathBuf::from(LOCAL_FILE)];
                if let Some(dir) = dirs::config_dir() {
                    candidates.push(dir.join(APP_DIR).join("config.json"));
                }
                candidates
            }
        }
    }

    fn search_and_load(&self) -> Result<(FolioConfig, Option<PathBuf>)> {
        for candidate in self.candidates() {
            if candidate.is_file() {
                let config = load_file(&candidate)?;
                return Ok((config, Some(candidate)));
            }
        }
        Ok((FolioConfig::default(), None))
    }
}

fn load_file(path: &Path) -> Result<FolioConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Routes always start with a slash: `about` and `#/about` become `/about`.
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_start_matches('#').trim_start_matches('/');
    format!("/{trimmed}")
}
