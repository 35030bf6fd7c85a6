use crate::classifier::table::{default_categories, Category, KeywordTable};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration loaded from settings.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    /// Keyword table, in scoring and tie-break order
    #[serde(default = "default_categories")]
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Folder uploads are written to while being classified
    #[serde(default = "default_upload_folder")]
    pub upload_folder: String,
    #[serde(default)]
    pub debug: bool,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_upload_folder() -> String {
    "uploads".to_string()
}

fn default_max_upload_bytes() -> usize {
    16 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            upload_folder: default_upload_folder(),
            debug: false,
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration from default location or return defaults.
    /// A config file that exists but does not parse is an error.
    pub fn load() -> Result<Self> {
        Self::load_from(&[
            "config/settings.toml",
            "./config/settings.toml",
            "~/.config/sportguess/settings.toml",
        ])
    }

    /// Load the first existing file among `paths`, or defaults if none exists
    pub fn load_from(paths: &[&str]) -> Result<Self> {
        for path in paths {
            let path = PathBuf::from(shellexpand::tilde(path).as_ref());
            if path.exists() {
                return Self::from_file(path);
            }
        }

        Ok(Self::default())
    }

    /// Apply `UPLOAD_FOLDER`, `DEBUG` and `SPORTGUESS_BIND` from the environment
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup. `DEBUG` is only on for the exact
    /// value "True".
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(folder) = lookup("UPLOAD_FOLDER") {
            self.server.upload_folder = folder;
        }
        if let Some(debug) = lookup("DEBUG") {
            self.server.debug = debug == "True";
        }
        if let Some(bind) = lookup("SPORTGUESS_BIND") {
            self.server.bind = bind;
        }
    }

    /// Upload folder with `~` expanded
    pub fn upload_folder(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.server.upload_folder).as_ref())
    }

    /// Build the validated keyword table
    pub fn keyword_table(&self) -> Result<KeywordTable> {
        if self.categories.is_empty() {
            anyhow::bail!("config must define at least one category");
        }
        KeywordTable::new(self.categories.clone()).context("Invalid keyword table")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            categories: default_categories(),
        }
    }
}
