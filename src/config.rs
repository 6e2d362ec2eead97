use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::framework::FrameworkSetting;
use crate::core::patterns::{DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH, TextBounds};

pub const CONFIG_FILE_NAME: &str = ".glossarc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default)]
    pub framework: FrameworkSetting,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default)]
    pub ignore_texts: Vec<String>,
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    #[serde(default)]
    pub include_tests: bool,
    #[serde(default = "default_locales_root", alias = "localesDir")]
    pub locales_root: String,
    #[serde(default = "default_source_language", alias = "referenceLanguage")]
    pub source_language: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_min_length() -> usize {
    DEFAULT_MIN_LENGTH
}

fn default_max_length() -> usize {
    DEFAULT_MAX_LENGTH
}

fn default_locales_root() -> String {
    "./locales".to_string()
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_output_dir() -> String {
    "./i18n-reports".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            framework: FrameworkSetting::Auto,
            includes: Vec::new(),
            ignores: Vec::new(),
            ignore_texts: Vec::new(),
            min_length: default_min_length(),
            max_length: default_max_length(),
            include_tests: false,
            locales_root: default_locales_root(),
            source_language: default_source_language(),
            output_dir: default_output_dir(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern is invalid or the length bounds are
    /// out of order.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            if is_glob(pattern) {
                Pattern::new(pattern)
                    .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
            }
        }

        // Patterns without wildcards are literal directory paths, so
        // `app/[locale]` stays valid without escaping.
        for pattern in &self.includes {
            if is_glob(pattern) {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if self.min_length < 1 {
            bail!("'minLength' must be at least 1");
        }
        if self.min_length > self.max_length {
            bail!(
                "'minLength' ({}) must not exceed 'maxLength' ({})",
                self.min_length,
                self.max_length
            );
        }
        if self.source_language.trim().is_empty() {
            bail!("'sourceLanguage' must not be empty");
        }

        Ok(())
    }

    pub fn bounds(&self) -> TextBounds {
        TextBounds::new(self.min_length, self.max_length)
    }
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Join a configured path onto `base` unless it is already absolute.
pub fn resolve_path(base: &Path, configured: &str) -> PathBuf {
    let path = Path::new(configured);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(configured.trim_start_matches("./"))
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory relative paths in the config resolve against.
    pub base_dir: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config
                .validate()
                .with_context(|| format!("Invalid config file: {:?}", path))?;
            tracing::debug!(path = %path.display(), "loaded config");
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                base_dir,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            base_dir: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
