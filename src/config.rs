use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::job::ApplyMode;

pub const CONFIG_FILE_NAME: &str = ".babeljobrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub locales: Vec<String>,
    #[serde(default = "default_reference_locale", alias = "defaultLocale")]
    pub reference_locale: String,
    #[serde(default = "default_store")]
    pub store: String,
    #[serde(default = "default_job_dir", alias = "babelDir")]
    pub job_dir: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default)]
    pub apply_mode: ApplyMode,
    #[serde(default)]
    pub prune: bool,
}

fn default_reference_locale() -> String {
    "en".to_string()
}

fn default_store() -> String {
    "translations.i18n.json".to_string()
}

fn default_job_dir() -> String {
    "babel".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locales: Vec::new(),
            reference_locale: default_reference_locale(),
            store: default_store(),
            job_dir: default_job_dir(),
            reference: None,
            apply_mode: ApplyMode::default(),
            prune: false,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Locale codes name job files, so they must be non-empty, unique and free
    /// of path separators.
    pub fn validate(&self) -> Result<(), Error> {
        validate_locale(&self.reference_locale)
            .map_err(|reason| Error::InvalidConfig(format!("'referenceLocale' {}", reason)))?;

        let mut seen = HashSet::new();
        for locale in &self.locales {
            validate_locale(locale)
                .map_err(|reason| Error::InvalidConfig(format!("'locales' {}", reason)))?;
            if !seen.insert(locale.as_str()) {
                return Err(Error::InvalidConfig(format!(
                    "'locales' lists \"{}\" more than once",
                    locale
                )));
            }
        }

        Ok(())
    }
}

fn validate_locale(locale: &str) -> Result<(), String> {
    if locale.trim().is_empty() {
        return Err("contains an empty locale code".to_string());
    }
    if locale.contains(['/', '\\']) || locale.starts_with('.') {
        return Err(format!("contains an invalid locale code: \"{}\"", locale));
    }
    Ok(())
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
            config.validate()?;
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
