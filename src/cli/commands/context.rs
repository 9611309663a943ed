use std::path::PathBuf;

use anyhow::{Context as _, Result, bail};
use tracing::{debug, info};

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, load_config},
    job::ApplyMode,
    reference::Reference,
    store::LocaleStore,
};

/// Settings for one job command: config file values with CLI overrides applied.
///
/// Relative paths from the config file resolve against the config file's
/// directory; paths given on the command line are used as given.
#[derive(Debug, Clone)]
pub struct JobContext {
    pub locales: Vec<String>,
    pub reference_locale: String,
    pub store_path: PathBuf,
    pub job_dir: PathBuf,
    /// Reference file; `None` derives the reference from the store.
    pub reference_path: Option<PathBuf>,
    pub apply_mode: ApplyMode,
    pub prune: bool,
    pub verbose: bool,
}

impl JobContext {
    pub fn new(args: &CommonArgs) -> Result<Self> {
        let loaded = load_config(&args.root)?;

        if args.verbose && !loaded.from_file {
            eprintln!(
                "Note: No {} found, using default configuration",
                CONFIG_FILE_NAME
            );
        }

        let mut config = loaded.config;
        let base_dir = loaded.base_dir;

        if !args.locales.is_empty() {
            config.locales = args.locales.clone();
        }
        if let Some(reference_locale) = &args.reference_locale {
            config.reference_locale = reference_locale.clone();
        }
        config.validate().context("Invalid locale settings")?;

        if config.locales.is_empty() {
            bail!(
                "No locales to process.\n\
                 Hint: Pass --locales en,da,de or set 'locales' in {}.",
                CONFIG_FILE_NAME
            );
        }

        let store_path = args
            .store
            .clone()
            .unwrap_or_else(|| base_dir.join(&config.store));
        let job_dir = args
            .job_dir
            .clone()
            .unwrap_or_else(|| base_dir.join(&config.job_dir));
        let reference_path = args
            .reference
            .clone()
            .or_else(|| config.reference.as_ref().map(|r| base_dir.join(r)));

        debug!(
            locales = ?config.locales,
            reference_locale = %config.reference_locale,
            store = %store_path.display(),
            job_dir = %job_dir.display(),
            "resolved job context"
        );

        Ok(Self {
            locales: config.locales,
            reference_locale: config.reference_locale,
            store_path,
            job_dir,
            reference_path,
            apply_mode: config.apply_mode,
            prune: config.prune,
            verbose: args.verbose,
        })
    }

    /// Load the locale store; a missing store is empty, a corrupt one is an error.
    pub fn load_store(&self) -> Result<LocaleStore> {
        LocaleStore::load(&self.store_path).with_context(|| {
            format!(
                "Failed to load locale store: {}",
                self.store_path.display()
            )
        })
    }

    /// Load the reference file, or derive the reference from `store`.
    pub fn load_reference(&self, store: &LocaleStore) -> Result<Reference> {
        match &self.reference_path {
            Some(path) => Reference::load(path)
                .with_context(|| format!("Failed to load reference: {}", path.display())),
            None => {
                info!(
                    locale = %self.reference_locale,
                    "no reference file, using the reference locale's entries in the store"
                );
                Ok(Reference::from_store(store, &self.reference_locale))
            }
        }
    }
}
