//! Configuration service implementation.
//!
//! This module provides a ConfigService that loads the root configuration
//! from the configuration file (~/.config/nextjob/config.toml) and applies
//! environment overrides on top of it.

use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use nextjob_core::config::RootConfig;
use nextjob_core::{NextJobError, Result};
use tracing::debug;

use crate::paths::NextJobPaths;

/// Environment variable overriding `api.base_url`.
pub const BASE_URL_ENV: &str = "NEXTJOB_API_BASE_URL";

type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Configuration service that loads and caches the root configuration.
///
/// A missing file is not an error; defaults are used. A file that exists but
/// does not parse is.
#[derive(Clone)]
pub struct ConfigService {
    /// Explicit file location; the platform default when `None`
    path: Option<PathBuf>,
    env: EnvLookup,
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    /// A service reading the default config file and the process environment.
    pub fn new() -> Self {
        Self {
            path: None,
            env: Arc::new(|key| std::env::var(key).ok()),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Reads the configuration from `path` instead of the default location.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Replaces the environment lookup used for overrides.
    pub fn with_env(mut self, env: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> Self {
        self.env = Arc::new(env);
        self
    }

    /// Gets the root configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<RootConfig> {
        {
            let cached = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let loaded = self.load_config()?;
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = Some(loaded.clone());
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn config_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => NextJobPaths::config_file(),
        }
    }

    fn load_config(&self) -> Result<RootConfig> {
        let path = self.config_path()?;
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            toml::from_str::<RootConfig>(&contents).map_err(|e| {
                NextJobError::config(format!("Invalid config file {}: {e}", path.display()))
            })?
        } else {
            debug!(path = %path.display(), "No config file, using defaults");
            RootConfig::default()
        };

        if let Some(base_url) = (self.env)(BASE_URL_ENV).filter(|value| !value.trim().is_empty()) {
            debug!(%base_url, "API base URL overridden from environment");
            config.api.base_url = base_url.trim().to_string();
        }

        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
