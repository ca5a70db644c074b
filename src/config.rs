//! Run configuration

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::api::RetryPolicy;
use crate::error::{Error, Result};

/// Defaults of the command line options, overridable by a yaml file
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Overpass API instance
    pub url: String,
    /// Per request timeout, in seconds
    pub timeout: u32,
    /// Search radius around each location, in meters
    pub distance: f64,
    /// Max locations per request, 0 for unlimited
    pub limit: usize,
    pub retries: u32,
    pub retry_delay_ms: u64,
    pub throttle_delay_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: "https://overpass-api.de/api/".to_string(),
            timeout: 120,
            distance: 20.0,
            limit: 0,
            retries: 3,
            retry_delay_ms: 100,
            throttle_delay_secs: 20,
        }
    }
}

/// Values given on the command line, taking precedence over the config
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overrides {
    pub url: Option<String>,
    pub timeout: Option<u32>,
    pub distance: Option<f64>,
    pub limit: Option<usize>,
    pub retries: Option<u32>,
}

impl Config {
    /// Load the given config, or else the first of `candidates` found.
    /// Without any of them the defaults are used.
    pub fn load(provided: Option<&Path>, candidates: &[PathBuf]) -> Result<Self> {
        if let Some(path) = provided {
            return Self::from_file(path);
        }

        for fi in candidates {
            if fi.is_file() {
                tracing::debug!("Loading config from {}", fi.display());
                return Self::from_file(fi);
            }
        }

        Ok(Self::default())
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(url) = overrides.url {
            self.url = url;
        }
        if let Some(timeout) = overrides.timeout {
            self.timeout = timeout;
        }
        if let Some(distance) = overrides.distance {
            self.distance = distance;
        }
        if let Some(limit) = overrides.limit {
            self.limit = limit;
        }
        if let Some(retries) = overrides.retries {
            self.retries = retries;
        }

        self
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document is null, not a mapping
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(yaml)
            .map_err(|e| Error::Argument(format!("Invalid configuration: {}", e)))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let yaml = fs::read_to_string(path).map_err(|e| {
            Error::Argument(format!(
                "Failed on read the config `{}`: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&yaml)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            retries: self.retries,
            delay: Duration::from_millis(self.retry_delay_ms),
            throttle_delay: Duration::from_secs(self.throttle_delay_secs),
        }
    }
}
