/// Runtime configuration: endpoints, institution, storage and retry policy
use crate::error::{ClassFinderError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Base URL of the class schedule API (year-term and teaching area are appended).
pub const SCHEDULE_BASE_URL: &str =
    "https://api.byu.edu:443/domains/legacy/academic/classschedule/classschedule/v1";

/// Base URL of the persons API (user id is appended).
pub const PERSONS_BASE_URL: &str = "https://api.byu.edu:443/byuapi/persons/v3";

/// GraphQL endpoint for professor ratings.
pub const RATINGS_URL: &str = "https://www.ratemyprofessors.com/graphql";

/// Ratings site identifier for BYU (as of 5/11/2022).
pub const DEFAULT_INSTITUTION_ID: &str = "U2Nob29sLTEzNQ==";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub schedule_base_url: String,
    pub persons_base_url: String,
    pub ratings_url: String,
    /// Authorization header value sent to the ratings endpoint
    pub ratings_authorization: String,
    pub institution_id: String,
    /// Year-term and teaching area used to probe the schedule API subscription
    pub probe_year_term: String,
    pub probe_teaching_area: String,
    pub database_path: PathBuf,
    /// When true, an instructor match with zero ratings is treated as no match
    pub suppress_zero_rating_matches: bool,
    pub enrichment_retry: RetryPolicy,
    /// Extra attempts made when the storage connectivity probe fails
    pub storage_probe_retries: u32,
}

/// Bounded retry with exponential backoff, applied per enrichment call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl RetryPolicy {
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 250,
            max_delay_ms: 5_000,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            schedule_base_url: SCHEDULE_BASE_URL.to_string(),
            persons_base_url: PERSONS_BASE_URL.to_string(),
            ratings_url: RATINGS_URL.to_string(),
            ratings_authorization: "Basic dGVzdDp0ZXN0".to_string(),
            institution_id: DEFAULT_INSTITUTION_ID.to_string(),
            probe_year_term: "20225".to_string(),
            probe_teaching_area: "C S".to_string(),
            database_path: PathBuf::from("classfinder.db"),
            suppress_zero_rating_matches: false,
            enrichment_retry: RetryPolicy::default(),
            storage_probe_retries: 2,
        }
    }
}

impl AppConfig {
    /// Loads a JSON config file. Missing keys keep their default values.
    ///
    /// # Arguments
    /// * `path` - Path to the JSON file
    ///
    /// # Returns
    /// * `Ok(AppConfig)` - Parsed configuration
    /// * `Err` - If the file can't be read or isn't valid JSON
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ClassFinderError::Io {
            message: format!("failed to read config {}: {}", path.display(), e),
        })?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Loads `path` if given, otherwise returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from_file(p),
            None => Ok(Self::default()),
        }
    }
}
