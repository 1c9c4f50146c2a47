//! Search provider configuration.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RocchioError};

/// Google Custom Search JSON API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// Largest page the Custom Search API serves per request.
pub const MAX_RESULTS_PER_PAGE: u8 = 10;

/// Configuration for a web search provider.
#[derive(Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Provider credential.
    pub api_key: String,
    /// Provider index (search engine) identifier.
    pub engine_id: String,
    /// Request URL.
    pub endpoint: String,
    /// Whole-request timeout; a timeout counts as a failed search.
    pub timeout_secs: u64,
    /// Number of results requested per search.
    pub results_per_page: u8,
}

impl SearchConfig {
    /// Create a configuration with default endpoint, timeout, and page size.
    pub fn new<K: Into<String>, E: Into<String>>(api_key: K, engine_id: E) -> Self {
        SearchConfig {
            api_key: api_key.into(),
            engine_id: engine_id.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 30,
            results_per_page: MAX_RESULTS_PER_PAGE,
        }
    }

    pub fn with_endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_results_per_page(mut self, results_per_page: u8) -> Self {
        self.results_per_page = results_per_page;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Reject configurations no request could succeed with.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(RocchioError::config("API key must not be empty"));
        }
        if self.engine_id.trim().is_empty() {
            return Err(RocchioError::config("engine id must not be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(RocchioError::config("timeout must be at least one second"));
        }
        if self.results_per_page == 0 || self.results_per_page > MAX_RESULTS_PER_PAGE {
            return Err(RocchioError::config(format!(
                "results per page must be within 1..={MAX_RESULTS_PER_PAGE}"
            )));
        }
        Ok(())
    }
}

// The API key is a credential and stays out of logs.
impl fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("api_key", &"<redacted>")
            .field("engine_id", &self.engine_id)
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .field("results_per_page", &self.results_per_page)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::new("key", "cx");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.results_per_page, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(SearchConfig::new("", "cx").validate().is_err());
        assert!(SearchConfig::new("key", " ").validate().is_err());
        assert!(SearchConfig::new("key", "cx").with_timeout_secs(0).validate().is_err());
        assert!(SearchConfig::new("key", "cx").with_results_per_page(11).validate().is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let rendered = format!("{:?}", SearchConfig::new("secret-key", "cx"));
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("<redacted>"));
    }
}
