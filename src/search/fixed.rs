//! In-memory search provider with canned responses.
//!
//! Used for headless sessions, tests, and benchmarks where no network is
//! available.

use std::collections::HashMap;

use crate::error::{Result, RocchioError};
use crate::search::{ProviderItem, SearchProvider};

/// A provider that answers from a fixed table of responses.
///
/// Queries with an exact entry get that entry; every other query gets the
/// default response. A failing provider errors on every query.
#[derive(Clone, Debug, Default)]
pub struct FixedSearchProvider {
    default_items: Vec<ProviderItem>,
    responses: HashMap<String, Vec<ProviderItem>>,
    failure: Option<String>,
}

impl FixedSearchProvider {
    /// Answer every query with `items`.
    pub fn new(items: Vec<ProviderItem>) -> Self {
        FixedSearchProvider {
            default_items: items,
            ..Default::default()
        }
    }

    /// A provider that fails every request with `message`.
    pub fn failing<S: Into<String>>(message: S) -> Self {
        FixedSearchProvider {
            failure: Some(message.into()),
            ..Default::default()
        }
    }

    /// Answer `query` (exact match) with `items`.
    pub fn with_response<S: Into<String>>(mut self, query: S, items: Vec<ProviderItem>) -> Self {
        self.responses.insert(query.into(), items);
        self
    }
}

impl SearchProvider for FixedSearchProvider {
    fn search(&self, query: &str) -> Result<Vec<ProviderItem>> {
        if let Some(message) = &self.failure {
            return Err(RocchioError::search(message.clone()));
        }
        Ok(self
            .responses
            .get(query)
            .unwrap_or(&self.default_items)
            .clone())
    }

    fn name(&self) -> &str {
        "fixed"
    }
}
