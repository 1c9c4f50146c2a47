//! Web search boundary.
//!
//! A [`SearchProvider`] talks to a concrete search backend and reports every
//! failure as an error. [`SearchClient`] wraps a provider, drops non-HTML
//! items, and turns failures into an empty result list so the feedback loop
//! never stops on a transport problem.

pub mod client;
pub mod config;
pub mod fixed;
pub mod google;

pub use client::SearchClient;
pub use config::SearchConfig;
pub use fixed::FixedSearchProvider;
pub use google::GoogleSearchProvider;

use serde::{Deserialize, Serialize};

use crate::document::ResultRecord;
use crate::error::Result;

/// One item as returned by a search provider, before filtering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderItem {
    pub url: String,
    pub title: String,
    pub summary: String,
    /// Present for non-HTML documents (PDF, DOC, ...).
    pub file_format: Option<String>,
}

impl ProviderItem {
    /// Create an HTML item.
    pub fn html<U, T, S>(url: U, title: T, summary: S) -> Self
    where
        U: Into<String>,
        T: Into<String>,
        S: Into<String>,
    {
        ProviderItem {
            url: url.into(),
            title: title.into(),
            summary: summary.into(),
            file_format: None,
        }
    }

    /// Mark this item as a non-HTML document of the given format.
    pub fn with_file_format<F: Into<String>>(mut self, format: F) -> Self {
        self.file_format = Some(format.into());
        self
    }

    /// Whether the provider flagged this item as a non-HTML file.
    pub fn is_non_html(&self) -> bool {
        self.file_format.is_some()
    }
}

impl From<ProviderItem> for ResultRecord {
    fn from(item: ProviderItem) -> Self {
        ResultRecord {
            url: item.url,
            title: item.title,
            summary: item.summary,
        }
    }
}

/// A search backend.
pub trait SearchProvider: Send + Sync {
    /// Run `query` and return the provider's items in rank order.
    fn search(&self, query: &str) -> Result<Vec<ProviderItem>>;

    /// Get the name of this provider (for logging).
    fn name(&self) -> &str;
}

impl<P: SearchProvider + ?Sized> SearchProvider for Box<P> {
    fn search(&self, query: &str) -> Result<Vec<ProviderItem>> {
        (**self).search(query)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
