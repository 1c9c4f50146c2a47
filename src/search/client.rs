//! Filtering, failure-absorbing search client.

use log::{debug, error, warn};

use crate::document::ResultRecord;
use crate::search::{ProviderItem, SearchProvider};

/// Turns a query into zero or more [`ResultRecord`]s.
///
/// Provider failures (network, authentication, quota, timeout) are logged and
/// reported as an empty list. Items flagged as non-HTML files are dropped;
/// the rest keep the provider's rank order.
#[derive(Debug)]
pub struct SearchClient<P> {
    provider: P,
}

impl<P: SearchProvider> SearchClient<P> {
    /// Create a client over the given provider.
    pub fn new(provider: P) -> Self {
        SearchClient { provider }
    }

    /// Get the wrapped provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Search for `query`, returning only HTML documents in rank order.
    pub fn search(&self, query: &str) -> Vec<ResultRecord> {
        if query.trim().is_empty() {
            warn!("Refusing to search for an empty query");
            return Vec::new();
        }

        match self.provider.search(query) {
            Ok(items) => {
                let total = items.len();
                let records = filter_html(items);
                debug!(
                    "{} returned {} items for {:?}, {} after dropping non-HTML files",
                    self.provider.name(),
                    total,
                    query,
                    records.len()
                );
                records
            }
            Err(e) => {
                error!("Error performing search with {}: {}", self.provider.name(), e);
                Vec::new()
            }
        }
    }
}

/// Keep the HTML items, in order, as result records.
pub fn filter_html(items: Vec<ProviderItem>) -> Vec<ResultRecord> {
    items
        .into_iter()
        .filter(|item| !item.is_non_html())
        .map(ResultRecord::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::FixedSearchProvider;

    #[test]
    fn test_filter_html_preserves_order() {
        let items = vec![
            ProviderItem::html("https://a.example", "A", "first"),
            ProviderItem::html("https://b.example/doc.pdf", "B", "").with_file_format("PDF/Adobe Acrobat"),
            ProviderItem::html("https://c.example", "C", "third"),
        ];

        let records = filter_html(items);
        let urls: Vec<&str> = records.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["https://a.example", "https://c.example"]);
    }

    #[test]
    fn test_failure_yields_empty_results() {
        let client = SearchClient::new(FixedSearchProvider::failing("quota exceeded"));
        assert!(client.search("rust").is_empty());
    }

    #[test]
    fn test_empty_query_yields_empty_results() {
        let client = SearchClient::new(FixedSearchProvider::new(vec![ProviderItem::html(
            "https://a.example",
            "A",
            "",
        )]));
        assert!(client.search("   ").is_empty());
        assert_eq!(client.search("anything").len(), 1);
    }
}
