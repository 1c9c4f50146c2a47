//! Google Custom Search JSON API provider.
//!
//! Requires an API key and a programmable search engine id. Requests are
//! blocking and bounded by [`SearchConfig::timeout`].

use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::{Result, RocchioError};
use crate::search::{ProviderItem, SearchConfig, SearchProvider};

/// Response body of a Custom Search request. `items` is absent when the
/// query matched nothing.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItem {
    link: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
    file_format: Option<String>,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: u16,
    #[serde(default)]
    message: String,
}

/// Search provider backed by the Google Custom Search JSON API.
#[derive(Debug)]
pub struct GoogleSearchProvider {
    client: Client,
    config: SearchConfig,
}

impl GoogleSearchProvider {
    /// Create a provider; fails on invalid configuration.
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(GoogleSearchProvider { client, config })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl SearchProvider for GoogleSearchProvider {
    fn search(&self, query: &str) -> Result<Vec<ProviderItem>> {
        let num = self.config.results_per_page.to_string();
        debug!("GET {} q={:?} num={}", self.config.endpoint, query, num);

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("cx", self.config.engine_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    RocchioError::timeout(format!(
                        "no response within {}s",
                        self.config.timeout_secs
                    ))
                } else {
                    RocchioError::from(e)
                }
            })?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(RocchioError::search(describe_error(status.as_u16(), &body)));
        }

        parse_response(&body)
    }

    fn name(&self) -> &str {
        "google"
    }
}

/// Decode a successful response body into provider items.
pub fn parse_response(body: &str) -> Result<Vec<ProviderItem>> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response
        .items
        .into_iter()
        .map(|item| ProviderItem {
            url: item.link,
            title: item.title,
            summary: item.snippet,
            file_format: item.file_format,
        })
        .collect())
}

fn describe_error(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse { error }) if !error.message.is_empty() => {
            let code = if error.code == 0 { status } else { error.code };
            format!("HTTP {code}: {}", error.message)
        }
        _ => format!("HTTP {status}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response() {
        let body = r#"{
            "kind": "customsearch#search",
            "items": [
                {"link": "https://a.example", "title": "Alpha", "snippet": "first hit"},
                {"link": "https://b.example/x.pdf", "title": "Beta", "fileFormat": "PDF/Adobe Acrobat"},
                {"link": "https://c.example", "title": "Gamma"}
            ]
        }"#;

        let items = parse_response(body).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].url, "https://a.example");
        assert_eq!(items[0].summary, "first hit");
        assert!(!items[0].is_non_html());
        assert!(items[1].is_non_html());
        assert_eq!(items[2].summary, "");
    }

    #[test]
    fn test_parse_response_without_items() {
        let items = parse_response(r#"{"kind": "customsearch#search"}"#).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_parse_response_rejects_garbage() {
        assert!(parse_response("<html>").is_err());
    }

    #[test]
    fn test_describe_error() {
        let body = r#"{"error": {"code": 429, "message": "Quota exceeded"}}"#;
        assert_eq!(describe_error(429, body), "HTTP 429: Quota exceeded");
        assert_eq!(describe_error(502, "bad gateway"), "HTTP 502");
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(GoogleSearchProvider::new(SearchConfig::new("", "cx")).is_err());
    }
}
