//! # Rocchio
//!
//! Interactive relevance feedback for web search.
//!
//! A user issues a query, marks each result relevant or not, and the
//! query is augmented with up to two terms drawn from the relevant
//! results until the requested precision is reached.
//!
//! ## Features
//!
//! - TF-IDF term weighting over titles and snippets
//! - Configurable tokenizer and stop-word pipeline
//! - Pluggable search providers (Google Custom Search, fixed responses)
//! - I/O-free session state machine with a blocking driver

pub mod analysis;
pub mod cli;
pub mod document;
pub mod error;
pub mod expansion;
pub mod feedback;
pub mod search;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
