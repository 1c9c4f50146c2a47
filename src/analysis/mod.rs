//! Text analysis for result snippets and titles.
//!
//! Tokenizers split text, filters lowercase it and drop stop words, and an
//! analyzer chains the two.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
