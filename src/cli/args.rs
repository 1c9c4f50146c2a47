//! Command line argument parsing for the Rocchio CLI using clap.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::TokenizerKind;
use crate::search::config::DEFAULT_ENDPOINT;

/// Rocchio - interactive relevance feedback for web search
#[derive(Parser, Debug, Clone)]
#[command(name = "rocchio")]
#[command(about = "Refine a web search query from your relevance judgments")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct RocchioArgs {
    /// Search provider API key
    #[arg(value_name = "API_KEY")]
    pub api_key: String,

    /// Search engine (index) identifier
    #[arg(value_name = "ENGINE_ID")]
    pub engine_id: String,

    /// Target precision in [0, 1]
    #[arg(value_name = "PRECISION", value_parser = parse_precision)]
    pub precision: f64,

    /// Initial query
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Stop-word file, one word per line (default: built-in English list)
    #[arg(long, value_name = "FILE", env = "ROCCHIO_STOP_WORDS")]
    pub stop_words: Option<PathBuf>,

    /// Tokenizer applied to titles and snippets before stop-word removal
    #[arg(long, default_value = "whitespace")]
    pub tokenizer: TokenizerOption,

    /// Times the title is counted relative to the snippet
    #[arg(long, default_value = "2")]
    pub title_repeat: usize,

    /// Search endpoint URL
    #[arg(long, default_value = DEFAULT_ENDPOINT, env = "ROCCHIO_ENDPOINT")]
    pub endpoint: String,

    /// Search request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,

    /// Minimum number of results the first search must return
    #[arg(long, default_value = "10")]
    pub min_results: usize,

    /// Give up after this many iterations
    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl RocchioArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable transcript
    Human,
    /// One JSON report per iteration on stdout; prompts go to stderr
    Json,
}

/// Tokenizer choices exposed on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizerOption {
    /// Split on whitespace only
    Whitespace,
    /// Unicode word boundaries
    Unicode,
    /// Runs of word characters
    Regex,
}

impl From<TokenizerOption> for TokenizerKind {
    fn from(option: TokenizerOption) -> Self {
        match option {
            TokenizerOption::Whitespace => TokenizerKind::Whitespace,
            TokenizerOption::Unicode => TokenizerKind::UnicodeWord,
            TokenizerOption::Regex => TokenizerKind::Regex,
        }
    }
}

fn parse_precision(value: &str) -> std::result::Result<f64, String> {
    let precision: f64 = value
        .trim()
        .parse()
        .map_err(|_| "Precision must be a real number".to_string())?;
    if !(0.0..=1.0).contains(&precision) {
        return Err(format!("Precision must be within [0, 1], got {precision}"));
    }
    Ok(precision)
}
