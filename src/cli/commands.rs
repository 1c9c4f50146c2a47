//! Command implementation for the Rocchio CLI.

use std::io::{self, Write};

use anyhow::Context;
use log::{debug, info};

use crate::analysis::token_filter::StopFilter;
use crate::cli::args::{OutputFormat, RocchioArgs};
use crate::cli::output::ConsoleObserver;
use crate::cli::prompt::PromptJudge;
use crate::error::Result;
use crate::expansion::{ExpansionConfig, QueryExpander};
use crate::feedback::{FeedbackSession, SessionConfig, Termination, run_session};
use crate::search::{GoogleSearchProvider, SearchClient, SearchConfig};

/// Run the interactive feedback loop described by `args`.
pub fn execute_command(args: RocchioArgs) -> Result<Termination> {
    let expander = build_expander(&args)?;
    let session_config = SessionConfig::new(args.precision)
        .with_min_initial_results(args.min_results)
        .with_max_iterations(args.max_iterations);
    let mut session = FeedbackSession::new(args.query.clone(), session_config, expander)?;

    let search_config = SearchConfig::new(args.api_key.clone(), args.engine_id.clone())
        .with_endpoint(args.endpoint.clone())
        .with_timeout_secs(args.timeout);
    debug!("Search configuration: {search_config:?}");
    let client = SearchClient::new(GoogleSearchProvider::new(search_config)?);

    let stdin = io::stdin();
    let mut observer = ConsoleObserver::new(io::stdout(), args.output_format, args.pretty)
        .with_credentials(&args.api_key, &args.engine_id);

    // JSON mode keeps stdout machine-readable.
    let termination = match args.output_format {
        OutputFormat::Human => {
            let mut judge = PromptJudge::new(stdin.lock(), io::stdout());
            run_session(&mut session, &client, &mut judge, &mut observer)?
        }
        OutputFormat::Json => {
            let mut judge = PromptJudge::new(stdin.lock(), io::stderr());
            run_session(&mut session, &client, &mut judge, &mut observer)?
        }
    };

    io::stdout().flush()?;
    info!(
        "Finished after {} iteration(s): {termination}",
        session.iteration()
    );
    Ok(termination)
}

/// Build the query expander from the stop-word and tokenizer options.
pub fn build_expander(args: &RocchioArgs) -> Result<QueryExpander> {
    let stop_filter = match &args.stop_words {
        Some(path) => {
            info!("Loading stop words from: {}", path.display());
            StopFilter::from_file(path)
                .with_context(|| format!("cannot load stop words from {}", path.display()))?
        }
        None => StopFilter::new(),
    };
    debug!("Using {} stop words", stop_filter.len());

    let config = ExpansionConfig {
        title_repeat: args.title_repeat,
        tokenizer: args.tokenizer.into(),
        ..ExpansionConfig::default()
    };
    QueryExpander::new(stop_filter, config)
}
