//! Output formatting for the feedback loop.

use std::io::Write;

use log::debug;
use serde::Serialize;

use crate::cli::args::OutputFormat;
use crate::document::ResultRecord;
use crate::error::Result;
use crate::feedback::{FeedbackSession, IterationReport, SessionObserver, Termination};

/// Prints the iteration transcript in the chosen format.
///
/// In human mode everything goes to `out`. In JSON mode each finished
/// iteration is written to `out` as one JSON document and the
/// human-oriented headers go nowhere.
#[derive(Debug)]
pub struct ConsoleObserver<W> {
    out: W,
    format: OutputFormat,
    pretty: bool,
    api_key: String,
    engine_id: String,
}

impl<W: Write> ConsoleObserver<W> {
    pub fn new(out: W, format: OutputFormat, pretty: bool) -> Self {
        ConsoleObserver {
            out,
            format,
            pretty,
            api_key: String::new(),
            engine_id: String::new(),
        }
    }

    /// Credentials shown in the parameters block. The key is masked.
    pub fn with_credentials(mut self, api_key: &str, engine_id: &str) -> Self {
        self.api_key = mask_key(api_key);
        self.engine_id = engine_id.to_string();
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_json<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        writeln!(self.out, "{json}")?;
        Ok(())
    }

    fn write_summary(&mut self, report: &IterationReport) -> Result<()> {
        if let Some(
            termination @ (Termination::NoRelevantResults | Termination::TooFewResults { .. }),
        ) = &report.termination
        {
            writeln!(self.out, "{termination}")?;
            return Ok(());
        }

        writeln!(self.out, "=======================")?;
        writeln!(self.out, "FEEDBACK SUMMARY")?;
        writeln!(self.out, "Query {}", report.query)?;
        if let Some(precision) = report.precision {
            writeln!(self.out, "Precision {precision:.1}")?;
        }

        match &report.termination {
            None => {
                writeln!(
                    self.out,
                    "Still below the desired precision of {}",
                    report.target_precision
                )?;
                writeln!(self.out, "Augmenting by  {}", report.added_terms.join(" "))?;
            }
            Some(Termination::TargetReached { .. }) => {
                writeln!(self.out, "Desired precision reached, done")?;
            }
            Some(other) => {
                writeln!(
                    self.out,
                    "Still below the desired precision of {}",
                    report.target_precision
                )?;
                writeln!(self.out, "{other}")?;
            }
        }
        Ok(())
    }
}

impl<W: Write> SessionObserver for ConsoleObserver<W> {
    fn iteration_started(&mut self, session: &FeedbackSession) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }
        writeln!(
            self.out,
            "Parameters:\nClient key  = {}\nEngine key  = {}\nQuery       = {}\nPrecision   = {}",
            self.api_key,
            self.engine_id,
            session.query(),
            session.config().target_precision
        )?;
        Ok(())
    }

    fn results_received(&mut self, results: &[ResultRecord]) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }
        debug!("Showing {} results", results.len());
        writeln!(self.out, "Search Results:")?;
        writeln!(self.out, "=======================")?;
        Ok(())
    }

    fn iteration_finished(&mut self, report: &IterationReport) -> Result<()> {
        match self.format {
            OutputFormat::Human => self.write_summary(report),
            OutputFormat::Json => self.write_json(report),
        }
    }
}

/// Keep the last four characters of a key visible.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{visible}", "*".repeat(chars.len() - 4))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn report(termination: Option<Termination>, added_terms: Vec<&str>) -> IterationReport {
        IterationReport {
            iteration: 1,
            query: "jaguar".to_string(),
            target_precision: 0.9,
            results: 10,
            relevant: 3,
            precision: Some(0.3),
            added_terms: added_terms.into_iter().map(String::from).collect(),
            termination,
            started_at: Utc::now(),
        }
    }

    fn render(format: OutputFormat, report: &IterationReport) -> String {
        let mut observer =
            ConsoleObserver::new(Vec::new(), format, false).with_credentials("secret-key", "cx");
        observer.iteration_finished(report).unwrap();
        String::from_utf8(observer.into_inner()).unwrap()
    }

    #[test]
    fn test_human_summary_when_augmenting() {
        let output = render(OutputFormat::Human, &report(None, vec!["cars", "sedans"]));
        assert!(output.contains("FEEDBACK SUMMARY\nQuery jaguar\nPrecision 0.3\n"));
        assert!(output.contains("Still below the desired precision of 0.9"));
        assert!(output.contains("Augmenting by  cars sedans"));
    }

    #[test]
    fn test_human_summary_when_done() {
        let output = render(
            OutputFormat::Human,
            &report(Some(Termination::TargetReached { precision: 0.9 }), vec![]),
        );
        assert!(output.ends_with("Desired precision reached, done\n"));
    }

    #[test]
    fn test_no_relevant_prints_only_message() {
        let output = render(
            OutputFormat::Human,
            &report(Some(Termination::NoRelevantResults), vec![]),
        );
        assert_eq!(output, "No relevant documents found in this iteration. Exit.\n");
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("abcdefgh"), "****efgh");
        assert_eq!(mask_key("abc"), "***");
        assert_eq!(mask_key(""), "");
    }

    #[test]
    fn test_results_header_only_in_human_mode() {
        let records = vec![ResultRecord::new("u", "t", "s")];

        let mut human = ConsoleObserver::new(Vec::new(), OutputFormat::Human, false);
        human.results_received(&records).unwrap();
        let human = String::from_utf8(human.into_inner()).unwrap();
        assert!(human.starts_with("Search Results:\n"));

        let mut json = ConsoleObserver::new(Vec::new(), OutputFormat::Json, false);
        json.results_received(&records).unwrap();
        assert!(json.into_inner().is_empty());
    }

    #[test]
    fn test_json_report() {
        let output = render(OutputFormat::Json, &report(None, vec!["cars"]));
        let value: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(value["query"], "jaguar");
        assert_eq!(value["added_terms"][0], "cars");
        assert!(value["termination"].is_null());
    }
}
