//! Terminal relevance judge.

use std::io::{self, BufRead, Write};

use crate::document::{Relevance, ResultRecord};
use crate::error::Result;
use crate::feedback::RelevanceJudge;

/// Shows each result and asks `Relevant (Y/N)?` until it gets a valid answer.
#[derive(Debug)]
pub struct PromptJudge<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptJudge<R, W> {
    pub fn new(input: R, output: W) -> Self {
        PromptJudge { input, output }
    }

    /// Give back the reader and writer.
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    fn read_answer(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before every result was judged",
            )
            .into());
        }
        Ok(line)
    }
}

impl<R: BufRead, W: Write> RelevanceJudge for PromptJudge<R, W> {
    fn judge(&mut self, rank: usize, record: &ResultRecord) -> Result<Relevance> {
        writeln!(
            self.output,
            "Result {}\n[\n URL: {}\n Title: {}\n Summary: {}\n]",
            rank + 1,
            record.url,
            record.title,
            record.summary
        )?;
        write!(self.output, "\nRelevant (Y/N)? ")?;
        self.output.flush()?;

        loop {
            let answer = self.read_answer()?;
            if let Some(relevance) = Relevance::from_answer(&answer) {
                return Ok(relevance);
            }
            write!(self.output, "Please enter Y or N\nRelevant (Y/N)? ")?;
            self.output.flush()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn record() -> ResultRecord {
        ResultRecord::new("https://example.com", "Example", "An example page")
    }

    #[test]
    fn test_accepts_lowercase_answers() {
        let mut judge = PromptJudge::new(Cursor::new("y\n"), Vec::new());
        assert_eq!(judge.judge(0, &record()).unwrap(), Relevance::Relevant);

        let (_, output) = judge.into_inner();
        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("Result 1\n[\n URL: https://example.com\n"));
        assert!(output.ends_with("Relevant (Y/N)? "));
    }

    #[test]
    fn test_reprompts_on_invalid_input() {
        let mut judge = PromptJudge::new(Cursor::new("maybe\n\nN\n"), Vec::new());
        assert_eq!(judge.judge(4, &record()).unwrap(), Relevance::NonRelevant);

        let (_, output) = judge.into_inner();
        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("Result 5\n"));
        assert_eq!(output.matches("Please enter Y or N").count(), 2);
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let mut judge = PromptJudge::new(Cursor::new("x\n"), Vec::new());
        assert!(judge.judge(0, &record()).is_err());
    }
}
