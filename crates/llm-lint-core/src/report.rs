use std::fmt::Write as _;
use std::io;

use crate::llm::Verdict;

const SEPARATOR: &str = "--------------------------------------------";
const WARNING_LINE: &str =
    "Warning: Some files do not follow Golang best practices. Please review the suggestions above.";
const ALL_CLEAR_LINE: &str = "All checked files follow Golang best practices.";

/// Collects verdicts across a run and prints warnings as they arrive.
#[derive(Debug, Default, Clone)]
pub struct Reporter {
    warned: bool,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any recorded verdict failed.
    #[cfg(test)]
    fn warned(&self) -> bool {
        self.warned
    }

    /// Print the suggestions for a failing verdict; passing verdicts print nothing.
    pub fn record<W: io::Write>(
        &mut self,
        out: &mut W,
        file: &str,
        verdict: &Verdict,
    ) -> io::Result<()> {
        if verdict.passes {
            return Ok(());
        }
        self.warned = true;
        out.write_all(render_warning(file, verdict).as_bytes())
    }

    /// Print the aggregate line once every file has been handled.
    pub fn finish<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(render_summary(self.warned).as_bytes())
    }
}

/// Render the block printed for a file that does not follow best practices.
pub fn render_warning(file: &str, verdict: &Verdict) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "\nFile: {file} does not follow best practices:");
    let _ = writeln!(out, "Suggestions: {}", verdict.suggestions);
    let _ = writeln!(out, "{SEPARATOR}");
    out
}

pub fn render_summary(warned: bool) -> String {
    if warned {
        format!("\n{WARNING_LINE}\n")
    } else {
        format!("{ALL_CLEAR_LINE}\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(passes: bool, suggestions: &str) -> Verdict {
        Verdict {
            passes,
            suggestions: suggestions.into(),
        }
    }

    #[test]
    fn passing_verdict_prints_nothing() {
        let mut reporter = Reporter::new();
        let mut out = Vec::new();
        reporter
            .record(&mut out, "main.go", &verdict(true, "looks fine"))
            .unwrap();
        assert!(out.is_empty());
        assert!(!reporter.warned());
    }

    #[test]
    fn failing_verdict_prints_suggestions() {
        let mut reporter = Reporter::new();
        let mut out = Vec::new();
        reporter
            .record(&mut out, "cmd/app.go", &verdict(false, "use gofmt"))
            .unwrap();
        let output = String::from_utf8(out).unwrap();
        assert_eq!(
            output,
            "\nFile: cmd/app.go does not follow best practices:\nSuggestions: use gofmt\n--------------------------------------------\n"
        );
        assert!(reporter.warned());
    }

    #[test]
    fn summary_reflects_any_failure() {
        let mut reporter = Reporter::new();
        let mut out = Vec::new();
        reporter.record(&mut out, "a.go", &verdict(false, "x")).unwrap();
        reporter.record(&mut out, "b.go", &verdict(true, "")).unwrap();
        out.clear();
        reporter.finish(&mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Warning: Some files do not follow Golang best practices."));
        assert!(!output.contains("All checked files"));
    }

    #[test]
    fn summary_all_clear_without_failures() {
        assert_eq!(
            render_summary(false),
            "All checked files follow Golang best practices.\n"
        );
    }
}
