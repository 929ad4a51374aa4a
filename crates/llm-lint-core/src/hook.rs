use std::io;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::filter::FileFilter;
use crate::llm::LlmClient;
use crate::report::Reporter;

/// Outcome counts of a single hook run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HookSummary {
    /// Files the model returned a verdict for.
    pub reviewed: usize,
    /// Reviewed files whose verdict failed.
    pub flagged: usize,
    /// Source files that were unreadable, oversized, or whose review failed.
    pub skipped: usize,
}

/// Sequential review loop: filter each file, ask the model, report.
pub struct Hook<C> {
    client: C,
    filter: FileFilter,
}

impl<C: LlmClient> Hook<C> {
    pub fn new(client: C, filter: FileFilter) -> Self {
        Self { client, filter }
    }

    pub fn filter(&self) -> &FileFilter {
        &self.filter
    }

    /// Review `files` one at a time, writing every message to `out`.
    ///
    /// Per-file failures are printed and skipped; only write errors on `out`
    /// are returned.
    pub async fn run<W: io::Write>(
        &self,
        files: &[PathBuf],
        out: &mut W,
    ) -> io::Result<HookSummary> {
        let mut summary = HookSummary::default();
        if let Err(rejection) = self.filter.admit_batch(files.len()) {
            writeln!(out, "{rejection}")?;
            return Ok(summary);
        }

        let mut reporter = Reporter::new();
        for path in files {
            let source = match self.filter.load(path) {
                Ok(Some(source)) => source,
                Ok(None) => {
                    debug!(file = %path.display(), "extension does not match, skipping");
                    continue;
                }
                Err(err) => {
                    writeln!(out, "{err}")?;
                    summary.skipped += 1;
                    continue;
                }
            };

            let name = source.name();
            let verdict = match self.client.review(&name, &source.content).await {
                Ok(verdict) => verdict,
                Err(err) => {
                    writeln!(out, "Error querying LLM for file {name}: {err}")?;
                    summary.skipped += 1;
                    continue;
                }
            };

            summary.reviewed += 1;
            if !verdict.passes {
                summary.flagged += 1;
            }
            reporter.record(out, &name, &verdict)?;
        }

        reporter.finish(out)?;
        info!(
            reviewed = summary.reviewed,
            flagged = summary.flagged,
            skipped = summary.skipped,
            "review finished"
        );
        Ok(summary)
    }
}
