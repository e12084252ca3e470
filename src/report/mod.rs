mod colors;
mod json;
mod terminal;

pub use json::JsonReporter;
pub use terminal::TerminalReporter;

use crate::error::Result;
use crate::normalize::NormalizeOutcome;
use std::path::PathBuf;

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    /// Colored one-line-per-file output
    #[default]
    Terminal,
    /// JSON machine-readable format
    Json,
}

/// Reporter for normalization outcomes
pub struct Reporter {
    format: ReportFormat,
    output_path: Option<PathBuf>,
    show_summary: bool,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>) -> Self {
        Self {
            format,
            output_path,
            show_summary: true,
        }
    }

    /// Print the totals line after terminal output
    pub fn with_summary(mut self, show: bool) -> Self {
        self.show_summary = show;
        self
    }

    pub fn report(&self, outcomes: &[NormalizeOutcome]) -> Result<()> {
        match self.format {
            ReportFormat::Terminal => {
                TerminalReporter::new()
                    .with_summary(self.show_summary)
                    .report(outcomes);
                Ok(())
            }
            ReportFormat::Json => JsonReporter::new(self.output_path.clone()).report(outcomes),
        }
    }
}
