//! Terminal reporter with colored output
//!
//! One line per job followed by a totals line:
//!
//! ```text
//! ✓ data/rent.csv -> data/rent_out.csv  '.' -> ','  1204 replaced  (latin-1, 48211 bytes)
//! ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//! 1 file processed, 1204 characters replaced
//! ```

use crate::normalize::NormalizeOutcome;
use crate::report::colors::{BoxChars, StatusSymbol, StructureColors};
use colored::Colorize;

/// Terminal reporter
pub struct TerminalReporter {
    /// Print the totals line
    show_summary: bool,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self { show_summary: true }
    }

    pub fn with_summary(mut self, show: bool) -> Self {
        self.show_summary = show;
        self
    }

    pub fn report(&self, outcomes: &[NormalizeOutcome]) {
        if outcomes.is_empty() {
            println!("{}", "Nothing to normalize.".yellow());
            return;
        }

        for outcome in outcomes {
            println!("{}", Self::format_line(outcome));
        }

        if self.show_summary {
            println!("{}", BoxChars::heavy_line(50));
            println!("{}", Self::format_summary(outcomes));
        }
    }

    fn format_line(outcome: &NormalizeOutcome) -> String {
        let detail = if outcome.skipped {
            "skipped, overwrite declined".to_string()
        } else if outcome.dry_run {
            format!("{}, dry run", outcome.encoding)
        } else {
            format!("{}, {} bytes", outcome.encoding, outcome.bytes_written)
        };

        let mut line = format!(
            "{} {} -> {}  {}  {} replaced  ({})",
            StatusSymbol::for_outcome(outcome),
            StructureColors::file_path(&outcome.input.display().to_string()),
            StructureColors::file_path(&outcome.output.display().to_string()),
            StructureColors::substitution(&outcome.substitution.to_string()),
            StructureColors::count(&outcome.replaced.to_string()),
            StructureColors::detail(&detail),
        );

        if let Some(backup) = &outcome.backup {
            line.push_str(&format!(
                "  {}",
                StructureColors::detail(&format!("backup: {}", backup.display()))
            ));
        }

        line
    }

    fn format_summary(outcomes: &[NormalizeOutcome]) -> String {
        // Declined overwrites changed nothing on disk
        let replaced: usize = outcomes
            .iter()
            .filter(|o| !o.skipped)
            .map(|o| o.replaced)
            .sum();
        let skipped = outcomes.iter().filter(|o| o.skipped).count();
        let files = outcomes.len();

        let mut summary = format!(
            "{} {} processed, {} characters replaced",
            StructureColors::count(&files.to_string()),
            if files == 1 { "file" } else { "files" },
            StructureColors::count(&replaced.to_string()),
        );
        if skipped > 0 {
            summary.push_str(&format!(", {} skipped", skipped));
        }
        if outcomes.iter().any(|o| o.dry_run) {
            summary.push_str(&format!(" {}", "(dry run, nothing written)".yellow()));
        }
        summary
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}
