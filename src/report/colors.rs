//! Centralized color scheme for consistent output formatting

use crate::normalize::NormalizeOutcome;
use colored::{ColoredString, Colorize};

/// Per-job status markers
pub struct StatusSymbol;

impl StatusSymbol {
    /// File was written
    pub fn written() -> ColoredString {
        "✓".green().bold()
    }

    /// Dry run, nothing written
    pub fn dry_run() -> ColoredString {
        "~".yellow()
    }

    /// Overwrite declined
    pub fn skipped() -> ColoredString {
        "⚠".yellow().bold()
    }

    pub fn for_outcome(outcome: &NormalizeOutcome) -> ColoredString {
        if outcome.skipped {
            Self::skipped()
        } else if outcome.dry_run {
            Self::dry_run()
        } else {
            Self::written()
        }
    }
}

/// Structural element colors
pub struct StructureColors;

impl StructureColors {
    pub fn file_path(text: &str) -> ColoredString {
        text.cyan().bold()
    }

    /// Substitution description, e.g. `',' -> '.'`
    pub fn substitution(text: &str) -> ColoredString {
        text.magenta()
    }

    pub fn count(text: &str) -> ColoredString {
        text.white().bold()
    }

    /// Secondary details such as encoding and byte counts
    pub fn detail(text: &str) -> ColoredString {
        text.dimmed()
    }
}

/// Box drawing characters
pub struct BoxChars;

impl BoxChars {
    pub fn heavy_line(width: usize) -> String {
        "━".repeat(width)
    }
}
