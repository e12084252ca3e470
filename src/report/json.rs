//! JSON reporter for scripting

use crate::error::{NormalizeError, Result};
use crate::normalize::NormalizeOutcome;
use std::path::PathBuf;

pub struct JsonReporter {
    output_path: Option<PathBuf>,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    /// Fails on paths that are not valid UTF-8
    pub fn render(outcomes: &[NormalizeOutcome]) -> Result<String> {
        serde_json::to_string_pretty(outcomes).map_err(NormalizeError::Report)
    }

    /// Write to the configured file, or stdout
    pub fn report(&self, outcomes: &[NormalizeOutcome]) -> Result<()> {
        let json = Self::render(outcomes)?;
        match &self.output_path {
            Some(path) => std::fs::write(path, json).map_err(|source| NormalizeError::Write {
                path: path.clone(),
                source,
            }),
            None => {
                println!("{}", json);
                Ok(())
            }
        }
    }
}
