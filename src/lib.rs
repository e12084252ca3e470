//! csvnorm - Normalize decimal separators and delimiters in CSV files
//!
//! Converts CSV text between regional conventions by substituting one
//! character for another over the raw file contents.
//!
//! # Architecture
//!
//! The pipeline for each job consists of:
//! 1. **Config** - Build jobs from CLI flags or a `.csvnorm.toml` job list
//! 2. **Decoding** - Read the whole file and decode it strictly (UTF-8, Latin-1, ...)
//! 3. **Substitution** - Replace or swap characters in a single pass
//! 4. **Writing** - Re-encode and write atomically to the output target
//! 5. **Reporting** - Output per-file outcomes as terminal text or JSON

pub mod config;
pub mod error;
pub mod normalize;
pub mod report;

pub use config::Config;
pub use error::{NormalizeError, Result};
pub use normalize::{
    BatchRun, FileNormalizer, NormalizeJob, NormalizeOutcome, OutputTarget, Preset,
    Substitution, TextEncoding,
};
pub use report::{ReportFormat, Reporter};
