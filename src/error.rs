//! Error types for normalization jobs
//!
//! Every variant carries a stable diagnostic code so the CLI can render it
//! through miette with a help line where one is useful.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum NormalizeError {
    #[error("Failed to read {}", path.display())]
    #[diagnostic(code(csvnorm::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid {encoding}{}", path.display(), offset_suffix(*offset))]
    #[diagnostic(
        code(csvnorm::decode),
        help("pass the file's real encoding, e.g. --encoding latin-1")
    )]
    Decode {
        path: PathBuf,
        encoding: String,
        offset: Option<usize>,
    },

    #[error("Character {ch:?} cannot be represented in {encoding}")]
    #[diagnostic(
        code(csvnorm::encode),
        help("pick a target character the output encoding can hold")
    )]
    Encode { ch: char, encoding: String },

    #[error("Failed to write {}", path.display())]
    #[diagnostic(code(csvnorm::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to back up {} to {}", path.display(), backup.display())]
    #[diagnostic(code(csvnorm::backup))]
    Backup {
        path: PathBuf,
        backup: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Substituting {0:?} with itself does nothing")]
    #[diagnostic(
        code(csvnorm::identity),
        help("--from and --to must name different characters")
    )]
    IdentitySubstitution(char),

    #[error("Unknown character name: {0:?}")]
    #[diagnostic(
        code(csvnorm::character),
        help("use a single character or one of: comma, period, dot, semicolon, tab, pipe, space")
    )]
    InvalidCharacter(String),

    #[error("Unknown preset: {0}")]
    #[diagnostic(
        code(csvnorm::preset),
        help("known presets: comma-to-period, period-to-comma, semicolon-to-comma, comma-to-semicolon, swap-comma-period")
    )]
    UnknownPreset(String),

    #[error("Unknown or unsupported encoding: {0}")]
    #[diagnostic(
        code(csvnorm::encoding),
        help("encodings must round-trip; utf-8, latin-1 and windows-125x work")
    )]
    UnknownEncoding(String),

    #[error("Invalid configuration in {}: {message}", path.display())]
    #[diagnostic(code(csvnorm::config))]
    Config { path: PathBuf, message: String },

    #[error("No input given and no jobs configured")]
    #[diagnostic(
        code(csvnorm::no_jobs),
        help("pass an INPUT file or create a .csvnorm.toml with [[jobs]]")
    )]
    NoJobs,

    #[error("Prompt failed: {0}")]
    #[diagnostic(code(csvnorm::prompt))]
    Prompt(String),

    #[error("Failed to serialize the JSON report")]
    #[diagnostic(
        code(csvnorm::report),
        help("JSON output needs UTF-8 file paths; use --format terminal for other names")
    )]
    Report(#[source] serde_json::Error),
}

fn offset_suffix(offset: Option<usize>) -> String {
    match offset {
        Some(offset) => format!(" (invalid byte at offset {})", offset),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
