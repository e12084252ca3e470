//! File normalization
//!
//! A job reads a whole file, decodes it, runs one substitution over the
//! text, re-encodes it and writes it to the output target:
//!
//! 1. Read all bytes of the input
//! 2. Decode with the job's encoding (strict)
//! 3. Apply the substitution in a single pass
//! 4. Encode back with the same encoding (strict)
//! 5. Write through a temp file in the output directory, then rename
//!
//! Step 5 means a failed write leaves any previous output untouched.

mod encoding;
mod substitution;
mod target;

pub use encoding::TextEncoding;
pub use substitution::{parse_char, Applied, Preset, Substitution};
pub use target::{backup_path, with_suffix, OutputTarget, DEFAULT_SUFFIX};

use crate::error::{NormalizeError, Result};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// One input file and what to do with it
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeJob {
    pub input: PathBuf,
    pub substitution: Substitution,
    pub encoding: TextEncoding,
    pub target: OutputTarget,
    /// Copy an existing output to `<name>.bak` before overwriting it
    pub backup: bool,
}

impl NormalizeJob {
    pub fn new(input: impl Into<PathBuf>, substitution: Substitution) -> Self {
        Self {
            input: input.into(),
            substitution,
            encoding: TextEncoding::default(),
            target: OutputTarget::default(),
            backup: false,
        }
    }

    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_target(mut self, target: OutputTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }

    pub fn output_path(&self) -> PathBuf {
        self.target.resolve(&self.input)
    }
}

/// What a job did
#[derive(Debug, Clone, Serialize)]
pub struct NormalizeOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub substitution: Substitution,
    pub encoding: TextEncoding,
    /// Characters changed by the substitution
    pub replaced: usize,
    /// Characters in the decoded text
    pub chars: usize,
    /// Zero for dry runs and skipped jobs
    pub bytes_written: usize,
    pub dry_run: bool,
    /// Overwrite was declined
    pub skipped: bool,
    pub backup: Option<PathBuf>,
}

/// Outcomes of a batch and the error that stopped it, if any
#[derive(Debug)]
pub struct BatchRun {
    /// Jobs that finished before the failure, in order
    pub outcomes: Vec<NormalizeOutcome>,
    pub failure: Option<NormalizeError>,
}

/// Decides whether an existing output file may be replaced
pub trait OverwritePolicy {
    fn allow_overwrite(&self, path: &Path) -> Result<bool>;
}

/// Replace existing files without asking
pub struct AlwaysOverwrite;

impl OverwritePolicy for AlwaysOverwrite {
    fn allow_overwrite(&self, _path: &Path) -> Result<bool> {
        Ok(true)
    }
}

/// Ask on the terminal before replacing an existing file
pub struct ConfirmOverwrite;

impl OverwritePolicy for ConfirmOverwrite {
    fn allow_overwrite(&self, path: &Path) -> Result<bool> {
        dialoguer::Confirm::new()
            .with_prompt(format!("Overwrite {}?", path.display()))
            .default(false)
            .interact()
            .map_err(|e| NormalizeError::Prompt(e.to_string()))
    }
}

/// Runs normalization jobs
pub struct FileNormalizer {
    dry_run: bool,
    policy: Box<dyn OverwritePolicy>,
}

impl FileNormalizer {
    pub fn new() -> Self {
        Self {
            dry_run: false,
            policy: Box::new(AlwaysOverwrite),
        }
    }

    /// Compute everything but write nothing
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_policy(mut self, policy: impl OverwritePolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    pub fn run(&self, job: &NormalizeJob) -> Result<NormalizeOutcome> {
        let output = job.output_path();
        info!("Normalizing {} ({})", job.input.display(), job.substitution);

        let bytes = std::fs::read(&job.input).map_err(|source| NormalizeError::Read {
            path: job.input.clone(),
            source,
        })?;
        let text = job.encoding.decode(&bytes, &job.input)?;
        let chars = text.chars().count();
        debug!("Decoded {} bytes as {} ({} chars)", bytes.len(), job.encoding, chars);

        let applied = job.substitution.apply(&text);
        let encoded = job.encoding.encode(&applied.text)?;
        debug!("Replaced {} characters", applied.replaced);

        let mut outcome = NormalizeOutcome {
            input: job.input.clone(),
            output: output.clone(),
            substitution: job.substitution,
            encoding: job.encoding,
            replaced: applied.replaced,
            chars,
            bytes_written: 0,
            dry_run: self.dry_run,
            skipped: false,
            backup: None,
        };

        if self.dry_run {
            info!("Dry run: would write {} bytes to {}", encoded.len(), output.display());
            return Ok(outcome);
        }

        if output.exists() {
            if !self.policy.allow_overwrite(&output)? {
                warn!("Skipped {}: overwrite declined", output.display());
                outcome.skipped = true;
                return Ok(outcome);
            }
            if job.backup {
                outcome.backup = Some(make_backup(&output)?);
            }
        }

        write_atomic(&output, &encoded)?;
        outcome.bytes_written = encoded.len();
        info!("Wrote {} bytes to {}", encoded.len(), output.display());

        Ok(outcome)
    }

    /// Run jobs in order, stopping at the first failure
    pub fn run_all(&self, jobs: &[NormalizeJob]) -> BatchRun {
        let mut outcomes = Vec::with_capacity(jobs.len());
        for job in jobs {
            match self.run(job) {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    return BatchRun {
                        outcomes,
                        failure: Some(e),
                    }
                }
            }
        }
        BatchRun {
            outcomes,
            failure: None,
        }
    }
}

impl Default for FileNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn make_backup(path: &Path) -> Result<PathBuf> {
    let backup = backup_path(path);
    std::fs::copy(path, &backup).map_err(|source| NormalizeError::Backup {
        path: path.to_path_buf(),
        backup: backup.clone(),
        source,
    })?;
    info!("Backed up {} to {}", path.display(), backup.display());
    Ok(backup)
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let write_error = |source: std::io::Error| NormalizeError::Write {
        path: path.to_path_buf(),
        source,
    };

    // Write through symlinks to the file they point at; a new output has nothing to resolve
    let target = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let existing = std::fs::metadata(&target).ok();

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // Dropped without persist() on any error path, which deletes it
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_error)?;
    tmp.write_all(contents).map_err(write_error)?;
    if let Some(metadata) = existing {
        // The temp file is created 0600; keep the replaced file's mode
        tmp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(write_error)?;
    }
    tmp.as_file().sync_all().map_err(write_error)?;
    tmp.persist(&target).map_err(|e| write_error(e.error))?;
    Ok(())
}
