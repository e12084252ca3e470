//! Job configuration
//!
//! A config file lists the files to normalize. It can be TOML, YAML or JSON,
//! chosen by extension:
//!
//! ```toml
//! [defaults]
//! encoding = "latin-1"
//!
//! [[jobs]]
//! input = "clean-data/rent_2018.csv"
//! preset = "period-to-comma"
//!
//! [[jobs]]
//! input = "clean-data/rent_2019.csv"
//! from = "semicolon"
//! to = ","
//! in_place = true
//! ```
//!
//! Relative paths resolve against the directory holding the config file.

use crate::error::{NormalizeError, Result};
use crate::normalize::{
    parse_char, NormalizeJob, OutputTarget, Preset, Substitution, TextEncoding, DEFAULT_SUFFIX,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File names probed by [`Config::from_default_locations`], in order
pub const DEFAULT_CONFIG_FILES: [&str; 4] = [
    ".csvnorm.toml",
    ".csvnorm.yml",
    ".csvnorm.yaml",
    ".csvnorm.json",
];

/// Settings shared by every job unless the job overrides them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Defaults {
    pub encoding: Option<TextEncoding>,
    pub suffix: Option<String>,
    pub backup: Option<bool>,
}

/// One `[[jobs]]` entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobConfig {
    pub input: PathBuf,
    pub preset: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    /// Two characters to exchange
    pub swap: Option<Vec<String>>,
    pub encoding: Option<TextEncoding>,
    pub output: Option<PathBuf>,
    pub in_place: bool,
    pub suffix: Option<String>,
    pub backup: Option<bool>,
}

impl JobConfig {
    fn substitution(&self) -> std::result::Result<Substitution, String> {
        let pair = match (&self.from, &self.to) {
            (Some(from), Some(to)) => Some((from, to)),
            (None, None) => None,
            _ => return Err("`from` and `to` must be given together".to_string()),
        };

        match (&self.preset, pair, &self.swap) {
            (Some(preset), None, None) => preset
                .parse::<Preset>()
                .map(|p| p.substitution())
                .map_err(|e| e.to_string()),
            (None, Some((from, to)), None) => {
                let from = parse_char(from).map_err(|e| e.to_string())?;
                let to = parse_char(to).map_err(|e| e.to_string())?;
                Substitution::replace(from, to).map_err(|e| e.to_string())
            }
            (None, None, Some(swap)) => match swap.as_slice() {
                [a, b] => {
                    let a = parse_char(a).map_err(|e| e.to_string())?;
                    let b = parse_char(b).map_err(|e| e.to_string())?;
                    Substitution::swap(a, b).map_err(|e| e.to_string())
                }
                _ => Err("`swap` takes exactly two characters".to_string()),
            },
            (None, None, None) => Err("no substitution: set `preset`, `from`/`to` or `swap`".to_string()),
            _ => Err("set only one of `preset`, `from`/`to` or `swap`".to_string()),
        }
    }

    fn target(&self, base: &Path, defaults: &Defaults) -> std::result::Result<OutputTarget, String> {
        match (&self.output, self.in_place) {
            (Some(_), true) => Err("`output` and `in_place` are mutually exclusive".to_string()),
            (Some(output), false) => Ok(OutputTarget::Path(resolve(base, output))),
            (None, true) => Ok(OutputTarget::InPlace),
            (None, false) => {
                let suffix = self
                    .suffix
                    .clone()
                    .or_else(|| defaults.suffix.clone())
                    .unwrap_or_else(|| DEFAULT_SUFFIX.to_string());
                Ok(OutputTarget::Suffix(suffix))
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub defaults: Defaults,
    pub jobs: Vec<JobConfig>,

    /// File this config was loaded from
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let config_error = |message: String| NormalizeError::Config {
            path: path.to_path_buf(),
            message,
        };

        let content = std::fs::read_to_string(path).map_err(|source| NormalizeError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let mut config: Config = match extension.as_deref() {
            Some("toml") => toml::from_str(&content).map_err(|e| config_error(e.to_string()))?,
            Some("yml") | Some("yaml") => {
                serde_yaml::from_str(&content).map_err(|e| config_error(e.to_string()))?
            }
            Some("json") => {
                serde_json::from_str(&content).map_err(|e| config_error(e.to_string()))?
            }
            _ => {
                return Err(config_error(
                    "unsupported config format (expected .toml, .yml, .yaml or .json)".to_string(),
                ))
            }
        };

        debug!("Loaded {} jobs from {}", config.jobs.len(), path.display());
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Load the first default config file found in `dir`, or an empty config
    pub fn from_default_locations(dir: &Path) -> Result<Self> {
        for name in DEFAULT_CONFIG_FILES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Self::from_file(&candidate);
            }
        }
        debug!("No config file found in {}", dir.display());
        Ok(Self::default())
    }

    /// Replace the defaults with values given on the command line
    pub fn apply_overrides(
        &mut self,
        encoding: Option<TextEncoding>,
        suffix: Option<String>,
        backup: bool,
    ) {
        if encoding.is_some() {
            self.defaults.encoding = encoding;
        }
        if suffix.is_some() {
            self.defaults.suffix = suffix;
        }
        if backup {
            self.defaults.backup = Some(true);
        }
    }

    /// Directory that relative job paths resolve against
    fn base_dir(&self) -> PathBuf {
        self.source
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }

    /// Validate every entry and build the jobs in file order
    pub fn into_jobs(self) -> Result<Vec<NormalizeJob>> {
        let base = self.base_dir();
        let source = self.source.clone().unwrap_or_default();

        self.jobs
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let job_error = |message: String| NormalizeError::Config {
                    path: source.clone(),
                    message: format!("job #{}: {}", index + 1, message),
                };

                if entry.input.as_os_str().is_empty() {
                    return Err(job_error("missing `input`".to_string()));
                }

                let substitution = entry.substitution().map_err(job_error)?;
                let target = entry.target(&base, &self.defaults).map_err(job_error)?;
                let encoding = entry
                    .encoding
                    .or(self.defaults.encoding)
                    .unwrap_or_default();
                let backup = entry.backup.or(self.defaults.backup).unwrap_or(false);

                Ok(NormalizeJob::new(resolve(&base, &entry.input), substitution)
                    .with_encoding(encoding)
                    .with_target(target)
                    .with_backup(backup))
            })
            .collect()
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
