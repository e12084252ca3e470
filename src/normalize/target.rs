//! Where a normalized file is written

use serde::Serialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_SUFFIX: &str = "_out";

/// Output location for a job
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputTarget {
    /// Sibling of the input with a suffix before the extension
    Suffix(String),
    /// Explicit output path
    Path(PathBuf),
    /// Overwrite the input
    InPlace,
}

impl Default for OutputTarget {
    fn default() -> Self {
        OutputTarget::Suffix(DEFAULT_SUFFIX.to_string())
    }
}

impl OutputTarget {
    pub fn resolve(&self, input: &Path) -> PathBuf {
        match self {
            OutputTarget::Suffix(suffix) => with_suffix(input, suffix),
            OutputTarget::Path(path) => path.clone(),
            OutputTarget::InPlace => input.to_path_buf(),
        }
    }
}

/// `dir/name.csv` + `_out` -> `dir/name_out.csv`
pub fn with_suffix(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match input.extension() {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}{}", stem, suffix),
    };
    input.with_file_name(file_name)
}

/// `dir/name.csv` -> `dir/name.csv.bak`
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".bak");
    path.with_file_name(name)
}
