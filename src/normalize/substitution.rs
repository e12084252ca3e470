//! Character substitutions
//!
//! A substitution is a single linear pass over the decoded text. It never
//! looks at CSV structure, so a separator inside a quoted field is rewritten
//! like any other occurrence.
//!
//! ## Forms
//!
//! ```text
//! Replace(',' -> '.')   "12,50;3.00" -> "12.50;3.00"
//! Swap(',' <-> '.')     "1.234,5"    -> "1,234.5"
//! ```
//!
//! `Replace` followed by its inverse only restores the input when the target
//! character was absent beforehand. `Swap` is its own inverse.

use crate::error::{NormalizeError, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A character-to-character transform applied to the whole text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Substitution {
    /// Every `from` becomes `to`
    Replace { from: char, to: char },
    /// `a` and `b` trade places in one pass
    Swap { a: char, b: char },
}

/// Result of applying a substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub text: String,
    /// Number of characters that were changed
    pub replaced: usize,
}

impl Substitution {
    pub fn replace(from: char, to: char) -> Result<Self> {
        if from == to {
            return Err(NormalizeError::IdentitySubstitution(from));
        }
        Ok(Substitution::Replace { from, to })
    }

    pub fn swap(a: char, b: char) -> Result<Self> {
        if a == b {
            return Err(NormalizeError::IdentitySubstitution(a));
        }
        Ok(Substitution::Swap { a, b })
    }

    /// Map a single character
    fn map(&self, c: char) -> Option<char> {
        match *self {
            Substitution::Replace { from, to } if c == from => Some(to),
            Substitution::Swap { a, b } if c == a => Some(b),
            Substitution::Swap { a, b } if c == b => Some(a),
            _ => None,
        }
    }

    pub fn apply(&self, input: &str) -> Applied {
        let mut text = String::with_capacity(input.len());
        let mut replaced = 0;

        for c in input.chars() {
            match self.map(c) {
                Some(mapped) => {
                    text.push(mapped);
                    replaced += 1;
                }
                None => text.push(c),
            }
        }

        Applied { text, replaced }
    }

    /// The substitution that undoes this one, where undoing is possible
    pub fn inverse(&self) -> Self {
        match *self {
            Substitution::Replace { from, to } => Substitution::Replace { from: to, to: from },
            swap @ Substitution::Swap { .. } => swap,
        }
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Substitution::Replace { from, to } => {
                write!(f, "'{}' -> '{}'", from.escape_default(), to.escape_default())
            }
            Substitution::Swap { a, b } => {
                write!(f, "'{}' <-> '{}'", a.escape_default(), b.escape_default())
            }
        }
    }
}

/// Named substitutions covering the common regional conversions
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    /// `1,5` -> `1.5`
    CommaToPeriod,
    /// `1.5` -> `1,5`
    PeriodToComma,
    /// `a;b` -> `a,b`
    SemicolonToComma,
    /// `a,b` -> `a;b`
    CommaToSemicolon,
    /// `1.234,5` <-> `1,234.5`
    SwapCommaPeriod,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::CommaToPeriod,
        Preset::PeriodToComma,
        Preset::SemicolonToComma,
        Preset::CommaToSemicolon,
        Preset::SwapCommaPeriod,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::CommaToPeriod => "comma-to-period",
            Preset::PeriodToComma => "period-to-comma",
            Preset::SemicolonToComma => "semicolon-to-comma",
            Preset::CommaToSemicolon => "comma-to-semicolon",
            Preset::SwapCommaPeriod => "swap-comma-period",
        }
    }

    pub fn substitution(&self) -> Substitution {
        match self {
            Preset::CommaToPeriod => Substitution::Replace { from: ',', to: '.' },
            Preset::PeriodToComma => Substitution::Replace { from: '.', to: ',' },
            Preset::SemicolonToComma => Substitution::Replace { from: ';', to: ',' },
            Preset::CommaToSemicolon => Substitution::Replace { from: ',', to: ';' },
            Preset::SwapCommaPeriod => Substitution::Swap { a: ',', b: '.' },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Preset::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| NormalizeError::UnknownPreset(s.to_string()))
    }
}

/// Parse a character argument: a literal single character or a name
pub fn parse_char(s: &str) -> Result<char> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(c);
    }

    match s.trim().to_ascii_lowercase().as_str() {
        "comma" => Ok(','),
        "period" | "dot" => Ok('.'),
        "semicolon" => Ok(';'),
        "tab" | "\\t" => Ok('\t'),
        "pipe" => Ok('|'),
        "space" => Ok(' '),
        _ => Err(NormalizeError::InvalidCharacter(s.to_string())),
    }
}
