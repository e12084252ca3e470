//! Strict text decoding and encoding
//!
//! Files are decoded as a whole and re-encoded in the same encoding after the
//! substitution. Both directions fail instead of substituting replacement
//! characters, so a wrong `--encoding` never silently corrupts data.

use crate::error::{NormalizeError, Result};
use encoding_rs::{Encoding, UTF_8};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Text encoding used for both reading and writing a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    /// ISO-8859-1: every byte is the code point of the same value
    Latin1,
    /// Any other encoding `encoding_rs` can round-trip
    Other(&'static Encoding),
}

impl TextEncoding {
    pub fn from_label(label: &str) -> Result<Self> {
        let normalized = label.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "utf-8" | "utf8" => return Ok(TextEncoding::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" | "l1" => {
                return Ok(TextEncoding::Latin1)
            }
            _ => {}
        }

        let encoding = Encoding::for_label(normalized.as_bytes())
            .ok_or_else(|| NormalizeError::UnknownEncoding(label.to_string()))?;

        // UTF-16 and the replacement encoding encode to UTF-8, so they can't round-trip
        if encoding.output_encoding() != encoding {
            return Err(NormalizeError::UnknownEncoding(label.to_string()));
        }
        if encoding == UTF_8 {
            return Ok(TextEncoding::Utf8);
        }

        Ok(TextEncoding::Other(encoding))
    }

    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Latin1 => "latin-1",
            TextEncoding::Other(encoding) => encoding.name(),
        }
    }

    /// Decode the whole file; `path` is only used for error reporting
    pub fn decode(&self, bytes: &[u8], path: &Path) -> Result<String> {
        let decode_error = |offset: Option<usize>| NormalizeError::Decode {
            path: path.to_path_buf(),
            encoding: self.name().to_string(),
            offset,
        };

        match self {
            TextEncoding::Utf8 => std::str::from_utf8(bytes)
                .map(str::to_owned)
                .map_err(|e| decode_error(Some(e.valid_up_to()))),
            TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
            TextEncoding::Other(encoding) => encoding
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|text| text.into_owned())
                .ok_or_else(|| decode_error(None)),
        }
    }

    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        match *self {
            TextEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
            TextEncoding::Latin1 => text
                .chars()
                .map(|c| {
                    u8::try_from(u32::from(c)).map_err(|_| NormalizeError::Encode {
                        ch: c,
                        encoding: self.name().to_string(),
                    })
                })
                .collect(),
            TextEncoding::Other(encoding) => {
                let (bytes, _, had_errors) = encoding.encode(text);
                if had_errors {
                    return Err(self.first_unmappable(encoding, text));
                }
                Ok(bytes.into_owned())
            }
        }
    }

    fn first_unmappable(&self, encoding: &'static Encoding, text: &str) -> NormalizeError {
        let mut buf = [0u8; 4];
        let ch = text
            .chars()
            .find(|c| encoding.encode(c.encode_utf8(&mut buf)).2)
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        NormalizeError::Encode {
            ch,
            encoding: self.name().to_string(),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextEncoding {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self> {
        TextEncoding::from_label(s)
    }
}

impl Serialize for TextEncoding {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for TextEncoding {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        TextEncoding::from_label(&label).map_err(serde::de::Error::custom)
    }
}
