//! Named character sets for decoding input files and encoding the output.
//!
//! Decoding never fails: bytes that are not valid in the chosen charset are
//! replaced with U+FFFD. Encoding replaces characters the charset cannot
//! represent with `?`.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A supported text encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Charset {
    #[default]
    Utf8,
    Latin1,
    Ascii,
}

impl Charset {
    /// Canonical name of the charset.
    pub fn name(self) -> &'static str {
        match self {
            Charset::Utf8 => "utf-8",
            Charset::Latin1 => "iso-8859-1",
            Charset::Ascii => "us-ascii",
        }
    }

    /// Decode raw bytes into text.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Charset::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Charset::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
            Charset::Ascii => bytes
                .iter()
                .map(|&b| {
                    if b.is_ascii() {
                        char::from(b)
                    } else {
                        char::REPLACEMENT_CHARACTER
                    }
                })
                .collect(),
        }
    }

    /// Encode text into bytes for the output sink.
    pub fn encode(self, text: &str) -> Cow<'_, [u8]> {
        match self {
            Charset::Utf8 => Cow::Borrowed(text.as_bytes()),
            Charset::Latin1 => Cow::Owned(narrow(text, 0xFF)),
            Charset::Ascii => Cow::Owned(narrow(text, 0x7F)),
        }
    }
}

fn narrow(text: &str, max: u32) -> Vec<u8> {
    text.chars()
        .map(|c| match u8::try_from(u32::from(c)) {
            Ok(b) if u32::from(b) <= max => b,
            _ => b'?',
        })
        .collect()
}

impl FromStr for Charset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Charset::Utf8),
            "iso-8859-1" | "iso8859-1" | "iso_8859_1" | "latin1" | "latin-1" => {
                Ok(Charset::Latin1)
            }
            "us-ascii" | "ascii" => Ok(Charset::Ascii),
            _ => Err(Error::UnsupportedCharset {
                name: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Charset {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Charset> for String {
    fn from(charset: Charset) -> Self {
        charset.name().to_string()
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
