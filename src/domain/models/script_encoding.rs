use std::fmt;
use std::str::FromStr;

use crate::domain::DomainError;

/// Text encoding used when reading and writing script files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScriptEncoding {
    /// ISO-8859-1: one byte per character, U+0000..=U+00FF.
    #[default]
    Latin1,
    Utf8,
}

impl ScriptEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptEncoding::Latin1 => "latin1",
            ScriptEncoding::Utf8 => "utf8",
        }
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<String, DomainError> {
        match self {
            ScriptEncoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            ScriptEncoding::Utf8 => String::from_utf8(bytes.to_vec())
                .map_err(|e| DomainError::invalid_input(format!("File is not valid UTF-8: {}", e))),
        }
    }

    /// Encode `text`, returning the bytes and the number of characters that
    /// could not be represented and were written as `?`.
    pub fn encode(&self, text: &str) -> (Vec<u8>, usize) {
        match self {
            ScriptEncoding::Latin1 => {
                let mut replaced = 0;
                let bytes = text
                    .chars()
                    .map(|c| match u8::try_from(u32::from(c)) {
                        Ok(b) => b,
                        Err(_) => {
                            replaced += 1;
                            b'?'
                        }
                    })
                    .collect();
                (bytes, replaced)
            }
            ScriptEncoding::Utf8 => (text.as_bytes().to_vec(), 0),
        }
    }
}

impl fmt::Display for ScriptEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScriptEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "latin1" | "latin-1" | "iso-8859-1" | "iso8859-1" => Ok(ScriptEncoding::Latin1),
            "utf8" | "utf-8" => Ok(ScriptEncoding::Utf8),
            unknown => Err(format!(
                "unknown encoding '{}', expected 'latin1' or 'utf8'",
                unknown
            )),
        }
    }
}
