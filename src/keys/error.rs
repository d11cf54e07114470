use serde::Serialize;
use thiserror::Error;

/// A row that cannot be turned into keys. Reported, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("line {line}: {reason}")]
pub struct MalformedRow {
    pub line: u64,
    pub reason: String,
}

impl MalformedRow {
    pub fn new(line: u64, reason: impl Into<String>) -> Self {
        Self {
            line,
            reason: reason.into(),
        }
    }
}

/// One line from `BufRead::split(b'\n')`, minus a trailing `\r`.
pub fn decode_line(mut bytes: Vec<u8>, line: u64) -> Result<String, MalformedRow> {
    if bytes.last() == Some(&b'\r') {
        bytes.pop();
    }
    String::from_utf8(bytes)
        .map_err(|e| MalformedRow::new(line, format!("not valid UTF-8 ({})", e.utf8_error())))
}

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed delimited input: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Malformed(#[from] MalformedRow),
}

impl KeyError {
    /// Malformed rows only affect themselves; anything else ends the pass.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, KeyError::Malformed(_))
    }
}
