// Error taxonomy shared by every encode/decode stage.
//
// Nothing here is recovered internally: each stage aborts and hands the
// error back to the caller, and the CLI turns it into a diagnostic plus a
// non-zero exit status.

use std::io;
use std::path::PathBuf;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HuffmanError>;

#[derive(Debug, thiserror::Error)]
pub enum HuffmanError {
    /// The code table is corrupt or not prefix-free.
    #[error("malformed code table{}: {reason}", line_suffix(.line))]
    MalformedCodeTable { line: Option<usize>, reason: String },

    /// The text contains a character the code table has no code for.
    #[error("unknown character {character:?} at position {position}")]
    UnknownCharacter { character: char, position: usize },

    /// The bit-string ended in the middle of a code.
    #[error("truncated encoding: input ended mid-code after {consumed} bits")]
    TruncatedEncoding { consumed: usize },

    /// The bit-string walks off the tree (no child on that side).
    #[error("invalid bit sequence: no code continues at bit {position}")]
    InvalidBitSequence { position: usize },

    /// The encoded text contains something other than '0' or '1'.
    #[error("invalid symbol {symbol:?} at bit {position}, expected '0' or '1'")]
    InvalidSymbol { symbol: char, position: usize },

    #[error("cannot read {}: {source}", .path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write {}: {source}", .path.display())]
    FileUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl HuffmanError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedCodeTable {
            line: None,
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed_at(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedCodeTable {
            line: Some(line),
            reason: reason.into(),
        }
    }
}

fn line_suffix(line: &Option<usize>) -> String {
    match line {
        Some(n) => format!(" (line {n})"),
        None => String::new(),
    }
}

impl From<HuffmanError> for io::Error {
    fn from(e: HuffmanError) -> Self {
        match e {
            HuffmanError::FileUnreadable { source, .. }
            | HuffmanError::FileUnwritable { source, .. } => source,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}
