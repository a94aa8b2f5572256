use std::fmt;

use crate::version::Side;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed mapping line {line_number} ({reason}): {line:?}")]
    MalformedLine {
        /// 1-based line number within the mapping text.
        line_number: usize,
        line: String,
        reason: MalformedReason,
    },

    #[error("invalid version metadata: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("unknown version {0:?}")]
    UnknownVersion(String),

    #[error("version {version} has no {side} mappings")]
    MissingMappings { version: String, side: Side },
}

/// Why a mapping line was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// An indented member line appeared before the first class header.
    MemberBeforeClass,
    InvalidClassHeader,
    InvalidMethod,
    InvalidField,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::MemberBeforeClass => f.write_str("member before any class header"),
            MalformedReason::InvalidClassHeader => f.write_str("invalid class header"),
            MalformedReason::InvalidMethod => f.write_str("invalid method mapping"),
            MalformedReason::InvalidField => f.write_str("invalid field mapping"),
        }
    }
}
