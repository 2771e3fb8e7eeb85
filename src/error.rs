use std::io;
use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn input text into a [`Config`](crate::Config).
///
/// Parsing is all-or-nothing: whenever one of these is returned, nothing that was read before
/// the failing line is kept.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{kind} at line {line}")]
    Syntax { line: usize, kind: SyntaxError },
    #[error("failed to read line {line}")]
    ReadFailure {
        line: usize,
        #[source]
        source: io::Error,
    },
    #[error("failed to open {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ParseError {
    /// The 1-based line the error occurred on, if it is tied to one.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match *self {
            Self::Syntax { line, .. } | Self::ReadFailure { line, .. } => Some(line),
            Self::Open { .. } => None,
        }
    }

    /// The violated format rule, for syntax errors.
    #[must_use]
    pub fn syntax(&self) -> Option<SyntaxError> {
        match *self {
            Self::Syntax { kind, .. } => Some(kind),
            Self::ReadFailure { .. } | Self::Open { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("missing closing ']' in section header")]
    MalformedSectionHeader,
    #[error("unexpected data after closing ']'")]
    TrailingDataAfterSectionHeader,
    #[error("section name cannot be empty")]
    EmptySectionName,
    #[error("line is neither a comment, a section header nor a key-value pair")]
    NotAKeyValuePair,
    #[error("key cannot be empty")]
    EmptyKey,
    #[error("key-value pair found outside of any section")]
    NoActiveSection,
}

/// Failure of one of the typed `get_*` accessors.
///
/// Only [`GetError::NotFound`] is ever replaced by a default value; every other variant means the
/// value exists but is unusable and is always handed back to the caller.
#[derive(Debug, Error)]
pub enum GetError {
    #[error("key {key:?} not found in section [{section}]")]
    NotFound { section: String, key: String },
    #[error("{value:?} is not a valid integer")]
    NotInt {
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("{value:?} is not a valid float")]
    NotFloat {
        value: String,
        #[source]
        source: ParseFloatError,
    },
    #[error("{value:?} cannot be interpreted as a boolean")]
    NotBool { value: String },
    #[error("failed to open {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl GetError {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
