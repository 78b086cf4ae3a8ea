//! Error types for key-value parsing and encoding.

use thiserror::Error;

/// Result type for parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// The kind of a [`ParseError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingKey,
    MissingAssignmentOperator,
    MissingValue,
    MissingEndQuote,
    IncompleteKeyValuePair,
    InvalidKey,
}

/// Error type for key-value parsing.
///
/// Every variant carries the zero-based character index of the last
/// character the parser examined before failing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Expected a key character.
    #[error("Missing key at position {position}")]
    MissingKey { position: usize },

    /// A key was read but no `=` follows it.
    #[error("Missing assignment operator after key \"{key}\" at position {position}")]
    MissingAssignmentOperator { key: String, position: usize },

    /// `=` was read but no value follows it.
    #[error("Missing value for key \"{key}\" at position {position}")]
    MissingValue { key: String, position: usize },

    /// A quoted value ran to the end of input.
    #[error("Missing end quote for key \"{key}\" at position {position}")]
    MissingEndQuote { key: String, position: usize },

    /// Input ended after a key.
    #[error("Incomplete key value pair at position {position}")]
    IncompleteKeyValuePair { position: usize },

    /// The key policy rejected a key.
    #[error("Invalid key \"{key}\" at position {position}")]
    InvalidKey { key: String, position: usize },
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::MissingKey { .. } => ErrorKind::MissingKey,
            ParseError::MissingAssignmentOperator { .. } => ErrorKind::MissingAssignmentOperator,
            ParseError::MissingValue { .. } => ErrorKind::MissingValue,
            ParseError::MissingEndQuote { .. } => ErrorKind::MissingEndQuote,
            ParseError::IncompleteKeyValuePair { .. } => ErrorKind::IncompleteKeyValuePair,
            ParseError::InvalidKey { .. } => ErrorKind::InvalidKey,
        }
    }

    /// The offending key, when one had been read.
    pub fn key(&self) -> Option<&str> {
        match self {
            ParseError::MissingAssignmentOperator { key, .. }
            | ParseError::MissingValue { key, .. }
            | ParseError::MissingEndQuote { key, .. }
            | ParseError::InvalidKey { key, .. } => Some(key),
            ParseError::MissingKey { .. } | ParseError::IncompleteKeyValuePair { .. } => None,
        }
    }

    /// Character index at which the error was detected.
    pub fn position(&self) -> usize {
        match self {
            ParseError::MissingKey { position }
            | ParseError::MissingAssignmentOperator { position, .. }
            | ParseError::MissingValue { position, .. }
            | ParseError::MissingEndQuote { position, .. }
            | ParseError::IncompleteKeyValuePair { position }
            | ParseError::InvalidKey { position, .. } => *position,
        }
    }
}

/// Error type for encoding parsed pairs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Key contains characters outside `[A-Za-z0-9_]`, or is empty.
    #[error("Key \"{0}\" cannot be written as a bare key")]
    InvalidKey(String),

    /// Value needs quoting but contains a quote.
    #[error("Value of key \"{0}\" cannot be quoted (no escape sequences)")]
    UnrepresentableValue(String),

    /// Format is produced by the command-line tool, not the library.
    #[error("Format {0} must be handled by the CLI tool")]
    ExternalFormat(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let err = ParseError::MissingValue {
            key: "key".to_string(),
            position: 3,
        };
        assert_eq!(err.kind(), ErrorKind::MissingValue);
        assert_eq!(err.key(), Some("key"));
        assert_eq!(err.position(), 3);

        let err = ParseError::IncompleteKeyValuePair { position: 2 };
        assert_eq!(err.key(), None);
        assert_eq!(err.position(), 2);
    }

    #[test]
    fn test_display() {
        let err = ParseError::InvalidKey {
            key: "age".to_string(),
            position: 5,
        };
        assert_eq!(err.to_string(), "Invalid key \"age\" at position 5");
        assert_eq!(
            ParseError::MissingKey { position: 0 }.to_string(),
            "Missing key at position 0"
        );
    }
}
