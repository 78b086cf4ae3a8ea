//! Key-value tokenizer.
//!
//! Parses flat strings such as `key1=value1 key2="value two"` into an
//! ordered key to value mapping, reporting syntax errors with the
//! zero-based character position at which they were detected.
//!
//! # Grammar
//!
//! - Keys are one or more ASCII letters, digits, or underscores.
//! - Values are either bare (running up to the next whitespace) or
//!   double-quoted (running up to the next `"`, whitespace preserved, no
//!   escapes).
//! - Whitespace around keys, `=`, and values is insignificant.
//! - A repeated key overwrites the earlier value.
//!
//! # Strict parsing
//!
//! A [`Parser`] is generic over a [`KeyPolicy`] run as each pair is
//! committed. [`Whitelist`] rejects keys outside a configured set with
//! [`ParseError::InvalidKey`].

mod cursor;
mod encode;
mod error;
mod parsed;
mod parser;
mod policy;

pub use encode::{encode, Format};
pub use error::{EncodeError, ErrorKind, ParseError, Result};
pub use parsed::Parsed;
pub use parser::{Parser, StrictParser};
pub use policy::{AcceptAll, KeyPolicy, Whitelist};

/// Parse a key-value string.
///
/// # Example
///
/// ```
/// use libkvtok::parse;
///
/// let parsed = parse("key=value").unwrap();
/// assert_eq!(parsed.get("key"), Some("value"));
/// ```
pub fn parse(input: &str) -> Result<Parsed> {
    Parser::new().parse(input)
}

/// Parse a key-value string, accepting only `valid_keys`.
///
/// Unless `case_sensitive` is set, keys and whitelist entries are both
/// lower-cased before comparison.
///
/// ```
/// use libkvtok::{parse_strict, ErrorKind};
///
/// let err = parse_strict("age=23", &["name"], false).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::InvalidKey);
/// assert_eq!(err.position(), 5);
/// ```
pub fn parse_strict<S: AsRef<str>>(
    input: &str,
    valid_keys: &[S],
    case_sensitive: bool,
) -> Result<Parsed> {
    let whitelist = Whitelist::new(valid_keys.iter().map(|k| k.as_ref().to_string()))
        .case_sensitive(case_sensitive);
    Parser::with_policy(whitelist).parse(input)
}
