//! Key policies: the commit-time check deciding whether a parsed key is
//! accepted.
//!
//! The parser calls [`KeyPolicy::check`] for every fully scanned pair,
//! just before inserting it. A policy only gates; it never rewrites the
//! key or the value.

use crate::error::{ParseError, Result};

/// Commit-time key check.
pub trait KeyPolicy {
    /// Accept or reject `key`. `position` is the cursor at commit time,
    /// i.e. the character that ended the pair's value.
    fn check(&self, key: &str, position: usize) -> Result<()>;
}

/// Accepts every syntactically valid key.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl KeyPolicy for AcceptAll {
    fn check(&self, _key: &str, _position: usize) -> Result<()> {
        Ok(())
    }
}

/// Any `Fn(&str) -> bool` works as a key filter.
impl<F> KeyPolicy for F
where
    F: Fn(&str) -> bool,
{
    fn check(&self, key: &str, position: usize) -> Result<()> {
        if self(key) {
            Ok(())
        } else {
            Err(reject(key, position))
        }
    }
}

/// Accepts only the configured keys.
///
/// Comparison is case-insensitive by default: parsed keys and entries are
/// both lower-cased before comparison. An empty whitelist accepts nothing.
///
/// ```
/// use libkvtok::{Parser, Whitelist};
///
/// let parser = Parser::with_policy(Whitelist::new(["name", "age"]));
/// let parsed = parser.parse("Name=john AGE=23").unwrap();
/// assert_eq!(parsed.get("Name"), Some("john"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Whitelist {
    /// Entries as given.
    keys: Vec<String>,
    /// Entries folded for comparison.
    folded: Vec<String>,
    case_sensitive: bool,
}

impl Whitelist {
    /// Create a case-insensitive whitelist.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        let folded = keys.iter().map(|k| fold(k, false)).collect();
        Self {
            keys,
            folded,
            case_sensitive: false,
        }
    }

    /// Set whether keys are compared verbatim.
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self.folded = self.keys.iter().map(|k| fold(k, case_sensitive)).collect();
        self
    }

    /// The entries as configured, unfolded.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Returns `true` if `key` matches an entry under this whitelist's
    /// case policy.
    pub fn contains(&self, key: &str) -> bool {
        let key = fold(key, self.case_sensitive);
        self.folded.iter().any(|valid| *valid == key)
    }
}

impl KeyPolicy for Whitelist {
    fn check(&self, key: &str, position: usize) -> Result<()> {
        if self.contains(key) {
            Ok(())
        } else {
            Err(reject(key, position))
        }
    }
}

fn fold(key: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        key.to_string()
    } else {
        key.to_lowercase()
    }
}

fn reject(key: &str, position: usize) -> ParseError {
    tracing::debug!(key, position, "key rejected");
    ParseError::InvalidKey {
        key: key.to_string(),
        position,
    }
}
