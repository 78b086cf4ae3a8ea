//! The key-value state machine.
//!
//! Grammar, informally:
//!
//! ```text
//! input = ws* (pair (ws* pair)*)? ws*
//! pair  = key ws* "=" ws* value
//! key   = [A-Za-z0-9_]+
//! value = '"' [^"]* '"' | [^\s"] [^\s]*
//! ```
//!
//! The input is walked once, left to right, with no backtracking. All
//! mutable state lives in a [`ParseState`] created per call, so a
//! [`Parser`] only ever holds its key policy.

use crate::cursor::Cursor;
use crate::error::{ParseError, Result};
use crate::parsed::Parsed;
use crate::policy::{AcceptAll, KeyPolicy, Whitelist};

/// Parser states. `Done` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    SkipLeadingSpace,
    ScanKey,
    SkipSpaceAfterKey,
    ExpectAssignment,
    SkipSpaceAfterAssignment,
    ScanValue,
    Commit,
    SkipSpaceBeforeNextPair,
    Done,
}

/// Per-call parse state.
struct ParseState<'a> {
    cursor: Cursor<'a>,
    key: String,
    value: String,
    parsed: Parsed,
}

impl<'a> ParseState<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            cursor: Cursor::new(input),
            key: String::new(),
            value: String::new(),
            parsed: Parsed::new(),
        }
    }
}

/// A key-value parser parameterized by its commit-time key policy.
///
/// ```
/// use libkvtok::Parser;
///
/// let parsed = Parser::new().parse(r#"key1=value1 key2="value two""#).unwrap();
/// assert_eq!(parsed.len(), 2);
/// assert_eq!(parsed.get("key2"), Some("value two"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Parser<P = AcceptAll> {
    policy: P,
}

/// A parser that only accepts whitelisted keys.
pub type StrictParser = Parser<Whitelist>;

impl Parser {
    /// Create a parser accepting every key.
    pub fn new() -> Self {
        Self { policy: AcceptAll }
    }

    /// Create a case-insensitive whitelisting parser.
    pub fn strict<I, S>(valid_keys: I) -> StrictParser
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Parser::with_policy(Whitelist::new(valid_keys))
    }
}

impl<P: KeyPolicy> Parser<P> {
    /// Create a parser that runs `policy` on every committed pair.
    pub fn with_policy(policy: P) -> Self {
        Self { policy }
    }

    /// Parse `input` into its pairs. The first error aborts the parse.
    pub fn parse(&self, input: &str) -> Result<Parsed> {
        let mut st = ParseState::new(input);
        let mut state = State::SkipLeadingSpace;
        while state != State::Done {
            state = match self.step(state, &mut st) {
                Ok(next) => next,
                Err(err) => {
                    tracing::debug!(error = %err, "parse failed");
                    return Err(err);
                }
            };
        }
        tracing::debug!(pairs = st.parsed.len(), "parse complete");
        Ok(st.parsed)
    }

    fn step(&self, state: State, st: &mut ParseState<'_>) -> Result<State> {
        match state {
            State::SkipLeadingSpace => {
                st.cursor.skip_whitespace();
                Ok(if st.cursor.is_at_end() {
                    State::Done
                } else {
                    State::ScanKey
                })
            }
            State::ScanKey => scan_key(st),
            State::SkipSpaceAfterKey => {
                st.cursor.skip_whitespace();
                Ok(State::ExpectAssignment)
            }
            State::ExpectAssignment => expect_assignment(st),
            State::SkipSpaceAfterAssignment => {
                st.cursor.skip_whitespace();
                Ok(State::ScanValue)
            }
            State::ScanValue => scan_value(st),
            State::Commit => {
                self.commit(st)?;
                Ok(State::SkipSpaceBeforeNextPair)
            }
            State::SkipSpaceBeforeNextPair => {
                st.cursor.skip_whitespace();
                Ok(if st.cursor.is_at_end() {
                    State::Done
                } else {
                    State::ScanKey
                })
            }
            State::Done => Ok(State::Done),
        }
    }

    /// Run the policy and insert the buffered pair.
    fn commit(&self, st: &mut ParseState<'_>) -> Result<()> {
        let position = st.cursor.position();
        self.policy.check(&st.key, position)?;
        let key = std::mem::take(&mut st.key);
        let value = std::mem::take(&mut st.value);
        tracing::trace!(%key, %value, position, "pair committed");
        st.parsed.insert(key, value);
        Ok(())
    }
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn scan_key(st: &mut ParseState<'_>) -> Result<State> {
    if st.cursor.eat_while(&mut st.key, is_key_char) == 0 {
        return Err(ParseError::MissingKey {
            position: st.cursor.position(),
        });
    }
    Ok(State::SkipSpaceAfterKey)
}

fn expect_assignment(st: &mut ParseState<'_>) -> Result<State> {
    match st.cursor.peek() {
        Some('=') => {
            st.cursor.bump();
            Ok(State::SkipSpaceAfterAssignment)
        }
        Some(_) => Err(ParseError::MissingAssignmentOperator {
            key: std::mem::take(&mut st.key),
            position: st.cursor.position(),
        }),
        None => Err(ParseError::IncompleteKeyValuePair {
            position: st.cursor.position(),
        }),
    }
}

fn scan_value(st: &mut ParseState<'_>) -> Result<State> {
    match st.cursor.peek() {
        Some('"') => {
            st.cursor.bump();
            st.cursor.eat_while(&mut st.value, |c| c != '"');
            if st.cursor.bump().is_none() {
                return Err(ParseError::MissingEndQuote {
                    key: std::mem::take(&mut st.key),
                    position: st.cursor.position(),
                });
            }
        }
        _ => {
            if st.cursor.eat_while(&mut st.value, |c| !c.is_whitespace()) == 0 {
                return Err(ParseError::MissingValue {
                    key: std::mem::take(&mut st.key),
                    position: st.cursor.position(),
                });
            }
        }
    }
    Ok(State::Commit)
}
