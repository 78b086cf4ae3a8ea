//! Character cursor with position bookkeeping.
//!
//! The cursor walks the input one character at a time. Its position is the
//! zero-based character index of the last character *examined* (peeked or
//! consumed), which is what every parse error reports. Peeking past the end
//! of input leaves the position where it was, so the position never moves
//! backwards and never points past the final character.

use std::iter::Peekable;
use std::str::Chars;

pub struct Cursor<'a> {
    chars: Peekable<Chars<'a>>,
    /// Index of the character `peek` would return.
    next: usize,
    /// Index of the last examined character.
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            next: 0,
            pos: 0,
        }
    }

    /// Examine the next character without consuming it.
    pub fn peek(&mut self) -> Option<char> {
        let c = self.chars.peek().copied();
        if c.is_some() {
            self.pos = self.next;
        }
        c
    }

    /// Consume the next character.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c.is_some() {
            self.pos = self.next;
            self.next += 1;
        }
        c
    }

    /// Consume characters while `pred` holds, appending them to `buf`.
    /// Returns the number of characters consumed. Stops on (and examines)
    /// the first character that fails `pred`.
    pub fn eat_while(&mut self, buf: &mut String, pred: impl Fn(char) -> bool) -> usize {
        let mut n = 0;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.bump();
            buf.push(c);
            n += 1;
        }
        n
    }

    /// Skip whitespace.
    pub fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.bump();
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_moves_position() {
        let mut cur = Cursor::new("ab");
        assert_eq!(cur.position(), 0);
        assert_eq!(cur.bump(), Some('a'));
        assert_eq!(cur.position(), 0);
        assert_eq!(cur.peek(), Some('b'));
        assert_eq!(cur.position(), 1);
    }

    #[test]
    fn test_end_keeps_position() {
        let mut cur = Cursor::new("abc");
        let mut buf = String::new();
        assert_eq!(cur.eat_while(&mut buf, |c| c.is_ascii_alphabetic()), 3);
        assert_eq!(buf, "abc");
        assert_eq!(cur.peek(), None);
        assert_eq!(cur.position(), 2);
        assert!(cur.is_at_end());
    }

    #[test]
    fn test_skip_whitespace() {
        let mut cur = Cursor::new("  \t x");
        cur.skip_whitespace();
        assert_eq!(cur.peek(), Some('x'));
        assert_eq!(cur.position(), 4);
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        let mut cur = Cursor::new("é=x");
        cur.bump();
        assert_eq!(cur.peek(), Some('='));
        assert_eq!(cur.position(), 1);
    }

    #[test]
    fn test_empty_input() {
        let mut cur = Cursor::new("");
        cur.skip_whitespace();
        assert_eq!(cur.peek(), None);
        assert_eq!(cur.position(), 0);
    }
}
