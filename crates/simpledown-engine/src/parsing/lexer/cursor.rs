use crate::parsing::span::Span;

use super::token::Fragment;

/// A cursor for character-by-character scanning with position tracking.
///
/// Operates over a string slice while tracking the absolute byte position
/// in the top-level source (via `base` offset). The local index always sits
/// on a char boundary.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being scanned.
    pub s: &'a str,
    /// Base offset in the source (added to local index for absolute positions).
    pub base: usize,
    /// Current local index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of `s` with the given base offset.
    pub fn new(s: &'a str, base: usize) -> Self {
        Self { s, base, i: 0 }
    }

    /// Returns the current absolute byte position (base + local index).
    pub fn pos(&self) -> usize {
        self.base + self.i
    }

    /// Returns true if at end of string.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Unconsumed remainder of the input.
    pub fn rest(&self) -> &'a str {
        self.s.get(self.i..).unwrap_or_default()
    }

    /// Peeks at the current char without advancing.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The char immediately before the cursor, if any.
    pub fn prev(&self) -> Option<char> {
        self.s.get(..self.i)?.chars().next_back()
    }

    /// Checks if the remaining input starts with the given pattern.
    pub fn starts_with(&self, pat: &str) -> bool {
        self.rest().starts_with(pat)
    }

    /// Advances by one char, returning the consumed char.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.i += c.len_utf8();
        Some(c)
    }

    /// Advances by `n` bytes. Callers pass the length of a pattern they
    /// just matched with [`Cursor::starts_with`].
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Consumes `pat` if the input starts with it.
    pub fn eat(&mut self, pat: &str) -> bool {
        if self.starts_with(pat) {
            self.bump_n(pat.len());
            true
        } else {
            false
        }
    }

    /// Consumes chars while `pred` holds and returns the consumed slice.
    pub fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.i;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.bump();
        }
        &self.s[start..self.i]
    }

    /// Local slice between two local indices.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.s[start..end]
    }

    /// A fragment of the input between two local indices, carrying its
    /// absolute base so nested lexers keep whole-document positions.
    pub fn fragment(&self, start: usize, end: usize) -> Fragment<'a> {
        Fragment {
            text: &self.s[start..end],
            base: self.base + start,
        }
    }

    /// Absolute span from a local start index to the current position.
    pub fn span_from(&self, start: usize) -> Span {
        Span {
            start: self.base + start,
            end: self.pos(),
        }
    }
}
