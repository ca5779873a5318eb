use crate::nodes::Attrs;
use crate::parsing::{kinds::Bbtag, span::Span};

/// A borrowed slice of the source that a nested parser will re-lex,
/// together with its absolute offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment<'a> {
    pub text: &'a str,
    pub base: usize,
}

impl Fragment<'_> {
    pub fn span(&self) -> Span {
        Span {
            start: self.base,
            end: self.base + self.text.len(),
        }
    }
}

/// The record a successful probe produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    /// Full span of the matched construct, delimiters included.
    pub span: Span,
}

/// Construct kinds with their captured sub-fields. Each variant has
/// exactly one handler in the parser's dispatch `match`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind<'a> {
    Link {
        title: Fragment<'a>,
        href: Option<&'a str>,
    },
    Header {
        level: usize,
        title: &'a str,
        anchor: Option<&'a str>,
    },
    Bbtag {
        tag: Bbtag,
        attrs: Attrs,
        /// Empty for self-closing directives.
        body: Fragment<'a>,
    },
    Bold {
        body: Fragment<'a>,
    },
    Italic {
        body: Fragment<'a>,
    },
    Strike {
        body: Fragment<'a>,
    },
    Code {
        body: &'a str,
        class: Option<&'a str>,
    },
    Comment {
        body: &'a str,
    },
    Verbatim {
        body: &'a str,
    },
}
