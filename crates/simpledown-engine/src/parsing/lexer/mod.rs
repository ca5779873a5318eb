//! # Lexer
//!
//! `BodyLexer` scans raw text one position at a time. Besides the
//! literal-character primitives it exposes one probe per construct. A probe
//! either matches at the current offset, advances past the whole construct
//! and returns a [`Token`], or fails and leaves the position untouched.
//!
//! Which probes run at a position is decided by the parser's dispatch
//! table; the lexer itself has no notion of precedence.

pub mod attrs;
pub mod cursor;
mod memo;
pub mod token;

use std::sync::OnceLock;

use regex::Regex;

use crate::nodes::Attrs;

use super::kinds::{
    Bbtag, Bold, CodeSpan, Comment, Header, Img, Italic, Link, SourceFence, Strike, Verbatim,
    emphasis::PARAGRAPH_BREAK,
};
use attrs::parse_attrs;
use cursor::Cursor;
use memo::ScanMemo;
pub use token::{Fragment, Token, TokenKind};

pub struct BodyLexer<'a> {
    cur: Cursor<'a>,
    /// Whether offset 0 of this input counts as the start of a line.
    /// False for inline bodies (link titles, emphasis) so that `**# x**`
    /// never yields a header.
    line_start: bool,
    memo: ScanMemo<'a>,
}

impl<'a> BodyLexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self::nested(Fragment { text, base: 0 }, true)
    }

    pub fn nested(fragment: Fragment<'a>, line_start: bool) -> Self {
        Self {
            cur: Cursor::new(fragment.text, fragment.base),
            line_start,
            memo: ScanMemo::default(),
        }
    }

    pub fn at_end(&self) -> bool {
        self.cur.eof()
    }

    pub fn peek_char(&self) -> Option<char> {
        self.cur.peek()
    }

    /// Consumes exactly one char; only `None` at end of input.
    pub fn consume_literal_char(&mut self) -> Option<char> {
        self.cur.bump()
    }

    pub fn consume_link(&mut self) -> Option<Token<'a>> {
        probe(&mut self.cur, scan_link)
    }

    pub fn consume_bbtag_self_close(&mut self) -> Option<Token<'a>> {
        probe(&mut self.cur, scan_bbtag_self_close)
    }

    pub fn consume_bbtag_need_close(&mut self) -> Option<Token<'a>> {
        let memo = &mut self.memo;
        probe(&mut self.cur, |cur| scan_bbtag_need_close(cur, memo))
    }

    pub fn consume_source(&mut self) -> Option<Token<'a>> {
        let memo = &mut self.memo;
        probe(&mut self.cur, |cur| scan_source(cur, memo))
    }

    pub fn consume_code(&mut self) -> Option<Token<'a>> {
        probe(&mut self.cur, scan_code)
    }

    pub fn consume_strike(&mut self) -> Option<Token<'a>> {
        let memo = &mut self.memo;
        probe(&mut self.cur, |cur| {
            scan_emphasis(cur, Strike::DELIM, memo).map(|body| TokenKind::Strike { body })
        })
    }

    pub fn consume_bold(&mut self) -> Option<Token<'a>> {
        let memo = &mut self.memo;
        probe(&mut self.cur, |cur| {
            scan_emphasis(cur, Bold::DELIM, memo).map(|body| TokenKind::Bold { body })
        })
    }

    pub fn consume_italic(&mut self) -> Option<Token<'a>> {
        let memo = &mut self.memo;
        probe(&mut self.cur, |cur| {
            scan_emphasis(cur, Italic::DELIM, memo).map(|body| TokenKind::Italic { body })
        })
    }

    pub fn consume_img(&mut self) -> Option<Token<'a>> {
        probe(&mut self.cur, scan_img)
    }

    pub fn consume_comment(&mut self) -> Option<Token<'a>> {
        let memo = &mut self.memo;
        probe(&mut self.cur, |cur| {
            scan_enclosed(cur, Comment::OPEN, Comment::CLOSE, memo)
                .map(|body| TokenKind::Comment { body })
        })
    }

    pub fn consume_verbatim(&mut self) -> Option<Token<'a>> {
        let memo = &mut self.memo;
        probe(&mut self.cur, |cur| {
            scan_enclosed(cur, Verbatim::OPEN, Verbatim::CLOSE, memo)
                .map(|body| TokenKind::Verbatim { body })
        })
    }

    pub fn consume_header(&mut self) -> Option<Token<'a>> {
        if !self.at_line_start() {
            return None;
        }
        probe(&mut self.cur, scan_header)
    }

    fn at_line_start(&self) -> bool {
        match self.cur.prev() {
            None => self.line_start,
            Some(c) => c == '\n',
        }
    }
}

/// Runs `scan` and restores the cursor if it fails. A match always
/// consumes input.
fn probe<'a>(
    cur: &mut Cursor<'a>,
    scan: impl FnOnce(&mut Cursor<'a>) -> Option<TokenKind<'a>>,
) -> Option<Token<'a>> {
    let saved = cur.clone();
    let start = cur.i;
    match scan(cur) {
        Some(kind) => {
            let span = cur.span_from(start);
            debug_assert!(!span.is_empty(), "probe matched without consuming input");
            Some(Token { kind, span })
        }
        None => {
            *cur = saved;
            None
        }
    }
}

fn scan_link<'a>(cur: &mut Cursor<'a>) -> Option<TokenKind<'a>> {
    if cur.bump()? != Link::OPEN {
        return None;
    }
    let title_start = cur.i;
    let mut depth = 0usize;
    loop {
        match cur.peek()? {
            '\n' => return None,
            Link::OPEN => depth += 1,
            Link::TITLE_CLOSE if depth == 0 => break,
            Link::TITLE_CLOSE => depth -= 1,
            _ => {}
        }
        cur.bump();
    }
    let title = cur.fragment(title_start, cur.i);
    cur.bump(); // ]

    if cur.bump()? != Link::HREF_OPEN {
        return None;
    }
    // parentheses inside the target must balance: `(a(b))`
    let href_start = cur.i;
    let mut parens = 0usize;
    loop {
        match cur.peek()? {
            c if c.is_whitespace() => return None,
            Link::HREF_OPEN => parens += 1,
            Link::HREF_CLOSE if parens == 0 => break,
            Link::HREF_CLOSE => parens -= 1,
            _ => {}
        }
        cur.bump();
    }
    let href = cur.slice(href_start, cur.i);
    cur.bump(); // )
    if title.text.is_empty() && href.is_empty() {
        return None;
    }

    Some(TokenKind::Link {
        title,
        href: (!href.is_empty()).then_some(href),
    })
}

fn scan_bbtag_self_close<'a>(cur: &mut Cursor<'a>) -> Option<TokenKind<'a>> {
    if cur.bump()? != Bbtag::OPEN {
        return None;
    }

    if cur.peek()? == Bbtag::ANCHOR_MARK {
        cur.bump();
        let id = cur.eat_while(Bbtag::is_anchor_char);
        if id.is_empty() || cur.bump()? != Bbtag::CLOSE {
            return None;
        }
        let attrs = Attrs::from([("name".to_string(), id.to_string())]);
        return Some(TokenKind::Bbtag {
            tag: Bbtag::Anchor,
            attrs,
            body: cur.fragment(cur.i, cur.i),
        });
    }

    let (name, attrs_text) = scan_bbtag_open(cur)?;
    let tag = Bbtag::self_close(name)?;
    let attrs = parse_attrs(attrs_text)?;
    Some(TokenKind::Bbtag {
        tag,
        attrs,
        body: cur.fragment(cur.i, cur.i),
    })
}

/// Same-name directives nest: `[warn]a [warn]b[/warn] c[/warn]` is one
/// directive whose body holds another.
fn scan_bbtag_need_close<'a>(
    cur: &mut Cursor<'a>,
    memo: &mut ScanMemo<'a>,
) -> Option<TokenKind<'a>> {
    if cur.bump()? != Bbtag::OPEN {
        return None;
    }
    let (name, attrs_text) = scan_bbtag_open(cur)?;
    let tag = Bbtag::need_close(name)?;
    let attrs = parse_attrs(attrs_text)?;

    let body_start = cur.i;
    let close_at = memo.closer(cur.s, name, body_start)?;
    let body = cur.fragment(body_start, close_at);
    let close_len = Bbtag::END_OPEN.len() + name.len() + Bbtag::CLOSE.len_utf8();
    cur.bump_n(close_at - body_start + close_len);

    Some(TokenKind::Bbtag { tag, attrs, body })
}

/// Reads `name attrs]` after the opening bracket. The cursor ends past `]`.
fn scan_bbtag_open<'a>(cur: &mut Cursor<'a>) -> Option<(&'a str, &'a str)> {
    let name = cur.eat_while(Bbtag::is_name_char);
    if name.is_empty() {
        return None;
    }
    let next = cur.peek()?;
    if next != Bbtag::CLOSE && !next.is_whitespace() {
        return None;
    }
    let attrs_text = scan_attrs_until(cur, Bbtag::CLOSE)?;
    cur.bump(); // ]
    Some((name, attrs_text))
}

/// Scans an attribute list up to `close` (not consumed), skipping over
/// quoted values. Attribute lists never span lines.
fn scan_attrs_until<'a>(cur: &mut Cursor<'a>, close: char) -> Option<&'a str> {
    let start = cur.i;
    let mut quote: Option<char> = None;
    loop {
        let c = cur.peek()?;
        if c == '\n' {
            return None;
        }
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == close => break,
            None => {}
        }
        cur.bump();
    }
    Some(cur.slice(start, cur.i))
}

fn scan_source<'a>(cur: &mut Cursor<'a>, memo: &mut ScanMemo<'a>) -> Option<TokenKind<'a>> {
    if !cur.eat(SourceFence::FENCE) {
        return None;
    }
    let lang = cur.eat_while(SourceFence::is_lang_char);
    if cur.bump()? != '\n' {
        return None;
    }

    let body_start = cur.i;
    let body = if cur.eat(SourceFence::FENCE) {
        cur.fragment(body_start, body_start)
    } else {
        let offset = memo.find(cur.rest(), cur.i, SourceFence::CLOSE)?;
        cur.bump_n(offset);
        let body = cur.fragment(body_start, cur.i);
        cur.bump_n(SourceFence::CLOSE.len());
        body
    };

    let mut attrs = Attrs::new();
    if !lang.is_empty() {
        attrs.insert("lang".to_string(), lang.to_string());
    }
    Some(TokenKind::Bbtag {
        tag: Bbtag::Source,
        attrs,
        body,
    })
}

fn scan_code<'a>(cur: &mut Cursor<'a>) -> Option<TokenKind<'a>> {
    let class = if cur.eat(CodeSpan::CLASSED_OPEN) {
        let class = cur.eat_while(CodeSpan::is_class_char);
        if class.is_empty() || cur.bump()? != CodeSpan::TICK {
            return None;
        }
        Some(class)
    } else {
        if cur.bump()? != CodeSpan::TICK {
            return None;
        }
        None
    };

    let body = cur.eat_while(|c| c != CodeSpan::TICK && c != '\n');
    if body.is_empty() || cur.bump()? != CodeSpan::TICK {
        return None;
    }
    Some(TokenKind::Code { body, class })
}

fn scan_emphasis<'a>(
    cur: &mut Cursor<'a>,
    delim: &'static str,
    memo: &mut ScanMemo<'a>,
) -> Option<Fragment<'a>> {
    if !cur.eat(delim) {
        return None;
    }
    let body_start = cur.i;
    let first = cur.peek()?;
    if first.is_whitespace() || (delim == Italic::DELIM && first == '*') {
        return None;
    }
    if memo.emphasis_unclosed(delim, body_start) {
        return None;
    }

    // italic openers before this offset are known not to close
    let mut italic_dead_until = body_start;
    loop {
        if cur.eof() || cur.starts_with(PARAGRAPH_BREAK) {
            memo.record_unclosed_emphasis(delim, body_start, cur.i);
            return None;
        }
        // nested bold inside italic
        if delim == Italic::DELIM && cur.starts_with(Bold::DELIM) {
            cur.bump_n(Bold::DELIM.len());
            continue;
        }
        if cur.starts_with(delim) && cur.i > body_start && !cur.prev()?.is_whitespace() {
            break;
        }
        // nested italic inside bold
        if delim == Bold::DELIM
            && cur.i >= italic_dead_until
            && cur.starts_with(Italic::DELIM)
            && !cur.starts_with(Bold::DELIM)
        {
            let opener = cur.clone();
            cur.bump();
            match skip_italic_in_bold(cur) {
                Ok(()) => continue,
                Err(stop) => {
                    italic_dead_until = stop;
                    *cur = opener;
                }
            }
        }
        cur.bump();
    }

    let body = cur.fragment(body_start, cur.i);
    cur.bump_n(delim.len());
    Some(body)
}

/// Skips an italic body and its closing `*`, starting right after the
/// opener. A closing run of exactly `**` belongs to the bold, so the italic
/// is unclosed there; `Err` carries the offset where the search stopped.
fn skip_italic_in_bold(cur: &mut Cursor<'_>) -> Result<(), usize> {
    match cur.peek() {
        Some(c) if !c.is_whitespace() && c != '*' => {}
        _ => return Err(cur.i),
    }
    loop {
        if cur.eof() || cur.starts_with(PARAGRAPH_BREAK) {
            return Err(cur.i);
        }
        if cur.starts_with(Italic::DELIM) && cur.prev().is_some_and(|c| !c.is_whitespace()) {
            let run = cur.rest().chars().take_while(|&c| c == '*').count();
            if run == Bold::DELIM.len() {
                return Err(cur.i);
            }
            cur.bump();
            return Ok(());
        }
        cur.bump();
    }
}

fn scan_img<'a>(cur: &mut Cursor<'a>) -> Option<TokenKind<'a>> {
    if !cur.eat(Img::OPEN) {
        return None;
    }
    let next = cur.peek()?;
    if !next.is_whitespace() && next != Img::CLOSE && next != Img::SELF_CLOSE {
        return None;
    }
    let raw = scan_attrs_until(cur, Img::CLOSE)?;
    cur.bump(); // >

    let raw = raw.trim_end();
    let attrs = parse_attrs(raw.strip_suffix(Img::SELF_CLOSE).unwrap_or(raw))?;
    if !attrs.contains_key("src") {
        return None;
    }
    Some(TokenKind::Bbtag {
        tag: Bbtag::Img,
        attrs,
        body: cur.fragment(cur.i, cur.i),
    })
}

fn scan_enclosed<'a>(
    cur: &mut Cursor<'a>,
    open: &str,
    close: &'static str,
    memo: &mut ScanMemo<'a>,
) -> Option<&'a str> {
    if !cur.eat(open) {
        return None;
    }
    let offset = memo.find(cur.rest(), cur.i, close)?;
    let start = cur.i;
    cur.bump_n(offset);
    let body = cur.slice(start, cur.i);
    cur.bump_n(close.len());
    Some(body)
}

fn scan_header<'a>(cur: &mut Cursor<'a>) -> Option<TokenKind<'a>> {
    static HEADER_REGEX: OnceLock<Regex> = OnceLock::new();
    let header_regex = HEADER_REGEX.get_or_init(|| {
        Regex::new(&format!(
            r"^(#{{1,{}}}) +(\S.*?)(?: +\[#([A-Za-z0-9_-]+)\])?[ \t]*$",
            Header::MAX_LEXED_LEVEL
        ))
        .expect("Invalid header regex")
    });

    let rest = cur.rest();
    let line = rest.find('\n').map_or(rest, |n| &rest[..n]);
    let line = line.strip_suffix('\r').unwrap_or(line);
    let caps = header_regex.captures(line)?;

    let level = caps.get(1)?.as_str().len();
    let title = caps.get(2)?.as_str();
    let anchor = caps.get(3).map(|m| m.as_str());
    cur.bump_n(line.len());

    Some(TokenKind::Header {
        level,
        title,
        anchor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::span::Span;
    use pretty_assertions::assert_eq;

    fn frag(text: &str, base: usize) -> Fragment<'_> {
        Fragment { text, base }
    }

    #[test]
    fn literal_chars_advance_one_at_a_time() {
        let mut lexer = BodyLexer::new("ab");
        assert_eq!(lexer.peek_char(), Some('a'));
        assert_eq!(lexer.consume_literal_char(), Some('a'));
        assert_eq!(lexer.consume_literal_char(), Some('b'));
        assert!(lexer.at_end());
        assert_eq!(lexer.consume_literal_char(), None);
    }

    #[test]
    fn link_with_href() {
        let mut lexer = BodyLexer::new("[the *title*](http://ya.ru) tail");
        let token = lexer.consume_link().unwrap();
        assert_eq!(
            token.kind,
            TokenKind::Link {
                title: frag("the *title*", 1),
                href: Some("http://ya.ru"),
            }
        );
        assert_eq!(token.span, Span { start: 0, end: 27 });
        assert_eq!(lexer.cur.pos(), 27);
    }

    #[test]
    fn link_target_balances_parens() {
        let mut lexer = BodyLexer::new("[x](javascript:alert(1)) b");
        let token = lexer.consume_link().unwrap();
        assert_eq!(
            token.kind,
            TokenKind::Link {
                title: frag("x", 1),
                href: Some("javascript:alert(1)"),
            }
        );
        assert_eq!(lexer.peek_char(), Some(' '));
        assert!(BodyLexer::new("[x](a(b)").consume_link().is_none());
    }

    #[test]
    fn link_bare_url_shorthand() {
        let mut lexer = BodyLexer::new("[http://ya.ru]()");
        let token = lexer.consume_link().unwrap();
        assert_eq!(
            token.kind,
            TokenKind::Link {
                title: frag("http://ya.ru", 1),
                href: None,
            }
        );
    }

    #[test]
    fn failed_probe_restores_position() {
        let mut lexer = BodyLexer::new("[no closing paren](x");
        assert!(lexer.consume_link().is_none());
        assert_eq!(lexer.cur.pos(), 0);
        assert!(lexer.consume_bbtag_self_close().is_none());
        assert!(lexer.consume_bbtag_need_close().is_none());
        assert_eq!(lexer.cur.pos(), 0);
    }

    #[test]
    fn empty_link_is_not_a_link() {
        let mut lexer = BodyLexer::new("[]()");
        assert!(lexer.consume_link().is_none());
    }

    #[test]
    fn anchor_directive() {
        let mut lexer = BodyLexer::new("[#intro] text");
        let token = lexer.consume_bbtag_self_close().unwrap();
        match token.kind {
            TokenKind::Bbtag { tag, attrs, .. } => {
                assert_eq!(tag, Bbtag::Anchor);
                assert_eq!(attrs.get("name").map(String::as_str), Some("intro"));
            }
            other => panic!("expected Bbtag, got {other:?}"),
        }
        assert_eq!(lexer.cur.pos(), 8);
    }

    #[test]
    fn self_close_with_attrs() {
        let mut lexer = BodyLexer::new(r#"[iframe src="/demo" height="300"]"#);
        let token = lexer.consume_bbtag_self_close().unwrap();
        match token.kind {
            TokenKind::Bbtag { tag, attrs, .. } => {
                assert_eq!(tag, Bbtag::Iframe);
                assert_eq!(attrs.len(), 2);
                assert_eq!(attrs["src"], "/demo");
            }
            other => panic!("expected Bbtag, got {other:?}"),
        }
    }

    #[test]
    fn unknown_directive_is_not_matched() {
        let mut lexer = BodyLexer::new("[whatever]x[/whatever]");
        assert!(lexer.consume_bbtag_self_close().is_none());
        assert!(lexer.consume_bbtag_need_close().is_none());
        assert_eq!(lexer.cur.pos(), 0);
    }

    #[test]
    fn need_close_balances_same_name_nesting() {
        let src = "[warn]a [warn]b[/warn] c[/warn]!";
        let mut lexer = BodyLexer::new(src);
        let token = lexer.consume_bbtag_need_close().unwrap();
        match token.kind {
            TokenKind::Bbtag { tag, body, .. } => {
                assert_eq!(tag, Bbtag::Warn);
                assert_eq!(body, frag("a [warn]b[/warn] c", 6));
            }
            other => panic!("expected Bbtag, got {other:?}"),
        }
        assert_eq!(lexer.peek_char(), Some('!'));
    }

    #[test]
    fn unclosed_need_close_fails() {
        let mut lexer = BodyLexer::new("[warn]never closed");
        assert!(lexer.consume_bbtag_need_close().is_none());
        assert_eq!(lexer.cur.pos(), 0);
    }

    #[test]
    fn inner_opener_closes_after_outer_fails() {
        let mut lexer = BodyLexer::new("[warn]a [warn]b[/warn]");
        assert!(lexer.consume_bbtag_need_close().is_none());
        for _ in 0.."[warn]a ".len() {
            lexer.consume_literal_char();
        }
        match lexer.consume_bbtag_need_close().unwrap().kind {
            TokenKind::Bbtag { body, .. } => assert_eq!(body, frag("b", 14)),
            other => panic!("expected Bbtag, got {other:?}"),
        }
        assert!(lexer.at_end());
    }

    #[test]
    fn emphasis_after_unclosed_paragraph() {
        let mut lexer = BodyLexer::new("*a *b\n\n*c*");
        assert!(lexer.consume_italic().is_none());
        for _ in 0..3 {
            lexer.consume_literal_char();
        }
        assert!(lexer.consume_italic().is_none());
        for _ in 0..4 {
            lexer.consume_literal_char();
        }
        assert_eq!(
            lexer.consume_italic().unwrap().kind,
            TokenKind::Italic { body: frag("c", 8) }
        );
    }

    #[test]
    fn bold_skips_inner_italic() {
        let mut lexer = BodyLexer::new("**a *b*** tail");
        assert_eq!(
            lexer.consume_bold().unwrap().kind,
            TokenKind::Bold {
                body: frag("a *b*", 2)
            }
        );
        assert_eq!(lexer.peek_char(), Some(' '));

        let mut lexer = BodyLexer::new("**a *b c**");
        assert_eq!(
            lexer.consume_bold().unwrap().kind,
            TokenKind::Bold {
                body: frag("a *b c", 2)
            }
        );
    }

    #[test]
    fn comment_terminator_is_searched_once() {
        let mut lexer = BodyLexer::new("<!-- a <!-- b");
        assert!(lexer.consume_comment().is_none());
        for _ in 0.."<!-- a ".len() {
            lexer.consume_literal_char();
        }
        assert!(lexer.consume_comment().is_none());
        assert_eq!(lexer.cur.pos(), 7);
    }

    #[test]
    fn fenced_source_with_lang() {
        let mut lexer = BodyLexer::new("```js\nlet a = 1;\n```\nafter");
        let token = lexer.consume_source().unwrap();
        match token.kind {
            TokenKind::Bbtag { tag, attrs, body } => {
                assert_eq!(tag, Bbtag::Source);
                assert_eq!(attrs["lang"], "js");
                assert_eq!(body.text, "let a = 1;");
            }
            other => panic!("expected Bbtag, got {other:?}"),
        }
        assert_eq!(lexer.peek_char(), Some('\n'));
    }

    #[test]
    fn source_must_precede_code() {
        // The code probe alone would not match a fence either.
        let mut lexer = BodyLexer::new("```\nx\n```");
        assert!(lexer.consume_code().is_none());
        assert!(lexer.consume_source().is_some());
    }

    #[test]
    fn code_spans() {
        let mut lexer = BodyLexer::new("`a < b`");
        assert_eq!(
            lexer.consume_code().unwrap().kind,
            TokenKind::Code {
                body: "a < b",
                class: None
            }
        );

        let mut lexer = BodyLexer::new("``js`let x`");
        assert_eq!(
            lexer.consume_code().unwrap().kind,
            TokenKind::Code {
                body: "let x",
                class: Some("js")
            }
        );

        let mut lexer = BodyLexer::new("`unclosed");
        assert!(lexer.consume_code().is_none());
    }

    #[test]
    fn emphasis_bodies() {
        let mut lexer = BodyLexer::new("**bold *it* text** rest");
        assert_eq!(
            lexer.consume_bold().unwrap().kind,
            TokenKind::Bold {
                body: frag("bold *it* text", 2)
            }
        );

        let mut lexer = BodyLexer::new("*a **b** c*");
        assert_eq!(
            lexer.consume_italic().unwrap().kind,
            TokenKind::Italic {
                body: frag("a **b** c", 1)
            }
        );

        let mut lexer = BodyLexer::new("~~gone~~");
        assert_eq!(
            lexer.consume_strike().unwrap().kind,
            TokenKind::Strike {
                body: frag("gone", 2)
            }
        );
    }

    #[test]
    fn emphasis_rejects_whitespace_edges_and_blank_lines() {
        assert!(BodyLexer::new("* list item*").consume_italic().is_none());
        assert!(BodyLexer::new("**a **").consume_bold().is_none());
        assert!(BodyLexer::new("**a\n\nb**").consume_bold().is_none());
        assert!(BodyLexer::new("**").consume_bold().is_none());
    }

    #[test]
    fn img_tag() {
        let mut lexer = BodyLexer::new(r#"<img src="cat.png" alt="cat" />"#);
        match lexer.consume_img().unwrap().kind {
            TokenKind::Bbtag { tag, attrs, .. } => {
                assert_eq!(tag, Bbtag::Img);
                assert_eq!(attrs["src"], "cat.png");
                assert_eq!(attrs["alt"], "cat");
            }
            other => panic!("expected Bbtag, got {other:?}"),
        }
        assert!(BodyLexer::new("<imgx src=a>").consume_img().is_none());
        assert!(BodyLexer::new("<img alt=a>").consume_img().is_none());
    }

    #[test]
    fn comment_and_verbatim() {
        let mut lexer = BodyLexer::new("<!-- note -->x");
        assert_eq!(
            lexer.consume_comment().unwrap().kind,
            TokenKind::Comment { body: " note " }
        );
        let mut lexer = BodyLexer::new("<verbatim><b>raw</b></verbatim>");
        assert_eq!(
            lexer.consume_verbatim().unwrap().kind,
            TokenKind::Verbatim { body: "<b>raw</b>" }
        );
        assert!(BodyLexer::new("<!-- open").consume_comment().is_none());
    }

    #[test]
    fn header_with_explicit_anchor() {
        let mut lexer = BodyLexer::new("## Getting started [#start]\nbody");
        let token = lexer.consume_header().unwrap();
        assert_eq!(
            token.kind,
            TokenKind::Header {
                level: 2,
                title: "Getting started",
                anchor: Some("start"),
            }
        );
        assert_eq!(lexer.peek_char(), Some('\n'));
    }

    #[test]
    fn header_only_at_line_start() {
        let mut lexer = BodyLexer::new("x # not a header");
        lexer.consume_literal_char();
        lexer.consume_literal_char();
        assert!(lexer.consume_header().is_none());

        let mut lexer = BodyLexer::new("line\n# Header");
        for _ in 0..5 {
            lexer.consume_literal_char();
        }
        assert!(lexer.consume_header().is_some());
    }

    #[test]
    fn header_in_inline_body_is_not_a_header() {
        let mut lexer = BodyLexer::nested(frag("# x", 2), false);
        assert!(lexer.consume_header().is_none());
    }

    #[test]
    fn header_level_limits() {
        assert!(BodyLexer::new("###### Six").consume_header().is_some());
        assert!(BodyLexer::new("####### Seven").consume_header().is_none());
        assert!(BodyLexer::new("#NoSpace").consume_header().is_none());
        assert!(BodyLexer::new("# ").consume_header().is_none());
    }
}
