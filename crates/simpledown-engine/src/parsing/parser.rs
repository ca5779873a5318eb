use log::{debug, trace};

use crate::metadata::{HeaderRequest, Metadata};
use crate::nodes::{Attrs, Node};
use crate::text::format_title;

use super::{
    FatalError, ParseError, ParseOptions,
    error::HandlerError,
    kinds::{Bold, CodeSpan, Header, Italic, Link, Strike},
    lexer::{BodyLexer, Fragment, Token, TokenKind},
};

pub(crate) type HandlerResult = Result<Vec<Node>, HandlerError>;

/// Recursive-descent parser over one piece of text.
///
/// Nested constructs (link titles, emphasis and directive bodies) are
/// parsed by a fresh `BodyParser` over the captured fragment that borrows
/// the same options and registry.
pub struct BodyParser<'a, 'p> {
    lexer: BodyLexer<'a>,
    pub(super) options: &'p ParseOptions,
    pub(super) metadata: &'p mut Metadata,
    depth: usize,
}

impl<'a, 'p> BodyParser<'a, 'p> {
    pub fn new(text: &'a str, options: &'p ParseOptions, metadata: &'p mut Metadata) -> Self {
        Self {
            lexer: BodyLexer::new(text),
            options,
            metadata,
            depth: 0,
        }
    }

    /// Parses to the end of input. Literal text between constructs is
    /// collected into `TextNode`s; nothing is dropped.
    pub fn parse(mut self) -> Result<Vec<Node>, FatalError> {
        let mut buffer = String::new();
        let mut children = Vec::new();

        while !self.lexer.at_end() {
            match self.parse_nodes()? {
                Some(nodes) => {
                    if !nodes.is_empty() && !buffer.is_empty() {
                        children.push(Node::text(std::mem::take(&mut buffer)));
                    }
                    children.extend(nodes);
                }
                None => {
                    if let Some(c) = self.lexer.consume_literal_char() {
                        buffer.push(c);
                    }
                }
            }
        }

        if !buffer.is_empty() {
            children.push(Node::text(buffer));
        }
        Ok(children)
    }

    /// Parses and wraps the whole input into one composite tag.
    fn parse_and_wrap(self, tag: &str) -> Result<Node, FatalError> {
        let children = self.parse()?;
        Ok(Node::composite(tag, children, Attrs::new()))
    }

    /// `None` when no construct starts here. A handler may also succeed
    /// with no nodes (e.g. `[libs]`), which still consumes the construct.
    fn parse_nodes(&mut self) -> Result<Option<Vec<Node>>, FatalError> {
        let Some(token) = self.next_token() else {
            return Ok(None);
        };
        let span = token.span;

        match self.dispatch(token) {
            Ok(nodes) => Ok(Some(nodes)),
            Err(HandlerError::Parse(err)) => {
                debug!(
                    "recovered parse error at {} ({} bytes): {}",
                    span.start,
                    span.len(),
                    err.message
                );
                Ok(Some(vec![Node::error(err.tag, err.message)]))
            }
            Err(HandlerError::Fatal(err)) => Err(err),
        }
    }

    /// Probes to try, keyed by the next raw char. Within one char the order
    /// is the construct precedence.
    fn next_token(&mut self) -> Option<Token<'a>> {
        let lexer = &mut self.lexer;
        match lexer.peek_char()? {
            Link::OPEN => lexer
                .consume_link()
                .or_else(|| lexer.consume_bbtag_self_close())
                .or_else(|| lexer.consume_bbtag_need_close()),
            CodeSpan::TICK => lexer.consume_source().or_else(|| lexer.consume_code()),
            '~' => lexer.consume_strike(),
            '*' => lexer.consume_bold().or_else(|| lexer.consume_italic()),
            '<' => lexer
                .consume_img()
                .or_else(|| lexer.consume_comment())
                .or_else(|| lexer.consume_verbatim()),
            Header::MARK => lexer.consume_header(),
            _ => None,
        }
    }

    fn dispatch(&mut self, token: Token<'a>) -> HandlerResult {
        match token.kind {
            TokenKind::Link { title, href } => self.parse_link(title, href),
            TokenKind::Header {
                level,
                title,
                anchor,
            } => self.parse_header(level, title, anchor),
            TokenKind::Bbtag { tag, attrs, body } => self.parse_bbtag(tag, attrs, body),
            TokenKind::Bold { body } => self.parse_emphasis(body, Bold::TAG),
            TokenKind::Italic { body } => self.parse_emphasis(body, Italic::TAG),
            TokenKind::Strike { body } => self.parse_emphasis(body, Strike::TAG),
            TokenKind::Code { body, class } => self.parse_code(body, class),
            TokenKind::Comment { body } => Ok(vec![Node::comment(body)]),
            TokenKind::Verbatim { body } => self.parse_verbatim(body),
        }
    }

    /// A parser for `fragment` sharing this parser's options and registry.
    /// `line_start` enables line-start constructs (headers) at offset 0.
    pub(super) fn nested(
        &mut self,
        fragment: Fragment<'a>,
        line_start: bool,
    ) -> Result<BodyParser<'a, '_>, ParseError> {
        let depth = self.depth + 1;
        if depth > self.options.max_depth {
            return Err(ParseError::new("span", "Nesting is too deep"));
        }
        trace!(
            "nested parser at {}..{} (depth {depth})",
            fragment.span().start,
            fragment.span().end
        );
        Ok(BodyParser {
            lexer: BodyLexer::nested(fragment, line_start),
            options: self.options,
            metadata: &mut *self.metadata,
            depth,
        })
    }

    pub(super) fn ensure_trusted(&self, tag: &str, construct: &str) -> Result<(), ParseError> {
        if self.options.trusted {
            Ok(())
        } else {
            Err(ParseError::new(
                tag,
                format!("{construct} is only allowed in trusted content"),
            ))
        }
    }

    /// Headers carry no markup, only typography; the registry validates
    /// nesting and assigns the anchor.
    fn parse_header(&mut self, level: usize, title: &str, anchor: Option<&str>) -> HandlerResult {
        let rendered = format_title(title);
        let anchor = self.metadata.register_header(
            HeaderRequest {
                level,
                raw_title: title,
                title: &rendered,
                explicit_anchor: anchor,
            },
            self.options.anchor_maker(),
            self.options.translit_anchors,
        )?;
        Ok(vec![Node::header(level, anchor, rendered)])
    }

    /// `[title](href)`; `[http://x]()` links to its own title.
    fn parse_link(&mut self, title: Fragment<'a>, href: Option<&str>) -> HandlerResult {
        let href = href.unwrap_or(title.text);
        if !self.options.trusted {
            self.options.url_policy().ensure_safe(href)?;
        }
        let children = self.nested(title, false)?.parse()?;
        Ok(vec![Node::link(children, href)])
    }

    fn parse_emphasis(&mut self, body: Fragment<'a>, tag: &str) -> HandlerResult {
        let node = self.nested(body, false)?.parse_and_wrap(tag)?;
        Ok(vec![node])
    }

    fn parse_code(&mut self, body: &str, class: Option<&str>) -> HandlerResult {
        let attrs = class
            .map(|c| Attrs::from([("class".to_string(), c.to_string())]))
            .unwrap_or_default();
        Ok(vec![Node::escaped(CodeSpan::TAG, body, attrs)])
    }

    fn parse_verbatim(&mut self, body: &str) -> HandlerResult {
        self.ensure_trusted("div", "Verbatim block")?;
        Ok(vec![Node::verbatim(body)])
    }
}
