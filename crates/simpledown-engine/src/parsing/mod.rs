//! # Parsing
//!
//! Turns simpledown text into a [`Node`] sequence in a single pass.
//!
//! ## Layers
//!
//! - **[`lexer`]**: construct probes over a char cursor; each either
//!   matches and advances or leaves the position untouched.
//! - **[`kinds`]**: delimiter constants and directive names.
//! - **[`parser`]**: dispatch by leading char, one handler per token kind,
//!   recursion into captured bodies.
//! - **`bbtag`**: handlers for bracketed directives.
//!
//! Malformed or disallowed constructs never abort a parse: the handler's
//! [`ParseError`] is turned into an `ErrorTag` in place and parsing goes
//! on after the construct. Only [`FatalError`]s (caller defects) abort.

mod bbtag;
pub mod error;
pub mod kinds;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod span;

use log::debug;

use crate::metadata::Metadata;
use crate::nodes::{Document, Node};

pub use error::{FatalError, ParseError};
pub use options::{DEFAULT_MAX_DEPTH, ParseOptions, ParseSettings};
use parser::BodyParser;

/// Parses `text` under `options`, appending headers, anchors, libraries
/// and head fragments to `metadata`.
///
/// The same `metadata` may be passed to several calls to collect one
/// registry for a set of documents, as long as `translit_anchors` stays
/// the same.
pub fn parse(
    text: &str,
    options: &ParseOptions,
    metadata: &mut Metadata,
) -> Result<Vec<Node>, FatalError> {
    metadata.bind(options.translit_anchors)?;
    debug!(
        "parsing {} bytes (trusted: {}, export: {})",
        text.len(),
        options.trusted,
        options.export
    );
    BodyParser::new(text, options, metadata).parse()
}

/// Like [`parse`], keeping the trust mode with the result so node trust
/// can be resolved later.
pub fn parse_document(
    text: &str,
    options: &ParseOptions,
    metadata: &mut Metadata,
) -> Result<Document, FatalError> {
    let children = parse(text, options, metadata)?;
    Ok(Document {
        trusted: options.trusted,
        children,
    })
}
