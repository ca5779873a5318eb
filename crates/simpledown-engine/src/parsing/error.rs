use thiserror::Error;

/// A malformed or disallowed construct. Always recovered at the dispatch
/// boundary by substituting an `ErrorTag`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    /// Suggested wrapper tag for the error marker (`div` for block
    /// constructs, `span` for inline ones).
    pub tag: String,
    pub message: String,
}

impl ParseError {
    pub fn new(tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            message: message.into(),
        }
    }
}

/// Caller or dispatch defects. Never recovered; they abort the parse call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FatalError {
    #[error("Parse options must define the trust mode")]
    MissingTrustMode,

    #[error("Cannot resolve trust: no ancestor defines it")]
    UnknownTrust,

    #[error("No node at path {path:?}")]
    InvalidPath { path: Vec<usize> },

    #[error(
        "Registry was created with translit_anchors={expected} but reused with translit_anchors={actual}"
    )]
    IncompatibleRegistry { expected: bool, actual: bool },
}

/// What a construct handler can fail with.
#[derive(Debug, Error)]
pub(crate) enum HandlerError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Fatal(#[from] FatalError),
}
