use std::fmt;

use serde::Deserialize;

use crate::safety::{SchemeAllowList, UrlPolicy};
use crate::text::{AnchorMaker, Slugger};

use super::FatalError;

pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Everything a parse call needs besides the text and the registry.
///
/// Not `Default`: the trust mode always comes from the caller.
pub struct ParseOptions {
    pub trusted: bool,
    /// Transliterate Cyrillic titles when deriving anchors.
    pub translit_anchors: bool,
    /// Export mode: `[offline]` content is kept and `[online]` dropped.
    pub export: bool,
    /// Maximum nesting of recursive parsers (link titles, emphasis,
    /// directive bodies).
    pub max_depth: usize,
    url_policy: Box<dyn UrlPolicy>,
    anchor_maker: Box<dyn AnchorMaker>,
}

impl ParseOptions {
    pub fn new(trusted: bool) -> Self {
        Self {
            trusted,
            translit_anchors: false,
            export: false,
            max_depth: DEFAULT_MAX_DEPTH,
            url_policy: Box::new(SchemeAllowList::default()),
            anchor_maker: Box::new(Slugger),
        }
    }

    pub fn trusted() -> Self {
        Self::new(true)
    }

    pub fn untrusted() -> Self {
        Self::new(false)
    }

    pub fn with_translit_anchors(mut self, translit: bool) -> Self {
        self.translit_anchors = translit;
        self
    }

    pub fn with_export(mut self, export: bool) -> Self {
        self.export = export;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_url_policy(mut self, policy: impl UrlPolicy + 'static) -> Self {
        self.url_policy = Box::new(policy);
        self
    }

    pub fn with_anchor_maker(mut self, maker: impl AnchorMaker + 'static) -> Self {
        self.anchor_maker = Box::new(maker);
        self
    }

    pub fn url_policy(&self) -> &dyn UrlPolicy {
        self.url_policy.as_ref()
    }

    pub fn anchor_maker(&self) -> &dyn AnchorMaker {
        self.anchor_maker.as_ref()
    }
}

impl fmt::Debug for ParseOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseOptions")
            .field("trusted", &self.trusted)
            .field("translit_anchors", &self.translit_anchors)
            .field("export", &self.export)
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}

/// Serializable form of [`ParseOptions`], for callers that assemble
/// options from flags and configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParseSettings {
    pub trusted: Option<bool>,
    pub translit_anchors: bool,
    pub export: bool,
    pub max_depth: usize,
    pub allowed_schemes: Vec<String>,
}

impl Default for ParseSettings {
    fn default() -> Self {
        Self {
            trusted: None,
            translit_anchors: false,
            export: false,
            max_depth: DEFAULT_MAX_DEPTH,
            allowed_schemes: SchemeAllowList::DEFAULT_SCHEMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ParseSettings {
    pub fn into_options(self) -> Result<ParseOptions, FatalError> {
        let trusted = self.trusted.ok_or(FatalError::MissingTrustMode)?;
        Ok(ParseOptions::new(trusted)
            .with_translit_anchors(self.translit_anchors)
            .with_export(self.export)
            .with_max_depth(self.max_depth)
            .with_url_policy(SchemeAllowList::new(self.allowed_schemes)))
    }
}
