//! # Link Target Safety
//!
//! Untrusted input may only link to targets a [`UrlPolicy`] accepts. The
//! parser asks the policy when it builds a link, an image or an iframe;
//! trusted input skips the check.

use std::sync::OnceLock;

use regex::Regex;
use url::Url;

use crate::parsing::ParseError;

pub trait UrlPolicy {
    fn ensure_safe(&self, url: &str) -> Result<(), ParseError>;
}

/// Accepts relative targets and absolute ones whose scheme is listed and
/// which parse as URLs.
#[derive(Debug, Clone)]
pub struct SchemeAllowList {
    schemes: Vec<String>,
}

impl SchemeAllowList {
    pub const DEFAULT_SCHEMES: [&'static str; 4] = ["http", "https", "ftp", "mailto"];

    pub fn new(schemes: Vec<String>) -> Self {
        Self { schemes }
    }

    fn allows(&self, scheme: &str) -> bool {
        self.schemes.iter().any(|s| s.eq_ignore_ascii_case(scheme))
    }
}

impl Default for SchemeAllowList {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SCHEMES.iter().map(|s| s.to_string()).collect())
    }
}

impl UrlPolicy for SchemeAllowList {
    fn ensure_safe(&self, url: &str) -> Result<(), ParseError> {
        // Browsers ignore control chars and spaces inside a scheme, so
        // `java\tscript:` must be read as `javascript:`.
        let compact: String = url.chars().filter(|c| *c > ' ').collect();

        let Some(scheme) = scheme_of(&compact) else {
            return Ok(());
        };
        if !self.allows(scheme) {
            return Err(ParseError::new(
                "span",
                format!("Protocol {scheme} is not allowed"),
            ));
        }
        Url::parse(&compact).map_err(|_| ParseError::new("span", format!("Malformed URL {url}")))?;
        Ok(())
    }
}

fn scheme_of(url: &str) -> Option<&str> {
    static SCHEME_REGEX: OnceLock<Regex> = OnceLock::new();
    let scheme_regex = SCHEME_REGEX
        .get_or_init(|| Regex::new(r"^([A-Za-z][A-Za-z0-9+.-]*):").expect("Invalid scheme regex"));
    scheme_regex
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
