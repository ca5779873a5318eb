//! # Metadata Registry
//!
//! Document-wide state collected during one top-level parse call and shared
//! by every nested parser it spawns: headers, declared anchors, requested
//! libraries and head fragments.
//!
//! The registry is only ever appended to. Callers may pass the same
//! registry to several parse calls on purpose (e.g. to build one table of
//! contents for a set of documents); the anchor mode it was first used with
//! must then stay the same.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::parsing::{FatalError, ParseError, kinds::Header};
use crate::text::AnchorMaker;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderEntry {
    pub level: usize,
    /// Rendered title.
    pub title: String,
    pub anchor: String,
}

/// A header as seen by the registry, before it gets an anchor.
#[derive(Debug, Clone, Copy)]
pub struct HeaderRequest<'a> {
    pub level: usize,
    /// Raw title text, used to derive the anchor.
    pub raw_title: &'a str,
    /// Rendered title, stored in the header list.
    pub title: &'a str,
    /// Anchor given explicitly with `[#id]`.
    pub explicit_anchor: Option<&'a str>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Metadata {
    /// Explicitly declared anchors.
    pub refs: BTreeSet<String>,
    pub libs: BTreeSet<String>,
    pub head: Vec<String>,
    pub headers: Vec<HeaderEntry>,
    /// Base anchor -> last disambiguation count used.
    #[serde(skip)]
    anchor_counts: HashMap<String, usize>,
    #[serde(skip)]
    translit_anchors: Option<bool>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ties the registry to an anchor mode on first use and rejects reuse
    /// under a different one. Anchors are always derived with the mode the
    /// caller passes to [`Metadata::register_header`]; the binding only
    /// guards against mixing modes in one registry.
    pub fn bind(&mut self, translit_anchors: bool) -> Result<(), FatalError> {
        match self.translit_anchors {
            None => {
                self.translit_anchors = Some(translit_anchors);
                Ok(())
            }
            Some(expected) if expected == translit_anchors => Ok(()),
            Some(expected) => Err(FatalError::IncompatibleRegistry {
                expected,
                actual: translit_anchors,
            }),
        }
    }

    /// True if `anchor` was declared or handed out before.
    pub fn has_anchor(&self, anchor: &str) -> bool {
        self.refs.contains(anchor) || self.anchor_counts.contains_key(anchor)
    }

    /// Validates a header against the ones already registered, allocates
    /// its anchor and appends it. Nothing is recorded on failure.
    pub fn register_header(
        &mut self,
        header: HeaderRequest<'_>,
        anchors: &dyn AnchorMaker,
        translit_anchors: bool,
    ) -> Result<String, ParseError> {
        let level = header.level;
        if level > Header::MAX_LEVEL {
            return Err(ParseError::new(
                Header::TAG,
                format!(
                    "Header \"{}\" is nested too deep (more than {} levels)",
                    header.raw_title,
                    Header::MAX_LEVEL
                ),
            ));
        }

        // Embedded documents may start at a sub-level, so the first header
        // is not checked.
        if let Some(prev) = self.headers.last()
            && level > prev.level + 1
        {
            return Err(ParseError::new(
                Header::TAG,
                format!(
                    "Incorrect header nesting (level {level} after {})",
                    prev.level
                ),
            ));
        }

        let anchor = match header.explicit_anchor {
            Some(id) => {
                self.declare_anchor(id)?;
                id.to_string()
            }
            None => {
                self.allocate_anchor(anchors.make_anchor(header.raw_title, translit_anchors))
            }
        };

        self.headers.push(HeaderEntry {
            level,
            title: header.title.to_string(),
            anchor: anchor.clone(),
        });
        Ok(anchor)
    }

    /// Records an explicit anchor. Explicit anchors are never renamed, so a
    /// collision is an error.
    pub fn declare_anchor(&mut self, id: &str) -> Result<(), ParseError> {
        if self.has_anchor(id) {
            return Err(ParseError::new(
                Header::TAG,
                format!("[#{id}] already exists"),
            ));
        }
        self.refs.insert(id.to_string());
        self.anchor_counts.insert(id.to_string(), 1);
        Ok(())
    }

    /// Hands out `base`, or `base-<n>` with the next free count if it is
    /// taken.
    fn allocate_anchor(&mut self, base: String) -> String {
        if !self.has_anchor(&base) {
            self.anchor_counts.insert(base.clone(), 1);
            return base;
        }

        let mut count = self.anchor_counts.get(&base).copied().unwrap_or(1);
        let anchor = loop {
            count += 1;
            let candidate = format!("{base}-{count}");
            if !self.has_anchor(&candidate) {
                break candidate;
            }
        };
        self.anchor_counts.insert(base, count);
        self.anchor_counts.insert(anchor.clone(), 1);
        anchor
    }

    pub fn add_lib(&mut self, name: &str) {
        self.libs.insert(name.to_string());
    }

    pub fn add_head(&mut self, fragment: &str) {
        self.head.push(fragment.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::Slugger;
    use pretty_assertions::assert_eq;

    fn header<'a>(level: usize, title: &'a str, anchor: Option<&'a str>) -> HeaderRequest<'a> {
        HeaderRequest {
            level,
            raw_title: title,
            title,
            explicit_anchor: anchor,
        }
    }

    fn levels(meta: &Metadata) -> Vec<usize> {
        meta.headers.iter().map(|h| h.level).collect()
    }

    #[test]
    fn first_header_may_start_below_top() {
        let mut meta = Metadata::new();
        assert!(meta.register_header(header(3, "Deep", None), &Slugger, false).is_ok());
        assert!(meta.register_header(header(1, "Top", None), &Slugger, false).is_ok());
        assert_eq!(levels(&meta), vec![3, 1]);
    }

    #[test]
    fn level_may_not_skip() {
        let mut meta = Metadata::new();
        meta.register_header(header(1, "A", None), &Slugger, false).unwrap();
        let err = meta
            .register_header(header(3, "C", None), &Slugger, false)
            .unwrap_err();
        assert_eq!(err.message, "Incorrect header nesting (level 3 after 1)");
        assert_eq!(err.tag, "div");
        assert_eq!(levels(&meta), vec![1]);
    }

    #[test]
    fn level_above_three_rejected() {
        let mut meta = Metadata::new();
        let err = meta
            .register_header(header(4, "Deep", None), &Slugger, false)
            .unwrap_err();
        assert_eq!(
            err.message,
            "Header \"Deep\" is nested too deep (more than 3 levels)"
        );
        assert!(meta.headers.is_empty());
    }

    #[test]
    fn derived_anchors_are_disambiguated_in_order() {
        let mut meta = Metadata::new();
        let anchors: Vec<String> = ["Intro", "Intro", "Intro"]
            .into_iter()
            .map(|t| meta.register_header(header(1, t, None), &Slugger, false).unwrap())
            .collect();
        assert_eq!(anchors, vec!["intro", "intro-2", "intro-3"]);
    }

    #[test]
    fn suffix_skips_anchors_already_taken() {
        let mut meta = Metadata::new();
        meta.register_header(header(1, "Intro 2", None), &Slugger, false)
            .unwrap();
        meta.register_header(header(1, "Intro", None), &Slugger, false).unwrap();
        let third = meta.register_header(header(1, "Intro", None), &Slugger, false).unwrap();
        assert_eq!(third, "intro-3");
    }

    #[test]
    fn explicit_anchor_is_kept_and_referenced() {
        let mut meta = Metadata::new();
        let anchor = meta
            .register_header(header(1, "Whatever", Some("custom")), &Slugger, false)
            .unwrap();
        assert_eq!(anchor, "custom");
        assert!(meta.refs.contains("custom"));
    }

    #[test]
    fn explicit_anchor_collision_is_an_error() {
        let mut meta = Metadata::new();
        meta.register_header(header(1, "A", Some("x")), &Slugger, false)
            .unwrap();
        let err = meta
            .register_header(header(2, "B", Some("x")), &Slugger, false)
            .unwrap_err();
        assert_eq!(err.message, "[#x] already exists");
        assert_eq!(meta.headers.len(), 1);
    }

    #[test]
    fn explicit_anchor_may_not_reuse_derived_one() {
        let mut meta = Metadata::new();
        meta.register_header(header(1, "Setup", None), &Slugger, false).unwrap();
        assert!(
            meta.register_header(header(1, "Other", Some("setup")), &Slugger, false)
                .is_err()
        );
    }

    #[test]
    fn derived_anchor_steps_around_explicit_one() {
        let mut meta = Metadata::new();
        meta.declare_anchor("setup").unwrap();
        let anchor = meta.register_header(header(1, "Setup", None), &Slugger, false).unwrap();
        assert_eq!(anchor, "setup-2");
        assert_eq!(meta.refs.len(), 1);
    }

    #[test]
    fn derived_anchor_follows_requested_mode() {
        let mut meta = Metadata::new();
        let anchor = meta
            .register_header(header(1, "Привет мир", None), &Slugger, true)
            .unwrap();
        assert_eq!(anchor, "privet-mir");
    }

    #[test]
    fn binding_rejects_other_anchor_mode() {
        let mut meta = Metadata::new();
        assert_eq!(meta.bind(true), Ok(()));
        assert_eq!(meta.bind(true), Ok(()));
        assert_eq!(
            meta.bind(false),
            Err(FatalError::IncompatibleRegistry {
                expected: true,
                actual: false,
            })
        );
    }
}
