//! # Nodes
//!
//! The parser output: a closed set of node kinds composed into a tree.
//! Parents own their children; there are no back-references. Position
//! lookups use index paths from the root sequence (see [`trust`]).
//!
//! Every node converts to a structural record
//! `{type: <variant>, trusted?: bool, ...payload}` for external renderers.

pub mod trust;

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::parsing::FatalError;

pub use trust::{NodeRef, resolve_trust, walk};

/// Tag attributes, ordered by name.
pub type Attrs = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum NodeKind {
    TextNode {
        text: String,
    },
    TagNode {
        tag: String,
        text: String,
        attrs: Attrs,
    },
    /// Content is emitted escaped and never re-parsed.
    EscapedTag {
        tag: String,
        text: String,
        #[serde(skip_serializing_if = "Attrs::is_empty")]
        attrs: Attrs,
    },
    CompositeTag {
        tag: String,
        children: Vec<Node>,
        attrs: Attrs,
    },
    LinkTag {
        children: Vec<Node>,
        href: String,
    },
    HeaderTag {
        level: usize,
        anchor: String,
        title: String,
    },
    ErrorTag {
        tag: String,
        message: String,
    },
    CommentNode {
        text: String,
    },
    VerbatimText {
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    #[serde(flatten)]
    pub kind: NodeKind,
    /// Explicit trust override; `None` inherits from the parent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trusted: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StructureOptions {
    /// Leave `trusted` out of every record.
    pub skip_trusted: bool,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            trusted: None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(NodeKind::TextNode { text: text.into() })
    }

    pub fn tag(tag: impl Into<String>, text: impl Into<String>, attrs: Attrs) -> Self {
        Self::new(NodeKind::TagNode {
            tag: tag.into(),
            text: text.into(),
            attrs,
        })
    }

    pub fn escaped(tag: impl Into<String>, text: impl Into<String>, attrs: Attrs) -> Self {
        Self::new(NodeKind::EscapedTag {
            tag: tag.into(),
            text: text.into(),
            attrs,
        })
    }

    pub fn composite(tag: impl Into<String>, children: Vec<Node>, attrs: Attrs) -> Self {
        Self::new(NodeKind::CompositeTag {
            tag: tag.into(),
            children,
            attrs,
        })
    }

    pub fn link(children: Vec<Node>, href: impl Into<String>) -> Self {
        Self::new(NodeKind::LinkTag {
            children,
            href: href.into(),
        })
    }

    pub fn header(level: usize, anchor: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(NodeKind::HeaderTag {
            level,
            anchor: anchor.into(),
            title: title.into(),
        })
    }

    /// Error markers are system-generated, so they are trusted regardless
    /// of where they end up in the tree.
    pub fn error(tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::ErrorTag {
                tag: tag.into(),
                message: message.into(),
            },
            trusted: Some(true),
        }
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Self::new(NodeKind::CommentNode { text: text.into() })
    }

    pub fn verbatim(text: impl Into<String>) -> Self {
        Self::new(NodeKind::VerbatimText { text: text.into() })
    }

    pub fn with_trust(mut self, trusted: bool) -> Self {
        self.trusted = Some(trusted);
        self
    }

    /// Variant name as used in the structural record.
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            NodeKind::TextNode { .. } => "TextNode",
            NodeKind::TagNode { .. } => "TagNode",
            NodeKind::EscapedTag { .. } => "EscapedTag",
            NodeKind::CompositeTag { .. } => "CompositeTag",
            NodeKind::LinkTag { .. } => "LinkTag",
            NodeKind::HeaderTag { .. } => "HeaderTag",
            NodeKind::ErrorTag { .. } => "ErrorTag",
            NodeKind::CommentNode { .. } => "CommentNode",
            NodeKind::VerbatimText { .. } => "VerbatimText",
        }
    }

    pub fn children(&self) -> &[Node] {
        match &self.kind {
            NodeKind::CompositeTag { children, .. } | NodeKind::LinkTag { children, .. } => {
                children
            }
            _ => &[],
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, NodeKind::ErrorTag { .. })
    }

    pub fn to_structure(&self, options: StructureOptions) -> Value {
        let mut value = serde_json::to_value(self).unwrap_or_default();
        if options.skip_trusted {
            strip_trusted(&mut value);
        }
        value
    }

    /// Text a reader would see, for search indexing. Comments and error
    /// messages are left out.
    pub fn text_content(&self, out: &mut String) {
        match &self.kind {
            NodeKind::TextNode { text }
            | NodeKind::TagNode { text, .. }
            | NodeKind::EscapedTag { text, .. }
            | NodeKind::VerbatimText { text } => out.push_str(text),
            NodeKind::HeaderTag { title, .. } => out.push_str(title),
            NodeKind::CompositeTag { children, .. } | NodeKind::LinkTag { children, .. } => {
                for child in children {
                    child.text_content(out);
                }
            }
            NodeKind::ErrorTag { .. } | NodeKind::CommentNode { .. } => {}
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

fn strip_trusted(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.remove("trusted");
            map.values_mut().for_each(strip_trusted);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_trusted),
        _ => {}
    }
}

/// A top-level parse result with the trust mode it was parsed under.
///
/// Parsing itself yields a sibling sequence; this is the root that makes
/// trust resolution total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub trusted: bool,
    pub children: Vec<Node>,
}

impl Document {
    /// Effective trust of the node at `path`.
    pub fn is_trusted(&self, path: &[usize]) -> Result<bool, FatalError> {
        resolve_trust(&self.children, path, Some(self.trusted))
    }

    pub fn walk<'n>(&'n self, visit: impl FnMut(NodeRef<'n, '_>)) -> Result<(), FatalError> {
        walk(&self.children, Some(self.trusted), visit)
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            node.text_content(&mut out);
        }
        out
    }

    pub fn to_structure(&self, options: StructureOptions) -> Value {
        let children = self
            .children
            .iter()
            .map(|n| n.to_structure(options))
            .collect::<Vec<_>>();
        let mut map = serde_json::Map::new();
        map.insert("type".into(), Value::from("Document"));
        if !options.skip_trusted {
            map.insert("trusted".into(), Value::from(self.trusted));
        }
        map.insert("children".into(), Value::from(children));
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn structure_has_type_and_payload() {
        let node = Node::composite("strong", vec![Node::text("hi")], Attrs::new());
        assert_eq!(
            node.to_structure(StructureOptions::default()),
            json!({
                "type": "CompositeTag",
                "tag": "strong",
                "attrs": {},
                "children": [{"type": "TextNode", "text": "hi"}],
            })
        );
    }

    #[test]
    fn error_tag_is_trusted_and_can_hide_it() {
        let node = Node::error("div", "broken");
        assert_eq!(node.trusted, Some(true));
        assert_eq!(
            node.to_structure(StructureOptions::default())["trusted"],
            json!(true)
        );

        let wrapped = Node::link(vec![node], "/x").with_trust(false);
        let skipped = wrapped.to_structure(StructureOptions { skip_trusted: true });
        assert_eq!(
            skipped,
            json!({
                "type": "LinkTag",
                "href": "/x",
                "children": [{"type": "ErrorTag", "tag": "div", "message": "broken"}],
            })
        );
    }

    #[test]
    fn escaped_tag_omits_empty_attrs() {
        let node = Node::escaped("pre", "<b>", Attrs::new());
        assert_eq!(
            node.to_structure(StructureOptions::default()),
            json!({"type": "EscapedTag", "tag": "pre", "text": "<b>"})
        );
    }

    #[test]
    fn display_is_json() {
        assert_eq!(
            Node::comment("x").to_string(),
            r#"{"type":"CommentNode","text":"x"}"#
        );
    }

    #[test]
    fn type_names_match_structure() {
        let nodes = [
            Node::text("a"),
            Node::tag("cut", "", Attrs::new()),
            Node::header(1, "a", "A"),
            Node::verbatim("v"),
        ];
        for node in nodes {
            assert_eq!(
                node.to_structure(StructureOptions::default())["type"],
                json!(node.type_name())
            );
        }
    }

    #[test]
    fn text_content_skips_comments_and_errors() {
        let doc = Document {
            trusted: true,
            children: vec![
                Node::text("a"),
                Node::comment("hidden"),
                Node::composite("em", vec![Node::text("b")], Attrs::new()),
                Node::error("span", "oops"),
                Node::link(vec![Node::text("c")], "/c"),
            ],
        };
        assert_eq!(doc.text_content(), "abc");
    }

    #[test]
    fn document_structure_carries_root_trust() {
        let doc = Document {
            trusted: false,
            children: vec![Node::text("x")],
        };
        assert_eq!(
            doc.to_structure(StructureOptions::default()),
            json!({
                "type": "Document",
                "trusted": false,
                "children": [{"type": "TextNode", "text": "x"}],
            })
        );
    }
}
