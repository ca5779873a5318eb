//! Directive handlers: everything the lexer reports as a [`Bbtag`] token.

use crate::nodes::{Attrs, Node};

use super::{
    ParseError,
    kinds::{Bbtag, SourceFence},
    lexer::Fragment,
    parser::{BodyParser, HandlerResult},
};

const BLOCK_TAG: &str = "div";
const INLINE_TAG: &str = "span";

impl<'a> BodyParser<'a, '_> {
    pub(super) fn parse_bbtag(
        &mut self,
        tag: Bbtag,
        attrs: Attrs,
        body: Fragment<'a>,
    ) -> HandlerResult {
        let attrs = self.checked_attrs(tag, attrs)?;

        match tag {
            Bbtag::Warn | Bbtag::Smart | Bbtag::Ponder | Bbtag::Compare => {
                let class = format!("important important_{}", tag.name());
                self.parse_block(body, BLOCK_TAG, class, attrs)
            }
            Bbtag::Summary => self.parse_block(body, BLOCK_TAG, "summary".into(), attrs),
            Bbtag::Quote => {
                let class = format!("important important_{}", tag.name());
                self.parse_block(body, "blockquote", class, attrs)
            }
            Bbtag::Online | Bbtag::Offline => {
                let keep = (tag == Bbtag::Offline) == self.options.export;
                if keep {
                    Ok(self.nested(body, true)?.parse()?)
                } else {
                    Ok(vec![])
                }
            }
            Bbtag::Head => {
                self.ensure_trusted(BLOCK_TAG, "Head fragment")?;
                self.metadata.add_head(body.text);
                Ok(vec![])
            }
            Bbtag::Libs => {
                body.text
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .for_each(|lib| self.metadata.add_lib(lib));
                Ok(vec![])
            }
            Bbtag::Pre => Ok(vec![Node::escaped("pre", body.text, Attrs::new())]),
            Bbtag::Source => {
                let attrs = attrs
                    .get("lang")
                    .map(|lang| Attrs::from([(SourceFence::LANG_ATTR.to_string(), lang.clone())]))
                    .unwrap_or_default();
                Ok(vec![Node::escaped(SourceFence::TAG, body.text, attrs)])
            }
            Bbtag::Iframe | Bbtag::Img => Ok(vec![Node::tag(tag.name(), "", attrs)]),
            Bbtag::Cut => Ok(vec![Node::tag("cut", "", Attrs::new())]),
            Bbtag::Anchor => {
                let id = attrs.get("name").cloned().unwrap_or_default();
                self.metadata.declare_anchor(&id)?;
                Ok(vec![Node::tag("a", "", Attrs::from([("name".to_string(), id)]))])
            }
        }
    }

    fn parse_block(
        &mut self,
        body: Fragment<'a>,
        tag: &str,
        class: String,
        mut attrs: Attrs,
    ) -> HandlerResult {
        let children = self.nested(body, true)?.parse()?;
        attrs.insert("class".to_string(), class);
        Ok(vec![Node::composite(tag, children, attrs)])
    }

    /// Trusted input keeps its attributes as written. Untrusted input is
    /// held to the tag's allow-list, and URL attributes must pass the
    /// url policy.
    fn checked_attrs(&self, tag: Bbtag, attrs: Attrs) -> Result<Attrs, ParseError> {
        if self.options.trusted {
            return Ok(attrs);
        }
        let error_tag = match tag {
            Bbtag::Img | Bbtag::Cut | Bbtag::Anchor => INLINE_TAG,
            _ => BLOCK_TAG,
        };

        for (name, value) in &attrs {
            if name.starts_with("on") || !tag.untrusted_attrs().contains(&name.as_str()) {
                return Err(ParseError::new(
                    error_tag,
                    format!("Attribute {name} is not allowed in {}", tag.name()),
                ));
            }
            if Bbtag::is_url_attr(name) {
                self.options.url_policy().ensure_safe(value)?;
            }
        }
        Ok(attrs)
    }
}
