use std::sync::OnceLock;

use regex::Regex;

use crate::nodes::Attrs;

/// Parses a whitespace separated attribute list: `name="v"`, `name='v'`,
/// `name=v` or a bare `name` (empty value). Names are lowercased.
///
/// Returns `None` when any part of the input is not an attribute, so the
/// calling probe fails as a whole instead of silently dropping text.
pub fn parse_attrs(s: &str) -> Option<Attrs> {
    static ATTR_REGEX: OnceLock<Regex> = OnceLock::new();
    let attr_regex = ATTR_REGEX.get_or_init(|| {
        Regex::new(r#"([A-Za-z_:][A-Za-z0-9_:.-]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
            .expect("Invalid attribute regex")
    });

    let mut attrs = Attrs::new();
    let mut last = 0;
    for caps in attr_regex.captures_iter(s) {
        let whole = caps.get(0)?;
        let gap = &s[last..whole.start()];
        if !gap.trim().is_empty() || (last != 0 && gap.is_empty()) {
            return None;
        }
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map_or("", |m| m.as_str());
        attrs.insert(caps[1].to_ascii_lowercase(), value.to_string());
        last = whole.end();
    }

    if !s[last..].trim().is_empty() {
        return None;
    }
    Some(attrs)
}
