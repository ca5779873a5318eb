use std::borrow::Cow;

/// Renders a header title: no markup, only typography. The result is
/// HTML-escaped and safe to emit as is.
pub fn format_title(title: &str) -> String {
    let escaped: Cow<'_, str> = html_escape::encode_text(title.trim());
    escaped.replace(" - ", " \u{2014} ").replace("...", "\u{2026}")
}
