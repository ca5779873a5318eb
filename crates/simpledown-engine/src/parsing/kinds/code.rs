/// Inline code span: `` `code` `` or ``` ``class`code` ```.
///
/// Code spans are raw zones - their body is never re-parsed.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: char = '`';
    /// Opens the classed form, followed by the class name and a single tick.
    pub const CLASSED_OPEN: &'static str = "``";
    pub const TAG: &'static str = "code";

    pub fn is_class_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_' || c == '-'
    }
}

/// Fenced source block: ```` ```lang ```` newline, body, ```` ``` ````.
pub struct SourceFence;

impl SourceFence {
    pub const FENCE: &'static str = "```";
    pub const CLOSE: &'static str = "\n```";
    pub const TAG: &'static str = "pre";
    pub const LANG_ATTR: &'static str = "data-lang";

    pub fn is_lang_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-')
    }
}
