/// Bracketed directive tags.
///
/// Self-closing: `[name attrs]`. Need-close: `[name attrs]body[/name]`.
/// `[#id]` declares an anchor. `source` and `img` never appear in brackets;
/// the fenced-source and `<img>` probes produce them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bbtag {
    Warn,
    Smart,
    Ponder,
    Summary,
    Quote,
    Compare,
    Online,
    Offline,
    Head,
    Libs,
    Pre,
    Iframe,
    Cut,
    Anchor,
    Source,
    Img,
}

impl Bbtag {
    pub const OPEN: char = '[';
    pub const CLOSE: char = ']';
    pub const END_OPEN: &'static str = "[/";
    pub const ANCHOR_MARK: char = '#';

    const NEED_CLOSE: [Bbtag; 11] = [
        Bbtag::Warn,
        Bbtag::Smart,
        Bbtag::Ponder,
        Bbtag::Summary,
        Bbtag::Quote,
        Bbtag::Compare,
        Bbtag::Online,
        Bbtag::Offline,
        Bbtag::Head,
        Bbtag::Libs,
        Bbtag::Pre,
    ];

    const SELF_CLOSE: [Bbtag; 2] = [Bbtag::Iframe, Bbtag::Cut];

    pub fn name(self) -> &'static str {
        match self {
            Bbtag::Warn => "warn",
            Bbtag::Smart => "smart",
            Bbtag::Ponder => "ponder",
            Bbtag::Summary => "summary",
            Bbtag::Quote => "quote",
            Bbtag::Compare => "compare",
            Bbtag::Online => "online",
            Bbtag::Offline => "offline",
            Bbtag::Head => "head",
            Bbtag::Libs => "libs",
            Bbtag::Pre => "pre",
            Bbtag::Iframe => "iframe",
            Bbtag::Cut => "cut",
            Bbtag::Anchor => "#",
            Bbtag::Source => "source",
            Bbtag::Img => "img",
        }
    }

    /// Looks up a need-close directive by its bracket name.
    pub fn need_close(name: &str) -> Option<Bbtag> {
        Self::NEED_CLOSE.into_iter().find(|t| t.name() == name)
    }

    /// Looks up a self-closing directive by its bracket name.
    pub fn self_close(name: &str) -> Option<Bbtag> {
        Self::SELF_CLOSE.into_iter().find(|t| t.name() == name)
    }

    /// Attributes accepted from untrusted input. Anything else is rejected
    /// when the tag is built.
    pub fn untrusted_attrs(self) -> &'static [&'static str] {
        match self {
            Bbtag::Iframe => &["src", "height", "width", "title"],
            Bbtag::Img => &["src", "alt", "width", "height", "title"],
            Bbtag::Warn
            | Bbtag::Smart
            | Bbtag::Ponder
            | Bbtag::Summary
            | Bbtag::Quote
            | Bbtag::Compare => &["header"],
            Bbtag::Source => &["lang"],
            Bbtag::Anchor => &["name"],
            Bbtag::Online
            | Bbtag::Offline
            | Bbtag::Head
            | Bbtag::Libs
            | Bbtag::Pre
            | Bbtag::Cut => &[],
        }
    }

    /// Attributes holding a URL that must pass the url policy.
    pub fn is_url_attr(name: &str) -> bool {
        matches!(name, "src" | "href")
    }

    pub fn is_name_char(c: char) -> bool {
        c.is_ascii_lowercase()
    }

    pub fn is_anchor_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_' || c == '-'
    }
}
