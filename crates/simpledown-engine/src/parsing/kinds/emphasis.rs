/// Emphasis spans share one grammar: the body is non-empty, does not start
/// or end with whitespace and does not cross a blank line.
pub struct Bold;

impl Bold {
    pub const DELIM: &'static str = "**";
    pub const TAG: &'static str = "strong";
}

pub struct Italic;

impl Italic {
    pub const DELIM: &'static str = "*";
    pub const TAG: &'static str = "em";
}

pub struct Strike;

impl Strike {
    pub const DELIM: &'static str = "~~";
    pub const TAG: &'static str = "strike";
}

/// A body may not span a paragraph break.
pub const PARAGRAPH_BREAK: &str = "\n\n";
