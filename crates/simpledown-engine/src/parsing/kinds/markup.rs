pub struct Comment;

impl Comment {
    pub const OPEN: &'static str = "<!--";
    pub const CLOSE: &'static str = "-->";
}

/// Raw passthrough block, trusted input only.
pub struct Verbatim;

impl Verbatim {
    pub const OPEN: &'static str = "<verbatim>";
    pub const CLOSE: &'static str = "</verbatim>";
}

/// Inline image: `<img src="..." alt="...">`, optionally self-closed with `/>`.
pub struct Img;

impl Img {
    pub const OPEN: &'static str = "<img";
    pub const CLOSE: char = '>';
    pub const SELF_CLOSE: char = '/';
}
