/// Header line: `#`-run, a space, the title, optional trailing `[#anchor]`.
pub struct Header;

impl Header {
    pub const MARK: char = '#';
    /// The lexer accepts deeper runs so that the parser can report them
    /// instead of leaving them as literal text.
    pub const MAX_LEXED_LEVEL: usize = 6;
    pub const MAX_LEVEL: usize = 3;
    pub const TAG: &'static str = "div";
}
