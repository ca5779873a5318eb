/// Link: `[title](href)`. An empty href (`[http://x]()`) means the title
/// is also the target.
pub struct Link;

impl Link {
    pub const OPEN: char = '[';
    pub const TITLE_CLOSE: char = ']';
    pub const HREF_OPEN: char = '(';
    pub const HREF_CLOSE: char = ')';
}
