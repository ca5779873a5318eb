//! # Construct Kinds
//!
//! Construct-specific types that own their syntax delimiters.
//!
//! ## Types
//!
//! - **`Link`**: `[title](href)`, `[title]()`
//! - **`Bold`**, **`Italic`**, **`Strike`**: `**x**`, `*x*`, `~~x~~`
//! - **`CodeSpan`**, **`SourceFence`**: `` `x` ``, ``` ``class`x` ```, fenced source
//! - **`Comment`**, **`Verbatim`**, **`Img`**: angle-bracket constructs
//! - **`Header`**: `## Title [#anchor]` at line start
//! - **`Bbtag`**: bracketed directives, self-closing or need-close
//!
//! ## Design Principle
//!
//! All delimiter constants live here, not scattered in lexer code.
//! The lexer calls these constants; it never hardcodes `**` or `<!--`.

pub mod bbtag;
pub mod code;
pub mod emphasis;
pub mod header;
pub mod link;
pub mod markup;

pub use bbtag::Bbtag;
pub use code::{CodeSpan, SourceFence};
pub use emphasis::{Bold, Italic, Strike};
pub use header::Header;
pub use link::Link;
pub use markup::{Comment, Img, Verbatim};
