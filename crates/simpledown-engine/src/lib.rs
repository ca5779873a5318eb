pub mod metadata;
pub mod nodes;
pub mod parsing;
pub mod safety;
pub mod text;

// Re-export key types for easier usage
pub use metadata::{HeaderEntry, Metadata};
pub use nodes::{Attrs, Document, Node, NodeKind, NodeRef, StructureOptions, resolve_trust, walk};
pub use parsing::{FatalError, ParseError, ParseOptions, ParseSettings, parse, parse_document};
pub use safety::{SchemeAllowList, UrlPolicy};
pub use text::{AnchorMaker, Slugger};
