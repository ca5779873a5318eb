//! Text helpers used while building nodes: anchor slugs and title
//! typography.

pub mod anchor;
pub mod typography;

pub use anchor::{AnchorMaker, Slugger};
pub use typography::format_title;
