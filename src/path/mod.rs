mod expander;
mod resolver;

pub use expander::PathExpander;
pub use resolver::{normalize, EntryKind, PathResolver};
