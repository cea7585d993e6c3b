//! Type tree generation.
//!
//! - [`generate_type_tree`] walks the checker's type graph into a plain
//!   [`TypeInfo`](texplorer_common::TypeInfo) tree, breaking cycles with
//!   `reference` nodes and bounding depth with `max_depth` sentinels.
//! - [`recursively_expand_type`] merges intersections property by property
//!   into a new synthesized type, for display as a flattened type string.

pub mod merge;
pub mod walker;

pub use merge::{expand_type_to_string, recursively_expand_type};
pub use walker::{TreeContext, TreeRoot, generate_type_tree, type_of_symbol};
