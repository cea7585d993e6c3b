//! Presentation layer over raw type trees.
//!
//! [`TypeInfoResolver`] turns raw [`TypeInfo`](texplorer_common::TypeInfo)
//! nodes into [`LocalizedTypeInfo`](texplorer_common::LocalizedTypeInfo)
//! nodes one level at a time, resolving `reference` nodes either through the
//! tree's own id scope or through an injected [`TypeInfoRetriever`].

pub mod display;
mod error;
pub mod messages;
mod resolver;
mod retriever;

pub use display::{description, label};
pub use error::LocalizeError;
pub use resolver::TypeInfoResolver;
pub use retriever::TypeInfoRetriever;
