use texplorer_common::{ErrorDetails, LocalizedId, SourceFileLocation, TypeInfoId};
use thiserror::Error;

/// Failure to localize one node. Converted into an error-variant node at the
/// root and at every child batch, so it never aborts sibling subtrees.
#[derive(Debug, Error)]
pub enum LocalizeError {
    #[error("encountered invalid type reference {id}")]
    InvalidReference { id: TypeInfoId },
    #[error("no retriever is available to resolve {location}")]
    MissingRetriever { location: SourceFileLocation },
    #[error("no type found at {location}")]
    UnresolvedLocation { location: SourceFileLocation },
    #[error("reference chain exceeded {hops} hops")]
    ReferenceChainTooLong { hops: u32 },
    #[error("array nodes must be unwrapped before building children")]
    UnexpectedArray,
    #[error("node {handle:?} was not produced by this resolver")]
    UnknownNode { handle: LocalizedId },
    #[error("retriever failed: {0}")]
    Retriever(#[source] anyhow::Error),
}

impl LocalizeError {
    pub fn name(&self) -> &'static str {
        match self {
            LocalizeError::InvalidReference { .. } => "InvalidReference",
            LocalizeError::MissingRetriever { .. } => "MissingRetriever",
            LocalizeError::UnresolvedLocation { .. } => "UnresolvedLocation",
            LocalizeError::ReferenceChainTooLong { .. } => "ReferenceChainTooLong",
            LocalizeError::UnexpectedArray => "UnexpectedArray",
            LocalizeError::UnknownNode { .. } => "UnknownNode",
            LocalizeError::Retriever(_) => "RetrieverError",
        }
    }

    /// Name, message and cause chain in the shape the tree view displays.
    pub fn details(&self) -> ErrorDetails {
        let mut causes = Vec::new();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }
        ErrorDetails {
            name: self.name().to_string(),
            message: self.to_string(),
            stack: (!causes.is_empty()).then(|| causes.join("\n")),
        }
    }
}
