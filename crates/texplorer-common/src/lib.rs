//! Common types for the texplorer type explorer.
//!
//! This crate provides the serializable data model shared by every other
//! texplorer crate:
//! - Source addressing (`Position`, `Range`, `SourceFileLocation`)
//! - The raw type tree (`TypeInfo`, `TypeInfoKind`, `SymbolInfo`, ...)
//! - Per-tree reference scopes (`TypeInfoMap`)
//! - The presentation-oriented tree (`LocalizedTypeInfo`, `TypePurpose`)
//! - Tree generation configuration and limits

// Position/Range types for line/character source locations
pub mod position;
pub use position::{Position, Range, SourceFileLocation};

// Symbol flag bitset shared between the checker and the tree model
pub mod flags;
pub use flags::SymbolFlags;

// Centralized limits and defaults
pub mod limits;

// Tree generation configuration
pub mod config;
pub use config::TreeConfig;

// Raw type tree
pub mod type_info;
pub use type_info::{
    ClassLikeInfo, DeclarationInfo, EnumValue, IndexInfo, PrimitiveKind, PseudoBigInt, SignatureInfo,
    SymbolInfo, TypeInfo, TypeInfoId, TypeInfoKind, TypeInfoRef, TypeKind,
};

// id -> node scopes for reference resolution
pub mod type_info_map;
pub use type_info_map::TypeInfoMap;

// Localized (presentation) tree
pub mod localized;
pub use localized::{
    ChildOptions, ErrorDetails, LocalizedError, LocalizedId, LocalizedSymbolInfo,
    LocalizedTypeInfo, LocalizedTypeInfoOrError, TypeInfoChild, TypePurpose,
};
