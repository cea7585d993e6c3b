//! TypeScript-shaped type graph.
//!
//! The tree walker and the merger need more than a public "type of this
//! expression" API: they read raw flag bitsets, walk object members,
//! signatures and index infos, and synthesize brand new types. This crate
//! models exactly that surface:
//!
//! - [`TypeDatabase`]: read-only queries over types and symbols
//! - [`TypeFactory`]: the low-level construction path (new object, union and
//!   intersection types, transient property symbols, alias-free clones)
//! - [`TypeStore`]: an arena implementing both, with builder helpers
//! - [`type_to_string`]: TypeScript-syntax rendering
//! - JSON program snapshots so a separate process can answer queries

mod db;
pub mod printer;
pub mod snapshot;
mod store;
pub mod types;

pub use db::{SignatureKind, TypeDatabase, TypeFactory};
pub use printer::{TypePrinter, type_to_string};
pub use snapshot::SnapshotError;
pub use store::TypeStore;
pub use texplorer_common::SymbolFlags;
pub use types::{
    CheckFlags, Declaration, DeclarationKind, IndexInfo, LiteralValue, ObjectFlags,
    ObjectMembers, ObjectType, Signature, Symbol, SymbolId, TupleShape, Type, TypeData,
    TypeFlags, TypeId,
};
