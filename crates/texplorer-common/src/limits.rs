//! Centralized limits and defaults.

/// Default depth bound for type tree generation and type merging.
///
/// ```typescript
/// // Without a bound this expands forever: every level mints a new
/// // instantiation rather than revisiting an old one.
/// type Nest<T> = { inner: Nest<T[]> };
/// ```
pub const DEFAULT_MAX_DEPTH: u32 = 6;

/// Maximum number of reference hops followed while resolving one node.
///
/// A reference resolved through a `TypeInfoMap` always lands on a concrete
/// node, but a remote retriever may answer with yet another reference.
pub const MAX_REFERENCE_HOPS: u32 = 64;

/// Name prefix the binder gives to anonymous symbols (`__type`, `__object`, ...).
pub const ANONYMOUS_SYMBOL_PREFIX: &str = "__";
