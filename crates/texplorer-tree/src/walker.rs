//! Type graph walker.
//!
//! Produces a [`TypeInfo`] tree from a symbol or a type. Two pieces of
//! traversal state are threaded through every call in a [`TreeContext`]:
//!
//! - `depth` is call-stack shaped: incremented on entry to a node and
//!   decremented on exit. A node entered past `max_depth` becomes a
//!   `max_depth` sentinel.
//! - `seen` is shared by the whole walk. The first encounter of a type
//!   produces a full node; every later encounter, in any branch, produces a
//!   `reference` node with the same id. A reference therefore may point into
//!   a sibling branch, so consumers must resolve it through a
//!   [`TypeInfoMap`](texplorer_common::TypeInfoMap) built from the root.
//!
//! Unexpected type shapes become `primitive: unknown` rather than errors.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use std::sync::Arc;
use texplorer_checker::{
    CheckFlags, LiteralValue, ObjectFlags, Signature, SignatureKind, SymbolFlags, SymbolId,
    TypeData, TypeDatabase, TypeFlags, TypeId,
};
use texplorer_common::{
    ClassLikeInfo, DeclarationInfo, EnumValue, IndexInfo, PrimitiveKind, SignatureInfo,
    SourceFileLocation, SymbolInfo, TreeConfig, TypeInfo, TypeInfoId, TypeInfoKind, TypeInfoRef,
};
use tracing::{debug, trace};

/// What to generate a tree for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeRoot {
    /// Resolve the symbol's type with the symbol-to-type fallback chain.
    Symbol(SymbolId),
    Type(TypeId),
    /// A type reached through a known symbol (the symbol only contributes
    /// `symbolMeta`).
    SymbolWithType(SymbolId, TypeId),
}

/// Generate the raw type tree for `root`.
pub fn generate_type_tree(
    db: &dyn TypeDatabase,
    root: TreeRoot,
    config: &TreeConfig,
) -> TypeInfo {
    let (symbol, ty) = match root {
        TreeRoot::Symbol(symbol) => (Some(symbol), None),
        TreeRoot::Type(ty) => (None, Some(ty)),
        TreeRoot::SymbolWithType(symbol, ty) => (Some(symbol), Some(ty)),
    };
    debug!(?root, max_depth = config.max_depth, "generating type tree");
    let mut ctx = TreeContext::new(db, *config);
    let tree = ctx.walk(symbol, ty, WalkOptions::default());
    debug!(types = ctx.seen.len(), "type tree generated");
    Arc::unwrap_or_clone(tree)
}

/// Type of a symbol, trying in order: the type at its declaration, its
/// declared type, then its plain type. The first non-error answer wins.
pub fn type_of_symbol<D: TypeDatabase + ?Sized>(db: &D, symbol: SymbolId) -> TypeId {
    let at_location = db
        .symbol(symbol)
        .and_then(|sym| sym.primary_declaration())
        .map(|decl| db.get_type_of_symbol_at_location(symbol, decl));
    let candidates = [
        at_location,
        Some(db.get_declared_type_of_symbol(symbol)),
        Some(db.get_type_of_symbol(symbol)),
    ];
    candidates
        .into_iter()
        .flatten()
        .find(|&ty| !db.is_error_type(ty))
        .unwrap_or(TypeId::ERROR)
}

/// Per-node options passed down from the parent.
#[derive(Clone, Copy, Debug, Default)]
struct WalkOptions {
    /// Computed optionality that wins over the symbol's own flag.
    optional: Option<bool>,
    inside_class_or_interface: bool,
}

/// Traversal state for one walk.
pub struct TreeContext<'a> {
    db: &'a dyn TypeDatabase,
    config: TreeConfig,
    seen: FxHashSet<TypeId>,
    depth: u32,
}

impl<'a> TreeContext<'a> {
    pub fn new(db: &'a dyn TypeDatabase, config: TreeConfig) -> Self {
        TreeContext {
            db,
            config,
            seen: FxHashSet::default(),
            depth: 0,
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn has_seen(&self, ty: TypeId) -> bool {
        self.seen.contains(&ty)
    }

    pub fn type_of_symbol(&self, symbol: SymbolId) -> TypeId {
        type_of_symbol(self.db, symbol)
    }

    fn walk(
        &mut self,
        symbol: Option<SymbolId>,
        ty: Option<TypeId>,
        opts: WalkOptions,
    ) -> TypeInfoRef {
        let ty = match (ty, symbol) {
            (Some(ty), _) => ty,
            (None, Some(symbol)) => self.type_of_symbol(symbol),
            (None, None) => TypeId::UNKNOWN,
        };
        self.depth += 1;
        let node = self.walk_node(symbol, ty, opts);
        self.depth -= 1;
        Arc::new(node)
    }

    fn walk_type(&mut self, ty: TypeId) -> TypeInfoRef {
        self.walk(None, Some(ty), WalkOptions::default())
    }

    fn walk_types(&mut self, types: &[TypeId]) -> Vec<TypeInfoRef> {
        types.iter().map(|&ty| self.walk_type(ty)).collect()
    }

    fn walk_symbols(&mut self, symbols: &[SymbolId], opts: WalkOptions) -> Vec<TypeInfoRef> {
        symbols
            .iter()
            .map(|&symbol| self.walk(Some(symbol), None, opts))
            .collect()
    }

    fn walk_node(&mut self, symbol: Option<SymbolId>, ty: TypeId, opts: WalkOptions) -> TypeInfo {
        let id = TypeInfoId(ty.0);
        let symbol_meta = symbol.and_then(|symbol| self.symbol_info(symbol, opts));

        if self.depth > self.config.max_depth {
            trace!(%ty, depth = self.depth, "max depth reached");
            return TypeInfo {
                symbol_meta,
                ..TypeInfo::new(id, TypeInfoKind::MaxDepth)
            };
        }

        if self.seen.contains(&ty) {
            return TypeInfo {
                symbol_meta,
                ..TypeInfo::new(id, TypeInfoKind::Reference { location: None })
            };
        }

        if self.config.reference_defined_types && self.depth > 1 {
            if let Some(location) = self.defined_type_location(ty) {
                trace!(%ty, %location, "emitting defined type as reference");
                return TypeInfo {
                    symbol_meta,
                    ..TypeInfo::new(
                        id,
                        TypeInfoKind::Reference {
                            location: Some(location),
                        },
                    )
                };
            }
        }

        self.seen.insert(ty);

        let kind = self.walk_kind(ty);
        let (type_arguments, type_parameters) = self.generic_info(ty, &kind);
        let alias_symbol_meta = self
            .db
            .lookup(ty)
            .and_then(|record| record.alias_symbol)
            .and_then(|alias| self.symbol_info(alias, WalkOptions::default()));

        TypeInfo {
            id,
            kind,
            symbol_meta,
            alias_symbol_meta,
            type_arguments,
            type_parameters,
        }
    }

    /// Declaration location of a named, declared type.
    fn defined_type_location(&self, ty: TypeId) -> Option<SourceFileLocation> {
        let record = self.db.lookup(ty)?;
        [record.alias_symbol, record.symbol]
            .into_iter()
            .flatten()
            .filter_map(|symbol| self.db.symbol(symbol))
            .filter(|symbol| symbol.flags.is_defined_type())
            .find_map(|symbol| symbol.primary_declaration().map(|decl| decl.location.clone()))
    }

    fn symbol_info(&self, symbol: SymbolId, opts: WalkOptions) -> Option<SymbolInfo> {
        let db = self.db;
        let sym = db.symbol(symbol)?;
        let parent_is_class_like = sym
            .parent
            .and_then(|parent| db.symbol(parent))
            .is_some_and(|parent| parent.flags.intersects(SymbolFlags::CLASS_OR_INTERFACE));

        let mut info = SymbolInfo::new(sym.name.clone(), sym.flags);
        info.optional = opts
            .optional
            .unwrap_or_else(|| sym.flags.contains(SymbolFlags::OPTIONAL));
        info.rest = db.is_rest_parameter(symbol);
        info.readonly = sym.check_flags.contains(CheckFlags::READONLY);
        info.inside_class_or_interface = opts.inside_class_or_interface || parent_is_class_like;
        info.declarations = sym
            .declarations
            .iter()
            .map(|decl| DeclarationInfo {
                location: decl.location.clone(),
            })
            .collect();
        Some(info)
    }

    fn walk_kind(&mut self, ty: TypeId) -> TypeInfoKind {
        let db = self.db;
        let Some(record) = db.lookup(ty) else {
            return primitive(PrimitiveKind::Unknown);
        };
        let flags = record.flags;

        if flags.contains(TypeFlags::TYPE_PARAMETER) {
            let type_symbol = record
                .symbol
                .and_then(|symbol| self.symbol_info(symbol, WalkOptions::default()));
            let base_constraint = db
                .get_base_constraint_of_type(ty)
                .map(|constraint| self.walk_type(constraint));
            let default_type = db
                .get_default_from_type_parameter(ty)
                .map(|default| self.walk_type(default));
            return TypeInfoKind::TypeParameter {
                type_symbol,
                base_constraint,
                default_type,
            };
        }
        if flags.contains(TypeFlags::ANY) {
            return match record.intrinsic_name() {
                Some("intrinsic") => TypeInfoKind::Intrinsic {
                    name: "intrinsic".to_string(),
                },
                _ => primitive(PrimitiveKind::Any),
            };
        }

        const SIMPLE: [(TypeFlags, PrimitiveKind); 7] = [
            (TypeFlags::UNKNOWN, PrimitiveKind::Unknown),
            (TypeFlags::UNDEFINED, PrimitiveKind::Undefined),
            (TypeFlags::NULL, PrimitiveKind::Null),
            (TypeFlags::BOOLEAN, PrimitiveKind::Boolean),
            (TypeFlags::STRING, PrimitiveKind::String),
            (TypeFlags::NUMBER, PrimitiveKind::Number),
            (TypeFlags::VOID, PrimitiveKind::Void),
        ];
        if let Some((_, kind)) = SIMPLE.iter().find(|(flag, _)| flags.contains(*flag)) {
            return primitive(*kind);
        }

        if flags.intersects(TypeFlags::ENUM_LIKE) {
            return self.walk_enum(ty);
        }

        const AFTER_ENUM: [(TypeFlags, PrimitiveKind); 4] = [
            (TypeFlags::BIG_INT, PrimitiveKind::Bigint),
            (TypeFlags::ES_SYMBOL_LIKE, PrimitiveKind::Essymbol),
            (TypeFlags::UNIQUE_ES_SYMBOL, PrimitiveKind::UniqueSymbol),
            (TypeFlags::NEVER, PrimitiveKind::Never),
        ];
        if let Some((_, kind)) = AFTER_ENUM.iter().find(|(flag, _)| flags.intersects(*flag)) {
            return primitive(*kind);
        }

        if flags.intersects(TypeFlags::LITERAL) {
            if let TypeData::Literal { value } = &record.data {
                return literal_kind(value);
            }
            return primitive(PrimitiveKind::Unknown);
        }

        if flags.contains(TypeFlags::OBJECT) {
            return self.walk_object(ty);
        }

        match &record.data {
            TypeData::Union { types } if flags.contains(TypeFlags::UNION) => TypeInfoKind::Union {
                types: self.walk_types(types),
            },
            TypeData::Intersection { types } if flags.contains(TypeFlags::INTERSECTION) => {
                self.walk_intersection(types)
            }
            TypeData::Index { target } => TypeInfoKind::Index {
                key_of: self.walk_type(*target),
            },
            TypeData::IndexedAccess {
                object_type,
                index_type,
            } => TypeInfoKind::IndexedAccess {
                object_type: self.walk_type(*object_type),
                index_type: self.walk_type(*index_type),
            },
            TypeData::Conditional {
                check_type,
                extends_type,
                true_type,
                false_type,
            } => TypeInfoKind::Conditional {
                check_type: self.walk_type(*check_type),
                extends_type: self.walk_type(*extends_type),
                true_type: true_type.map(|ty| self.walk_type(ty)),
                false_type: false_type.map(|ty| self.walk_type(ty)),
            },
            TypeData::Substitution {
                base_type,
                constraint,
            } => TypeInfoKind::Substitution {
                base_type: self.walk_type(*base_type),
                substitute: self.walk_type(*constraint),
            },
            TypeData::TemplateLiteral { texts, types } => TypeInfoKind::TemplateLiteral {
                texts: texts.clone(),
                types: self.walk_types(types),
            },
            TypeData::StringMapping { target } => TypeInfoKind::StringMapping {
                type_symbol: record
                    .symbol
                    .and_then(|symbol| self.symbol_info(symbol, WalkOptions::default())),
                mapped: self.walk_type(*target),
            },
            _ if flags.contains(TypeFlags::NON_PRIMITIVE) => TypeInfoKind::NonPrimitive,
            _ => primitive(PrimitiveKind::Unknown),
        }
    }

    fn walk_enum(&mut self, ty: TypeId) -> TypeInfoKind {
        let db = self.db;
        let Some(record) = db.lookup(ty) else {
            return primitive(PrimitiveKind::Unknown);
        };
        let type_symbol = record
            .symbol
            .and_then(|symbol| self.symbol_info(symbol, WalkOptions::default()));

        if record.flags.intersects(TypeFlags::UNION | TypeFlags::ENUM) {
            let members = match &record.data {
                TypeData::Union { types } => self.walk_types(types),
                _ => Vec::new(),
            };
            return TypeInfoKind::Enum {
                enum_symbol: type_symbol,
                members,
            };
        }

        let value = match &record.data {
            TypeData::Literal {
                value: LiteralValue::Number(value),
            } => EnumValue::Number(*value),
            TypeData::Literal {
                value: LiteralValue::String(value),
            } => EnumValue::String(value.clone()),
            _ => return primitive(PrimitiveKind::Unknown),
        };
        let parent_symbol = record
            .symbol
            .and_then(|symbol| db.symbol(symbol))
            .and_then(|symbol| symbol.parent)
            .and_then(|parent| self.symbol_info(parent, WalkOptions::default()));
        TypeInfoKind::EnumLiteral {
            value,
            literal_symbol: type_symbol,
            parent_symbol,
        }
    }

    fn is_class_symbol(&self, symbol: Option<SymbolId>) -> bool {
        symbol
            .and_then(|symbol| self.db.symbol(symbol))
            .is_some_and(|symbol| symbol.flags.contains(SymbolFlags::CLASS))
    }

    fn walk_object(&mut self, ty: TypeId) -> TypeInfoKind {
        let db = self.db;
        let symbol = db.lookup(ty).and_then(|record| record.symbol);
        let object_flags = db.object_flags(ty);
        let is_constructor_side =
            self.is_class_symbol(symbol) && !object_flags.contains(ObjectFlags::CLASS);

        let mut signatures: Vec<Signature> =
            db.get_signatures_of_type(ty, SignatureKind::Call).to_vec();
        if !is_constructor_side {
            signatures.extend_from_slice(db.get_signatures_of_type(ty, SignatureKind::Construct));
        }
        if !signatures.is_empty() {
            return TypeInfoKind::Function {
                signatures: signatures
                    .iter()
                    .map(|signature| self.walk_signature(signature))
                    .collect(),
            };
        }

        if db.is_array_type(ty) {
            let element = db
                .get_type_arguments(ty)
                .first()
                .copied()
                .unwrap_or(TypeId::UNKNOWN);
            return TypeInfoKind::Array {
                element: self.walk_type(element),
                readonly: db.is_readonly_array_type(ty),
            };
        }

        if db.is_tuple_type(ty) {
            let shape = db
                .lookup(ty)
                .and_then(|record| record.as_object())
                .and_then(|object| object.tuple.clone())
                .unwrap_or_default();
            let elements = db.get_type_arguments(ty).to_vec();
            return TypeInfoKind::Tuple {
                types: self.walk_types(&elements),
                names: shape.labels,
                readonly: shape.readonly,
                min_length: shape.min_length,
            };
        }

        let resolved_flags = self.resolved_object_flags(ty);
        if resolved_flags.intersects(ObjectFlags::CLASS_OR_INTERFACE) {
            let is_class = resolved_flags.contains(ObjectFlags::CLASS);
            let info = self.walk_class_like(ty, symbol, is_class);
            return if is_class {
                TypeInfoKind::Class(info)
            } else {
                TypeInfoKind::Interface(info)
            };
        }

        let properties = db.get_properties_of_type(ty);
        let index_infos = db.get_index_infos_of_type(ty).to_vec();
        let object_class = if is_constructor_side {
            symbol.map(|symbol| {
                let instance = db.get_declared_type_of_symbol(symbol);
                self.walk_type(instance)
            })
        } else {
            None
        };
        TypeInfoKind::Object {
            properties: self.walk_symbols(&properties, WalkOptions::default()),
            index_infos: self.walk_index_infos(&index_infos),
            object_class,
        }
    }

    /// Object flags of the generic target for instantiated references.
    fn resolved_object_flags(&self, ty: TypeId) -> ObjectFlags {
        let db = self.db;
        let own = db.object_flags(ty);
        let target = db
            .lookup(ty)
            .and_then(|record| record.as_object())
            .and_then(|object| object.target);
        match target {
            Some(target) if own.contains(ObjectFlags::REFERENCE) => own | db.object_flags(target),
            _ => own,
        }
    }

    fn walk_class_like(
        &mut self,
        ty: TypeId,
        symbol: Option<SymbolId>,
        is_class: bool,
    ) -> ClassLikeInfo {
        let db = self.db;
        let member_opts = WalkOptions {
            optional: None,
            inside_class_or_interface: true,
        };
        let class_symbol =
            symbol.and_then(|symbol| self.symbol_info(symbol, WalkOptions::default()));
        let properties = db.get_properties_of_type(ty);
        let index_infos = db.get_index_infos_of_type(ty).to_vec();
        let base_types = db.get_base_types(ty).to_vec();
        let implements_types = db.get_implements_types(ty).to_vec();
        let construct_signatures = match symbol {
            Some(symbol) if is_class => {
                let constructor = db.get_type_of_symbol(symbol);
                db.get_signatures_of_type(constructor, SignatureKind::Construct)
                    .to_vec()
            }
            _ => Vec::new(),
        };

        ClassLikeInfo {
            class_symbol,
            properties: self.walk_symbols(&properties, member_opts),
            index_infos: self.walk_index_infos(&index_infos),
            base_type: base_types.first().map(|&base| self.walk_type(base)),
            implements_types: self.walk_types(&implements_types),
            construct_signatures: construct_signatures
                .iter()
                .map(|signature| self.walk_signature(signature))
                .collect(),
        }
    }

    fn walk_signature(&mut self, signature: &Signature) -> SignatureInfo {
        let db = self.db;
        let parameters = signature
            .parameters
            .iter()
            .map(|&parameter| {
                let opts = WalkOptions {
                    optional: Some(db.is_optional_parameter(parameter)),
                    inside_class_or_interface: false,
                };
                self.walk(Some(parameter), None, opts)
            })
            .collect();
        SignatureInfo {
            symbol_meta: signature
                .symbol
                .and_then(|symbol| self.symbol_info(symbol, WalkOptions::default())),
            parameters,
            return_type: Some(self.walk_type(signature.return_type)),
            type_parameters: (!signature.type_parameters.is_empty())
                .then(|| self.walk_types(&signature.type_parameters)),
        }
    }

    fn walk_index_infos(&mut self, infos: &[texplorer_checker::IndexInfo]) -> Vec<IndexInfo> {
        infos
            .iter()
            .map(|info| IndexInfo {
                key_type: Some(self.walk_type(info.key_type)),
                value_type: Some(self.walk_type(info.value_type)),
                parameter_symbol: info
                    .parameter
                    .and_then(|symbol| self.symbol_info(symbol, WalkOptions::default())),
                readonly: info.is_readonly,
            })
            .collect()
    }

    /// Intersections flatten one level. When every constituent is a plain
    /// object the node collapses into an `object` with the combined
    /// properties; otherwise the non-object constituents stay as `types`.
    fn walk_intersection(&mut self, types: &[TypeId]) -> TypeInfoKind {
        let db = self.db;
        let mut flattened: SmallVec<[TypeId; 4]> = SmallVec::new();
        for &ty in types {
            match db.lookup(ty).map(|record| &record.data) {
                Some(TypeData::Intersection { types: nested }) => flattened.extend_from_slice(nested),
                _ => flattened.push(ty),
            }
        }

        let (objects, others): (SmallVec<[TypeId; 4]>, SmallVec<[TypeId; 4]>) =
            flattened.iter().copied().partition(|&ty| self.is_plain_object(ty));

        let mut names: FxHashSet<String> = FxHashSet::default();
        let mut properties = Vec::new();
        let mut index_infos = Vec::new();
        for &object in &objects {
            for property in db.get_properties_of_type(object) {
                let Some(name) = db.symbol(property).map(|symbol| symbol.name.clone()) else {
                    continue;
                };
                if names.insert(name) {
                    properties.push(property);
                }
            }
            index_infos.extend_from_slice(db.get_index_infos_of_type(object));
        }

        if others.is_empty() {
            return TypeInfoKind::Object {
                properties: self.walk_symbols(&properties, WalkOptions::default()),
                index_infos: self.walk_index_infos(&index_infos),
                object_class: None,
            };
        }
        TypeInfoKind::Intersection {
            types: self.walk_types(&others),
            properties: self.walk_symbols(&properties, WalkOptions::default()),
            index_infos: self.walk_index_infos(&index_infos),
        }
    }

    fn is_plain_object(&self, ty: TypeId) -> bool {
        let db = self.db;
        db.type_flags(ty).contains(TypeFlags::OBJECT)
            && db.get_signatures_of_type(ty, SignatureKind::Call).is_empty()
            && !db.is_array_type(ty)
            && !db.is_tuple_type(ty)
    }

    /// Type arguments and the parameters they instantiate: alias arguments
    /// for instantiated aliases, reference arguments for generic class and
    /// interface references, declared parameters for generic declarations.
    fn generic_info(
        &mut self,
        ty: TypeId,
        kind: &TypeInfoKind,
    ) -> (Option<Vec<TypeInfoRef>>, Option<Vec<TypeInfoRef>>) {
        let db = self.db;
        let Some(record) = db.lookup(ty) else {
            return (None, None);
        };

        let (arguments, parameters): (Vec<TypeId>, Vec<TypeId>) =
            if let Some(alias) = record.alias_symbol {
                let parameters = db
                    .symbol(alias)
                    .map(|symbol| symbol.type_parameters.clone())
                    .unwrap_or_default();
                (record.alias_type_arguments.clone(), parameters)
            } else if matches!(kind, TypeInfoKind::Array { .. } | TypeInfoKind::Tuple { .. }) {
                (Vec::new(), Vec::new())
            } else if let Some(object) = record.as_object() {
                match object.target {
                    Some(target) => {
                        let parameters = db
                            .lookup(target)
                            .and_then(|target| target.as_object())
                            .map(|target| target.type_parameters.clone())
                            .unwrap_or_default();
                        (object.type_arguments.clone(), parameters)
                    }
                    None => (Vec::new(), object.type_parameters.clone()),
                }
            } else {
                (Vec::new(), Vec::new())
            };

        let type_arguments = (!arguments.is_empty()).then(|| self.walk_types(&arguments));
        let type_parameters = (!parameters.is_empty()).then(|| self.walk_types(&parameters));
        (type_arguments, type_parameters)
    }
}

fn primitive(kind: PrimitiveKind) -> TypeInfoKind {
    TypeInfoKind::Primitive { primitive: kind }
}

fn literal_kind(value: &LiteralValue) -> TypeInfoKind {
    match value {
        LiteralValue::String(value) => TypeInfoKind::StringLiteral {
            value: value.clone(),
        },
        LiteralValue::Number(value) => TypeInfoKind::NumberLiteral { value: *value },
        LiteralValue::BigInt(value) => TypeInfoKind::BigintLiteral {
            value: value.clone(),
        },
        LiteralValue::Boolean(value) => TypeInfoKind::BooleanLiteral { value: *value },
    }
}

#[cfg(test)]
#[path = "../tests/walker_tests.rs"]
mod tests;
