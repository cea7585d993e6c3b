//! Lazy localization of raw type trees.
//!
//! A resolver is created per root tree and discarded when the tree is
//! refreshed. It owns two append-only maps:
//!
//! - `origins`: every handle it handed out, mapped to the concrete raw node
//!   (and the root whose scope that node lives in), so a consumer can come
//!   back later and ask for the children of any node;
//! - `scopes`: one [`TypeInfoMap`] per root, built on first use, used to
//!   resolve `reference` nodes that point into sibling branches.
//!
//! Localizing a node unwraps array dimensions and references until a
//! concrete node is reached, then describes its children without localizing
//! them.

use crate::error::LocalizeError;
use crate::messages::{self, KIND_INDEX_INFO, KIND_TEXT_SEGMENT};
use crate::retriever::TypeInfoRetriever;
use futures::future::join_all;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use texplorer_common::limits::MAX_REFERENCE_HOPS;
use texplorer_common::{
    ChildOptions, IndexInfo, LocalizedError, LocalizedId, LocalizedSymbolInfo,
    LocalizedTypeInfo, LocalizedTypeInfoOrError, SignatureInfo, SymbolFlags, SymbolInfo,
    TypeInfo, TypeInfoChild, TypeInfoKind, TypeInfoMap, TypeInfoRef, TypePurpose,
};
use tracing::{debug, trace};

/// Where a handed-out node came from.
#[derive(Clone)]
struct Origin {
    /// The concrete raw node; `None` for synthetic grouping nodes.
    raw: Option<TypeInfoRef>,
    /// Root of the tree whose id scope the node's children resolve against.
    root: TypeInfoRef,
}

#[derive(Default)]
struct ResolverState {
    next_handle: u32,
    origins: FxHashMap<LocalizedId, Origin>,
    /// Keyed by root address; the root is held so the address stays unique.
    scopes: FxHashMap<usize, (TypeInfoRef, Rc<TypeInfoMap>)>,
}

/// Concrete node reached after unwrapping arrays and references.
struct Unwrapped {
    node: TypeInfoRef,
    root: TypeInfoRef,
    /// Symbol of the occurrence. A retrieved declaration lends its own only
    /// when the occurrence has none.
    symbol: Option<SymbolInfo>,
    dimension: u32,
    readonly_array: bool,
}

pub struct TypeInfoResolver {
    retriever: Option<Box<dyn TypeInfoRetriever>>,
    state: RefCell<ResolverState>,
}

impl Default for TypeInfoResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeInfoResolver {
    /// A resolver that can only follow in-tree references.
    pub fn new() -> Self {
        TypeInfoResolver {
            retriever: None,
            state: RefCell::default(),
        }
    }

    /// A resolver that also follows location references through `retriever`.
    pub fn with_retriever(retriever: impl TypeInfoRetriever + 'static) -> Self {
        TypeInfoResolver {
            retriever: Some(Box::new(retriever)),
            state: RefCell::default(),
        }
    }

    /// Whether `node` was produced by this resolver.
    pub fn has_localized_type_info(&self, node: &LocalizedTypeInfo) -> bool {
        self.state.borrow().origins.contains_key(&node.handle)
    }

    /// The concrete raw node `node` was localized from. Synthetic grouping
    /// nodes have none.
    pub fn raw_type_info(&self, node: &LocalizedTypeInfo) -> Option<TypeInfoRef> {
        self.state
            .borrow()
            .origins
            .get(&node.handle)
            .and_then(|origin| origin.raw.clone())
    }

    /// Localize the root of a tree.
    pub async fn localize(&self, root: &TypeInfoRef) -> LocalizedTypeInfoOrError {
        debug!(id = %root.id, kind = ?root.type_kind(), "localizing root");
        match self.localize_node(root, root, ChildOptions::default()).await {
            Ok(info) => LocalizedTypeInfoOrError::Info(info),
            Err(err) => error_node(&err, root),
        }
    }

    /// Localize the children described by `parent`.
    ///
    /// Children are localized concurrently and returned in description
    /// order. A failing child becomes an error node; its siblings are
    /// unaffected. With `include_type_arguments` unset the type parameter
    /// and type argument groups are skipped.
    pub async fn localize_children(
        &self,
        parent: &LocalizedTypeInfo,
        include_type_arguments: bool,
    ) -> Result<Vec<LocalizedTypeInfoOrError>, LocalizeError> {
        let origin = self
            .state
            .borrow()
            .origins
            .get(&parent.handle)
            .cloned()
            .ok_or(LocalizeError::UnknownNode {
                handle: parent.handle,
            })?;

        let children = parent.children.iter().filter(|child| {
            include_type_arguments
                || !matches!(
                    child.purpose(),
                    Some(TypePurpose::TypeParameterList | TypePurpose::TypeArgumentList)
                )
        });
        let pending = children.map(|child| {
            let root = origin.root.clone();
            async move {
                match child {
                    TypeInfoChild::Localized(node) => {
                        LocalizedTypeInfoOrError::Info((**node).clone())
                    }
                    TypeInfoChild::Raw { info, opts } => {
                        match self.localize_node(info, &root, opts.clone()).await {
                            Ok(node) => LocalizedTypeInfoOrError::Info(node),
                            Err(err) => error_node(&err, info),
                        }
                    }
                }
            }
        });
        let results = join_all(pending).await;
        trace!(
            parent = ?parent.handle,
            count = results.len(),
            errors = results.iter().filter(|result| result.is_error()).count(),
            "localized children"
        );
        Ok(results)
    }

    async fn localize_node(
        &self,
        info: &TypeInfoRef,
        root: &TypeInfoRef,
        opts: ChildOptions,
    ) -> Result<LocalizedTypeInfo, LocalizeError> {
        let unwrapped = self.unwrap(info, root).await?;
        let node = &unwrapped.node;

        let handle = self.allocate(Origin {
            raw: Some(node.clone()),
            root: unwrapped.root.clone(),
        });
        let children = self.describe_children(node, &unwrapped.root, &opts)?;

        let symbol = unwrapped.symbol.as_ref();
        let readonly = unwrapped.readonly_array
            || symbol.is_some_and(|symbol| symbol.readonly)
            || matches!(node.kind, TypeInfoKind::Tuple { readonly: true, .. });

        Ok(LocalizedTypeInfo {
            handle,
            kind: Some(node.type_kind()),
            kind_text: Some(messages::kind_text(&node.kind)),
            alias: alias_of(node),
            name: opts.name,
            symbol: symbol.map(localize_symbol),
            purpose: opts.purpose,
            optional: opts.optional || symbol.is_some_and(|symbol| symbol.optional),
            rest: symbol.is_some_and(|symbol| symbol.rest),
            readonly,
            dimension: unwrapped.dimension,
            type_id: Some(node.id),
            children,
        })
    }

    async fn unwrap(
        &self,
        info: &TypeInfoRef,
        root: &TypeInfoRef,
    ) -> Result<Unwrapped, LocalizeError> {
        let mut current = info.clone();
        let mut root = root.clone();
        let mut symbol = info.symbol_meta.clone();
        let mut dimension = 0;
        let mut readonly_array = false;
        let mut hops = 0;

        loop {
            let next = match &current.kind {
                TypeInfoKind::Array { element, readonly } => {
                    dimension += 1;
                    readonly_array |= *readonly;
                    element.clone()
                }
                TypeInfoKind::Reference { location } => {
                    hops += 1;
                    if hops > MAX_REFERENCE_HOPS {
                        return Err(LocalizeError::ReferenceChainTooLong {
                            hops: MAX_REFERENCE_HOPS,
                        });
                    }
                    match location {
                        Some(location) => {
                            let tree = self.retrieve(location).await?;
                            if symbol.is_none() {
                                symbol = tree.symbol_meta.clone();
                            }
                            root = tree.clone();
                            tree
                        }
                        None => self
                            .scope(&root)
                            .get(current.id)
                            .cloned()
                            .ok_or(LocalizeError::InvalidReference { id: current.id })?,
                    }
                }
                _ => break,
            };
            current = next;
        }

        Ok(Unwrapped {
            node: current,
            root,
            symbol,
            dimension,
            readonly_array,
        })
    }

    async fn retrieve(
        &self,
        location: &texplorer_common::SourceFileLocation,
    ) -> Result<TypeInfoRef, LocalizeError> {
        let retriever = self
            .retriever
            .as_ref()
            .ok_or_else(|| LocalizeError::MissingRetriever {
                location: location.clone(),
            })?;
        trace!(%location, "retrieving referenced type");
        let tree = retriever
            .retrieve(location.clone())
            .await
            .map_err(LocalizeError::Retriever)?;
        tree.map(Arc::new)
            .ok_or_else(|| LocalizeError::UnresolvedLocation {
                location: location.clone(),
            })
    }

    fn scope(&self, root: &TypeInfoRef) -> Rc<TypeInfoMap> {
        let key = Arc::as_ptr(root) as usize;
        let mut state = self.state.borrow_mut();
        let (_, map) = state.scopes.entry(key).or_insert_with(|| {
            let map = TypeInfoMap::build(root);
            trace!(root = %root.id, nodes = map.len(), "built type info map");
            (root.clone(), Rc::new(map))
        });
        map.clone()
    }

    fn allocate(&self, origin: Origin) -> LocalizedId {
        let mut state = self.state.borrow_mut();
        let handle = LocalizedId(state.next_handle);
        state.next_handle += 1;
        state.origins.insert(handle, origin);
        handle
    }

    /// A grouping node registered under `root` with raw `children`.
    fn synthetic(
        &self,
        root: &TypeInfoRef,
        purpose: Option<TypePurpose>,
        kind_text: String,
        children: Vec<TypeInfoChild>,
    ) -> TypeInfoChild {
        let handle = self.allocate(Origin {
            raw: None,
            root: root.clone(),
        });
        let mut node = LocalizedTypeInfo::synthetic(handle);
        node.purpose = purpose;
        node.kind_text = Some(kind_text);
        node.children = children;
        TypeInfoChild::Localized(Box::new(node))
    }

    fn describe_children(
        &self,
        node: &TypeInfoRef,
        root: &TypeInfoRef,
        opts: &ChildOptions,
    ) -> Result<Vec<TypeInfoChild>, LocalizeError> {
        let mut children = Vec::new();
        let with = |purpose| ChildOptions::purpose(purpose);

        match &node.kind {
            TypeInfoKind::Function { signatures } if signatures.len() == 1 => {
                self.describe_signature(&signatures[0], root, &mut children);
                return Ok(children);
            }
            TypeInfoKind::Array { .. } => return Err(LocalizeError::UnexpectedArray),
            _ => {}
        }

        self.describe_generic_lists(
            node.type_parameters.as_deref(),
            node.type_arguments.as_deref(),
            root,
            &mut children,
        );

        match &node.kind {
            TypeInfoKind::Object {
                properties,
                index_infos,
                object_class,
            } => {
                if let Some(object_class) = object_class {
                    children.push(TypeInfoChild::raw(object_class, with(TypePurpose::ObjectClass)));
                }
                self.describe_index_infos(index_infos, root, &mut children);
                raw_children(properties, &mut children);
            }
            TypeInfoKind::Class(class) | TypeInfoKind::Interface(class) => {
                if let Some(base_type) = &class.base_type {
                    children.push(TypeInfoChild::raw(base_type, with(TypePurpose::ClassBaseType)));
                }
                if !class.implements_types.is_empty() {
                    let mut implementations = Vec::new();
                    raw_children(&class.implements_types, &mut implementations);
                    children.push(self.synthetic(
                        root,
                        Some(TypePurpose::ClassImplementations),
                        messages::purpose_text(TypePurpose::ClassImplementations).to_string(),
                        implementations,
                    ));
                }
                if !class.construct_signatures.is_empty() {
                    let constructor = TypeInfo::new(
                        node.id,
                        TypeInfoKind::Function {
                            signatures: class.construct_signatures.clone(),
                        },
                    );
                    children.push(TypeInfoChild::raw(
                        &Arc::new(constructor),
                        with(TypePurpose::ClassConstructor),
                    ));
                }
                self.describe_index_infos(&class.index_infos, root, &mut children);
                raw_children(&class.properties, &mut children);
            }
            TypeInfoKind::Function { signatures } => {
                for signature in signatures {
                    let single = TypeInfo::new(
                        node.id,
                        TypeInfoKind::Function {
                            signatures: vec![signature.clone()],
                        },
                    );
                    children.push(TypeInfoChild::raw(&Arc::new(single), ChildOptions::default()));
                }
            }
            TypeInfoKind::Tuple {
                types,
                names,
                min_length,
                ..
            } => {
                for (index, ty) in types.iter().enumerate() {
                    let mut opts = match names.as_ref().and_then(|names| names.get(index)) {
                        Some(name) => ChildOptions::named(name.clone()),
                        None => ChildOptions::default(),
                    };
                    opts.optional = min_length.is_some_and(|min| index >= min);
                    children.push(TypeInfoChild::raw(ty, opts));
                }
            }
            TypeInfoKind::Conditional {
                check_type,
                extends_type,
                true_type,
                false_type,
            } => {
                children.push(TypeInfoChild::raw(check_type, with(TypePurpose::ConditionalCheck)));
                children.push(TypeInfoChild::raw(
                    extends_type,
                    with(TypePurpose::ConditionalExtends),
                ));
                if let Some(true_type) = true_type {
                    children.push(TypeInfoChild::raw(true_type, with(TypePurpose::ConditionalTrue)));
                }
                if let Some(false_type) = false_type {
                    children.push(TypeInfoChild::raw(
                        false_type,
                        with(TypePurpose::ConditionalFalse),
                    ));
                }
            }
            TypeInfoKind::Index { key_of } => {
                children.push(TypeInfoChild::raw(key_of, with(TypePurpose::Keyof)));
            }
            TypeInfoKind::IndexedAccess {
                object_type,
                index_type,
            } => {
                children.push(TypeInfoChild::raw(
                    object_type,
                    with(TypePurpose::IndexedAccessBase),
                ));
                children.push(TypeInfoChild::raw(
                    index_type,
                    with(TypePurpose::IndexedAccessIndex),
                ));
            }
            TypeInfoKind::Substitution {
                base_type,
                substitute,
            } => {
                children.push(TypeInfoChild::raw(base_type, with(TypePurpose::SubstitutionBase)));
                children.push(TypeInfoChild::raw(
                    substitute,
                    with(TypePurpose::SubstitutionSubstitute),
                ));
            }
            TypeInfoKind::Intersection {
                types,
                properties,
                index_infos,
            } => {
                self.describe_index_infos(index_infos, root, &mut children);
                raw_children(properties, &mut children);
                raw_children(types, &mut children);
            }
            TypeInfoKind::Union { types } => raw_children(types, &mut children),
            TypeInfoKind::Enum { members, .. } => raw_children(members, &mut children),
            TypeInfoKind::StringMapping { mapped, .. } => {
                children.push(TypeInfoChild::raw(mapped, with(TypePurpose::StringMappingType)));
            }
            TypeInfoKind::TemplateLiteral { texts, types } => {
                for (index, text) in texts.iter().enumerate() {
                    if !text.is_empty() {
                        children.push(self.synthetic(
                            root,
                            Some(TypePurpose::TemplateLiteralText),
                            messages::format_message(KIND_TEXT_SEGMENT.template, &[text]),
                            Vec::new(),
                        ));
                    }
                    if let Some(ty) = types.get(index) {
                        children.push(TypeInfoChild::raw(ty, ChildOptions::default()));
                    }
                }
            }
            TypeInfoKind::TypeParameter {
                base_constraint,
                default_type,
                ..
            } => {
                if let Some(value) = &opts.contextual_type_argument {
                    children.push(TypeInfoChild::raw(value, with(TypePurpose::ParameterValue)));
                }
                if let Some(default_type) = default_type {
                    children.push(TypeInfoChild::raw(
                        default_type,
                        with(TypePurpose::ParameterDefault),
                    ));
                }
                if let Some(base_constraint) = base_constraint {
                    children.push(TypeInfoChild::raw(
                        base_constraint,
                        with(TypePurpose::ParameterBaseConstraint),
                    ));
                }
            }
            TypeInfoKind::Array { .. }
            | TypeInfoKind::Primitive { .. }
            | TypeInfoKind::Intrinsic { .. }
            | TypeInfoKind::StringLiteral { .. }
            | TypeInfoKind::NumberLiteral { .. }
            | TypeInfoKind::BigintLiteral { .. }
            | TypeInfoKind::BooleanLiteral { .. }
            | TypeInfoKind::EnumLiteral { .. }
            | TypeInfoKind::NonPrimitive
            | TypeInfoKind::Reference { .. }
            | TypeInfoKind::MaxDepth => {}
        }
        Ok(children)
    }

    /// Type parameter list, then parameters, then return type.
    fn describe_signature(
        &self,
        signature: &SignatureInfo,
        root: &TypeInfoRef,
        children: &mut Vec<TypeInfoChild>,
    ) {
        self.describe_generic_lists(signature.type_parameters.as_deref(), None, root, children);
        for parameter in &signature.parameters {
            children.push(TypeInfoChild::raw(
                parameter,
                ChildOptions::purpose(TypePurpose::Parameter),
            ));
        }
        if let Some(return_type) = &signature.return_type {
            children.push(TypeInfoChild::raw(
                return_type,
                ChildOptions::purpose(TypePurpose::Return),
            ));
        }
    }

    /// Parameters and arguments paired position by position when both are
    /// known, otherwise whichever list exists.
    fn describe_generic_lists(
        &self,
        parameters: Option<&[TypeInfoRef]>,
        arguments: Option<&[TypeInfoRef]>,
        root: &TypeInfoRef,
        children: &mut Vec<TypeInfoChild>,
    ) {
        let parameters = parameters.filter(|list| !list.is_empty());
        let arguments = arguments.filter(|list| !list.is_empty());
        let (purpose, items) = match (parameters, arguments) {
            (None, None) => return,
            (Some(parameters), arguments) => {
                let mut items: Vec<TypeInfoChild> = parameters
                    .iter()
                    .enumerate()
                    .map(|(index, parameter)| {
                        let opts = ChildOptions {
                            contextual_type_argument: arguments
                                .and_then(|arguments| arguments.get(index))
                                .cloned(),
                            ..Default::default()
                        };
                        TypeInfoChild::raw(parameter, opts)
                    })
                    .collect();
                if let Some(arguments) = arguments {
                    raw_children(arguments.get(parameters.len()..).unwrap_or_default(), &mut items);
                }
                (TypePurpose::TypeParameterList, items)
            }
            (None, Some(arguments)) => {
                let mut items = Vec::new();
                raw_children(arguments, &mut items);
                (TypePurpose::TypeArgumentList, items)
            }
        };
        children.push(self.synthetic(
            root,
            Some(purpose),
            messages::purpose_text(purpose).to_string(),
            items,
        ));
    }

    fn describe_index_infos(
        &self,
        index_infos: &[IndexInfo],
        root: &TypeInfoRef,
        children: &mut Vec<TypeInfoChild>,
    ) {
        for info in index_infos {
            let mut items = Vec::new();
            if let Some(key_type) = &info.key_type {
                items.push(TypeInfoChild::raw(
                    key_type,
                    ChildOptions::purpose(TypePurpose::IndexParameterType),
                ));
            }
            if let Some(value_type) = &info.value_type {
                items.push(TypeInfoChild::raw(
                    value_type,
                    ChildOptions::purpose(TypePurpose::IndexValueType),
                ));
            }
            let child = self.synthetic(
                root,
                Some(TypePurpose::IndexInfo),
                KIND_INDEX_INFO.template.to_string(),
                items,
            );
            if let TypeInfoChild::Localized(mut node) = child {
                node.name = info.parameter_symbol.as_ref().map(|symbol| symbol.name.clone());
                node.readonly = info.readonly;
                children.push(TypeInfoChild::Localized(node));
            }
        }
    }
}

fn raw_children(nodes: &[TypeInfoRef], children: &mut Vec<TypeInfoChild>) {
    children.extend(
        nodes
            .iter()
            .map(|node| TypeInfoChild::raw(node, ChildOptions::default())),
    );
}

fn error_node(err: &LocalizeError, info: &TypeInfoRef) -> LocalizedTypeInfoOrError {
    debug!(id = %info.id, error = %err, "localization failed");
    LocalizedTypeInfoOrError::Error {
        error: LocalizedError {
            error: err.details(),
            type_info: Some(info.clone()),
        },
    }
}

/// Explicit alias name, else a per-kind fallback.
fn alias_of(node: &TypeInfo) -> Option<String> {
    if let Some(alias) = &node.alias_symbol_meta {
        return Some(alias.name.clone());
    }
    match &node.kind {
        TypeInfoKind::TypeParameter { type_symbol, .. } => {
            type_symbol.as_ref().map(|symbol| symbol.name.clone())
        }
        TypeInfoKind::EnumLiteral {
            literal_symbol,
            parent_symbol,
            ..
        } => {
            let member = literal_symbol.as_ref()?;
            Some(match parent_symbol {
                Some(parent) => format!("{}.{}", parent.name, member.name),
                None => member.name.clone(),
            })
        }
        TypeInfoKind::Enum { enum_symbol, .. } => {
            enum_symbol.as_ref().map(|symbol| symbol.name.clone())
        }
        TypeInfoKind::Class(class) | TypeInfoKind::Interface(class) => {
            class.class_symbol.as_ref().map(|symbol| symbol.name.clone())
        }
        _ => None,
    }
}

fn localize_symbol(symbol: &SymbolInfo) -> LocalizedSymbolInfo {
    LocalizedSymbolInfo {
        name: symbol.name.clone(),
        anonymous: symbol.anonymous,
        inside_class_or_interface: symbol.inside_class_or_interface,
        property: symbol.flags.contains(SymbolFlags::PROPERTY),
        is_argument: symbol.flags.contains(SymbolFlags::FUNCTION_SCOPED_VARIABLE),
        locations: symbol
            .declarations
            .iter()
            .map(|decl| decl.location.clone())
            .collect(),
    }
}

#[cfg(test)]
#[path = "../tests/resolver_tests.rs"]
mod tests;
