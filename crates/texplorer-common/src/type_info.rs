//! Raw type tree produced by the walker.
//!
//! A `TypeInfo` tree is plain data: it serializes to JSON, crosses process
//! boundaries, and never holds live checker handles. The only internal
//! linkage is the `id` scheme: a `reference` node shares the `id` of a node
//! emitted elsewhere in the same tree and is resolved through a
//! [`TypeInfoMap`](crate::TypeInfoMap).

use crate::flags::SymbolFlags;
use crate::limits::ANONYMOUS_SYMBOL_PREFIX;
use crate::position::SourceFileLocation;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Identity of a type within one generation episode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeInfoId(pub u32);

impl fmt::Display for TypeInfoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Shared handle to a tree node. Children are shared so that a resolver can
/// hold on to any subtree without cloning it.
pub type TypeInfoRef = Arc<TypeInfo>;

fn is_false(value: &bool) -> bool {
    !*value
}

/// One node of the raw type tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeInfo {
    pub id: TypeInfoId,
    #[serde(flatten)]
    pub kind: TypeInfoKind,
    /// The declared symbol this node was reached through (a variable, a
    /// property, a parameter, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol_meta: Option<SymbolInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_symbol_meta: Option<SymbolInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_arguments: Option<Vec<TypeInfoRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_parameters: Option<Vec<TypeInfoRef>>,
}

impl TypeInfo {
    pub fn new(id: TypeInfoId, kind: TypeInfoKind) -> Self {
        TypeInfo {
            id,
            kind,
            symbol_meta: None,
            alias_symbol_meta: None,
            type_arguments: None,
            type_parameters: None,
        }
    }

    pub fn type_kind(&self) -> TypeKind {
        self.kind.type_kind()
    }

    pub fn is_reference(&self) -> bool {
        matches!(self.kind, TypeInfoKind::Reference { .. })
    }

    /// Visit every direct child node, including type arguments, type
    /// parameters and nodes nested inside signatures and index infos.
    pub fn for_each_child(&self, mut f: impl FnMut(&TypeInfoRef)) {
        fn visit_signature(signature: &SignatureInfo, f: &mut impl FnMut(&TypeInfoRef)) {
            signature.parameters.iter().for_each(&mut *f);
            if let Some(return_type) = &signature.return_type {
                f(return_type);
            }
            if let Some(type_parameters) = &signature.type_parameters {
                type_parameters.iter().for_each(&mut *f);
            }
        }
        fn visit_index_info(info: &IndexInfo, f: &mut impl FnMut(&TypeInfoRef)) {
            if let Some(key_type) = &info.key_type {
                f(key_type);
            }
            if let Some(value_type) = &info.value_type {
                f(value_type);
            }
        }

        match &self.kind {
            TypeInfoKind::Enum { members, .. } => members.iter().for_each(&mut f),
            TypeInfoKind::Object {
                properties,
                index_infos,
                object_class,
            } => {
                properties.iter().for_each(&mut f);
                index_infos
                    .iter()
                    .for_each(|info| visit_index_info(info, &mut f));
                if let Some(object_class) = object_class {
                    f(object_class);
                }
            }
            TypeInfoKind::Class(class) | TypeInfoKind::Interface(class) => {
                class.properties.iter().for_each(&mut f);
                class
                    .index_infos
                    .iter()
                    .for_each(|info| visit_index_info(info, &mut f));
                if let Some(base_type) = &class.base_type {
                    f(base_type);
                }
                class.implements_types.iter().for_each(&mut f);
                class
                    .construct_signatures
                    .iter()
                    .for_each(|signature| visit_signature(signature, &mut f));
            }
            TypeInfoKind::Function { signatures } => signatures
                .iter()
                .for_each(|signature| visit_signature(signature, &mut f)),
            TypeInfoKind::Array { element, .. } => f(element),
            TypeInfoKind::Tuple { types, .. }
            | TypeInfoKind::Union { types }
            | TypeInfoKind::TemplateLiteral { types, .. } => types.iter().for_each(&mut f),
            TypeInfoKind::Intersection {
                types,
                properties,
                index_infos,
            } => {
                types.iter().for_each(&mut f);
                properties.iter().for_each(&mut f);
                index_infos
                    .iter()
                    .for_each(|info| visit_index_info(info, &mut f));
            }
            TypeInfoKind::Index { key_of } => f(key_of),
            TypeInfoKind::IndexedAccess {
                object_type,
                index_type,
            } => {
                f(object_type);
                f(index_type);
            }
            TypeInfoKind::Conditional {
                check_type,
                extends_type,
                true_type,
                false_type,
            } => {
                f(check_type);
                f(extends_type);
                if let Some(true_type) = true_type {
                    f(true_type);
                }
                if let Some(false_type) = false_type {
                    f(false_type);
                }
            }
            TypeInfoKind::Substitution {
                base_type,
                substitute,
            } => {
                f(base_type);
                f(substitute);
            }
            TypeInfoKind::StringMapping { mapped, .. } => f(mapped),
            TypeInfoKind::TypeParameter {
                base_constraint,
                default_type,
                ..
            } => {
                if let Some(base_constraint) = base_constraint {
                    f(base_constraint);
                }
                if let Some(default_type) = default_type {
                    f(default_type);
                }
            }
            TypeInfoKind::Primitive { .. }
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

        if let Some(type_arguments) = &self.type_arguments {
            type_arguments.iter().for_each(&mut f);
        }
        if let Some(type_parameters) = &self.type_parameters {
            type_parameters.iter().for_each(&mut f);
        }
    }
}

/// Kind-specific payload of a [`TypeInfo`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum TypeInfoKind {
    Primitive {
        primitive: PrimitiveKind,
    },
    /// The `intrinsic` keyword type backing `Uppercase<T>` and friends.
    Intrinsic {
        name: String,
    },
    StringLiteral {
        value: String,
    },
    NumberLiteral {
        value: f64,
    },
    BigintLiteral {
        value: PseudoBigInt,
    },
    BooleanLiteral {
        value: bool,
    },
    EnumLiteral {
        value: EnumValue,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        literal_symbol: Option<SymbolInfo>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parent_symbol: Option<SymbolInfo>,
    },
    Enum {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        enum_symbol: Option<SymbolInfo>,
        members: Vec<TypeInfoRef>,
    },
    Object {
        properties: Vec<TypeInfoRef>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        index_infos: Vec<IndexInfo>,
        /// The class whose constructor side this object is.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        object_class: Option<TypeInfoRef>,
    },
    Class(ClassLikeInfo),
    Interface(ClassLikeInfo),
    Function {
        signatures: Vec<SignatureInfo>,
    },
    Array {
        #[serde(rename = "type")]
        element: TypeInfoRef,
        #[serde(default, skip_serializing_if = "is_false")]
        readonly: bool,
    },
    Tuple {
        types: Vec<TypeInfoRef>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        names: Option<Vec<String>>,
        #[serde(default, skip_serializing_if = "is_false")]
        readonly: bool,
        /// Index of the first optional element, when there is one.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_length: Option<usize>,
    },
    Union {
        types: Vec<TypeInfoRef>,
    },
    Intersection {
        types: Vec<TypeInfoRef>,
        properties: Vec<TypeInfoRef>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        index_infos: Vec<IndexInfo>,
    },
    Index {
        key_of: TypeInfoRef,
    },
    IndexedAccess {
        object_type: TypeInfoRef,
        index_type: TypeInfoRef,
    },
    Conditional {
        check_type: TypeInfoRef,
        extends_type: TypeInfoRef,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        true_type: Option<TypeInfoRef>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        false_type: Option<TypeInfoRef>,
    },
    Substitution {
        base_type: TypeInfoRef,
        substitute: TypeInfoRef,
    },
    StringMapping {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        type_symbol: Option<SymbolInfo>,
        #[serde(rename = "type")]
        mapped: TypeInfoRef,
    },
    TemplateLiteral {
        texts: Vec<String>,
        types: Vec<TypeInfoRef>,
    },
    TypeParameter {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        type_symbol: Option<SymbolInfo>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        base_constraint: Option<TypeInfoRef>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_type: Option<TypeInfoRef>,
    },
    NonPrimitive,
    /// Stand-in for a node emitted elsewhere with the same id, or, when
    /// `location` is set, for a type that must be fetched from that location.
    Reference {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<SourceFileLocation>,
    },
    MaxDepth,
}

impl TypeInfoKind {
    pub fn type_kind(&self) -> TypeKind {
        match self {
            TypeInfoKind::Primitive { .. } => TypeKind::Primitive,
            TypeInfoKind::Intrinsic { .. } => TypeKind::Intrinsic,
            TypeInfoKind::StringLiteral { .. } => TypeKind::StringLiteral,
            TypeInfoKind::NumberLiteral { .. } => TypeKind::NumberLiteral,
            TypeInfoKind::BigintLiteral { .. } => TypeKind::BigintLiteral,
            TypeInfoKind::BooleanLiteral { .. } => TypeKind::BooleanLiteral,
            TypeInfoKind::EnumLiteral { .. } => TypeKind::EnumLiteral,
            TypeInfoKind::Enum { .. } => TypeKind::Enum,
            TypeInfoKind::Object { .. } => TypeKind::Object,
            TypeInfoKind::Class(_) => TypeKind::Class,
            TypeInfoKind::Interface(_) => TypeKind::Interface,
            TypeInfoKind::Function { .. } => TypeKind::Function,
            TypeInfoKind::Array { .. } => TypeKind::Array,
            TypeInfoKind::Tuple { .. } => TypeKind::Tuple,
            TypeInfoKind::Union { .. } => TypeKind::Union,
            TypeInfoKind::Intersection { .. } => TypeKind::Intersection,
            TypeInfoKind::Index { .. } => TypeKind::Index,
            TypeInfoKind::IndexedAccess { .. } => TypeKind::IndexedAccess,
            TypeInfoKind::Conditional { .. } => TypeKind::Conditional,
            TypeInfoKind::Substitution { .. } => TypeKind::Substitution,
            TypeInfoKind::StringMapping { .. } => TypeKind::StringMapping,
            TypeInfoKind::TemplateLiteral { .. } => TypeKind::TemplateLiteral,
            TypeInfoKind::TypeParameter { .. } => TypeKind::TypeParameter,
            TypeInfoKind::NonPrimitive => TypeKind::NonPrimitive,
            TypeInfoKind::Reference { .. } => TypeKind::Reference,
            TypeInfoKind::MaxDepth => TypeKind::MaxDepth,
        }
    }
}

/// Payload-free discriminant of [`TypeInfoKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Primitive,
    Intrinsic,
    StringLiteral,
    NumberLiteral,
    BigintLiteral,
    BooleanLiteral,
    EnumLiteral,
    Enum,
    Object,
    Class,
    Interface,
    Function,
    Array,
    Tuple,
    Union,
    Intersection,
    Index,
    IndexedAccess,
    Conditional,
    Substitution,
    StringMapping,
    TemplateLiteral,
    TypeParameter,
    NonPrimitive,
    Reference,
    MaxDepth,
}

/// Shared payload of `class` and `interface` nodes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassLikeInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_symbol: Option<SymbolInfo>,
    pub properties: Vec<TypeInfoRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub index_infos: Vec<IndexInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<TypeInfoRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implements_types: Vec<TypeInfoRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub construct_signatures: Vec<SignatureInfo>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Any,
    Unknown,
    Undefined,
    Null,
    Boolean,
    String,
    Number,
    Void,
    Bigint,
    Essymbol,
    UniqueSymbol,
    Never,
}

impl PrimitiveKind {
    /// The keyword a user would write for this primitive.
    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveKind::Any => "any",
            PrimitiveKind::Unknown => "unknown",
            PrimitiveKind::Undefined => "undefined",
            PrimitiveKind::Null => "null",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::String => "string",
            PrimitiveKind::Number => "number",
            PrimitiveKind::Void => "void",
            PrimitiveKind::Bigint => "bigint",
            PrimitiveKind::Essymbol => "symbol",
            PrimitiveKind::UniqueSymbol => "unique symbol",
            PrimitiveKind::Never => "never",
        }
    }
}

/// Arbitrary-precision bigint literal, kept in base 10.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PseudoBigInt {
    pub negative: bool,
    pub base10_value: String,
}

impl fmt::Display for PseudoBigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str(&self.base10_value)
    }
}

/// Value of an enum member.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    Number(f64),
    String(String),
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumValue::Number(value) => write!(f, "{}", value),
            EnumValue::String(value) => write!(f, "\"{}\"", value),
        }
    }
}

/// A declared symbol, reduced to what the tree needs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    pub name: String,
    pub flags: SymbolFlags,
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub anonymous: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub rest: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub readonly: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub inside_class_or_interface: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub declarations: Vec<DeclarationInfo>,
}

impl SymbolInfo {
    pub fn new(name: impl Into<String>, flags: SymbolFlags) -> Self {
        let name = name.into();
        SymbolInfo {
            anonymous: name.starts_with(ANONYMOUS_SYMBOL_PREFIX),
            name,
            flags,
            ..Default::default()
        }
    }

    /// Location of the first declaration, if the symbol has one.
    pub fn location(&self) -> Option<&SourceFileLocation> {
        self.declarations.first().map(|decl| &decl.location)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationInfo {
    pub location: SourceFileLocation,
}

/// One call or construct signature.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol_meta: Option<SymbolInfo>,
    pub parameters: Vec<TypeInfoRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<TypeInfoRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_parameters: Option<Vec<TypeInfoRef>>,
}

/// One index signature (`[key: string]: T`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_type: Option<TypeInfoRef>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<TypeInfoRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_symbol: Option<SymbolInfo>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub readonly: bool,
}

#[cfg(test)]
#[path = "../tests/type_info_tests.rs"]
mod tests;
