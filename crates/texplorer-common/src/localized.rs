//! Presentation-oriented view of the type tree.
//!
//! A `LocalizedTypeInfo` is produced on demand by the resolver. Its
//! `children` are *descriptions* of what each child would be; they are only
//! localized when a consumer asks the resolver for them.

use crate::position::SourceFileLocation;
use crate::type_info::{TypeInfoId, TypeInfoRef, TypeKind};
use serde::{Deserialize, Serialize};

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

/// Identity the resolver assigns to every node it hands out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedId(pub u32);

/// Why a child exists relative to its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypePurpose {
    Return,
    Parameter,
    ClassConstructor,
    ClassBaseType,
    ClassImplementations,
    ObjectClass,
    TypeParameterList,
    TypeArgumentList,
    ParameterValue,
    ParameterDefault,
    ParameterBaseConstraint,
    IndexInfo,
    IndexParameterType,
    IndexValueType,
    ConditionalCheck,
    ConditionalExtends,
    ConditionalTrue,
    ConditionalFalse,
    Keyof,
    IndexedAccessBase,
    IndexedAccessIndex,
    SubstitutionBase,
    SubstitutionSubstitute,
    StringMappingType,
    TemplateLiteralText,
}

/// Options a parent attaches to a child description.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<TypePurpose>,
    /// Display name overriding the symbol name (tuple labels, for example).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
    /// Type argument supplied for a type parameter in this context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contextual_type_argument: Option<TypeInfoRef>,
}

impl ChildOptions {
    pub fn purpose(purpose: TypePurpose) -> Self {
        ChildOptions {
            purpose: Some(purpose),
            ..Default::default()
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        ChildOptions {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// Description of one child: either a raw node still to be localized, or a
/// synthetic node the resolver built directly (grouping containers, template
/// literal text, index signatures).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeInfoChild {
    Raw {
        info: TypeInfoRef,
        #[serde(default)]
        opts: ChildOptions,
    },
    Localized(Box<LocalizedTypeInfo>),
}

impl TypeInfoChild {
    pub fn raw(info: &TypeInfoRef, opts: ChildOptions) -> Self {
        TypeInfoChild::Raw {
            info: info.clone(),
            opts,
        }
    }

    pub fn purpose(&self) -> Option<TypePurpose> {
        match self {
            TypeInfoChild::Raw { opts, .. } => opts.purpose,
            TypeInfoChild::Localized(info) => info.purpose,
        }
    }
}

/// Symbol details relevant to display.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedSymbolInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub anonymous: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub inside_class_or_interface: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub property: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_argument: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<SourceFileLocation>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedTypeInfo {
    pub handle: LocalizedId,
    /// Kind of the concrete node; `None` for synthetic grouping nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TypeKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<LocalizedSymbolInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<TypePurpose>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub rest: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub readonly: bool,
    /// Number of array dimensions unwrapped to reach this node.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub dimension: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_id: Option<TypeInfoId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TypeInfoChild>,
}

impl LocalizedTypeInfo {
    /// An empty synthetic node with the given handle.
    pub fn synthetic(handle: LocalizedId) -> Self {
        LocalizedTypeInfo {
            handle,
            kind: None,
            kind_text: None,
            alias: None,
            name: None,
            symbol: None,
            purpose: None,
            optional: false,
            rest: false,
            readonly: false,
            dimension: 0,
            type_id: None,
            children: Vec::new(),
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Best-effort description of a failure, shaped like a JavaScript error so
/// that editor front-ends can display it uniformly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub name: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedError {
    pub error: ErrorDetails,
    /// The raw node that failed, kept for diagnosis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_info: Option<TypeInfoRef>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedTypeInfoOrError {
    Error { error: LocalizedError },
    Info(LocalizedTypeInfo),
}

impl LocalizedTypeInfoOrError {
    pub fn info(&self) -> Option<&LocalizedTypeInfo> {
        match self {
            LocalizedTypeInfoOrError::Info(info) => Some(info),
            LocalizedTypeInfoOrError::Error { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&LocalizedError> {
        match self {
            LocalizedTypeInfoOrError::Info(_) => None,
            LocalizedTypeInfoOrError::Error { error } => Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LocalizedTypeInfoOrError::Error { .. })
    }
}
