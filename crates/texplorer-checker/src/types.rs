//! Type and symbol records.
//!
//! Flag values follow the TypeScript compiler bit for bit. Flags are not
//! mutually exclusive: `boolean` is a union that also carries `BOOLEAN`, an
//! enum type is a union that also carries `ENUM`, and an enum member type
//! carries `ENUM_LITERAL` together with its literal bit. Consumers that
//! dispatch on flags must test them in a fixed precedence order.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use texplorer_common::{PseudoBigInt, SourceFileLocation, SymbolFlags};

/// Handle to a type in a [`TypeStore`](crate::TypeStore).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const ANY: TypeId = TypeId(0);
    pub const UNKNOWN: TypeId = TypeId(1);
    /// The checker's error sentinel: an `any` named `"error"`.
    pub const ERROR: TypeId = TypeId(2);
    pub const STRING: TypeId = TypeId(3);
    pub const NUMBER: TypeId = TypeId(4);
    pub const BIGINT: TypeId = TypeId(5);
    pub const ES_SYMBOL: TypeId = TypeId(6);
    pub const VOID: TypeId = TypeId(7);
    pub const UNDEFINED: TypeId = TypeId(8);
    pub const NULL: TypeId = TypeId(9);
    pub const NEVER: TypeId = TypeId(10);
    pub const NON_PRIMITIVE: TypeId = TypeId(11);
    pub const FALSE: TypeId = TypeId(12);
    pub const TRUE: TypeId = TypeId(13);
    pub const BOOLEAN: TypeId = TypeId(14);
    /// The `intrinsic` keyword type.
    pub const INTRINSIC: TypeId = TypeId(15);

    /// Number of pre-registered intrinsic types.
    pub const INTRINSIC_COUNT: u32 = 16;

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

/// Handle to a symbol in a [`TypeStore`](crate::TypeStore).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(pub u32);

impl SymbolId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct TypeFlags: u32 {
        const ANY = 1 << 0;
        const UNKNOWN = 1 << 1;
        const STRING = 1 << 2;
        const NUMBER = 1 << 3;
        const BOOLEAN = 1 << 4;
        const ENUM = 1 << 5;
        const BIG_INT = 1 << 6;
        const STRING_LITERAL = 1 << 7;
        const NUMBER_LITERAL = 1 << 8;
        const BOOLEAN_LITERAL = 1 << 9;
        const ENUM_LITERAL = 1 << 10;
        const BIG_INT_LITERAL = 1 << 11;
        const ES_SYMBOL = 1 << 12;
        const UNIQUE_ES_SYMBOL = 1 << 13;
        const VOID = 1 << 14;
        const UNDEFINED = 1 << 15;
        const NULL = 1 << 16;
        const NEVER = 1 << 17;
        const TYPE_PARAMETER = 1 << 18;
        const OBJECT = 1 << 19;
        const UNION = 1 << 20;
        const INTERSECTION = 1 << 21;
        const INDEX = 1 << 22;
        const INDEXED_ACCESS = 1 << 23;
        const CONDITIONAL = 1 << 24;
        const SUBSTITUTION = 1 << 25;
        const NON_PRIMITIVE = 1 << 26;
        const TEMPLATE_LITERAL = 1 << 27;
        const STRING_MAPPING = 1 << 28;

        const ENUM_LIKE = Self::ENUM.bits() | Self::ENUM_LITERAL.bits();
        const ES_SYMBOL_LIKE = Self::ES_SYMBOL.bits() | Self::UNIQUE_ES_SYMBOL.bits();
        const LITERAL = Self::STRING_LITERAL.bits()
            | Self::NUMBER_LITERAL.bits()
            | Self::BIG_INT_LITERAL.bits()
            | Self::BOOLEAN_LITERAL.bits();
        const UNION_OR_INTERSECTION = Self::UNION.bits() | Self::INTERSECTION.bits();
    }
}

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ObjectFlags: u32 {
        const CLASS = 1 << 0;
        const INTERFACE = 1 << 1;
        const REFERENCE = 1 << 2;
        const TUPLE = 1 << 3;
        const ANONYMOUS = 1 << 4;
        const MAPPED = 1 << 5;
        const INSTANTIATED = 1 << 6;
        const OBJECT_LITERAL = 1 << 7;

        const CLASS_OR_INTERFACE = Self::CLASS.bits() | Self::INTERFACE.bits();
    }
}

bitflags! {
    /// Flags the checker attaches to transient (synthesized) symbols.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct CheckFlags: u32 {
        const INSTANTIATED = 1 << 0;
        const SYNTHETIC_PROPERTY = 1 << 1;
        const SYNTHETIC_METHOD = 1 << 2;
        const READONLY = 1 << 3;
        const HAS_NON_UNIFORM_TYPE = 1 << 6;
        const LATE = 1 << 12;
        const REVERSE_MAPPED = 1 << 13;
        const OPTIONAL_PARAMETER = 1 << 14;
        const REST_PARAMETER = 1 << 15;
        const MAPPED = 1 << 18;
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Type {
    pub flags: TypeFlags,
    #[serde(default)]
    pub object_flags: ObjectFlags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<SymbolId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_symbol: Option<SymbolId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alias_type_arguments: Vec<TypeId>,
    pub data: TypeData,
}

impl Type {
    pub fn new(flags: TypeFlags, data: TypeData) -> Self {
        Type {
            flags,
            object_flags: ObjectFlags::empty(),
            symbol: None,
            alias_symbol: None,
            alias_type_arguments: Vec::new(),
            data,
        }
    }

    pub fn intrinsic(flags: TypeFlags, name: &str) -> Self {
        Type::new(
            flags,
            TypeData::Intrinsic {
                name: name.to_string(),
            },
        )
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        match &self.data {
            TypeData::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn intrinsic_name(&self) -> Option<&str> {
        match &self.data {
            TypeData::Intrinsic { name } => Some(name),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum TypeData {
    Intrinsic {
        name: String,
    },
    Literal {
        value: LiteralValue,
    },
    Object(ObjectType),
    Union {
        types: Vec<TypeId>,
    },
    Intersection {
        types: Vec<TypeId>,
    },
    TypeParameter {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        constraint: Option<TypeId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default: Option<TypeId>,
    },
    Index {
        target: TypeId,
    },
    IndexedAccess {
        object_type: TypeId,
        index_type: TypeId,
    },
    Conditional {
        check_type: TypeId,
        extends_type: TypeId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        true_type: Option<TypeId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        false_type: Option<TypeId>,
    },
    Substitution {
        base_type: TypeId,
        constraint: TypeId,
    },
    TemplateLiteral {
        texts: Vec<String>,
        types: Vec<TypeId>,
    },
    StringMapping {
        target: TypeId,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum LiteralValue {
    String(String),
    Number(f64),
    BigInt(PseudoBigInt),
    Boolean(bool),
}

/// Structured members of an object type.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectType {
    pub properties: Vec<SymbolId>,
    pub call_signatures: Vec<Signature>,
    pub construct_signatures: Vec<Signature>,
    pub index_infos: Vec<IndexInfo>,
    /// Generic target of a type reference (`Array` for `string[]`).
    pub target: Option<TypeId>,
    pub type_arguments: Vec<TypeId>,
    /// Declared type parameters of a generic class or interface.
    pub type_parameters: Vec<TypeId>,
    pub tuple: Option<TupleShape>,
    pub base_types: Vec<TypeId>,
    pub implements_types: Vec<TypeId>,
}

/// Member lists accepted by [`TypeFactory::set_object_members`](crate::TypeFactory::set_object_members).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectMembers {
    pub properties: Vec<SymbolId>,
    pub call_signatures: Vec<Signature>,
    pub construct_signatures: Vec<Signature>,
    pub index_infos: Vec<IndexInfo>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TupleShape {
    pub labels: Option<Vec<String>>,
    pub readonly: bool,
    /// Elements at or past this index are optional (`[string, number?]`).
    pub min_length: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<SymbolId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<TypeId>,
    pub parameters: Vec<SymbolId>,
    pub return_type: TypeId,
    #[serde(default)]
    pub min_argument_count: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexInfo {
    pub key_type: TypeId,
    #[serde(rename = "type")]
    pub value_type: TypeId,
    #[serde(default)]
    pub is_readonly: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<SymbolId>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    pub name: String,
    pub flags: SymbolFlags,
    #[serde(default)]
    pub check_flags: CheckFlags,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub declarations: Vec<Declaration>,
    /// Index into `declarations` of the value declaration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_declaration: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<SymbolId>,
    /// Resolved type of the symbol's value (`getTypeOfSymbol`).
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub value_type: Option<TypeId>,
    /// Type the symbol declares (classes, interfaces, aliases, enums).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared_type: Option<TypeId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<TypeId>,
}

impl Symbol {
    pub fn new(name: impl Into<String>, flags: SymbolFlags) -> Self {
        Symbol {
            name: name.into(),
            flags,
            check_flags: CheckFlags::empty(),
            declarations: Vec::new(),
            value_declaration: None,
            parent: None,
            value_type: None,
            declared_type: None,
            type_parameters: Vec::new(),
        }
    }

    /// The value declaration, or the first declaration.
    pub fn primary_declaration(&self) -> Option<&Declaration> {
        self.value_declaration
            .and_then(|index| self.declarations.get(index))
            .or_else(|| self.declarations.first())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Variable,
    Parameter,
    Property,
    PropertySignature,
    Method,
    Function,
    Class,
    Interface,
    TypeAlias,
    Enum,
    EnumMember,
    TypeParameter,
    Other,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Declaration {
    pub kind: DeclarationKind,
    /// Location of the declaration's name.
    pub location: SourceFileLocation,
    #[serde(default)]
    pub question_token: bool,
    #[serde(default)]
    pub dot_dot_dot_token: bool,
    #[serde(default)]
    pub has_initializer: bool,
    /// What the checker answers for this symbol at this declaration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_at_location: Option<TypeId>,
}

impl Declaration {
    pub fn new(kind: DeclarationKind, location: SourceFileLocation) -> Self {
        Declaration {
            kind,
            location,
            question_token: false,
            dot_dot_dot_token: false,
            has_initializer: false,
            type_at_location: None,
        }
    }
}
