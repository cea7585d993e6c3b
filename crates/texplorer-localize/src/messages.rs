//! Display text for node kinds and child purposes.
//!
//! Templates use `{0}`-style placeholders, filled by [`format_message`].

use texplorer_common::{TypeInfoKind, TypeKind, TypePurpose};

/// Label shown for a node that failed to localize.
pub const ERROR_LABEL: &str = "<error>";

/// Label shown for a parameter without a usable name.
pub const UNNAMED_PARAMETER: &str = "<parameter>";

/// A message template with a stable key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Message {
    pub key: &'static str,
    pub template: &'static str,
}

macro_rules! messages {
    ($($name:ident = $key:literal => $template:literal;)*) => {
        $(pub const $name: Message = Message { key: $key, template: $template };)*

        /// Every message, for lookups by key.
        pub const ALL_MESSAGES: &[Message] = &[$($name),*];
    };
}

messages! {
    KIND_PRIMITIVE = "kind.primitive" => "{0}";
    KIND_INTRINSIC = "kind.intrinsic" => "intrinsic";
    KIND_STRING_LITERAL = "kind.string_literal" => "\"{0}\"";
    KIND_NUMBER_LITERAL = "kind.number_literal" => "{0}";
    KIND_BIGINT_LITERAL = "kind.bigint_literal" => "{0}n";
    KIND_BOOLEAN_LITERAL = "kind.boolean_literal" => "{0}";
    KIND_ENUM_LITERAL = "kind.enum_literal" => "{0}";
    KIND_ENUM = "kind.enum" => "enum";
    KIND_OBJECT = "kind.object" => "object";
    KIND_CLASS = "kind.class" => "class";
    KIND_INTERFACE = "kind.interface" => "interface";
    KIND_FUNCTION = "kind.function" => "function";
    KIND_ARRAY = "kind.array" => "array";
    KIND_TUPLE = "kind.tuple" => "tuple";
    KIND_UNION = "kind.union" => "union";
    KIND_INTERSECTION = "kind.intersection" => "intersection";
    KIND_INDEX = "kind.index" => "keyof";
    KIND_INDEXED_ACCESS = "kind.indexed_access" => "access";
    KIND_CONDITIONAL = "kind.conditional" => "conditional";
    KIND_SUBSTITUTION = "kind.substitution" => "substitution";
    KIND_STRING_MAPPING = "kind.string_mapping" => "string mapping";
    KIND_TEMPLATE_LITERAL = "kind.template_literal" => "template literal";
    KIND_TYPE_PARAMETER = "kind.type_parameter" => "type parameter";
    KIND_NON_PRIMITIVE = "kind.non_primitive" => "object";
    KIND_REFERENCE = "kind.reference" => "reference";
    KIND_MAX_DEPTH = "kind.max_depth" => "max depth exceeded";
    KIND_INDEX_INFO = "kind.index_info" => "index";
    KIND_TEXT_SEGMENT = "kind.text_segment" => "\"{0}\"";

    PURPOSE_RETURN = "purpose.return" => "return";
    PURPOSE_PARAMETER = "purpose.parameter" => "parameter";
    PURPOSE_CLASS_CONSTRUCTOR = "purpose.class_constructor" => "constructor";
    PURPOSE_CLASS_BASE_TYPE = "purpose.class_base_type" => "extends";
    PURPOSE_CLASS_IMPLEMENTATIONS = "purpose.class_implementations" => "implements";
    PURPOSE_OBJECT_CLASS = "purpose.object_class" => "class";
    PURPOSE_TYPE_PARAMETER_LIST = "purpose.type_parameter_list" => "type parameters";
    PURPOSE_TYPE_ARGUMENT_LIST = "purpose.type_argument_list" => "type arguments";
    PURPOSE_PARAMETER_VALUE = "purpose.parameter_value" => "value";
    PURPOSE_PARAMETER_DEFAULT = "purpose.parameter_default" => "default";
    PURPOSE_PARAMETER_BASE_CONSTRAINT = "purpose.parameter_base_constraint" => "constraint";
    PURPOSE_INDEX_INFO = "purpose.index_info" => "index";
    PURPOSE_INDEX_PARAMETER_TYPE = "purpose.index_parameter_type" => "key";
    PURPOSE_INDEX_VALUE_TYPE = "purpose.index_value_type" => "value";
    PURPOSE_CONDITIONAL_CHECK = "purpose.conditional_check" => "check";
    PURPOSE_CONDITIONAL_EXTENDS = "purpose.conditional_extends" => "extends";
    PURPOSE_CONDITIONAL_TRUE = "purpose.conditional_true" => "true branch";
    PURPOSE_CONDITIONAL_FALSE = "purpose.conditional_false" => "false branch";
    PURPOSE_KEYOF = "purpose.keyof" => "keyof";
    PURPOSE_INDEXED_ACCESS_BASE = "purpose.indexed_access_base" => "base";
    PURPOSE_INDEXED_ACCESS_INDEX = "purpose.indexed_access_index" => "index";
    PURPOSE_SUBSTITUTION_BASE = "purpose.substitution_base" => "base";
    PURPOSE_SUBSTITUTION_SUBSTITUTE = "purpose.substitution_substitute" => "substitute";
    PURPOSE_STRING_MAPPING_TYPE = "purpose.string_mapping_type" => "type";
    PURPOSE_TEMPLATE_LITERAL_TEXT = "purpose.template_literal_text" => "text";
}

/// Substitute `{0}`, `{1}`, ... in `template`.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

pub fn message_by_key(key: &str) -> Option<Message> {
    ALL_MESSAGES.iter().copied().find(|message| message.key == key)
}

pub fn kind_message(kind: TypeKind) -> Message {
    match kind {
        TypeKind::Primitive => KIND_PRIMITIVE,
        TypeKind::Intrinsic => KIND_INTRINSIC,
        TypeKind::StringLiteral => KIND_STRING_LITERAL,
        TypeKind::NumberLiteral => KIND_NUMBER_LITERAL,
        TypeKind::BigintLiteral => KIND_BIGINT_LITERAL,
        TypeKind::BooleanLiteral => KIND_BOOLEAN_LITERAL,
        TypeKind::EnumLiteral => KIND_ENUM_LITERAL,
        TypeKind::Enum => KIND_ENUM,
        TypeKind::Object => KIND_OBJECT,
        TypeKind::Class => KIND_CLASS,
        TypeKind::Interface => KIND_INTERFACE,
        TypeKind::Function => KIND_FUNCTION,
        TypeKind::Array => KIND_ARRAY,
        TypeKind::Tuple => KIND_TUPLE,
        TypeKind::Union => KIND_UNION,
        TypeKind::Intersection => KIND_INTERSECTION,
        TypeKind::Index => KIND_INDEX,
        TypeKind::IndexedAccess => KIND_INDEXED_ACCESS,
        TypeKind::Conditional => KIND_CONDITIONAL,
        TypeKind::Substitution => KIND_SUBSTITUTION,
        TypeKind::StringMapping => KIND_STRING_MAPPING,
        TypeKind::TemplateLiteral => KIND_TEMPLATE_LITERAL,
        TypeKind::TypeParameter => KIND_TYPE_PARAMETER,
        TypeKind::NonPrimitive => KIND_NON_PRIMITIVE,
        TypeKind::Reference => KIND_REFERENCE,
        TypeKind::MaxDepth => KIND_MAX_DEPTH,
    }
}

pub fn purpose_message(purpose: TypePurpose) -> Message {
    match purpose {
        TypePurpose::Return => PURPOSE_RETURN,
        TypePurpose::Parameter => PURPOSE_PARAMETER,
        TypePurpose::ClassConstructor => PURPOSE_CLASS_CONSTRUCTOR,
        TypePurpose::ClassBaseType => PURPOSE_CLASS_BASE_TYPE,
        TypePurpose::ClassImplementations => PURPOSE_CLASS_IMPLEMENTATIONS,
        TypePurpose::ObjectClass => PURPOSE_OBJECT_CLASS,
        TypePurpose::TypeParameterList => PURPOSE_TYPE_PARAMETER_LIST,
        TypePurpose::TypeArgumentList => PURPOSE_TYPE_ARGUMENT_LIST,
        TypePurpose::ParameterValue => PURPOSE_PARAMETER_VALUE,
        TypePurpose::ParameterDefault => PURPOSE_PARAMETER_DEFAULT,
        TypePurpose::ParameterBaseConstraint => PURPOSE_PARAMETER_BASE_CONSTRAINT,
        TypePurpose::IndexInfo => PURPOSE_INDEX_INFO,
        TypePurpose::IndexParameterType => PURPOSE_INDEX_PARAMETER_TYPE,
        TypePurpose::IndexValueType => PURPOSE_INDEX_VALUE_TYPE,
        TypePurpose::ConditionalCheck => PURPOSE_CONDITIONAL_CHECK,
        TypePurpose::ConditionalExtends => PURPOSE_CONDITIONAL_EXTENDS,
        TypePurpose::ConditionalTrue => PURPOSE_CONDITIONAL_TRUE,
        TypePurpose::ConditionalFalse => PURPOSE_CONDITIONAL_FALSE,
        TypePurpose::Keyof => PURPOSE_KEYOF,
        TypePurpose::IndexedAccessBase => PURPOSE_INDEXED_ACCESS_BASE,
        TypePurpose::IndexedAccessIndex => PURPOSE_INDEXED_ACCESS_INDEX,
        TypePurpose::SubstitutionBase => PURPOSE_SUBSTITUTION_BASE,
        TypePurpose::SubstitutionSubstitute => PURPOSE_SUBSTITUTION_SUBSTITUTE,
        TypePurpose::StringMappingType => PURPOSE_STRING_MAPPING_TYPE,
        TypePurpose::TemplateLiteralText => PURPOSE_TEMPLATE_LITERAL_TEXT,
    }
}

pub fn purpose_text(purpose: TypePurpose) -> &'static str {
    purpose_message(purpose).template
}

/// Kind text of a concrete node, with literal values interpolated.
pub fn kind_text(kind: &TypeInfoKind) -> String {
    let template = kind_message(kind.type_kind()).template;
    match kind {
        TypeInfoKind::Primitive { primitive } => format_message(template, &[primitive.keyword()]),
        TypeInfoKind::StringLiteral { value } => format_message(template, &[value]),
        TypeInfoKind::NumberLiteral { value } => {
            format_message(template, &[&value.to_string()])
        }
        TypeInfoKind::BigintLiteral { value } => {
            format_message(template, &[&value.to_string()])
        }
        TypeInfoKind::BooleanLiteral { value } => {
            format_message(template, &[if *value { "true" } else { "false" }])
        }
        TypeInfoKind::EnumLiteral { value, .. } => {
            format_message(template, &[&value.to_string()])
        }
        TypeInfoKind::Intrinsic { name } => name.clone(),
        _ => template.to_string(),
    }
}

#[cfg(test)]
#[path = "../tests/messages_tests.rs"]
mod tests;
