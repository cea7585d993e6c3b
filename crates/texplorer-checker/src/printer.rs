//! Render types as TypeScript syntax.
//!
//! The output follows `checker.typeToString` closely enough for display:
//! aliases print by name, object literals print their members inline,
//! functions print as arrow types.

use crate::db::{SignatureKind, TypeDatabase};
use crate::types::{
    CheckFlags, LiteralValue, ObjectFlags, Signature, SymbolId, TypeData, TypeFlags, TypeId,
};
use rustc_hash::FxHashSet;
use std::fmt::Write;
use texplorer_common::SymbolFlags;

/// Anonymous objects nested deeper than this print as `{ ... }`.
const MAX_PRINT_DEPTH: u32 = 8;

/// Render `id` as a TypeScript type.
pub fn type_to_string(db: &dyn TypeDatabase, id: TypeId) -> String {
    TypePrinter::new(db).print(id)
}

pub struct TypePrinter<'a> {
    db: &'a dyn TypeDatabase,
    /// Anonymous object types currently being printed.
    in_progress: FxHashSet<TypeId>,
    depth: u32,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Precedence {
    Top,
    /// Inside a union or intersection: function types need parentheses.
    Operand,
    /// Array element: unions, intersections and functions need parentheses.
    Postfix,
}

impl<'a> TypePrinter<'a> {
    pub fn new(db: &'a dyn TypeDatabase) -> Self {
        TypePrinter {
            db,
            in_progress: FxHashSet::default(),
            depth: 0,
        }
    }

    pub fn print(&mut self, id: TypeId) -> String {
        self.print_with(id, Precedence::Top)
    }

    fn symbol_name(&self, symbol: Option<SymbolId>) -> Option<String> {
        symbol
            .and_then(|symbol| self.db.symbol(symbol))
            .map(|symbol| symbol.name.clone())
    }

    fn print_list(&mut self, types: &[TypeId], separator: &str, precedence: Precedence) -> String {
        types
            .iter()
            .map(|&ty| self.print_with(ty, precedence))
            .collect::<Vec<_>>()
            .join(separator)
    }

    fn with_arguments(&mut self, name: String, arguments: &[TypeId]) -> String {
        if arguments.is_empty() {
            name
        } else {
            format!("{}<{}>", name, self.print_list(arguments, ", ", Precedence::Top))
        }
    }

    fn print_with(&mut self, id: TypeId, precedence: Precedence) -> String {
        let db = self.db;
        let Some(ty) = db.lookup(id) else {
            return "unknown".to_string();
        };

        if let Some(alias) = self.symbol_name(ty.alias_symbol) {
            let arguments = ty.alias_type_arguments.clone();
            return self.with_arguments(alias, &arguments);
        }

        let flags = ty.flags;
        if flags.contains(TypeFlags::BOOLEAN) {
            return "boolean".to_string();
        }
        if flags.contains(TypeFlags::ENUM_LITERAL) && !flags.contains(TypeFlags::UNION) {
            let member = ty.symbol.and_then(|symbol| db.symbol(symbol));
            if let Some(member) = member {
                let parent = self.symbol_name(member.parent);
                return match parent {
                    Some(parent) => format!("{}.{}", parent, member.name),
                    None => member.name.clone(),
                };
            }
        }
        if flags.contains(TypeFlags::ENUM) {
            if let Some(name) = self.symbol_name(ty.symbol) {
                return name;
            }
        }

        match &ty.data {
            TypeData::Intrinsic { name } => match name.as_str() {
                "error" => "any".to_string(),
                _ => name.clone(),
            },
            TypeData::Literal { value } => match value {
                LiteralValue::String(value) => format!("{:?}", value),
                LiteralValue::Number(value) => format!("{}", value),
                LiteralValue::BigInt(value) => format!("{}n", value),
                LiteralValue::Boolean(value) => value.to_string(),
            },
            TypeData::Union { types } => {
                let types = types.clone();
                let text = self.print_list(&types, " | ", Precedence::Operand);
                parenthesize(text, precedence != Precedence::Top)
            }
            TypeData::Intersection { types } => {
                let types = types.clone();
                let text = self.print_list(&types, " & ", Precedence::Operand);
                parenthesize(text, precedence != Precedence::Top)
            }
            TypeData::TypeParameter { .. } => {
                self.symbol_name(ty.symbol).unwrap_or_else(|| "T".to_string())
            }
            TypeData::Index { target } => {
                let target = *target;
                format!("keyof {}", self.print_with(target, Precedence::Postfix))
            }
            TypeData::IndexedAccess {
                object_type,
                index_type,
            } => {
                let (object_type, index_type) = (*object_type, *index_type);
                format!(
                    "{}[{}]",
                    self.print_with(object_type, Precedence::Postfix),
                    self.print(index_type)
                )
            }
            TypeData::Conditional {
                check_type,
                extends_type,
                true_type,
                false_type,
            } => {
                let (check, extends, when_true, when_false) =
                    (*check_type, *extends_type, *true_type, *false_type);
                let mut out = format!(
                    "{} extends {}",
                    self.print_with(check, Precedence::Operand),
                    self.print(extends)
                );
                let when_true =
                    when_true.map_or_else(|| "unknown".to_string(), |ty| self.print(ty));
                let when_false =
                    when_false.map_or_else(|| "unknown".to_string(), |ty| self.print(ty));
                let _ = write!(out, " ? {} : {}", when_true, when_false);
                parenthesize(out, precedence != Precedence::Top)
            }
            TypeData::Substitution { base_type, .. } => {
                let base_type = *base_type;
                self.print_with(base_type, precedence)
            }
            TypeData::TemplateLiteral { texts, types } => {
                let (texts, types) = (texts.clone(), types.clone());
                let mut out = String::from("`");
                for (index, text) in texts.iter().enumerate() {
                    out.push_str(text);
                    if let Some(&ty) = types.get(index) {
                        let _ = write!(out, "${{{}}}", self.print(ty));
                    }
                }
                out.push('`');
                out
            }
            TypeData::StringMapping { target } => {
                let target = *target;
                let name = self
                    .symbol_name(ty.symbol)
                    .unwrap_or_else(|| "Intrinsic".to_string());
                format!("{}<{}>", name, self.print(target))
            }
            TypeData::Object(_) => self.print_object(id, precedence),
        }
    }

    fn print_object(&mut self, id: TypeId, precedence: Precedence) -> String {
        let db = self.db;
        let object_flags = db.object_flags(id);
        let symbol = db.lookup(id).and_then(|ty| ty.symbol);
        let arguments = db.get_type_arguments(id).to_vec();

        if db.is_array_type(id) {
            let element = arguments.first().copied().unwrap_or(TypeId::UNKNOWN);
            let text = format!("{}[]", self.print_with(element, Precedence::Postfix));
            return if db.is_readonly_array_type(id) {
                format!("readonly {}", text)
            } else {
                text
            };
        }

        if db.is_tuple_type(id) {
            let shape = db
                .lookup(id)
                .and_then(|ty| ty.as_object())
                .and_then(|object| object.tuple.clone())
                .unwrap_or_default();
            let elements: Vec<String> = arguments
                .iter()
                .enumerate()
                .map(|(index, &element)| {
                    let text = self.print(element);
                    let optional = shape.min_length.is_some_and(|min| index >= min);
                    match shape.labels.as_ref().and_then(|labels| labels.get(index)) {
                        Some(label) if optional => format!("{}?: {}", label, text),
                        Some(label) => format!("{}: {}", label, text),
                        None if optional => format!("{}?", text),
                        None => text,
                    }
                })
                .collect();
            let text = format!("[{}]", elements.join(", "));
            return if shape.readonly {
                format!("readonly {}", text)
            } else {
                text
            };
        }

        if object_flags.intersects(ObjectFlags::CLASS_OR_INTERFACE | ObjectFlags::REFERENCE) {
            if let Some(name) = self.symbol_name(symbol) {
                return self.with_arguments(name, &arguments);
            }
        }

        // Constructor side of a class.
        let is_class_symbol = symbol
            .and_then(|symbol| db.symbol(symbol))
            .is_some_and(|symbol| symbol.flags.contains(SymbolFlags::CLASS));
        if is_class_symbol {
            if let Some(name) = self.symbol_name(symbol) {
                return format!("typeof {}", name);
            }
        }

        if self.depth >= MAX_PRINT_DEPTH || !self.in_progress.insert(id) {
            return "{ ... }".to_string();
        }
        self.depth += 1;
        let text = self.print_anonymous_object(id, precedence);
        self.depth -= 1;
        self.in_progress.remove(&id);
        text
    }

    fn print_anonymous_object(&mut self, id: TypeId, precedence: Precedence) -> String {
        let db = self.db;
        let properties = db.get_properties_of_type(id);
        let calls = db.get_signatures_of_type(id, SignatureKind::Call).to_vec();
        let constructs = db.get_signatures_of_type(id, SignatureKind::Construct).to_vec();
        let index_infos = db.get_index_infos_of_type(id).to_vec();

        if properties.is_empty() && index_infos.is_empty() && constructs.is_empty() {
            if let [signature] = calls.as_slice() {
                let text = format!(
                    "{} => {}",
                    self.print_parameters(signature),
                    self.print(signature.return_type)
                );
                return parenthesize(text, precedence != Precedence::Top);
            }
        }

        let mut members = Vec::new();
        for signature in &calls {
            members.push(format!(
                "{}: {}",
                self.print_parameters(signature),
                self.print(signature.return_type)
            ));
        }
        for signature in &constructs {
            members.push(format!(
                "new {}: {}",
                self.print_parameters(signature),
                self.print(signature.return_type)
            ));
        }
        for info in &index_infos {
            let key_name = self
                .symbol_name(info.parameter)
                .unwrap_or_else(|| "key".to_string());
            members.push(format!(
                "{}[{}: {}]: {}",
                if info.is_readonly { "readonly " } else { "" },
                key_name,
                self.print(info.key_type),
                self.print(info.value_type)
            ));
        }
        for property in properties {
            let Some(symbol) = db.symbol(property) else {
                continue;
            };
            let readonly = symbol.check_flags.contains(CheckFlags::READONLY);
            let optional = symbol.flags.contains(SymbolFlags::OPTIONAL);
            let name = symbol.name.clone();
            let ty = db.get_type_of_symbol(property);
            members.push(format!(
                "{}{}{}: {}",
                if readonly { "readonly " } else { "" },
                name,
                if optional { "?" } else { "" },
                self.print(ty)
            ));
        }

        if members.is_empty() {
            "{}".to_string()
        } else {
            format!("{{ {}; }}", members.join("; "))
        }
    }

    fn print_parameters(&mut self, signature: &Signature) -> String {
        let db = self.db;
        let parameters: Vec<String> = signature
            .parameters
            .iter()
            .map(|&parameter| {
                let name = self
                    .symbol_name(Some(parameter))
                    .unwrap_or_else(|| "arg".to_string());
                let rest = if db.is_rest_parameter(parameter) { "..." } else { "" };
                let optional = if db.is_optional_parameter(parameter) { "?" } else { "" };
                let ty = db.get_type_of_symbol(parameter);
                format!("{}{}{}: {}", rest, name, optional, self.print(ty))
            })
            .collect();
        format!("({})", parameters.join(", "))
    }
}

fn parenthesize(text: String, needed: bool) -> String {
    if needed { format!("({})", text) } else { text }
}

#[cfg(test)]
#[path = "../tests/printer_tests.rs"]
mod tests;
