//! Arena-backed type store.
//!
//! Types and symbols live in two vectors indexed by [`TypeId`] and
//! [`SymbolId`]. Intrinsic types occupy fixed slots so that well-known
//! constants like `TypeId::STRING` are valid in every store; the global
//! `Array` and `ReadonlyArray` interfaces are registered right after them.

use crate::db::{SignatureKind, TRANSIENT_PROPERTY_FLAGS, TypeDatabase, TypeFactory};
use crate::types::{
    CheckFlags, Declaration, DeclarationKind, IndexInfo, LiteralValue, ObjectFlags,
    ObjectMembers, ObjectType, Signature, Symbol, SymbolId, TupleShape, Type, TypeData,
    TypeFlags, TypeId,
};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use texplorer_common::{EnumValue, Position, PseudoBigInt, SourceFileLocation, SymbolFlags};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeStore {
    pub(crate) types: Vec<Type>,
    pub(crate) symbols: Vec<Symbol>,
    pub(crate) global_array: TypeId,
    pub(crate) global_readonly_array: TypeId,
}

impl Default for TypeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeStore {
    pub fn new() -> Self {
        let mut store = TypeStore {
            types: Vec::new(),
            symbols: Vec::new(),
            global_array: TypeId::ANY,
            global_readonly_array: TypeId::ANY,
        };
        store.register_intrinsics();
        store.global_array = store.register_global_array("Array");
        store.global_readonly_array = store.register_global_array("ReadonlyArray");
        store
    }

    // Order must match the `TypeId` constants.
    fn register_intrinsics(&mut self) {
        let intrinsics = [
            (TypeFlags::ANY, "any"),
            (TypeFlags::UNKNOWN, "unknown"),
            (TypeFlags::ANY, "error"),
            (TypeFlags::STRING, "string"),
            (TypeFlags::NUMBER, "number"),
            (TypeFlags::BIG_INT, "bigint"),
            (TypeFlags::ES_SYMBOL, "symbol"),
            (TypeFlags::VOID, "void"),
            (TypeFlags::UNDEFINED, "undefined"),
            (TypeFlags::NULL, "null"),
            (TypeFlags::NEVER, "never"),
            (TypeFlags::NON_PRIMITIVE, "object"),
        ];
        for (flags, name) in intrinsics {
            self.types.push(Type::intrinsic(flags, name));
        }
        for value in [false, true] {
            self.types.push(Type::new(
                TypeFlags::BOOLEAN_LITERAL,
                TypeData::Literal {
                    value: LiteralValue::Boolean(value),
                },
            ));
        }
        self.types.push(Type::new(
            TypeFlags::BOOLEAN | TypeFlags::UNION,
            TypeData::Union {
                types: vec![TypeId::FALSE, TypeId::TRUE],
            },
        ));
        self.types.push(Type::intrinsic(TypeFlags::ANY, "intrinsic"));
        debug_assert_eq!(self.types.len() as u32, TypeId::INTRINSIC_COUNT);
    }

    fn register_global_array(&mut self, name: &str) -> TypeId {
        let element = self.type_parameter("T", None, None);
        let symbol = self.create_symbol(name, SymbolFlags::INTERFACE);
        let length = self.property("length", TypeId::NUMBER);
        let target = self.add_type(Type {
            flags: TypeFlags::OBJECT,
            object_flags: ObjectFlags::INTERFACE | ObjectFlags::REFERENCE,
            symbol: Some(symbol),
            alias_symbol: None,
            alias_type_arguments: Vec::new(),
            data: TypeData::Object(ObjectType {
                properties: vec![length],
                type_parameters: vec![element],
                ..Default::default()
            }),
        });
        if let Some(sym) = self.symbol_mut(symbol) {
            sym.declared_type = Some(target);
            sym.type_parameters = vec![element];
        }
        target
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn add_type(&mut self, ty: Type) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(ty);
        id
    }

    pub fn add_symbol(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(symbol);
        id
    }

    /// Mutable access for fixtures that need to tie a knot (a type whose
    /// property refers back to the type itself).
    pub fn type_mut(&mut self, id: TypeId) -> Option<&mut Type> {
        self.types.get_mut(id.index())
    }

    pub fn symbol_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.symbols.get_mut(id.index())
    }

    pub fn global_array_type(&self) -> TypeId {
        self.global_array
    }

    pub fn global_readonly_array_type(&self) -> TypeId {
        self.global_readonly_array
    }

    // =========================================================================
    // Builders
    // =========================================================================

    pub fn create_symbol(&mut self, name: &str, flags: SymbolFlags) -> SymbolId {
        self.add_symbol(Symbol::new(name, flags))
    }

    /// Attach a declaration. The first value-like declaration becomes the
    /// symbol's value declaration.
    pub fn declare(&mut self, symbol: SymbolId, declaration: Declaration) {
        let Some(sym) = self.symbol_mut(symbol) else {
            return;
        };
        let is_value = !matches!(
            declaration.kind,
            DeclarationKind::Interface | DeclarationKind::TypeAlias | DeclarationKind::TypeParameter
        );
        sym.declarations.push(declaration);
        if is_value && sym.value_declaration.is_none() {
            sym.value_declaration = Some(sym.declarations.len() - 1);
        }
    }

    pub fn set_symbol_type(&mut self, symbol: SymbolId, ty: TypeId) {
        if let Some(sym) = self.symbol_mut(symbol) {
            sym.value_type = Some(ty);
        }
    }

    /// A `const`/`let` variable declared at `location`.
    pub fn variable(&mut self, name: &str, ty: TypeId, location: SourceFileLocation) -> SymbolId {
        let symbol = self.create_symbol(name, SymbolFlags::BLOCK_SCOPED_VARIABLE);
        let mut declaration = Declaration::new(DeclarationKind::Variable, location);
        declaration.type_at_location = Some(ty);
        self.declare(symbol, declaration);
        self.set_symbol_type(symbol, ty);
        symbol
    }

    pub fn property(&mut self, name: &str, ty: TypeId) -> SymbolId {
        let symbol = self.create_symbol(name, SymbolFlags::PROPERTY);
        self.set_symbol_type(symbol, ty);
        symbol
    }

    pub fn optional_property(&mut self, name: &str, ty: TypeId) -> SymbolId {
        let symbol = self.create_symbol(name, SymbolFlags::PROPERTY | SymbolFlags::OPTIONAL);
        self.set_symbol_type(symbol, ty);
        symbol
    }

    pub fn readonly_property(&mut self, name: &str, ty: TypeId) -> SymbolId {
        let symbol = self.property(name, ty);
        if let Some(sym) = self.symbol_mut(symbol) {
            sym.check_flags |= CheckFlags::READONLY;
        }
        symbol
    }

    pub fn parameter(&mut self, name: &str, ty: TypeId) -> SymbolId {
        let symbol = self.create_symbol(name, SymbolFlags::FUNCTION_SCOPED_VARIABLE);
        self.set_symbol_type(symbol, ty);
        symbol
    }

    pub fn literal_string(&mut self, value: &str) -> TypeId {
        self.add_type(Type::new(
            TypeFlags::STRING_LITERAL,
            TypeData::Literal {
                value: LiteralValue::String(value.to_string()),
            },
        ))
    }

    pub fn literal_number(&mut self, value: f64) -> TypeId {
        self.add_type(Type::new(
            TypeFlags::NUMBER_LITERAL,
            TypeData::Literal {
                value: LiteralValue::Number(value),
            },
        ))
    }

    pub fn literal_bigint(&mut self, negative: bool, base10_value: &str) -> TypeId {
        self.add_type(Type::new(
            TypeFlags::BIG_INT_LITERAL,
            TypeData::Literal {
                value: LiteralValue::BigInt(PseudoBigInt {
                    negative,
                    base10_value: base10_value.to_string(),
                }),
            },
        ))
    }

    pub fn unique_symbol(&mut self, symbol: SymbolId) -> TypeId {
        let mut ty = Type::intrinsic(TypeFlags::UNIQUE_ES_SYMBOL, "unique symbol");
        ty.symbol = Some(symbol);
        self.add_type(ty)
    }

    /// An anonymous object literal type.
    pub fn object(&mut self, properties: Vec<SymbolId>) -> TypeId {
        let symbol = self.create_symbol("__object", SymbolFlags::OBJECT_LITERAL);
        let id = self.new_object_type(ObjectFlags::ANONYMOUS | ObjectFlags::OBJECT_LITERAL, Some(symbol));
        self.set_object_members(
            id,
            ObjectMembers {
                properties,
                ..Default::default()
            },
        );
        id
    }

    /// An anonymous object with an index signature `[key: K]: V`.
    pub fn object_with_index(
        &mut self,
        properties: Vec<SymbolId>,
        key_type: TypeId,
        value_type: TypeId,
    ) -> TypeId {
        let id = self.object(properties);
        let parameter = self.parameter("key", key_type);
        if let Some(TypeData::Object(object)) = self.type_mut(id).map(|ty| &mut ty.data) {
            object.index_infos.push(IndexInfo {
                key_type,
                value_type,
                is_readonly: false,
                parameter: Some(parameter),
            });
        }
        id
    }

    pub fn union(&mut self, types: Vec<TypeId>) -> TypeId {
        self.new_union_type(types)
    }

    pub fn intersection(&mut self, types: Vec<TypeId>) -> TypeId {
        self.new_intersection_type(types)
    }

    fn reference_to(&mut self, target: TypeId, type_arguments: Vec<TypeId>) -> TypeId {
        let symbol = self.lookup(target).and_then(|ty| ty.symbol);
        self.add_type(Type {
            flags: TypeFlags::OBJECT,
            object_flags: ObjectFlags::REFERENCE,
            symbol,
            alias_symbol: None,
            alias_type_arguments: Vec::new(),
            data: TypeData::Object(ObjectType {
                target: Some(target),
                type_arguments,
                ..Default::default()
            }),
        })
    }

    pub fn array_of(&mut self, element: TypeId) -> TypeId {
        self.reference_to(self.global_array, vec![element])
    }

    pub fn readonly_array_of(&mut self, element: TypeId) -> TypeId {
        self.reference_to(self.global_readonly_array, vec![element])
    }

    /// Instantiate a generic class or interface with `type_arguments`.
    pub fn instantiate(&mut self, target: TypeId, type_arguments: Vec<TypeId>) -> TypeId {
        self.reference_to(target, type_arguments)
    }

    pub fn tuple(
        &mut self,
        elements: Vec<TypeId>,
        labels: Option<Vec<String>>,
        readonly: bool,
    ) -> TypeId {
        self.tuple_with_shape(
            elements,
            TupleShape {
                labels,
                readonly,
                min_length: None,
            },
        )
    }

    /// A tuple whose elements from `min_length` on are optional.
    pub fn tuple_with_optional(&mut self, elements: Vec<TypeId>, min_length: usize) -> TypeId {
        self.tuple_with_shape(
            elements,
            TupleShape {
                min_length: Some(min_length),
                ..Default::default()
            },
        )
    }

    fn tuple_with_shape(&mut self, elements: Vec<TypeId>, shape: TupleShape) -> TypeId {
        self.add_type(Type {
            flags: TypeFlags::OBJECT,
            object_flags: ObjectFlags::REFERENCE | ObjectFlags::TUPLE,
            symbol: None,
            alias_symbol: None,
            alias_type_arguments: Vec::new(),
            data: TypeData::Object(ObjectType {
                type_arguments: elements,
                tuple: Some(shape),
                ..Default::default()
            }),
        })
    }

    pub fn signature(&self, parameters: Vec<SymbolId>, return_type: TypeId) -> Signature {
        let min_argument_count = parameters
            .iter()
            .take_while(|&&param| !self.is_optional_parameter(param) && !self.is_rest_parameter(param))
            .count() as u32;
        Signature {
            symbol: None,
            type_parameters: Vec::new(),
            parameters,
            return_type,
            min_argument_count,
        }
    }

    /// An anonymous function type with one call signature.
    pub fn function(&mut self, parameters: Vec<SymbolId>, return_type: TypeId) -> TypeId {
        let signature = self.signature(parameters, return_type);
        self.function_with_signatures(vec![signature])
    }

    pub fn function_with_signatures(&mut self, signatures: Vec<Signature>) -> TypeId {
        let symbol = self.create_symbol("__function", SymbolFlags::FUNCTION);
        let id = self.new_object_type(ObjectFlags::ANONYMOUS, Some(symbol));
        if let Some(sym) = self.symbol_mut(symbol) {
            sym.value_type = Some(id);
        }
        self.set_object_members(
            id,
            ObjectMembers {
                call_signatures: signatures,
                ..Default::default()
            },
        );
        id
    }

    /// A named function declaration: the symbol, its declaration and its type.
    pub fn function_declaration(
        &mut self,
        name: &str,
        parameters: Vec<SymbolId>,
        return_type: TypeId,
        location: SourceFileLocation,
    ) -> SymbolId {
        let symbol = self.create_symbol(name, SymbolFlags::FUNCTION);
        let mut signature = self.signature(parameters, return_type);
        signature.symbol = Some(symbol);
        let ty = self.new_object_type(ObjectFlags::ANONYMOUS, Some(symbol));
        self.set_object_members(
            ty,
            ObjectMembers {
                call_signatures: vec![signature],
                ..Default::default()
            },
        );
        let mut declaration = Declaration::new(DeclarationKind::Function, location);
        declaration.type_at_location = Some(ty);
        self.declare(symbol, declaration);
        self.set_symbol_type(symbol, ty);
        symbol
    }

    pub fn type_parameter(
        &mut self,
        name: &str,
        constraint: Option<TypeId>,
        default: Option<TypeId>,
    ) -> TypeId {
        let symbol = self.create_symbol(name, SymbolFlags::TYPE_PARAMETER);
        let mut ty = Type::new(
            TypeFlags::TYPE_PARAMETER,
            TypeData::TypeParameter { constraint, default },
        );
        ty.symbol = Some(symbol);
        let id = self.add_type(ty);
        if let Some(sym) = self.symbol_mut(symbol) {
            sym.declared_type = Some(id);
        }
        id
    }

    /// Declare an interface and return its (instance) type.
    pub fn interface(
        &mut self,
        name: &str,
        properties: Vec<SymbolId>,
        base_types: Vec<TypeId>,
    ) -> TypeId {
        let symbol = self.create_symbol(name, SymbolFlags::INTERFACE);
        let id = self.new_object_type(ObjectFlags::INTERFACE, Some(symbol));
        self.set_object_members(
            id,
            ObjectMembers {
                properties,
                ..Default::default()
            },
        );
        if let Some(TypeData::Object(object)) = self.type_mut(id).map(|ty| &mut ty.data) {
            object.base_types = base_types;
        }
        if let Some(sym) = self.symbol_mut(symbol) {
            sym.declared_type = Some(id);
        }
        id
    }

    /// Declare a class and return its instance type. The class symbol's
    /// value type is the constructor side: an anonymous object carrying a
    /// construct signature that returns the instance type.
    pub fn class(
        &mut self,
        name: &str,
        properties: Vec<SymbolId>,
        constructor_parameters: Vec<SymbolId>,
        base_type: Option<TypeId>,
        implements_types: Vec<TypeId>,
    ) -> TypeId {
        let symbol = self.create_symbol(name, SymbolFlags::CLASS);
        let instance = self.new_object_type(ObjectFlags::CLASS, Some(symbol));
        self.set_object_members(
            instance,
            ObjectMembers {
                properties,
                ..Default::default()
            },
        );
        if let Some(TypeData::Object(object)) = self.type_mut(instance).map(|ty| &mut ty.data) {
            object.base_types = base_type.into_iter().collect();
            object.implements_types = implements_types;
        }

        let mut construct = self.signature(constructor_parameters, instance);
        construct.symbol = Some(symbol);
        let constructor = self.new_object_type(ObjectFlags::ANONYMOUS, Some(symbol));
        self.set_object_members(
            constructor,
            ObjectMembers {
                construct_signatures: vec![construct],
                ..Default::default()
            },
        );

        if let Some(sym) = self.symbol_mut(symbol) {
            sym.declared_type = Some(instance);
            sym.value_type = Some(constructor);
        }
        instance
    }

    /// Declare an enum. Returns the enum type, a union of member literal
    /// types flagged `ENUM | UNION`.
    pub fn enum_type(&mut self, name: &str, members: &[(&str, EnumValue)]) -> TypeId {
        let symbol = self.create_symbol(name, SymbolFlags::REGULAR_ENUM);
        let mut member_types = Vec::with_capacity(members.len());
        for (member_name, value) in members {
            let member_symbol = self.create_symbol(member_name, SymbolFlags::ENUM_MEMBER);
            if let Some(sym) = self.symbol_mut(member_symbol) {
                sym.parent = Some(symbol);
            }
            let (literal_flag, literal) = match value {
                EnumValue::Number(value) => (TypeFlags::NUMBER_LITERAL, LiteralValue::Number(*value)),
                EnumValue::String(value) => {
                    (TypeFlags::STRING_LITERAL, LiteralValue::String(value.clone()))
                }
            };
            let mut ty = Type::new(
                TypeFlags::ENUM_LITERAL | literal_flag,
                TypeData::Literal { value: literal },
            );
            ty.symbol = Some(member_symbol);
            let member_type = self.add_type(ty);
            self.set_symbol_type(member_symbol, member_type);
            if let Some(sym) = self.symbol_mut(member_symbol) {
                sym.declared_type = Some(member_type);
            }
            member_types.push(member_type);
        }
        let mut ty = Type::new(
            TypeFlags::ENUM | TypeFlags::UNION,
            TypeData::Union {
                types: member_types,
            },
        );
        ty.symbol = Some(symbol);
        let id = self.add_type(ty);
        if let Some(sym) = self.symbol_mut(symbol) {
            sym.declared_type = Some(id);
        }
        id
    }

    /// Give `ty` a type alias name. Returns `ty`.
    pub fn type_alias(&mut self, name: &str, ty: TypeId, type_parameters: Vec<TypeId>) -> TypeId {
        let symbol = self.create_symbol(name, SymbolFlags::TYPE_ALIAS);
        if let Some(sym) = self.symbol_mut(symbol) {
            sym.declared_type = Some(ty);
            sym.type_parameters = type_parameters;
        }
        if let Some(record) = self.type_mut(ty) {
            record.alias_symbol = Some(symbol);
        }
        ty
    }

    pub fn keyof(&mut self, target: TypeId) -> TypeId {
        self.add_type(Type::new(TypeFlags::INDEX, TypeData::Index { target }))
    }

    pub fn indexed_access(&mut self, object_type: TypeId, index_type: TypeId) -> TypeId {
        self.add_type(Type::new(
            TypeFlags::INDEXED_ACCESS,
            TypeData::IndexedAccess {
                object_type,
                index_type,
            },
        ))
    }

    pub fn conditional(
        &mut self,
        check_type: TypeId,
        extends_type: TypeId,
        true_type: Option<TypeId>,
        false_type: Option<TypeId>,
    ) -> TypeId {
        self.add_type(Type::new(
            TypeFlags::CONDITIONAL,
            TypeData::Conditional {
                check_type,
                extends_type,
                true_type,
                false_type,
            },
        ))
    }

    pub fn substitution(&mut self, base_type: TypeId, constraint: TypeId) -> TypeId {
        self.add_type(Type::new(
            TypeFlags::SUBSTITUTION,
            TypeData::Substitution {
                base_type,
                constraint,
            },
        ))
    }

    /// `texts` has one more entry than `types`.
    pub fn template_literal(&mut self, texts: Vec<String>, types: Vec<TypeId>) -> TypeId {
        self.add_type(Type::new(
            TypeFlags::TEMPLATE_LITERAL,
            TypeData::TemplateLiteral { texts, types },
        ))
    }

    /// `Uppercase<T>` and friends.
    pub fn string_mapping(&mut self, name: &str, target: TypeId) -> TypeId {
        let symbol = self.create_symbol(name, SymbolFlags::TYPE_ALIAS);
        let mut ty = Type::new(TypeFlags::STRING_MAPPING, TypeData::StringMapping { target });
        ty.symbol = Some(symbol);
        self.add_type(ty)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn object_of(&self, id: TypeId) -> Option<&ObjectType> {
        self.lookup(id).and_then(Type::as_object)
    }

    /// The object holding structural members: the generic target for
    /// references, the type itself otherwise.
    fn resolved_object(&self, id: TypeId) -> Option<&ObjectType> {
        let object = self.object_of(id)?;
        match object.target {
            Some(target) if target != id => self.object_of(target).or(Some(object)),
            _ => Some(object),
        }
    }

    fn symbol_name(&self, id: SymbolId) -> Option<&str> {
        self.symbol(id).map(|sym| sym.name.as_str())
    }

    fn collect_properties(&self, id: TypeId, seen: &mut FxHashSet<TypeId>, out: &mut Vec<SymbolId>) {
        if !seen.insert(id) {
            return;
        }
        let Some(ty) = self.lookup(id) else {
            return;
        };
        let push_unique = |out: &mut Vec<SymbolId>, candidate: SymbolId, store: &TypeStore| {
            let name = store.symbol_name(candidate);
            if !out.iter().any(|&existing| store.symbol_name(existing) == name) {
                out.push(candidate);
            }
        };
        match &ty.data {
            TypeData::Object(_) => {
                if let Some(object) = self.resolved_object(id) {
                    for &property in &object.properties {
                        push_unique(out, property, self);
                    }
                    for &base in &object.base_types {
                        self.collect_properties(base, seen, out);
                    }
                }
            }
            TypeData::Intersection { types } => {
                for &member in types {
                    self.collect_properties(member, seen, out);
                }
            }
            TypeData::Union { types } => {
                // Only properties present in every member.
                let mut per_member = types.iter().map(|&member| {
                    let mut props = Vec::new();
                    self.collect_properties(member, &mut seen.clone(), &mut props);
                    props
                });
                let Some(first) = per_member.next() else {
                    return;
                };
                let rest: Vec<Vec<SymbolId>> = per_member.collect();
                for property in first {
                    let name = self.symbol_name(property);
                    let everywhere = rest.iter().all(|props| {
                        props.iter().any(|&other| self.symbol_name(other) == name)
                    });
                    if everywhere {
                        push_unique(out, property, self);
                    }
                }
            }
            _ => {}
        }
    }
}

impl TypeDatabase for TypeStore {
    fn lookup(&self, id: TypeId) -> Option<&Type> {
        self.types.get(id.index())
    }

    fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.index())
    }

    fn get_type_of_symbol(&self, symbol: SymbolId) -> TypeId {
        self.symbol(symbol)
            .and_then(|sym| sym.value_type)
            .unwrap_or(TypeId::ERROR)
    }

    fn get_type_of_symbol_at_location(&self, symbol: SymbolId, declaration: &Declaration) -> TypeId {
        declaration
            .type_at_location
            .or_else(|| self.symbol(symbol).and_then(|sym| sym.value_type))
            .unwrap_or(TypeId::ERROR)
    }

    fn get_declared_type_of_symbol(&self, symbol: SymbolId) -> TypeId {
        self.symbol(symbol)
            .and_then(|sym| sym.declared_type)
            .unwrap_or(TypeId::ERROR)
    }

    fn get_properties_of_type(&self, id: TypeId) -> Vec<SymbolId> {
        let mut out = Vec::new();
        self.collect_properties(id, &mut FxHashSet::default(), &mut out);
        out
    }

    fn get_signatures_of_type(&self, id: TypeId, kind: SignatureKind) -> &[Signature] {
        match self.resolved_object(id) {
            Some(object) => match kind {
                SignatureKind::Call => &object.call_signatures,
                SignatureKind::Construct => &object.construct_signatures,
            },
            None => &[],
        }
    }

    fn get_index_infos_of_type(&self, id: TypeId) -> &[IndexInfo] {
        self.resolved_object(id)
            .map_or(&[], |object| object.index_infos.as_slice())
    }

    fn get_type_arguments(&self, id: TypeId) -> &[TypeId] {
        self.object_of(id)
            .map_or(&[], |object| object.type_arguments.as_slice())
    }

    fn get_base_types(&self, id: TypeId) -> &[TypeId] {
        self.resolved_object(id)
            .map_or(&[], |object| object.base_types.as_slice())
    }

    fn get_implements_types(&self, id: TypeId) -> &[TypeId] {
        self.resolved_object(id)
            .map_or(&[], |object| object.implements_types.as_slice())
    }

    fn get_base_constraint_of_type(&self, id: TypeId) -> Option<TypeId> {
        match self.lookup(id)?.data {
            TypeData::TypeParameter { constraint, .. } => constraint,
            _ => None,
        }
    }

    fn get_default_from_type_parameter(&self, id: TypeId) -> Option<TypeId> {
        match self.lookup(id)?.data {
            TypeData::TypeParameter { default, .. } => default,
            _ => None,
        }
    }

    fn is_array_type(&self, id: TypeId) -> bool {
        self.object_of(id).is_some_and(|object| {
            object.target == Some(self.global_array)
                || object.target == Some(self.global_readonly_array)
        })
    }

    fn is_readonly_array_type(&self, id: TypeId) -> bool {
        self.object_of(id)
            .is_some_and(|object| object.target == Some(self.global_readonly_array))
    }

    fn is_tuple_type(&self, id: TypeId) -> bool {
        self.object_flags(id).contains(ObjectFlags::TUPLE)
    }

    fn symbol_at_position(&self, file_name: &str, position: Position) -> Option<SymbolId> {
        let mut best: Option<(SymbolId, texplorer_common::Range)> = None;
        for (index, symbol) in self.symbols.iter().enumerate() {
            for declaration in &symbol.declarations {
                let location = &declaration.location;
                if location.file_name != file_name || !location.range.contains(position) {
                    continue;
                }
                let innermost = match &best {
                    Some((_, range)) => range.encloses(&location.range) && *range != location.range,
                    None => true,
                };
                if innermost {
                    best = Some((SymbolId(index as u32), location.range));
                }
            }
        }
        best.map(|(symbol, _)| symbol)
    }
}

impl TypeFactory for TypeStore {
    fn new_object_type(&mut self, object_flags: ObjectFlags, symbol: Option<SymbolId>) -> TypeId {
        self.add_type(Type {
            flags: TypeFlags::OBJECT,
            object_flags,
            symbol,
            alias_symbol: None,
            alias_type_arguments: Vec::new(),
            data: TypeData::Object(ObjectType::default()),
        })
    }

    fn set_object_members(&mut self, id: TypeId, members: ObjectMembers) {
        if let Some(TypeData::Object(object)) = self.type_mut(id).map(|ty| &mut ty.data) {
            object.properties = members.properties;
            object.call_signatures = members.call_signatures;
            object.construct_signatures = members.construct_signatures;
            object.index_infos = members.index_infos;
        }
    }

    fn new_union_type(&mut self, types: Vec<TypeId>) -> TypeId {
        let mut unique = Vec::with_capacity(types.len());
        for ty in types {
            if !unique.contains(&ty) {
                unique.push(ty);
            }
        }
        if let [single] = unique.as_slice() {
            return *single;
        }
        self.add_type(Type::new(TypeFlags::UNION, TypeData::Union { types: unique }))
    }

    fn new_intersection_type(&mut self, types: Vec<TypeId>) -> TypeId {
        let mut unique = Vec::with_capacity(types.len());
        for ty in types {
            if !unique.contains(&ty) {
                unique.push(ty);
            }
        }
        if let [single] = unique.as_slice() {
            return *single;
        }
        self.add_type(Type::new(
            TypeFlags::INTERSECTION,
            TypeData::Intersection { types: unique },
        ))
    }

    fn new_property_symbol(
        &mut self,
        name: &str,
        flags: SymbolFlags,
        check_flags: CheckFlags,
        ty: TypeId,
        declarations: Vec<Declaration>,
    ) -> SymbolId {
        let mut symbol = Symbol::new(name, flags | TRANSIENT_PROPERTY_FLAGS);
        symbol.check_flags = check_flags;
        symbol.value_declaration = (!declarations.is_empty()).then_some(0);
        symbol.declarations = declarations;
        symbol.value_type = Some(ty);
        self.add_symbol(symbol)
    }

    fn clone_type_without_alias(&mut self, id: TypeId) -> TypeId {
        let Some(original) = self.lookup(id) else {
            return id;
        };
        if original.alias_symbol.is_none() {
            return id;
        }
        let mut clone = original.clone();
        clone.alias_symbol = None;
        clone.alias_type_arguments.clear();
        self.add_type(clone)
    }
}

#[cfg(test)]
#[path = "../tests/store_tests.rs"]
mod tests;
