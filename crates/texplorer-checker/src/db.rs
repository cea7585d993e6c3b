//! Query and synthesis seams between the type graph and its consumers.

use crate::types::{
    CheckFlags, Declaration, IndexInfo, ObjectFlags, ObjectMembers, Signature, Symbol, SymbolId,
    Type, TypeFlags, TypeId,
};
use texplorer_common::{Position, SymbolFlags};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignatureKind {
    Call,
    Construct,
}

/// Read-only access to a checked program's types and symbols.
///
/// Lookups return `Option` because the tree walker is defensive: a dangling
/// handle degrades to `unknown` instead of aborting the walk.
pub trait TypeDatabase {
    fn lookup(&self, id: TypeId) -> Option<&Type>;

    fn symbol(&self, id: SymbolId) -> Option<&Symbol>;

    fn type_flags(&self, id: TypeId) -> TypeFlags {
        self.lookup(id).map_or(TypeFlags::empty(), |ty| ty.flags)
    }

    fn object_flags(&self, id: TypeId) -> ObjectFlags {
        self.lookup(id)
            .map_or(ObjectFlags::empty(), |ty| ty.object_flags)
    }

    fn is_error_type(&self, id: TypeId) -> bool {
        id == TypeId::ERROR
    }

    /// `getTypeOfSymbol`: the resolved value type, or the error type.
    fn get_type_of_symbol(&self, symbol: SymbolId) -> TypeId;

    /// `getTypeOfSymbolAtLocation`.
    fn get_type_of_symbol_at_location(&self, symbol: SymbolId, declaration: &Declaration)
    -> TypeId;

    /// `getDeclaredTypeOfSymbol`: the type a class/interface/alias/enum
    /// symbol declares, or the error type.
    fn get_declared_type_of_symbol(&self, symbol: SymbolId) -> TypeId;

    fn get_properties_of_type(&self, id: TypeId) -> Vec<SymbolId>;

    fn get_signatures_of_type(&self, id: TypeId, kind: SignatureKind) -> &[Signature];

    fn get_index_infos_of_type(&self, id: TypeId) -> &[IndexInfo];

    fn get_type_arguments(&self, id: TypeId) -> &[TypeId];

    fn get_base_types(&self, id: TypeId) -> &[TypeId];

    fn get_implements_types(&self, id: TypeId) -> &[TypeId];

    fn get_base_constraint_of_type(&self, id: TypeId) -> Option<TypeId>;

    fn get_default_from_type_parameter(&self, id: TypeId) -> Option<TypeId>;

    fn is_array_type(&self, id: TypeId) -> bool;

    fn is_readonly_array_type(&self, id: TypeId) -> bool;

    fn is_tuple_type(&self, id: TypeId) -> bool;

    /// Whether a parameter is optional, from its check flags or from the
    /// syntax of its declaration.
    fn is_optional_parameter(&self, parameter: SymbolId) -> bool {
        let Some(symbol) = self.symbol(parameter) else {
            return false;
        };
        if symbol.check_flags.contains(CheckFlags::OPTIONAL_PARAMETER) {
            return true;
        }
        symbol
            .primary_declaration()
            .is_some_and(|decl| decl.question_token || decl.has_initializer)
    }

    fn is_rest_parameter(&self, parameter: SymbolId) -> bool {
        self.symbol(parameter).is_some_and(|symbol| {
            symbol.check_flags.contains(CheckFlags::REST_PARAMETER)
                || symbol
                    .primary_declaration()
                    .is_some_and(|decl| decl.dot_dot_dot_token)
        })
    }

    /// The innermost declared symbol whose name range contains `position`.
    fn symbol_at_position(&self, file_name: &str, position: Position) -> Option<SymbolId>;
}

/// The construction path the checker itself uses for new types.
///
/// There is no public "create a type" API in a TypeScript checker; this
/// trait isolates that escape hatch so the merger depends only on it.
pub trait TypeFactory: TypeDatabase {
    /// Allocate an object type with no members.
    fn new_object_type(&mut self, object_flags: ObjectFlags, symbol: Option<SymbolId>) -> TypeId;

    /// Fill in the members of an object type created by `new_object_type`.
    fn set_object_members(&mut self, id: TypeId, members: ObjectMembers);

    fn new_union_type(&mut self, types: Vec<TypeId>) -> TypeId;

    fn new_intersection_type(&mut self, types: Vec<TypeId>) -> TypeId;

    /// Allocate a transient property symbol of type `ty`. `flags` is merged
    /// with `PROPERTY | TRANSIENT`.
    fn new_property_symbol(
        &mut self,
        name: &str,
        flags: SymbolFlags,
        check_flags: CheckFlags,
        ty: TypeId,
        declarations: Vec<Declaration>,
    ) -> SymbolId;

    /// Shallow-copy a type record with its alias symbol removed. Returns `id`
    /// unchanged when the type has no alias. The original is never touched.
    fn clone_type_without_alias(&mut self, id: TypeId) -> TypeId;
}

/// Symbol flags given to every transient property symbol.
pub(crate) const TRANSIENT_PROPERTY_FLAGS: SymbolFlags =
    SymbolFlags::PROPERTY.union(SymbolFlags::TRANSIENT);
