//! Intersection merger.
//!
//! Reduces a set of types to one synthesized type with intersections merged
//! property by property:
//!
//! ```typescript
//! type A = { a: { x: string } } & { a: { y: number }; b: boolean };
//! // expands to
//! //   { a: { x: string; y: number; }; b: boolean; }
//! ```
//!
//! Unions distribute: `(A | B) & C` expands to `(A & C) | (B & C)`, each
//! member merged again. New types always go through [`TypeFactory`]; the
//! input types are never mutated.

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use texplorer_checker::{
    CheckFlags, Declaration, ObjectFlags, ObjectMembers, SignatureKind, SymbolFlags, SymbolId,
    TypeData, TypeFactory, TypeFlags, TypeId, type_to_string,
};
use texplorer_common::TreeConfig;
use tracing::{debug, trace};

use crate::walker::type_of_symbol;

/// Merge `ty` into a fully property-merged type.
pub fn recursively_expand_type<F>(factory: &mut F, ty: TypeId, config: &TreeConfig) -> TypeId
where
    F: TypeFactory + ?Sized,
{
    let mut merger = TypeMerger::new(factory, config.max_depth);
    let merged = merger.merge(&[ty]);
    debug!(%ty, %merged, synthesized = merger.seen.len(), "expanded type");
    merged
}

/// Merge `ty` and print the result.
pub fn expand_type_to_string<F: TypeFactory>(
    factory: &mut F,
    ty: TypeId,
    config: &TreeConfig,
) -> String {
    let merged = recursively_expand_type(factory, ty, config);
    type_to_string(&*factory, merged)
}

struct TypeMerger<'a, F: TypeFactory + ?Sized> {
    factory: &'a mut F,
    /// Original type to merged type, for singleton inputs.
    seen: FxHashMap<TypeId, TypeId>,
    depth: u32,
    max_depth: u32,
}

impl<'a, F: TypeFactory + ?Sized> TypeMerger<'a, F> {
    fn new(factory: &'a mut F, max_depth: u32) -> Self {
        TypeMerger {
            factory,
            seen: FxHashMap::default(),
            depth: 0,
            max_depth,
        }
    }

    fn merge(&mut self, types: &[TypeId]) -> TypeId {
        if let [single] = types {
            if let Some(&merged) = self.seen.get(single) {
                return merged;
            }
        }
        if self.depth >= self.max_depth {
            trace!(depth = self.depth, "merge depth reached");
            return match types {
                [single] => *single,
                _ => self.factory.new_intersection_type(types.to_vec()),
            };
        }

        self.depth += 1;
        let merged = self.merge_classified(types);
        self.depth -= 1;
        merged
    }

    fn merge_classified(&mut self, types: &[TypeId]) -> TypeId {
        let mut flattened = Vec::with_capacity(types.len());
        for &ty in types {
            self.flatten(ty, &mut flattened);
        }

        if let Some(index) = flattened
            .iter()
            .position(|&ty| self.is_distributable_union(ty))
        {
            let union = flattened.remove(index);
            let members = match self.factory.lookup(union).map(|record| &record.data) {
                Some(TypeData::Union { types }) => types.clone(),
                _ => Vec::new(),
            };
            return self.distribute(&flattened, index, &members, types);
        }

        let mut unique = FxHashSet::default();
        flattened.retain(|&ty| unique.insert(ty));
        let (objects, others): (Vec<TypeId>, Vec<TypeId>) = flattened
            .into_iter()
            .partition(|&ty| self.is_mergeable_object(ty));
        match (objects.is_empty(), others.as_slice()) {
            (true, [single]) => self.factory.clone_type_without_alias(*single),
            (true, []) => TypeId::UNKNOWN,
            (true, _) => self.factory.new_intersection_type(others),
            (false, []) => self.merge_objects(&objects, types),
            (false, _) => {
                let merged = self.merge_objects(&objects, types);
                let mut members = Vec::with_capacity(others.len() + 1);
                members.push(merged);
                members.extend(others);
                self.factory.new_intersection_type(members)
            }
        }
    }

    /// Replace intersections by their constituents, recursively.
    fn flatten(&self, ty: TypeId, out: &mut Vec<TypeId>) {
        match self.factory.lookup(ty).map(|record| &record.data) {
            Some(TypeData::Intersection { types }) => {
                for &member in types {
                    self.flatten(member, out);
                }
            }
            _ => out.push(ty),
        }
    }

    /// Unions other than `boolean` and enum types.
    fn is_distributable_union(&self, ty: TypeId) -> bool {
        let flags = self.factory.type_flags(ty);
        flags.contains(TypeFlags::UNION) && !flags.intersects(TypeFlags::BOOLEAN | TypeFlags::ENUM)
    }

    fn is_mergeable_object(&self, ty: TypeId) -> bool {
        let db = &*self.factory;
        db.type_flags(ty).contains(TypeFlags::OBJECT)
            && db.get_signatures_of_type(ty, SignatureKind::Call).is_empty()
            && !db.is_array_type(ty)
            && !db.is_tuple_type(ty)
    }

    /// `rest & (m1 | m2 | ...)` becomes `(rest & m1) | (rest & m2) | ...`,
    /// each member taking the union's position among the constituents.
    fn distribute(
        &mut self,
        rest: &[TypeId],
        position: usize,
        members: &[TypeId],
        key: &[TypeId],
    ) -> TypeId {
        let merged: Vec<TypeId> = members
            .iter()
            .map(|&member| {
                let mut constituents = rest.to_vec();
                constituents.insert(position, member);
                self.merge(&constituents)
            })
            .collect();
        let union = self.factory.new_union_type(merged);
        if let [original] = key {
            self.seen.insert(*original, union);
        }
        union
    }

    fn merge_objects(&mut self, objects: &[TypeId], key: &[TypeId]) -> TypeId {
        let merged = self.factory.new_object_type(ObjectFlags::ANONYMOUS, None);
        if let [single] = key {
            self.seen.insert(*single, merged);
        }

        let mut by_name: IndexMap<String, Vec<SymbolId>> = IndexMap::new();
        let mut call_signatures = Vec::new();
        let mut construct_signatures = Vec::new();
        let mut index_infos = Vec::new();
        {
            let db = &*self.factory;
            for &object in objects {
                for property in db.get_properties_of_type(object) {
                    if let Some(symbol) = db.symbol(property) {
                        by_name
                            .entry(symbol.name.clone())
                            .or_default()
                            .push(property);
                    }
                }
                call_signatures
                    .extend_from_slice(db.get_signatures_of_type(object, SignatureKind::Call));
                construct_signatures
                    .extend_from_slice(db.get_signatures_of_type(object, SignatureKind::Construct));
                index_infos.extend_from_slice(db.get_index_infos_of_type(object));
            }
        }

        let mut properties = Vec::with_capacity(by_name.len());
        for (name, symbols) in by_name {
            properties.push(self.merge_property(&name, &symbols));
        }

        self.factory.set_object_members(
            merged,
            ObjectMembers {
                properties,
                call_signatures,
                construct_signatures,
                index_infos,
            },
        );
        merged
    }

    /// One transient property for every constituent symbol named `name`.
    /// Optional only when optional everywhere; readonly when readonly
    /// anywhere.
    fn merge_property(&mut self, name: &str, symbols: &[SymbolId]) -> SymbolId {
        let mut types = Vec::with_capacity(symbols.len());
        let mut declarations: Vec<Declaration> = Vec::new();
        let mut optional = true;
        let mut readonly = false;
        {
            let db = &*self.factory;
            for &symbol in symbols {
                types.push(type_of_symbol(db, symbol));
                if let Some(sym) = db.symbol(symbol) {
                    optional &= sym.flags.contains(SymbolFlags::OPTIONAL);
                    readonly |= sym.check_flags.contains(CheckFlags::READONLY);
                    declarations.extend(sym.declarations.iter().cloned());
                }
            }
        }

        let ty = self.merge(&types);
        let flags = if optional {
            SymbolFlags::OPTIONAL
        } else {
            SymbolFlags::empty()
        };
        let mut check_flags = CheckFlags::SYNTHETIC_PROPERTY;
        if readonly {
            check_flags |= CheckFlags::READONLY;
        }
        self.factory
            .new_property_symbol(name, flags, check_flags, ty, declarations)
    }
}

#[cfg(test)]
#[path = "../tests/merge_tests.rs"]
mod tests;
