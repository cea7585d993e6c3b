use super::*;
use texplorer_checker::{DeclarationKind, TypeDatabase, TypeStore};
use texplorer_common::SourceFileLocation;

fn expand(store: &mut TypeStore, ty: TypeId) -> String {
    expand_type_to_string(store, ty, &TreeConfig::default())
}

fn object_of(store: &mut TypeStore, members: &[(&str, TypeId)]) -> TypeId {
    let properties = members
        .iter()
        .map(|&(name, ty)| store.property(name, ty))
        .collect();
    store.object(properties)
}

fn property_type(store: &TypeStore, object: TypeId, name: &str) -> TypeId {
    let property = store
        .get_properties_of_type(object)
        .into_iter()
        .find(|&property| store.symbol(property).is_some_and(|symbol| symbol.name == name))
        .unwrap_or_else(|| panic!("no property {name}"));
    store.get_type_of_symbol(property)
}

#[test]
fn test_primitive_is_returned_as_is() {
    let mut store = TypeStore::new();
    let merged = recursively_expand_type(&mut store, TypeId::STRING, &TreeConfig::default());
    assert_eq!(merged, TypeId::STRING);
}

#[test]
fn test_aliased_union_loses_alias_but_original_keeps_it() {
    let mut store = TypeStore::new();
    let a = store.literal_string("a");
    let b = store.literal_string("b");
    let union = store.union(vec![a, b]);
    let aliased = store.type_alias("Letters", union, Vec::new());

    let merged = recursively_expand_type(&mut store, aliased, &TreeConfig::default());

    assert_ne!(merged, aliased);
    assert_eq!(type_to_string(&store, merged), r#""a" | "b""#);
    assert_eq!(type_to_string(&store, aliased), "Letters");
}

#[test]
fn test_disjoint_objects_merge_into_one() {
    let mut store = TypeStore::new();
    let left = object_of(&mut store, &[("a", TypeId::STRING)]);
    let right = object_of(&mut store, &[("b", TypeId::NUMBER)]);
    let both = store.intersection(vec![left, right]);

    assert_eq!(expand(&mut store, both), "{ a: string; b: number; }");
    assert_eq!(type_to_string(&store, both), "{ a: string; } & { b: number; }");
}

#[test]
fn test_overlapping_properties_merge_recursively() {
    let mut store = TypeStore::new();
    let x = object_of(&mut store, &[("x", TypeId::STRING)]);
    let y = object_of(&mut store, &[("y", TypeId::NUMBER)]);
    let left = object_of(&mut store, &[("a", x)]);
    let right = object_of(&mut store, &[("a", y)]);
    let both = store.intersection(vec![left, right]);

    assert_eq!(
        expand(&mut store, both),
        "{ a: { x: string; y: number; }; }"
    );
}

#[test]
fn test_same_typed_properties_merge_to_one_type() {
    let mut store = TypeStore::new();
    let left = object_of(&mut store, &[("a", TypeId::STRING)]);
    let right = object_of(&mut store, &[("a", TypeId::STRING)]);
    let both = store.intersection(vec![left, right]);

    let merged = recursively_expand_type(&mut store, both, &TreeConfig::default());

    assert_eq!(type_to_string(&store, merged), "{ a: string; }");
    assert_eq!(property_type(&store, merged, "a"), TypeId::STRING);
}

#[test]
fn test_repeated_non_object_constituent_appears_once() {
    let mut store = TypeStore::new();
    let object = object_of(&mut store, &[("a", TypeId::STRING)]);
    let inner = store.intersection(vec![object, TypeId::STRING]);
    let outer = store.intersection(vec![inner, TypeId::STRING]);

    assert_eq!(expand(&mut store, outer), "{ a: string; } & string");
}

#[test]
fn test_property_without_value_type_uses_declared_or_location_type() {
    let mut store = TypeStore::new();
    let declared = store.create_symbol("a", SymbolFlags::PROPERTY);
    store.symbol_mut(declared).unwrap().declared_type = Some(TypeId::NUMBER);
    let located = store.create_symbol("b", SymbolFlags::PROPERTY);
    let mut declaration = Declaration::new(
        DeclarationKind::PropertySignature,
        SourceFileLocation::at("main.ts", 3, 2),
    );
    declaration.type_at_location = Some(TypeId::BOOLEAN);
    store.declare(located, declaration);
    let left = store.object(vec![declared, located]);
    let right = object_of(&mut store, &[("c", TypeId::STRING)]);
    let both = store.intersection(vec![left, right]);

    assert_eq!(
        expand(&mut store, both),
        "{ a: number; b: boolean; c: string; }"
    );
}

#[test]
fn test_optional_only_when_optional_everywhere_and_readonly_when_anywhere() {
    let mut store = TypeStore::new();
    let a1 = store.optional_property("a", TypeId::STRING);
    let b1 = store.optional_property("b", TypeId::STRING);
    let c1 = store.readonly_property("c", TypeId::STRING);
    let left = store.object(vec![a1, b1, c1]);
    let a2 = store.property("a", TypeId::STRING);
    let b2 = store.optional_property("b", TypeId::STRING);
    let c2 = store.property("c", TypeId::STRING);
    let right = store.object(vec![a2, b2, c2]);
    let both = store.intersection(vec![left, right]);

    let merged = recursively_expand_type(&mut store, both, &TreeConfig::default());

    assert_eq!(
        type_to_string(&store, merged),
        "{ a: string; b?: string; readonly c: string; }"
    );
    for property in store.get_properties_of_type(merged) {
        let symbol = store.symbol(property).unwrap();
        assert!(symbol.flags.contains(SymbolFlags::TRANSIENT));
        assert!(symbol.check_flags.contains(CheckFlags::SYNTHETIC_PROPERTY));
    }
}

#[test]
fn test_non_object_constituents_stay_in_an_intersection() {
    let mut store = TypeStore::new();
    let object = object_of(&mut store, &[("a", TypeId::STRING)]);
    let branded = store.intersection(vec![object, TypeId::STRING]);

    assert_eq!(expand(&mut store, branded), "{ a: string; } & string");
}

#[test]
fn test_callable_objects_are_not_merged() {
    let mut store = TypeStore::new();
    let x = store.parameter("x", TypeId::NUMBER);
    let callable = store.function(vec![x], TypeId::VOID);
    let object = object_of(&mut store, &[("a", TypeId::STRING)]);
    let both = store.intersection(vec![callable, object]);

    assert_eq!(
        expand(&mut store, both),
        "{ a: string; } & ((x: number) => void)"
    );
}

#[test]
fn test_union_distributes_over_intersection() {
    let mut store = TypeStore::new();
    let a = object_of(&mut store, &[("a", TypeId::STRING)]);
    let b = object_of(&mut store, &[("b", TypeId::NUMBER)]);
    let c = object_of(&mut store, &[("c", TypeId::BOOLEAN)]);
    let either = store.union(vec![a, b]);
    let both = store.intersection(vec![either, c]);

    assert_eq!(
        expand(&mut store, both),
        "{ a: string; c: boolean; } | { b: number; c: boolean; }"
    );
}

#[test]
fn test_union_member_keeps_its_position() {
    let mut store = TypeStore::new();
    let a = object_of(&mut store, &[("a", TypeId::STRING)]);
    let b = object_of(&mut store, &[("b", TypeId::NUMBER)]);
    let c = object_of(&mut store, &[("c", TypeId::BOOLEAN)]);
    let either = store.union(vec![a, b]);
    let both = store.intersection(vec![c, either]);

    assert_eq!(
        expand(&mut store, both),
        "{ c: boolean; a: string; } | { c: boolean; b: number; }"
    );
}

#[test]
fn test_boolean_is_not_distributed() {
    let mut store = TypeStore::new();
    let object = object_of(&mut store, &[("flag", TypeId::BOOLEAN)]);
    let merged = recursively_expand_type(&mut store, object, &TreeConfig::default());

    assert_eq!(property_type(&store, merged, "flag"), TypeId::BOOLEAN);
}

#[test]
fn test_recursive_intersection_terminates_and_closes_the_cycle() {
    let mut store = TypeStore::new();
    // type Node = { next: Node } & { value: string }
    let head = store.object(Vec::new());
    let tail = object_of(&mut store, &[("value", TypeId::STRING)]);
    let node = store.intersection(vec![head, tail]);
    let next = store.property("next", node);
    store.set_object_members(
        head,
        ObjectMembers {
            properties: vec![next],
            ..Default::default()
        },
    );

    let merged = recursively_expand_type(&mut store, node, &TreeConfig::default());

    assert_eq!(property_type(&store, merged, "next"), merged);
    assert_eq!(property_type(&store, merged, "value"), TypeId::STRING);
}

#[test]
fn test_depth_bound_leaves_deeper_types_unmerged() {
    let mut store = TypeStore::new();
    let inner = object_of(&mut store, &[("x", TypeId::STRING)]);
    let outer = object_of(&mut store, &[("inner", inner)]);
    let config = TreeConfig::default().with_max_depth(1);

    let merged = recursively_expand_type(&mut store, outer, &config);

    assert_ne!(merged, outer);
    assert_eq!(property_type(&store, merged, "inner"), inner);
}

#[test]
fn test_index_infos_are_concatenated() {
    let mut store = TypeStore::new();
    let left = store.object_with_index(Vec::new(), TypeId::STRING, TypeId::NUMBER);
    let right = store.object_with_index(Vec::new(), TypeId::NUMBER, TypeId::STRING);
    let both = store.intersection(vec![left, right]);

    let merged = recursively_expand_type(&mut store, both, &TreeConfig::default());

    let infos = store.get_index_infos_of_type(merged);
    assert_eq!(infos.len(), 2);
    assert_eq!(infos[0].key_type, TypeId::STRING);
    assert_eq!(infos[1].key_type, TypeId::NUMBER);
}
