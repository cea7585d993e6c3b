use super::*;
use texplorer_common::Range;

fn location(line: u32, start: u32, end: u32) -> SourceFileLocation {
    SourceFileLocation::new(
        "main.ts",
        Range::new(Position::new(line, start), Position::new(line, end)),
    )
}

#[test]
fn test_intrinsics_occupy_well_known_slots() {
    let store = TypeStore::new();

    assert_eq!(store.lookup(TypeId::STRING).and_then(Type::intrinsic_name), Some("string"));
    assert_eq!(store.lookup(TypeId::ERROR).and_then(Type::intrinsic_name), Some("error"));
    assert!(store.type_flags(TypeId::ERROR).contains(TypeFlags::ANY));
    assert!(store.type_flags(TypeId::BOOLEAN).contains(TypeFlags::BOOLEAN | TypeFlags::UNION));
    assert_eq!(
        store.type_flags(TypeId::TRUE),
        TypeFlags::BOOLEAN_LITERAL
    );
    assert!(store.is_error_type(TypeId::ERROR));
    assert!(!store.is_error_type(TypeId::ANY));
}

#[test]
fn test_array_and_tuple_detection() {
    let mut store = TypeStore::new();
    let strings = store.array_of(TypeId::STRING);
    let frozen = store.readonly_array_of(TypeId::NUMBER);
    let pair = store.tuple(vec![TypeId::STRING, TypeId::NUMBER], None, false);

    assert!(store.is_array_type(strings));
    assert!(!store.is_readonly_array_type(strings));
    assert!(store.is_array_type(frozen));
    assert!(store.is_readonly_array_type(frozen));
    assert!(!store.is_array_type(pair));
    assert!(store.is_tuple_type(pair));
    assert_eq!(store.get_type_arguments(strings), &[TypeId::STRING]);
    assert_eq!(store.get_type_arguments(pair), &[TypeId::STRING, TypeId::NUMBER]);
}

#[test]
fn test_intersection_members_are_deduplicated() {
    let mut store = TypeStore::new();
    let object = store.object(Vec::new());

    let repeated = store.new_intersection_type(vec![object, TypeId::STRING, object]);
    match store.lookup(repeated).map(|ty| &ty.data) {
        Some(TypeData::Intersection { types }) => assert_eq!(types, &[object, TypeId::STRING]),
        other => panic!("expected an intersection, got {other:?}"),
    }
    assert_eq!(
        store.new_intersection_type(vec![TypeId::STRING, TypeId::STRING]),
        TypeId::STRING
    );
}

#[test]
fn test_tuple_optional_elements() {
    let mut store = TypeStore::new();
    let pair = store.tuple_with_optional(vec![TypeId::STRING, TypeId::NUMBER], 1);

    assert!(store.is_tuple_type(pair));
    let shape = store
        .lookup(pair)
        .and_then(Type::as_object)
        .and_then(|object| object.tuple.clone())
        .unwrap();
    assert_eq!(shape.min_length, Some(1));
}

#[test]
fn test_properties_include_inherited_members_once() {
    let mut store = TypeStore::new();
    let base_name = store.property("name", TypeId::STRING);
    let base_id = store.property("id", TypeId::NUMBER);
    let base = store.interface("Base", vec![base_name, base_id], Vec::new());
    let derived_name = store.property("name", TypeId::STRING);
    let extra = store.property("extra", TypeId::BOOLEAN);
    let derived = store.interface("Derived", vec![derived_name, extra], vec![base]);

    let names: Vec<String> = store
        .get_properties_of_type(derived)
        .into_iter()
        .filter_map(|symbol| store.symbol(symbol).map(|s| s.name.clone()))
        .collect();

    assert_eq!(names, vec!["name", "extra", "id"]);
}

#[test]
fn test_union_properties_are_common_members() {
    let mut store = TypeStore::new();
    let a1 = store.property("shared", TypeId::STRING);
    let a2 = store.property("onlyA", TypeId::STRING);
    let b1 = store.property("shared", TypeId::NUMBER);
    let a = store.object(vec![a1, a2]);
    let b = store.object(vec![b1]);
    let union = store.union(vec![a, b]);

    let props = store.get_properties_of_type(union);
    assert_eq!(props, vec![a1]);
}

#[test]
fn test_optional_parameter_from_check_flags_or_syntax() {
    let mut store = TypeStore::new();
    let synthetic = store.parameter("x", TypeId::NUMBER);
    store.symbol_mut(synthetic).unwrap().check_flags |= CheckFlags::OPTIONAL_PARAMETER;

    let syntactic = store.parameter("y", TypeId::NUMBER);
    let mut decl = Declaration::new(DeclarationKind::Parameter, location(0, 11, 12));
    decl.question_token = true;
    store.declare(syntactic, decl);

    let required = store.parameter("z", TypeId::NUMBER);

    assert!(store.is_optional_parameter(synthetic));
    assert!(store.is_optional_parameter(syntactic));
    assert!(!store.is_optional_parameter(required));
}

#[test]
fn test_signature_min_argument_count_stops_at_optional() {
    let mut store = TypeStore::new();
    let a = store.parameter("a", TypeId::STRING);
    let b = store.parameter("b", TypeId::STRING);
    store.symbol_mut(b).unwrap().check_flags |= CheckFlags::OPTIONAL_PARAMETER;

    let signature = store.signature(vec![a, b], TypeId::VOID);
    assert_eq!(signature.min_argument_count, 1);
}

#[test]
fn test_type_of_symbol_falls_back_to_error() {
    let mut store = TypeStore::new();
    let symbol = store.create_symbol("ghost", SymbolFlags::PROPERTY);
    let decl = Declaration::new(DeclarationKind::Property, location(0, 0, 5));

    assert_eq!(store.get_type_of_symbol(symbol), TypeId::ERROR);
    assert_eq!(store.get_type_of_symbol_at_location(symbol, &decl), TypeId::ERROR);
    assert_eq!(store.get_declared_type_of_symbol(symbol), TypeId::ERROR);
}

#[test]
fn test_class_declares_instance_and_constructor_types() {
    let mut store = TypeStore::new();
    let field = store.property("value", TypeId::NUMBER);
    let param = store.parameter("value", TypeId::NUMBER);
    let instance = store.class("Box", vec![field], vec![param], None, Vec::new());

    let class_symbol = store.lookup(instance).and_then(|ty| ty.symbol).unwrap();
    let constructor = store.get_type_of_symbol(class_symbol);
    let constructs = store.get_signatures_of_type(constructor, SignatureKind::Construct);

    assert_eq!(store.get_declared_type_of_symbol(class_symbol), instance);
    assert_eq!(constructs.len(), 1);
    assert_eq!(constructs[0].return_type, instance);
    assert!(store.object_flags(instance).contains(ObjectFlags::CLASS));
}

#[test]
fn test_symbol_at_position_prefers_innermost_declaration() {
    let mut store = TypeStore::new();
    let outer = store.create_symbol("outer", SymbolFlags::FUNCTION);
    store.declare(
        outer,
        Declaration::new(DeclarationKind::Function, location(0, 0, 40)),
    );
    let inner = store.variable("inner", TypeId::STRING, location(0, 10, 15));

    assert_eq!(store.symbol_at_position("main.ts", Position::new(0, 12)), Some(inner));
    assert_eq!(store.symbol_at_position("main.ts", Position::new(0, 30)), Some(outer));
    assert_eq!(store.symbol_at_position("other.ts", Position::new(0, 12)), None);
    assert_eq!(store.symbol_at_position("main.ts", Position::new(3, 0)), None);
}

#[test]
fn test_union_factory_deduplicates_and_collapses_singletons() {
    let mut store = TypeStore::new();
    assert_eq!(store.new_union_type(vec![TypeId::STRING, TypeId::STRING]), TypeId::STRING);

    let union = store.new_union_type(vec![TypeId::STRING, TypeId::NUMBER, TypeId::STRING]);
    match &store.lookup(union).unwrap().data {
        TypeData::Union { types } => assert_eq!(types, &vec![TypeId::STRING, TypeId::NUMBER]),
        other => panic!("expected union, got {:?}", other),
    }
}

#[test]
fn test_clone_without_alias_leaves_original_untouched() {
    let mut store = TypeStore::new();
    let prop = store.property("a", TypeId::STRING);
    let object = store.object(vec![prop]);
    store.type_alias("Named", object, Vec::new());

    let clone = store.clone_type_without_alias(object);

    assert_ne!(clone, object);
    assert!(store.lookup(object).unwrap().alias_symbol.is_some());
    assert!(store.lookup(clone).unwrap().alias_symbol.is_none());
    assert_eq!(store.get_properties_of_type(clone), vec![prop]);

    // Nothing to strip: the same id comes back.
    assert_eq!(store.clone_type_without_alias(TypeId::STRING), TypeId::STRING);
}

#[test]
fn test_new_property_symbol_is_transient() {
    let mut store = TypeStore::new();
    let symbol = store.new_property_symbol(
        "merged",
        SymbolFlags::OPTIONAL,
        CheckFlags::SYNTHETIC_PROPERTY,
        TypeId::STRING,
        Vec::new(),
    );
    let sym = store.symbol(symbol).unwrap();

    assert!(sym.flags.contains(SymbolFlags::PROPERTY | SymbolFlags::TRANSIENT | SymbolFlags::OPTIONAL));
    assert_eq!(store.get_type_of_symbol(symbol), TypeId::STRING);
}

#[test]
fn test_enum_members_carry_parent_and_flags() {
    let mut store = TypeStore::new();
    let color = store.enum_type(
        "Color",
        &[("Red", EnumValue::Number(0.0)), ("Blue", EnumValue::String("blue".into()))],
    );
    let members = match &store.lookup(color).unwrap().data {
        TypeData::Union { types } => types.clone(),
        other => panic!("expected union, got {:?}", other),
    };

    assert!(store.type_flags(color).contains(TypeFlags::ENUM | TypeFlags::UNION));
    assert!(store.type_flags(members[0]).contains(TypeFlags::ENUM_LITERAL | TypeFlags::NUMBER_LITERAL));
    assert!(store.type_flags(members[1]).contains(TypeFlags::ENUM_LITERAL | TypeFlags::STRING_LITERAL));
    let member_symbol = store.lookup(members[1]).and_then(|ty| ty.symbol).unwrap();
    let parent = store.symbol(member_symbol).and_then(|sym| sym.parent).unwrap();
    assert_eq!(store.symbol(parent).unwrap().name, "Color");
}
