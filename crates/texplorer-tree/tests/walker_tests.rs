use super::*;
use texplorer_checker::{Declaration, DeclarationKind, ObjectMembers, TypeFactory, TypeStore};
use texplorer_common::{TypeInfoMap, TypeKind};

fn at(line: u32, character: u32) -> SourceFileLocation {
    SourceFileLocation::at("main.ts", line, character)
}

fn properties(node: &TypeInfo) -> &[TypeInfoRef] {
    match &node.kind {
        TypeInfoKind::Object { properties, .. } => properties,
        TypeInfoKind::Intersection { properties, .. } => properties,
        TypeInfoKind::Class(info) | TypeInfoKind::Interface(info) => &info.properties,
        other => panic!("expected a node with properties, got {:?}", other.type_kind()),
    }
}

fn symbol_name(node: &TypeInfo) -> &str {
    node.symbol_meta
        .as_ref()
        .map(|meta| meta.name.as_str())
        .unwrap_or_default()
}

/// `type Recursive = { a: Recursive }`
fn recursive_object(store: &mut TypeStore) -> TypeId {
    let object = store.object(Vec::new());
    let a = store.property("a", object);
    store.set_object_members(
        object,
        ObjectMembers {
            properties: vec![a],
            ..Default::default()
        },
    );
    store.type_alias("Recursive", object, Vec::new())
}

fn collect_reference_ids(node: &TypeInfo, out: &mut Vec<TypeInfoId>) {
    if node.is_reference() {
        out.push(node.id);
    }
    node.for_each_child(|child| collect_reference_ids(child, out));
}

/// Longest root-to-node path counting only concrete nodes.
fn concrete_depth(node: &TypeInfo) -> u32 {
    if matches!(node.kind, TypeInfoKind::Reference { .. } | TypeInfoKind::MaxDepth) {
        return 0;
    }
    let mut deepest = 0;
    node.for_each_child(|child| deepest = deepest.max(concrete_depth(child)));
    deepest + 1
}

fn contains_max_depth(node: &TypeInfo) -> bool {
    if matches!(node.kind, TypeInfoKind::MaxDepth) {
        let mut has_children = false;
        node.for_each_child(|_| has_children = true);
        assert!(!has_children, "max_depth sentinel must be terminal");
        return true;
    }
    let mut found = false;
    node.for_each_child(|child| found |= contains_max_depth(child));
    found
}

#[test]
fn test_array_of_strings_variable() {
    let mut store = TypeStore::new();
    let strings = store.array_of(TypeId::STRING);
    let symbol = store.variable("arrayOfStrings", strings, at(0, 6));

    let tree = generate_type_tree(&store, TreeRoot::Symbol(symbol), &TreeConfig::default());

    assert_eq!(symbol_name(&tree), "arrayOfStrings");
    match &tree.kind {
        TypeInfoKind::Array { element, readonly } => {
            assert!(!readonly);
            assert_eq!(
                element.kind,
                TypeInfoKind::Primitive {
                    primitive: PrimitiveKind::String
                }
            );
        }
        other => panic!("expected array, got {:?}", other.type_kind()),
    }
    assert!(tree.type_arguments.is_none(), "array payload already holds the element");
}

#[test]
fn test_optional_parameter_from_check_flags() {
    let mut store = TypeStore::new();
    let x = store.parameter("x", TypeId::NUMBER);
    store.symbol_mut(x).unwrap().check_flags |= CheckFlags::OPTIONAL_PARAMETER;
    let y = store.parameter("y", TypeId::STRING);
    let f = store.function_declaration("f", vec![x, y], TypeId::VOID, at(0, 9));

    let tree = generate_type_tree(&store, TreeRoot::Symbol(f), &TreeConfig::default());

    let TypeInfoKind::Function { signatures } = &tree.kind else {
        panic!("expected function, got {:?}", tree.type_kind());
    };
    assert_eq!(signatures.len(), 1);
    let params = &signatures[0].parameters;
    let x_meta = params[0].symbol_meta.as_ref().unwrap();
    let y_meta = params[1].symbol_meta.as_ref().unwrap();
    assert_eq!(x_meta.name, "x");
    assert!(x_meta.optional);
    assert!(!y_meta.optional);
    assert_eq!(
        signatures[0].return_type.as_ref().map(|ret| ret.type_kind()),
        Some(TypeKind::Primitive)
    );
}

#[test]
fn test_optional_parameter_from_question_token() {
    let mut store = TypeStore::new();
    let x = store.parameter("x", TypeId::NUMBER);
    let mut decl = Declaration::new(DeclarationKind::Parameter, at(0, 11));
    decl.question_token = true;
    store.declare(x, decl);
    let f = store.function(vec![x], TypeId::VOID);

    let tree = generate_type_tree(&store, TreeRoot::Type(f), &TreeConfig::default());

    let TypeInfoKind::Function { signatures } = &tree.kind else {
        panic!("expected function");
    };
    assert!(signatures[0].parameters[0].symbol_meta.as_ref().unwrap().optional);
}

#[test]
fn test_recursive_type_emits_resolvable_reference() {
    let mut store = TypeStore::new();
    let recursive = recursive_object(&mut store);

    let tree = Arc::new(generate_type_tree(
        &store,
        TreeRoot::Type(recursive),
        &TreeConfig::default(),
    ));

    assert_eq!(tree.id, TypeInfoId(recursive.0));
    assert_eq!(
        tree.alias_symbol_meta.as_ref().map(|meta| meta.name.as_str()),
        Some("Recursive")
    );
    let a = &properties(&tree)[0];
    assert_eq!(symbol_name(a), "a");
    assert!(a.is_reference());
    assert_eq!(a.id, tree.id);

    let map = TypeInfoMap::build(&tree);
    let target = map.get(a.id).expect("reference must resolve");
    assert!(Arc::ptr_eq(target, &tree));
}

#[test]
fn test_reference_may_point_into_sibling_branch() {
    let mut store = TypeStore::new();
    let leaf = store.property("leaf", TypeId::STRING);
    let shared = store.object(vec![leaf]);
    let left = store.property("left", shared);
    let right = store.property("right", shared);
    let root = store.object(vec![left, right]);

    let tree = Arc::new(generate_type_tree(&store, TreeRoot::Type(root), &TreeConfig::default()));

    let props = properties(&tree);
    assert_eq!(props[0].type_kind(), TypeKind::Object);
    assert!(props[1].is_reference());
    assert_eq!(symbol_name(&props[1]), "right");

    let map = TypeInfoMap::build(&tree);
    let target = map.get(props[1].id).unwrap();
    assert!(Arc::ptr_eq(target, &props[0]));
}

#[test]
fn test_every_reference_resolves_in_its_tree() {
    let mut store = TypeStore::new();
    let recursive = recursive_object(&mut store);
    let first = store.property("first", recursive);
    let second = store.property("second", recursive);
    let list = store.array_of(recursive);
    let third = store.property("items", list);
    let root = store.object(vec![first, second, third]);

    let tree = Arc::new(generate_type_tree(&store, TreeRoot::Type(root), &TreeConfig::default()));
    let map = TypeInfoMap::build(&tree);

    let mut references = Vec::new();
    collect_reference_ids(&tree, &mut references);
    assert_eq!(references.len(), 3);
    for id in references {
        assert!(map.contains(id), "unresolved reference {}", id);
    }
}

#[test]
fn test_depth_bound_emits_terminal_sentinel() {
    let mut store = TypeStore::new();
    let mut current = store.object(Vec::new());
    for level in 0..10 {
        let property = store.property(&format!("level{}", level), current);
        current = store.object(vec![property]);
    }
    let config = TreeConfig::default().with_max_depth(3);

    let tree = generate_type_tree(&store, TreeRoot::Type(current), &config);

    assert!(concrete_depth(&tree) <= config.max_depth + 1);
    assert!(contains_max_depth(&tree));
    let depth_two = &properties(&tree)[0];
    let depth_three = &properties(depth_two)[0];
    let depth_four = &properties(depth_three)[0];
    assert_eq!(depth_four.type_kind(), TypeKind::MaxDepth);
    assert_eq!(symbol_name(depth_four), "level7");
}

#[test]
fn test_depth_cutoff_does_not_mark_type_seen() {
    let mut store = TypeStore::new();
    let leaf = store.object(Vec::new());
    let deep = store.property("deep", leaf);
    let inner = store.object(vec![deep]);
    let nested = store.property("nested", inner);
    let shallow = store.property("shallow", leaf);
    let root = store.object(vec![nested, shallow]);

    let config = TreeConfig::default().with_max_depth(2);
    let tree = generate_type_tree(&store, TreeRoot::Type(root), &config);

    let props = properties(&tree);
    assert_eq!(properties(&props[0])[0].type_kind(), TypeKind::MaxDepth);
    // The cut-off occurrence never produced a full node, so this one must.
    assert_eq!(props[1].type_kind(), TypeKind::Object);
}

#[test]
fn test_intersection_of_objects_collapses_to_object() {
    let mut store = TypeStore::new();
    let a = store.property("a", TypeId::STRING);
    let shared_first = store.property("shared", TypeId::STRING);
    let b = store.property("b", TypeId::NUMBER);
    let shared_second = store.property("shared", TypeId::NUMBER);
    let left = store.object(vec![a, shared_first]);
    let right = store.object(vec![b, shared_second]);
    let intersection = store.intersection(vec![left, right]);

    let tree = generate_type_tree(&store, TreeRoot::Type(intersection), &TreeConfig::default());

    assert_eq!(tree.type_kind(), TypeKind::Object);
    let names: Vec<&str> = properties(&tree).iter().map(|p| symbol_name(p)).collect();
    assert_eq!(names, vec!["a", "shared", "b"]);
    // `string` was first seen under `a`, so `shared` is a reference to it.
    let shared = &properties(&tree)[1];
    assert!(matches!(shared.kind, TypeInfoKind::Reference { .. }));
    assert_eq!(shared.id, properties(&tree)[0].id);
    let shared_id = shared.id;
    let map = TypeInfoMap::build(&Arc::new(tree));
    assert_eq!(
        map.get(shared_id).map(|node| node.kind.clone()),
        Some(TypeInfoKind::Primitive {
            primitive: PrimitiveKind::String
        })
    );
}

#[test]
fn test_intersection_with_primitive_keeps_types() {
    let mut store = TypeStore::new();
    let brand = store.property("__brand", TypeId::STRING);
    let branded = store.object(vec![brand]);
    let nested = store.intersection(vec![TypeId::NUMBER, branded]);
    let intersection = store.intersection(vec![nested, TypeId::STRING]);

    let tree = generate_type_tree(&store, TreeRoot::Type(intersection), &TreeConfig::default());

    let TypeInfoKind::Intersection {
        types, properties, ..
    } = &tree.kind
    else {
        panic!("expected intersection, got {:?}", tree.type_kind());
    };
    let kinds: Vec<_> = types.iter().map(|ty| ty.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            TypeInfoKind::Primitive {
                primitive: PrimitiveKind::Number
            },
            TypeInfoKind::Primitive {
                primitive: PrimitiveKind::String
            },
        ]
    );
    assert_eq!(properties.len(), 1);
    assert_eq!(symbol_name(&properties[0]), "__brand");
}

#[test]
fn test_flag_precedence() {
    let mut store = TypeStore::new();
    let unique_symbol = store.create_symbol("key", SymbolFlags::BLOCK_SCOPED_VARIABLE);
    let unique = store.unique_symbol(unique_symbol);
    let hello = store.literal_string("hello");
    let config = TreeConfig::default();

    let kind = |store: &TypeStore, ty| generate_type_tree(store, TreeRoot::Type(ty), &config).kind;

    assert_eq!(
        kind(&store, TypeId::BOOLEAN),
        TypeInfoKind::Primitive {
            primitive: PrimitiveKind::Boolean
        }
    );
    assert_eq!(
        kind(&store, TypeId::ERROR),
        TypeInfoKind::Primitive {
            primitive: PrimitiveKind::Any
        }
    );
    assert_eq!(
        kind(&store, TypeId::INTRINSIC),
        TypeInfoKind::Intrinsic {
            name: "intrinsic".into()
        }
    );
    assert_eq!(
        kind(&store, TypeId::ES_SYMBOL),
        TypeInfoKind::Primitive {
            primitive: PrimitiveKind::Essymbol
        }
    );
    // `unique symbol` is es-symbol-like, which is tested first.
    assert_eq!(
        kind(&store, unique),
        TypeInfoKind::Primitive {
            primitive: PrimitiveKind::Essymbol
        }
    );
    assert_eq!(kind(&store, TypeId::TRUE), TypeInfoKind::BooleanLiteral { value: true });
    assert_eq!(
        kind(&store, hello),
        TypeInfoKind::StringLiteral {
            value: "hello".into()
        }
    );
    assert_eq!(kind(&store, TypeId::NON_PRIMITIVE), TypeInfoKind::NonPrimitive);
}

#[test]
fn test_enum_and_enum_literal() {
    let mut store = TypeStore::new();
    let color = store.enum_type(
        "Color",
        &[
            ("Red", EnumValue::Number(0.0)),
            ("Green", EnumValue::String("green".into())),
        ],
    );

    let tree = generate_type_tree(&store, TreeRoot::Type(color), &TreeConfig::default());

    let TypeInfoKind::Enum {
        enum_symbol,
        members,
    } = &tree.kind
    else {
        panic!("expected enum, got {:?}", tree.type_kind());
    };
    assert_eq!(enum_symbol.as_ref().unwrap().name, "Color");
    assert_eq!(members.len(), 2);
    match &members[1].kind {
        TypeInfoKind::EnumLiteral {
            value,
            literal_symbol,
            parent_symbol,
        } => {
            assert_eq!(value, &EnumValue::String("green".into()));
            assert_eq!(literal_symbol.as_ref().unwrap().name, "Green");
            assert_eq!(parent_symbol.as_ref().unwrap().name, "Color");
        }
        other => panic!("expected enum literal, got {:?}", other.type_kind()),
    }
}

#[test]
fn test_class_instance_and_constructor_side() {
    let mut store = TypeStore::new();
    let base_field = store.property("id", TypeId::NUMBER);
    let base = store.class("Base", vec![base_field], Vec::new(), None, Vec::new());
    let shape = store.interface("Shape", Vec::new(), Vec::new());
    let field = store.property("value", TypeId::STRING);
    let param = store.parameter("value", TypeId::STRING);
    let derived = store.class("Derived", vec![field], vec![param], Some(base), vec![shape]);

    let tree = generate_type_tree(&store, TreeRoot::Type(derived), &TreeConfig::default());

    let TypeInfoKind::Class(info) = &tree.kind else {
        panic!("expected class, got {:?}", tree.type_kind());
    };
    assert_eq!(info.class_symbol.as_ref().unwrap().name, "Derived");
    assert_eq!(info.base_type.as_ref().unwrap().type_kind(), TypeKind::Class);
    assert_eq!(info.implements_types[0].type_kind(), TypeKind::Interface);
    assert_eq!(info.construct_signatures.len(), 1);
    assert_eq!(info.construct_signatures[0].parameters.len(), 1);
    let names: Vec<&str> = info.properties.iter().map(|p| symbol_name(p)).collect();
    assert_eq!(names, vec!["value", "id"]);
    assert!(info.properties[0].symbol_meta.as_ref().unwrap().inside_class_or_interface);

    let class_symbol = store.lookup(derived).and_then(|ty| ty.symbol).unwrap();
    let constructor = store.get_type_of_symbol(class_symbol);
    let ctor_tree =
        generate_type_tree(&store, TreeRoot::Type(constructor), &TreeConfig::default());
    match &ctor_tree.kind {
        TypeInfoKind::Object { object_class, .. } => {
            assert_eq!(object_class.as_ref().unwrap().type_kind(), TypeKind::Class);
        }
        other => panic!("expected object, got {:?}", other.type_kind()),
    }
}

#[test]
fn test_symbol_type_fallback_uses_declared_type() {
    let mut store = TypeStore::new();
    let prop = store.property("x", TypeId::NUMBER);
    let iface = store.interface("Point", vec![prop], Vec::new());
    let symbol = store.lookup(iface).and_then(|ty| ty.symbol).unwrap();
    store.declare(symbol, Declaration::new(DeclarationKind::Interface, at(2, 10)));
    let ghost = store.create_symbol("ghost", SymbolFlags::PROPERTY);

    let ctx = TreeContext::new(&store, TreeConfig::default());
    assert_eq!(ctx.type_of_symbol(symbol), iface);
    assert_eq!(ctx.type_of_symbol(ghost), TypeId::ERROR);

    let tree = generate_type_tree(&store, TreeRoot::Symbol(symbol), &TreeConfig::default());
    assert_eq!(tree.type_kind(), TypeKind::Interface);
    assert_eq!(symbol_name(&tree), "Point");
}

#[test]
fn test_reference_defined_types_emits_locations() {
    let mut store = TypeStore::new();
    let x = store.property("x", TypeId::NUMBER);
    let point = store.interface("Point", vec![x], Vec::new());
    let point_symbol = store.lookup(point).and_then(|ty| ty.symbol).unwrap();
    store.declare(point_symbol, Declaration::new(DeclarationKind::Interface, at(0, 10)));
    let origin = store.property("origin", point);
    let root = store.object(vec![origin]);

    let config = TreeConfig::default().with_reference_defined_types(true);
    let tree = generate_type_tree(&store, TreeRoot::Type(root), &config);
    let origin_node = &properties(&tree)[0];
    assert_eq!(
        origin_node.kind,
        TypeInfoKind::Reference {
            location: Some(at(0, 10))
        }
    );

    // The root itself is always expanded.
    let tree = generate_type_tree(&store, TreeRoot::Type(point), &config);
    assert_eq!(tree.type_kind(), TypeKind::Interface);
}

#[test]
fn test_generic_reference_pairs_arguments_and_parameters() {
    let mut store = TypeStore::new();
    let t = store.type_parameter("T", None, None);
    let value = store.property("value", t);
    let boxed = store.interface("Box", vec![value], Vec::new());
    if let Some(TypeData::Object(object)) = store.type_mut(boxed).map(|ty| &mut ty.data) {
        object.type_parameters = vec![t];
    }
    let box_of_string = store.instantiate(boxed, vec![TypeId::STRING]);

    let tree = generate_type_tree(&store, TreeRoot::Type(box_of_string), &TreeConfig::default());

    assert_eq!(tree.type_kind(), TypeKind::Interface);
    let arguments = tree.type_arguments.as_ref().unwrap();
    let parameters = tree.type_parameters.as_ref().unwrap();
    assert_eq!(arguments[0].type_kind(), TypeKind::Primitive);
    // `T` was already emitted as the type of `value`.
    assert_eq!(parameters[0].id, TypeInfoId(t.0));
    assert!(parameters[0].is_reference());
}

#[test]
fn test_tuple_names_and_serialized_shape() {
    let mut store = TypeStore::new();
    let tuple = store.tuple(
        vec![TypeId::STRING, TypeId::NUMBER],
        Some(vec!["name".into(), "age".into()]),
        true,
    );

    let tree = generate_type_tree(&store, TreeRoot::Type(tuple), &TreeConfig::default());
    let json = serde_json::to_value(&tree).unwrap();

    assert_eq!(json["kind"], "tuple");
    assert_eq!(json["names"], serde_json::json!(["name", "age"]));
    assert_eq!(json["readonly"], true);
    assert_eq!(json["types"][0]["primitive"], "string");
}
