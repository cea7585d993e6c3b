use super::*;
use crate::position::{Position, Range};

fn primitive(id: u32, primitive: PrimitiveKind) -> TypeInfoRef {
    Arc::new(TypeInfo::new(
        TypeInfoId(id),
        TypeInfoKind::Primitive { primitive },
    ))
}

#[test]
fn test_kind_tag_is_flattened_into_node() {
    let node = primitive(7, PrimitiveKind::String);
    let json = serde_json::to_value(&*node).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"id": 7, "kind": "primitive", "primitive": "string"})
    );
}

#[test]
fn test_reference_carries_only_id_and_location() {
    let location = SourceFileLocation::new(
        "/a.ts",
        Range::new(Position::new(1, 2), Position::new(1, 5)),
    );
    let node = TypeInfo::new(
        TypeInfoId(3),
        TypeInfoKind::Reference {
            location: Some(location),
        },
    );
    let json = serde_json::to_value(&node).unwrap();
    assert_eq!(json["kind"], "reference");
    assert_eq!(json["location"]["fileName"], "/a.ts");
    assert_eq!(json["location"]["range"]["start"]["character"], 2);

    let bare = TypeInfo::new(TypeInfoId(3), TypeInfoKind::Reference { location: None });
    let json = serde_json::to_value(&bare).unwrap();
    assert_eq!(json, serde_json::json!({"id": 3, "kind": "reference"}));
}

#[test]
fn test_array_payload_uses_type_field_and_round_trips() {
    let mut node = TypeInfo::new(
        TypeInfoId(1),
        TypeInfoKind::Array {
            element: primitive(2, PrimitiveKind::String),
            readonly: false,
        },
    );
    node.symbol_meta = Some(SymbolInfo::new(
        "arrayOfStrings",
        SymbolFlags::BLOCK_SCOPED_VARIABLE,
    ));

    let json = serde_json::to_string(&node).unwrap();
    assert!(json.contains("\"kind\":\"array\""));
    assert!(json.contains("\"type\":{"));
    assert!(json.contains("\"symbolMeta\""));

    let back: TypeInfo = serde_json::from_str(&json).unwrap();
    assert_eq!(back, node);
}

#[test]
fn test_class_payload_is_flattened() {
    let node = TypeInfo::new(
        TypeInfoId(10),
        TypeInfoKind::Class(ClassLikeInfo {
            class_symbol: Some(SymbolInfo::new("Foo", SymbolFlags::CLASS)),
            ..Default::default()
        }),
    );
    let json = serde_json::to_value(&node).unwrap();
    assert_eq!(json["kind"], "class");
    assert_eq!(json["classSymbol"]["name"], "Foo");
    let back: TypeInfo = serde_json::from_value(json).unwrap();
    assert_eq!(back.type_kind(), TypeKind::Class);
}

#[test]
fn test_anonymous_symbol_detection() {
    assert!(SymbolInfo::new("__type", SymbolFlags::TYPE_LITERAL).anonymous);
    assert!(!SymbolInfo::new("value", SymbolFlags::PROPERTY).anonymous);
}

#[test]
fn test_for_each_child_visits_signatures_and_type_arguments() {
    let param = primitive(2, PrimitiveKind::Number);
    let ret = primitive(3, PrimitiveKind::Void);
    let mut node = TypeInfo::new(
        TypeInfoId(1),
        TypeInfoKind::Function {
            signatures: vec![SignatureInfo {
                parameters: vec![param],
                return_type: Some(ret),
                ..Default::default()
            }],
        },
    );
    node.type_arguments = Some(vec![primitive(4, PrimitiveKind::String)]);

    let mut ids = Vec::new();
    node.for_each_child(|child| ids.push(child.id.0));
    assert_eq!(ids, vec![2, 3, 4]);
}

#[test]
fn test_bigint_and_enum_value_display() {
    let big = PseudoBigInt {
        negative: true,
        base10_value: "12".to_string(),
    };
    assert_eq!(big.to_string(), "-12");
    assert_eq!(EnumValue::Number(1.0).to_string(), "1");
    assert_eq!(EnumValue::String("a".into()).to_string(), "\"a\"");
}
