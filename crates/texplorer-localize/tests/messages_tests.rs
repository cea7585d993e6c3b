use super::*;
use rustc_hash::FxHashSet;
use texplorer_common::{PrimitiveKind, PseudoBigInt};

#[test]
fn test_format_message_substitutes_positional_arguments() {
    assert_eq!(format_message("{0} extends {1}", &["T", "U"]), "T extends U");
    assert_eq!(format_message("no placeholders", &["ignored"]), "no placeholders");
}

#[test]
fn test_message_keys_are_unique_and_resolvable() {
    let mut keys = FxHashSet::default();
    for message in ALL_MESSAGES {
        assert!(keys.insert(message.key), "duplicate key {}", message.key);
        assert_eq!(message_by_key(message.key), Some(*message));
    }
    assert_eq!(message_by_key("kind.nope"), None);
}

#[test]
fn test_kind_text_interpolates_literal_values() {
    assert_eq!(
        kind_text(&TypeInfoKind::Primitive {
            primitive: PrimitiveKind::String
        }),
        "string"
    );
    assert_eq!(
        kind_text(&TypeInfoKind::StringLiteral {
            value: "hello".into()
        }),
        "\"hello\""
    );
    assert_eq!(kind_text(&TypeInfoKind::NumberLiteral { value: 42.0 }), "42");
    assert_eq!(
        kind_text(&TypeInfoKind::BigintLiteral {
            value: PseudoBigInt {
                negative: true,
                base10_value: "10".into(),
            }
        }),
        "-10n"
    );
    assert_eq!(kind_text(&TypeInfoKind::BooleanLiteral { value: false }), "false");
    assert_eq!(kind_text(&TypeInfoKind::NonPrimitive), "object");
    assert_eq!(kind_text(&TypeInfoKind::MaxDepth), "max depth exceeded");
}

#[test]
fn test_purpose_text() {
    assert_eq!(purpose_text(TypePurpose::Return), "return");
    assert_eq!(purpose_text(TypePurpose::ClassBaseType), "extends");
    assert_eq!(purpose_text(TypePurpose::ConditionalFalse), "false branch");
}
