use super::*;
use crate::db::TypeDatabase;
use texplorer_common::SourceFileLocation;

#[test]
fn test_snapshot_round_trip_through_file() {
    let mut store = TypeStore::new();
    let strings = store.array_of(TypeId::STRING);
    let symbol = store.variable("arrayOfStrings", strings, SourceFileLocation::at("main.ts", 0, 6));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("program.json");
    store.save(&path).unwrap();
    let loaded = TypeStore::load(&path).unwrap();

    assert_eq!(loaded, store);
    assert!(loaded.is_array_type(strings));
    assert_eq!(loaded.get_type_of_symbol(symbol), strings);
}

#[test]
fn test_snapshot_rejects_dangling_type() {
    let mut store = TypeStore::new();
    let symbol = store.create_symbol("broken", texplorer_common::SymbolFlags::PROPERTY);
    store.symbol_mut(symbol).unwrap().value_type = Some(TypeId(9_999));
    let json = store.to_json().unwrap();

    let err = TypeStore::from_json(&json).unwrap_err();
    assert!(matches!(err, SnapshotError::DanglingType { id: 9_999, .. }), "{err}");
}

#[test]
fn test_snapshot_rejects_missing_intrinsics() {
    let json = r#"{"types":[],"symbols":[],"globalArray":0,"globalReadonlyArray":0}"#;
    let err = TypeStore::from_json(json).unwrap_err();
    assert!(matches!(err, SnapshotError::MissingIntrinsics { found: 0 }));
}

#[test]
fn test_snapshot_reports_io_errors_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");
    let err = TypeStore::load(&path).unwrap_err();
    assert!(matches!(err, SnapshotError::Read { .. }));
    assert!(err.to_string().contains("missing.json"));
}
