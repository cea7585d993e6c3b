use super::*;
use crate::fixtures::{merged_location, sample_store, wrapper_location};
use serde_json::json;
use texplorer_common::{TreeConfig, TypeInfo, TypeKind};
use texplorer_rpc::{Payload, Side};

fn serve(config: TreeConfig) -> RpcConnection {
    let (client_io, server_io) = tokio::io::duplex(256 * 1024);
    let server = RpcConnection::from_stream(Side::Server, server_io);
    register_handlers(&server, Arc::new(Mutex::new(Program::new(sample_store(), config))));
    RpcConnection::from_stream(Side::Client, client_io)
}

#[tokio::test]
async fn test_get_type_tree() {
    let client = serve(TreeConfig::default());
    let request = LocationRequest {
        location: wrapper_location(),
    };

    let tree: Option<TypeInfo> = client.request(GET_TYPE_TREE, &request).await.unwrap();
    let tree = tree.unwrap();
    assert_eq!(tree.type_kind(), TypeKind::Object);
    assert_eq!(tree.symbol_meta.unwrap().name, "wrapper");
}

#[tokio::test]
async fn test_unknown_location_is_null() {
    let client = serve(TreeConfig::default());
    let payload = client
        .send_and_receive(
            GET_TYPE_TREE,
            json!({ "location": SourceFileLocation::at("nowhere.ts", 0, 0) }),
        )
        .await
        .unwrap();
    assert_eq!(payload, Payload::Response(Value::Null));
}

#[tokio::test]
async fn test_get_expanded_type() {
    let client = serve(TreeConfig::default());
    let request = LocationRequest {
        location: merged_location(),
    };

    let expanded: Option<String> = client.request(GET_EXPANDED_TYPE, &request).await.unwrap();
    assert_eq!(expanded.as_deref(), Some("{ a: string; b: number; }"));
}

#[tokio::test]
async fn test_malformed_request_is_reported() {
    let client = serve(TreeConfig::default());
    let payload = client
        .send_and_receive(GET_TYPE_TREE, json!({ "where": "main.ts" }))
        .await
        .unwrap();

    let Payload::Error(error) = payload else {
        panic!("expected error payload, got {payload:?}");
    };
    assert_eq!(error.msg, "invalid getTypeTree request");
    assert!(error.stack.unwrap().contains("location"));
}
