use super::*;
use crate::fixtures::{sample_store, user_location, wrapper_location};
use crate::server::register_handlers;
use std::sync::{Arc, Mutex};
use texplorer_common::{LocalizedTypeInfoOrError, TreeConfig, TypeKind};
use texplorer_localize::{TypeInfoResolver, description, label};
use texplorer_rpc::Side;

fn remote(config: TreeConfig) -> RpcRetriever {
    let (client_io, server_io) = tokio::io::duplex(256 * 1024);
    let server = RpcConnection::from_stream(Side::Server, server_io);
    register_handlers(&server, Arc::new(Mutex::new(Program::new(sample_store(), config))));
    RpcRetriever::new(RpcConnection::from_stream(Side::Client, client_io))
}

/// Localize the root at `wrapper` and return its single child, `user`.
async fn localized_user(resolver: &TypeInfoResolver, root: TypeInfo) -> LocalizedTypeInfoOrError {
    let root = resolver.localize(&Arc::new(root)).await;
    let children = resolver
        .localize_children(root.info().unwrap(), true)
        .await
        .unwrap();
    assert_eq!(children.len(), 1);
    children.into_iter().next().unwrap()
}

#[tokio::test]
async fn test_local_retriever_answers_from_program() {
    let program = Rc::new(Program::new(sample_store(), TreeConfig::default()));
    let retriever = local_retriever(Rc::clone(&program));

    let tree = retriever.retrieve(user_location()).await.unwrap().unwrap();
    assert_eq!(tree.type_kind(), TypeKind::Interface);

    let missing = retriever
        .retrieve(SourceFileLocation::at("nowhere.ts", 0, 0))
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_local_retriever_expands_references() {
    let config = TreeConfig::default().with_reference_defined_types(true);
    let program = Rc::new(Program::new(sample_store(), config));
    let root = program.type_tree_at(&wrapper_location()).unwrap();
    let resolver = TypeInfoResolver::with_retriever(local_retriever(Rc::clone(&program)));

    let user = localized_user(&resolver, root).await;
    assert_eq!(label(&user), "user");
    assert_eq!(description(&user), "User");
    assert_eq!(user.info().unwrap().kind, Some(TypeKind::Interface));
}

#[tokio::test]
async fn test_rpc_retriever_expands_references() {
    let config = TreeConfig::default().with_reference_defined_types(true);
    let retriever = remote(config);
    let root = retriever
        .type_tree_at(&wrapper_location())
        .await
        .unwrap()
        .unwrap();
    let resolver = TypeInfoResolver::with_retriever(retriever);

    let user = localized_user(&resolver, root).await;
    assert_eq!(description(&user), "User");

    let fields = resolver
        .localize_children(user.info().unwrap(), true)
        .await
        .unwrap();
    let labels: Vec<String> = fields.iter().map(label).collect();
    assert_eq!(labels, ["name", "tags?"]);
}

#[tokio::test]
async fn test_rpc_retriever_expanded_type() {
    let retriever = remote(TreeConfig::default());
    let expanded = retriever
        .expanded_type_at(&crate::fixtures::merged_location())
        .await
        .unwrap();
    assert_eq!(expanded.as_deref(), Some("{ a: string; b: number; }"));
}

#[tokio::test]
async fn test_rpc_retriever_closed_connection() {
    let (client_io, server_io) = tokio::io::duplex(1024);
    drop(server_io);
    let retriever = RpcRetriever::new(RpcConnection::from_stream(Side::Client, client_io));

    let err = retriever.retrieve(user_location()).await.unwrap_err();
    assert!(format!("{err:#}").contains("getTypeTree failed"), "{err:#}");
}
