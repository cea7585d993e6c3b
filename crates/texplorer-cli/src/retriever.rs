//! Adapters that let the resolver expand `reference { location }` nodes.

use crate::program::Program;
use crate::server::{GET_EXPANDED_TYPE, GET_TYPE_TREE, LocationRequest};
use anyhow::Context;
use futures::FutureExt;
use futures::future::LocalBoxFuture;
use std::future::ready;
use std::rc::Rc;
use texplorer_common::{SourceFileLocation, TypeInfo};
use texplorer_localize::TypeInfoRetriever;
use texplorer_rpc::RpcConnection;

/// Answers from a program in this process.
pub fn local_retriever(
    program: Rc<Program>,
) -> impl Fn(SourceFileLocation) -> std::future::Ready<anyhow::Result<Option<TypeInfo>>> {
    move |location| ready(Ok(program.type_tree_at(&location)))
}

/// Answers by asking a `texplorer-server` over RPC.
#[derive(Clone)]
pub struct RpcRetriever {
    connection: RpcConnection,
}

impl RpcRetriever {
    pub fn new(connection: RpcConnection) -> Self {
        RpcRetriever { connection }
    }

    pub async fn type_tree_at(&self, location: &SourceFileLocation) -> anyhow::Result<Option<TypeInfo>> {
        let request = LocationRequest {
            location: location.clone(),
        };
        self.connection
            .request(GET_TYPE_TREE, &request)
            .await
            .with_context(|| format!("{GET_TYPE_TREE} failed for {location}"))
    }

    pub async fn expanded_type_at(&self, location: &SourceFileLocation) -> anyhow::Result<Option<String>> {
        let request = LocationRequest {
            location: location.clone(),
        };
        self.connection
            .request(GET_EXPANDED_TYPE, &request)
            .await
            .with_context(|| format!("{GET_EXPANDED_TYPE} failed for {location}"))
    }
}

impl TypeInfoRetriever for RpcRetriever {
    fn retrieve(
        &self,
        location: SourceFileLocation,
    ) -> LocalBoxFuture<'_, anyhow::Result<Option<TypeInfo>>> {
        async move { self.type_tree_at(&location).await }.boxed_local()
    }
}

#[cfg(test)]
#[path = "../tests/retriever_tests.rs"]
mod tests;
