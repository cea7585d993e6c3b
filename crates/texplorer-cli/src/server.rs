//! RPC surface of `texplorer-server`.
//!
//! | key               | request        | response           |
//! |-------------------|----------------|--------------------|
//! | `getTypeTree`     | `{ location }` | `TypeInfo \| null` |
//! | `getExpandedType` | `{ location }` | `string \| null`   |

use crate::program::Program;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use texplorer_common::SourceFileLocation;
use texplorer_rpc::RpcConnection;
use tracing::debug;

pub const GET_TYPE_TREE: &str = "getTypeTree";
pub const GET_EXPANDED_TYPE: &str = "getExpandedType";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationRequest {
    pub location: SourceFileLocation,
}

/// Register the program's handlers on `connection`.
pub fn register_handlers(connection: &RpcConnection, program: Arc<Mutex<Program>>) {
    let tree_program = Arc::clone(&program);
    connection.set_handler(GET_TYPE_TREE, move |data| {
        let program = Arc::clone(&tree_program);
        async move {
            let LocationRequest { location } = parse_request(GET_TYPE_TREE, data)?;
            let tree = lock(&program)?.type_tree_at(&location);
            debug!(%location, found = tree.is_some(), "served type tree");
            Ok(serde_json::to_value(tree)?)
        }
    });

    connection.set_handler(GET_EXPANDED_TYPE, move |data| {
        let program = Arc::clone(&program);
        async move {
            let LocationRequest { location } = parse_request(GET_EXPANDED_TYPE, data)?;
            let expanded = lock(&program)?.expanded_type_at(&location);
            debug!(%location, ?expanded, "served expanded type");
            Ok(serde_json::to_value(expanded)?)
        }
    });
}

fn parse_request(key: &str, data: Value) -> anyhow::Result<LocationRequest> {
    serde_json::from_value(data).with_context(|| format!("invalid {key} request"))
}

fn lock(program: &Mutex<Program>) -> anyhow::Result<std::sync::MutexGuard<'_, Program>> {
    program
        .lock()
        .map_err(|_| anyhow::anyhow!("program state poisoned by an earlier panic"))
}

#[cfg(test)]
#[path = "../tests/server_tests.rs"]
mod tests;
