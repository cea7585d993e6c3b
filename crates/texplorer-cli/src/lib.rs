//! Shared plumbing for the `texplorer` and `texplorer-server` binaries.
//!
//! - [`program`]: a loaded program snapshot answering "type tree at location"
//! - [`server`]: RPC handlers exposing a [`Program`](program::Program)
//! - [`retriever`]: in-process and RPC-backed reference retrievers
//! - [`render`]: prints a localized tree as an indented outline

pub mod args;
pub mod program;
pub mod render;
pub mod retriever;
pub mod server;
pub mod tracing_config;

#[cfg(test)]
#[path = "../tests/fixtures.rs"]
mod fixtures;
