//! `texplorer`: print type trees and merged types from a program snapshot.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::process::Stdio;
use std::rc::Rc;
use std::sync::Arc;
use texplorer_cli::args::{CliArgs, Command, LocationArgs, TreeArgs};
use texplorer_cli::program::Program;
use texplorer_cli::render::{RenderOptions, render_tree};
use texplorer_cli::retriever::{RpcRetriever, local_retriever};
use texplorer_cli::tracing_config;
use texplorer_common::TypeInfo;
use texplorer_localize::TypeInfoResolver;
use texplorer_rpc::{RpcConnection, Side};
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_config::init_tracing();
    let args = CliArgs::parse();

    match args.command {
        Command::Inspect {
            tree,
            location,
            expand_depth,
            server,
        } => {
            let options = RenderOptions {
                expand_depth,
                ..RenderOptions::default()
            };
            match server {
                Some(server) => inspect_remote(&server, &tree, &location, options).await,
                None => inspect_local(&tree, &location, options).await,
            }
        }
        Command::Expand { tree, location } => {
            let mut program = Program::load(&tree.program, tree.tree_config())?;
            let location = location.location();
            let expanded = program
                .expanded_type_at(&location)
                .with_context(|| format!("no symbol at {location}"))?;
            println!("{expanded}");
            Ok(())
        }
    }
}

async fn inspect_local(tree: &TreeArgs, location: &LocationArgs, options: RenderOptions) -> Result<()> {
    let program = Rc::new(Program::load(&tree.program, tree.tree_config())?);
    let location = location.location();
    let root = program
        .type_tree_at(&location)
        .with_context(|| format!("no symbol at {location}"))?;

    let resolver = TypeInfoResolver::with_retriever(local_retriever(Rc::clone(&program)));
    print_tree(&resolver, root, options).await;
    Ok(())
}

async fn inspect_remote(
    server: &Path,
    tree: &TreeArgs,
    location: &LocationArgs,
    options: RenderOptions,
) -> Result<()> {
    let mut command = tokio::process::Command::new(server);
    command
        .arg("--program")
        .arg(&tree.program)
        .arg("--max-depth")
        .arg(tree.max_depth.to_string())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .kill_on_drop(true);
    if tree.reference_defined_types {
        command.arg("--reference-defined-types");
    }
    let mut child = command
        .spawn()
        .with_context(|| format!("failed to start {}", server.display()))?;
    debug!(server = %server.display(), pid = ?child.id(), "spawned type server");

    let stdin = child.stdin.take().context("type server stdin unavailable")?;
    let stdout = child.stdout.take().context("type server stdout unavailable")?;
    let retriever = RpcRetriever::new(RpcConnection::new(Side::Client, stdout, stdin));

    let location = location.location();
    let root = retriever
        .type_tree_at(&location)
        .await?
        .with_context(|| format!("no symbol at {location}"))?;

    let resolver = TypeInfoResolver::with_retriever(retriever);
    print_tree(&resolver, root, options).await;
    Ok(())
}

async fn print_tree(resolver: &TypeInfoResolver, root: TypeInfo, options: RenderOptions) {
    let root = resolver.localize(&Arc::new(root)).await;
    print!("{}", render_tree(resolver, &root, options).await);
}
