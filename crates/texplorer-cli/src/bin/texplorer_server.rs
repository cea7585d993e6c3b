//! `texplorer-server`: answers type tree requests over stdio until stdin
//! closes.

use anyhow::Result;
use clap::Parser;
use std::sync::{Arc, Mutex};
use texplorer_cli::args::ServerArgs;
use texplorer_cli::program::Program;
use texplorer_cli::server::register_handlers;
use texplorer_cli::tracing_config;
use texplorer_rpc::{RpcConnection, Side};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_config::init_tracing();
    let args = ServerArgs::parse();
    let program = Program::load(&args.tree.program, args.tree.tree_config())?;

    let connection = RpcConnection::stdio(Side::Server);
    register_handlers(&connection, Arc::new(Mutex::new(program)));
    info!(program = %args.tree.program.display(), "texplorer-server ready");

    connection.closed().await;
    info!("stdin closed, shutting down");
    Ok(())
}
