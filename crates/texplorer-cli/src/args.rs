use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use texplorer_common::{SourceFileLocation, TreeConfig, limits};

/// Options shared by every command that builds a type tree.
#[derive(Args, Debug, Clone)]
pub struct TreeArgs {
    /// Program snapshot (JSON) to load.
    #[arg(long)]
    pub program: PathBuf,

    /// Nodes deeper than this become `max depth` placeholders.
    #[arg(long = "max-depth", default_value_t = limits::DEFAULT_MAX_DEPTH)]
    pub max_depth: u32,

    /// Emit declared classes, interfaces, enums and aliases below the root
    /// as references that are expanded on demand.
    #[arg(long = "reference-defined-types")]
    pub reference_defined_types: bool,
}

impl TreeArgs {
    pub fn tree_config(&self) -> TreeConfig {
        TreeConfig::default()
            .with_max_depth(self.max_depth)
            .with_reference_defined_types(self.reference_defined_types)
    }
}

/// A zero-based source position.
#[derive(Args, Debug, Clone)]
pub struct LocationArgs {
    #[arg(long)]
    pub file: String,

    #[arg(long)]
    pub line: u32,

    #[arg(long)]
    pub character: u32,
}

impl LocationArgs {
    pub fn location(&self) -> SourceFileLocation {
        SourceFileLocation::at(self.file.clone(), self.line, self.character)
    }
}

#[derive(Parser, Debug)]
#[command(name = "texplorer", version, about = "Explore TypeScript types as trees")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the type tree of the symbol at a location.
    Inspect {
        #[command(flatten)]
        tree: TreeArgs,

        #[command(flatten)]
        location: LocationArgs,

        /// How many levels below the root to expand.
        #[arg(long = "expand-depth", default_value_t = 3)]
        expand_depth: u32,

        /// Fetch trees from a spawned `texplorer-server` instead of
        /// computing them in process.
        #[arg(long)]
        server: Option<PathBuf>,
    },
    /// Print the intersection-merged type of the symbol at a location.
    Expand {
        #[command(flatten)]
        tree: TreeArgs,

        #[command(flatten)]
        location: LocationArgs,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "texplorer-server",
    version,
    about = "Serve type trees over newline-delimited JSON on stdio"
)]
pub struct ServerArgs {
    #[command(flatten)]
    pub tree: TreeArgs,
}

#[cfg(test)]
#[path = "../tests/args_tests.rs"]
mod tests;
