//! Outline rendering of a localized tree.
//!
//! ```text
//! arrayOfStrings: string[]
//! user: User
//!   name: string
//!   tags?: string[] …
//! ```
//!
//! Nodes that have children beyond `expand_depth` end in `…`.

use colored::Colorize;
use futures::FutureExt;
use futures::future::LocalBoxFuture;
use std::fmt::Write;
use texplorer_common::LocalizedTypeInfoOrError;
use texplorer_localize::{TypeInfoResolver, description, label};

const INDENT: &str = "  ";
const COLLAPSED_MARKER: &str = "…";

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Levels below the root whose children are localized and printed.
    pub expand_depth: u32,
    pub include_type_arguments: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            expand_depth: 3,
            include_type_arguments: true,
        }
    }
}

pub async fn render_tree(
    resolver: &TypeInfoResolver,
    root: &LocalizedTypeInfoOrError,
    options: RenderOptions,
) -> String {
    let mut out = String::new();
    render_node(resolver, root, 0, options, &mut out).await;
    out
}

fn render_node<'a>(
    resolver: &'a TypeInfoResolver,
    node: &'a LocalizedTypeInfoOrError,
    depth: u32,
    options: RenderOptions,
    out: &'a mut String,
) -> LocalBoxFuture<'a, ()> {
    async move {
        let has_children = node.info().is_some_and(|info| !info.children.is_empty());
        let collapsed = has_children && depth >= options.expand_depth;
        write_line(out, node, depth, collapsed);

        let Some(info) = node.info() else {
            return;
        };
        if !has_children || collapsed {
            return;
        }
        match resolver
            .localize_children(info, options.include_type_arguments)
            .await
        {
            Ok(children) => {
                for child in &children {
                    render_node(resolver, child, depth + 1, options, out).await;
                }
            }
            Err(err) => {
                let indent = INDENT.repeat(depth as usize + 1);
                let _ = writeln!(out, "{indent}{}", err.to_string().red());
            }
        }
    }
    .boxed_local()
}

fn write_line(out: &mut String, node: &LocalizedTypeInfoOrError, depth: u32, collapsed: bool) {
    let indent = INDENT.repeat(depth as usize);
    let label = label(node);
    let description = description(node);

    let _ = if node.is_error() {
        write!(out, "{indent}{}: {}", label.red().bold(), description.red())
    } else if label == description {
        write!(out, "{indent}{}", label.bold())
    } else {
        write!(out, "{indent}{}: {}", label.bold(), description.cyan())
    };
    if collapsed {
        let _ = write!(out, " {}", COLLAPSED_MARKER.dimmed());
    }
    out.push('\n');
}

#[cfg(test)]
#[path = "../tests/render_tests.rs"]
mod tests;
