pub mod analyze;
pub mod find_name;
pub mod find_text;
pub mod render;
pub mod report;
pub mod spacing;
pub mod tokens;
pub mod tree;
pub mod typography;

use anyhow::{Context, Result};
use clap::Args;
use figinspect::{resolve_selector, FigmaClient, Node};
use tracing::info;

use crate::config::Settings;

/// File, optional node scope, optional descendant inside that scope.
#[derive(Args, Debug)]
pub struct Scope {
    /// Figma file key
    #[arg(value_name = "FILE_ID")]
    pub file_id: String,
    /// Node to fetch (`23:189` or `23-189`); whole document when omitted
    #[arg(value_name = "NODE_ID")]
    pub node_id: Option<String>,
    /// Narrow to a descendant by id or exact name
    #[arg(long, value_name = "ID|NAME")]
    pub select: Option<String>,
    /// Ask the API for at most this many levels below the fetched root
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub depth: Option<u32>,
}

/// Like [`Scope`] but the node id is mandatory.
#[derive(Args, Debug)]
pub struct NodeScope {
    /// Figma file key
    #[arg(value_name = "FILE_ID")]
    pub file_id: String,
    /// Node to fetch (`23:189` or `23-189`)
    #[arg(value_name = "NODE_ID")]
    pub node_id: String,
    /// Narrow to a descendant by id or exact name
    #[arg(long, value_name = "ID|NAME")]
    pub select: Option<String>,
    /// Ask the API for at most this many levels below the fetched root
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub depth: Option<u32>,
}

impl From<NodeScope> for Scope {
    fn from(scope: NodeScope) -> Self {
        Scope {
            file_id: scope.file_id,
            node_id: Some(scope.node_id),
            select: scope.select,
            depth: scope.depth,
        }
    }
}

/// Fetches the scope's subtree with one request and applies `--select`.
pub fn fetch_scope(settings: &Settings, scope: &Scope) -> Result<Node> {
    let client = FigmaClient::new(settings.client.clone())
        .context("failed to build the HTTP client")?;
    let root = client.fetch_root(&scope.file_id, scope.node_id.as_deref(), scope.depth)?;
    info!(
        file = %scope.file_id,
        node = %root.id,
        name = %root.name,
        "fetched subtree"
    );
    match scope.select.as_deref() {
        Some(selector) => Ok(resolve_selector(&root, selector)?.clone()),
        None => Ok(root),
    }
}
