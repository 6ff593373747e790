use anyhow::Result;
use clap::Args;
use figinspect::report::render_outline;
use figinspect::walk::MAX_DEPTH;

use super::{fetch_scope, Scope};
use crate::config::Settings;

#[derive(Args, Debug)]
pub struct TreeArgs {
    #[command(flatten)]
    pub scope: Scope,
    /// Deepest level to print (root = 0)
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,
}

pub fn run(settings: &Settings, args: TreeArgs) -> Result<()> {
    let root = fetch_scope(settings, &args.scope)?;
    print!("{}", render_outline(&root, args.max_depth.unwrap_or(MAX_DEPTH)));
    Ok(())
}
