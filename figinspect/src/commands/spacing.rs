use anyhow::Result;
use clap::Args;
use figinspect::report::render_spacing;

use super::{fetch_scope, NodeScope, Scope};
use crate::config::Settings;

#[derive(Args, Debug)]
pub struct SpacingArgs {
    #[command(flatten)]
    pub scope: NodeScope,
}

pub fn run(settings: &Settings, args: SpacingArgs) -> Result<()> {
    let root = fetch_scope(settings, &Scope::from(args.scope))?;
    let view = render_spacing(&root);
    if view.is_empty() {
        println!("No auto-layout containers under `{}`", root.name);
    } else {
        print!("{view}");
    }
    Ok(())
}
