use anyhow::Result;
use clap::Args;
use figinspect::report::render_typography;

use super::{fetch_scope, NodeScope, Scope};
use crate::config::Settings;

#[derive(Args, Debug)]
pub struct TypographyArgs {
    #[command(flatten)]
    pub scope: NodeScope,
}

pub fn run(settings: &Settings, args: TypographyArgs) -> Result<()> {
    let root = fetch_scope(settings, &Scope::from(args.scope))?;
    let view = render_typography(&root);
    if view.is_empty() {
        println!("No text nodes under `{}`", root.name);
    } else {
        print!("{view}");
    }
    Ok(())
}
