use anyhow::Result;
use clap::Args;
use figinspect::extract_tokens;

use super::{fetch_scope, Scope};
use crate::config::Settings;

#[derive(Args, Debug)]
pub struct TokensArgs {
    #[command(flatten)]
    pub scope: Scope,
}

pub fn run(settings: &Settings, args: TokensArgs) -> Result<()> {
    let root = fetch_scope(settings, &args.scope)?;
    let tokens = extract_tokens(&root);
    println!("{}", serde_json::to_string_pretty(&tokens)?);
    Ok(())
}
