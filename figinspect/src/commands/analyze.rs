use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use figinspect::analyze_relative;

use super::{fetch_scope, NodeScope, Scope};
use crate::config::Settings;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub scope: NodeScope,
    /// Write the JSON here instead of stdout
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

pub fn run(settings: &Settings, args: AnalyzeArgs) -> Result<()> {
    let scope = Scope::from(args.scope);
    let target = fetch_scope(settings, &scope)?;
    let analysis = analyze_relative(&target);
    let json = serde_json::to_string_pretty(&analysis)?;
    let Some(out) = args.out else {
        println!("{json}");
        return Ok(());
    };
    if let Some(parent) = out.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&out, format!("{json}\n"))
        .with_context(|| format!("failed to write {}", out.display()))?;
    println!(
        "Analyzed `{}` ({}, {} children) -> {}",
        target.name,
        target.node_type,
        target.children().len(),
        out.display()
    );
    Ok(())
}
