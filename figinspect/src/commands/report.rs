use anyhow::Result;
use clap::Args;
use figinspect::{analyze_to, resolve_selector, Report};

use super::{fetch_scope, Scope};
use crate::config::{OutputFormat, Settings};

#[derive(Args, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub scope: Scope,
    /// Measure positions from this node's top-left corner (default: the root)
    #[arg(long, value_name = "ID|NAME")]
    pub relative_to: Option<String>,
    /// Deepest level to print or serialize (root = 0)
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,
    /// Output format; defaults to the config file's, then text
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

pub fn run(settings: &Settings, args: ReportArgs) -> Result<()> {
    let root = fetch_scope(settings, &args.scope)?;
    let anchor = match args.relative_to.as_deref() {
        Some(selector) => resolve_selector(&root, selector)?,
        None => &root,
    };
    let mut report = Report::relative_to(anchor);
    if let Some(max_depth) = args.max_depth {
        report.max_depth = max_depth;
    }
    match args.format.unwrap_or(settings.output_format) {
        OutputFormat::Text => print!("{}", report.render(&root)),
        OutputFormat::Json => {
            let analysis = analyze_to(&root, report.origin, report.max_depth);
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
    }
    Ok(())
}
