use anyhow::Result;
use clap::Args;
use figinspect::report::{format_number, relative_geometry, truncate_text, DEFAULT_TEXT_LIMIT};
use figinspect::{find_text, InspectError};

use super::{fetch_scope, Scope};
use crate::config::Settings;

#[derive(Args, Debug)]
pub struct FindTextArgs {
    /// Figma file key
    #[arg(value_name = "FILE_ID")]
    pub file_id: String,
    /// Substrings to look for (case-sensitive)
    #[arg(value_name = "SUBSTRING", required = true)]
    pub needles: Vec<String>,
    /// Search only under this node instead of the whole document
    #[arg(long, value_name = "NODE_ID")]
    pub node: Option<String>,
}

pub fn run(settings: &Settings, args: FindTextArgs) -> Result<()> {
    let scope = Scope {
        file_id: args.file_id,
        node_id: args.node,
        select: None,
        depth: None,
    };
    let root = fetch_scope(settings, &scope)?;
    let origin = root.bounding_box.map(|bounds| bounds.origin());
    let mut found = 0usize;
    for hit in find_text(&root, &args.needles) {
        found += 1;
        let mut line = format!(
            "{}FOUND: {} ({}) - \"{}\"",
            "  ".repeat(hit.depth),
            hit.node.name,
            hit.node.id,
            truncate_text(hit.text, DEFAULT_TEXT_LIMIT)
        );
        if let Some(rect) = relative_geometry(hit.node, origin) {
            line.push_str(&format!(
                " | x:{} y:{}",
                format_number(rect.x),
                format_number(rect.y)
            ));
        }
        println!("{line}");
    }
    if found == 0 {
        return Err(InspectError::not_found(format!(
            "text containing {} in file `{}`",
            args.needles.join(" | "),
            scope.file_id
        ))
        .into());
    }
    Ok(())
}
