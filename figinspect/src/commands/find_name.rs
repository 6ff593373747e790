use anyhow::Result;
use clap::Args;
use figinspect::report::{format_number, relative_geometry};
use figinspect::walk::find_by_name_fragment;
use figinspect::InspectError;

use super::{fetch_scope, Scope};
use crate::config::Settings;

#[derive(Args, Debug)]
pub struct FindNameArgs {
    /// Figma file key
    #[arg(value_name = "FILE_ID")]
    pub file_id: String,
    /// Name fragments to look for (case-insensitive)
    #[arg(value_name = "FRAGMENT", required = true)]
    pub fragments: Vec<String>,
    /// Search only under this node instead of the whole document
    #[arg(long, value_name = "NODE_ID")]
    pub node: Option<String>,
}

pub fn run(settings: &Settings, args: FindNameArgs) -> Result<()> {
    let scope = Scope {
        file_id: args.file_id,
        node_id: args.node,
        select: None,
        depth: None,
    };
    let root = fetch_scope(settings, &scope)?;
    let origin = root.bounding_box.map(|bounds| bounds.origin());
    let mut found = 0usize;
    for (_, node) in find_by_name_fragment(&root, &args.fragments) {
        found += 1;
        println!("{} ({}) [{}]", node.name, node.id, node.node_type);
        if let Some(rect) = relative_geometry(node, origin) {
            println!(
                "  position: x={}, y={}",
                format_number(rect.x),
                format_number(rect.y)
            );
            println!(
                "  size: {}x{}",
                format_number(rect.width),
                format_number(rect.height)
            );
        }
    }
    if found == 0 {
        return Err(InspectError::not_found(format!(
            "node named like {} in file `{}`",
            args.fragments.join(" | "),
            scope.file_id
        ))
        .into());
    }
    Ok(())
}
