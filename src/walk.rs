//! Pre-order traversal of a node tree and the lookups built on it.

use tracing::warn;

use crate::error::{InspectError, InspectResult};
use crate::node::{normalize_node_id, Node};

/// Nodes deeper than this are reported but not descended into.
pub const MAX_DEPTH: usize = 256;

/// Lazy pre-order iterator yielding `(depth, node)`, root at depth 0.
/// Siblings come out in the order of their parent's `children`.
#[derive(Clone, Debug)]
pub struct Descendants<'a> {
    stack: Vec<(usize, &'a Node)>,
    max_depth: usize,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        let children = node.children();
        if depth < self.max_depth {
            self.stack
                .extend(children.iter().rev().map(|child| (depth + 1, child)));
        } else if !children.is_empty() && self.max_depth == MAX_DEPTH {
            warn!(
                node = %node.id,
                depth,
                "depth cap reached; {} children not visited",
                children.len()
            );
        }
        Some((depth, node))
    }
}

pub fn descendants(root: &Node) -> Descendants<'_> {
    descendants_to(root, MAX_DEPTH)
}

/// Like [`descendants`] but stops descending below `max_depth`
/// (capped at [`MAX_DEPTH`]).
pub fn descendants_to(root: &Node, max_depth: usize) -> Descendants<'_> {
    Descendants {
        stack: vec![(0, root)],
        max_depth: max_depth.min(MAX_DEPTH),
    }
}

/// Calls `visit(node, depth)` once per node, parents before children.
pub fn walk<'a, F>(root: &'a Node, mut visit: F)
where
    F: FnMut(&'a Node, usize),
{
    for (depth, node) in descendants(root) {
        visit(node, depth);
    }
}

/// First node in pre-order whose id equals `id`.
pub fn find_by_id<'a>(root: &'a Node, id: &str) -> Option<&'a Node> {
    descendants(root)
        .map(|(_, node)| node)
        .find(|node| node.id == id)
}

/// First node in pre-order whose name equals `name` exactly.
pub fn find_by_name<'a>(root: &'a Node, name: &str) -> Option<&'a Node> {
    descendants(root)
        .map(|(_, node)| node)
        .find(|node| node.name == name)
}

/// Every node whose name contains one of `fragments`, ignoring case.
pub fn find_by_name_fragment<'a, S>(
    root: &'a Node,
    fragments: &'a [S],
) -> impl Iterator<Item = (usize, &'a Node)> + 'a
where
    S: AsRef<str>,
{
    let lowered: Vec<String> = fragments
        .iter()
        .map(|fragment| fragment.as_ref().to_lowercase())
        .collect();
    descendants(root).filter(move |(_, node)| {
        let name = node.name.to_lowercase();
        lowered.iter().any(|fragment| name.contains(fragment.as_str()))
    })
}

/// A TEXT node whose content matched a search.
#[derive(Clone, Copy, Debug)]
pub struct TextMatch<'a> {
    pub node: &'a Node,
    pub depth: usize,
    /// The first needle found in the text.
    pub needle: &'a str,
    pub text: &'a str,
}

/// TEXT nodes whose `characters` contain at least one needle
/// (case-sensitive), in document order.
pub fn find_text<'a, S>(root: &'a Node, needles: &'a [S]) -> impl Iterator<Item = TextMatch<'a>> + 'a
where
    S: AsRef<str>,
{
    descendants(root).filter_map(move |(depth, node)| {
        if !node.is_text() {
            return None;
        }
        let text = node.characters.as_deref()?;
        let needle = needles
            .iter()
            .map(|needle| needle.as_ref())
            .find(|needle: &&str| text.contains(*needle))?;
        Some(TextMatch {
            node,
            depth,
            needle,
            text,
        })
    })
}

/// Resolves a user-supplied id or name to a node inside `root`.
/// Ids win over names; a miss is `NotFound`.
pub fn resolve_selector<'a>(root: &'a Node, selector: &str) -> InspectResult<&'a Node> {
    find_by_id(root, &normalize_node_id(selector))
        .or_else(|| find_by_name(root, selector))
        .ok_or_else(|| {
            InspectError::not_found(format!("node `{selector}` under `{}`", root.name))
        })
}
