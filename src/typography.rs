//! Per-character style overrides on TEXT nodes.
//!
//! `characterStyleOverrides[i]` names the override applied to character
//! `i`; `0` and positions past the end of the array mean "base style".
//! Entries in `styleOverrideTable` are deltas and are laid over the base.

use std::ops::Range;

use crate::node::{Node, TypeStyle};

pub const BASE_STYLE: u32 = 0;

/// A maximal run of characters sharing one override id.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleRun {
    /// Character (not byte) range within `characters`.
    pub range: Range<usize>,
    pub override_id: u32,
    pub style: TypeStyle,
}

impl StyleRun {
    pub fn is_base(&self) -> bool {
        self.override_id == BASE_STYLE
    }
}

pub fn base_style(node: &Node) -> TypeStyle {
    node.style.clone().unwrap_or_default()
}

pub fn override_id_at(node: &Node, index: usize) -> u32 {
    node.character_style_overrides
        .get(index)
        .copied()
        .unwrap_or(BASE_STYLE)
}

/// Style in effect for the character at `index`. An id missing from the
/// table falls back to the base style.
pub fn effective_style_at(node: &Node, index: usize) -> TypeStyle {
    let base = base_style(node);
    match node.style_override_table.get(&override_id_at(node, index)) {
        Some(delta) => base.overlay(delta),
        None => base,
    }
}

/// Splits the node's text into runs of identical override id.
/// Empty for nodes without text.
pub fn style_runs(node: &Node) -> Vec<StyleRun> {
    let len = node
        .characters
        .as_deref()
        .map(|text| text.chars().count())
        .unwrap_or(0);
    let mut runs: Vec<StyleRun> = Vec::new();
    for index in 0..len {
        let id = override_id_at(node, index);
        if let Some(run) = runs.last_mut().filter(|run| run.override_id == id) {
            run.range.end = index + 1;
            continue;
        }
        runs.push(StyleRun {
            range: index..index + 1,
            override_id: id,
            style: effective_style_at(node, index),
        });
    }
    runs
}

/// True when any character uses a style other than the base.
pub fn has_overrides(node: &Node) -> bool {
    node.character_style_overrides
        .iter()
        .any(|&id| id != BASE_STYLE)
}

/// Text of `node` covered by `run`.
pub fn run_text(node: &Node, run: &StyleRun) -> String {
    node.characters
        .as_deref()
        .unwrap_or_default()
        .chars()
        .skip(run.range.start)
        .take(run.range.len())
        .collect()
}
