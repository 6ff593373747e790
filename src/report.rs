//! Human-readable views of a node tree.

use std::fmt::Write as _;

use crate::color::{hex_rgb, hex_rgba};
use crate::node::{LayoutMode, Node, Point, Rect, TypeStyle};
use crate::typography::{base_style, has_overrides, run_text, style_runs};
use crate::walk::{descendants, descendants_to, MAX_DEPTH};

pub const DEFAULT_TEXT_LIMIT: usize = 60;

/// Bounding box of `node`, offset from `origin` when one is given.
pub fn relative_geometry(node: &Node, origin: Option<Point>) -> Option<Rect> {
    let bounds = node.bounding_box?;
    Some(match origin {
        Some(origin) => bounds.relative_to(origin),
        None => bounds,
    })
}

/// Single-line display form of some text: newlines escaped, at most
/// `limit` characters followed by `...` when cut.
pub fn truncate_text(text: &str, limit: usize) -> String {
    let escaped = text.replace('\n', "\\n");
    if escaped.chars().count() <= limit {
        return escaped;
    }
    let mut cut: String = escaped.chars().take(limit).collect();
    cut.push_str("...");
    cut
}

/// Formats a design-space number: integers without a fraction, everything
/// else with at most two decimals.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        return format!("{value:.0}");
    }
    let fixed = format!("{value:.2}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// The per-node report: name, type and geometry, plus text and fill details.
#[derive(Clone, Debug)]
pub struct Report {
    /// Geometry is printed relative to this point when set.
    pub origin: Option<Point>,
    pub text_limit: usize,
    pub max_depth: usize,
}

impl Default for Report {
    fn default() -> Self {
        Self {
            origin: None,
            text_limit: DEFAULT_TEXT_LIMIT,
            max_depth: MAX_DEPTH,
        }
    }
}

impl Report {
    /// Report whose coordinates are offsets from `ancestor`'s top-left corner.
    pub fn relative_to(ancestor: &Node) -> Self {
        Self {
            origin: ancestor.bounding_box.map(|bounds| bounds.origin()),
            ..Self::default()
        }
    }

    pub fn lines(&self, node: &Node, depth: usize) -> Vec<String> {
        let indent = "  ".repeat(depth);
        let mut head = format!("{indent}{} ({})", node.name, node.node_type);
        if let Some(rect) = relative_geometry(node, self.origin) {
            let _ = write!(
                head,
                " | x:{} y:{} w:{} h:{}",
                format_number(rect.x),
                format_number(rect.y),
                format_number(rect.width),
                format_number(rect.height)
            );
        }
        let mut lines = vec![head];

        if node.is_text() {
            let text = node.characters.as_deref().unwrap_or_default();
            lines.push(format!(
                "{indent}  text: \"{}\"",
                truncate_text(text, self.text_limit)
            ));
            if let Some(style) = &node.style {
                lines.push(format!("{indent}  font: {}", describe_style(style)));
            }
        }

        if let Some(color) = node.first_solid_fill().and_then(|paint| paint.solid_color()) {
            let mut fill = format!("{indent}  fill: {}", hex_rgb(&color));
            if color.a < 1.0 {
                let _ = write!(fill, " ({})", hex_rgba(&color));
            }
            lines.push(fill);
        }
        lines
    }

    /// Report for a whole subtree, one block per node in pre-order.
    pub fn render(&self, root: &Node) -> String {
        let mut out = String::new();
        for (depth, node) in descendants_to(root, self.max_depth) {
            for line in self.lines(node, depth) {
                out.push_str(&line);
                out.push('\n');
            }
        }
        out
    }
}

/// `Inter 24px weight 700 line-height 29.05px (121%) align CENTER`
pub fn describe_style(style: &TypeStyle) -> String {
    let mut parts = Vec::new();
    if let Some(family) = &style.font_family {
        parts.push(family.clone());
    }
    if let Some(size) = style.font_size {
        parts.push(format!("{}px", format_number(size)));
    }
    if let Some(weight) = style.font_weight {
        parts.push(format!("weight {}", format_number(weight)));
    }
    if let Some(line_height) = style.line_height_px {
        let mut entry = format!("line-height {}px", format_number(line_height));
        let percent = style
            .line_height_percent_font_size
            .or(style.line_height_percent);
        if let Some(percent) = percent {
            let _ = write!(entry, " ({}%)", format_number(percent));
        }
        parts.push(entry);
    }
    if let Some(spacing) = style.letter_spacing.filter(|spacing| *spacing != 0.0) {
        parts.push(format!("tracking {}", format_number(spacing)));
    }
    if let Some(align) = &style.text_align_horizontal {
        parts.push(format!("align {align}"));
    }
    if parts.is_empty() {
        return "(no style)".to_string();
    }
    parts.join(" ")
}

/// `name (id) [TYPE]`, two spaces of indent per level.
pub fn outline_line(node: &Node, depth: usize) -> String {
    format!(
        "{}{} ({}) [{}]",
        "  ".repeat(depth),
        node.name,
        node.id,
        node.node_type
    )
}

pub fn render_outline(root: &Node, max_depth: usize) -> String {
    let mut out = String::new();
    for (depth, node) in descendants_to(root, max_depth) {
        out.push_str(&outline_line(node, depth));
        out.push('\n');
    }
    out
}

/// Every TEXT node with its base style and, when present, the resolved
/// override runs.
pub fn render_typography(root: &Node) -> String {
    let mut out = String::new();
    for (_, node) in descendants(root).filter(|(_, node)| node.is_text()) {
        let text = node.characters.as_deref().unwrap_or_default();
        let _ = writeln!(out, "=== {} ({}) ===", node.name, node.id);
        let _ = writeln!(out, "  text: \"{}\"", truncate_text(text, DEFAULT_TEXT_LIMIT));
        let _ = writeln!(out, "  base: {}", describe_style(&base_style(node)));
        if let Some(color) = node.first_solid_fill().and_then(|paint| paint.solid_color()) {
            let _ = writeln!(out, "  fill: {}", hex_rgb(&color));
        }
        if has_overrides(node) {
            for run in style_runs(node).iter().filter(|run| !run.is_base()) {
                let _ = writeln!(
                    out,
                    "  override {} [{}..{}] \"{}\": {}",
                    run.override_id,
                    run.range.start,
                    run.range.end,
                    truncate_text(&run_text(node, run), DEFAULT_TEXT_LIMIT),
                    describe_style(&run.style)
                );
            }
        }
    }
    out
}

/// Every auto-layout container with its direction, gap and padding.
pub fn render_spacing(root: &Node) -> String {
    let mut out = String::new();
    for (depth, node) in descendants(root).filter(|(_, node)| node.is_auto_layout()) {
        let mode = match node.layout_mode {
            Some(LayoutMode::Horizontal) => "HORIZONTAL",
            Some(LayoutMode::Vertical) => "VERTICAL",
            Some(LayoutMode::Grid) => "GRID",
            _ => "OTHER",
        };
        let _ = write!(
            out,
            "{}{} ({}) {mode} gap:{}",
            "  ".repeat(depth),
            node.name,
            node.id,
            format_number(node.item_spacing.unwrap_or(0.0))
        );
        if let Some(padding) = node.padding() {
            let side = |value: Option<f64>| format_number(value.unwrap_or(0.0));
            let _ = write!(
                out,
                " padding:{} {} {} {}",
                side(padding.top),
                side(padding.right),
                side(padding.bottom),
                side(padding.left)
            );
        }
        out.push('\n');
    }
    out
}
