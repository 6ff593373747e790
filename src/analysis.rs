//! Nested, serializable attribute records for a node subtree.
//!
//! Field declaration order is the JSON key order.

use serde::Serialize;
use tracing::warn;

use crate::color::{hex_color, paint_hex};
use crate::node::{Effect, LayoutMode, Node, NodeType, Padding, Paint, PaintKind, Point, Rect};
use crate::typography::{has_overrides, style_runs};
use crate::walk::MAX_DEPTH;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeAnalysis {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Rect>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fills: Vec<PaintRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub strokes: Vec<StrokeRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typography: Option<TypographyRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<EffectRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NodeAnalysis>>,
}

/// A fill. `color` is `null` for anything but SOLID paints.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PaintRecord {
    pub color: Option<String>,
    pub opacity: f64,
    #[serde(rename = "type")]
    pub kind: PaintKind,
}

impl From<&Paint> for PaintRecord {
    fn from(paint: &Paint) -> Self {
        Self {
            color: paint_hex(paint),
            opacity: paint.opacity,
            kind: paint.kind.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StrokeRecord {
    #[serde(flatten)]
    pub paint: PaintRecord,
    pub width: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyRecord {
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: f64,
    pub letter_spacing: f64,
    pub line_height_px: Option<f64>,
    pub line_height_percent_font_size: Option<f64>,
    pub text_align: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<OverrideRecord>,
}

/// A run of characters whose effective style differs from the base.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideRecord {
    pub start: usize,
    pub end: usize,
    pub override_id: u32,
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<f64>,
    pub fill: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayoutRecord {
    pub mode: LayoutMode,
    pub spacing: f64,
    pub padding: Option<Padding>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EffectRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub color: Option<String>,
    pub offset: Option<Point>,
    pub radius: Option<f64>,
}

impl From<&Effect> for EffectRecord {
    fn from(effect: &Effect) -> Self {
        Self {
            kind: effect.kind.clone(),
            color: effect.color.as_ref().map(hex_color),
            offset: effect.offset,
            radius: effect.radius,
        }
    }
}

/// Builds the record tree for `node`. Dimensions are offsets from `origin`
/// when given, absolute otherwise.
pub fn analyze(node: &Node, origin: Option<Point>) -> NodeAnalysis {
    analyze_to(node, origin, MAX_DEPTH)
}

/// Like [`analyze`] but records no children below `max_depth` (root = 0).
/// Nodes at the limit keep `childrenCount` and omit `children`.
pub fn analyze_to(node: &Node, origin: Option<Point>, max_depth: usize) -> NodeAnalysis {
    analyze_at(node, origin, 0, max_depth.min(MAX_DEPTH))
}

/// Record tree with dimensions relative to `node`'s own top-left corner.
pub fn analyze_relative(node: &Node) -> NodeAnalysis {
    analyze(node, node.bounding_box.map(|bounds| bounds.origin()))
}

fn analyze_at(node: &Node, origin: Option<Point>, depth: usize, max_depth: usize) -> NodeAnalysis {
    let dimensions = node.bounding_box.map(|bounds| match origin {
        Some(origin) => bounds.relative_to(origin),
        None => bounds,
    });
    let stroke_width = node.stroke_weight.unwrap_or(1.0);

    let children = match node.children.as_ref() {
        Some(children) if depth >= max_depth => {
            if depth >= MAX_DEPTH && !children.is_empty() {
                warn!(node = %node.id, depth, "depth cap reached; children not analyzed");
            }
            None
        }
        Some(children) => Some(
            children
                .iter()
                .map(|child| analyze_at(child, origin, depth + 1, max_depth))
                .collect(),
        ),
        None => None,
    };

    NodeAnalysis {
        id: node.id.clone(),
        name: node.name.clone(),
        node_type: node.node_type.clone(),
        dimensions,
        fills: node.fills.iter().map(PaintRecord::from).collect(),
        strokes: node
            .strokes
            .iter()
            .map(|paint| StrokeRecord {
                paint: PaintRecord::from(paint),
                width: stroke_width,
            })
            .collect(),
        typography: typography(node),
        text_content: node.characters.clone(),
        layout: layout(node),
        corner_radius: node.corner_radius,
        opacity: node.opacity.filter(|opacity| *opacity < 1.0),
        effects: node.effects.iter().map(EffectRecord::from).collect(),
        children_count: node.children.as_ref().map(Vec::len),
        children,
    }
}

fn typography(node: &Node) -> Option<TypographyRecord> {
    let style = node.style.as_ref()?;
    let overrides = if node.node_type == NodeType::Text && has_overrides(node) {
        style_runs(node)
            .into_iter()
            .filter(|run| !run.is_base())
            .map(|run| OverrideRecord {
                start: run.range.start,
                end: run.range.end,
                override_id: run.override_id,
                fill: run
                    .style
                    .fills
                    .as_ref()
                    .and_then(|fills| fills.iter().find_map(paint_hex)),
                font_family: run.style.font_family,
                font_size: run.style.font_size,
                font_weight: run.style.font_weight,
            })
            .collect()
    } else {
        Vec::new()
    };
    Some(TypographyRecord {
        font_family: style.font_family.clone(),
        font_size: style.font_size,
        font_weight: style.font_weight.unwrap_or(400.0),
        letter_spacing: style.letter_spacing.unwrap_or(0.0),
        line_height_px: style.line_height_px,
        line_height_percent_font_size: style.line_height_percent_font_size,
        text_align: style
            .text_align_horizontal
            .clone()
            .unwrap_or_else(|| "LEFT".to_string()),
        overrides,
    })
}

fn layout(node: &Node) -> Option<LayoutRecord> {
    let mode = node.layout_mode?;
    Some(LayoutRecord {
        mode,
        spacing: node.item_spacing.unwrap_or(0.0),
        padding: node.padding(),
    })
}
