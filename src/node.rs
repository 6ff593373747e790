//! Read-only model of the node documents returned by the Figma REST API.
//!
//! Every field the API may omit is optional or defaulted, so a partial
//! document still deserializes. Only the properties the inspectors look at
//! are modelled; anything else in the payload is ignored.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum NodeType {
    Document,
    Canvas,
    Frame,
    Group,
    Section,
    Text,
    Rectangle,
    Ellipse,
    Line,
    Vector,
    Star,
    RegularPolygon,
    BooleanOperation,
    Slice,
    Component,
    ComponentSet,
    Instance,
    Other(String),
}

impl NodeType {
    pub fn as_str(&self) -> &str {
        match self {
            NodeType::Document => "DOCUMENT",
            NodeType::Canvas => "CANVAS",
            NodeType::Frame => "FRAME",
            NodeType::Group => "GROUP",
            NodeType::Section => "SECTION",
            NodeType::Text => "TEXT",
            NodeType::Rectangle => "RECTANGLE",
            NodeType::Ellipse => "ELLIPSE",
            NodeType::Line => "LINE",
            NodeType::Vector => "VECTOR",
            NodeType::Star => "STAR",
            NodeType::RegularPolygon => "REGULAR_POLYGON",
            NodeType::BooleanOperation => "BOOLEAN_OPERATION",
            NodeType::Slice => "SLICE",
            NodeType::Component => "COMPONENT",
            NodeType::ComponentSet => "COMPONENT_SET",
            NodeType::Instance => "INSTANCE",
            NodeType::Other(raw) => raw.as_str(),
        }
    }
}

impl From<String> for NodeType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "DOCUMENT" => NodeType::Document,
            "CANVAS" => NodeType::Canvas,
            "FRAME" => NodeType::Frame,
            "GROUP" => NodeType::Group,
            "SECTION" => NodeType::Section,
            "TEXT" => NodeType::Text,
            "RECTANGLE" => NodeType::Rectangle,
            "ELLIPSE" => NodeType::Ellipse,
            "LINE" => NodeType::Line,
            "VECTOR" => NodeType::Vector,
            "STAR" => NodeType::Star,
            "REGULAR_POLYGON" => NodeType::RegularPolygon,
            "BOOLEAN_OPERATION" => NodeType::BooleanOperation,
            "SLICE" => NodeType::Slice,
            "COMPONENT" => NodeType::Component,
            "COMPONENT_SET" => NodeType::ComponentSet,
            "INSTANCE" => NodeType::Instance,
            _ => NodeType::Other(raw),
        }
    }
}

impl From<NodeType> for String {
    fn from(kind: NodeType) -> Self {
        match kind {
            NodeType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl Default for NodeType {
    fn default() -> Self {
        NodeType::Other("UNKNOWN".to_string())
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Point {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

/// Absolute position and size in design-space units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Rect {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

impl Rect {
    pub fn origin(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }

    /// Same size, position expressed as an offset from `origin`.
    pub fn relative_to(&self, origin: Point) -> Rect {
        Rect {
            x: self.x - origin.x,
            y: self.y - origin.y,
            width: self.width,
            height: self.height,
        }
    }
}

/// RGBA colour, each channel in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct Color {
    #[serde(default)]
    pub r: f64,
    #[serde(default)]
    pub g: f64,
    #[serde(default)]
    pub b: f64,
    #[serde(default = "one")]
    pub a: f64,
}

impl Color {
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum PaintKind {
    Solid,
    GradientLinear,
    GradientRadial,
    GradientAngular,
    GradientDiamond,
    Image,
    Emoji,
    Video,
    Other(String),
}

impl PaintKind {
    pub fn as_str(&self) -> &str {
        match self {
            PaintKind::Solid => "SOLID",
            PaintKind::GradientLinear => "GRADIENT_LINEAR",
            PaintKind::GradientRadial => "GRADIENT_RADIAL",
            PaintKind::GradientAngular => "GRADIENT_ANGULAR",
            PaintKind::GradientDiamond => "GRADIENT_DIAMOND",
            PaintKind::Image => "IMAGE",
            PaintKind::Emoji => "EMOJI",
            PaintKind::Video => "VIDEO",
            PaintKind::Other(raw) => raw.as_str(),
        }
    }
}

impl From<String> for PaintKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "SOLID" => PaintKind::Solid,
            "GRADIENT_LINEAR" => PaintKind::GradientLinear,
            "GRADIENT_RADIAL" => PaintKind::GradientRadial,
            "GRADIENT_ANGULAR" => PaintKind::GradientAngular,
            "GRADIENT_DIAMOND" => PaintKind::GradientDiamond,
            "IMAGE" => PaintKind::Image,
            "EMOJI" => PaintKind::Emoji,
            "VIDEO" => PaintKind::Video,
            _ => PaintKind::Other(raw),
        }
    }
}

impl From<PaintKind> for String {
    fn from(kind: PaintKind) -> Self {
        match kind {
            PaintKind::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for PaintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fill or stroke descriptor.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Paint {
    #[serde(rename = "type")]
    pub kind: PaintKind,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default = "one")]
    pub opacity: f64,
    #[serde(default = "yes")]
    pub visible: bool,
}

impl Paint {
    pub fn solid(color: Color) -> Self {
        Self {
            kind: PaintKind::Solid,
            color: Some(color),
            opacity: 1.0,
            visible: true,
        }
    }

    /// The colour of a SOLID paint; every other kind has no displayable colour.
    pub fn solid_color(&self) -> Option<Color> {
        match self.kind {
            PaintKind::Solid => self.color,
            _ => None,
        }
    }
}

/// Text typography. On a TEXT node this is the base style; inside a
/// style override table every field is optional and only the present ones
/// differ from the base.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypeStyle {
    pub font_family: Option<String>,
    pub font_post_script_name: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<f64>,
    pub italic: Option<bool>,
    pub letter_spacing: Option<f64>,
    pub line_height_px: Option<f64>,
    pub line_height_percent: Option<f64>,
    pub line_height_percent_font_size: Option<f64>,
    pub text_align_horizontal: Option<String>,
    pub text_align_vertical: Option<String>,
    pub text_case: Option<String>,
    pub text_decoration: Option<String>,
    pub fills: Option<Vec<Paint>>,
}

impl TypeStyle {
    /// `delta` laid over `self`: fields present in `delta` win, the rest
    /// come from `self`.
    pub fn overlay(&self, delta: &TypeStyle) -> TypeStyle {
        fn pick<T: Clone>(delta: &Option<T>, base: &Option<T>) -> Option<T> {
            delta.as_ref().or(base.as_ref()).cloned()
        }
        TypeStyle {
            font_family: pick(&delta.font_family, &self.font_family),
            font_post_script_name: pick(&delta.font_post_script_name, &self.font_post_script_name),
            font_size: pick(&delta.font_size, &self.font_size),
            font_weight: pick(&delta.font_weight, &self.font_weight),
            italic: pick(&delta.italic, &self.italic),
            letter_spacing: pick(&delta.letter_spacing, &self.letter_spacing),
            line_height_px: pick(&delta.line_height_px, &self.line_height_px),
            line_height_percent: pick(&delta.line_height_percent, &self.line_height_percent),
            line_height_percent_font_size: pick(
                &delta.line_height_percent_font_size,
                &self.line_height_percent_font_size,
            ),
            text_align_horizontal: pick(&delta.text_align_horizontal, &self.text_align_horizontal),
            text_align_vertical: pick(&delta.text_align_vertical, &self.text_align_vertical),
            text_case: pick(&delta.text_case, &self.text_case),
            text_decoration: pick(&delta.text_decoration, &self.text_decoration),
            fills: pick(&delta.fills, &self.fills),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Effect {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub offset: Option<Point>,
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default)]
    pub spread: Option<f64>,
    #[serde(default = "yes")]
    pub visible: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutMode {
    None,
    Horizontal,
    Vertical,
    Grid,
    #[serde(other)]
    Other,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Padding {
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,
}

/// One element of a design file's document tree.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Node {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub visible: Option<bool>,
    #[serde(rename = "absoluteBoundingBox", alias = "boundingBox")]
    pub bounding_box: Option<Rect>,
    pub fills: Vec<Paint>,
    pub strokes: Vec<Paint>,
    pub stroke_weight: Option<f64>,
    pub style: Option<TypeStyle>,
    pub characters: Option<String>,
    pub character_style_overrides: Vec<u32>,
    pub style_override_table: BTreeMap<u32, TypeStyle>,
    pub layout_mode: Option<LayoutMode>,
    pub item_spacing: Option<f64>,
    pub padding_top: Option<f64>,
    pub padding_right: Option<f64>,
    pub padding_bottom: Option<f64>,
    pub padding_left: Option<f64>,
    pub corner_radius: Option<f64>,
    pub opacity: Option<f64>,
    pub effects: Vec<Effect>,
    pub children: Option<Vec<Node>>,
}

impl Node {
    pub fn new(id: impl Into<String>, name: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            node_type,
            ..Self::default()
        }
    }

    /// Children in document (z / reading) order; empty for leaves.
    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    pub fn is_auto_layout(&self) -> bool {
        matches!(self.layout_mode, Some(mode) if mode != LayoutMode::None)
    }

    /// The first SOLID fill, if any.
    pub fn first_solid_fill(&self) -> Option<&Paint> {
        self.fills.iter().find(|paint| paint.solid_color().is_some())
    }

    pub fn padding(&self) -> Option<Padding> {
        let padding = Padding {
            top: self.padding_top,
            right: self.padding_right,
            bottom: self.padding_bottom,
            left: self.padding_left,
        };
        let any = padding.top.is_some()
            || padding.right.is_some()
            || padding.bottom.is_some()
            || padding.left.is_some();
        any.then_some(padding)
    }
}

/// Accepts the URL form of a node id (`23-189`) as well as the API form
/// (`23:189`) and returns the API form.
pub fn normalize_node_id(raw: &str) -> String {
    raw.trim().replace('-', ":")
}

fn one() -> f64 {
    1.0
}

fn yes() -> bool {
    true
}
