//! Design tokens: named SOLID colours and text styles collected from a tree.
//!
//! Token names come from layer names, lower-cased, with whitespace runs
//! turned into `_` and anything outside `[a-z0-9_]` dropped. The first node
//! in pre-order to claim a name keeps it.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::color::hex_color;
use crate::node::Node;
use crate::walk::descendants;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DesignTokens {
    pub colors: BTreeMap<String, String>,
    pub fonts: BTreeMap<String, FontToken>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FontToken {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<f64>,
    /// Pixels when known, otherwise the percentage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
}

pub fn token_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_space = false;
    for ch in name.to_lowercase().chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_' {
            out.push(ch);
        }
    }
    out
}

pub fn extract_tokens(root: &Node) -> DesignTokens {
    let mut tokens = DesignTokens::default();
    for (_, node) in descendants(root) {
        let name = token_name(&node.name);
        for (index, paint) in node.fills.iter().enumerate() {
            let Some(color) = paint.solid_color() else {
                continue;
            };
            let key = if name.is_empty() {
                format!("color_{index}")
            } else {
                name.clone()
            };
            tokens
                .colors
                .entry(key)
                .or_insert_with(|| hex_color(&color));
        }
        if !node.is_text() {
            continue;
        }
        let Some(style) = &node.style else {
            continue;
        };
        let key = if name.is_empty() {
            "text_style".to_string()
        } else {
            name
        };
        tokens.fonts.entry(key).or_insert_with(|| FontToken {
            font_family: style.font_family.clone(),
            font_size: style.font_size,
            font_weight: style.font_weight,
            line_height: style.line_height_px.or(style.line_height_percent),
            letter_spacing: style.letter_spacing,
        });
    }
    tokens
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::node::{Color, NodeType, Paint, TypeStyle};

    fn screen() -> Node {
        serde_json::from_value(json!({
            "id": "1:1",
            "name": "Sign In",
            "type": "FRAME",
            "fills": [{"type": "SOLID", "color": {"r": 1, "g": 1, "b": 1, "a": 1}}],
            "children": [
                {
                    "id": "1:2",
                    "name": "Primary  Button!",
                    "type": "RECTANGLE",
                    "fills": [
                        {"type": "GRADIENT_LINEAR"},
                        {"type": "SOLID", "color": {"r": 0, "g": 0, "b": 1, "a": 0.5}}
                    ]
                },
                {
                    "id": "1:3",
                    "name": "Heading",
                    "type": "TEXT",
                    "characters": "Welcome",
                    "fills": [{"type": "SOLID", "color": {"r": 0, "g": 0, "b": 0, "a": 1}}],
                    "style": {"fontFamily": "Inter", "fontSize": 24, "fontWeight": 700,
                              "lineHeightPx": 29.05}
                },
                {
                    "id": "1:4",
                    "name": "Heading",
                    "type": "TEXT",
                    "characters": "Shadowed",
                    "style": {"fontFamily": "Poppins", "fontSize": 12}
                }
            ]
        }))
        .expect("screen parses")
    }

    #[test]
    fn names_are_lowercased_and_sanitized() {
        assert_eq!(token_name("Primary  Button!"), "primary_button");
        assert_eq!(token_name("Body / Large 2"), "body__large_2");
        assert_eq!(token_name("🎨"), "");
    }

    #[test]
    fn collects_solid_colours_and_text_styles() {
        let tokens = extract_tokens(&screen());
        assert_eq!(tokens.colors["sign_in"], "#ffffff");
        assert_eq!(tokens.colors["primary_button"], "#0000ff80");
        assert_eq!(tokens.colors["heading"], "#000000");
        assert_eq!(tokens.colors.len(), 3);

        let heading = &tokens.fonts["heading"];
        assert_eq!(heading.font_family.as_deref(), Some("Inter"), "first claim wins");
        assert_eq!(heading.line_height, Some(29.05));
        assert_eq!(tokens.fonts.len(), 1);
    }

    #[test]
    fn unnamed_layers_fall_back_to_positional_names() {
        let mut node = Node::new("2:1", "", NodeType::Text);
        node.fills = vec![Paint::solid(Color::rgb(1.0, 0.0, 0.0))];
        node.style = Some(TypeStyle::default());
        let tokens = extract_tokens(&node);
        assert_eq!(tokens.colors["color_0"], "#ff0000");
        assert!(tokens.fonts.contains_key("text_style"));
    }
}
