// figinspect library entry point.
// Fetches Figma design node trees and turns them into reports, search
// results, design tokens and serializable attribute records.

pub mod analysis;
pub mod client;
pub mod color;
pub mod error;
pub mod node;
pub mod report;
pub mod tokens;
pub mod typography;
pub mod walk;

pub use analysis::{analyze, analyze_relative, analyze_to, NodeAnalysis};
pub use client::{ClientConfig, FetchedTree, FigmaClient, ImageFormat, RenderOptions};
pub use error::{InspectError, InspectResult};
pub use node::{Node, NodeType};
pub use report::Report;
pub use tokens::{extract_tokens, DesignTokens};
pub use walk::{descendants, find_by_id, find_by_name, find_text, resolve_selector, walk};
