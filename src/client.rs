//! Blocking client for the read-only Figma endpoints:
//! `GET /v1/files/{file}`, `GET /v1/files/{file}/nodes?ids=...` and
//! `GET /v1/images/{file}?ids=...`.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{InspectError, InspectResult};
use crate::node::{normalize_node_id, Node};

pub const DEFAULT_API_BASE: &str = "https://api.figma.com";
pub const TOKEN_HEADER: &str = "X-Figma-Token";

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub token: String,
    pub api_base: String,
    /// `None` keeps the HTTP client's own default.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: None,
        }
    }
}

/// Either response envelope, unwrapped.
#[derive(Clone, Debug)]
pub enum FetchedTree {
    /// Whole-file fetch: the document root.
    Document(Node),
    /// Scoped fetch: node id to subtree root. Ids the API answered with
    /// `null` are absent.
    Nodes(BTreeMap<String, Node>),
}

#[derive(Deserialize)]
struct FileResponse {
    document: Node,
}

#[derive(Deserialize)]
struct NodesResponse {
    nodes: BTreeMap<String, Option<NodeEnvelope>>,
}

#[derive(Deserialize)]
struct NodeEnvelope {
    document: Node,
}

#[derive(Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    err: Option<String>,
    images: BTreeMap<String, Option<String>>,
}

/// Output formats the image endpoint renders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImageFormat {
    #[default]
    Png,
    Jpg,
    Svg,
    Pdf,
}

impl ImageFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Svg => "svg",
            ImageFormat::Pdf => "pdf",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderOptions {
    pub format: ImageFormat,
    /// Between 0.01 and 4; the API's own default (1) when `None`.
    pub scale: Option<f64>,
}

pub struct FigmaClient {
    http: Client,
    config: ClientConfig,
}

impl FigmaClient {
    pub fn new(config: ClientConfig) -> InspectResult<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self { http, config })
    }

    /// One GET against the file (no ids) or nodes (ids) endpoint. `depth`
    /// limits how many levels below each root the API returns.
    pub fn fetch(
        &self,
        file_id: &str,
        node_ids: &[String],
        depth: Option<u32>,
    ) -> InspectResult<FetchedTree> {
        let scoped = !node_ids.is_empty();
        let mut url = self.endpoint(&["files", file_id], scoped)?;
        let mut query = Vec::new();
        if scoped {
            let ids: Vec<String> = node_ids.iter().map(|id| normalize_node_id(id)).collect();
            query.push(("ids", ids.join(",")));
        }
        if let Some(depth) = depth {
            query.push(("depth", depth.to_string()));
        }
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &query {
                pairs.append_pair(key, value);
            }
        }
        if !scoped {
            let body: FileResponse = self.get_json(url, file_id)?;
            return Ok(FetchedTree::Document(body.document));
        }
        let body: NodesResponse = self.get_json(url, file_id)?;
        let nodes = body
            .nodes
            .into_iter()
            .filter_map(|(id, envelope)| envelope.map(|envelope| (id, envelope.document)))
            .collect();
        Ok(FetchedTree::Nodes(nodes))
    }

    pub fn fetch_document(&self, file_id: &str) -> InspectResult<Node> {
        self.fetch_root(file_id, None, None)
    }

    /// Subtree rooted at `node_id`; a null or missing entry is `NotFound`.
    pub fn fetch_node(&self, file_id: &str, node_id: &str) -> InspectResult<Node> {
        self.fetch_root(file_id, Some(node_id), None)
    }

    /// The subtree at `node_id` when an id is given, the document root
    /// otherwise.
    pub fn fetch_root(
        &self,
        file_id: &str,
        node_id: Option<&str>,
        depth: Option<u32>,
    ) -> InspectResult<Node> {
        let Some(node_id) = node_id else {
            return match self.fetch(file_id, &[], depth)? {
                FetchedTree::Document(document) => Ok(document),
                FetchedTree::Nodes(_) => Err(InspectError::malformed(
                    "expected a `document` envelope for a whole-file fetch",
                )),
            };
        };
        let id = normalize_node_id(node_id);
        match self.fetch(file_id, &[id.clone()], depth)? {
            FetchedTree::Nodes(mut nodes) => nodes.remove(&id).ok_or_else(|| {
                InspectError::not_found(format!("node `{id}` in file `{file_id}`"))
            }),
            FetchedTree::Document(_) => Err(InspectError::malformed(
                "expected a `nodes` envelope for a scoped fetch",
            )),
        }
    }

    /// Asks the image endpoint to render `node_ids`. Ids the API could not
    /// render map to `None`.
    pub fn render_urls(
        &self,
        file_id: &str,
        node_ids: &[String],
        options: RenderOptions,
    ) -> InspectResult<BTreeMap<String, Option<String>>> {
        let ids: Vec<String> = node_ids.iter().map(|id| normalize_node_id(id)).collect();
        let mut url = self.endpoint(&["images", file_id], false)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("ids", &ids.join(","));
            query.append_pair("format", options.format.as_str());
            if let Some(scale) = options.scale {
                query.append_pair("scale", &scale.to_string());
            }
        }
        let body: ImagesResponse = self.get_json(url, file_id)?;
        if let Some(err) = body.err.filter(|err| !err.is_empty()) {
            return Err(InspectError::transport(format!(
                "Figma could not render file `{file_id}`: {err}"
            )));
        }
        let mut images = body.images;
        let missing: Vec<&String> = ids.iter().filter(|id| !images.contains_key(*id)).collect();
        if !missing.is_empty() {
            warn!(?missing, "image response left out requested ids");
        }
        for id in ids {
            images.entry(id).or_insert(None);
        }
        Ok(images)
    }

    fn endpoint(&self, path: &[&str], scoped: bool) -> InspectResult<Url> {
        let mut url = Url::parse(&self.config.api_base).map_err(|err| {
            InspectError::transport(format!("invalid API base `{}`: {err}", self.config.api_base))
        })?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                InspectError::transport(format!(
                    "API base `{}` cannot take a path",
                    self.config.api_base
                ))
            })?;
            segments.pop_if_empty().push("v1").extend(path);
            if scoped {
                segments.push("nodes");
            }
        }
        Ok(url)
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url, file_id: &str) -> InspectResult<T> {
        debug!(%url, "GET");
        let resp = self
            .http
            .get(url)
            .header(TOKEN_HEADER, &self.config.token)
            .send()?;
        let status = resp.status();
        debug!(status = status.as_u16(), "response");
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(InspectError::Authentication {
                status: status.as_u16(),
            });
        }
        if status == StatusCode::NOT_FOUND {
            return Err(InspectError::not_found(format!("file `{file_id}`")));
        }
        if !status.is_success() {
            return Err(InspectError::transport(format!(
                "Figma API answered HTTP {status} for file `{file_id}`"
            )));
        }
        let body = resp.text()?;
        parse_body(&body)
    }
}

/// Deserializes a response body with no nesting limit. One tree level is
/// two levels of JSON (object and `children` array).
fn parse_body<T: DeserializeOwned>(body: &str) -> InspectResult<T> {
    let mut de = serde_json::Deserializer::from_str(body);
    de.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}
