use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use figinspect::{FigmaClient, ImageFormat, InspectError, RenderOptions};

use crate::config::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RenderFormat {
    #[default]
    Png,
    Jpg,
    Svg,
    Pdf,
}

impl From<RenderFormat> for ImageFormat {
    fn from(format: RenderFormat) -> Self {
        match format {
            RenderFormat::Png => ImageFormat::Png,
            RenderFormat::Jpg => ImageFormat::Jpg,
            RenderFormat::Svg => ImageFormat::Svg,
            RenderFormat::Pdf => ImageFormat::Pdf,
        }
    }
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Figma file key
    #[arg(value_name = "FILE_ID")]
    pub file_id: String,
    /// Nodes to render (`23:189` or `23-189`)
    #[arg(value_name = "NODE_ID", required = true)]
    pub node_ids: Vec<String>,
    #[arg(long, value_enum, default_value_t = RenderFormat::Png)]
    pub format: RenderFormat,
    /// Scale factor, 0.01 to 4
    #[arg(long, value_name = "FACTOR")]
    pub scale: Option<f64>,
}

pub fn run(settings: &Settings, args: RenderArgs) -> Result<()> {
    if let Some(scale) = args.scale {
        if !(0.01..=4.0).contains(&scale) {
            bail!("--scale must be between 0.01 and 4, got {scale}");
        }
    }
    let client = FigmaClient::new(settings.client.clone())
        .context("failed to build the HTTP client")?;
    let options = RenderOptions {
        format: args.format.into(),
        scale: args.scale,
    };
    let images = client.render_urls(&args.file_id, &args.node_ids, options)?;
    let mut missing = Vec::new();
    for (id, url) in &images {
        match url {
            Some(url) => println!("{id} {url}"),
            None => missing.push(id.as_str()),
        }
    }
    if !missing.is_empty() {
        return Err(InspectError::not_found(format!(
            "rendered image for {} in file `{}`",
            missing.join(", "),
            args.file_id
        ))
        .into());
    }
    Ok(())
}
