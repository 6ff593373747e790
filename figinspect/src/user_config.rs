use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs::home_dir;
use serde::Deserialize;

use crate::config::OutputFormat;

/// `~/.figinspect/config.toml`. Every section is optional; the file itself
/// may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub auth: Option<AuthSection>,
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSection {
    pub token: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiSection {
    pub base: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputSection {
    pub format: Option<OutputFormat>,
}

impl UserConfig {
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let cfg: Self =
            toml::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(cfg)
    }

    pub fn token(&self) -> Option<&str> {
        self.auth
            .as_ref()
            .map(|a| a.token.as_str())
            .filter(|token| !token.is_empty())
    }
}

pub fn config_path() -> Option<PathBuf> {
    home_dir().map(|home| home.join(".figinspect").join("config.toml"))
}
