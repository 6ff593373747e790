use std::time::Duration;

use anyhow::{bail, Result};
use clap::ValueEnum;
use figinspect::client::{ClientConfig, DEFAULT_API_BASE};
use serde::Deserialize;

use crate::user_config::{config_path, UserConfig};
use crate::GlobalArgs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Settings after merging flags, environment and the user config file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub client: ClientConfig,
    pub output_format: OutputFormat,
}

impl Settings {
    /// Flag or environment (clap merges those) wins over the config file,
    /// which wins over built-in defaults.
    pub fn resolve(global: &GlobalArgs, user: &UserConfig) -> Result<Self> {
        let token = match global.token.as_deref().or_else(|| user.token()) {
            Some(token) if !token.trim().is_empty() => token.trim().to_string(),
            _ => {
                let location = config_path()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "~/.figinspect/config.toml".to_string());
                bail!(
                    "no Figma access token; pass --token, set FIGMA_TOKEN, or add [auth] token to {location}"
                );
            }
        };
        let api_base = global
            .api_base
            .clone()
            .or_else(|| user.api.base.clone())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let timeout = global
            .timeout
            .or(user.api.timeout_secs)
            .map(Duration::from_secs);
        Ok(Self {
            client: ClientConfig {
                token,
                api_base,
                timeout,
            },
            output_format: user.output.format.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user_config::{ApiSection, AuthSection, OutputSection};

    fn globals(token: Option<&str>) -> GlobalArgs {
        GlobalArgs {
            token: token.map(str::to_string),
            api_base: None,
            timeout: None,
            verbose: 0,
        }
    }

    fn file_config() -> UserConfig {
        UserConfig {
            auth: Some(AuthSection {
                token: "from-file".into(),
            }),
            api: ApiSection {
                base: Some("http://localhost:1".into()),
                timeout_secs: Some(3),
            },
            output: OutputSection {
                format: Some(OutputFormat::Json),
            },
        }
    }

    #[test]
    fn flags_override_the_config_file() {
        let mut global = globals(Some("from-flag"));
        global.timeout = Some(9);
        let settings = Settings::resolve(&global, &file_config()).unwrap();
        assert_eq!(settings.client.token, "from-flag");
        assert_eq!(settings.client.timeout, Some(Duration::from_secs(9)));
        assert_eq!(settings.client.api_base, "http://localhost:1");
        assert_eq!(settings.output_format, OutputFormat::Json);
    }

    #[test]
    fn falls_back_to_file_then_defaults() {
        let settings = Settings::resolve(&globals(None), &file_config()).unwrap();
        assert_eq!(settings.client.token, "from-file");

        let bare = UserConfig {
            auth: Some(AuthSection {
                token: "t".into(),
            }),
            ..UserConfig::default()
        };
        let settings = Settings::resolve(&globals(None), &bare).unwrap();
        assert_eq!(settings.client.api_base, DEFAULT_API_BASE);
        assert_eq!(settings.client.timeout, None);
        assert_eq!(settings.output_format, OutputFormat::Text);
    }

    #[test]
    fn missing_token_is_an_error() {
        let err = Settings::resolve(&globals(None), &UserConfig::default()).unwrap_err();
        assert!(err.to_string().contains("FIGMA_TOKEN"));
        assert!(Settings::resolve(&globals(Some("  ")), &UserConfig::default()).is_err());
    }
}
