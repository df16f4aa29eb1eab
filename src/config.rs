/// Application configuration
///
/// Loaded once at startup from `<config_dir>/watermarker/config.toml`.
/// A missing file means defaults; a partial file fills the gaps with
/// defaults. The defaults talk to a watermarking service on localhost.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: EndpointConfig,
    pub result: ResultConfig,
    pub share: ShareConfig,
    pub ui: UiConfig,
}

/// Where and how submissions are sent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Full URL of the watermarking endpoint
    pub url: String,
    /// Multipart field carrying the main image
    pub main_field: String,
    /// Multipart field carrying the watermark logo
    pub watermark_field: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:5001/add_watermark".to_string(),
            main_field: "main_image".to_string(),
            watermark_field: "watermark_image".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultConfig {
    /// How long the "Downloading..." indicator stays up after the save dialog closes
    pub download_feedback_ms: u64,
    pub share_title: String,
    pub share_text: String,
}

impl Default for ResultConfig {
    fn default() -> Self {
        Self {
            download_feedback_ms: 500,
            share_title: "Watermarked Image".to_string(),
            share_text: "Check out my watermarked image!".to_string(),
        }
    }
}

/// External command used to share a result.
///
/// Arguments may contain `{file}`, `{title}` and `{text}` placeholders.
/// Sharing is unsupported when no command is configured.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    pub command: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub theme: ThemeChoice,
}

/// Get the path where the config file is expected
///
/// - Linux: ~/.config/watermarker/config.toml
/// - macOS: ~/Library/Application Support/watermarker/config.toml
/// - Windows: %APPDATA%\watermarker\config.toml
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("watermarker")
        .join("config.toml")
}

pub fn load_config() -> Result<AppConfig> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents).context("Failed to parse config file")?;
    Ok(config)
}
