use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_POST_ID: &str = "main-post";

/// Substrings the home page must contain. Matching is literal and case-sensitive.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PageExpectations {
    /// Every path must appear for the images check to pass.
    pub image_paths: Vec<String>,
    pub like_marker: String,
    pub share_marker: String,
    pub content_marker: String,
}

impl Default for PageExpectations {
    fn default() -> Self {
        Self {
            image_paths: vec![
                "/images/rezide-logo.png".to_string(),
                "/images/presentation.jpg".to_string(),
            ],
            like_marker: "Like".to_string(),
            share_marker: "Share".to_string(),
            content_marker: "Rezide is a modern real estate discovery platform".to_string(),
        }
    }
}

impl PageExpectations {
    /// Reject markers that would match any body.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.image_paths.is_empty() {
            anyhow::bail!("page.image_paths must list at least one path");
        }
        if self.image_paths.iter().any(|p| p.is_empty()) {
            anyhow::bail!("page.image_paths must not contain empty paths");
        }
        for (key, marker) in [
            ("like_marker", &self.like_marker),
            ("share_marker", &self.share_marker),
            ("content_marker", &self.content_marker),
        ] {
            if marker.is_empty() {
                anyhow::bail!("page.{key} must not be empty");
            }
        }
        Ok(())
    }
}

/// Contents of an optional TOML config file. Every key may be omitted.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub post_id: Option<String>,
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub page: PageExpectations,
}

/// Values supplied on the command line; these win over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub post_id: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct SmokeConfig {
    pub base_url: String,
    pub post_id: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    pub page: PageExpectations,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            post_id: DEFAULT_POST_ID.to_string(),
            timeout: None,
            page: PageExpectations::default(),
        }
    }
}

impl SmokeConfig {
    /// Layer CLI overrides over an optional file config over the defaults.
    pub fn resolve(file: Option<FileConfig>, overrides: Overrides) -> Self {
        let file = file.unwrap_or_default();
        let defaults = SmokeConfig::default();
        Self {
            base_url: overrides
                .base_url
                .or(file.base_url)
                .unwrap_or(defaults.base_url),
            post_id: overrides.post_id.or(file.post_id).unwrap_or(defaults.post_id),
            timeout: overrides
                .timeout_secs
                .or(file.timeout_secs)
                .map(Duration::from_secs),
            page: file.page,
        }
    }
}

/// Load run configuration from a TOML file.
pub fn load_config(path: &Path) -> anyhow::Result<FileConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: FileConfig =
        toml::from_str(&content).with_context(|| format!("Failed to parse config: {}", path.display()))?;
    if config.timeout_secs == Some(0) {
        anyhow::bail!("Invalid config {}: timeout_secs must be at least 1", path.display());
    }
    config
        .page
        .validate()
        .with_context(|| format!("Invalid config: {}", path.display()))?;
    Ok(config)
}
