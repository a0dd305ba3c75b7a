use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "sitegen.json";

/// Top-level sitegen.json schema. Paths are relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Project root the other paths were resolved against.
    #[serde(skip, default = "default_root")]
    pub root: PathBuf,

    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    #[serde(default = "default_template")]
    pub template: PathBuf,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            content_dir: default_content_dir(),
            static_dir: default_static_dir(),
            template: default_template(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}
fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}
fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}
fn default_template() -> PathBuf {
    PathBuf::from("template.html")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("public")
}

impl SiteConfig {
    /// Resolve every relative path against `root`.
    pub fn rooted(self, root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            content_dir: root.join(self.content_dir),
            static_dir: root.join(self.static_dir),
            template: root.join(self.template),
            output_dir: root.join(self.output_dir),
        }
    }
}

/// Load config from a sitegen.json file, or return defaults if missing.
pub fn load_config(root: &Path) -> Result<SiteConfig> {
    let config_path = root.join(CONFIG_FILE);

    if config_path.exists() {
        let raw = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config: SiteConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;
        log::debug!("loaded {}: {config:?}", config_path.display());
        Ok(config)
    } else {
        Ok(SiteConfig::default())
    }
}
