use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::corpus::{CorpusLayout, DEFAULT_ASSETS, DEFAULT_ROOT_TOC, DEFAULT_URL_PREFIX};
use crate::walk::ErrorPolicy;

/// HTTP client parameters (optional `[http]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// Optional User-Agent header; curl's default when missing.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 300,
            user_agent: None,
        }
    }
}

/// Global configuration loaded from `~/.config/tpk/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TpkConfig {
    /// Base URL every relative document path is appended to.
    pub url_prefix: String,
    /// Root table-of-contents document, relative to `url_prefix`.
    pub root_toc: String,
    /// Static files fetched after the tree walk (stylesheet and its companion).
    pub assets: Vec<String>,
    /// "abort" (default) stops at the first failure; "continue" collects failures.
    #[serde(default)]
    pub on_error: ErrorPolicy,
    #[serde(default)]
    pub http: HttpConfig,
}

impl Default for TpkConfig {
    fn default() -> Self {
        Self {
            url_prefix: DEFAULT_URL_PREFIX.to_string(),
            root_toc: DEFAULT_ROOT_TOC.to_string(),
            assets: DEFAULT_ASSETS.iter().map(|s| s.to_string()).collect(),
            on_error: ErrorPolicy::default(),
            http: HttpConfig::default(),
        }
    }
}

impl TpkConfig {
    pub fn layout(&self) -> CorpusLayout {
        CorpusLayout {
            url_prefix: self.url_prefix.clone(),
            root_toc: self.root_toc.clone(),
            assets: self.assets.clone(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("tpk")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<TpkConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = TpkConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: TpkConfig = toml::from_str(&data)?;
    Ok(cfg)
}
