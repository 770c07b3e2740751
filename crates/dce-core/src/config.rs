use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::codec::{Endpoints, DEFAULT_EXPORT_BASE, DEFAULT_QUERY_BASE};
use crate::params::{ExportParams, QueryParams};
use crate::session::Session;

/// Global configuration loaded from `~/.config/dce/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DceConfig {
    /// Base URL of the Export API (no query string).
    pub export_base_url: String,
    /// Base URL of the Query API; requests go to `<base>/?...`.
    pub query_base_url: String,
    /// Number of records shown by `dce preview` unless `--limit` is given.
    pub preview_rows: usize,
    /// Total timeout for the preview request, in seconds.
    pub timeout_secs: u64,
    /// Optional starting values for the export form; missing keys use built-in samples.
    #[serde(default)]
    pub export: Option<ExportParams>,
    /// Optional starting values for the query form.
    #[serde(default)]
    pub query: Option<QueryParams>,
}

impl Default for DceConfig {
    fn default() -> Self {
        Self {
            export_base_url: DEFAULT_EXPORT_BASE.to_string(),
            query_base_url: DEFAULT_QUERY_BASE.to_string(),
            preview_rows: 5,
            timeout_secs: 30,
            export: None,
            query: None,
        }
    }
}

impl DceConfig {
    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            export_base: self.export_base_url.clone(),
            query_base: self.query_base_url.clone(),
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// A fresh form session seeded with the configured defaults.
    pub fn session(&self) -> Session {
        Session::new(
            self.endpoints(),
            self.export.clone().unwrap_or_default(),
            self.query.clone().unwrap_or_default(),
        )
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("dce")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<DceConfig> {
    load_or_init_at(&config_path()?)
}

pub fn load_or_init_at(path: &Path) -> Result<DceConfig> {
    if !path.exists() {
        let default_cfg = DceConfig::default();
        let toml = default_cfg.to_toml_string()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: DceConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
