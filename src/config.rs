#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::infra::http::gateway::TotalCountMode;
use crate::usecase::state::DEFAULT_PAGE_SIZE;

pub const API_URL_ENV: &str = "TABLE_MANAGER_API_URL";
pub const PAGE_SIZE_ENV: &str = "TABLE_MANAGER_PAGE_SIZE";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub page_size: u32,
    pub total_count: TotalCountMode,
    /// `EnvFilter` directives; `RUST_LOG` wins when set.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            total_count: TotalCountMode::Auto,
            log_filter: "info,table_manager=debug".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("failed to parse config")
    }

    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(url) = lookup(API_URL_ENV).filter(|url| !url.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
        }
        if let Some(size) = lookup(PAGE_SIZE_ENV) {
            self.page_size = size
                .trim()
                .parse()
                .with_context(|| format!("{PAGE_SIZE_ENV} is not a number: {size}"))?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            bail!("page_size must be at least 1");
        }
        let url = self.api_base_url.as_str();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            bail!("api_base_url must be an http(s) URL, got '{url}'");
        }
        Ok(())
    }

    /// Reads `config.toml` from the platform config directory when present,
    /// then applies environment overrides.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self> {
        let path = default_config_path()?;
        let config = Self::load_from(&path)?
            .with_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// The browser has no config file; the base URL can be baked in at build time.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Result<Self> {
        let config = Self::default().with_env_overrides(|key| match key {
            API_URL_ENV => option_env!("TABLE_MANAGER_API_URL").map(str::to_string),
            _ => None,
        })?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn default_config_path() -> Result<PathBuf> {
    let project_dirs = directories::ProjectDirs::from("com", "tablemanager", "table-manager")
        .context("unable to resolve config directory")?;
    Ok(project_dirs.config_dir().join("config.toml"))
}
