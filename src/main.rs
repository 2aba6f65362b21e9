#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

#[cfg(not(target_arch = "wasm32"))]
use anyhow::{Context, Result};

use crate::app::{App, ConfigState};
use crate::config::AppConfig;
use crate::logging::init_logging;

mod app;
mod config;
mod logging;

mod domain {
    pub mod entities {
        pub mod row;
        pub mod table;
    }
    pub mod validation;
}

mod infra {
    pub mod http {
        pub mod gateway;
        pub mod wire;
    }
}

mod platform {
    pub mod confirm;
}

mod ui {
    pub mod components {
        pub mod add_record_modal;
        pub mod data_table;
        pub mod table_creator;
        pub mod table_list;
    }
    pub mod state {
        pub mod app_state;
        pub mod forms;
    }
    pub mod styles;
}

mod usecase {
    pub mod ports {
        pub mod gateway;
    }
    pub mod services {
        pub mod table_store;
    }
    pub mod state;
}


fn main() {
    let config: ConfigState = AppConfig::load().map_err(|err| format!("{err:#}"));

    let filter = config
        .as_ref()
        .map(|config| config.log_filter.clone())
        .unwrap_or_else(|_| AppConfig::default().log_filter);
    if let Err(err) = init_logging(&filter) {
        eprintln!("logging disabled: {err:#}");
    }
    match &config {
        Ok(config) => tracing::info!(
            api = %config.api_base_url,
            page_size = config.page_size,
            "starting table manager"
        ),
        Err(err) => tracing::error!(%err, "configuration failed"),
    }

    launch(config);
}

#[cfg(all(feature = "desktop", not(feature = "web")))]
fn launch(config: ConfigState) {
    let mut desktop = dioxus::desktop::Config::new()
        .with_window(dioxus::desktop::WindowBuilder::new().with_title("Table Manager"));
    match default_webview_data_dir() {
        Ok(dir) => desktop = desktop.with_data_directory(dir),
        Err(err) => tracing::warn!(error = %format!("{err:#}"), "using default webview data dir"),
    }

    dioxus::LaunchBuilder::desktop()
        .with_cfg(desktop)
        .with_context(config)
        .launch(App);
}

#[cfg(any(feature = "web", not(feature = "desktop")))]
fn launch(config: ConfigState) {
    dioxus::LaunchBuilder::new().with_context(config).launch(App);
}

#[cfg(not(target_arch = "wasm32"))]
fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

#[cfg(not(target_arch = "wasm32"))]
fn default_webview_data_dir() -> Result<PathBuf> {
    let project_dirs = directories::ProjectDirs::from("com", "tablemanager", "table-manager")
        .context("unable to resolve data directory")?;
    ensure_webview_data_dir(project_dirs.data_local_dir())
}
