mod app;
mod domain;
mod infra;
mod platform;
mod ui;
mod usecase;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use tracing::{info, warn};

use crate::app::{App, AppConfig};
use crate::infra::sqlite::settings::SqliteSettingsStore;
use crate::usecase::services::settings_service::{ApiEndpoint, BaseUrlSource, SettingsService};

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

fn main() {
    dioxus::logger::initialize_default();

    let webview_data_dir =
        default_webview_data_dir().expect("should resolve and create WebView2 data directory");
    let config = load_config();
    info!(
        catalog = %config.catalog_url,
        explorer = %config.explorer_endpoint.url,
        "starting planet catalog"
    );

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("Planet Catalog"))
                .with_data_directory(webview_data_dir),
        )
        .with_context(config)
        .launch(App);
}

/// Base URL baked in at compile time through `PLANET_CATALOG_API_URL`.
pub fn build_time_api_base_url() -> String {
    resolve_build_time_url(option_env!("PLANET_CATALOG_API_URL"))
}

pub fn resolve_build_time_url(configured: Option<&str>) -> String {
    configured
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_API_BASE_URL)
        .trim_end_matches('/')
        .to_string()
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("org", "planet-catalog", "planet-catalog")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))
}

pub fn default_settings_db_path() -> Result<PathBuf> {
    Ok(project_dirs()?.data_local_dir().join("settings.sqlite"))
}

pub fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

fn default_webview_data_dir() -> Result<PathBuf> {
    ensure_webview_data_dir(project_dirs()?.data_local_dir())
}

/// Opens the settings store and resolves both service addresses. Storage
/// problems are logged and leave the app on the built-in address.
pub fn load_config_from(db_path: Result<PathBuf>, embedded_url: String) -> AppConfig {
    let settings = match db_path {
        Ok(path) => {
            let service = SettingsService::new(
                Arc::new(SqliteSettingsStore::new(path)),
                embedded_url.clone(),
            );
            match service.init() {
                Ok(()) => Some(service),
                Err(err) => {
                    warn!(error = %err, "settings storage unavailable");
                    None
                }
            }
        }
        Err(err) => {
            warn!(error = %format!("{err:#}"), "settings path unavailable");
            None
        }
    };

    let explorer_endpoint = settings
        .as_ref()
        .map(SettingsService::resolve_base_url)
        .unwrap_or_else(|| ApiEndpoint {
            url: embedded_url.clone(),
            source: BaseUrlSource::Embedded,
        });

    AppConfig {
        catalog_url: embedded_url,
        explorer_endpoint,
        settings,
    }
}

fn load_config() -> AppConfig {
    load_config_from(default_settings_db_path(), build_time_api_base_url())
}
