use std::sync::Arc;

use reqwest::Url;
use tracing::{info, warn};

use crate::usecase::ports::settings::{SettingsError, SettingsStore};

pub const API_BASE_URL_KEY: &str = "planet-catalog.api-base-url";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseUrlSource {
    Embedded,
    Override,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    pub url: String,
    pub source: BaseUrlSource,
}

/// Accepts absolute http(s) URLs and strips trailing slashes.
pub fn normalize_base_url(raw: &str) -> Result<String, SettingsError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SettingsError::InvalidUrl("base url is empty".to_string()));
    }
    let url = Url::parse(trimmed)
        .map_err(|err| SettingsError::InvalidUrl(format!("{trimmed}: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(SettingsError::InvalidUrl(format!(
            "{trimmed}: only http and https are supported"
        )));
    }
    if url.host_str().is_none() {
        return Err(SettingsError::InvalidUrl(format!("{trimmed}: missing host")));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

#[derive(Clone)]
pub struct SettingsService {
    store: Arc<dyn SettingsStore>,
    fallback: String,
}

impl PartialEq for SettingsService {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.store, &other.store) && self.fallback == other.fallback
    }
}

impl SettingsService {
    pub fn new(store: Arc<dyn SettingsStore>, fallback: impl Into<String>) -> Self {
        Self {
            store,
            fallback: fallback.into(),
        }
    }

    pub fn init(&self) -> Result<(), SettingsError> {
        self.store.init()
    }

    /// The persisted override when one is stored and valid, otherwise the
    /// embedded default.
    pub fn resolve_base_url(&self) -> ApiEndpoint {
        let embedded = ApiEndpoint {
            url: self.fallback.clone(),
            source: BaseUrlSource::Embedded,
        };
        match self.store.load(API_BASE_URL_KEY) {
            Ok(Some(stored)) => match normalize_base_url(&stored) {
                Ok(url) => ApiEndpoint {
                    url,
                    source: BaseUrlSource::Override,
                },
                Err(err) => {
                    warn!(error = %err, "ignoring stored base url");
                    embedded
                }
            },
            Ok(None) => embedded,
            Err(err) => {
                warn!(error = %err, "failed to read base url override");
                embedded
            }
        }
    }

    pub fn update_base_url(&self, raw: &str) -> Result<ApiEndpoint, SettingsError> {
        let url = normalize_base_url(raw)?;
        self.store.save(API_BASE_URL_KEY, &url)?;
        info!(%url, "base url override saved");
        Ok(ApiEndpoint {
            url,
            source: BaseUrlSource::Override,
        })
    }

    pub fn reset_base_url(&self) -> Result<ApiEndpoint, SettingsError> {
        self.store.remove(API_BASE_URL_KEY)?;
        info!("base url override cleared");
        Ok(ApiEndpoint {
            url: self.fallback.clone(),
            source: BaseUrlSource::Embedded,
        })
    }
}
