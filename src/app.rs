use std::sync::Arc;

use dioxus::prelude::*;
use tracing::error;

use crate::infra::http::catalog::HttpCatalog;
use crate::ui::components::error_notice::ErrorNotice;
use crate::ui::state::app_state::{AppState, Page};
use crate::ui::styles::{page_body_style, root_container_style, tab_button_style};
use crate::ui::views::catalog_page::CatalogPage;
use crate::ui::views::charts_page::ChartsPage;
use crate::ui::views::explorer_page::ExplorerPage;
use crate::ui::views::settings_page::SettingsPage;
use crate::usecase::ports::catalog::ApiError;
use crate::usecase::services::catalog_service::CatalogService;
use crate::usecase::services::settings_service::{ApiEndpoint, SettingsService};

/// Everything resolved before launch and handed to [`App`] as context.
#[derive(Clone)]
pub struct AppConfig {
    /// Paged backend used by the Catalog view.
    pub catalog_url: String,
    /// Offset backend used by the Explorer and Charts views.
    pub explorer_endpoint: ApiEndpoint,
    pub settings: Option<SettingsService>,
}

pub fn connect(base_url: &str) -> Option<CatalogService> {
    match HttpCatalog::new(base_url) {
        Ok(api) => Some(CatalogService::new(Arc::new(api))),
        Err(err) => {
            error!(base_url, error = %err, "cannot create api client");
            None
        }
    }
}

#[component]
pub fn App() -> Element {
    let config = use_context::<AppConfig>();
    let state = AppState::new();
    let mut page = state.page;

    let catalog_url = config.catalog_url.clone();
    let catalog = use_hook(move || connect(&catalog_url));
    let initial_endpoint = config.explorer_endpoint.clone();
    let endpoint = use_signal(move || initial_endpoint);
    let explorer = use_memo(move || connect(&endpoint.read().url));

    let unreachable = |url: String| {
        rsx! {
            ErrorNotice { error: ApiError::InvalidUrl(url), title: "Service address" }
        }
    };

    rsx! {
        div { style: root_container_style(),
            nav { style: "display: flex; gap: 8px; padding: 10px 16px; border-bottom: 1px solid #ddd; background: #fff;",
                for tab in Page::ALL {
                    button {
                        key: "{tab.title()}",
                        style: "{tab_button_style(tab == page())}",
                        onclick: move |_| page.set(tab),
                        "{tab.title()}"
                    }
                }
            }
            div { style: page_body_style(),
                match page() {
                    Page::Catalog => match catalog.clone() {
                        Some(service) => rsx! {
                            CatalogPage {
                                key: "{service.origin()}",
                                service,
                                query: state.catalog_query,
                                detail: state.catalog_detail,
                            }
                        },
                        None => unreachable(config.catalog_url.clone()),
                    },
                    Page::Explorer => match explorer() {
                        Some(service) => rsx! {
                            ExplorerPage {
                                key: "{service.origin()}",
                                service,
                                query: state.explorer_query,
                            }
                        },
                        None => unreachable(endpoint.read().url.clone()),
                    },
                    Page::Charts => match explorer() {
                        Some(service) => rsx! {
                            ChartsPage {
                                key: "{service.origin()}",
                                service,
                                request: state.chart_request,
                            }
                        },
                        None => unreachable(endpoint.read().url.clone()),
                    },
                    Page::Settings => rsx! {
                        SettingsPage {
                            settings: config.settings.clone(),
                            endpoint,
                            catalog: catalog.clone(),
                            explorer: explorer(),
                            catalog_url: config.catalog_url.clone(),
                        }
                    },
                }
            }
        }
    }
}
