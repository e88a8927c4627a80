use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::planet::{ChartRequest, PlanetId};
use crate::domain::entities::query::{CatalogQuery, ExplorerQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Catalog,
    Explorer,
    Charts,
    Settings,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Catalog, Page::Explorer, Page::Charts, Page::Settings];

    pub fn title(self) -> &'static str {
        match self {
            Page::Catalog => "Catalog",
            Page::Explorer => "Explorer",
            Page::Charts => "Charts",
            Page::Settings => "Settings",
        }
    }
}

/// Which record the detail panel shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailTarget {
    Id(PlanetId),
    Name(String),
}

/// Session state that outlives tab switches. Nothing here is persisted.
#[derive(Clone, Copy)]
pub struct AppState {
    pub page: Signal<Page>,
    pub catalog_query: Signal<CatalogQuery>,
    pub catalog_detail: Signal<Option<DetailTarget>>,
    pub explorer_query: Signal<ExplorerQuery>,
    pub chart_request: Signal<ChartRequest>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            page: use_signal(Page::default),
            catalog_query: use_signal(CatalogQuery::default),
            catalog_detail: use_signal(|| None::<DetailTarget>),
            explorer_query: use_signal(ExplorerQuery::default),
            chart_request: use_signal(ChartRequest::default),
        }
    }
}
