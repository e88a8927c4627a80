use dioxus::prelude::*;

use crate::domain::entities::envelope::PagerState;
use crate::domain::entities::planet::{MethodCount, PlanetId};
use crate::domain::entities::query::ExplorerQuery;
use crate::ui::components::error_notice::ErrorNotice;
use crate::ui::components::filters::ExplorerFilterBar;
use crate::ui::components::metric_cards::MetricCards;
use crate::ui::components::pager::Pager;
use crate::ui::components::planet_detail::PlanetDetail;
use crate::ui::components::planet_table::PlanetTable;
use crate::ui::format::format_count;
use crate::ui::hooks::use_keyed_query;
use crate::usecase::services::catalog_service::CatalogService;
use crate::usecase::services::query_cell::RetainPolicy;

#[component]
fn MethodBreakdown(counts: Vec<MethodCount>) -> Element {
    rsx! {
        div { style: "display: flex; flex-wrap: wrap; gap: 6px;",
            for entry in counts {
                span {
                    key: "{entry.disc_method}",
                    style: "border: 1px solid #d5dbe5; border-radius: 12px; padding: 2px 10px; background: #fff; font-size: 12px;",
                    "{entry.disc_method}: {format_count(entry.count)}"
                }
            }
        }
    }
}

/// Offset-paged view. The listing, filtered statistics and method counts
/// are fetched together and shown only when all three succeed.
#[component]
pub fn ExplorerPage(service: CatalogService, mut query: Signal<ExplorerQuery>) -> Element {
    let snapshot_service = service.clone();
    let snapshot = use_keyed_query(RetainPolicy::Clear, move || {
        let service = snapshot_service.clone();
        let current = query();
        let key = service.explorer_key(&current);
        Some((key, async move { service.explore(&current).await }))
    });

    let mut selected = use_signal(|| None::<PlanetId>);
    let detail_service = service.clone();
    let planet = use_keyed_query(RetainPolicy::Clear, move || {
        let service = detail_service.clone();
        let id = selected()?;
        Some((service.planet_key(id), async move { service.planet(id).await }))
    });

    let data = snapshot.data();
    let loading = snapshot.is_loading();
    let pager = data
        .as_ref()
        .map(|snapshot| snapshot.listing.pager())
        .unwrap_or_else(PagerState::disabled);
    let total_count = data.as_ref().map(|snapshot| snapshot.listing.total_count);

    rsx! {
        div { style: "display: flex; flex-direction: column; gap: 12px; flex: 1; min-height: 0;",
            ExplorerFilterBar { query }
            match (snapshot.error(), data) {
                (Some(error), _) => rsx! { ErrorNotice { error, title: "Explorer" } },
                (None, data) => {
                    let (stats, method_counts, rows) = match data {
                        Some(snapshot) => (
                            Some(snapshot.stats),
                            snapshot.method_counts,
                            Some(snapshot.listing.records),
                        ),
                        None => (None, Vec::new(), None),
                    };
                    rsx! {
                        MetricCards { stats, loading }
                        MethodBreakdown { counts: method_counts }
                        div { style: "display: flex; gap: 12px; flex: 1; min-height: 0;",
                            div { style: "display: flex; flex-direction: column; gap: 8px; flex: 1; min-width: 0; min-height: 0;",
                                PlanetTable {
                                    rows,
                                    loading,
                                    selected: selected(),
                                    on_select: move |id| selected.set(Some(id)),
                                }
                                Pager {
                                    state: pager,
                                    total_count,
                                    on_previous: move |_| query.write().previous_page(),
                                    on_next: move |_| query.write().next_page(),
                                }
                            }
                            if selected().is_some() {
                                match planet.error() {
                                    Some(error) => rsx! { ErrorNotice { error, title: "Planet details" } },
                                    None => rsx! {
                                        PlanetDetail {
                                            planet: planet.data(),
                                            on_close: move |_| selected.set(None),
                                        }
                                    },
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
