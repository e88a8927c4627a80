use std::future::Future;
use std::pin::Pin;

use dioxus::prelude::*;

use crate::domain::entities::envelope::PagerState;
use crate::domain::entities::planet::Planet;
use crate::domain::entities::query::CatalogQuery;
use crate::ui::components::error_notice::ErrorNotice;
use crate::ui::components::filters::CatalogFilterBar;
use crate::ui::components::metric_cards::MetricCards;
use crate::ui::components::pager::Pager;
use crate::ui::components::planet_detail::PlanetDetail;
use crate::ui::components::planet_table::PlanetTable;
use crate::ui::hooks::use_keyed_query;
use crate::ui::state::app_state::DetailTarget;
use crate::ui::styles::button_style;
use crate::usecase::ports::catalog::ApiError;
use crate::usecase::services::catalog_service::CatalogService;
use crate::usecase::services::query_cell::RetainPolicy;

type DetailFuture = Pin<Box<dyn Future<Output = Result<Planet, ApiError>>>>;

/// Paged listing view. Metrics, table and detail panel load and fail
/// independently of each other.
#[component]
pub fn CatalogPage(
    service: CatalogService,
    mut query: Signal<CatalogQuery>,
    mut detail: Signal<Option<DetailTarget>>,
) -> Element {
    let listing_service = service.clone();
    let listing = use_keyed_query(RetainPolicy::KeepPrevious, move || {
        let service = listing_service.clone();
        let current = query();
        let key = service.listing_key(&current);
        Some((key, async move { service.browse(&current).await }))
    });

    let stats_service = service.clone();
    let stats = use_keyed_query(RetainPolicy::KeepPrevious, move || {
        let service = stats_service.clone();
        Some((service.stats_key(), async move { service.stats().await }))
    });

    let detail_service = service.clone();
    let planet = use_keyed_query(RetainPolicy::Clear, move || {
        let service = detail_service.clone();
        match detail()? {
            DetailTarget::Id(id) => {
                let key = service.planet_key(id);
                Some((key, Box::pin(async move { service.planet(id).await }) as DetailFuture))
            }
            DetailTarget::Name(name) => {
                let key = service.planet_by_name_key(&name);
                Some((
                    key,
                    Box::pin(async move { service.planet_by_name(&name).await }) as DetailFuture,
                ))
            }
        }
    });

    let mut lookup = use_signal(String::new);

    let envelope = listing.data();
    let pager = envelope
        .as_ref()
        .map(|envelope| envelope.pager())
        .unwrap_or_else(PagerState::disabled);
    let total_count = envelope.as_ref().map(|envelope| envelope.total_count);
    let rows = envelope.map(|envelope| envelope.records);
    let selected_id = match detail() {
        Some(DetailTarget::Id(id)) => Some(id),
        Some(DetailTarget::Name(_)) => planet.data().map(|planet| planet.planet_id()),
        None => None,
    };

    rsx! {
        div { style: "display: flex; flex-direction: column; gap: 12px; flex: 1; min-height: 0;",
            match stats.error() {
                Some(error) => rsx! { ErrorNotice { error, title: "Summary" } },
                None => rsx! { MetricCards { stats: stats.data(), loading: stats.is_loading() } },
            }
            CatalogFilterBar { query }
            form {
                style: "display: flex; gap: 8px; align-items: center;",
                onsubmit: move |event| {
                    event.prevent_default();
                    let name = lookup().trim().to_string();
                    if !name.is_empty() {
                        detail.set(Some(DetailTarget::Name(name)));
                    }
                },
                input {
                    style: "border: 1px solid #bbb; border-radius: 6px; padding: 4px 8px; width: 220px;",
                    placeholder: "Look up a planet by exact name",
                    value: "{lookup}",
                    oninput: move |event| lookup.set(event.value()),
                }
                button { style: "{button_style(true)}", r#type: "submit", "Look up" }
            }
            div { style: "display: flex; gap: 12px; flex: 1; min-height: 0;",
                div { style: "display: flex; flex-direction: column; gap: 8px; flex: 1; min-width: 0; min-height: 0;",
                    match listing.error() {
                        Some(error) => rsx! { ErrorNotice { error, title: "Planets" } },
                        None => rsx! {
                            PlanetTable {
                                rows,
                                loading: listing.is_loading(),
                                selected: selected_id,
                                on_select: move |id| detail.set(Some(DetailTarget::Id(id))),
                            }
                            Pager {
                                state: pager,
                                total_count,
                                on_previous: move |_| {
                                    if let Some(page) = pager.previous_page() {
                                        query.write().go_to_page(page);
                                    }
                                },
                                on_next: move |_| {
                                    if let Some(page) = pager.next_page() {
                                        query.write().go_to_page(page);
                                    }
                                },
                            }
                        },
                    }
                }
                if detail().is_some() {
                    match planet.error() {
                        Some(error) => rsx! { ErrorNotice { error, title: "Planet details" } },
                        None => rsx! {
                            PlanetDetail {
                                planet: planet.data(),
                                on_close: move |_| detail.set(None),
                            }
                        },
                    }
                }
            }
        }
    }
}
