use dioxus::prelude::*;
use tracing::warn;

use crate::domain::entities::planet::{
    ChartKind, ChartRequest, CHART_MAX_BINS, CHART_MAX_SIGMA, CHART_MIN_BINS,
};
use crate::ui::components::charts::{
    method_bars, render_bar_chart, render_histogram, timeline_bars, ChartPanel, CHART_HEIGHT,
    CHART_WIDTH,
};
use crate::ui::components::error_notice::ErrorNotice;
use crate::ui::format::format_measurement;
use crate::ui::hooks::use_keyed_query;
use crate::usecase::services::catalog_service::CatalogService;
use crate::usecase::services::query_cell::RetainPolicy;

fn svg_or_log(result: anyhow::Result<String>, chart: &str) -> Option<String> {
    match result {
        Ok(svg) => Some(svg),
        Err(err) => {
            warn!(chart, error = %err, "chart rendering failed");
            None
        }
    }
}

#[component]
pub fn ChartsPage(service: CatalogService, mut request: Signal<ChartRequest>) -> Element {
    let timeline_service = service.clone();
    let timeline = use_keyed_query(RetainPolicy::KeepPrevious, move || {
        let service = timeline_service.clone();
        Some((service.timeline_key(), async move { service.timeline().await }))
    });

    let methods_service = service.clone();
    let methods = use_keyed_query(RetainPolicy::KeepPrevious, move || {
        let service = methods_service.clone();
        Some((service.method_counts_key(), async move {
            service.method_counts().await
        }))
    });

    let histogram_service = service.clone();
    let histogram = use_keyed_query(RetainPolicy::KeepPrevious, move || {
        let service = histogram_service.clone();
        let current = request();
        let key = service.discovery_chart_key(&current);
        Some((key, async move { service.discovery_chart(&current).await }))
    });

    let timeline_svg = use_memo(move || {
        timeline.data().and_then(|points| {
            svg_or_log(
                render_bar_chart(&timeline_bars(&points), CHART_WIDTH, CHART_HEIGHT),
                "timeline",
            )
        })
    });
    let methods_svg = use_memo(move || {
        methods.data().and_then(|counts| {
            svg_or_log(
                render_bar_chart(&method_bars(&counts), CHART_WIDTH, CHART_HEIGHT),
                "methods",
            )
        })
    });
    let histogram_svg = use_memo(move || {
        histogram.data().and_then(|chart| {
            svg_or_log(
                render_histogram(&chart, CHART_WIDTH, CHART_HEIGHT),
                "histogram",
            )
        })
    });

    let current = request();
    let mut bins_input = use_signal(move || current.bins.to_string());
    let mut sigma_input = use_signal(move || current.sigma.to_string());

    let timeline_empty = timeline.data().is_some_and(|points| points.is_empty());
    let methods_empty = methods.data().is_some_and(|counts| counts.is_empty());
    let histogram_empty = histogram.data().is_some_and(|chart| chart.is_empty());
    let histogram_stats = histogram.data().map(|chart| {
        let fmt = |value: Option<f64>| format_measurement(value, 0);
        format!(
            "mean {} K, band {} to {} K",
            fmt(chart.mean),
            fmt(chart.lower),
            fmt(chart.upper)
        )
    });

    rsx! {
        div { style: "display: flex; flex-direction: column; gap: 12px;",
            match timeline.error() {
                Some(error) => rsx! { ErrorNotice { error, title: "Discoveries per year" } },
                None => rsx! {
                    ChartPanel {
                        title: "Discoveries per year",
                        svg: timeline_svg(),
                        loading: timeline.is_loading(),
                        empty: timeline_empty,
                    }
                },
            }
            match methods.error() {
                Some(error) => rsx! { ErrorNotice { error, title: "Discoveries per method" } },
                None => rsx! {
                    ChartPanel {
                        title: "Discoveries per method",
                        svg: methods_svg(),
                        loading: methods.is_loading(),
                        empty: methods_empty,
                    }
                },
            }
            div { style: "display: flex; gap: 10px; align-items: flex-end;",
                label { style: "display: inline-flex; flex-direction: column; gap: 2px; font-size: 12px; color: #555;",
                    span { "Bins ({CHART_MIN_BINS} to {CHART_MAX_BINS})" }
                    input {
                        style: "border: 1px solid #bbb; border-radius: 6px; padding: 4px 8px; width: 90px;",
                        inputmode: "numeric",
                        value: "{bins_input}",
                        oninput: move |event| {
                            let raw = event.value();
                            if let Ok(bins) = raw.trim().parse::<u32>() {
                                let sigma = request().sigma;
                                request.set(ChartRequest::new(ChartKind::Hist, bins, sigma));
                            }
                            bins_input.set(raw);
                        },
                    }
                }
                label { style: "display: inline-flex; flex-direction: column; gap: 2px; font-size: 12px; color: #555;",
                    span { "Sigma (0 to {CHART_MAX_SIGMA})" }
                    input {
                        style: "border: 1px solid #bbb; border-radius: 6px; padding: 4px 8px; width: 90px;",
                        inputmode: "decimal",
                        value: "{sigma_input}",
                        oninput: move |event| {
                            let raw = event.value();
                            if let Ok(sigma) = raw.trim().parse::<f64>() {
                                let bins = request().bins;
                                request.set(ChartRequest::new(ChartKind::Hist, bins, sigma));
                            }
                            sigma_input.set(raw);
                        },
                    }
                }
                if let Some(text) = histogram_stats {
                    span { style: "color: #666; font-size: 12px;", "{text}" }
                }
            }
            match histogram.error() {
                Some(error) => rsx! { ErrorNotice { error, title: "Host star temperature" } },
                None => rsx! {
                    ChartPanel {
                        title: "Host star temperature",
                        svg: histogram_svg(),
                        loading: histogram.is_loading(),
                        empty: histogram_empty,
                    }
                },
            }
        }
    }
}
