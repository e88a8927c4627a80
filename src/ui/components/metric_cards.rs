use dioxus::prelude::*;

use crate::domain::entities::planet::{Dimension, PlanetStats};
use crate::ui::format::{format_count, format_measurement};
use crate::ui::styles::{card_style, skeleton_bar_style};

pub const SKELETON_CARDS: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
    pub detail: String,
}

/// The four headline figures shown above the table.
pub fn metric_cards(stats: &PlanetStats) -> Vec<MetricCard> {
    let mut cards = vec![MetricCard {
        label: "Planets".to_string(),
        value: format_count(stats.count),
        detail: "in the catalog".to_string(),
    }];

    for (dimension, heading) in [
        (Dimension::Radius, "Median radius"),
        (Dimension::Mass, "Median mass"),
        (Dimension::OrbitalPeriod, "Median orbital period"),
    ] {
        let spec = dimension.spec();
        let summary = stats.summary(dimension).cloned().unwrap_or_default();
        cards.push(MetricCard {
            label: heading.to_string(),
            value: format!(
                "{} {}",
                format_measurement(summary.median, spec.decimals),
                spec.unit
            )
            .trim_end()
            .to_string(),
            detail: format!(
                "range {} to {}",
                format_measurement(summary.min, spec.decimals),
                format_measurement(summary.max, spec.decimals)
            ),
        });
    }
    cards
}

#[component]
pub fn MetricCards(#[props(!optional)] stats: Option<PlanetStats>, loading: bool) -> Element {
    let Some(stats) = stats else {
        return rsx! {
            div {
                style: "display: flex; gap: 12px; flex-wrap: wrap;",
                for idx in 0..SKELETON_CARDS {
                    div {
                        key: "{idx}",
                        style: "{card_style()}",
                        div { style: "{skeleton_bar_style(50)}" }
                        div { style: "margin-top: 10px; {skeleton_bar_style(80)}" }
                        div { style: "margin-top: 10px; {skeleton_bar_style(65)}" }
                    }
                }
            }
        };
    };

    let opacity = if loading { "0.6" } else { "1" };
    let cards = metric_cards(&stats);

    rsx! {
        div {
            style: "display: flex; gap: 12px; flex-wrap: wrap; opacity: {opacity};",
            for card in cards {
                div {
                    key: "{card.label}",
                    style: "{card_style()}",
                    div { style: "color: #666; font-size: 12px;", "{card.label}" }
                    div { style: "font-size: 22px; font-weight: 600; margin-top: 4px;", "{card.value}" }
                    div { style: "color: #888; font-size: 12px; margin-top: 4px;", "{card.detail}" }
                }
            }
        }
    }
}
