use dioxus::prelude::*;

use crate::domain::entities::planet::{Dimension, Planet};
use crate::ui::format::{dimension_heading, format_dimension, format_text, PLACEHOLDER};
use crate::ui::styles::skeleton_bar_style;

const DETAIL_ROWS: usize = 10;

pub fn detail_rows(planet: &Planet) -> Vec<(String, String)> {
    let mut rows = vec![
        ("Name".to_string(), planet.name.clone()),
        (
            "Discovery method".to_string(),
            format_text(planet.disc_method.as_deref()),
        ),
    ];
    rows.extend(
        Dimension::all().map(|dim| (dimension_heading(dim), format_dimension(planet, dim))),
    );
    rows.push((
        "Last updated".to_string(),
        planet
            .updated_at
            .or(planet.created_at)
            .map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
    ));
    rows
}

#[component]
pub fn PlanetDetail(#[props(!optional)] planet: Option<Planet>, on_close: EventHandler<()>) -> Element {
    rsx! {
        div {
            style: "border: 1px solid #ddd; border-radius: 8px; background: #fff; padding: 10px 12px; min-width: 260px;",
            div { style: "display: flex; justify-content: space-between; align-items: center;",
                h3 { style: "margin: 0; font-size: 15px;", "Planet details" }
                button {
                    style: "border: none; background: transparent; cursor: pointer; font-size: 16px;",
                    onclick: move |_| on_close.call(()),
                    "×"
                }
            }
            match planet {
                Some(planet) => rsx! {
                    if planet.is_deleted {
                        p { style: "color: #a15c00; margin: 6px 0;", "This record is marked as deleted." }
                    }
                    dl { style: "display: grid; grid-template-columns: auto 1fr; gap: 4px 12px; margin: 8px 0 0 0;",
                        for (label, value) in detail_rows(&planet) {
                            dt { key: "{label}-label", style: "color: #666;", "{label}" }
                            dd { key: "{label}-value", style: "margin: 0;", "{value}" }
                        }
                    }
                },
                None => rsx! {
                    for idx in 0..DETAIL_ROWS {
                        div { key: "{idx}", style: "margin-top: 8px; {skeleton_bar_style(60)}" }
                    }
                },
            }
        }
    }
}
