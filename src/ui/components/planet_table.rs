use dioxus::prelude::*;

use crate::domain::entities::planet::{Dimension, Planet, PlanetId};
use crate::ui::format::{dimension_heading, format_dimension, format_text};
use crate::ui::styles::{
    skeleton_bar_style, table_cell_style, table_container_style, table_header_cell_style,
};

pub const SKELETON_ROWS: usize = 8;

pub const TABLE_DIMENSIONS: [Dimension; 6] = [
    Dimension::DiscYear,
    Dimension::OrbitalPeriod,
    Dimension::Radius,
    Dimension::Mass,
    Dimension::StarTemperature,
    Dimension::StarMass,
];

/// Header labels in column order.
pub fn table_headers() -> Vec<String> {
    let mut headers = vec!["Name".to_string(), "Method".to_string()];
    headers.extend(TABLE_DIMENSIONS.iter().map(|dim| dimension_heading(*dim)));
    headers
}

/// Display cells for one record, in the same order as [`table_headers`].
pub fn table_cells(planet: &Planet) -> Vec<String> {
    let mut cells = vec![
        planet.name.clone(),
        format_text(planet.disc_method.as_deref()),
    ];
    cells.extend(TABLE_DIMENSIONS.iter().map(|dim| format_dimension(planet, *dim)));
    cells
}

#[component]
pub fn PlanetTable(
    #[props(!optional)] rows: Option<Vec<Planet>>,
    loading: bool,
    #[props(!optional)] selected: Option<PlanetId>,
    on_select: EventHandler<PlanetId>,
) -> Element {
    let headers = table_headers();
    let column_count = headers.len();
    let opacity = if loading && rows.is_some() { "0.6" } else { "1" };

    rsx! {
        div { style: "{table_container_style()}",
            table { style: "border-collapse: collapse; width: 100%; opacity: {opacity};",
                thead {
                    tr {
                        for header in headers.iter() {
                            th { key: "{header}", style: "{table_header_cell_style()}", "{header}" }
                        }
                    }
                }
                tbody {
                    match rows {
                        None => rsx! {
                            for row_idx in 0..SKELETON_ROWS {
                                tr { key: "skeleton-{row_idx}",
                                    for col_idx in 0..column_count {
                                        td { key: "{col_idx}", style: "{table_cell_style(false)}",
                                            div { style: skeleton_bar_style(if col_idx == 0 { 70 } else { 45 }) }
                                        }
                                    }
                                }
                            }
                        },
                        Some(rows) if rows.is_empty() => rsx! {
                            tr {
                                td {
                                    colspan: "{column_count}",
                                    style: "padding: 16px; text-align: center; color: #666;",
                                    "No planets match these filters."
                                }
                            }
                        },
                        Some(rows) => rsx! {
                            for planet in rows {
                                {
                                    let id = planet.planet_id();
                                    let cells = table_cells(&planet);
                                    let background = if selected == Some(id) {
                                        "#eef4ff"
                                    } else if planet.is_deleted {
                                        "#f7f7f7"
                                    } else {
                                        "transparent"
                                    };
                                    rsx! {
                                        tr {
                                            key: "{planet.id}",
                                            style: "cursor: pointer; background: {background};",
                                            onclick: move |_| on_select.call(id),
                                            for (col_idx, value) in cells.into_iter().enumerate() {
                                                td { key: "{col_idx}", style: "{table_cell_style(col_idx >= 2)}", "{value}" }
                                            }
                                        }
                                    }
                                }
                            }
                        },
                    }
                }
            }
        }
    }
}
