use dioxus::prelude::*;

use crate::domain::entities::planet::Dimension;
use crate::domain::entities::query::{
    CatalogField, CatalogQuery, CatalogSortField, ExplorerField, ExplorerQuery,
    ExplorerSortField, SortDirection,
};
use crate::ui::styles::button_style;

pub const PAGE_SIZE_CHOICES: [u32; 4] = [10, 20, 50, 100];

const INPUT_STYLE: &str =
    "border: 1px solid #bbb; border-radius: 6px; padding: 4px 8px; width: 140px;";

fn direction_label(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Asc => "Ascending",
        SortDirection::Desc => "Descending",
    }
}

fn parse_choice(value: &str) -> Option<u32> {
    value.trim().parse().ok()
}

#[component]
fn FilterInput(
    #[props(into)] label: String,
    value: String,
    #[props(into)] placeholder: Option<String>,
    input_mode: Option<&'static str>,
    on_input: EventHandler<String>,
) -> Element {
    let placeholder = placeholder.unwrap_or_default();
    let input_mode = input_mode.unwrap_or("text");

    rsx! {
        label { style: "display: inline-flex; flex-direction: column; gap: 2px; font-size: 12px; color: #555;",
            span { "{label}" }
            input {
                style: INPUT_STYLE,
                r#type: "text",
                inputmode: input_mode,
                placeholder: "{placeholder}",
                value: "{value}",
                oninput: move |event| on_input.call(event.value()),
            }
        }
    }
}

#[component]
pub fn CatalogFilterBar(mut query: Signal<CatalogQuery>) -> Element {
    let snapshot = query();
    let inputs = &snapshot.filters.inputs;
    let sort_by = snapshot.filters.sort_by;
    let direction = snapshot.filters.direction;
    let page_size = snapshot.window.page_size();

    rsx! {
        div { style: "display: flex; flex-wrap: wrap; align-items: flex-end; gap: 10px;",
            FilterInput {
                label: "Name",
                value: inputs.get(CatalogField::Name).to_string(),
                on_input: move |value: String| query.write().set_filter(CatalogField::Name, value),
            }
            FilterInput {
                label: "Method",
                value: inputs.get(CatalogField::Method).to_string(),
                on_input: move |value: String| query.write().set_filter(CatalogField::Method, value),
            }
            FilterInput {
                label: "From year",
                value: inputs.get(CatalogField::MinYear).to_string(),
                placeholder: "e.g. 1995",
                input_mode: "numeric",
                on_input: move |value: String| query.write().set_filter(CatalogField::MinYear, value),
            }
            FilterInput {
                label: "To year",
                value: inputs.get(CatalogField::MaxYear).to_string(),
                input_mode: "numeric",
                on_input: move |value: String| query.write().set_filter(CatalogField::MaxYear, value),
            }
            label { style: "display: inline-flex; flex-direction: column; gap: 2px; font-size: 12px; color: #555;",
                span { "Sort by" }
                select {
                    style: INPUT_STYLE,
                    onchange: move |event| {
                        if let Some(field) = CatalogSortField::from_wire(&event.value()) {
                            query.write().set_sort(field);
                        }
                    },
                    for field in CatalogSortField::ALL {
                        option {
                            key: "{field.as_wire()}",
                            value: "{field.as_wire()}",
                            selected: field == sort_by,
                            "{field.label()}"
                        }
                    }
                }
            }
            button {
                style: "{button_style(true)}",
                onclick: move |_| query.write().toggle_direction(),
                "{direction_label(direction)}"
            }
            label { style: "display: inline-flex; flex-direction: column; gap: 2px; font-size: 12px; color: #555;",
                span { "Per page" }
                select {
                    style: INPUT_STYLE,
                    onchange: move |event| {
                        if let Some(size) = parse_choice(&event.value()) {
                            query.write().set_page_size(size);
                        }
                    },
                    for size in PAGE_SIZE_CHOICES {
                        option { key: "{size}", value: "{size}", selected: size == page_size, "{size}" }
                    }
                }
            }
            button {
                style: "{button_style(true)}",
                onclick: move |_| query.write().reset(),
                "Reset"
            }
        }
    }
}

#[component]
pub fn ExplorerFilterBar(mut query: Signal<ExplorerQuery>) -> Element {
    let snapshot = query();
    let inputs = snapshot.filters.inputs.clone();
    let sort_by = snapshot.filters.sort_by;
    let direction = snapshot.filters.direction;
    let include_deleted = snapshot.filters.include_deleted;
    let limit = snapshot.window.limit();

    rsx! {
        div { style: "display: flex; flex-direction: column; gap: 8px;",
            div { style: "display: flex; flex-wrap: wrap; align-items: flex-end; gap: 10px;",
                FilterInput {
                    label: "Name",
                    value: inputs.get(ExplorerField::Name).to_string(),
                    on_input: move |value: String| query.write().set_filter(ExplorerField::Name, value),
                }
                FilterInput {
                    label: "Discovery method",
                    value: inputs.get(ExplorerField::DiscMethod).to_string(),
                    on_input: move |value: String| query.write().set_filter(ExplorerField::DiscMethod, value),
                }
                label { style: "display: inline-flex; flex-direction: column; gap: 2px; font-size: 12px; color: #555;",
                    span { "Sort by" }
                    select {
                        style: INPUT_STYLE,
                        onchange: move |event| {
                            if let Some(field) = ExplorerSortField::from_wire(&event.value()) {
                                query.write().set_sort(field);
                            }
                        },
                        for field in ExplorerSortField::all() {
                            option {
                                key: "{field.as_wire()}",
                                value: "{field.as_wire()}",
                                selected: field == sort_by,
                                "{field.label()}"
                            }
                        }
                    }
                }
                button {
                    style: "{button_style(true)}",
                    onclick: move |_| query.write().toggle_direction(),
                    "{direction_label(direction)}"
                }
                label { style: "display: inline-flex; flex-direction: column; gap: 2px; font-size: 12px; color: #555;",
                    span { "Per page" }
                    select {
                        style: INPUT_STYLE,
                        onchange: move |event| {
                            if let Some(size) = parse_choice(&event.value()) {
                                query.write().set_limit(size);
                            }
                        },
                        for size in PAGE_SIZE_CHOICES {
                            option { key: "{size}", value: "{size}", selected: size == limit, "{size}" }
                        }
                    }
                }
                label { style: "display: inline-flex; align-items: center; gap: 6px;",
                    input {
                        r#type: "checkbox",
                        checked: include_deleted,
                        onclick: move |_| query.write().set_include_deleted(!include_deleted),
                    }
                    span { "Include deleted" }
                }
                button {
                    style: "{button_style(true)}",
                    onclick: move |_| query.write().reset(),
                    "Reset"
                }
            }
            div { style: "display: flex; flex-wrap: wrap; gap: 10px;",
                for dimension in Dimension::all() {
                    {
                        let input_mode = if dimension.spec().integral { "numeric" } else { "decimal" };
                        let min_value = inputs.get(ExplorerField::Min(dimension)).to_string();
                        let max_value = inputs.get(ExplorerField::Max(dimension)).to_string();
                        rsx! {
                            div { key: "{dimension.wire()}", style: "display: flex; gap: 4px;",
                                FilterInput {
                                    label: format!("{} min", dimension.label()),
                                    value: min_value,
                                    input_mode: input_mode,
                                    on_input: move |value: String| {
                                        query.write().set_filter(ExplorerField::Min(dimension), value)
                                    },
                                }
                                FilterInput {
                                    label: format!("{} max", dimension.label()),
                                    value: max_value,
                                    input_mode: input_mode,
                                    on_input: move |value: String| {
                                        query.write().set_filter(ExplorerField::Max(dimension), value)
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
