use dioxus::prelude::*;

use crate::domain::entities::envelope::PagerState;
use crate::ui::format::format_count;
use crate::ui::styles::button_style;

#[component]
pub fn Pager(
    state: PagerState,
    #[props(!optional)] total_count: Option<u64>,
    on_previous: EventHandler<()>,
    on_next: EventHandler<()>,
) -> Element {
    let previous_enabled = state.previous_enabled;
    let next_enabled = state.next_enabled;
    let total_pages = state.total_pages.max(1);
    let summary = total_count
        .map(|count| format!("{} results", format_count(count)))
        .unwrap_or_default();

    rsx! {
        div {
            style: "display: flex; align-items: center; gap: 10px;",
            button {
                style: "{button_style(previous_enabled)}",
                disabled: !previous_enabled,
                onclick: move |_| {
                    if previous_enabled {
                        on_previous.call(());
                    }
                },
                "Previous"
            }
            span { "Page {state.current_page} of {total_pages}" }
            button {
                style: "{button_style(next_enabled)}",
                disabled: !next_enabled,
                onclick: move |_| {
                    if next_enabled {
                        on_next.call(());
                    }
                },
                "Next"
            }
            span { style: "color: #666;", "{summary}" }
        }
    }
}
