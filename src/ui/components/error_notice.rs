use dioxus::prelude::*;

use crate::usecase::ports::catalog::ApiError;

#[component]
pub fn ErrorNotice(error: ApiError, #[props(into)] title: Option<String>) -> Element {
    let message = error.user_message();
    let title = title.unwrap_or_else(|| "Unavailable".to_string());

    rsx! {
        div {
            style: "border: 1px solid #e3b4b4; background: #fdf1f1; color: #8a1f1f; border-radius: 8px; padding: 10px 12px;",
            role: "alert",
            strong { "{title}" }
            p { style: "margin: 4px 0 0 0;", "{message}" }
        }
    }
}
