use dioxus::prelude::*;

use crate::platform::desktop::blocking::run_blocking;
use crate::ui::format::format_count;
use crate::ui::hooks::use_keyed_query;
use crate::ui::styles::{button_style, card_style};
use crate::usecase::services::catalog_service::CatalogService;
use crate::usecase::services::query_cell::RetainPolicy;
use crate::usecase::services::settings_service::{ApiEndpoint, BaseUrlSource, SettingsService};

#[derive(Debug, Clone, PartialEq)]
enum Notice {
    Saved(String),
    Failed(String),
}

#[component]
fn HealthRow(#[props(into)] label: String, service: CatalogService) -> Element {
    let health_service = service.clone();
    let health = use_keyed_query(RetainPolicy::Clear, move || {
        let service = health_service.clone();
        Some((service.health_key(), async move { service.health().await }))
    });
    let count_service = service.clone();
    let count = use_keyed_query(RetainPolicy::Clear, move || {
        let service = count_service.clone();
        Some((service.count_key(), async move { service.count().await }))
    });

    let origin = service.origin().to_string();
    let status = match (health.error(), health.data()) {
        (Some(_), _) => "unreachable".to_string(),
        (None, Some(status)) if status.is_ok() => "healthy".to_string(),
        (None, Some(status)) => status.status,
        (None, None) => "checking…".to_string(),
    };
    let records = count
        .data()
        .map(|count| format!("{} planets", format_count(count.count)))
        .unwrap_or_default();

    rsx! {
        div { style: "{card_style()}",
            div { style: "color: #666; font-size: 12px;", "{label}" }
            div { style: "font-family: monospace; margin-top: 4px;", "{origin}" }
            div { style: "margin-top: 6px; display: flex; gap: 12px; align-items: center;",
                span { "Status: {status}" }
                span { style: "color: #666;", "{records}" }
                button {
                    style: "{button_style(!health.is_loading())}",
                    disabled: health.is_loading(),
                    onclick: move |_| {
                        health.refetch();
                        count.refetch();
                    },
                    "Check again"
                }
            }
        }
    }
}

#[component]
pub fn SettingsPage(
    #[props(!optional)] settings: Option<SettingsService>,
    mut endpoint: Signal<ApiEndpoint>,
    #[props(!optional)] catalog: Option<CatalogService>,
    #[props(!optional)] explorer: Option<CatalogService>,
    catalog_url: String,
) -> Element {
    let mut draft = use_signal(|| endpoint.peek().url.clone());
    let mut notice = use_signal(|| None::<Notice>);
    let mut saving = use_signal(|| false);

    let current = endpoint();
    let source = match current.source {
        BaseUrlSource::Embedded => "built-in default",
        BaseUrlSource::Override => "saved override",
    };
    let storage_ready = settings.is_some();
    let can_submit = storage_ready && !saving();

    let settings_for_save = settings.clone();
    let settings_for_reset = settings.clone();

    rsx! {
        div { style: "display: flex; flex-direction: column; gap: 14px; max-width: 760px;",
            section { style: "display: flex; flex-direction: column; gap: 8px;",
                h3 { style: "margin: 0;", "Explorer and charts service" }
                p { style: "margin: 0; color: #555;",
                    "Currently using "
                    code { "{current.url}" }
                    " ({source})."
                }
                if !storage_ready {
                    p { style: "margin: 0; color: #8a1f1f;",
                        "Settings storage is unavailable, so changes cannot be saved this session."
                    }
                }
                form {
                    style: "display: flex; gap: 8px; align-items: center;",
                    onsubmit: move |event| {
                        event.prevent_default();
                        let Some(settings) = settings_for_save.clone() else {
                            return;
                        };
                        let raw = draft();
                        saving.set(true);
                        spawn(async move {
                            match run_blocking(move || settings.update_base_url(&raw)).await {
                                Ok(Ok(next)) => {
                                    notice.set(Some(Notice::Saved(format!("Saved. Now using {}.", next.url))));
                                    draft.set(next.url.clone());
                                    endpoint.set(next);
                                }
                                Ok(Err(err)) => notice.set(Some(Notice::Failed(err.to_string()))),
                                Err(err) => notice.set(Some(Notice::Failed(format!("{err:#}")))),
                            }
                            saving.set(false);
                        });
                    },
                    input {
                        style: "border: 1px solid #bbb; border-radius: 6px; padding: 4px 8px; flex: 1;",
                        placeholder: "https://example.org/api",
                        value: "{draft}",
                        oninput: move |event| draft.set(event.value()),
                    }
                    button {
                        style: "{button_style(can_submit)}",
                        r#type: "submit",
                        disabled: !can_submit,
                        "Save"
                    }
                    button {
                        style: "{button_style(can_submit)}",
                        r#type: "button",
                        disabled: !can_submit,
                        onclick: move |_| {
                            let Some(settings) = settings_for_reset.clone() else {
                                return;
                            };
                            saving.set(true);
                            spawn(async move {
                                match run_blocking(move || settings.reset_base_url()).await {
                                    Ok(Ok(next)) => {
                                        notice.set(Some(Notice::Saved(format!("Reset to {}.", next.url))));
                                        draft.set(next.url.clone());
                                        endpoint.set(next);
                                    }
                                    Ok(Err(err)) => notice.set(Some(Notice::Failed(err.to_string()))),
                                    Err(err) => notice.set(Some(Notice::Failed(format!("{err:#}")))),
                                }
                                saving.set(false);
                            });
                        },
                        "Reset to default"
                    }
                }
                match notice() {
                    Some(Notice::Saved(message)) => rsx! { p { style: "margin: 0; color: #1d6b32;", "{message}" } },
                    Some(Notice::Failed(message)) => rsx! { p { style: "margin: 0; color: #8a1f1f;", "{message}" } },
                    None => rsx! {},
                }
            }
            section { style: "display: flex; flex-direction: column; gap: 8px;",
                h3 { style: "margin: 0;", "Service health" }
                match catalog {
                    Some(service) => rsx! {
                        HealthRow { key: "catalog-{service.origin()}", label: "Catalog", service }
                    },
                    None => rsx! {
                        p { style: "margin: 0; color: #8a1f1f;", "Catalog address is not a valid URL: {catalog_url}" }
                    },
                }
                match explorer {
                    Some(service) => rsx! {
                        HealthRow { key: "explorer-{service.origin()}", label: "Explorer and charts", service }
                    },
                    None => rsx! {
                        p { style: "margin: 0; color: #8a1f1f;", "Explorer address is not a valid URL: {current.url}" }
                    },
                }
            }
        }
    }
}
