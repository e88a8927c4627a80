pub fn root_container_style() -> &'static str {
    "height: 100vh; display: flex; flex-direction: column; overflow: hidden; font-family: system-ui, sans-serif; background: #f6f7f9;"
}

pub fn page_body_style() -> &'static str {
    "flex: 1; min-height: 0; overflow: auto; padding: 12px 16px; display: flex; flex-direction: column; gap: 12px;"
}

pub fn table_container_style() -> &'static str {
    "flex: 1; min-height: 0; overflow: auto; border: 1px solid #ddd; border-radius: 8px; background: #fff;"
}

pub fn table_header_cell_style() -> &'static str {
    "position: sticky; top: 0; background: #f0f2f5; border-bottom: 1px solid #bbb; padding: 6px 8px; text-align: left; white-space: nowrap;"
}

pub fn table_cell_style(numeric: bool) -> String {
    let align = if numeric { "right" } else { "left" };
    format!("border-bottom: 1px solid #eee; padding: 4px 8px; text-align: {align}; white-space: nowrap;")
}

pub fn tab_button_style(active: bool) -> String {
    let (background, color) = if active {
        ("#2f6fde", "#fff")
    } else {
        ("#fff", "#333")
    };
    format!(
        "border: 1px solid #bbb; background: {background}; color: {color}; padding: 6px 14px; border-radius: 6px; cursor: pointer;"
    )
}

pub fn button_style(enabled: bool) -> String {
    let opacity = if enabled { "1" } else { "0.45" };
    let cursor = if enabled { "pointer" } else { "not-allowed" };
    format!(
        "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: {cursor}; opacity: {opacity};"
    )
}

pub fn card_style() -> &'static str {
    "flex: 1; min-width: 160px; border: 1px solid #ddd; border-radius: 8px; background: #fff; padding: 10px 12px;"
}

pub fn skeleton_bar_style(width_pct: u32) -> String {
    format!(
        "height: 12px; width: {}%; border-radius: 4px; background: #e3e6eb;",
        width_pct.min(100)
    )
}
