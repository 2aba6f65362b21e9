/// Remaining scroll distance below which the next page is requested.
pub const LOAD_MORE_THRESHOLD_PX: f64 = 100.0;

pub fn is_near_bottom(scroll_top: f64, scroll_height: f64, client_height: f64) -> bool {
    scroll_height - (scroll_top + client_height) < LOAD_MORE_THRESHOLD_PX
}

pub fn root_container_style() -> &'static str {
    "max-width: 1200px; margin: 32px auto; padding: 0 16px; display: flex; gap: 24px; align-items: flex-start; font-family: sans-serif;"
}

pub fn sidebar_style() -> &'static str {
    "flex: 0 0 320px; border: 1px solid #ddd; border-radius: 8px; padding: 12px;"
}

pub fn main_panel_style() -> &'static str {
    "flex: 1; min-width: 0; display: flex; flex-direction: column; gap: 16px;"
}

pub fn table_container_style() -> &'static str {
    "max-height: 600px; overflow: auto; border: 1px solid #ddd; border-radius: 8px;"
}

pub fn table_header_cell_style() -> &'static str {
    "position: sticky; top: 0; z-index: 1; background: #f7f7f7; text-align: left; padding: 8px 10px; border-bottom: 1px solid #ddd;"
}

pub fn table_cell_style() -> &'static str {
    "padding: 6px 10px; border-bottom: 1px solid #eee; white-space: nowrap;"
}

pub fn list_item_style(selected: bool) -> String {
    let background = if selected { "#eef4ff" } else { "transparent" };
    format!(
        "display: flex; justify-content: space-between; align-items: center; padding: 8px 10px; border-radius: 6px; cursor: pointer; background: {background};"
    )
}

pub fn modal_backdrop_style() -> &'static str {
    "position: fixed; inset: 0; background: rgba(0,0,0,0.35); display: flex; align-items: center; justify-content: center; z-index: 1000;"
}

pub fn modal_style() -> &'static str {
    "background: #fff; border-radius: 8px; padding: 20px; width: min(760px, 92vw); max-height: 90vh; overflow-y: auto; box-shadow: 0 10px 24px rgba(0,0,0,0.2);"
}

pub fn alert_style(kind: AlertKind) -> &'static str {
    match kind {
        AlertKind::Error => "padding: 10px 12px; border-radius: 6px; background: #fdecea; color: #611a15;",
        AlertKind::Warning => "padding: 10px 12px; border-radius: 6px; background: #fff4e5; color: #663c00;",
        AlertKind::Info => "padding: 10px 12px; border-radius: 6px; background: #e8f4fd; color: #0d3c61;",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Error,
    Warning,
    Info,
}

pub fn field_border_style(has_error: bool) -> &'static str {
    if has_error {
        "border: 1px solid #d32f2f; border-radius: 6px; padding: 8px 10px;"
    } else {
        "border: 1px solid #ddd; border-radius: 6px; padding: 8px 10px;"
    }
}
