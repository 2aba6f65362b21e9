use std::rc::Rc;

use dioxus::prelude::*;

use crate::domain::entities::table::TableId;
use crate::ui::components::add_record_modal::AddRecordModal;
use crate::ui::state::app_state::{use_app_state, use_store, SharedStore};
use crate::ui::styles::{
    alert_style, is_near_bottom, table_cell_style, table_container_style,
    table_header_cell_style, AlertKind,
};

#[component]
pub fn DataTable() -> Element {
    let store = use_store();
    let state = use_app_state();
    let mut container = use_signal(|| None::<Rc<MountedData>>);
    let mut show_modal = use_signal(|| false);

    let snapshot = state.read();
    let Some(table) = snapshot.current_table.clone() else {
        return rsx! {
            div {
                style: "padding: 24px; text-align: center;",
                h3 { "Please select or create a table" }
            }
        };
    };
    let rows = snapshot.current_rows().to_vec();
    let is_loading = snapshot.is_loading;
    let is_loading_more = snapshot.is_loading_more;
    let is_loading_rows = snapshot.is_loading_rows;
    let has_more = snapshot.has_more;
    let error = snapshot.error.clone();
    drop(snapshot);

    let columns = table.columns.clone();
    let store_for_scroll = store.clone();
    let store_for_button = store.clone();
    let table_id_for_scroll = table.id.clone();
    let table_id_for_button = table.id.clone();

    let body = if (is_loading || is_loading_rows) && !is_loading_more {
        rsx! {
            div { style: "display: flex; justify-content: center; padding: 24px;", "Loading…" }
        }
    } else if let Some(message) = error {
        rsx! {
            div { style: alert_style(AlertKind::Error), "{message}" }
        }
    } else if rows.is_empty() {
        rsx! {
            p { style: "padding: 24px; text-align: center;", "No data to display" }
        }
    } else {
        rsx! {
            div {
                style: table_container_style(),
                onmounted: move |event| container.set(Some(event.data())),
                onscroll: move |_| {
                    if !state.read().can_load_more() {
                        return;
                    }
                    let Some(element) = container() else {
                        return;
                    };
                    load_more_if_near_bottom(
                        store_for_scroll.clone(),
                        table_id_for_scroll.clone(),
                        element,
                    );
                },
                table {
                    style: "width: 100%; border-collapse: collapse;",
                    thead {
                        tr {
                            for column in columns.iter() {
                                th { key: "{column.id}", style: table_header_cell_style(), "{column.label}" }
                            }
                        }
                    }
                    tbody {
                        {rows.iter().map(|row| rsx!(
                            tr {
                                key: "{row.id}",
                                for column in columns.iter() {
                                    td {
                                        key: "{row.id}-{column.id}",
                                        style: table_cell_style(),
                                        "{row.cell(&column.id)}"
                                    }
                                }
                            }
                        ))}
                    }
                }
                if is_loading_more {
                    div { style: "display: flex; justify-content: center; padding: 12px;", "Loading more…" }
                } else if has_more {
                    div {
                        style: "display: flex; justify-content: center; padding: 12px;",
                        button {
                            onclick: move |_| {
                                let store = store_for_button.clone();
                                let table_id = table_id_for_button.clone();
                                spawn(async move {
                                    let _ = store.load_table_data(&table_id, true).await;
                                });
                            },
                            "Load more"
                        }
                    }
                }
            }
        }
    };

    rsx! {
        div {
            style: "border: 1px solid #ddd; border-radius: 8px; padding: 20px;",
            div {
                style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 16px;",
                h2 { style: "margin: 0;", "{table.name}" }
                button {
                    disabled: is_loading,
                    onclick: move |_| show_modal.set(true),
                    if is_loading { "Loading…" } else { "Add Record" }
                }
            }
            {body}
            if show_modal() {
                AddRecordModal {
                    table: table.clone(),
                    on_close: move |_| show_modal.set(false),
                }
            }
        }
    }
}

fn load_more_if_near_bottom(store: SharedStore, table_id: TableId, element: Rc<MountedData>) {
    spawn(async move {
        let (Ok(offset), Ok(size), Ok(rect)) = (
            element.get_scroll_offset().await,
            element.get_scroll_size().await,
            element.get_client_rect().await,
        ) else {
            return;
        };
        if is_near_bottom(offset.y, size.height, rect.size.height) {
            let _ = store.load_table_data(&table_id, true).await;
        }
    });
}
