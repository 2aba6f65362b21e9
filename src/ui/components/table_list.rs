use dioxus::prelude::*;

use crate::platform::confirm::confirm_delete;
use crate::ui::state::app_state::{use_app_state, use_store};
use crate::ui::styles::list_item_style;

#[component]
pub fn TableList() -> Element {
    let store = use_store();
    let state = use_app_state();

    let (tables, current_id, is_loading) = {
        let state = state.read();
        (
            state.tables.clone(),
            state.current_table.as_ref().map(|table| table.id.clone()),
            state.is_loading,
        )
    };

    rsx! {
        div {
            h3 { style: "margin: 4px 0 12px;", "Available Tables" }
            if tables.is_empty() {
                p { style: "color: #777;", "No tables yet" }
            }
            {tables.into_iter().map(|table| {
                let selected = current_id.as_ref() == Some(&table.id);
                let store_for_select = store.clone();
                let store_for_delete = store.clone();
                let table_for_select = table.clone();
                let table_id = table.id.clone();
                let table_name = table.name.clone();
                rsx!(
                    div {
                        key: "{table.id}",
                        style: "{list_item_style(selected)}",
                        onclick: move |_| {
                            let store = store_for_select.clone();
                            let table = table_for_select.clone();
                            spawn(async move {
                                let _ = store.set_current_table(Some(table)).await;
                            });
                        },
                        span { "{table.name}" }
                        button {
                            title: "Delete table",
                            disabled: is_loading,
                            onclick: move |event| {
                                event.stop_propagation();
                                if !confirm_delete(&table_name) {
                                    return;
                                }
                                let store = store_for_delete.clone();
                                let table_id = table_id.clone();
                                spawn(async move {
                                    let _ = store.delete_table(&table_id).await;
                                });
                            },
                            "Delete"
                        }
                    }
                )
            })}
        }
    }
}
