use dioxus::prelude::*;

use crate::domain::entities::table::{ColumnType, TableSchema};
use crate::domain::validation::MIN_RECORD_FIELDS;
use crate::ui::state::app_state::use_store;
use crate::ui::state::forms::RecordDraft;
use crate::ui::styles::{
    alert_style, field_border_style, modal_backdrop_style, modal_style, AlertKind,
};

const NO_FIELD: &str = "";

#[component]
pub fn AddRecordModal(table: TableSchema, on_close: EventHandler<()>) -> Element {
    let store = use_store();
    let mut draft = use_signal(RecordDraft::default);
    let mut is_saving = use_signal(|| false);
    let mut save_error = use_signal(|| None::<String>);

    let current = draft();
    let saving = is_saving();
    let available = current.available_fields(&table);
    let current_kind = current
        .current_field
        .as_deref()
        .and_then(|id| table.column(id))
        .map(|column| column.kind);
    let missing = current.missing_fields();
    let can_add_field = current.can_add_field() && !saving;
    let can_submit = current.can_submit() && !saving;
    let current_error = current.current_error.map(|err| err.to_string());
    let current_error_text = current_error.clone().unwrap_or_default();
    let input_type = if current_kind == Some(ColumnType::Date) { "date" } else { "text" };
    let save_message = save_error();

    let table_for_select = table.clone();
    let table_for_value = table.clone();
    let table_for_bool = table.clone();
    let table_for_add = table.clone();
    let table_for_submit = table.clone();

    rsx! {
        div {
            style: modal_backdrop_style(),
            div {
                style: modal_style(),
                div {
                    style: "display: flex; justify-content: space-between; align-items: center;",
                    h3 { style: "margin: 0;", "Add New Record" }
                    button {
                        title: "Close",
                        disabled: saving,
                        onclick: move |_| on_close.call(()),
                        "×"
                    }
                }

                div {
                    style: "display: flex; gap: 8px; align-items: flex-start; margin: 16px 0;",
                    select {
                        style: "flex: 5;",
                        disabled: available.is_empty() || saving,
                        onchange: move |event| {
                            draft.write().select_field(&table_for_select, &event.value());
                        },
                        option {
                            value: NO_FIELD,
                            selected: current.current_field.is_none(),
                            "Select Field"
                        }
                        for column in available.iter() {
                            option {
                                key: "{column.id}",
                                value: "{column.id}",
                                selected: current.current_field.as_deref() == Some(column.id.as_str()),
                                "{column.label} ({column.kind.as_str()})"
                            }
                        }
                    }
                    div {
                        style: "flex: 5; display: flex; flex-direction: column; gap: 4px;",
                        if current_kind == Some(ColumnType::Boolean) {
                            select {
                                disabled: saving,
                                onchange: move |event| {
                                    draft.write().set_value(&table_for_bool, event.value());
                                },
                                option { value: "", selected: current.current_value.is_empty(), "Value" }
                                option { value: "true", selected: current.current_value == "true", "true" }
                                option { value: "false", selected: current.current_value == "false", "false" }
                            }
                        } else {
                            input {
                                r#type: input_type,
                                placeholder: "Value",
                                disabled: current_kind.is_none() || saving,
                                style: field_border_style(current_error.is_some()),
                                value: "{current.current_value}",
                                oninput: move |event| {
                                    draft.write().set_value(&table_for_value, event.value());
                                },
                            }
                        }
                        small { style: "color: #d32f2f; min-height: 1em;", "{current_error_text}" }
                    }
                    button {
                        style: "flex: 2;",
                        disabled: !can_add_field,
                        onclick: move |_| {
                            draft.write().add_field(&table_for_add);
                        },
                        "Add Field"
                    }
                }

                h4 { style: "margin: 8px 0;", "Selected Fields ({current.selected.len()}):" }
                if current.selected.is_empty() {
                    p { style: "color: #777;", "No fields selected" }
                }
                {current.selected.iter().map(|field| {
                    let label = table
                        .column(&field.column_id)
                        .map(|column| column.label.clone())
                        .unwrap_or_else(|| field.column_id.clone());
                    let column_id = field.column_id.clone();
                    let has_error = field.error.is_some();
                    let error = field.error.map(|err| err.to_string());
                    rsx!(
                        div {
                            key: "{field.column_id}",
                            style: "{field_border_style(has_error)} display: flex; justify-content: space-between; align-items: center; margin-bottom: 6px;",
                            div {
                                strong { "{label}: " }
                                span { "{field.value}" }
                                {error.map(|message| rsx!(
                                    div { style: "color: #d32f2f; font-size: 12px;", "{message}" }
                                ))}
                            }
                            button {
                                title: "Remove field",
                                disabled: saving,
                                onclick: move |_| {
                                    if !is_saving() {
                                        draft.write().remove_field(&column_id);
                                    }
                                },
                                "×"
                            }
                        }
                    )
                })}

                if missing > 0 {
                    p {
                        style: alert_style(AlertKind::Warning),
                        "Need to add {missing} more fields (minimum {MIN_RECORD_FIELDS})"
                    }
                }

                {save_message.map(|message| rsx!(
                    p { style: alert_style(AlertKind::Error), "{message}" }
                ))}

                div {
                    style: "display: flex; justify-content: flex-end; gap: 8px; margin-top: 16px;",
                    button {
                        disabled: saving,
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    button {
                        disabled: !can_submit,
                        onclick: move |_| {
                            let Some(values) = draft.write().prepare_submission(&table_for_submit) else {
                                return;
                            };
                            let store = store.clone();
                            let table_id = table_for_submit.id.clone();
                            is_saving.set(true);
                            save_error.set(None);
                            spawn(async move {
                                match store.add_data_row(&table_id, values).await {
                                    Ok(_) => {
                                        let _ = store.load_table_data(&table_id, false).await;
                                        is_saving.set(false);
                                        on_close.call(());
                                    }
                                    Err(err) => {
                                        save_error.set(Some(err.to_string()));
                                        is_saving.set(false);
                                    }
                                }
                            });
                        },
                        if saving { "Saving..." } else { "Save Record" }
                    }
                }
            }
        }
    }
}
