use dioxus::prelude::*;

use crate::domain::entities::table::ColumnType;
use crate::ui::state::app_state::{use_app_state, use_store};
use crate::ui::state::forms::TableDraft;
use crate::ui::styles::{alert_style, modal_backdrop_style, modal_style, AlertKind};

#[component]
pub fn TableCreator() -> Element {
    let store = use_store();
    let state = use_app_state();
    let mut show_form = use_signal(|| false);
    let mut draft = use_signal(TableDraft::default);
    let mut submit_error = use_signal(|| None::<String>);

    let (has_tables, is_loading) = {
        let state = state.read();
        (!state.tables.is_empty(), state.is_loading)
    };

    if has_tables {
        return rsx! {
            div {
                p {
                    style: alert_style(AlertKind::Info),
                    "You can only have one table. Delete the existing table to create a new one."
                }
                button { disabled: true, "Create Table (disabled)" }
            }
        };
    }

    if !show_form() {
        return rsx! {
            div {
                button { onclick: move |_| show_form.set(true), "Create Table" }
            }
        };
    }

    let current = draft();
    let can_submit = current.can_submit(is_loading);
    let can_add_column = current.can_add_column();
    let can_remove = current.columns.len() > 1;
    let submit_message = submit_error();

    let mut close = move || {
        draft.set(TableDraft::default());
        submit_error.set(None);
        show_form.set(false);
    };

    rsx! {
        div {
            style: modal_backdrop_style(),
            div {
                style: modal_style(),
                div {
                    style: "display: flex; justify-content: space-between; align-items: center;",
                    h3 { style: "margin: 0;", "Create New Table" }
                    button { title: "Close", onclick: move |_| close(), "×" }
                }

                label {
                    style: "display: flex; flex-direction: column; gap: 4px; margin: 16px 0;",
                    span { "Table Name" }
                    input {
                        r#type: "text",
                        required: true,
                        value: "{current.name}",
                        oninput: move |event| draft.write().name = event.value(),
                    }
                }

                h4 { style: "margin: 8px 0;", "Columns (min 5, max 15)" }

                {current.columns.iter().enumerate().map(|(idx, column)| {
                    let kind = column.kind;
                    rsx!(
                        div {
                            key: "{idx}",
                            style: "display: flex; gap: 8px; align-items: center; margin-bottom: 8px;",
                            input {
                                r#type: "text",
                                required: true,
                                placeholder: "Column Label",
                                style: "flex: 1;",
                                value: "{column.label}",
                                oninput: move |event| draft.write().set_label(idx, event.value()),
                            }
                            select {
                                onchange: move |event| {
                                    if let Some(kind) = ColumnType::parse(&event.value()) {
                                        draft.write().set_kind(idx, kind);
                                    }
                                },
                                for option_kind in ColumnType::ALL {
                                    option {
                                        value: option_kind.as_str(),
                                        selected: option_kind == kind,
                                        "{option_kind.label()}"
                                    }
                                }
                            }
                            if can_remove {
                                button {
                                    title: "Remove column",
                                    onclick: move |_| draft.write().remove_column(idx),
                                    "−"
                                }
                            }
                        }
                    )
                })}

                {submit_message.map(|message| rsx!(
                    p { style: alert_style(AlertKind::Error), "{message}" }
                ))}

                div {
                    style: "display: flex; justify-content: space-between; margin-top: 16px;",
                    button {
                        disabled: !can_add_column,
                        onclick: move |_| draft.write().add_column(),
                        "+ Add Column"
                    }
                    div {
                        style: "display: flex; gap: 8px;",
                        button { onclick: move |_| close(), "Cancel" }
                        button {
                            disabled: !can_submit,
                            onclick: move |_| {
                                let submitted = draft();
                                let store = store.clone();
                                submit_error.set(None);
                                spawn(async move {
                                    match store.create_new_table(&submitted.name, submitted.to_columns()).await {
                                        Ok(_) => close(),
                                        Err(err) => submit_error.set(Some(err.to_string())),
                                    }
                                });
                            },
                            "Create Table"
                        }
                    }
                }
            }
        }
    }
}
