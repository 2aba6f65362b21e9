use std::rc::Rc;

use dioxus::prelude::*;
use tracing::warn;

use crate::config::AppConfig;
use crate::infra::http::gateway::HttpGateway;
use crate::ui::components::data_table::DataTable;
use crate::ui::components::table_creator::TableCreator;
use crate::ui::components::table_list::TableList;
use crate::ui::state::app_state::{use_store_state, SharedStore};
use crate::ui::styles::{
    alert_style, main_panel_style, root_container_style, sidebar_style, AlertKind,
};
use crate::usecase::services::table_store::TableStore;

/// Handed to the root component by the launcher. A config that failed to load
/// is shown instead of the workspace.
pub type ConfigState = Result<AppConfig, String>;

#[component]
pub fn App() -> Element {
    let config = use_context::<ConfigState>();

    match config {
        Ok(config) => rsx! { Workspace { config } },
        Err(err) => rsx! {
            div {
                style: "padding: 24px; font-family: sans-serif;",
                h3 { "Unable to load configuration" }
                p { "{err}" }
            }
        },
    }
}

#[component]
fn Workspace(config: AppConfig) -> Element {
    let store: SharedStore = use_hook(|| {
        let gateway = HttpGateway::new(config.api_base_url.clone(), config.total_count);
        Rc::new(TableStore::new(Rc::new(gateway), config.page_size))
    });
    let state = use_store_state(&store);
    use_context_provider(|| store.clone());
    use_context_provider(|| state);

    let store_for_init = store.clone();
    use_hook(move || {
        spawn(async move {
            if let Err(err) = store_for_init.initialize().await {
                warn!(%err, "initial table load failed");
            }
        });
    });

    let error = state.read().error.clone();
    let show_banner = state.read().current_table.is_none();

    rsx! {
        div {
            style: root_container_style(),
            aside {
                style: sidebar_style(),
                TableList {}
            }
            main {
                style: main_panel_style(),
                TableCreator {}
                if show_banner {
                    {error.map(|message| rsx!(
                        p { style: alert_style(AlertKind::Error), "{message}" }
                    ))}
                }
                DataTable {}
            }
        }
    }
}
