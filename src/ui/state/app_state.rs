use std::rc::Rc;

use dioxus::prelude::*;

use crate::usecase::services::table_store::TableStore;
use crate::usecase::state::ApplicationState;

pub type SharedStore = Rc<TableStore>;

/// Mirrors the store into a signal so components re-render on every action.
/// The subscription is dropped with the calling component.
pub fn use_store_state(store: &SharedStore) -> Signal<ApplicationState> {
    let state = use_signal(|| store.snapshot());

    let store_for_subscribe = store.clone();
    let subscription = use_hook(move || {
        store_for_subscribe.subscribe(move |next| {
            let mut state = state;
            state.set(next.clone());
        })
    });

    let store_for_drop = store.clone();
    use_drop(move || {
        store_for_drop.unsubscribe(subscription);
    });

    state
}

pub fn use_store() -> SharedStore {
    use_context::<SharedStore>()
}

pub fn use_app_state() -> Signal<ApplicationState> {
    use_context::<Signal<ApplicationState>>()
}
