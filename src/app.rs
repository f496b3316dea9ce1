use dioxus::{prelude::*, signals::Signal};

use crate::{
    domain::{AppState, PersistedState},
    ui::{
        components::toast::{Toast, ToastMessage},
        pages::CalculatorPage,
        shell::Shell,
    },
    util::{
        assets, format,
        persistence::{load_persisted_state, save_persisted_state, SaveQueue, AUTOSAVE_DEBOUNCE},
    },
};

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Calculator {},
}

/// Wall-clock time of the last successful write, shown in the footer.
#[derive(Clone, Copy)]
pub struct LastSaved(pub Signal<Option<String>>);

#[component]
pub fn App() -> Element {
    let state = use_signal(AppState::default);
    use_hook({
        let mut state = state;
        move || match load_persisted_state() {
            Some(saved) => state.with_mut(|st| st.apply_persisted(saved)),
            None => state.with_mut(|st| st.mark_hydrated()),
        }
    });
    use_context_provider(|| state);

    let last_saved = use_signal(|| None::<String>);
    use_context_provider(|| LastSaved(last_saved));

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    let mut save_queue = use_signal(SaveQueue::default);

    // Re-runs after every change to the inputs; only the last change in a burst is written.
    use_effect(move || {
        let Some(snapshot) = state.with(|st| st.autosave_snapshot()) else {
            return;
        };
        let ticket = save_queue.write().enqueue();
        spawn(async move {
            tokio::time::sleep(AUTOSAVE_DEBOUNCE).await;
            if save_queue.peek().is_current(ticket) {
                persist_snapshot(snapshot, last_saved).await;
            }
        });
    });

    rsx! {
        document::Link { rel: "icon", href: assets::favicon_data_uri() }
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

/// Failures are logged only; the calculator keeps working on in-memory state.
async fn persist_snapshot(snapshot: PersistedState, mut last_saved: Signal<Option<String>>) {
    match save_persisted_state(snapshot).await {
        Ok(()) => last_saved.set(Some(format::clock(format::now_local()))),
        Err(err) => tracing::warn!("failed to persist calculator state: {err}"),
    }
}

#[component]
pub fn Calculator() -> Element {
    rsx! { Shell { CalculatorPage {} } }
}
