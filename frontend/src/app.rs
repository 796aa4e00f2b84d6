use std::sync::Arc;

use chronicle_types::{Catalog, ItemRef, Toggles};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::{
    components::{A, Route, Router, Routes},
    path,
};

use crate::detail::DetailModal;
use crate::loader::load_catalog;
use crate::pages::{authors::AuthorsPage, events::EventsPage, timeline::TimelinePage};

/// Page-wide state, built once and shared through context.
#[derive(Clone, Copy)]
pub struct ChronicleState {
    /// `None` until both collections have been fetched.
    pub catalog: RwSignal<Option<Arc<Catalog>>>,
    /// Record shown in the detail modal.
    pub selected: RwSignal<Option<ItemRef>>,
    pub toggles: RwSignal<Toggles>,
}

impl ChronicleState {
    fn new() -> Self {
        Self {
            catalog: RwSignal::new(None),
            selected: RwSignal::new(None),
            toggles: RwSignal::new(Toggles::all()),
        }
    }

    pub fn select(&self, item: ItemRef) {
        self.selected.set(Some(item));
    }
}

pub fn use_state() -> ChronicleState {
    expect_context::<ChronicleState>()
}

#[component]
pub fn App() -> impl IntoView {
    let state = ChronicleState::new();
    provide_context(state);

    spawn_local(async move {
        let catalog = load_catalog().await;
        state.catalog.set(Some(Arc::new(catalog)));
    });

    view! {
        <Router>
            <div id="app">
                <header>
                    <h1>"Pères de l'Église · Auteurs et événements"</h1>
                    <nav>
                        <A href="/">"Frise"</A>
                        <A href="/authors">"Auteurs"</A>
                        <A href="/events">"Événements"</A>
                    </nav>
                </header>
                <main>
                    <Routes fallback=|| {
                        view! { <p class="error">"Page introuvable"</p> }
                    }>
                        <Route path=path!("/") view=TimelinePage/>
                        <Route path=path!("/authors") view=AuthorsPage/>
                        <Route path=path!("/events") view=EventsPage/>
                    </Routes>
                </main>
                <DetailModal/>
            </div>
        </Router>
    }
}
