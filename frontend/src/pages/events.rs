use chronicle_types::{EventColumn, ItemRef, SortOrder, TableColumn, sorted_rows};
use leptos::prelude::*;

use crate::app::use_state;

#[component]
pub fn EventsPage() -> impl IntoView {
    let state = use_state();
    let sort = RwSignal::new((EventColumn::Start, SortOrder::Ascending));

    let on_header = move |column: EventColumn| {
        sort.update(|(current, order)| {
            if *current == column {
                *order = order.flipped();
            } else {
                *current = column;
                *order = SortOrder::Ascending;
            }
        });
    };

    view! {
        <div>
            <h2>"Événements"</h2>
            {move || match state.catalog.get() {
                None => view! { <p class="loading">"Chargement…"</p> }.into_any(),
                Some(catalog) => {
                    let (column, order) = sort.get();
                    let rows: Vec<(String, String, Vec<String>)> =
                        sorted_rows(catalog.events(), column, order)
                            .into_iter()
                            .map(|e| {
                                let class = format!("event-{}", e.category().slug());
                                let cells = EventColumn::ALL.iter().map(|c| c.cell(e)).collect();
                                (e.id.clone(), class, cells)
                            })
                            .collect();
                    view! {
                        <table class="records">
                            <thead>
                                <tr>
                                    {EventColumn::ALL.into_iter().map(|c| {
                                        let marker = match (c == column, order) {
                                            (true, SortOrder::Ascending) => " ▲",
                                            (true, SortOrder::Descending) => " ▼",
                                            (false, _) => "",
                                        };
                                        view! {
                                            <th on:click=move |_| on_header(c)>{c.title()}{marker}</th>
                                        }
                                    }).collect_view()}
                                </tr>
                            </thead>
                            <tbody>
                                {rows.into_iter().map(|(id, class, cells)| {
                                    view! {
                                        <tr class=class on:click=move |_| state.select(ItemRef::Event(id.clone()))>
                                            {cells.into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}
                                        </tr>
                                    }
                                }).collect_view()}
                            </tbody>
                        </table>
                    }.into_any()
                }
            }}
        </div>
    }
}
