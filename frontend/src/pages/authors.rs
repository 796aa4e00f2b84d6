use chronicle_types::{AuthorColumn, ItemRef, Language, SortOrder, TableColumn, sorted_rows};
use leptos::prelude::*;

use crate::app::use_state;

#[component]
pub fn AuthorsPage() -> impl IntoView {
    let state = use_state();
    let sort = RwSignal::new((AuthorColumn::Name, SortOrder::Ascending));

    let on_header = move |column: AuthorColumn| {
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
            <h2>"Auteurs"</h2>
            {move || match state.catalog.get() {
                None => view! { <p class="loading">"Chargement…"</p> }.into_any(),
                Some(catalog) => {
                    let (column, order) = sort.get();
                    let rows: Vec<(String, Vec<String>, &'static str)> =
                        sorted_rows(catalog.authors(), column, order)
                            .into_iter()
                            .map(|a| {
                                let cells = AuthorColumn::ALL.iter().map(|c| c.cell(a)).collect();
                                let badge = match a.language() {
                                    Language::Latin => "badge latin",
                                    Language::Greek => "badge greek",
                                    Language::Other => "badge other",
                                };
                                (a.id.clone(), cells, badge)
                            })
                            .collect();
                    view! {
                        <table class="records">
                            <thead>
                                <tr>
                                    {AuthorColumn::ALL.into_iter().map(|c| {
                                        let marker = if c == column {
                                            match order {
                                                SortOrder::Ascending => " ▲",
                                                SortOrder::Descending => " ▼",
                                            }
                                        } else {
                                            ""
                                        };
                                        view! {
                                            <th on:click=move |_| on_header(c)>{c.title()}{marker}</th>
                                        }
                                    }).collect_view()}
                                </tr>
                            </thead>
                            <tbody>
                                {rows.into_iter().map(|(id, cells, badge)| {
                                    view! {
                                        <tr on:click=move |_| state.select(ItemRef::Author(id.clone()))>
                                            {cells.into_iter().enumerate().map(|(i, cell)| {
                                                if AuthorColumn::ALL[i] == AuthorColumn::Language {
                                                    view! { <td><span class=badge>{cell}</span></td> }.into_any()
                                                } else {
                                                    view! { <td>{cell}</td> }.into_any()
                                                }
                                            }).collect_view()}
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
