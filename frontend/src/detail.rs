use chronicle_types::{Detail, ItemRef, SourceRef, join_or_dash};
use leptos::prelude::*;

use crate::app::{ChronicleState, use_state};

fn sources_view(sources: &[SourceRef]) -> AnyView {
    let links: Vec<(String, String)> = sources
        .iter()
        .map(|s| (s.url.clone(), s.display_label().to_string()))
        .collect();
    view! {
        <div class="sources">
            <strong>"Sources / Pour aller plus loin :"</strong>
            <ul>
                {links.into_iter().map(|(url, label)| view! {
                    <li><a href=url target="_blank" rel="noopener">{label}</a></li>
                }).collect_view()}
            </ul>
        </div>
    }
    .into_any()
}

/// Clickable list of records that jumps the modal to another record.
fn links_view(
    state: ChronicleState,
    heading: &'static str,
    links: Vec<(Option<ItemRef>, String)>,
) -> AnyView {
    if links.is_empty() {
        return view! { <span/> }.into_any();
    }
    view! {
        <div class="links">
            <strong>{heading}</strong>
            <ul>
                {links.into_iter().map(|(target, name)| match target {
                    Some(target) => view! {
                        <li>
                            <a href="#" on:click=move |ev| {
                                ev.prevent_default();
                                state.select(target.clone());
                            }>{name}</a>
                        </li>
                    }.into_any(),
                    None => view! { <li>{name}</li> }.into_any(),
                }).collect_view()}
            </ul>
        </div>
    }
    .into_any()
}

fn body(state: ChronicleState, detail: &Detail<'_>) -> AnyView {
    let title = detail.title().to_string();
    let dates = detail.dates_label();
    match detail {
        Detail::Author {
            author,
            related_events,
        } => {
            let related = related_events
                .iter()
                .map(|e| (Some(ItemRef::Event(e.id.clone())), e.display_name().to_string()))
                .collect();
            view! {
                <div>
                    <h3>{title}</h3>
                    <p><strong>"Langue : "</strong>{author.langue.clone().unwrap_or_default()}</p>
                    <p><strong>"Dates : "</strong>{dates}</p>
                    <p><strong>"Villes principales : "</strong>{join_or_dash(&author.villes)}</p>
                    <div>
                        <strong>"Œuvres principales :"</strong>
                        <ul>
                            {author.oeuvres.iter().cloned().map(|o| view! { <li>{o}</li> }).collect_view()}
                        </ul>
                    </div>
                    {links_view(state, "Événements liés :", related)}
                    <hr/>
                    <p>{author.resume.clone().unwrap_or_default()}</p>
                    {sources_view(&author.sources)}
                </div>
            }
            .into_any()
        }
        Detail::Event { event, authors } => {
            let people = authors
                .iter()
                .map(|l| {
                    let target = l.author.map(|a| ItemRef::Author(a.id.clone()));
                    (target, l.name().to_string())
                })
                .collect();
            view! {
                <div>
                    <h3>{title}</h3>
                    <p><strong>"Type : "</strong>{event.type_tag.clone().unwrap_or_else(|| "—".into())}</p>
                    <p><strong>"Dates : "</strong>{dates}</p>
                    <p><strong>"Ville : "</strong>{event.ville.clone().unwrap_or_else(|| "—".into())}</p>
                    {links_view(state, "Auteurs concernés :", people)}
                    <hr/>
                    <p>{event.resume.clone().unwrap_or_default()}</p>
                    {sources_view(&event.sources)}
                </div>
            }
            .into_any()
        }
    }
}

/// Modal for the selected record. A selection that matches nothing
/// renders nothing.
#[component]
pub fn DetailModal() -> impl IntoView {
    let state = use_state();

    move || {
        let catalog = state.catalog.get()?;
        let selected = state.selected.get()?;
        let detail = catalog.detail_for(&selected)?;
        let content = body(state, &detail);
        Some(view! {
            <div class="modal" on:click=move |_| state.selected.set(None)>
                <div class="modal-content" on:click=|ev| ev.stop_propagation()>
                    <button class="close" on:click=move |_| state.selected.set(None)>"×"</button>
                    {content}
                </div>
            </div>
        })
    }
}
