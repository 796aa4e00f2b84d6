use chronicle_types::{Category, EndPolicy, ItemKind, TimelineItem, span};
use leptos::prelude::*;

use crate::app::use_state;

/// Horizontal position of an item as percentages of the whole span.
fn placement(item: &TimelineItem, lo: i32, hi: i32) -> (f64, f64) {
    let total = f64::from((hi - lo).max(1));
    let left = f64::from(item.start.days_from_ce() - lo) / total * 100.0;
    let width = match item.kind {
        ItemKind::Range => f64::from(item.last().days_from_ce() - item.start.days_from_ce()) / total * 100.0,
        ItemKind::Point => 0.0,
    };
    (left, width)
}

#[component]
fn CategoryToggles() -> impl IntoView {
    let state = use_state();
    view! {
        <div class="filters">
            {Category::all().map(|c| {
                view! {
                    <label class=format!("filter {}", c.class_name())>
                        <input
                            type="checkbox"
                            prop:checked=move || state.toggles.with(|t| t.is_enabled(c))
                            on:change=move |ev| {
                                let on = event_target_checked(&ev);
                                state.toggles.update(|t| t.set(c, on));
                            }
                        />
                        {c.label()}
                    </label>
                }
            }).collect_view()}
        </div>
    }
}

#[component]
pub fn TimelinePage() -> impl IntoView {
    let state = use_state();

    // Dates are resolved once per catalog; toggles only filter.
    let items = Memo::new(move |_| {
        state
            .catalog
            .get()
            .map(|c| c.timeline(EndPolicy::Point))
            .unwrap_or_default()
    });

    view! {
        <div>
            <h2>"Frise chronologique"</h2>
            <CategoryToggles/>
            {move || {
                if state.catalog.with(Option::is_none) {
                    return view! { <p class="loading">"Chargement…"</p> }.into_any();
                }
                let all = items.get();
                let Some((lo, hi)) = span(&all) else {
                    return view! { <p class="empty">"Aucune donnée datée."</p> }.into_any();
                };
                let (lo_day, hi_day) = (lo.days_from_ce(), hi.days_from_ce());
                let toggles = state.toggles.get();
                let mut visible: Vec<TimelineItem> =
                    all.into_iter().filter(|it| toggles.is_visible(it)).collect();
                visible.sort_by_key(|it| (it.category.group(), it.start));
                let count = visible.len();

                view! {
                    <div>
                        <p class="axis">
                            <span>{lo.year()}</span>
                            <span>{count} " éléments affichés"</span>
                            <span>{hi.year()}</span>
                        </p>
                        <div class="timeline">
                            {visible.into_iter().map(|it| {
                                let (left, width) = placement(&it, lo_day, hi_day);
                                let title = it.title();
                                let class = format!(
                                    "item {} {}",
                                    if it.kind == ItemKind::Range { "range" } else { "point" },
                                    it.category.class_name()
                                );
                                let id = it.id.clone();
                                view! {
                                    <div class="row">
                                        <div
                                            class=class
                                            title=title
                                            style=format!("left:{left:.2}%;width:{width:.2}%;")
                                            on:click=move |_| state.select(id.clone())
                                        >
                                            {it.label.clone()}
                                        </div>
                                    </div>
                                }
                            }).collect_view()}
                        </div>
                    </div>
                }.into_any()
            }}
        </div>
    }
}
