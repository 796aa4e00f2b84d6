//! Timeline items derived from author and event records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::date::{ResolvedDate, first_resolved, normalize_date};
use crate::record::{Author, Event, EventType, Language};

// ── Item identity ────────────────────────────────────────────────────────

/// Which record a timeline item (or a selection) points at.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum ItemRef {
    Author(String),
    Event(String),
}

impl ItemRef {
    pub fn id(&self) -> &str {
        match self {
            Self::Author(id) | Self::Event(id) => id,
        }
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Author(id) => write!(f, "author:{id}"),
            Self::Event(id) => write!(f, "event:{id}"),
        }
    }
}

// ── Category ─────────────────────────────────────────────────────────────

/// Filter/styling class of an item: a language for authors, a type for
/// events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "group", content = "class", rename_all = "lowercase")]
pub enum Category {
    Author(Language),
    Event(EventType),
}

impl Category {
    /// Every category, authors first, in display order.
    pub fn all() -> impl Iterator<Item = Category> {
        Language::ALL
            .into_iter()
            .map(Category::Author)
            .chain(EventType::ALL.into_iter().map(Category::Event))
    }

    /// Short name used on the command line and in class names.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Author(l) => l.slug(),
            Self::Event(t) => t.slug(),
        }
    }

    pub fn class_name(&self) -> String {
        match self {
            Self::Author(l) => format!("author-{}", l.slug()),
            Self::Event(t) => format!("event-{}", t.slug()),
        }
    }

    /// Timeline group the item is drawn in.
    pub fn group(&self) -> &'static str {
        match self {
            Self::Author(_) => "authors",
            Self::Event(_) => "events",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Author(l) => l.as_french(),
            Self::Event(t) => t.as_french(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category `{0}` (expected one of: greek, latin, other-language, council, heresy, political, other)")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::all()
            .find(|c| c.slug() == wanted)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

// ── Items ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Point,
    Range,
}

/// What to do with an item whose start resolved but whose end did not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndPolicy {
    /// Emit a point item.
    #[default]
    Point,
    /// Emit a range ending on January 1 of the following year.
    NextYear,
}

/// A dated entry ready for a timeline widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineItem {
    pub id: ItemRef,
    pub kind: ItemKind,
    pub start: ResolvedDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<ResolvedDate>,
    pub label: String,
    pub category: Category,
}

impl TimelineItem {
    /// Assemble an item, ordering the bounds and applying `policy`.
    fn new(
        id: ItemRef,
        label: &str,
        category: Category,
        start: ResolvedDate,
        end: Option<ResolvedDate>,
        policy: EndPolicy,
    ) -> Self {
        let end = match (end, policy) {
            (Some(e), _) => Some(e),
            (None, EndPolicy::Point) => None,
            (None, EndPolicy::NextYear) => start.next_year(),
        };
        let (start, end) = match end {
            Some(e) if e < start => {
                tracing::warn!(item = %id, start = %start, end = %e, "end precedes start, swapping");
                (e, Some(start))
            }
            _ => (start, end),
        };
        Self {
            kind: if end.is_some() { ItemKind::Range } else { ItemKind::Point },
            id,
            start,
            end,
            label: label.to_string(),
            category,
        }
    }

    /// Tooltip text, e.g. "Jérôme (latin)".
    pub fn title(&self) -> String {
        format!("{} ({})", self.label, self.category.label())
    }

    /// Last instant covered by the item.
    pub fn last(&self) -> ResolvedDate {
        self.end.unwrap_or(self.start)
    }
}

/// Timeline item for an author: birth (or start of activity) to death
/// (or end of activity). `None` when no start date resolves.
pub fn author_item(author: &Author, policy: EndPolicy) -> Option<TimelineItem> {
    let Some(start) = first_resolved([author.naissance.as_deref(), author.actif_debut.as_deref()])
    else {
        tracing::debug!(id = %author.id, "author has no usable start date");
        return None;
    };
    let end = first_resolved([author.mort.as_deref(), author.actif_fin.as_deref()]);
    Some(TimelineItem::new(
        ItemRef::Author(author.id.clone()),
        author.display_name(),
        Category::Author(author.language()),
        start,
        end,
        policy,
    ))
}

/// Timeline item for an event. `None` when no start date resolves.
pub fn event_item(event: &Event, policy: EndPolicy) -> Option<TimelineItem> {
    let Some(start) = event.start_date() else {
        tracing::debug!(id = %event.id, "event has no usable start date");
        return None;
    };
    let end = event.date_fin.as_deref().and_then(normalize_date);
    Some(TimelineItem::new(
        ItemRef::Event(event.id.clone()),
        event.display_name(),
        Category::Event(event.category()),
        start,
        end,
        policy,
    ))
}

/// All items that can be placed on a timeline, authors first, each in
/// collection order. Undated records are left out.
pub fn build_timeline(authors: &[Author], events: &[Event], policy: EndPolicy) -> Vec<TimelineItem> {
    let items: Vec<TimelineItem> = authors
        .iter()
        .filter_map(|a| author_item(a, policy))
        .chain(events.iter().filter_map(|e| event_item(e, policy)))
        .collect();
    tracing::debug!(
        items = items.len(),
        records = authors.len() + events.len(),
        "timeline built"
    );
    items
}

/// Earliest start and latest end over `items`.
pub fn span<'a, I>(items: I) -> Option<(ResolvedDate, ResolvedDate)>
where
    I: IntoIterator<Item = &'a TimelineItem>,
{
    items.into_iter().fold(None, |acc, it| match acc {
        None => Some((it.start, it.last())),
        Some((lo, hi)) => Some((lo.min(it.start), hi.max(it.last()))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(id: &str, naissance: Option<&str>, mort: Option<&str>) -> Author {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "nom": format!("Auteur {id}"),
            "naissance": naissance,
            "mort": mort,
            "langue": "grec",
        }))
        .unwrap()
    }

    fn event(id: &str, debut: Option<&str>, fin: Option<&str>, kind: Option<&str>) -> Event {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "nom": format!("Événement {id}"),
            "type": kind,
            "date_debut": debut,
            "date_fin": fin,
        }))
        .unwrap()
    }

    // ── authors ──────────────────────────────────────────────────────

    #[test]
    fn test_author_with_birth_and_death_is_range() {
        let item = author_item(&author("A1", Some("347"), Some("407")), EndPolicy::Point).unwrap();
        assert_eq!(item.kind, ItemKind::Range);
        assert_eq!(item.start.year(), 347);
        assert_eq!(item.end.unwrap().year(), 407);
        assert!(item.start <= item.end.unwrap());
        assert_eq!(item.category, Category::Author(Language::Greek));
    }

    #[test]
    fn test_reversed_bounds_are_swapped() {
        let item = author_item(&author("A1", Some("430"), Some("354")), EndPolicy::Point).unwrap();
        assert_eq!(item.start.year(), 354);
        assert_eq!(item.end.unwrap().year(), 430);
    }

    #[test]
    fn test_author_active_period_fallback() {
        let mut a = author("A2", Some("inconnue"), None);
        a.actif_debut = Some("ca. 180".into());
        a.actif_fin = Some("ca. 200".into());
        let item = author_item(&a, EndPolicy::Point).unwrap();
        assert_eq!(item.start.year(), 180);
        assert_eq!(item.end.unwrap().year(), 200);
    }

    #[test]
    fn test_author_without_any_date_is_excluded() {
        assert!(author_item(&author("A3", None, Some("420")), EndPolicy::Point).is_none());
        assert!(author_item(&author("A3", Some("IIe siècle"), None), EndPolicy::NextYear).is_none());
    }

    // ── end policy ───────────────────────────────────────────────────

    #[test]
    fn test_missing_end_point_policy() {
        let item = author_item(&author("A4", Some("310"), None), EndPolicy::Point).unwrap();
        assert_eq!(item.kind, ItemKind::Point);
        assert_eq!(item.end, None);
    }

    #[test]
    fn test_missing_end_next_year_policy() {
        let item = event_item(&event("E1", Some("451"), None, None), EndPolicy::NextYear).unwrap();
        assert_eq!(item.kind, ItemKind::Range);
        assert_eq!(item.end.unwrap().year(), 452);
    }

    // ── events ───────────────────────────────────────────────────────

    #[test]
    fn test_event_category_and_legacy_date() {
        let legacy: Event =
            serde_json::from_str(r#"{"id":"E2","nom":"Nicée","date":"325","type":"concile"}"#).unwrap();
        let item = event_item(&legacy, EndPolicy::Point).unwrap();
        assert_eq!(item.id, ItemRef::Event("E2".into()));
        assert_eq!(item.category, Category::Event(EventType::Council));
        assert_eq!(item.category.class_name(), "event-council");
        assert_eq!(item.title(), "Nicée (concile)");

        let unknown = event_item(&event("E3", Some("400"), None, Some("synode")), EndPolicy::Point).unwrap();
        assert_eq!(unknown.category, Category::Event(EventType::Other));
    }

    #[test]
    fn test_event_start_falls_back_to_legacy_date() {
        let e: Event =
            serde_json::from_str(r#"{"id":"E9","date_debut":"inconnue","date":"325"}"#).unwrap();
        let item = event_item(&e, EndPolicy::Point).unwrap();
        assert_eq!(item.start.year(), 325);
        assert_eq!(item.kind, ItemKind::Point);
    }

    #[test]
    fn test_build_timeline_skips_undated() {
        let authors = vec![author("A1", Some("347"), Some("420")), author("A2", None, None)];
        let events = vec![event("E1", Some("381"), None, None), event("E2", None, None, None)];
        let items = build_timeline(&authors, &events, EndPolicy::Point);
        let ids: Vec<String> = items.iter().map(|i| i.id.to_string()).collect();
        assert_eq!(ids, vec!["author:A1", "event:E1"]);

        let (lo, hi) = span(&items).unwrap();
        assert_eq!(lo.year(), 347);
        assert_eq!(hi.year(), 420);
        assert_eq!(span(Vec::<TimelineItem>::new().iter()), None);
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("latin".parse::<Category>(), Ok(Category::Author(Language::Latin)));
        assert_eq!("Heresy".parse::<Category>(), Ok(Category::Event(EventType::Heresy)));
        assert_eq!("other".parse::<Category>(), Ok(Category::Event(EventType::Other)));
        assert!("coptic".parse::<Category>().is_err());
        assert_eq!(Category::all().count(), 7);
    }
}
