//! The loaded data set and its lookup tables.

use std::collections::HashMap;

use serde::Serialize;

use crate::record::{Author, Event};
use crate::timeline::{EndPolicy, ItemRef, TimelineItem, build_timeline};

/// An author id listed by an event, resolved against the catalog when
/// possible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuthorLink<'a> {
    pub id: &'a str,
    pub author: Option<&'a Author>,
}

impl<'a> AuthorLink<'a> {
    /// Author name, or the bare id when the author is not in the catalog.
    pub fn name(&self) -> &'a str {
        self.author.map(Author::display_name).unwrap_or(self.id)
    }
}

/// Counts shown by the `stats` command and the page header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub authors: usize,
    pub events: usize,
    pub dated_authors: usize,
    pub dated_events: usize,
    /// Author ids named by events but missing from the author collection.
    pub dangling_author_refs: usize,
}

/// Immutable authors + events with id indexes and the author → events
/// adjacency, built once after loading.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    authors: Vec<Author>,
    events: Vec<Event>,
    author_index: HashMap<String, usize>,
    event_index: HashMap<String, usize>,
    /// author id → indices into `events`, in collection order.
    events_by_author: HashMap<String, Vec<usize>>,
}

impl Catalog {
    pub fn new(authors: Vec<Author>, events: Vec<Event>) -> Self {
        let author_index = index_by_id(authors.iter().map(|a| a.id.as_str()), "author");
        let event_index = index_by_id(events.iter().map(|e| e.id.as_str()), "event");

        let mut events_by_author: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, ev) in events.iter().enumerate() {
            // Skip shadowed duplicates so an event is reachable once.
            if event_index.get(ev.id.as_str()) != Some(&i) {
                continue;
            }
            for author_id in &ev.auteurs_associes {
                let list = events_by_author.entry(author_id.clone()).or_default();
                if list.last() != Some(&i) {
                    list.push(i);
                }
            }
        }

        tracing::info!(
            authors = authors.len(),
            events = events.len(),
            "catalog ready"
        );

        Self {
            authors,
            events,
            author_index,
            event_index,
            events_by_author,
        }
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn author(&self, id: &str) -> Option<&Author> {
        self.author_index.get(id).map(|&i| &self.authors[i])
    }

    pub fn event(&self, id: &str) -> Option<&Event> {
        self.event_index.get(id).map(|&i| &self.events[i])
    }

    /// Events whose `auteurs_associes` contains `author_id`.
    pub fn related_events(&self, author_id: &str) -> Vec<&Event> {
        self.events_by_author
            .get(author_id)
            .map(|idx| idx.iter().map(|&i| &self.events[i]).collect())
            .unwrap_or_default()
    }

    /// The authors an event lists, in the event's order.
    pub fn associated_authors<'a>(&'a self, event: &'a Event) -> Vec<AuthorLink<'a>> {
        event
            .auteurs_associes
            .iter()
            .map(|id| AuthorLink {
                id: id.as_str(),
                author: self.author(id),
            })
            .collect()
    }

    /// Resolve a bare id, looking at authors first and then events.
    pub fn resolve(&self, id: &str) -> Option<ItemRef> {
        if self.author_index.contains_key(id) {
            Some(ItemRef::Author(id.to_string()))
        } else if self.event_index.contains_key(id) {
            Some(ItemRef::Event(id.to_string()))
        } else {
            None
        }
    }

    pub fn timeline(&self, policy: EndPolicy) -> Vec<TimelineItem> {
        build_timeline(&self.authors, &self.events, policy)
    }

    pub fn stats(&self) -> CatalogStats {
        let items = self.timeline(EndPolicy::Point);
        let dated_authors = items
            .iter()
            .filter(|i| matches!(i.id, ItemRef::Author(_)))
            .count();
        let dangling_author_refs = self
            .events_by_author
            .keys()
            .filter(|id| !self.author_index.contains_key(id.as_str()))
            .count();
        CatalogStats {
            authors: self.authors.len(),
            events: self.events.len(),
            dated_authors,
            dated_events: items.len() - dated_authors,
            dangling_author_refs,
        }
    }
}

fn index_by_id<'a>(ids: impl Iterator<Item = &'a str>, what: &str) -> HashMap<String, usize> {
    let mut index = HashMap::new();
    for (i, id) in ids.enumerate() {
        if index.contains_key(id) {
            tracing::warn!(id, kind = what, "duplicate id, keeping the first record");
            continue;
        }
        index.insert(id.to_string(), i);
    }
    index
}
