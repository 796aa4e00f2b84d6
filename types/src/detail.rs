//! Detail view resolution: selected id → the record plus its cross-links.

use crate::catalog::{AuthorLink, Catalog};
use crate::record::{Author, Event, non_blank};
use crate::timeline::ItemRef;

/// Everything a detail panel needs for one selection.
#[derive(Debug, Clone, PartialEq)]
pub enum Detail<'a> {
    Author {
        author: &'a Author,
        related_events: Vec<&'a Event>,
    },
    Event {
        event: &'a Event,
        authors: Vec<AuthorLink<'a>>,
    },
}

impl<'a> Detail<'a> {
    pub fn title(&self) -> &'a str {
        match self {
            Self::Author { author, .. } => author.display_name(),
            Self::Event { event, .. } => event.display_name(),
        }
    }

    pub fn item_ref(&self) -> ItemRef {
        match self {
            Self::Author { author, .. } => ItemRef::Author(author.id.clone()),
            Self::Event { event, .. } => ItemRef::Event(event.id.clone()),
        }
    }

    /// "354 – 430", with "?" for an unknown bound.
    ///
    /// Shows the raw text of the record, not the resolved dates.
    pub fn dates_label(&self) -> String {
        match self {
            Self::Author { author, .. } => {
                let start = non_blank(&author.naissance)
                    .or(non_blank(&author.actif_debut))
                    .unwrap_or("?");
                let end = non_blank(&author.mort)
                    .or(non_blank(&author.actif_fin))
                    .unwrap_or("?");
                format!("{start} – {end}")
            }
            Self::Event { event, .. } => {
                let start = event.start_text().unwrap_or("?");
                match non_blank(&event.date_fin) {
                    Some(end) => format!("{start} – {end}"),
                    None => start.to_string(),
                }
            }
        }
    }
}

impl Catalog {
    /// Detail for a bare id: authors are looked up first, then events.
    /// A miss is `None` and the caller shows nothing.
    pub fn detail(&self, id: &str) -> Option<Detail<'_>> {
        let Some(item) = self.resolve(id) else {
            tracing::debug!(id, "selection matches no record");
            return None;
        };
        self.detail_for(&item)
    }

    pub fn detail_for(&self, item: &ItemRef) -> Option<Detail<'_>> {
        match item {
            ItemRef::Author(id) => {
                let author = self.author(id)?;
                Some(Detail::Author {
                    author,
                    related_events: self.related_events(id),
                })
            }
            ItemRef::Event(id) => {
                let event = self.event(id)?;
                Some(Detail::Event {
                    event,
                    authors: self.associated_authors(event),
                })
            }
        }
    }
}

/// Join a list for display, with a dash for an empty list.
pub fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "—".to_string()
    } else {
        items.join(", ")
    }
}
