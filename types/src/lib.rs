//! Shared core of the chronicle viewer.
//!
//! Everything here is pure: records go in, normalized timeline items,
//! visibility sets and detail views come out. Loading and rendering
//! live in the CLI and the web frontend.

pub mod catalog;
pub mod collection;
pub mod date;
pub mod detail;
pub mod filter;
pub mod record;
pub mod table;
pub mod timeline;

pub use catalog::{AuthorLink, Catalog, CatalogStats};
pub use collection::{AUTHORS_KEY, CollectionError, EVENTS_KEY, collection_from_value, parse_collection};
pub use date::{DatePrecision, ResolvedDate, normalize_date};
pub use detail::{Detail, join_or_dash};
pub use filter::{Toggles, visible_ids, visible_items};
pub use record::{Author, Event, EventType, Language, SourceRef};
pub use table::{AuthorColumn, EventColumn, SortOrder, TableColumn, sorted_rows};
pub use timeline::{Category, EndPolicy, ItemKind, ItemRef, TimelineItem, UnknownCategory, build_timeline, span};
