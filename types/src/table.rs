//! Column accessors and sorting for the tabular views.
//!
//! Tables list every record, dated or not. Date columns sort on the
//! resolved date with unresolvable cells kept at the bottom; other
//! columns sort on their text, case-insensitively.

use std::cmp::Ordering;

use crate::date::{ResolvedDate, first_resolved, normalize_date};
use crate::record::{Author, Event};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// A column of a table over rows of type `Row`.
pub trait TableColumn: Copy {
    type Row;

    fn title(&self) -> &'static str;

    /// Text shown in the cell.
    fn cell(&self, row: &Self::Row) -> String;

    /// Chronological key for date columns; `None` elsewhere.
    fn date_key(&self, _row: &Self::Row) -> Option<ResolvedDate> {
        None
    }

    fn is_date(&self) -> bool {
        false
    }
}

// ── Authors ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthorColumn {
    Name,
    Birth,
    Death,
    Language,
    Cities,
    Works,
}

impl AuthorColumn {
    pub const ALL: [AuthorColumn; 6] = [
        Self::Name,
        Self::Birth,
        Self::Death,
        Self::Language,
        Self::Cities,
        Self::Works,
    ];
}

impl TableColumn for AuthorColumn {
    type Row = Author;

    fn title(&self) -> &'static str {
        match self {
            Self::Name => "Nom",
            Self::Birth => "Naissance",
            Self::Death => "Mort",
            Self::Language => "Langue",
            Self::Cities => "Villes",
            Self::Works => "Œuvres",
        }
    }

    fn cell(&self, a: &Author) -> String {
        match self {
            Self::Name => a.display_name().to_string(),
            Self::Birth => a.naissance.clone().unwrap_or_default(),
            Self::Death => a.mort.clone().unwrap_or_default(),
            Self::Language => a.langue.clone().unwrap_or_default(),
            Self::Cities => a.villes.join(", "),
            Self::Works => a.oeuvres.join(", "),
        }
    }

    fn date_key(&self, a: &Author) -> Option<ResolvedDate> {
        match self {
            Self::Birth => first_resolved([a.naissance.as_deref(), a.actif_debut.as_deref()]),
            Self::Death => first_resolved([a.mort.as_deref(), a.actif_fin.as_deref()]),
            _ => None,
        }
    }

    fn is_date(&self) -> bool {
        matches!(self, Self::Birth | Self::Death)
    }
}

// ── Events ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventColumn {
    Name,
    Type,
    Start,
    End,
    City,
    Summary,
}

impl EventColumn {
    pub const ALL: [EventColumn; 6] = [
        Self::Name,
        Self::Type,
        Self::Start,
        Self::End,
        Self::City,
        Self::Summary,
    ];
}

impl TableColumn for EventColumn {
    type Row = Event;

    fn title(&self) -> &'static str {
        match self {
            Self::Name => "Nom",
            Self::Type => "Type",
            Self::Start => "Début",
            Self::End => "Fin",
            Self::City => "Ville",
            Self::Summary => "Résumé",
        }
    }

    fn cell(&self, e: &Event) -> String {
        match self {
            Self::Name => e.display_name().to_string(),
            Self::Type => e.type_tag.clone().unwrap_or_default(),
            Self::Start => e.start_text().unwrap_or_default().to_string(),
            Self::End => e.date_fin.clone().unwrap_or_default(),
            Self::City => e.ville.clone().unwrap_or_default(),
            Self::Summary => e.resume.clone().unwrap_or_default(),
        }
    }

    fn date_key(&self, e: &Event) -> Option<ResolvedDate> {
        match self {
            Self::Start => e.start_date(),
            Self::End => e.date_fin.as_deref().and_then(normalize_date),
            _ => None,
        }
    }

    fn is_date(&self) -> bool {
        matches!(self, Self::Start | Self::End)
    }
}

// ── Sorting ──────────────────────────────────────────────────────────────

/// Rows ordered by `column`. The sort is stable, so ties keep file order.
pub fn sorted_rows<C: TableColumn>(rows: &[C::Row], column: C, order: SortOrder) -> Vec<&C::Row> {
    let mut keyed: Vec<(Option<ResolvedDate>, String, &C::Row)> = rows
        .iter()
        .map(|r| (column.date_key(r), column.cell(r).to_lowercase(), r))
        .collect();

    keyed.sort_by(|(da, ta, _), (db, tb, _)| {
        let primary = if column.is_date() {
            match (da, db) {
                (Some(a), Some(b)) => directed(a.cmp(b), order),
                // Unresolvable dates stay last in both directions.
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        } else {
            Ordering::Equal
        };
        primary.then_with(|| directed(ta.cmp(tb), order))
    });

    keyed.into_iter().map(|(_, _, r)| r).collect()
}

fn directed(ord: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Ascending => ord,
        SortOrder::Descending => ord.reverse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authors() -> Vec<Author> {
        serde_json::from_str(
            r#"[
                {"id":"A1","nom":"jérôme","naissance":"347","mort":"420","langue":"latin"},
                {"id":"A2","nom":"Anonyme"},
                {"id":"A3","nom":"Basile","naissance":"ca. 329","mort":"379","langue":"grec","villes":["Césarée"]},
                {"id":"A4","nom":"Irénée","actif_debut":"ca. 180"}
            ]"#,
        )
        .unwrap()
    }

    fn names(rows: &[&Author]) -> Vec<String> {
        rows.iter().map(|a| a.nom.clone()).collect()
    }

    #[test]
    fn test_sort_by_name_case_insensitive() {
        let rows = authors();
        let sorted = sorted_rows(&rows, AuthorColumn::Name, SortOrder::Ascending);
        assert_eq!(names(&sorted), vec!["Anonyme", "Basile", "Irénée", "jérôme"]);
    }

    #[test]
    fn test_sort_by_birth_keeps_undated_last() {
        let rows = authors();
        let asc = sorted_rows(&rows, AuthorColumn::Birth, SortOrder::Ascending);
        assert_eq!(names(&asc), vec!["Irénée", "Basile", "jérôme", "Anonyme"]);
        let desc = sorted_rows(&rows, AuthorColumn::Birth, SortOrder::Descending);
        assert_eq!(names(&desc), vec!["jérôme", "Basile", "Irénée", "Anonyme"]);
    }

    #[test]
    fn test_undated_rows_are_still_listed() {
        let rows = authors();
        assert_eq!(sorted_rows(&rows, AuthorColumn::Death, SortOrder::Ascending).len(), 4);
    }

    #[test]
    fn test_cells() {
        let rows = authors();
        assert_eq!(AuthorColumn::Cities.cell(&rows[2]), "Césarée");
        assert_eq!(AuthorColumn::Birth.cell(&rows[1]), "");
        assert_eq!(AuthorColumn::Works.title(), "Œuvres");
    }

    #[test]
    fn test_event_columns() {
        let events: Vec<Event> = serde_json::from_str(
            r#"[
                {"id":"E1","nom":"Chalcédoine","type":"concile","date_debut":"451","ville":"Chalcédoine"},
                {"id":"E2","nom":"Nicée","date":"325"},
                {"id":"E3","nom":"Date perdue"}
            ]"#,
        )
        .unwrap();
        let sorted = sorted_rows(&events, EventColumn::Start, SortOrder::Ascending);
        let ids: Vec<&str> = sorted.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["E2", "E1", "E3"]);
        assert_eq!(EventColumn::Start.cell(&events[1]), "325");
        assert_eq!(EventColumn::Type.cell(&events[1]), "");
        assert_eq!(SortOrder::Ascending.flipped(), SortOrder::Descending);
    }

    #[test]
    fn test_event_start_key_skips_unparseable_date_debut() {
        let events: Vec<Event> = serde_json::from_str(
            r#"[
                {"id":"E1","date_debut":"451"},
                {"id":"E2","date_debut":"?","date":"325"}
            ]"#,
        )
        .unwrap();
        let sorted = sorted_rows(&events, EventColumn::Start, SortOrder::Ascending);
        let ids: Vec<&str> = sorted.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["E2", "E1"]);
    }
}
