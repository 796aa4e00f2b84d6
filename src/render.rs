//! Plain-text rendering for the terminal.

use std::fmt::Write;

use chronicle_types::{Detail, TableColumn, TimelineItem, join_or_dash};

const MAX_CELL: usize = 40;

// ── Timeline ─────────────────────────────────────────────────────────────

/// One line per item: dates, class, label.
pub fn timeline_lines<'a, I>(items: I) -> String
where
    I: IntoIterator<Item = &'a TimelineItem>,
{
    let mut out = String::new();
    for it in items {
        let dates = match it.end {
            Some(end) => format!("{} – {}", it.start, end),
            None => it.start.to_string(),
        };
        let _ = writeln!(
            out,
            "{:<24} {:<22} {}",
            dates,
            format!("[{}]", it.category.class_name()),
            it.label
        );
    }
    out
}

// ── Tables ───────────────────────────────────────────────────────────────

/// Render rows as an aligned table; long cells are cut with an ellipsis.
pub fn table<C: TableColumn>(rows: &[&C::Row], columns: &[C]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| columns.iter().map(|c| truncate(&c.cell(r))).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(c.title().chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(c, w)| pad(c.title(), *w))
        .collect();
    let _ = writeln!(out, "{}", header.join(" │ ").trim_end());
    let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("─┼─"));
    for row in &cells {
        let line: Vec<String> = row.iter().zip(&widths).map(|(c, w)| pad(c, *w)).collect();
        let _ = writeln!(out, "{}", line.join(" │ ").trim_end());
    }
    out
}

fn truncate(s: &str) -> String {
    if s.chars().count() <= MAX_CELL {
        s.to_string()
    } else {
        let cut: String = s.chars().take(MAX_CELL - 1).collect();
        format!("{cut}…")
    }
}

fn pad(s: &str, width: usize) -> String {
    format!("{s:<width$}")
}

// ── Detail ───────────────────────────────────────────────────────────────

pub fn detail(d: &Detail<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", d.title());
    match d {
        Detail::Author {
            author,
            related_events,
        } => {
            let _ = writeln!(out, "  Langue : {}", author.langue.as_deref().unwrap_or("—"));
            let _ = writeln!(out, "  Dates : {}", d.dates_label());
            let _ = writeln!(out, "  Villes principales : {}", join_or_dash(&author.villes));
            list(&mut out, "Œuvres principales", author.oeuvres.iter().map(String::as_str));
            list(
                &mut out,
                "Événements liés",
                related_events.iter().map(|e| e.display_name()),
            );
            summary_and_sources(&mut out, author.resume.as_deref(), &author.sources);
        }
        Detail::Event { event, authors } => {
            let _ = writeln!(out, "  Type : {}", event.type_tag.as_deref().unwrap_or("—"));
            let _ = writeln!(out, "  Dates : {}", d.dates_label());
            let _ = writeln!(out, "  Ville : {}", event.ville.as_deref().unwrap_or("—"));
            list(&mut out, "Auteurs concernés", authors.iter().map(|l| l.name()));
            summary_and_sources(&mut out, event.resume.as_deref(), &event.sources);
        }
    }
    out
}

fn list<'a>(out: &mut String, heading: &str, items: impl Iterator<Item = &'a str>) {
    let items: Vec<&str> = items.collect();
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "  {heading} :");
    for it in items {
        let _ = writeln!(out, "    - {it}");
    }
}

fn summary_and_sources(out: &mut String, resume: Option<&str>, sources: &[chronicle_types::SourceRef]) {
    if let Some(r) = resume.filter(|r| !r.trim().is_empty()) {
        let _ = writeln!(out, "\n  {r}");
    }
    if !sources.is_empty() {
        let _ = writeln!(out, "\n  Sources / Pour aller plus loin :");
        for s in sources {
            let _ = writeln!(out, "    - {} <{}>", s.display_label(), s.url);
        }
    }
}
