//! Date normalizer: free-text dates → calendar points.
//!
//! Accepted forms, tried in order:
//!   451            bare year (1–4 digits)
//!   0451-10-08     full ISO day
//!   ca. 347        any text with an embedded 2–4 digit numeral
//!
//! Years are taken literally. There is no era handling: "30 av. J.-C."
//! resolves to year 30, which is an accepted limit of the data set.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static RE_BARE_YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{1,4}$").unwrap());

static RE_FULL_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<y>[0-9]{4})-(?P<m>[0-9]{2})-(?P<d>[0-9]{2})$").unwrap());

static RE_EMBEDDED_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?P<y>[0-9]{2,4})\b").unwrap());

// ── Resolved date ────────────────────────────────────────────────────────

/// How much of a resolved date actually came from the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePrecision {
    /// Exact day given.
    Day,
    /// Bare year given; day is January 1.
    Year,
    /// Year pulled out of surrounding text ("ca. 347", "vers 185").
    Approximate,
}

/// A chronological instant resolved from a textual date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResolvedDate {
    pub date: NaiveDate,
    pub precision: DatePrecision,
}

impl ResolvedDate {
    fn year_start(year: i32, precision: DatePrecision) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, 1, 1).map(|date| Self { date, precision })
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Day count used to place the date on a linear axis.
    pub fn days_from_ce(&self) -> i32 {
        self.date.num_days_from_ce()
    }

    /// January 1 of the following year, keeping the precision.
    pub fn next_year(&self) -> Option<Self> {
        Self::year_start(self.year() + 1, self.precision)
    }
}

impl fmt::Display for ResolvedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.precision {
            DatePrecision::Day => write!(
                f,
                "{}-{:02}-{:02}",
                self.date.year(),
                self.date.month(),
                self.date.day()
            ),
            DatePrecision::Year => write!(f, "{}", self.date.year()),
            DatePrecision::Approximate => write!(f, "ca. {}", self.date.year()),
        }
    }
}

// ── Normalization ────────────────────────────────────────────────────────

/// Resolve a textual date, or `None` when nothing usable is found.
pub fn normalize_date(text: &str) -> Option<ResolvedDate> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }

    if RE_BARE_YEAR.is_match(s) {
        let year: i32 = s.parse().ok()?;
        return ResolvedDate::year_start(year, DatePrecision::Year);
    }

    if let Some(caps) = RE_FULL_DATE.captures(s) {
        let y: i32 = caps["y"].parse().ok()?;
        let m: u32 = caps["m"].parse().ok()?;
        let d: u32 = caps["d"].parse().ok()?;
        if let Some(date) = NaiveDate::from_ymd_opt(y, m, d) {
            return Some(ResolvedDate {
                date,
                precision: DatePrecision::Day,
            });
        }
        // Impossible day such as 0451-02-30: fall through and keep the year.
    }

    RE_EMBEDDED_YEAR
        .captures_iter(s)
        .find_map(|caps| caps["y"].parse::<i32>().ok())
        .and_then(|year| ResolvedDate::year_start(year, DatePrecision::Approximate))
}

/// First field in `candidates` that resolves.
///
/// This is the fallback chain: explicit field first, then the
/// approximate "active period" field.
pub fn first_resolved<'a, I>(candidates: I) -> Option<ResolvedDate>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates.into_iter().flatten().find_map(normalize_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ── bare years ───────────────────────────────────────────────────

    #[test]
    fn test_bare_year_three_digits() {
        let r = normalize_date("451").unwrap();
        assert_eq!(r.date, ymd(451, 1, 1));
        assert_eq!(r.precision, DatePrecision::Year);
    }

    #[test]
    fn test_bare_year_four_digits_and_padding() {
        assert_eq!(normalize_date("1054").unwrap().date, ymd(1054, 1, 1));
        assert_eq!(normalize_date("  325 ").unwrap().date, ymd(325, 1, 1));
        assert_eq!(normalize_date("0381").unwrap().date, ymd(381, 1, 1));
    }

    // ── full dates ───────────────────────────────────────────────────

    #[test]
    fn test_full_date() {
        let r = normalize_date("0451-10-08").unwrap();
        assert_eq!(r.date, ymd(451, 10, 8));
        assert_eq!(r.precision, DatePrecision::Day);
    }

    #[test]
    fn test_impossible_day_keeps_year() {
        let r = normalize_date("0451-02-30").unwrap();
        assert_eq!(r.date, ymd(451, 1, 1));
        assert_eq!(r.precision, DatePrecision::Approximate);
    }

    // ── free text ────────────────────────────────────────────────────

    #[test]
    fn test_embedded_numeral() {
        let r = normalize_date("ca. 347").unwrap();
        assert_eq!(r.year(), 347);
        assert_eq!(r.precision, DatePrecision::Approximate);
        assert_eq!(normalize_date("vers 185").unwrap().year(), 185);
        assert_eq!(normalize_date("354-430").unwrap().year(), 354);
    }

    #[test]
    fn test_only_ascii_digits_count() {
        assert_eq!(normalize_date("٣٤ puis 347").unwrap().year(), 347);
        assert_eq!(normalize_date("٣٤٧"), None);
        assert_eq!(normalize_date("٠٤٥١-١٠-٠٨"), None);
    }

    #[test]
    fn test_unresolvable() {
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("   "), None);
        assert_eq!(normalize_date("IVe siècle"), None);
        assert_eq!(normalize_date("5e s."), None);
        assert_eq!(normalize_date("inconnue"), None);
    }

    // ── fallback chain ───────────────────────────────────────────────

    #[test]
    fn test_first_resolved_falls_back() {
        let r = first_resolved([Some("?"), Some("ca. 200")]).unwrap();
        assert_eq!(r.year(), 200);
        assert_eq!(first_resolved([None, Some("390")]).unwrap().year(), 390);
        assert_eq!(first_resolved([None, None]), None);
    }

    #[test]
    fn test_next_year_and_display() {
        let r = normalize_date("451").unwrap();
        assert_eq!(r.next_year().unwrap().date, ymd(452, 1, 1));
        assert_eq!(r.to_string(), "451");
        assert_eq!(normalize_date("ca. 347").unwrap().to_string(), "ca. 347");
        assert_eq!(normalize_date("0451-10-08").unwrap().to_string(), "451-10-08");
    }
}
