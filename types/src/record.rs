use serde::{Deserialize, Serialize};

use crate::date::{ResolvedDate, first_resolved};

/// The field's text, or `None` when it is missing or blank.
pub(crate) fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

// ── Source reference ─────────────────────────────────────────────────────

/// A bibliographic pointer attached to an author or event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    #[serde(default)]
    pub label: String,
    pub url: String,
}

impl SourceRef {
    /// The text to show for the link; falls back to the URL itself.
    pub fn display_label(&self) -> &str {
        if self.label.trim().is_empty() {
            &self.url
        } else {
            &self.label
        }
    }
}

// ── Language of an author ────────────────────────────────────────────────

/// Closed set of writing languages used for filtering authors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Language {
    Greek,
    Latin,
    /// Missing or unrecognized `langue` tag.
    Other,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Greek, Language::Latin, Language::Other];

    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(|t| t.trim().to_lowercase()).as_deref() {
            Some("grec" | "greek" | "grecque") => Self::Greek,
            Some("latin" | "latine") => Self::Latin,
            _ => Self::Other,
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Self::Greek => "greek",
            Self::Latin => "latin",
            Self::Other => "other-language",
        }
    }

    pub fn as_french(&self) -> &'static str {
        match self {
            Self::Greek => "grec",
            Self::Latin => "latin",
            Self::Other => "autre",
        }
    }
}

// ── Event type ───────────────────────────────────────────────────────────

/// Closed set of event categories. Anything unknown lands in `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    Council,
    Heresy,
    Political,
    Other,
}

impl EventType {
    pub const ALL: [EventType; 4] = [
        EventType::Council,
        EventType::Heresy,
        EventType::Political,
        EventType::Other,
    ];

    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(|t| t.trim().to_lowercase()).as_deref() {
            Some("concile" | "council") => Self::Council,
            Some("heresie" | "hérésie" | "heresy") => Self::Heresy,
            Some("politique" | "political") => Self::Political,
            _ => Self::Other,
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Self::Council => "council",
            Self::Heresy => "heresy",
            Self::Political => "political",
            Self::Other => "other",
        }
    }

    pub fn as_french(&self) -> &'static str {
        match self {
            Self::Council => "concile",
            Self::Heresy => "hérésie",
            Self::Political => "politique",
            Self::Other => "autre",
        }
    }
}

// ── Author ───────────────────────────────────────────────────────────────

/// An author record as stored in `auteurs.json`.
///
/// Dates are kept as the free text found in the file; see
/// [`crate::date`] for how they are resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    #[serde(default)]
    pub nom: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub naissance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mort: Option<String>,
    /// Approximate start of activity, used when `naissance` is unusable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actif_debut: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actif_fin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub langue: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub villes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub oeuvres: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceRef>,
}

impl Author {
    pub fn language(&self) -> Language {
        Language::from_tag(self.langue.as_deref())
    }

    /// Name to display; records without `nom` show their id.
    pub fn display_name(&self) -> &str {
        if self.nom.is_empty() { &self.id } else { &self.nom }
    }
}

// ── Event ────────────────────────────────────────────────────────────────

/// An event record as stored in `evenements.json`.
///
/// Older files carry a single `date`, newer ones `date_debut`/`date_fin`;
/// both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    #[serde(default)]
    pub nom: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_debut: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_fin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ville: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceRef>,
    /// Ids of the authors involved in this event.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub auteurs_associes: Vec<String>,
}

impl Event {
    pub fn category(&self) -> EventType {
        EventType::from_tag(self.type_tag.as_deref())
    }

    /// The start date text for display: `date_debut` wins over the
    /// legacy `date`.
    pub fn start_text(&self) -> Option<&str> {
        non_blank(&self.date_debut).or(non_blank(&self.date))
    }

    /// Resolved start: `date_debut`, then `date` when `date_debut` is
    /// missing or does not parse.
    pub fn start_date(&self) -> Option<ResolvedDate> {
        first_resolved([self.date_debut.as_deref(), self.date.as_deref()])
    }

    pub fn display_name(&self) -> &str {
        if self.nom.is_empty() { &self.id } else { &self.nom }
    }

    pub fn mentions(&self, author_id: &str) -> bool {
        self.auteurs_associes.iter().any(|a| a == author_id)
    }
}
