use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chronicle_types::{AUTHORS_KEY, Author, Catalog, EVENTS_KEY, Event, parse_collection};
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::error::LoadError;

/// Where a collection lives: a local file or an HTTP(S) URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    File(PathBuf),
    Url(String),
}

impl FromStr for Resource {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(Self::Url(s.to_string()))
        } else {
            Ok(Self::File(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(p) => write!(f, "{}", p.display()),
            Self::Url(u) => f.write_str(u),
        }
    }
}

/// Fetch both collections concurrently and index them.
///
/// Never fails: an unavailable collection is logged and left empty.
pub async fn load_catalog(authors: &Resource, events: &Resource) -> Catalog {
    let (authors, events) = tokio::join!(
        load_collection::<Author>(authors, AUTHORS_KEY),
        load_collection::<Event>(events, EVENTS_KEY),
    );
    Catalog::new(authors, events)
}

/// One collection, or an empty one if it cannot be fetched or parsed.
pub async fn load_collection<T: DeserializeOwned>(resource: &Resource, key: &str) -> Vec<T> {
    match try_load(resource, key).await {
        Ok(records) => {
            info!(%resource, key, records = records.len(), "collection loaded");
            records
        }
        Err(e) => {
            warn!(%resource, key, error = %e, "collection unavailable, continuing without it");
            Vec::new()
        }
    }
}

async fn try_load<T: DeserializeOwned>(resource: &Resource, key: &str) -> Result<Vec<T>, LoadError> {
    let text = fetch_text(resource).await?;
    Ok(parse_collection(&text, key)?)
}

async fn fetch_text(resource: &Resource) -> Result<String, LoadError> {
    match resource {
        Resource::File(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            }),
        Resource::Url(url) => {
            let http = |source| LoadError::Http {
                url: url.clone(),
                source,
            };
            let resp = reqwest::get(url).await.map_err(http)?;
            let status = resp.status();
            if !status.is_success() {
                return Err(LoadError::Status {
                    url: url.clone(),
                    status,
                });
            }
            resp.text().await.map_err(http)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_json(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    fn file(f: &NamedTempFile) -> Resource {
        Resource::File(f.path().to_path_buf())
    }

    #[test]
    fn test_resource_from_str() {
        assert_eq!(
            "https://example.org/data/auteurs.json".parse::<Resource>().unwrap(),
            Resource::Url("https://example.org/data/auteurs.json".into())
        );
        assert_eq!(
            "data/auteurs.json".parse::<Resource>().unwrap(),
            Resource::File(PathBuf::from("data/auteurs.json"))
        );
    }

    #[tokio::test]
    async fn test_load_both_shapes() {
        let authors = temp_json(r#"{"auteurs":[{"id":"A1","nom":"Origène","naissance":"185"}]}"#);
        let events = temp_json(r#"[{"id":"E1","nom":"Nicée","date":"325","auteurs_associes":["A1"]}]"#);
        let catalog = load_catalog(&file(&authors), &file(&events)).await;
        assert_eq!(catalog.authors().len(), 1);
        assert_eq!(catalog.events().len(), 1);
        assert_eq!(catalog.related_events("A1").len(), 1);
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let missing = Resource::File(PathBuf::from("/nonexistent/chronicle/auteurs.json"));
        let authors: Vec<Author> = load_collection(&missing, AUTHORS_KEY).await;
        assert!(authors.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_file_is_empty() {
        let broken = temp_json("{ not json");
        let events: Vec<Event> = load_collection(&file(&broken), EVENTS_KEY).await;
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_url_is_empty() {
        let url = Resource::Url("http://127.0.0.1:9/data/evenements.json".into());
        let events: Vec<Event> = load_collection(&url, EVENTS_KEY).await;
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_one_failure_keeps_the_other_collection() {
        let authors = temp_json(r#"[{"id":"A1","nom":"Hilaire","naissance":"315","mort":"367"}]"#);
        let missing = Resource::File(PathBuf::from("/nonexistent/chronicle/evenements.json"));
        let catalog = load_catalog(&file(&authors), &missing).await;
        assert_eq!(catalog.authors().len(), 1);
        assert!(catalog.events().is_empty());
        assert_eq!(catalog.timeline(Default::default()).len(), 1);
    }

    #[tokio::test]
    async fn test_bundled_data_set() {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data");
        let catalog = load_catalog(
            &Resource::File(dir.join("auteurs.json")),
            &Resource::File(dir.join("evenements.json")),
        )
        .await;
        assert_eq!(catalog.authors().len(), 5);
        assert_eq!(catalog.events().len(), 5);

        // Hermas has no usable date: listed, but not on the timeline.
        let items = catalog.timeline(chronicle_types::EndPolicy::Point);
        assert_eq!(items.len(), 9);
        assert!(catalog.author("hermas").is_some());
        assert!(!items.iter().any(|i| i.id.id() == "hermas"));

        let related: Vec<&str> = catalog.related_events("jerome").iter().map(|e| e.id.as_str()).collect();
        assert_eq!(related, vec!["sac-rome", "vulgate"]);
    }
}
