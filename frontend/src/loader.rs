use chronicle_types::{
    AUTHORS_KEY, Author, Catalog, EVENTS_KEY, Event, collection_from_value,
};
use leptos::logging::warn;
use serde::de::DeserializeOwned;

const AUTHORS_URL: &str = "/data/auteurs.json";
const EVENTS_URL: &str = "/data/evenements.json";

async fn fetch_json(url: &str) -> Result<serde_json::Value, String> {
    let resp = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }
    resp.json::<serde_json::Value>()
        .await
        .map_err(|e| e.to_string())
}

/// One collection, or an empty one when the fetch or the parse fails.
async fn load_collection<T: DeserializeOwned>(url: &str, key: &str) -> Vec<T> {
    let loaded = fetch_json(url)
        .await
        .and_then(|v| collection_from_value(v, key).map_err(|e| e.to_string()));
    match loaded {
        Ok(records) => records,
        Err(e) => {
            warn!("{url}: {e}; continuing with an empty collection");
            Vec::new()
        }
    }
}

/// Both collections, fetched concurrently, indexed once.
pub async fn load_catalog() -> Catalog {
    let (authors, events) = futures::join!(
        load_collection::<Author>(AUTHORS_URL, AUTHORS_KEY),
        load_collection::<Event>(EVENTS_URL, EVENTS_KEY),
    );
    Catalog::new(authors, events)
}
