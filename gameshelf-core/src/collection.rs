//! Collection files
//!
//! Hosts without a live catalog can feed the shelf from a JSON file: either a
//! plain array of resource references, or an array of catalog records whose
//! `imageUrl` is joined onto a base URL the way the library front end builds
//! cover URLs.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, ShelfError};
use crate::shelf::asset::ADD_MARKER;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CollectionEntry {
    Resource(String),
    Record {
        #[serde(alias = "imageUrl")]
        image_url: String,
    },
}

impl CollectionEntry {
    fn into_resource(self, base_url: &str) -> String {
        match self {
            CollectionEntry::Resource(resource) => resource,
            CollectionEntry::Record { image_url } => {
                format!("{base_url}{image_url}")
            }
        }
    }
}

/// Load resource references from `path`, prefixing record image URLs with
/// `base_url`.
pub fn load_collection(
    path: impl AsRef<Path>,
    base_url: &str,
) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let entries: Vec<CollectionEntry> = serde_json::from_str(&content)?;
    let resources: Vec<String> = entries
        .into_iter()
        .map(|entry| entry.into_resource(base_url))
        .collect();

    if let Some(position) = resources.iter().position(|r| r == ADD_MARKER) {
        return Err(ShelfError::InvalidCollection {
            path: path.to_path_buf(),
            message: format!(
                "entry {position} uses the reserved add-slot marker"
            ),
        });
    }

    log::info!(
        "Loaded {} collection entries from {}",
        resources.len(),
        path.display()
    );
    Ok(resources)
}
