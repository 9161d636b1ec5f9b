//! Variable catalogs read from external data descriptions.
//!
//! A catalog lists the fields stored in a data source, grouped into named
//! collections (trees). Reading a catalog never fails: a source that cannot
//! be read is logged and degrades to an empty field list.

use std::path::Path;

use indexmap::IndexMap;
use log::{error, info, warn};
use serde::Deserialize;

use crate::declaration::Declaration;

/// Collection name used when none can be derived from the data source.
pub const DEFAULT_COLLECTION: &str = "TreeName";

/// A single field of a data source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub pointer: bool,
}

impl From<CatalogEntry> for Declaration {
    fn from(entry: CatalogEntry) -> Self {
        Declaration::new(entry.name, entry.type_name, entry.pointer, false)
    }
}

/// Source of field lists for a cycle.
pub trait Catalog {
    /// Picks the collection to read when none was requested.
    fn collection_name(&self, source: &Path) -> Option<String>;

    /// Lists the fields of `collection`, or of the default collection.
    fn fields(&self, source: &Path, collection: Option<&str>) -> Vec<CatalogEntry>;
}

#[derive(Debug, Deserialize)]
struct FieldList {
    collections: IndexMap<String, Vec<CatalogEntry>>,
}

/// Catalog backed by a JSON or YAML field-list file:
///
/// ```yaml
/// collections:
///   physics:
///     - { name: el_n, type: Int_t }
///     - { name: el_pt, type: "std::vector<float>", pointer: true }
/// ```
#[derive(Debug, Default)]
pub struct FieldListCatalog;

impl FieldListCatalog {
    pub fn new() -> Self {
        Self
    }

    fn load(&self, source: &Path) -> Option<FieldList> {
        let content = match std::fs::read_to_string(source) {
            Ok(content) => content,
            Err(e) => {
                error!("Could not open data source '{}': {}", source.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(list) => Some(list),
            Err(_) => match serde_yaml::from_str(&content) {
                Ok(list) => Some(list),
                Err(e) => {
                    error!("Could not read field list '{}': {}", source.display(), e);
                    None
                }
            },
        }
    }
}

/// The only collection, or the one with the most fields.
fn largest_collection(list: &FieldList) -> Option<String> {
    if list.collections.len() > 1 {
        let names: Vec<&str> = list.collections.keys().map(String::as_str).collect();
        info!("Available collections: {}", names.join(", "));
    }
    list.collections
        .iter()
        .rev()
        .max_by_key(|(_, fields)| fields.len())
        .map(|(name, _)| name.clone())
}

impl Catalog for FieldListCatalog {
    fn collection_name(&self, source: &Path) -> Option<String> {
        let name = largest_collection(&self.load(source)?)?;
        info!("Using collection '{name}'");
        Some(name)
    }

    fn fields(&self, source: &Path, collection: Option<&str>) -> Vec<CatalogEntry> {
        let Some(mut list) = self.load(source) else {
            return Vec::new();
        };

        let name = match collection {
            Some(name) => name.to_string(),
            None => match largest_collection(&list) {
                Some(name) => name,
                None => {
                    warn!("Data source '{}' has no collections", source.display());
                    return Vec::new();
                }
            },
        };

        match list.collections.shift_remove(&name) {
            Some(fields) => fields,
            None => {
                error!("Could not get collection '{}' from '{}'", name, source.display());
                Vec::new()
            }
        }
    }
}
