//! Item catalogue built from a parsed script.
//!
//! Joins item instances against constants to produce the id -> display name
//! list that recipe editing and code generation work from. A [`Catalogue`]
//! is an immutable snapshot; [`Session`] holds the one that belongs to the
//! currently imported script and swaps it wholesale on re-import.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::script::{
    find_constant, find_instance, ItemCategory, ScriptError, ScriptSource, SourceConstant,
    SourceInstance,
};

/// Display name used when an item instance has no `name` property
pub const NO_NAME: &str = "(no name)";

/// One selectable item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueEntry {
    /// Uppercased instance name
    pub id: String,
    /// Resolved display name (may still carry source quotes)
    #[serde(rename = "name")]
    pub display_name: String,
}

/// Build catalogue entries from extracted instances and constants
///
/// Keeps item-prefixed instances other than the bare `item` base, in
/// extraction order. Duplicate ids are not merged.
pub fn build_entries(instances: &[SourceInstance], constants: &[SourceConstant]) -> Vec<CatalogueEntry> {
    instances
        .iter()
        .filter(|i| i.is_item())
        .map(|instance| {
            let raw = instance.name_property().unwrap_or(NO_NAME);
            CatalogueEntry {
                id: instance.name.to_uppercase(),
                display_name: resolve_value(constants, raw),
            }
        })
        .collect()
}

/// Resolve a property value through the constant table (first match wins)
pub fn resolve_value(constants: &[SourceConstant], raw: &str) -> String {
    match find_constant(constants, raw) {
        Some(constant) => constant.value.to_string(),
        None => raw.to_string(),
    }
}

/// Parsed script plus the derived item list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalogue {
    pub source: ScriptSource,
    pub entries: Vec<CatalogueEntry>,
}

impl Catalogue {
    pub fn from_source(source: ScriptSource) -> Self {
        let entries = build_entries(&source.instances, &source.constants);
        tracing::info!(items = entries.len(), "built item catalogue");
        Catalogue { source, entries }
    }

    pub fn parse(text: &str) -> Self {
        Self::from_source(ScriptSource::parse(text))
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, ScriptError> {
        ScriptSource::from_bytes(data).map(Self::from_source)
    }

    pub fn entries(&self) -> &[CatalogueEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry with the given id (compared uppercased)
    pub fn entry(&self, id: &str) -> Option<&CatalogueEntry> {
        let id = id.to_uppercase();
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entry(id).is_some()
    }

    pub fn instance(&self, id: &str) -> Option<&SourceInstance> {
        find_instance(&self.source.instances, id)
    }

    /// Entries whose instance falls into the given category
    pub fn by_category(&self, category: ItemCategory) -> Vec<&CatalogueEntry> {
        self.source
            .instances
            .iter()
            .filter(|i| i.is_item())
            .zip(&self.entries)
            .filter(|(i, _)| i.category == Some(category))
            .map(|(_, e)| e)
            .collect()
    }

    /// Human-readable name for an item id, quotes stripped
    ///
    /// Looks up the instance by uppercased id, takes its first `name`
    /// property and resolves it through the constants.
    pub fn display_name(&self, id: &str) -> Option<String> {
        let instance = self.instance(id)?;
        let raw = instance.name_property()?;
        Some(resolve_value(&self.source.constants, raw).replace('"', ""))
    }
}

/// Editing session state: the catalogue of the active script, if any
#[derive(Debug, Clone, Default)]
pub struct Session {
    catalogue: Option<Arc<Catalogue>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a script and make it the active catalogue, replacing any previous one
    pub fn import_script(&mut self, text: &str) -> Arc<Catalogue> {
        let catalogue = Arc::new(Catalogue::parse(text));
        if self.catalogue.is_some() {
            tracing::info!("replacing previously imported catalogue");
        }
        self.catalogue = Some(Arc::clone(&catalogue));
        catalogue
    }

    /// Byte-level variant of [`Session::import_script`]
    ///
    /// On error the previous catalogue stays active.
    pub fn import_bytes(&mut self, data: &[u8]) -> Result<Arc<Catalogue>, ScriptError> {
        let catalogue = Arc::new(Catalogue::from_bytes(data)?);
        self.catalogue = Some(Arc::clone(&catalogue));
        Ok(catalogue)
    }

    pub fn catalogue(&self) -> Option<Arc<Catalogue>> {
        self.catalogue.clone()
    }

    pub fn has_catalogue(&self) -> bool {
        self.catalogue.is_some()
    }

    pub fn clear(&mut self) {
        self.catalogue = None;
    }
}
