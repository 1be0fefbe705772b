//! Key/value persistence: template library, current project, settings.
//!
//! The host supplies the store (`localStorage` in the browser, an in-memory
//! map in tests). Everything is stored as JSON strings under fixed keys.
//! Reads never fail outward: malformed data is logged and replaced by a
//! default.

use crate::error::{LoadError, SaveError};
use crate::model::Template;
use crate::record::Project;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

pub const CURRENT_PROJECT_KEY: &str = "currentProject";
pub const TEMPLATES_KEY: &str = "reportTemplates";
pub const SETTINGS_KEY: &str = "reportDesignerSettings";

/// A string key/value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), SaveError>;
}

/// In-process store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SaveError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ─── Template library ────────────────────────────────────────────────────

/// Saved templates by name, in name order.
pub type TemplateLibrary = BTreeMap<String, Template>;

/// Parse the library, skipping entries that are not valid templates.
pub fn try_load_library(store: &dyn KeyValueStore) -> Result<TemplateLibrary, LoadError> {
    let raw = store
        .get(TEMPLATES_KEY)
        .ok_or_else(|| LoadError::Missing(TEMPLATES_KEY.to_string()))?;
    let entries: BTreeMap<String, Value> = serde_json::from_str(&raw)?;
    let mut library = TemplateLibrary::new();
    for (name, value) in entries {
        match serde_json::from_value::<Template>(value) {
            Ok(template) => {
                library.insert(name, template);
            }
            Err(e) => log::warn!("store: skipping template `{name}`: {e}"),
        }
    }
    Ok(library)
}

/// The library, or an empty one when nothing usable is stored.
pub fn load_library(store: &dyn KeyValueStore) -> TemplateLibrary {
    match try_load_library(store) {
        Ok(library) => library,
        Err(LoadError::Missing(_)) => TemplateLibrary::new(),
        Err(e) => {
            log::warn!("store: template library unreadable, starting empty: {e}");
            TemplateLibrary::new()
        }
    }
}

pub fn save_library(store: &mut dyn KeyValueStore, library: &TemplateLibrary) -> Result<(), SaveError> {
    let json = serde_json::to_string(library)?;
    store.set(TEMPLATES_KEY, &json)
}

pub fn template_names(store: &dyn KeyValueStore) -> Vec<String> {
    load_library(store).into_keys().collect()
}

pub fn load_template(store: &dyn KeyValueStore, name: &str) -> Result<Template, LoadError> {
    load_library(store)
        .remove(name)
        .ok_or_else(|| LoadError::TemplateNotFound(name.to_string()))
}

/// Insert or replace `name`. Last write wins.
pub fn save_template(
    store: &mut dyn KeyValueStore,
    name: &str,
    template: &Template,
) -> Result<(), SaveError> {
    let mut library = load_library(store);
    library.insert(name.to_string(), template.clone());
    save_library(store, &library)?;
    log::debug!("store: saved template `{name}` ({} total)", library.len());
    Ok(())
}

/// Remove `name`. Returns whether it existed.
pub fn delete_template(store: &mut dyn KeyValueStore, name: &str) -> Result<bool, SaveError> {
    let mut library = load_library(store);
    if library.remove(name).is_none() {
        return Ok(false);
    }
    save_library(store, &library)?;
    Ok(true)
}

// ─── Project ─────────────────────────────────────────────────────────────

pub fn try_load_project(store: &dyn KeyValueStore) -> Result<Project, LoadError> {
    let raw = store
        .get(CURRENT_PROJECT_KEY)
        .ok_or_else(|| LoadError::Missing(CURRENT_PROJECT_KEY.to_string()))?;
    Ok(serde_json::from_str(&raw)?)
}

/// The current project, or an empty one.
pub fn load_project(store: &dyn KeyValueStore) -> Project {
    try_load_project(store).unwrap_or_else(|e| {
        log::warn!("store: no usable project, continuing without records: {e}");
        Project::default()
    })
}
