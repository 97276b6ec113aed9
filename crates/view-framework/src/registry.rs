//! # Typed Registry
//!
//! A lookup table filled once at start-up and read-only afterwards. Message
//! type renderers and similar plug-ins register here instead of mutating a
//! global map.

use crate::error::ViewError;
use std::collections::BTreeMap;
use tracing::debug;

pub struct RegistryBuilder<H> {
    entries: BTreeMap<String, H>,
}

impl<H> Default for RegistryBuilder<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> RegistryBuilder<H> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Adds `handler` under `id`. A second registration of the same id fails.
    pub fn register(&mut self, id: impl Into<String>, handler: H) -> Result<&mut Self, ViewError> {
        let id = id.into();
        if self.entries.contains_key(&id) {
            return Err(ViewError::DuplicateRegistration(id));
        }
        debug!(%id, "Registered");
        self.entries.insert(id, handler);
        Ok(self)
    }

    pub fn build(self) -> Registry<H> {
        Registry {
            entries: self.entries,
        }
    }
}

/// The frozen table. Share it behind an `Arc`.
#[derive(Debug)]
pub struct Registry<H> {
    entries: BTreeMap<String, H>,
}

impl<H> Registry<H> {
    pub fn get(&self, id: &str) -> Option<&H> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Registered ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
