//! Translation lookup.
//!
//! The catalogue itself lives outside the crate; views only ask for a key.

use std::collections::HashMap;

pub trait Translate: Send + Sync {
    /// The text for `key`. Unknown keys come back unchanged.
    fn t(&self, key: &str) -> String;
}

/// An in-memory catalogue.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.entries.insert(key.into(), text.into());
        self
    }
}

impl Translate for Catalog {
    fn t(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_to_key() {
        let catalog = Catalog::new().with("Yes", "Ja");
        assert_eq!(catalog.t("Yes"), "Ja");
        assert_eq!(catalog.t("No"), "No");
    }
}
