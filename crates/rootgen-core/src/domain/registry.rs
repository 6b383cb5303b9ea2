//! Import registry: logical package key → canonical Go import path.
//!
//! The registry is an explicit value handed to every component that needs
//! it. The built-in entries live in `rootgen-adapters`; configuration and the
//! project manifest may override them.

use std::collections::BTreeMap;

use crate::domain::error::DomainError;

/// Logical keys referenced by the generation steps.
pub mod keys {
    /// CLI framework (cobra).
    pub const CLI_FRAMEWORK: &str = "cobra";
    /// Application framework SDK (configuration loading).
    pub const APP_SDK: &str = "hdsdk";
    /// Shared utilities (fatal logging, panic stacks).
    pub const UTILS: &str = "hdutils";
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportRegistry {
    paths: BTreeMap<String, String>,
}

impl ImportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry, builder style.
    pub fn with(mut self, key: impl Into<String>, path: impl Into<String>) -> Self {
        self.insert(key, path);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, path: impl Into<String>) {
        self.paths.insert(key.into(), path.into());
    }

    /// Overlay `other` on top of this registry; its entries win.
    pub fn extend(&mut self, other: &ImportRegistry) {
        for (key, path) in &other.paths {
            self.paths.insert(key.clone(), path.clone());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.paths.get(key).map(String::as_str)
    }

    /// Resolve a logical key, failing with [`DomainError::UnresolvedImport`].
    pub fn resolve(&self, key: &str) -> Result<&str, DomainError> {
        self.get(key)
            .filter(|path| !path.trim().is_empty())
            .ok_or_else(|| DomainError::UnresolvedImport { key: key.into() })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.paths.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ImportRegistry {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            paths: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_known_key() {
        let registry = ImportRegistry::new().with(keys::CLI_FRAMEWORK, "github.com/spf13/cobra");
        assert_eq!(
            registry.resolve(keys::CLI_FRAMEWORK).unwrap(),
            "github.com/spf13/cobra"
        );
    }

    #[test]
    fn resolve_unknown_key_fails() {
        let registry = ImportRegistry::new();
        assert_eq!(
            registry.resolve("missing"),
            Err(DomainError::UnresolvedImport {
                key: "missing".into()
            })
        );
    }

    #[test]
    fn blank_path_counts_as_unresolved() {
        let registry = ImportRegistry::new().with("cobra", "  ");
        assert!(registry.resolve("cobra").is_err());
    }

    #[test]
    fn extend_overrides_entries() {
        let mut base: ImportRegistry = [("cobra", "a"), ("hdsdk", "b")].into_iter().collect();
        base.extend(&ImportRegistry::new().with("cobra", "fork/cobra"));
        assert_eq!(base.get("cobra"), Some("fork/cobra"));
        assert_eq!(base.get("hdsdk"), Some("b"));
        assert_eq!(base.len(), 2);
    }
}
