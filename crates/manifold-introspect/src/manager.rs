//! Extension registry and discovery manager.
//!
//! The registry is the one piece of shared mutable state in the
//! framework: a name-keyed map of built extensions behind a single lock.
//! Registration during startup may race across discovery threads; readers
//! never observe a partially updated entry because the map value is an
//! `Arc` swapped under the write lock.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use semver::Version;
use tracing::{info, warn};

use manifold_model::Extension;

use crate::describe::Describe;
use crate::error::Result;
use crate::parser::parse_manifest;

/// Discovers, registers and serves built extensions.
#[derive(Default)]
pub struct ExtensionManager {
    registry: RwLock<HashMap<String, Arc<Extension>>>,
}

impl ExtensionManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a built extension.
    ///
    /// Returns `true` when the registry changed. Registration is the one
    /// deliberately non-fatal failure path: an unparseable declared
    /// version, or a version not newer than the registered one, skips the
    /// registration with a warning and keeps the previous entry — a hot
    /// reload must not crash the running system.
    pub fn register(&self, extension: Extension) -> bool {
        let name = extension.name().to_string();
        let version = match Version::parse(extension.version()) {
            Ok(version) => version,
            Err(_) => {
                warn!(
                    extension = %name,
                    version = extension.version(),
                    "skipping registration: declared version is not parseable"
                );
                return false;
            }
        };

        let mut registry = self.registry.write();
        if let Some(existing) = registry.get(&name) {
            if let Ok(existing_version) = Version::parse(existing.version()) {
                if version <= existing_version {
                    warn!(
                        extension = %name,
                        registered = existing.version(),
                        offered = extension.version(),
                        "skipping registration: not newer than the registered version"
                    );
                    return false;
                }
            }
            info!(
                extension = %name,
                from = existing.version(),
                to = extension.version(),
                "hot-swapping extension"
            );
        } else {
            info!(extension = %name, version = extension.version(), "registered extension");
        }
        registry.insert(name, Arc::new(extension));
        true
    }

    /// Run discovery over a set of describers, registering each parsed
    /// extension.
    ///
    /// A manifest that fails to build is a hard error; a registration
    /// skipped by the version gate is not. Returns the registry entry now
    /// current for each discovered name.
    pub fn discover(&self, describers: &[&dyn Describe]) -> Result<Vec<Arc<Extension>>> {
        let mut discovered = Vec::with_capacity(describers.len());
        for describer in describers {
            let manifest = describer.manifest();
            let extension = parse_manifest(&manifest)?;
            let name = extension.name().to_string();
            self.register(extension);
            if let Some(current) = self.extension(&name) {
                discovered.push(current);
            }
        }
        Ok(discovered)
    }

    /// All registered extensions, ordered by name.
    pub fn extensions(&self) -> Vec<Arc<Extension>> {
        let registry = self.registry.read();
        let mut extensions: Vec<Arc<Extension>> = registry.values().cloned().collect();
        extensions.sort_by(|a, b| a.name().cmp(b.name()));
        extensions
    }

    /// The registered extension with the given name.
    pub fn extension(&self, name: &str) -> Option<Arc<Extension>> {
        self.registry.read().get(name).cloned()
    }

    /// All registered extensions carrying a capability of type `T`.
    pub fn extensions_capable_of<T: std::any::Any + Send + Sync>(&self) -> Vec<Arc<Extension>> {
        self.extensions()
            .into_iter()
            .filter(|e| e.is_capable_of::<T>())
            .collect()
    }

    /// Whether an extension with the given name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.registry.read().contains_key(name)
    }

    /// Number of registered extensions.
    pub fn count(&self) -> usize {
        self.registry.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use manifold_model::ExtensionBuilder;

    fn extension(name: &str, version: &str) -> Extension {
        ExtensionBuilder::new()
            .with_name(name)
            .with_version(version)
            .with_min_runtime_version("1.0.0")
            .build()
            .unwrap()
    }

    #[test]
    fn test_register_and_lookup() {
        let manager = ExtensionManager::new();
        assert!(manager.register(extension("http", "1.0.0")));
        assert!(manager.contains("http"));
        assert_eq!(manager.count(), 1);
        assert_eq!(manager.extension("http").unwrap().version(), "1.0.0");
        assert!(manager.extension("ftp").is_none());
    }

    #[test]
    fn test_newer_version_hot_swaps() {
        let manager = ExtensionManager::new();
        assert!(manager.register(extension("http", "1.0.0")));
        assert!(manager.register(extension("http", "1.1.0")));
        assert_eq!(manager.count(), 1);
        assert_eq!(manager.extension("http").unwrap().version(), "1.1.0");
    }

    #[test]
    fn test_stale_or_equal_version_is_skipped() {
        let manager = ExtensionManager::new();
        assert!(manager.register(extension("http", "1.1.0")));
        assert!(!manager.register(extension("http", "1.0.5")));
        assert!(!manager.register(extension("http", "1.1.0")));
        assert_eq!(manager.extension("http").unwrap().version(), "1.1.0");
    }

    #[test]
    fn test_unparseable_version_is_skipped_without_error() {
        let manager = ExtensionManager::new();
        assert!(manager.register(extension("http", "1.0.0")));
        assert!(!manager.register(extension("http", "definitely-not-semver")));
        assert_eq!(manager.extension("http").unwrap().version(), "1.0.0");

        // Unparseable on first sight never enters the registry either.
        assert!(!manager.register(extension("ftp", "weird")));
        assert!(!manager.contains("ftp"));
    }

    #[test]
    fn test_extensions_sorted_by_name() {
        let manager = ExtensionManager::new();
        manager.register(extension("zip", "1.0.0"));
        manager.register(extension("amqp", "1.0.0"));
        let names: Vec<_> = manager
            .extensions()
            .iter()
            .map(|e| e.name().to_string())
            .collect();
        assert_eq!(names, vec!["amqp", "zip"]);
    }
}
