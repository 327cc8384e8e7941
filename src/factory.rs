//! Store factory
//!
//! Derives root key paths from the configuration and hands out stores that
//! share one registry backend.

use std::sync::Arc;

use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::native::Registry;
use crate::store::RegistryStore;

/// Creates stores under `<namespace_prefix>\<parent_name>`
pub struct StoreFactory<R: Registry> {
    registry: Arc<R>,
    config: Config,
}

impl<R: Registry> StoreFactory<R> {
    pub fn new(registry: Arc<R>, config: Config) -> Self {
        Self { registry, config }
    }

    /// Create a store
    ///
    /// - `None` → `<prefix>\<parent>`
    /// - `Some(name)` → `<prefix>\<parent>\<name>`
    pub fn create(&self, instance_name: Option<&str>) -> Result<RegistryStore<R>> {
        validate_segment("namespace prefix", &self.config.namespace_prefix)?;
        validate_segment("parent name", &self.config.parent_name)?;

        let root = match instance_name {
            Some(name) => {
                validate_segment("instance name", name)?;
                format!("{}\\{}", self.config.parent_path(), name)
            }
            None => self.config.parent_path(),
        };

        tracing::debug!("Creating store at {}", root);
        Ok(RegistryStore::new(Arc::clone(&self.registry), root))
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(windows)]
impl StoreFactory<crate::native::WindowsRegistry> {
    /// Factory over the current user's registry hive
    pub fn system(config: Config) -> Self {
        Self::new(Arc::new(crate::native::WindowsRegistry::new()), config)
    }
}

fn validate_segment(what: &str, segment: &str) -> Result<()> {
    if segment.is_empty() {
        return Err(StoreError::Config(format!("{} must not be empty", what)));
    }
    if segment.contains('\0') {
        return Err(StoreError::Config(format!("{} contains a NUL character", what)));
    }
    if segment.starts_with('\\') || segment.ends_with('\\') {
        return Err(StoreError::Config(format!(
            "{} {:?} must not start or end with a backslash",
            what, segment
        )));
    }
    Ok(())
}
