//! Configuration for regkv
//!
//! Where stores live in the registry, with sensible defaults.

/// Store placement configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Key Layout
    // -------------------------------------------------------------------------
    /// Fixed prefix under the user-scope root
    /// Resulting layout:
    ///   HKEY_CURRENT_USER\
    ///     └── {namespace_prefix}\
    ///           └── {parent_name}\
    ///                 └── {instance}  (optional)
    pub namespace_prefix: String,

    /// Application-level key shared by every store the factory creates
    pub parent_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace_prefix: "SOFTWARE".to_string(),
            parent_name: "regkv".to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Key path for the parent, `<prefix>\<parent>`
    pub fn parent_path(&self) -> String {
        format!("{}\\{}", self.namespace_prefix, self.parent_name)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the namespace prefix (e.g. `SOFTWARE`)
    pub fn namespace_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.namespace_prefix = prefix.into();
        self
    }

    /// Set the parent key name (usually the application name)
    pub fn parent_name(mut self, name: impl Into<String>) -> Self {
        self.config.parent_name = name.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
