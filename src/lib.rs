//! # regkv
//!
//! A typed key-value settings store backed by the hierarchical system
//! registry:
//! - 32/64-bit integers, strings, 32/64-bit floats and booleans
//! - Exact bit-level float storage in fixed-width cells
//! - Whole-store clear built from delete-by-name and enumerate-by-index
//! - Native status codes translated into readable diagnostics
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   StoreFactory (Config)                      │
//! │        <prefix>\<parent>[\<instance>]  →  RegistryStore      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  Settings trait
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    RegistryStore                             │
//! │      open root key → native calls → close root key           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Registry   │          │  translate  │
//!   │  (backend)  │          │ (diagnostic)│
//!   └─────────────┘          └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use regkv::{Config, InMemoryRegistry, Settings, StoreFactory};
//!
//! # fn main() -> regkv::Result<()> {
//! let factory = StoreFactory::new(Arc::new(InMemoryRegistry::new()), Config::default());
//! let store = factory.create(Some("window"))?;
//!
//! store.put_i32("width", 1280)?;
//! assert_eq!(store.get_i32_or("width", 800)?, 1280);
//! assert_eq!(store.get_i32("height")?, None);
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;

pub mod factory;
pub mod native;
pub mod settings;
pub mod store;
pub mod translate;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use config::Config;
pub use error::{Result, StoreError};
pub use factory::StoreFactory;
pub use native::{InMemoryRegistry, Registry, Status, ValueType};
#[cfg(windows)]
pub use native::WindowsRegistry;
pub use settings::Settings;
pub use store::{RegistryStore, ValueKind};
pub use translate::{check_success, describe_system_error};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of regkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
