//! Native Registry Module
//!
//! The host primitives the store is written against.
//!
//! ## Responsibilities
//! - Open (creating if needed) and close a key under the user-scope root
//! - Set, query and delete named values on an open key
//! - Report key metadata and enumerate value names by index
//!
//! ## Conventions
//! Every primitive reports a [`Status`] instead of a Rust error, exactly as
//! the host API does. Deciding which statuses are benign is the store's job.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ HKEY_CURRENT_USER                            │
//! │   └── SOFTWARE\<parent>[\<instance>]         │
//! │         ├── "count"   REG_DWORD   2A 00 00 00│
//! │         ├── "ratio"   REG_QWORD   ...        │
//! │         └── "name"    REG_SZ      h\0i\0\0\0 │
//! └──────────────────────────────────────────────┘
//! ```

pub mod memory;
mod status;
#[cfg(windows)]
pub mod windows;

pub use memory::{InMemoryRegistry, NativeOp};
pub use status::{Status, ValueType};
#[cfg(windows)]
pub use windows::WindowsRegistry;

/// Outcome of a value query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueQuery {
    pub status: Status,

    /// Stored cell tag (meaningful on SUCCESS and MORE_DATA)
    pub value_type: ValueType,

    /// Byte length of the stored data, or of the bytes copied on success
    pub len: usize,
}

/// Key metadata used to size enumeration buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyInfo {
    /// Number of values under the key
    pub value_count: u32,

    /// Longest value name in UTF-16 units, excluding the terminator
    pub max_value_name_len: u32,
}

/// Hierarchical registry primitives
///
/// Implementations must be thread-safe (`Send + Sync`). A `Key` is only ever
/// used within the operation that created it and is passed to
/// [`Registry::close_key`] exactly once; it is not used after that.
pub trait Registry: Send + Sync {
    /// Open key handle
    type Key;

    /// Open the key at `path` under the user-scope root, creating it if absent
    fn create_key(&self, path: &str) -> std::result::Result<Self::Key, Status>;

    /// Release a key handle
    fn close_key(&self, key: &Self::Key) -> Status;

    /// Create or overwrite a named value
    fn set_value(&self, key: &Self::Key, name: &str, value_type: ValueType, data: &[u8]) -> Status;

    /// Query a named value's type and data
    ///
    /// With `data == None` only the type and the required length are
    /// reported. A buffer that is too small yields `MORE_DATA` together with
    /// the required length.
    fn query_value(&self, key: &Self::Key, name: &str, data: Option<&mut [u8]>) -> ValueQuery;

    /// Delete a named value
    fn delete_value(&self, key: &Self::Key, name: &str) -> Status;

    /// Query key metadata
    fn query_info(&self, key: &Self::Key) -> std::result::Result<KeyInfo, Status>;

    /// Copy the name of the value at `index` into `name`
    ///
    /// On entry `name_len` holds the buffer capacity in UTF-16 units
    /// (including the terminator); on return it holds the number of units
    /// written (excluding the terminator). Past the last value the status is
    /// `NO_MORE_ITEMS`.
    fn enum_value(&self, key: &Self::Key, index: u32, name: &mut [u16], name_len: &mut u32) -> Status;
}
