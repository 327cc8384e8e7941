//! Registry-backed store
//!
//! Typed settings over one registry key. Each public operation opens the
//! root key, performs its native calls, and closes the key again.

use std::fmt;
use std::sync::Arc;

use crate::error::{Result, StoreError};
use crate::native::{Registry, Status, ValueType};
use crate::settings::Settings;
use crate::translate::{check_success, native_error};

use super::cell::{self, ValueKind};
use super::session;

/// Settings store rooted at a single registry key
///
/// ## Concurrency
/// - No handle is cached; concurrent calls each open and close their own
/// - Races between threads or processes on the same key are left to the
///   registry itself
pub struct RegistryStore<R: Registry> {
    registry: Arc<R>,

    /// Key path under the user-scope root, fixed at construction
    root_key_name: String,
}

impl<R: Registry> RegistryStore<R> {
    /// Create a store over an explicit root key path
    pub fn new(registry: Arc<R>, root_key_name: impl Into<String>) -> Self {
        Self {
            registry,
            root_key_name: root_key_name.into(),
        }
    }

    /// Root key path of this store
    pub fn root_key_name(&self) -> &str {
        &self.root_key_name
    }

    /// The backend this store writes to
    pub fn registry(&self) -> &Arc<R> {
        &self.registry
    }

    fn with_root_key<T, F>(&self, action: F) -> Result<T>
    where
        F: FnOnce(&R::Key) -> Result<T>,
    {
        session::with_root_key(self.registry.as_ref(), &self.root_key_name, action)
    }

    // =========================================================================
    // Typed Writes
    // =========================================================================

    /// Write a 32-bit cell holding `raw`
    pub fn put_fixed32(&self, key: &str, kind: ValueKind, raw: u32) -> Result<()> {
        debug_assert_eq!(kind.cell(), ValueType::Fixed32);
        self.put_cell(key, kind, &raw.to_le_bytes())
    }

    /// Write a 64-bit cell holding `raw`
    pub fn put_fixed64(&self, key: &str, kind: ValueKind, raw: u64) -> Result<()> {
        debug_assert_eq!(kind.cell(), ValueType::Fixed64);
        self.put_cell(key, kind, &raw.to_le_bytes())
    }

    /// Write a string cell
    pub fn put_string_cell(&self, key: &str, value: &str) -> Result<()> {
        self.put_cell(key, ValueKind::String, &cell::encode_string(value))
    }

    fn put_cell(&self, key: &str, kind: ValueKind, data: &[u8]) -> Result<()> {
        validate_key(key)?;
        let value_type = kind.cell();

        self.with_root_key(|hkey| {
            let status = self.registry.set_value(hkey, key, value_type, data);
            check_success(status, &[], || format!("unable to set value {}", key))
        })?;

        tracing::debug!(
            "Put {} ({:?} as {}) under {}",
            key,
            kind,
            value_type,
            self.root_key_name
        );
        Ok(())
    }

    // =========================================================================
    // Typed Reads
    // =========================================================================

    /// Read a 32-bit cell, `None` if the value is absent
    pub fn get_fixed32(&self, key: &str, expected: ValueType) -> Result<Option<u32>> {
        let mut buf = [0u8; 4];
        let found = self.query_fixed(key, expected, &mut buf)?;
        Ok(found.then(|| u32::from_le_bytes(buf)))
    }

    /// Read a 64-bit cell, `None` if the value is absent
    pub fn get_fixed64(&self, key: &str, expected: ValueType) -> Result<Option<u64>> {
        let mut buf = [0u8; 8];
        let found = self.query_fixed(key, expected, &mut buf)?;
        Ok(found.then(|| u64::from_le_bytes(buf)))
    }

    /// Query into a buffer of exactly the accessor's width
    ///
    /// A wider stored cell comes back as `MORE_DATA`; the type check runs
    /// before that status is rejected so it surfaces as a type mismatch.
    fn query_fixed(&self, key: &str, expected: ValueType, buf: &mut [u8]) -> Result<bool> {
        validate_key(key)?;

        self.with_root_key(|hkey| {
            let query = self.registry.query_value(hkey, key, Some(buf));
            if query.status == Status::FILE_NOT_FOUND {
                return Ok(false);
            }

            let context = || format!("unable to query value {}", key);
            check_success(query.status, &[Status::MORE_DATA], context)?;
            expect_type(key, query.value_type, expected)?;
            check_success(query.status, &[], context)?;
            Ok(true)
        })
    }

    /// Read a string cell, `None` if the value is absent
    ///
    /// Two calls: the first learns type and length, the second reads the
    /// data. If the value grew in between, the read is retried once.
    pub fn get_string_cell(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let context = || format!("unable to query value {}", key);

        let bytes = self.with_root_key(|hkey| {
            let probe = self.registry.query_value(hkey, key, None);
            if probe.status == Status::FILE_NOT_FOUND {
                return Ok(None);
            }
            check_success(probe.status, &[], context)?;
            expect_type(key, probe.value_type, ValueType::String)?;

            let mut buf = vec![0u8; probe.len];
            let mut read = self.registry.query_value(hkey, key, Some(buf.as_mut_slice()));
            if read.status == Status::MORE_DATA {
                tracing::debug!(
                    "Value {} grew from {} to {} bytes between reads, retrying",
                    key,
                    probe.len,
                    read.len
                );
                buf = vec![0u8; read.len];
                read = self.registry.query_value(hkey, key, Some(buf.as_mut_slice()));
            }
            if read.status == Status::FILE_NOT_FOUND {
                return Ok(None);
            }
            check_success(read.status, &[], context)?;
            expect_type(key, read.value_type, ValueType::String)?;

            buf.truncate(read.len);
            Ok(Some(buf))
        })?;

        bytes.map(|b| cell::decode_string(key, &b)).transpose()
    }

    // =========================================================================
    // Presence & Removal
    // =========================================================================

    fn has_value(&self, key: &str) -> Result<bool> {
        validate_key(key)?;

        self.with_root_key(|hkey| {
            let query = self.registry.query_value(hkey, key, None);
            if query.status == Status::FILE_NOT_FOUND {
                return Ok(false);
            }
            check_success(query.status, &[], || format!("unable to query value {}", key))?;
            Ok(true)
        })
    }

    /// Delete one value; a missing value is not an error
    fn remove_value(&self, hkey: &R::Key, key: &str) -> Result<()> {
        let status = self.registry.delete_value(hkey, key);
        check_success(status, &[Status::FILE_NOT_FOUND], || {
            format!("unable to remove key {}", key)
        })
    }

    /// Collect every value name under the open key, in native order
    ///
    /// Each iteration gets a fresh, full-size name buffer and counter. Names
    /// are only collected here; deleting while enumerating by index would
    /// shift later values down and skip them.
    fn value_names(&self, hkey: &R::Key) -> Result<Vec<String>> {
        let info = self.registry.query_info(hkey).map_err(|status| {
            native_error(status, format!("unable to query info for key {}", self.root_key_name))
        })?;
        let buf_len = info.max_value_name_len as usize + 1;

        let mut names = Vec::with_capacity(info.value_count as usize);
        for index in 0u32.. {
            let mut name = vec![0u16; buf_len];
            let mut name_len = buf_len as u32;

            let status = self.registry.enum_value(hkey, index, &mut name, &mut name_len);
            if status == Status::NO_MORE_ITEMS {
                break;
            }
            // MORE_DATA is harmless once a name actually came back
            let name_returned =
                status == Status::MORE_DATA && name_len > 0 && (name_len as usize) < buf_len;
            if !name_returned {
                check_success(status, &[], || {
                    format!("unable to enumerate value {} of key {}", index, self.root_key_name)
                })?;
            }

            let units = &name[..(name_len as usize).min(buf_len)];
            let decoded = String::from_utf16(units).map_err(|e| {
                StoreError::Encoding(format!("value name at index {} is not valid UTF-16: {}", index, e))
            })?;
            names.push(decoded);
        }

        Ok(names)
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.contains('\0') {
        return Err(StoreError::InvalidKey(format!(
            "{:?} contains a NUL character",
            key
        )));
    }
    Ok(())
}

fn expect_type(key: &str, found: ValueType, expected: ValueType) -> Result<()> {
    if found != expected {
        return Err(StoreError::TypeMismatch {
            key: key.to_string(),
            found,
        });
    }
    Ok(())
}

impl<R: Registry> Clone for RegistryStore<R> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            root_key_name: self.root_key_name.clone(),
        }
    }
}

impl<R: Registry> fmt::Debug for RegistryStore<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryStore")
            .field("root_key_name", &self.root_key_name)
            .finish()
    }
}

impl<R: Registry> Settings for RegistryStore<R> {
    fn keys(&self) -> Result<Vec<String>> {
        self.with_root_key(|hkey| self.value_names(hkey))
    }

    fn size(&self) -> Result<usize> {
        self.with_root_key(|hkey| {
            let info = self.registry.query_info(hkey).map_err(|status| {
                native_error(status, format!("unable to query info for key {}", self.root_key_name))
            })?;
            Ok(info.value_count as usize)
        })
    }

    /// Remove every value: enumerate all names first, then delete each
    fn clear(&self) -> Result<()> {
        let removed = self.with_root_key(|hkey| {
            let names = self.value_names(hkey)?;
            for name in &names {
                self.remove_value(hkey, name)?;
            }
            Ok(names.len())
        })?;

        tracing::debug!("Cleared {} values under {}", removed, self.root_key_name);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        self.with_root_key(|hkey| self.remove_value(hkey, key))?;

        tracing::debug!("Removed {} under {}", key, self.root_key_name);
        Ok(())
    }

    fn has_key(&self, key: &str) -> Result<bool> {
        self.has_value(key)
    }

    fn put_i32(&self, key: &str, value: i32) -> Result<()> {
        self.put_fixed32(key, ValueKind::Int32, cell::i32_to_bits(value))
    }

    fn get_i32(&self, key: &str) -> Result<Option<i32>> {
        Ok(self.get_fixed32(key, ValueType::Fixed32)?.map(cell::bits_to_i32))
    }

    fn put_i64(&self, key: &str, value: i64) -> Result<()> {
        self.put_fixed64(key, ValueKind::Int64, cell::i64_to_bits(value))
    }

    fn get_i64(&self, key: &str) -> Result<Option<i64>> {
        Ok(self.get_fixed64(key, ValueType::Fixed64)?.map(cell::bits_to_i64))
    }

    fn put_string(&self, key: &str, value: &str) -> Result<()> {
        self.put_string_cell(key, value)
    }

    fn get_string(&self, key: &str) -> Result<Option<String>> {
        self.get_string_cell(key)
    }

    fn put_f32(&self, key: &str, value: f32) -> Result<()> {
        self.put_fixed32(key, ValueKind::Float32, cell::f32_to_bits(value))
    }

    fn get_f32(&self, key: &str) -> Result<Option<f32>> {
        Ok(self.get_fixed32(key, ValueType::Fixed32)?.map(cell::bits_to_f32))
    }

    fn put_f64(&self, key: &str, value: f64) -> Result<()> {
        self.put_fixed64(key, ValueKind::Float64, cell::f64_to_bits(value))
    }

    fn get_f64(&self, key: &str) -> Result<Option<f64>> {
        Ok(self.get_fixed64(key, ValueType::Fixed64)?.map(cell::bits_to_f64))
    }

    fn put_bool(&self, key: &str, value: bool) -> Result<()> {
        self.put_fixed32(key, ValueKind::Bool, cell::bool_to_bits(value))
    }

    fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        Ok(self.get_fixed32(key, ValueType::Fixed32)?.map(cell::bits_to_bool))
    }
}
