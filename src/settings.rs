//! Settings interface
//!
//! The typed surface a settings consumer programs against. Every kind has a
//! nullable getter (`get_*`, `None` when the key is absent) and a defaulting
//! getter (`get_*_or`) built on top of it.

use crate::error::Result;

/// Typed persistent key-value settings
pub trait Settings {
    /// All keys currently stored
    fn keys(&self) -> Result<Vec<String>>;

    /// Number of stored keys
    fn size(&self) -> Result<usize>;

    /// Remove every key
    fn clear(&self) -> Result<()>;

    /// Remove one key; removing an absent key succeeds
    fn remove(&self, key: &str) -> Result<()>;

    fn has_key(&self, key: &str) -> Result<bool>;

    // -------------------------------------------------------------------------
    // 32-bit integers
    // -------------------------------------------------------------------------
    fn put_i32(&self, key: &str, value: i32) -> Result<()>;

    fn get_i32(&self, key: &str) -> Result<Option<i32>>;

    fn get_i32_or(&self, key: &str, default: i32) -> Result<i32> {
        Ok(self.get_i32(key)?.unwrap_or(default))
    }

    // -------------------------------------------------------------------------
    // 64-bit integers
    // -------------------------------------------------------------------------
    fn put_i64(&self, key: &str, value: i64) -> Result<()>;

    fn get_i64(&self, key: &str) -> Result<Option<i64>>;

    fn get_i64_or(&self, key: &str, default: i64) -> Result<i64> {
        Ok(self.get_i64(key)?.unwrap_or(default))
    }

    // -------------------------------------------------------------------------
    // Strings
    // -------------------------------------------------------------------------
    fn put_string(&self, key: &str, value: &str) -> Result<()>;

    fn get_string(&self, key: &str) -> Result<Option<String>>;

    fn get_string_or(&self, key: &str, default: &str) -> Result<String> {
        Ok(self.get_string(key)?.unwrap_or_else(|| default.to_string()))
    }

    // -------------------------------------------------------------------------
    // Floats
    // -------------------------------------------------------------------------
    fn put_f32(&self, key: &str, value: f32) -> Result<()>;

    fn get_f32(&self, key: &str) -> Result<Option<f32>>;

    fn get_f32_or(&self, key: &str, default: f32) -> Result<f32> {
        Ok(self.get_f32(key)?.unwrap_or(default))
    }

    fn put_f64(&self, key: &str, value: f64) -> Result<()>;

    fn get_f64(&self, key: &str) -> Result<Option<f64>>;

    fn get_f64_or(&self, key: &str, default: f64) -> Result<f64> {
        Ok(self.get_f64(key)?.unwrap_or(default))
    }

    // -------------------------------------------------------------------------
    // Booleans
    // -------------------------------------------------------------------------
    fn put_bool(&self, key: &str, value: bool) -> Result<()>;

    fn get_bool(&self, key: &str) -> Result<Option<bool>>;

    fn get_bool_or(&self, key: &str, default: bool) -> Result<bool> {
        Ok(self.get_bool(key)?.unwrap_or(default))
    }
}
