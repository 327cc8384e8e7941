//! Storage cell marshalling
//!
//! Maps each logical value kind onto one of the three native cells.
//!
//! | Kind    | Cell    | Raw bits                 |
//! |---------|---------|--------------------------|
//! | Int32   | Fixed32 | two's complement         |
//! | Bool    | Fixed32 | 0 or 1                   |
//! | Float32 | Fixed32 | IEEE-754 bit pattern     |
//! | Int64   | Fixed64 | two's complement         |
//! | Float64 | Fixed64 | IEEE-754 bit pattern     |
//! | String  | String  | UTF-16LE, NUL-terminated |
//!
//! Floats are reinterpreted with `to_bits`/`from_bits`, never converted, so
//! `-0.0` and NaN payloads survive a round trip.

use crate::error::{Result, StoreError};
use crate::native::ValueType;

/// Logical value kind exposed by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Int32,
    Int64,
    String,
    Float32,
    Float64,
    Bool,
}

impl ValueKind {
    /// Native cell this kind is stored in
    pub fn cell(self) -> ValueType {
        match self {
            ValueKind::Int32 | ValueKind::Bool | ValueKind::Float32 => ValueType::Fixed32,
            ValueKind::Int64 | ValueKind::Float64 => ValueType::Fixed64,
            ValueKind::String => ValueType::String,
        }
    }
}

// =============================================================================
// Fixed Cells
// =============================================================================

pub fn i32_to_bits(value: i32) -> u32 {
    value as u32
}

pub fn bits_to_i32(bits: u32) -> i32 {
    bits as i32
}

pub fn i64_to_bits(value: i64) -> u64 {
    value as u64
}

pub fn bits_to_i64(bits: u64) -> i64 {
    bits as i64
}

pub fn f32_to_bits(value: f32) -> u32 {
    value.to_bits()
}

pub fn bits_to_f32(bits: u32) -> f32 {
    f32::from_bits(bits)
}

pub fn f64_to_bits(value: f64) -> u64 {
    value.to_bits()
}

pub fn bits_to_f64(bits: u64) -> f64 {
    f64::from_bits(bits)
}

pub fn bool_to_bits(value: bool) -> u32 {
    if value {
        1
    } else {
        0
    }
}

/// Any non-zero cell reads as true
pub fn bits_to_bool(bits: u32) -> bool {
    bits != 0
}

// =============================================================================
// String Cells
// =============================================================================

/// Encode as NUL-terminated UTF-16LE bytes
pub fn encode_string(value: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity((value.len() + 1) * 2);
    for unit in value.encode_utf16().chain(Some(0)) {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    bytes
}

/// Decode UTF-16LE bytes, cutting at the first NUL terminator
///
/// A trailing odd byte is ignored.
pub fn decode_string(key: &str, bytes: &[u8]) -> Result<String> {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .take_while(|&unit| unit != 0)
        .collect();

    String::from_utf16(&units)
        .map_err(|e| StoreError::Encoding(format!("value {} is not valid UTF-16: {}", key, e)))
}
