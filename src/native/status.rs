//! Native status codes and value type tags
//!
//! Both are plain numbers on the native side. The constants mirror the
//! Win32 values so the in-memory backend speaks the same language as the
//! real registry.

use std::fmt;

/// Status code returned by every registry primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Status(pub u32);

impl Status {
    pub const SUCCESS: Status = Status(0);
    pub const FILE_NOT_FOUND: Status = Status(2);
    pub const ACCESS_DENIED: Status = Status(5);
    pub const INVALID_HANDLE: Status = Status(6);
    pub const INVALID_PARAMETER: Status = Status(87);
    pub const MORE_DATA: Status = Status(234);
    pub const NO_MORE_ITEMS: Status = Status(259);

    /// Raw numeric code
    pub fn code(self) -> u32 {
        self.0
    }

    pub fn is_success(self) -> bool {
        self == Status::SUCCESS
    }
}

impl From<u32> for Status {
    fn from(code: u32) -> Self {
        Status(code)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

/// Storage cell tag of a registry value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Variable-length NUL-terminated UTF-16LE string (REG_SZ)
    String,

    /// 32-bit little-endian cell (REG_DWORD)
    Fixed32,

    /// 64-bit little-endian cell (REG_QWORD)
    Fixed64,

    /// Any other tag this crate never writes
    Other(u32),
}

impl ValueType {
    const REG_SZ: u32 = 1;
    const REG_DWORD: u32 = 4;
    const REG_QWORD: u32 = 11;

    pub fn from_raw(raw: u32) -> Self {
        match raw {
            Self::REG_SZ => ValueType::String,
            Self::REG_DWORD => ValueType::Fixed32,
            Self::REG_QWORD => ValueType::Fixed64,
            other => ValueType::Other(other),
        }
    }

    pub fn raw(self) -> u32 {
        match self {
            ValueType::String => Self::REG_SZ,
            ValueType::Fixed32 => Self::REG_DWORD,
            ValueType::Fixed64 => Self::REG_QWORD,
            ValueType::Other(raw) => raw,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::String => f.write_str("REG_SZ"),
            ValueType::Fixed32 => f.write_str("REG_DWORD"),
            ValueType::Fixed64 => f.write_str("REG_QWORD"),
            ValueType::Other(raw) => write!(f, "type {}", raw),
        }
    }
}
