//! Windows registry backend
//!
//! Thin `windows-sys` wrappers around the `Reg*W` functions. Keys are opened
//! under `HKEY_CURRENT_USER`; all names cross the boundary as NUL-terminated
//! UTF-16.

use std::ffi::OsStr;
use std::os::windows::ffi::OsStrExt;
use std::ptr;

use windows_sys::Win32::System::Registry::{
    RegCloseKey, RegCreateKeyExW, RegDeleteValueW, RegEnumValueW, RegQueryInfoKeyW, RegQueryValueExW,
    RegSetValueExW, HKEY, HKEY_CURRENT_USER, KEY_READ, KEY_WRITE, REG_OPTION_NON_VOLATILE,
};

use super::{KeyInfo, Registry, Status, ValueQuery, ValueType};

fn to_wide(s: &str) -> Vec<u16> {
    OsStr::new(s).encode_wide().chain(Some(0)).collect()
}

/// Open `HKEY` owned by one store operation
#[derive(Debug)]
pub struct WinKey(HKEY);

/// The current user's registry hive
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsRegistry;

impl WindowsRegistry {
    pub fn new() -> Self {
        Self
    }
}

impl Registry for WindowsRegistry {
    type Key = WinKey;

    fn create_key(&self, path: &str) -> Result<WinKey, Status> {
        let path_wide = to_wide(path);
        let mut hkey: HKEY = ptr::null_mut();

        // SAFETY: path_wide is NUL-terminated and outlives the call; hkey is a
        // valid out pointer. Class, security attributes and disposition are
        // optional and passed as null.
        let status = unsafe {
            RegCreateKeyExW(
                HKEY_CURRENT_USER,
                path_wide.as_ptr(),
                0,
                ptr::null(),
                REG_OPTION_NON_VOLATILE,
                KEY_READ | KEY_WRITE,
                ptr::null(),
                &mut hkey,
                ptr::null_mut(),
            )
        };

        if status == 0 {
            Ok(WinKey(hkey))
        } else {
            Err(Status(status))
        }
    }

    fn close_key(&self, key: &WinKey) -> Status {
        // SAFETY: the handle came from RegCreateKeyExW and is closed once.
        Status(unsafe { RegCloseKey(key.0) })
    }

    fn set_value(&self, key: &WinKey, name: &str, value_type: ValueType, data: &[u8]) -> Status {
        let name_wide = to_wide(name);

        // SAFETY: data is a live slice of exactly data.len() bytes.
        Status(unsafe {
            RegSetValueExW(
                key.0,
                name_wide.as_ptr(),
                0,
                value_type.raw(),
                data.as_ptr(),
                data.len() as u32,
            )
        })
    }

    fn query_value(&self, key: &WinKey, name: &str, data: Option<&mut [u8]>) -> ValueQuery {
        let name_wide = to_wide(name);
        let mut raw_type: u32 = 0;

        let (data_ptr, mut len) = match data {
            Some(buf) => (buf.as_mut_ptr(), buf.len() as u32),
            None => (ptr::null_mut(), 0),
        };

        // SAFETY: data_ptr is either null (length query) or points to a
        // buffer of `len` writable bytes.
        let status = unsafe {
            RegQueryValueExW(key.0, name_wide.as_ptr(), ptr::null(), &mut raw_type, data_ptr, &mut len)
        };

        ValueQuery {
            status: Status(status),
            value_type: ValueType::from_raw(raw_type),
            len: len as usize,
        }
    }

    fn delete_value(&self, key: &WinKey, name: &str) -> Status {
        let name_wide = to_wide(name);

        // SAFETY: name_wide is NUL-terminated.
        Status(unsafe { RegDeleteValueW(key.0, name_wide.as_ptr()) })
    }

    fn query_info(&self, key: &WinKey) -> Result<KeyInfo, Status> {
        let mut value_count: u32 = 0;
        let mut max_value_name_len: u32 = 0;

        // SAFETY: every out pointer is either null (not requested) or a live u32.
        let status = unsafe {
            RegQueryInfoKeyW(
                key.0,
                ptr::null_mut(),
                ptr::null_mut(),
                ptr::null(),
                ptr::null_mut(),
                ptr::null_mut(),
                ptr::null_mut(),
                &mut value_count,
                &mut max_value_name_len,
                ptr::null_mut(),
                ptr::null_mut(),
                ptr::null_mut(),
            )
        };

        if status == 0 {
            Ok(KeyInfo {
                value_count,
                max_value_name_len,
            })
        } else {
            Err(Status(status))
        }
    }

    fn enum_value(&self, key: &WinKey, index: u32, name: &mut [u16], name_len: &mut u32) -> Status {
        *name_len = (*name_len).min(name.len() as u32);

        // SAFETY: name has at least *name_len writable units; type and data
        // are not requested.
        Status(unsafe {
            RegEnumValueW(
                key.0,
                index,
                name.as_mut_ptr(),
                name_len,
                ptr::null(),
                ptr::null_mut(),
                ptr::null_mut(),
                ptr::null_mut(),
            )
        })
    }
}
