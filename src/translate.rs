//! System error translation
//!
//! Turns native status codes into diagnostic text of the form
//! `[0x00000005] Access is denied.`

use crate::error::{Result, StoreError};
use crate::native::Status;

/// Render a native status code as `"[0x%08X] <message>"`
///
/// Never fails: an unresolvable code still gets its hex prefix.
pub fn describe_system_error(code: u32) -> String {
    let message = system_message(code)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| "unknown error".to_string());

    format!("[0x{:08X}] {}", code, message)
}

/// Fail with a `NativeStore` error unless `status` is success or whitelisted
pub fn check_success<F>(status: Status, allowed_extra: &[Status], context: F) -> Result<()>
where
    F: FnOnce() -> String,
{
    if status.is_success() || allowed_extra.contains(&status) {
        return Ok(());
    }

    Err(native_error(status, context()))
}

/// Build a `NativeStore` error for `status` with the translated diagnostic
pub fn native_error(status: Status, context: String) -> StoreError {
    StoreError::NativeStore {
        context,
        status,
        diagnostic: describe_system_error(status.code()),
    }
}

#[cfg(windows)]
fn system_message(code: u32) -> Option<String> {
    use std::ptr;
    use windows_sys::Win32::System::Diagnostics::Debug::{
        FormatMessageW, FORMAT_MESSAGE_FROM_SYSTEM, FORMAT_MESSAGE_IGNORE_INSERTS,
    };

    // MAKELANGID(LANG_NEUTRAL, SUBLANG_DEFAULT)
    const LANG_NEUTRAL_DEFAULT: u32 = 0x0400;

    let mut buf = [0u16; 512];

    // SAFETY: buf is a writable buffer of buf.len() units; no inserts are
    // expanded so the arguments pointer may be null.
    let written = unsafe {
        FormatMessageW(
            FORMAT_MESSAGE_FROM_SYSTEM | FORMAT_MESSAGE_IGNORE_INSERTS,
            ptr::null(),
            code,
            LANG_NEUTRAL_DEFAULT,
            buf.as_mut_ptr(),
            buf.len() as u32,
            ptr::null(),
        )
    };

    if written == 0 {
        return None;
    }
    Some(String::from_utf16_lossy(&buf[..written as usize]))
}

#[cfg(not(windows))]
fn system_message(code: u32) -> Option<String> {
    let message = match Status(code) {
        Status::SUCCESS => "The operation completed successfully.",
        Status::FILE_NOT_FOUND => "The system cannot find the file specified.",
        Status::ACCESS_DENIED => "Access is denied.",
        Status::INVALID_HANDLE => "The handle is invalid.",
        Status::INVALID_PARAMETER => "The parameter is incorrect.",
        Status::MORE_DATA => "More data is available.",
        Status::NO_MORE_ITEMS => "No more data is available.",
        _ => return None,
    };
    Some(message.to_string())
}
