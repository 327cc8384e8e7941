//! Root key sessions
//!
//! Every store operation runs inside exactly one open/close pair on the
//! store's root key. The handle is never cached between operations.

use crate::error::Result;
use crate::native::Registry;
use crate::translate::{check_success, native_error};

/// Open root key, closed on every exit path
///
/// The normal path closes explicitly through [`KeyGuard::close`] so the
/// status can be checked. If the guard is dropped without that (a panic
/// inside the action), `Drop` still releases the handle.
pub struct KeyGuard<'a, R: Registry> {
    registry: &'a R,
    root: &'a str,
    key: R::Key,
    closed: bool,
}

impl<'a, R: Registry> KeyGuard<'a, R> {
    /// Open `root`, creating it if absent
    pub fn open(registry: &'a R, root: &'a str) -> Result<Self> {
        let key = registry
            .create_key(root)
            .map_err(|status| native_error(status, format!("unable to create/open key {}", root)))?;

        Ok(Self {
            registry,
            root,
            key,
            closed: false,
        })
    }

    /// The live handle
    pub fn key(&self) -> &R::Key {
        &self.key
    }

    /// Close the handle and check the status
    pub fn close(mut self) -> Result<()> {
        self.closed = true;
        let status = self.registry.close_key(&self.key);
        check_success(status, &[], || format!("unable to close key {}", self.root))
    }
}

impl<R: Registry> Drop for KeyGuard<'_, R> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }

        let status = self.registry.close_key(&self.key);
        tracing::warn!(
            "Key {} released without an explicit close (close status {})",
            self.root,
            status
        );
    }
}

/// Run `action` with the root key open, closing it afterwards
///
/// A close failure is reported only if `action` succeeded; otherwise the
/// action's error wins and the close failure is logged.
pub fn with_root_key<R, T, F>(registry: &R, root: &str, action: F) -> Result<T>
where
    R: Registry,
    F: FnOnce(&R::Key) -> Result<T>,
{
    let guard = KeyGuard::open(registry, root)?;
    let outcome = action(guard.key());
    let closed = guard.close();

    match (outcome, closed) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(close_err)) => Err(close_err),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(close_err)) => {
            tracing::warn!("{} (suppressed by earlier error: {})", close_err, err);
            Err(err)
        }
    }
}
