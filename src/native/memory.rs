//! In-memory registry
//!
//! A portable emulation of the registry primitives. It follows the host's
//! status semantics closely enough to exercise every branch of the store:
//! - key paths and value names are case-insensitive
//! - undersized buffers yield `MORE_DATA` with the required length
//! - enumeration is by index over the live value list, so deleting while
//!   enumerating shifts later entries down
//! - calls on a closed handle yield `INVALID_HANDLE`
//!
//! Faults can be injected per primitive to drive failure paths.

use std::collections::{HashMap, HashSet};

use parking_lot::Mutex;

use super::{KeyInfo, Registry, Status, ValueQuery, ValueType};

/// Registry primitive, used to target injected faults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeOp {
    CreateKey,
    CloseKey,
    SetValue,
    QueryValue,
    DeleteValue,
    QueryInfo,
    EnumValue,
}

/// Handle to an open in-memory key
#[derive(Debug)]
pub struct MemoryKey {
    handle: u64,
    path: String,
}

#[derive(Debug, Clone)]
struct StoredValue {
    name: String,
    value_type: ValueType,
    data: Vec<u8>,
}

#[derive(Debug)]
struct Fault {
    op: NativeOp,
    skip: usize,
    status: Status,
}

#[derive(Debug, Default)]
struct State {
    /// Values per key, keyed by folded path, in creation order
    keys: HashMap<String, Vec<StoredValue>>,
    open_handles: HashSet<u64>,
    next_handle: u64,
    faults: Vec<Fault>,
    enum_reports_more_data: bool,
}

impl State {
    /// Pop the next armed fault for `op`, counting down any skips
    fn take_fault(&mut self, op: NativeOp) -> Option<Status> {
        let idx = self.faults.iter().position(|f| f.op == op)?;
        if self.faults[idx].skip > 0 {
            self.faults[idx].skip -= 1;
            return None;
        }
        Some(self.faults.remove(idx).status)
    }

    fn values(&self, key: &MemoryKey) -> Result<&Vec<StoredValue>, Status> {
        if !self.open_handles.contains(&key.handle) {
            return Err(Status::INVALID_HANDLE);
        }
        self.keys.get(&key.path).ok_or(Status::INVALID_HANDLE)
    }

    fn values_mut(&mut self, key: &MemoryKey) -> Result<&mut Vec<StoredValue>, Status> {
        if !self.open_handles.contains(&key.handle) {
            return Err(Status::INVALID_HANDLE);
        }
        self.keys.get_mut(&key.path).ok_or(Status::INVALID_HANDLE)
    }
}

fn fold(name: &str) -> String {
    name.to_lowercase()
}

fn find(values: &[StoredValue], name: &str) -> Option<usize> {
    let folded = fold(name);
    values.iter().position(|v| fold(&v.name) == folded)
}

/// Registry emulation backed by a mutex-guarded map
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    state: Mutex<State>,
}

impl InMemoryRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Fault Injection
    // =========================================================================

    /// Make the next call to `op` fail with `status` without side effects
    ///
    /// A failed `CloseKey` still releases the handle, and a failed
    /// `QueryValue` still reports the stored type and length.
    pub fn inject_fault(&self, op: NativeOp, status: Status) {
        self.inject_fault_after(op, 0, status);
    }

    /// Like [`inject_fault`](Self::inject_fault), letting `skip` calls succeed first
    pub fn inject_fault_after(&self, op: NativeOp, skip: usize, status: Status) {
        self.state.lock().faults.push(Fault { op, skip, status });
    }

    /// Drop all armed faults
    pub fn clear_faults(&self) {
        self.state.lock().faults.clear();
    }

    /// When set, successful enumeration reports `MORE_DATA` after copying the name
    pub fn set_enum_reports_more_data(&self, enabled: bool) {
        self.state.lock().enum_reports_more_data = enabled;
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Number of handles opened and not yet closed
    pub fn open_handle_count(&self) -> usize {
        self.state.lock().open_handles.len()
    }

    /// Whether a key exists at `path`
    pub fn key_exists(&self, path: &str) -> bool {
        self.state.lock().keys.contains_key(&fold(path))
    }

    /// Raw cell stored under `path` / `name`
    pub fn raw_value(&self, path: &str, name: &str) -> Option<(ValueType, Vec<u8>)> {
        let state = self.state.lock();
        let values = state.keys.get(&fold(path))?;
        let idx = find(values, name)?;
        Some((values[idx].value_type, values[idx].data.clone()))
    }

    /// Store a raw cell directly, creating the key if needed
    pub fn insert_raw(&self, path: &str, name: &str, value_type: ValueType, data: &[u8]) {
        let mut state = self.state.lock();
        let values = state.keys.entry(fold(path)).or_default();
        upsert(values, name, value_type, data);
    }
}

fn upsert(values: &mut Vec<StoredValue>, name: &str, value_type: ValueType, data: &[u8]) {
    match find(values, name) {
        Some(idx) => {
            values[idx].value_type = value_type;
            values[idx].data = data.to_vec();
        }
        None => values.push(StoredValue {
            name: name.to_string(),
            value_type,
            data: data.to_vec(),
        }),
    }
}

impl Registry for InMemoryRegistry {
    type Key = MemoryKey;

    fn create_key(&self, path: &str) -> Result<MemoryKey, Status> {
        let mut state = self.state.lock();
        if let Some(status) = state.take_fault(NativeOp::CreateKey) {
            return Err(status);
        }
        if path.contains('\0') {
            return Err(Status::INVALID_PARAMETER);
        }

        let folded = fold(path);
        state.keys.entry(folded.clone()).or_default();

        state.next_handle += 1;
        let handle = state.next_handle;
        state.open_handles.insert(handle);

        tracing::trace!("create_key {} -> handle {}", path, handle);
        Ok(MemoryKey { handle, path: folded })
    }

    fn close_key(&self, key: &MemoryKey) -> Status {
        let mut state = self.state.lock();
        let known = state.open_handles.remove(&key.handle);
        if let Some(status) = state.take_fault(NativeOp::CloseKey) {
            return status;
        }

        tracing::trace!("close_key handle {}", key.handle);
        if known {
            Status::SUCCESS
        } else {
            Status::INVALID_HANDLE
        }
    }

    fn set_value(&self, key: &MemoryKey, name: &str, value_type: ValueType, data: &[u8]) -> Status {
        let mut state = self.state.lock();
        if let Some(status) = state.take_fault(NativeOp::SetValue) {
            return status;
        }

        let width_ok = match value_type {
            ValueType::Fixed32 => data.len() == 4,
            ValueType::Fixed64 => data.len() == 8,
            _ => true,
        };
        if !width_ok {
            return Status::INVALID_PARAMETER;
        }

        match state.values_mut(key) {
            Ok(values) => {
                upsert(values, name, value_type, data);
                tracing::trace!("set_value {} ({}, {} bytes)", name, value_type, data.len());
                Status::SUCCESS
            }
            Err(status) => status,
        }
    }

    fn query_value(&self, key: &MemoryKey, name: &str, data: Option<&mut [u8]>) -> ValueQuery {
        let mut state = self.state.lock();
        let fault = state.take_fault(NativeOp::QueryValue);
        let missing = |status| ValueQuery {
            status,
            value_type: ValueType::Other(0),
            len: 0,
        };

        let values = match state.values(key) {
            Ok(values) => values,
            Err(status) => return missing(fault.unwrap_or(status)),
        };
        let stored = match find(values, name) {
            Some(idx) => &values[idx],
            None => return missing(fault.unwrap_or(Status::FILE_NOT_FOUND)),
        };

        // An injected status still reports the stored type and length
        let status = match (fault, data) {
            (Some(status), _) => status,
            (None, None) => Status::SUCCESS,
            (None, Some(buf)) if buf.len() < stored.data.len() => Status::MORE_DATA,
            (None, Some(buf)) => {
                buf[..stored.data.len()].copy_from_slice(&stored.data);
                Status::SUCCESS
            }
        };

        ValueQuery {
            status,
            value_type: stored.value_type,
            len: stored.data.len(),
        }
    }

    fn delete_value(&self, key: &MemoryKey, name: &str) -> Status {
        let mut state = self.state.lock();
        if let Some(status) = state.take_fault(NativeOp::DeleteValue) {
            return status;
        }

        match state.values_mut(key) {
            Ok(values) => match find(values, name) {
                Some(idx) => {
                    values.remove(idx);
                    tracing::trace!("delete_value {}", name);
                    Status::SUCCESS
                }
                None => Status::FILE_NOT_FOUND,
            },
            Err(status) => status,
        }
    }

    fn query_info(&self, key: &MemoryKey) -> Result<KeyInfo, Status> {
        let mut state = self.state.lock();
        if let Some(status) = state.take_fault(NativeOp::QueryInfo) {
            return Err(status);
        }

        let values = state.values(key)?;
        let max_value_name_len = values
            .iter()
            .map(|v| v.name.encode_utf16().count() as u32)
            .max()
            .unwrap_or(0);

        Ok(KeyInfo {
            value_count: values.len() as u32,
            max_value_name_len,
        })
    }

    fn enum_value(&self, key: &MemoryKey, index: u32, name: &mut [u16], name_len: &mut u32) -> Status {
        let mut state = self.state.lock();
        if let Some(status) = state.take_fault(NativeOp::EnumValue) {
            return status;
        }
        let reports_more_data = state.enum_reports_more_data;

        let values = match state.values(key) {
            Ok(values) => values,
            Err(status) => return status,
        };
        let stored = match values.get(index as usize) {
            Some(stored) => stored,
            None => return Status::NO_MORE_ITEMS,
        };

        let units: Vec<u16> = stored.name.encode_utf16().collect();
        let capacity = (*name_len as usize).min(name.len());
        if units.len() + 1 > capacity {
            *name_len = 0;
            return Status::MORE_DATA;
        }

        name[..units.len()].copy_from_slice(&units);
        name[units.len()] = 0;
        *name_len = units.len() as u32;

        if reports_more_data {
            Status::MORE_DATA
        } else {
            Status::SUCCESS
        }
    }
}
