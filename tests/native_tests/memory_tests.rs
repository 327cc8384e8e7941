//! Tests for InMemoryRegistry
//!
//! These tests verify the emulated native semantics the store relies on:
//! - Status codes for missing values, short buffers and closed handles
//! - Index enumeration, including the shift caused by deleting mid-walk
//! - Key metadata
//! - Fault injection

use regkv::native::{InMemoryRegistry, NativeOp, Registry, Status, ValueType};

const PATH: &str = "SOFTWARE\\regkv-tests\\memory";

// =============================================================================
// Helper Functions
// =============================================================================

fn enum_name(registry: &InMemoryRegistry, key: &<InMemoryRegistry as Registry>::Key, index: u32) -> (Status, String) {
    let mut name = vec![0u16; 64];
    let mut name_len = name.len() as u32;
    let status = registry.enum_value(key, index, &mut name, &mut name_len);
    (status, String::from_utf16_lossy(&name[..name_len as usize]))
}

// =============================================================================
// Value Tests
// =============================================================================

#[test]
fn test_query_missing_value() {
    let registry = InMemoryRegistry::new();
    let key = registry.create_key(PATH).unwrap();

    let query = registry.query_value(&key, "nope", None);

    assert_eq!(query.status, Status::FILE_NOT_FOUND);
    assert_eq!(registry.close_key(&key), Status::SUCCESS);
}

#[test]
fn test_query_reports_length_without_buffer() {
    let registry = InMemoryRegistry::new();
    let key = registry.create_key(PATH).unwrap();
    registry.set_value(&key, "v", ValueType::Fixed64, &[0; 8]);

    let query = registry.query_value(&key, "v", None);

    assert_eq!(query.status, Status::SUCCESS);
    assert_eq!(query.value_type, ValueType::Fixed64);
    assert_eq!(query.len, 8);
}

#[test]
fn test_short_buffer_is_more_data() {
    let registry = InMemoryRegistry::new();
    let key = registry.create_key(PATH).unwrap();
    registry.set_value(&key, "v", ValueType::Fixed64, &[1; 8]);

    let mut buf = [0u8; 4];
    let query = registry.query_value(&key, "v", Some(&mut buf[..]));

    assert_eq!(query.status, Status::MORE_DATA);
    assert_eq!(query.value_type, ValueType::Fixed64);
    assert_eq!(query.len, 8);
    assert_eq!(buf, [0; 4]);
}

#[test]
fn test_fixed_cell_width_is_enforced() {
    let registry = InMemoryRegistry::new();
    let key = registry.create_key(PATH).unwrap();

    assert_eq!(
        registry.set_value(&key, "v", ValueType::Fixed32, &[0; 8]),
        Status::INVALID_PARAMETER
    );
    assert_eq!(
        registry.set_value(&key, "v", ValueType::Fixed64, &[0; 8]),
        Status::SUCCESS
    );
}

#[test]
fn test_delete_missing_value() {
    let registry = InMemoryRegistry::new();
    let key = registry.create_key(PATH).unwrap();

    assert_eq!(registry.delete_value(&key, "nope"), Status::FILE_NOT_FOUND);
}

#[test]
fn test_closed_handle_is_invalid() {
    let registry = InMemoryRegistry::new();
    let key = registry.create_key(PATH).unwrap();
    registry.close_key(&key);

    assert_eq!(
        registry.set_value(&key, "v", ValueType::Fixed32, &[0; 4]),
        Status::INVALID_HANDLE
    );
    assert_eq!(registry.close_key(&key), Status::INVALID_HANDLE);
}

#[test]
fn test_keys_are_isolated_and_case_insensitive() {
    let registry = InMemoryRegistry::new();
    let a = registry.create_key("SOFTWARE\\App\\A").unwrap();
    let b = registry.create_key("SOFTWARE\\App\\B").unwrap();
    registry.set_value(&a, "v", ValueType::Fixed32, &[1, 0, 0, 0]);

    assert_eq!(registry.query_value(&b, "v", None).status, Status::FILE_NOT_FOUND);
    assert!(registry.key_exists("software\\app\\a"));
}

// =============================================================================
// Enumeration Tests
// =============================================================================

#[test]
fn test_enumerate_in_creation_order() {
    let registry = InMemoryRegistry::new();
    let key = registry.create_key(PATH).unwrap();
    for name in ["one", "two", "three"] {
        registry.set_value(&key, name, ValueType::Fixed32, &[0; 4]);
    }

    assert_eq!(enum_name(&registry, &key, 0), (Status::SUCCESS, "one".to_string()));
    assert_eq!(enum_name(&registry, &key, 2), (Status::SUCCESS, "three".to_string()));
    assert_eq!(enum_name(&registry, &key, 3).0, Status::NO_MORE_ITEMS);
}

#[test]
fn test_deleting_during_enumeration_skips_entries() {
    let registry = InMemoryRegistry::new();
    let key = registry.create_key(PATH).unwrap();
    for name in ["a", "b", "c", "d"] {
        registry.set_value(&key, name, ValueType::Fixed32, &[0; 4]);
    }

    // Interleaved delete-while-walking leaves every other entry behind
    let mut index = 0;
    loop {
        let (status, name) = enum_name(&registry, &key, index);
        if status == Status::NO_MORE_ITEMS {
            break;
        }
        registry.delete_value(&key, &name);
        index += 1;
    }

    assert_eq!(registry.query_info(&key).unwrap().value_count, 2);
}

#[test]
fn test_enumerate_with_short_buffer() {
    let registry = InMemoryRegistry::new();
    let key = registry.create_key(PATH).unwrap();
    registry.set_value(&key, "longer_name", ValueType::Fixed32, &[0; 4]);

    let mut name = vec![0u16; 4];
    let mut name_len = name.len() as u32;
    let status = registry.enum_value(&key, 0, &mut name, &mut name_len);

    assert_eq!(status, Status::MORE_DATA);
    assert_eq!(name_len, 0);
}

#[test]
fn test_enumerate_honours_counter_not_buffer() {
    let registry = InMemoryRegistry::new();
    let key = registry.create_key(PATH).unwrap();
    registry.set_value(&key, "abcdef", ValueType::Fixed32, &[0; 4]);

    // Big buffer, but a counter shrunk by an earlier call
    let mut name = vec![0u16; 64];
    let mut name_len = 3;
    let status = registry.enum_value(&key, 0, &mut name, &mut name_len);

    assert_eq!(status, Status::MORE_DATA);
}

#[test]
fn test_query_info_reports_longest_name() {
    let registry = InMemoryRegistry::new();
    let key = registry.create_key(PATH).unwrap();
    registry.set_value(&key, "ab", ValueType::Fixed32, &[0; 4]);
    registry.set_value(&key, "abcdefg", ValueType::Fixed32, &[0; 4]);
    registry.set_value(&key, "☃", ValueType::Fixed32, &[0; 4]);

    let info = registry.query_info(&key).unwrap();

    assert_eq!(info.value_count, 3);
    assert_eq!(info.max_value_name_len, 7);
}

// =============================================================================
// Fault Injection Tests
// =============================================================================

#[test]
fn test_fault_is_one_shot() {
    let registry = InMemoryRegistry::new();
    registry.inject_fault(NativeOp::CreateKey, Status::ACCESS_DENIED);

    assert_eq!(registry.create_key(PATH).unwrap_err(), Status::ACCESS_DENIED);
    assert!(registry.create_key(PATH).is_ok());
}

#[test]
fn test_fault_after_skips() {
    let registry = InMemoryRegistry::new();
    let key = registry.create_key(PATH).unwrap();
    registry.inject_fault_after(NativeOp::SetValue, 2, Status::ACCESS_DENIED);

    assert_eq!(registry.set_value(&key, "a", ValueType::Fixed32, &[0; 4]), Status::SUCCESS);
    assert_eq!(registry.set_value(&key, "b", ValueType::Fixed32, &[0; 4]), Status::SUCCESS);
    assert_eq!(
        registry.set_value(&key, "c", ValueType::Fixed32, &[0; 4]),
        Status::ACCESS_DENIED
    );
    assert_eq!(registry.query_info(&key).unwrap().value_count, 2);
}

#[test]
fn test_clear_faults() {
    let registry = InMemoryRegistry::new();
    registry.inject_fault(NativeOp::CreateKey, Status::ACCESS_DENIED);
    registry.clear_faults();

    assert!(registry.create_key(PATH).is_ok());
}

#[test]
fn test_failed_close_still_releases_handle() {
    let registry = InMemoryRegistry::new();
    let key = registry.create_key(PATH).unwrap();
    registry.inject_fault(NativeOp::CloseKey, Status::INVALID_HANDLE);

    assert_eq!(registry.close_key(&key), Status::INVALID_HANDLE);
    assert_eq!(registry.open_handle_count(), 0);
}
