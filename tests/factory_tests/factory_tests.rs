//! Tests for StoreFactory and Config
//!
//! These tests verify:
//! - Root key path derivation with and without an instance name
//! - Config defaults and builder
//! - Rejection of unusable path segments
//! - Isolation between stores from one factory

use std::sync::Arc;

use regkv::config::Config;
use regkv::native::InMemoryRegistry;
use regkv::{Settings, StoreError, StoreFactory};

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_factory(parent: &str) -> (Arc<InMemoryRegistry>, StoreFactory<InMemoryRegistry>) {
    let registry = Arc::new(InMemoryRegistry::new());
    let config = Config::builder().parent_name(parent).build();
    (Arc::clone(&registry), StoreFactory::new(registry, config))
}

// =============================================================================
// Config Tests
// =============================================================================

#[test]
fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.namespace_prefix, "SOFTWARE");
    assert_eq!(config.parent_name, "regkv");
    assert_eq!(config.parent_path(), "SOFTWARE\\regkv");
}

#[test]
fn test_config_builder() {
    let config = Config::builder()
        .namespace_prefix("SOFTWARE\\Vendor")
        .parent_name("MyApp")
        .build();

    assert_eq!(config.parent_path(), "SOFTWARE\\Vendor\\MyApp");
}

// =============================================================================
// Path Derivation Tests
// =============================================================================

#[test]
fn test_create_without_instance() {
    let (_registry, factory) = setup_factory("MyApp");

    let store = factory.create(None).unwrap();

    assert_eq!(store.root_key_name(), "SOFTWARE\\MyApp");
}

#[test]
fn test_create_with_instance() {
    let (_registry, factory) = setup_factory("MyApp");

    let store = factory.create(Some("window")).unwrap();

    assert_eq!(store.root_key_name(), "SOFTWARE\\MyApp\\window");
}

#[test]
fn test_store_writes_under_derived_path() {
    let (registry, factory) = setup_factory("MyApp");
    let store = factory.create(Some("prefs")).unwrap();

    store.put_i32("count", 42).unwrap();

    assert!(registry.key_exists("SOFTWARE\\MyApp\\prefs"));
    assert!(registry.raw_value("SOFTWARE\\MyApp\\prefs", "count").is_some());
}

#[test]
fn test_create_does_not_touch_registry() {
    let (registry, factory) = setup_factory("MyApp");

    factory.create(Some("lazy")).unwrap();

    assert!(!registry.key_exists("SOFTWARE\\MyApp\\lazy"));
}

// =============================================================================
// Validation Tests
// =============================================================================

#[test]
fn test_empty_parent_rejected() {
    let (_registry, factory) = setup_factory("");

    let err = factory.create(None).unwrap_err();

    assert!(matches!(err, StoreError::Config(_)));
}

#[test]
fn test_empty_instance_rejected() {
    let (_registry, factory) = setup_factory("MyApp");

    assert!(matches!(factory.create(Some("")), Err(StoreError::Config(_))));
}

#[test]
fn test_backslash_edges_rejected() {
    let (_registry, factory) = setup_factory("MyApp");

    assert!(matches!(factory.create(Some("\\lead")), Err(StoreError::Config(_))));
    assert!(matches!(factory.create(Some("trail\\")), Err(StoreError::Config(_))));
}

#[test]
fn test_nested_instance_allowed() {
    let (_registry, factory) = setup_factory("MyApp");

    let store = factory.create(Some("profiles\\default")).unwrap();

    assert_eq!(store.root_key_name(), "SOFTWARE\\MyApp\\profiles\\default");
}

// =============================================================================
// Isolation Tests
// =============================================================================

#[test]
fn test_instances_are_isolated() {
    let (_registry, factory) = setup_factory("MyApp");
    let parent = factory.create(None).unwrap();
    let child = factory.create(Some("child")).unwrap();

    parent.put_string("who", "parent").unwrap();
    child.put_string("who", "child").unwrap();
    child.clear().unwrap();

    assert_eq!(parent.get_string("who").unwrap().as_deref(), Some("parent"));
    assert_eq!(child.get_string("who").unwrap(), None);
}
