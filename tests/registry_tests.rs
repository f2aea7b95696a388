//! Tests for the static MBA command registry.

use bqmba_rs::registry::{lookup, registry, AccessMode, DisplayFormat};

/// Tests the protocol-critical sub-command codes and payloads.
#[test]
fn test_registry_wire_contract() {
    let unseal1 = lookup("UnsealKey1").unwrap();
    assert_eq!(unseal1.sub_command, 0x7EE0);
    assert_eq!(unseal1.access, AccessMode::Write);

    assert_eq!(lookup("UnsealKey2").unwrap().sub_command, 0xCCDF);

    let clear = lookup("ClearPF2").unwrap();
    assert_eq!(clear.sub_command, 0x4062);
    assert_eq!(clear.write_data.as_slice(), &[0x01, 0x23, 0x45, 0x67]);
    assert_eq!(clear.write_len(), 4);

    let read_back = lookup("PF2RegisterRead").unwrap();
    assert_eq!(read_back.sub_command, 0x4062);
    assert!(read_back.is_readable());
}

/// Tests that lookups are exact and case-sensitive.
#[test]
fn test_lookup_misses() {
    assert!(lookup("").is_none());
    assert!(lookup("devicetype").is_none());
    assert!(lookup("DEVICETYPE").is_none());
    assert!(lookup(" DeviceType").is_none());
    assert!(lookup("NoSuchCommand").is_none());
}

/// Tests that repeated lookups return the very same descriptor.
#[test]
fn test_lookup_is_stable() {
    let a = lookup("SafetyStatus").unwrap();
    let b = registry().lookup("SafetyStatus").unwrap();
    assert!(std::ptr::eq(a, b));
}

/// Tests iteration order and unique names.
#[test]
fn test_iteration() {
    let names: Vec<&str> = registry().names().collect();
    assert_eq!(names.len(), registry().len());
    assert_eq!(names.first(), Some(&"DeviceType"));
    assert_eq!(names.last(), Some(&"ClearPF2"));

    let mut sorted = names.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), names.len());
}

/// Tests that every status word is a contiguous, byte-aligned bit table.
#[test]
fn test_bit_tables_are_contiguous() {
    for cmd in registry().iter().filter(|c| !c.bit_fields.is_empty()) {
        assert_eq!(cmd.total_bits() % 8, 0, "{}", cmd.name);
        assert_eq!(cmd.format, DisplayFormat::Binary, "{}", cmd.name);
        for (i, field) in cmd.bit_fields.iter().enumerate() {
            assert_eq!(field.bit_index as usize, i, "{}", cmd.name);
        }
    }
}

/// Tests that write commands carry no read-side metadata.
#[test]
fn test_write_commands() {
    for cmd in registry().iter().filter(|c| c.access == AccessMode::Write) {
        assert!(!cmd.is_readable());
        assert!(cmd.bit_fields.is_empty(), "{}", cmd.name);
    }
}

/// Tests the JSON form used by `bqmba list --json`.
#[test]
fn test_registry_serializes() {
    let json = serde_json::to_value(registry()).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), registry().len());

    let clear = entries
        .iter()
        .find(|e| e["name"] == "ClearPF2")
        .unwrap();
    assert_eq!(clear["sub_command"], 0x4062);
    assert_eq!(clear["write_data"], serde_json::json!([1, 35, 69, 103]));
    assert_eq!(clear["access"], "Write");
}
