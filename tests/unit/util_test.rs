//! Tests for utility functions

use threshold_oversubscription::util::{format_bytes, init_tracing, init_tracing_with_default, kilobytes, megabytes};

#[test]
fn test_byte_units() {
    assert_eq!(kilobytes(1), 1024);
    assert_eq!(megabytes(1), 1024 * 1024);
    assert_eq!(megabytes(384), 402_653_184);
}

#[test]
fn test_format_bytes() {
    assert_eq!(format_bytes(megabytes(512)), "512MB");
    assert_eq!(format_bytes(1000), "1000B");
}

#[test]
fn test_init_tracing_is_idempotent() {
    init_tracing_with_default("threshold_oversubscription=debug");
    init_tracing();
    init_tracing();
    tracing::info!("tracing initialized");
}
