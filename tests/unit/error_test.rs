//! Tests for error types

use threshold_oversubscription::core::{Signal, ThresholdError};

#[test]
fn test_signal_unavailable_error() {
    let err = ThresholdError::unavailable(Signal::Load, "/proc/loadavg: permission denied");
    assert_eq!(
        format!("{}", err),
        "load signal unavailable: /proc/loadavg: permission denied"
    );
}

#[test]
fn test_invalid_config_error() {
    let err = ThresholdError::InvalidConfig("load_one must be a non-negative number".to_string());
    assert_eq!(
        format!("{}", err),
        "invalid configuration: load_one must be a non-negative number"
    );
}

#[test]
fn test_signal_display() {
    assert_eq!(Signal::Load.to_string(), "load");
    assert_eq!(Signal::Memory.to_string(), "memory");
    assert_eq!(Signal::Usage.to_string(), "usage");
}
