//! Tests for configuration validation

use threshold_oversubscription::config::{
    CapacityConfig, OversubscriptionConfig, PollingConfig, ThresholdsConfig,
};
use threshold_oversubscription::core::{Load, Resources};
use threshold_oversubscription::util::megabytes;

fn thresholds() -> ThresholdsConfig {
    ThresholdsConfig {
        load_one: 4.0,
        load_five: 3.0,
        load_fifteen: 2.0,
        memory_floor_mb: 384,
    }
}

fn valid() -> OversubscriptionConfig {
    OversubscriptionConfig {
        capacity: CapacityConfig {
            cpus: 2.0,
            mem_mb: 512,
            ..CapacityConfig::default()
        },
        thresholds: thresholds(),
        polling: PollingConfig::default(),
    }
}

#[test]
fn test_config_validation() {
    assert!(valid().validate().is_ok());
}

#[test]
fn test_empty_capacity_is_valid() {
    let cfg = OversubscriptionConfig {
        capacity: CapacityConfig::default(),
        ..valid()
    };
    assert!(cfg.validate().is_ok());
    assert!(cfg.capacity.resources().is_empty());
}

#[test]
fn test_negative_capacity_rejected() {
    let mut cfg = valid();
    cfg.capacity.cpus = -1.0;
    assert!(cfg.validate().is_err());

    let mut cfg = valid();
    cfg.capacity.scalars.insert("disk".to_string(), f64::NAN);
    assert!(cfg.validate().is_err());
}

#[test]
fn test_invalid_load_threshold() {
    let mut cfg = valid();
    cfg.thresholds.load_five = -0.5;
    let err = cfg.validate().unwrap_err();
    assert!(err.contains("load_five"));

    let mut cfg = valid();
    cfg.thresholds.load_fifteen = f64::INFINITY;
    assert!(cfg.validate().is_err());
}

#[test]
fn test_invalid_polling() {
    let mut cfg = valid();
    cfg.polling.estimate_interval_ms = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = valid();
    cfg.polling.correction_interval_ms = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = valid();
    cfg.polling.poll_timeout_ms = Some(0);
    assert!(cfg.validate().is_err());
}

#[test]
fn test_thresholds_conversion() {
    let t = thresholds().thresholds();
    assert_eq!(t.load, Load::new(4.0, 3.0, 2.0));
    assert_eq!(t.memory_floor, megabytes(384));
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "capacity": { "cpus": 2.0, "mem_mb": 512 },
        "thresholds": {
            "load_one": 4.0,
            "load_five": 3.0,
            "load_fifteen": 2.0,
            "memory_floor_mb": 384
        },
        "polling": { "estimate_interval_ms": 1000, "poll_timeout_ms": 200 }
    }"#;

    let cfg = OversubscriptionConfig::from_json_str(json).unwrap();
    assert_eq!(cfg.capacity.resources(), Resources::new(2.0, megabytes(512)));
    assert_eq!(cfg.polling.estimate_interval_ms, 1000);
    assert_eq!(cfg.polling.correction_interval_ms, 5000);
    assert_eq!(cfg.polling.poll_timeout_ms, Some(200));
}

#[test]
fn test_config_from_json_without_capacity() {
    let json = r#"{
        "thresholds": {
            "load_one": 4.0,
            "load_five": 3.0,
            "load_fifteen": 2.0,
            "memory_floor_mb": 384
        }
    }"#;

    let cfg = OversubscriptionConfig::from_json_str(json).unwrap();
    assert!(cfg.capacity.resources().is_empty());
}

#[test]
fn test_config_from_json_rejects_invalid() {
    assert!(OversubscriptionConfig::from_json_str("{}").is_err());
    let json = r#"{
        "thresholds": {
            "load_one": -4.0,
            "load_five": 3.0,
            "load_fifteen": 2.0,
            "memory_floor_mb": 384
        }
    }"#;
    assert!(OversubscriptionConfig::from_json_str(json).is_err());
}

#[test]
fn test_config_json_roundtrip() {
    let cfg = valid();
    let json = serde_json::to_string(&cfg).unwrap();
    assert_eq!(OversubscriptionConfig::from_json_str(&json).unwrap(), cfg);
}

#[test]
fn test_config_from_file() {
    let path = std::env::temp_dir().join(format!("oversub-config-{}.json", std::process::id()));
    std::fs::write(&path, serde_json::to_string(&valid()).unwrap()).unwrap();
    let cfg = OversubscriptionConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(cfg, valid());

    let err = OversubscriptionConfig::from_file("/nonexistent/oversub.json").unwrap_err();
    assert!(err.to_string().contains("reading config"));
}
