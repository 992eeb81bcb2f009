//! Tests for component builders

use std::sync::Arc;

use threshold_oversubscription::builders::{build_components, build_controller, build_estimator};
use threshold_oversubscription::config::{
    CapacityConfig, OversubscriptionConfig, PollingConfig, ThresholdsConfig,
};
use threshold_oversubscription::core::{Load, MemInfo, Resources, ThresholdError};
use threshold_oversubscription::infra::manual::{ManualLoad, ManualMemory, ManualUsage};
use threshold_oversubscription::util::megabytes;

fn config() -> OversubscriptionConfig {
    OversubscriptionConfig {
        capacity: CapacityConfig {
            cpus: 2.0,
            mem_mb: 512,
            ..CapacityConfig::default()
        },
        thresholds: ThresholdsConfig {
            load_one: 4.0,
            load_five: 3.0,
            load_fifteen: 2.0,
            memory_floor_mb: 384,
        },
        polling: PollingConfig::default(),
    }
}

fn providers() -> (Arc<ManualLoad>, Arc<ManualMemory>, Arc<ManualUsage>) {
    let used = Resources::new(1.5, megabytes(128));
    (
        Arc::new(ManualLoad::new(Load::new(3.9, 2.9, 1.9))),
        Arc::new(ManualMemory::new(MemInfo::new(megabytes(512), megabytes(64), megabytes(256)))),
        Arc::new(ManualUsage::new(used.clone(), used)),
    )
}

#[test]
fn test_build_estimator_from_config() {
    let (load, memory, usage) = providers();
    let estimator = build_estimator(&config(), load, memory, usage).unwrap();
    assert_eq!(estimator.capacity(), &Resources::new(2.0, megabytes(512)));
    assert_eq!(estimator.thresholds().memory_floor, megabytes(384));
}

#[test]
fn test_build_controller_from_config() {
    let (load, memory, usage) = providers();
    let controller = build_controller(&config(), load, memory, usage).unwrap();
    assert_eq!(controller.thresholds().load, Load::new(4.0, 3.0, 2.0));
}

#[test]
fn test_build_rejects_invalid_config() {
    let mut cfg = config();
    cfg.thresholds.load_one = f64::NAN;
    let (load, memory, usage) = providers();
    let result = build_estimator(&cfg, load, memory, usage);
    assert!(matches!(result, Err(ThresholdError::InvalidConfig(_))));
}

#[tokio::test]
async fn test_components_share_providers() {
    let (load, memory, usage) = providers();
    let components = build_components(&config(), Arc::clone(&load), memory, usage).unwrap();

    assert_eq!(
        components.estimator.estimate().await,
        Resources::new(0.5, megabytes(384))
    );
    assert!(components.controller.corrections().await.is_empty());

    load.set(3.9, 2.9, 10.0);
    assert!(components.estimator.estimate().await.is_empty());
    assert_eq!(components.controller.corrections().await.len(), 1);
    assert_eq!(load.reads(), 4);
}
