//! Builders to construct the estimator and controller from configuration.

use crate::config::OversubscriptionConfig;
use crate::core::{
    LoadProvider, MemoryProvider, ThresholdError, ThresholdQoSController,
    ThresholdResourceEstimator, UsageProvider,
};

/// Estimator and controller built from one configuration and sharing
/// provider handles.
pub struct Components<L, M, U> {
    /// Answers the resource-offer loop.
    pub estimator: ThresholdResourceEstimator<L, M, U>,
    /// Answers the QoS enforcement loop.
    pub controller: ThresholdQoSController<L, M, U>,
}

fn validated(cfg: &OversubscriptionConfig) -> Result<(), ThresholdError> {
    cfg.validate()
        .map_err(|e| ThresholdError::InvalidConfig(format!("config invalid: {e}")))
}

/// Build an estimator from validated configuration.
pub fn build_estimator<L, M, U>(
    cfg: &OversubscriptionConfig,
    load: L,
    memory: M,
    usage: U,
) -> Result<ThresholdResourceEstimator<L, M, U>, ThresholdError>
where
    L: LoadProvider,
    M: MemoryProvider,
    U: UsageProvider,
{
    validated(cfg)?;
    let capacity = cfg.capacity.resources();
    tracing::info!(
        capacity = %capacity,
        thresholds = ?cfg.thresholds,
        "threshold resource estimator configured"
    );
    Ok(ThresholdResourceEstimator::new(
        load,
        memory,
        usage,
        capacity,
        cfg.thresholds.thresholds(),
    ))
}

/// Build a QoS controller from validated configuration.
pub fn build_controller<L, M, U>(
    cfg: &OversubscriptionConfig,
    load: L,
    memory: M,
    usage: U,
) -> Result<ThresholdQoSController<L, M, U>, ThresholdError>
where
    L: LoadProvider,
    M: MemoryProvider,
    U: UsageProvider,
{
    validated(cfg)?;
    tracing::info!(thresholds = ?cfg.thresholds, "threshold QoS controller configured");
    Ok(ThresholdQoSController::new(
        load,
        memory,
        usage,
        cfg.thresholds.thresholds(),
    ))
}

/// Build both components over cloned provider handles (typically `Arc`s).
pub fn build_components<L, M, U>(
    cfg: &OversubscriptionConfig,
    load: L,
    memory: M,
    usage: U,
) -> Result<Components<L, M, U>, ThresholdError>
where
    L: LoadProvider + Clone,
    M: MemoryProvider + Clone,
    U: UsageProvider + Clone,
{
    let estimator = build_estimator(cfg, load.clone(), memory.clone(), usage.clone())?;
    let controller = build_controller(cfg, load, memory, usage)?;
    Ok(Components {
        estimator,
        controller,
    })
}
