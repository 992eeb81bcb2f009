//! Threshold decision engine: signals, predicate, estimator and controller.

pub mod controller;
pub mod error;
pub mod estimator;
pub mod predicate;
pub mod providers;
pub mod resources;
pub mod signals;
pub mod snapshot;

pub use controller::{Correction, CorrectionAction, ThresholdQoSController};
pub use error::{AppResult, Signal, ThresholdError};
pub use estimator::ThresholdResourceEstimator;
pub use predicate::{assess, is_overloaded, reclaimable_memory, LoadWindow, OverloadReason, Verdict};
pub use providers::{LoadProvider, MemoryProvider, UsageProvider};
pub use resources::Resources;
pub use signals::{Load, MemInfo, Thresholds, UsageSnapshot};
pub use snapshot::SignalSnapshot;
