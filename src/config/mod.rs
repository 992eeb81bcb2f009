//! Configuration models for capacity, thresholds and polling.

pub mod oversubscription;

pub use oversubscription::{
    CapacityConfig, OversubscriptionConfig, PollingConfig, ThresholdsConfig, ENV_PREFIX,
};
