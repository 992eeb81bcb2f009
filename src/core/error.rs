//! Error types for threshold decisions and configuration.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Host signal consulted by the decision engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// 1/5/15-minute load averages.
    Load,
    /// Total/free/cached memory counters.
    Memory,
    /// Resource usage split into revocable and total consumption.
    Usage,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load => write!(f, "load"),
            Self::Memory => write!(f, "memory"),
            Self::Usage => write!(f, "usage"),
        }
    }
}

/// Errors produced by providers and configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThresholdError {
    /// A provider could not produce a reading.
    #[error("{signal} signal unavailable: {reason}")]
    SignalUnavailable {
        /// Which signal failed.
        signal: Signal,
        /// Provider-supplied context.
        reason: String,
    },
    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ThresholdError {
    /// Shorthand for a [`ThresholdError::SignalUnavailable`].
    pub fn unavailable(signal: Signal, reason: impl Into<String>) -> Self {
        Self::SignalUnavailable {
            signal,
            reason: reason.into(),
        }
    }
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
