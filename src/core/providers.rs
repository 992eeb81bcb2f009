//! Provider traits for the three host signals.
//!
//! Each provider answers one read per poll. A failed read is returned as
//! [`ThresholdError::SignalUnavailable`] and is never retried; the decision
//! engine turns it into an "overloaded" verdict.

use std::sync::Arc;

use async_trait::async_trait;

use super::{Load, MemInfo, ThresholdError, UsageSnapshot};

/// Supplies current load averages.
#[async_trait]
pub trait LoadProvider: Send + Sync {
    /// Read the 1/5/15-minute load averages.
    async fn load(&self) -> Result<Load, ThresholdError>;
}

/// Supplies current memory counters.
#[async_trait]
pub trait MemoryProvider: Send + Sync {
    /// Read total/free/cached memory.
    async fn memory(&self) -> Result<MemInfo, ThresholdError>;
}

/// Supplies the host's current resource consumption.
#[async_trait]
pub trait UsageProvider: Send + Sync {
    /// Read revocable and total consumption.
    async fn usage(&self) -> Result<UsageSnapshot, ThresholdError>;
}

#[async_trait]
impl<T: LoadProvider + ?Sized> LoadProvider for Arc<T> {
    async fn load(&self) -> Result<Load, ThresholdError> {
        (**self).load().await
    }
}

#[async_trait]
impl<T: MemoryProvider + ?Sized> MemoryProvider for Arc<T> {
    async fn memory(&self) -> Result<MemInfo, ThresholdError> {
        (**self).memory().await
    }
}

#[async_trait]
impl<T: UsageProvider + ?Sized> UsageProvider for Arc<T> {
    async fn usage(&self) -> Result<UsageSnapshot, ThresholdError> {
        (**self).usage().await
    }
}
