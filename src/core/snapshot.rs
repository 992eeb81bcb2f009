//! One consistent read of all three host signals.

use futures::join;

use super::predicate::{assess, Verdict};
use super::{
    Load, LoadProvider, MemInfo, MemoryProvider, ThresholdError, Thresholds, UsageProvider,
    UsageSnapshot,
};

/// Results of one poll of the load, memory and usage providers.
///
/// Failures are kept as values; they are inputs to the predicate, not errors
/// for the caller.
#[derive(Debug, Clone)]
pub struct SignalSnapshot {
    /// Load read.
    pub load: Result<Load, ThresholdError>,
    /// Memory read.
    pub memory: Result<MemInfo, ThresholdError>,
    /// Usage read.
    pub usage: Result<UsageSnapshot, ThresholdError>,
}

impl SignalSnapshot {
    /// Read all three providers concurrently and wait for every read to
    /// complete or fail.
    pub async fn collect<L, M, U>(load: &L, memory: &M, usage: &U) -> Self
    where
        L: LoadProvider + ?Sized,
        M: MemoryProvider + ?Sized,
        U: UsageProvider + ?Sized,
    {
        let (usage, load, memory) = join!(usage.usage(), load.load(), memory.memory());

        for err in [usage.as_ref().err(), load.as_ref().err(), memory.as_ref().err()]
            .into_iter()
            .flatten()
        {
            tracing::warn!(error = %err, "signal read failed");
        }

        Self {
            load,
            memory,
            usage,
        }
    }

    /// Evaluate the overload predicate against `thresholds`.
    #[must_use]
    pub fn assess(&self, thresholds: &Thresholds) -> Verdict {
        assess(&self.load, &self.memory, &self.usage, thresholds)
    }
}
