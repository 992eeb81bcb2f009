//! Threshold-based resource estimator.
//!
//! Answers "how much revocable capacity may be advertised right now?". The
//! answer is the configured capacity minus what best-effort work already
//! holds, or nothing at all while the host is overloaded.

use super::{
    LoadProvider, MemoryProvider, Resources, SignalSnapshot, Thresholds, UsageProvider, Verdict,
};

/// Computes oversubscribable capacity from host signals.
///
/// Holds no state between polls; every call to [`estimate`](Self::estimate)
/// reads the providers afresh.
pub struct ThresholdResourceEstimator<L, M, U> {
    load: L,
    memory: M,
    usage: U,
    capacity: Resources,
    thresholds: Thresholds,
}

impl<L, M, U> ThresholdResourceEstimator<L, M, U>
where
    L: LoadProvider,
    M: MemoryProvider,
    U: UsageProvider,
{
    /// Create an estimator. `capacity` is the most that will ever be offered.
    pub const fn new(load: L, memory: M, usage: U, capacity: Resources, thresholds: Thresholds) -> Self {
        Self {
            load,
            memory,
            usage,
            capacity,
            thresholds,
        }
    }

    /// Configured capacity.
    pub const fn capacity(&self) -> &Resources {
        &self.capacity
    }

    /// Configured thresholds.
    pub const fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Capacity that may currently be offered as revocable.
    ///
    /// Empty when the configured capacity is empty, when the host is
    /// overloaded, or when any signal cannot be read. Never fails.
    pub async fn estimate(&self) -> Resources {
        if self.capacity.is_empty() {
            tracing::debug!("no oversubscribable capacity configured");
            return Resources::empty();
        }

        let snapshot = SignalSnapshot::collect(&self.load, &self.memory, &self.usage).await;
        self.estimate_from(&snapshot)
    }

    /// Apply the estimate rules to an already collected snapshot.
    pub fn estimate_from(&self, snapshot: &SignalSnapshot) -> Resources {
        if self.capacity.is_empty() {
            return Resources::empty();
        }

        match (snapshot.assess(&self.thresholds), &snapshot.usage) {
            (Verdict::Overloaded(reason), _) => {
                tracing::warn!(%reason, "host overloaded, offering no revocable resources");
                Resources::empty()
            }
            (Verdict::Healthy, Ok(usage)) => {
                let available = self.capacity.saturating_sub(&usage.revocable);
                tracing::info!(
                    capacity = %self.capacity,
                    revocable = %usage.revocable,
                    available = %available,
                    "oversubscribable resources estimated"
                );
                available
            }
            // assess() never reports Healthy without usage
            (Verdict::Healthy, Err(_)) => Resources::empty(),
        }
    }
}
