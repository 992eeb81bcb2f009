//! Threshold-based QoS controller.
//!
//! Answers "must running revocable work be reclaimed right now?". The only
//! correction this controller issues is "kill all revocable work"; there is
//! no per-task targeting.

use serde::{Deserialize, Serialize};

use super::{
    LoadProvider, MemoryProvider, Resources, SignalSnapshot, Thresholds, UsageProvider, Verdict,
};

/// What the host must do when it receives a [`Correction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionAction {
    /// Terminate every best-effort task on the host.
    KillAllRevocable,
}

/// Instruction to reclaim all revocable resources on the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    /// Action to perform.
    pub action: CorrectionAction,
    /// Revocable consumption observed when the correction was issued.
    pub revocable: Resources,
}

impl Correction {
    /// Kill-all-revocable correction for the observed consumption.
    #[must_use]
    pub const fn kill_all_revocable(revocable: Resources) -> Self {
        Self {
            action: CorrectionAction::KillAllRevocable,
            revocable,
        }
    }
}

/// Decides whether revocable work must be reclaimed.
pub struct ThresholdQoSController<L, M, U> {
    load: L,
    memory: M,
    usage: U,
    thresholds: Thresholds,
}

impl<L, M, U> ThresholdQoSController<L, M, U>
where
    L: LoadProvider,
    M: MemoryProvider,
    U: UsageProvider,
{
    /// Create a controller.
    pub const fn new(load: L, memory: M, usage: U, thresholds: Thresholds) -> Self {
        Self {
            load,
            memory,
            usage,
            thresholds,
        }
    }

    /// Configured thresholds.
    pub const fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Zero or one correction for this poll.
    pub async fn corrections(&self) -> Vec<Correction> {
        let snapshot = SignalSnapshot::collect(&self.load, &self.memory, &self.usage).await;
        self.corrections_from(&snapshot)
    }

    /// Apply the correction rules to an already collected snapshot.
    pub fn corrections_from(&self, snapshot: &SignalSnapshot) -> Vec<Correction> {
        let reason = match snapshot.assess(&self.thresholds) {
            Verdict::Healthy => {
                tracing::debug!("host within thresholds, no corrections");
                return Vec::new();
            }
            Verdict::Overloaded(reason) => reason,
        };

        let Ok(usage) = &snapshot.usage else {
            tracing::warn!(%reason, "host overloaded but revocable usage unknown, no corrections");
            return Vec::new();
        };
        if usage.revocable.is_empty() {
            tracing::debug!(%reason, "host overloaded but no revocable work running");
            return Vec::new();
        }

        tracing::info!(
            %reason,
            revocable = %usage.revocable,
            "host overloaded, reclaiming all revocable resources"
        );
        vec![Correction::kill_all_revocable(usage.revocable.clone())]
    }
}
