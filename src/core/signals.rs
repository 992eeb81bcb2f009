//! Host signal snapshots and the thresholds they are judged against.

use serde::{Deserialize, Serialize};

use super::Resources;

/// 1/5/15-minute load averages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Load {
    /// One-minute average.
    pub one: f64,
    /// Five-minute average.
    pub five: f64,
    /// Fifteen-minute average.
    pub fifteen: f64,
}

impl Load {
    /// Build a load triple.
    #[must_use]
    pub const fn new(one: f64, five: f64, fifteen: f64) -> Self {
        Self { one, five, fifteen }
    }
}

/// Memory counters in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemInfo {
    /// Total physical memory.
    pub total: u64,
    /// Unused memory.
    pub free: u64,
    /// Page cache, reclaimable under pressure.
    pub cached: u64,
}

impl MemInfo {
    /// Build a memory snapshot.
    #[must_use]
    pub const fn new(total: u64, free: u64, cached: u64) -> Self {
        Self { total, free, cached }
    }
}

/// Resources consumed on the host at poll time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageSnapshot {
    /// Consumed by best-effort (revocable) work.
    pub revocable: Resources,
    /// Consumed by all work. Informational; no decision reads it.
    pub total: Resources,
}

impl UsageSnapshot {
    /// Build a usage snapshot.
    #[must_use]
    pub const fn new(revocable: Resources, total: Resources) -> Self {
        Self { revocable, total }
    }
}

/// Load ceilings and memory floor. Fixed for a component's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Per-window load ceilings; exceeding any one marks the host overloaded.
    pub load: Load,
    /// Minimum reclaimable-equivalent free memory in bytes.
    pub memory_floor: u64,
}

impl Thresholds {
    /// Build thresholds from load ceilings and a memory floor in bytes.
    #[must_use]
    pub const fn new(load: Load, memory_floor: u64) -> Self {
        Self { load, memory_floor }
    }
}
