//! The overload predicate shared by the estimator and the QoS controller.
//!
//! Rules are evaluated in order and the first one that fires decides:
//!
//! 1. load unreadable
//! 2. any load window above its ceiling
//! 3. memory unreadable
//! 4. usage unreadable
//! 5. `free + cached + revocable.mem` below the memory floor
//!
//! A host that passes all five is healthy. Unreadable signals are treated
//! exactly like violated ones.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Load, MemInfo, Signal, ThresholdError, Thresholds, UsageSnapshot};
use crate::util::bytes::format_bytes;

/// Load-average window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadWindow {
    /// One minute.
    One,
    /// Five minutes.
    Five,
    /// Fifteen minutes.
    Fifteen,
}

impl fmt::Display for LoadWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One => write!(f, "1m"),
            Self::Five => write!(f, "5m"),
            Self::Fifteen => write!(f, "15m"),
        }
    }
}

/// First rule that marked the host overloaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum OverloadReason {
    /// A provider failed to produce a reading.
    Unavailable {
        /// Failing signal.
        signal: Signal,
    },
    /// A load average is above its ceiling.
    LoadExceeded {
        /// Offending window.
        window: LoadWindow,
        /// Observed average.
        value: f64,
        /// Configured ceiling.
        ceiling: f64,
    },
    /// Reclaimable-equivalent free memory is below the floor.
    MemoryBelowFloor {
        /// `free + cached + revocable.mem`, in bytes.
        reclaimable: u64,
        /// Configured floor, in bytes.
        floor: u64,
    },
}

impl fmt::Display for OverloadReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { signal } => write!(f, "{signal} signal unavailable"),
            Self::LoadExceeded {
                window,
                value,
                ceiling,
            } => write!(f, "{window} load {value} exceeds {ceiling}"),
            Self::MemoryBelowFloor { reclaimable, floor } => write!(
                f,
                "reclaimable memory {} below floor {}",
                format_bytes(*reclaimable),
                format_bytes(*floor)
            ),
        }
    }
}

/// Outcome of evaluating the predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "verdict")]
pub enum Verdict {
    /// All signals readable and within bounds.
    Healthy,
    /// The host must not lend more capacity and should reclaim what it lent.
    Overloaded(OverloadReason),
}

impl Verdict {
    /// True for [`Verdict::Overloaded`].
    #[must_use]
    pub const fn is_overloaded(&self) -> bool {
        matches!(self, Self::Overloaded(_))
    }
}

/// NaN readings count as exceeding.
fn exceeds(value: f64, ceiling: f64) -> bool {
    value.is_nan() || value > ceiling
}

fn check_load(load: &Load, ceiling: &Load) -> Option<OverloadReason> {
    [
        (LoadWindow::One, load.one, ceiling.one),
        (LoadWindow::Five, load.five, ceiling.five),
        (LoadWindow::Fifteen, load.fifteen, ceiling.fifteen),
    ]
    .into_iter()
    .find(|(_, value, ceiling)| exceeds(*value, *ceiling))
    .map(|(window, value, ceiling)| OverloadReason::LoadExceeded {
        window,
        value,
        ceiling,
    })
}

/// Free memory plus cache plus memory held by revocable work.
#[must_use]
pub fn reclaimable_memory(memory: &MemInfo, usage: &UsageSnapshot) -> u64 {
    memory
        .free
        .saturating_add(memory.cached)
        .saturating_add(usage.revocable.mem)
}

/// Evaluate the overload rules and report which one fired, if any.
#[must_use]
pub fn assess(
    load: &Result<Load, ThresholdError>,
    memory: &Result<MemInfo, ThresholdError>,
    usage: &Result<UsageSnapshot, ThresholdError>,
    thresholds: &Thresholds,
) -> Verdict {
    let Ok(load) = load else {
        return Verdict::Overloaded(OverloadReason::Unavailable {
            signal: Signal::Load,
        });
    };
    if let Some(reason) = check_load(load, &thresholds.load) {
        return Verdict::Overloaded(reason);
    }

    let Ok(memory) = memory else {
        return Verdict::Overloaded(OverloadReason::Unavailable {
            signal: Signal::Memory,
        });
    };
    let Ok(usage) = usage else {
        return Verdict::Overloaded(OverloadReason::Unavailable {
            signal: Signal::Usage,
        });
    };

    let reclaimable = reclaimable_memory(memory, usage);
    if reclaimable < thresholds.memory_floor {
        return Verdict::Overloaded(OverloadReason::MemoryBelowFloor {
            reclaimable,
            floor: thresholds.memory_floor,
        });
    }

    Verdict::Healthy
}

/// Boolean form of [`assess`].
#[must_use]
pub fn is_overloaded(
    load: &Result<Load, ThresholdError>,
    memory: &Result<MemInfo, ThresholdError>,
    usage: &Result<UsageSnapshot, ThresholdError>,
    thresholds: &Thresholds,
) -> bool {
    assess(load, memory, usage, thresholds).is_overloaded()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Resources;
    use crate::util::bytes::megabytes;

    fn thresholds() -> Thresholds {
        Thresholds::new(Load::new(4.0, 3.0, 2.0), megabytes(384))
    }

    fn usage() -> Result<UsageSnapshot, ThresholdError> {
        let used = Resources::new(1.5, megabytes(128));
        Ok(UsageSnapshot::new(used.clone(), used))
    }

    fn memory(free: u64, cached: u64) -> Result<MemInfo, ThresholdError> {
        Ok(MemInfo::new(megabytes(512), megabytes(free), megabytes(cached)))
    }

    fn failed(signal: Signal) -> ThresholdError {
        ThresholdError::unavailable(signal, "test")
    }

    #[test]
    fn test_healthy() {
        let load = Ok(Load::new(3.9, 2.9, 1.9));
        assert_eq!(assess(&load, &memory(64, 256), &usage(), &thresholds()), Verdict::Healthy);
    }

    #[test]
    fn test_load_at_ceiling_is_healthy() {
        let load = Ok(Load::new(4.0, 3.0, 2.0));
        assert!(!is_overloaded(&load, &memory(64, 256), &usage(), &thresholds()));
    }

    #[test]
    fn test_each_load_window() {
        let cases = [
            (Load::new(10.0, 2.9, 1.9), LoadWindow::One),
            (Load::new(3.9, 10.0, 1.9), LoadWindow::Five),
            (Load::new(3.9, 2.9, 10.0), LoadWindow::Fifteen),
        ];
        for (load, expected) in cases {
            match assess(&Ok(load), &memory(64, 256), &usage(), &thresholds()) {
                Verdict::Overloaded(OverloadReason::LoadExceeded { window, .. }) => {
                    assert_eq!(window, expected);
                }
                other => panic!("unexpected verdict {other:?}"),
            }
        }
    }

    #[test]
    fn test_nan_load_is_overloaded() {
        let load = Ok(Load::new(f64::NAN, 0.0, 0.0));
        assert!(is_overloaded(&load, &memory(64, 256), &usage(), &thresholds()));
    }

    #[test]
    fn test_load_failure_short_circuits() {
        let verdict = assess(
            &Err(failed(Signal::Load)),
            &Err(failed(Signal::Memory)),
            &usage(),
            &thresholds(),
        );
        assert_eq!(
            verdict,
            Verdict::Overloaded(OverloadReason::Unavailable { signal: Signal::Load })
        );
    }

    #[test]
    fn test_load_violation_reported_before_memory_failure() {
        let verdict = assess(
            &Ok(Load::new(10.0, 0.0, 0.0)),
            &Err(failed(Signal::Memory)),
            &usage(),
            &thresholds(),
        );
        assert!(matches!(
            verdict,
            Verdict::Overloaded(OverloadReason::LoadExceeded { .. })
        ));
    }

    #[test]
    fn test_memory_failure() {
        let verdict = assess(
            &Ok(Load::new(0.0, 0.0, 0.0)),
            &Err(failed(Signal::Memory)),
            &usage(),
            &thresholds(),
        );
        assert_eq!(
            verdict,
            Verdict::Overloaded(OverloadReason::Unavailable { signal: Signal::Memory })
        );
    }

    #[test]
    fn test_usage_failure() {
        let verdict = assess(
            &Ok(Load::new(0.0, 0.0, 0.0)),
            &memory(512, 0),
            &Err(failed(Signal::Usage)),
            &thresholds(),
        );
        assert_eq!(
            verdict,
            Verdict::Overloaded(OverloadReason::Unavailable { signal: Signal::Usage })
        );
    }

    #[test]
    fn test_memory_below_floor() {
        let verdict = assess(
            &Ok(Load::new(3.9, 2.9, 1.9)),
            &memory(0, 0),
            &usage(),
            &thresholds(),
        );
        assert_eq!(
            verdict,
            Verdict::Overloaded(OverloadReason::MemoryBelowFloor {
                reclaimable: megabytes(128),
                floor: megabytes(384),
            })
        );
    }

    #[test]
    fn test_memory_exactly_at_floor_is_healthy() {
        // 128 + 128 + 128 = 384
        let load = Ok(Load::new(0.0, 0.0, 0.0));
        assert!(!is_overloaded(&load, &memory(128, 128), &usage(), &thresholds()));
    }

    #[test]
    fn test_reclaimable_memory_saturates() {
        let memory = MemInfo::new(u64::MAX, u64::MAX, u64::MAX);
        assert_eq!(reclaimable_memory(&memory, &UsageSnapshot::default()), u64::MAX);
    }

    #[test]
    fn test_reason_display() {
        let reason = OverloadReason::MemoryBelowFloor {
            reclaimable: megabytes(128),
            floor: megabytes(384),
        };
        assert_eq!(reason.to_string(), "reclaimable memory 128MB below floor 384MB");
        let reason = OverloadReason::LoadExceeded {
            window: LoadWindow::Fifteen,
            value: 10.0,
            ceiling: 2.0,
        };
        assert_eq!(reason.to_string(), "15m load 10 exceeds 2");
    }
}
