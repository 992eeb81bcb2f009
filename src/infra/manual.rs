//! Manually driven providers for tests, simulations and hosts that push
//! their own readings.
//!
//! Each provider holds its latest reading behind a `parking_lot::Mutex` and
//! can be switched into a failing state with `set_error`.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::core::{
    Load, LoadProvider, MemInfo, MemoryProvider, Resources, Signal, ThresholdError, UsageProvider,
    UsageSnapshot,
};

struct Reading<T> {
    value: Mutex<Option<T>>,
    reads: AtomicUsize,
}

impl<T: Clone> Reading<T> {
    fn new(value: Option<T>) -> Self {
        Self {
            value: Mutex::new(value),
            reads: AtomicUsize::new(0),
        }
    }

    fn set(&self, value: Option<T>) {
        *self.value.lock() = value;
    }

    fn read(&self, signal: Signal) -> Result<T, ThresholdError> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        self.value
            .lock()
            .clone()
            .ok_or_else(|| ThresholdError::unavailable(signal, "reading unavailable"))
    }

    fn reads(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }
}

/// Load provider returning whatever was last set.
pub struct ManualLoad {
    inner: Reading<Load>,
}

impl ManualLoad {
    /// Start with a reading.
    #[must_use]
    pub fn new(load: Load) -> Self {
        Self {
            inner: Reading::new(Some(load)),
        }
    }

    /// Start in the failing state.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            inner: Reading::new(None),
        }
    }

    /// Replace the reading.
    pub fn set(&self, one: f64, five: f64, fifteen: f64) {
        self.inner.set(Some(Load::new(one, five, fifteen)));
    }

    /// Fail every subsequent read until `set` is called.
    pub fn set_error(&self) {
        self.inner.set(None);
    }

    /// Number of reads served, failed ones included.
    pub fn reads(&self) -> usize {
        self.inner.reads()
    }
}

#[async_trait]
impl LoadProvider for ManualLoad {
    async fn load(&self) -> Result<Load, ThresholdError> {
        self.inner.read(Signal::Load)
    }
}

/// Memory provider returning whatever was last set.
pub struct ManualMemory {
    inner: Reading<MemInfo>,
}

impl ManualMemory {
    /// Start with a reading.
    #[must_use]
    pub fn new(memory: MemInfo) -> Self {
        Self {
            inner: Reading::new(Some(memory)),
        }
    }

    /// Start in the failing state.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            inner: Reading::new(None),
        }
    }

    /// Replace the reading (bytes).
    pub fn set(&self, total: u64, free: u64, cached: u64) {
        self.inner.set(Some(MemInfo::new(total, free, cached)));
    }

    /// Fail every subsequent read until `set` is called.
    pub fn set_error(&self) {
        self.inner.set(None);
    }

    /// Number of reads served, failed ones included.
    pub fn reads(&self) -> usize {
        self.inner.reads()
    }
}

#[async_trait]
impl MemoryProvider for ManualMemory {
    async fn memory(&self) -> Result<MemInfo, ThresholdError> {
        self.inner.read(Signal::Memory)
    }
}

/// Usage provider returning whatever was last set.
pub struct ManualUsage {
    inner: Reading<UsageSnapshot>,
}

impl ManualUsage {
    /// Start with revocable and total consumption.
    #[must_use]
    pub fn new(revocable: Resources, total: Resources) -> Self {
        Self {
            inner: Reading::new(Some(UsageSnapshot::new(revocable, total))),
        }
    }

    /// Start in the failing state.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            inner: Reading::new(None),
        }
    }

    /// Replace the reading.
    pub fn set(&self, revocable: Resources, total: Resources) {
        self.inner.set(Some(UsageSnapshot::new(revocable, total)));
    }

    /// Fail every subsequent read until `set` is called.
    pub fn set_error(&self) {
        self.inner.set(None);
    }

    /// Number of reads served, failed ones included.
    pub fn reads(&self) -> usize {
        self.inner.reads()
    }
}

#[async_trait]
impl UsageProvider for ManualUsage {
    async fn usage(&self) -> Result<UsageSnapshot, ThresholdError> {
        self.inner.read(Signal::Usage)
    }
}
