//! Tokio poll loops feeding estimates and corrections to the host.
//!
//! The engine itself applies no deadlines; these loops optionally wrap each
//! poll in one. A timed-out estimate is reported as an empty offer. A
//! timed-out correction poll reports nothing, since revocable usage is
//! unknown.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::config::PollingConfig;
use crate::core::{
    Correction, LoadProvider, MemoryProvider, Resources, ThresholdQoSController,
    ThresholdResourceEstimator, UsageProvider,
};

/// Run one estimate poll, giving up after `deadline`.
pub async fn estimate_within<L, M, U>(
    estimator: &ThresholdResourceEstimator<L, M, U>,
    deadline: Option<Duration>,
) -> Resources
where
    L: LoadProvider,
    M: MemoryProvider,
    U: UsageProvider,
{
    let Some(deadline) = deadline else {
        return estimator.estimate().await;
    };
    if let Ok(resources) = tokio::time::timeout(deadline, estimator.estimate()).await {
        resources
    } else {
        tracing::warn!(?deadline, "estimate poll timed out, offering no revocable resources");
        Resources::empty()
    }
}

/// Run one correction poll, giving up after `deadline`.
pub async fn corrections_within<L, M, U>(
    controller: &ThresholdQoSController<L, M, U>,
    deadline: Option<Duration>,
) -> Vec<Correction>
where
    L: LoadProvider,
    M: MemoryProvider,
    U: UsageProvider,
{
    let Some(deadline) = deadline else {
        return controller.corrections().await;
    };
    if let Ok(corrections) = tokio::time::timeout(deadline, controller.corrections()).await {
        corrections
    } else {
        tracing::warn!(?deadline, "correction poll timed out, no corrections issued");
        Vec::new()
    }
}

/// Handle to a running poll loop. Dropping it aborts the loop.
#[derive(Debug)]
pub struct PollHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    /// Stop the loop and wait for it to exit. An in-flight poll is abandoned
    /// and its result discarded.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    /// True once the loop has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}

/// Spawns poll loops on a tokio runtime.
#[derive(Clone, Debug)]
pub struct PollDriver {
    handle: Handle,
}

impl PollDriver {
    /// Create a driver from a tokio runtime handle.
    #[must_use]
    pub const fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Driver for the runtime the caller is running on.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    #[must_use]
    pub fn current() -> Self {
        Self::new(Handle::current())
    }

    /// Poll `estimator` every `estimate_interval` and hand each offer to
    /// `on_estimate`.
    pub fn spawn_estimate_loop<L, M, U, F>(
        &self,
        estimator: Arc<ThresholdResourceEstimator<L, M, U>>,
        polling: &PollingConfig,
        on_estimate: F,
    ) -> PollHandle
    where
        L: LoadProvider + 'static,
        M: MemoryProvider + 'static,
        U: UsageProvider + 'static,
        F: FnMut(Resources) + Send + 'static,
    {
        let deadline = polling.poll_timeout();
        let poll = move || {
            let estimator = Arc::clone(&estimator);
            async move { estimate_within(&estimator, deadline).await }
        };
        self.spawn_loop(polling.estimate_interval(), poll, on_estimate)
    }

    /// Poll `controller` every `correction_interval` and hand each batch
    /// (zero or one correction) to `on_corrections`.
    pub fn spawn_correction_loop<L, M, U, F>(
        &self,
        controller: Arc<ThresholdQoSController<L, M, U>>,
        polling: &PollingConfig,
        on_corrections: F,
    ) -> PollHandle
    where
        L: LoadProvider + 'static,
        M: MemoryProvider + 'static,
        U: UsageProvider + 'static,
        F: FnMut(Vec<Correction>) + Send + 'static,
    {
        let deadline = polling.poll_timeout();
        let poll = move || {
            let controller = Arc::clone(&controller);
            async move { corrections_within(&controller, deadline).await }
        };
        self.spawn_loop(polling.correction_interval(), poll, on_corrections)
    }

    fn spawn_loop<T, P, Fut, S>(&self, period: Duration, mut poll: P, mut sink: S) -> PollHandle
    where
        T: Send + 'static,
        P: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
        S: FnMut(T) + Send + 'static,
    {
        let (tx, mut rx) = oneshot::channel::<()>();
        let task = self.handle.spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = &mut rx => break,
                    _ = ticker.tick() => {}
                }
                let result = tokio::select! {
                    _ = &mut rx => break,
                    result = poll() => result,
                };
                sink(result);
            }
            tracing::debug!("poll loop stopped");
        });
        PollHandle {
            shutdown: Some(tx),
            task: Some(task),
        }
    }
}
