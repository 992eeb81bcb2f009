//! Usage provider backed by a host callback.

use std::fmt;
use std::future::Future;

use async_trait::async_trait;

use crate::core::{ThresholdError, UsageProvider, UsageSnapshot};

/// Adapts a closure returning a usage future into a [`UsageProvider`].
///
/// This is the usual way a host hands its own usage accounting to the
/// estimator and controller.
///
/// ```rust,ignore
/// let usage = UsageFn::new(move || {
///     let agent = agent.clone();
///     async move { agent.resource_usage().await }
/// });
/// ```
pub struct UsageFn<F> {
    f: F,
}

impl<F> UsageFn<F> {
    /// Wrap `f`; it is invoked once per poll.
    pub const fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> fmt::Debug for UsageFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UsageFn").finish_non_exhaustive()
    }
}

#[async_trait]
impl<F, Fut> UsageProvider for UsageFn<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<UsageSnapshot, ThresholdError>> + Send + 'static,
{
    async fn usage(&self) -> Result<UsageSnapshot, ThresholdError> {
        (self.f)().await
    }
}
