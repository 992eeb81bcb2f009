//! # Threshold Oversubscription
//!
//! Threshold-based oversubscription for a cluster agent: decides on every poll
//! how much revocable ("best-effort") capacity a host may lend out, and when
//! that capacity must be reclaimed because the host is overloaded.
//!
//! ## Decision Engine
//!
//! Both questions are answered from the same three host signals:
//!
//! - **Load**: 1/5/15-minute load averages, each with a ceiling
//! - **Memory**: free and cached memory, judged together with the memory held
//!   by revocable work against a floor
//! - **Usage**: resources currently consumed by revocable and by all work
//!
//! A single exceeded ceiling, a breached floor, or an unreadable signal marks
//! the host overloaded. Lost visibility is always treated as ill health.
//!
//! - `ThresholdResourceEstimator::estimate` offers `capacity - revocable usage`
//!   while healthy and nothing while overloaded.
//! - `ThresholdQoSController::corrections` issues one kill-all-revocable
//!   correction while overloaded and revocable work is running.
//!
//! No state is kept between polls.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use threshold_oversubscription::builders::build_components;
//! use threshold_oversubscription::config::OversubscriptionConfig;
//! use threshold_oversubscription::infra::{ProcLoadAvg, ProcMemInfo, UsageFn};
//!
//! let cfg = OversubscriptionConfig::from_file("oversubscription.json")?;
//! let usage = Arc::new(UsageFn::new(move || agent.resource_usage()));
//! let components = build_components(
//!     &cfg,
//!     Arc::new(ProcLoadAvg::default()),
//!     Arc::new(ProcMemInfo::default()),
//!     usage,
//! )?;
//!
//! let offer = components.estimator.estimate().await;
//! for correction in components.controller.corrections().await {
//!     agent.kill_revocable(correction);
//! }
//! ```
//!
//! For complete scenarios, see `tests/estimator_test.rs` and
//! `tests/controller_test.rs`.

#![deny(warnings)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Threshold decision engine: signals, predicate, estimator and controller.
pub mod core;
/// Configuration models for capacity, thresholds and polling.
pub mod config;
/// Builders to construct the estimator and controller from configuration.
pub mod builders;
/// Provider implementations for load, memory and usage.
pub mod infra;
/// Tokio poll drivers.
#[cfg(feature = "tokio-runtime")]
pub mod runtime;
/// Shared utilities.
pub mod util;
