//! Tokio poll drivers for the estimator and controller.

pub mod poll_driver;

pub use poll_driver::{corrections_within, estimate_within, PollDriver, PollHandle};
