//! Shared utilities.

pub mod bytes;
pub mod telemetry;

pub use bytes::{format_bytes, kilobytes, megabytes};
pub use telemetry::{init_tracing, init_tracing_with_default};
