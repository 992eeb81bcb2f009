//! Builders to construct decision components from configuration.

pub mod component_builder;

pub use component_builder::{build_components, build_controller, build_estimator, Components};
