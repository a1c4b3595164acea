//! Run orchestration
//!
//! JSON run specs, configuration validation, stage observers, and the
//! runner that ties the analyzers and renderer together.

pub mod errors;
pub mod observer;
pub mod runner;
pub mod spec;
pub mod validation;
