//! Cucumber step definitions for interface tests.

pub mod analytics;
pub mod budget;
