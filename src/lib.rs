//! Buildmart - construction marketplace core
//!
//! Area, material and budget calculators for construction projects, the
//! validators that gate their inputs, and an in-memory analytics service
//! for marketplace events.

pub mod analytics;
pub mod area;
pub mod budget;
pub mod config;
pub mod material;
pub mod payment;
pub mod services;
pub mod units;
pub mod utils;
pub mod validation;
