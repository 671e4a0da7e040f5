//! Shared storage contract tests.
//!
//! Tests the AnalyticsStore interface. Each store implementation imports
//! these test functions and runs them.

pub mod analytics_store_tests;
