//! Fixture-based integration tests for the resolution engine.

#![allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]

mod fixtures;

mod effect_tests;
