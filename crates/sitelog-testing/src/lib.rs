//! Testing infrastructure for sitelog integration tests.
//!
//! This crate provides utilities for writing robust integration tests:
//! - `TestWorld`: isolated on-disk store pair with fluent seeding helpers
//! - `fixtures`: deterministic domain-value builders

pub mod fixtures;
pub mod world;

pub use world::TestWorld;
