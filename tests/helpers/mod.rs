//! Shared fixtures for integration tests.

pub mod class_bytes;
pub mod jar_fixtures;
