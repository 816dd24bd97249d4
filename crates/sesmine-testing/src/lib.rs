//! Test utilities for SESMine services.
//!
//! Provides the storage fixture loader and browser-session helpers.
//! Import in `#[cfg(test)]` blocks and integration tests only, never in production code.

pub mod fixture;
pub mod session;
