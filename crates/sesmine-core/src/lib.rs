//! Service plumbing shared by SESMine binaries: tracing setup, health checks,
//! request ids and wire formatting helpers.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
