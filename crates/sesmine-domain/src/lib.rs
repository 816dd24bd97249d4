//! Domain types shared across SESMine crates.
//!
//! This crate contains only pure types and pure functions with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never depend on storage or HTTP from here.

pub mod activity;
pub mod contact;
pub mod id;
pub mod page;
pub mod plan;
pub mod request;
pub mod session;
pub mod settings;
pub mod user;
pub mod validation;
