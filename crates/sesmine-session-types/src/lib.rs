//! Session cookie types shared across SESMine services.
//!
//! Provides the `sesmine_session` cookie builders and the `SessionCookie` extractor.

pub mod cookie;
pub mod extract;
