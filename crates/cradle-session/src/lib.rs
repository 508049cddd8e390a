//! Session authentication for Cradle.
//!
//! Provides the signed session-token codec, the session cookie builders,
//! and the `Identity` extractor filled in by the access gate.

pub mod cookie;
pub mod identity;
pub mod token;
