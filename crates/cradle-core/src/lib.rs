//! Ambient plumbing shared across the Cradle workspace: tracing setup,
//! request-id middleware, health handlers, and serde helpers.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
