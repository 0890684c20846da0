//! HTTP handlers.

pub mod analysis;
pub mod fallback;
pub mod health;
pub mod metrics;
pub mod openapi;
