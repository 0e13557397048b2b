//! docgate-web — HTTP surface of the gateway.
//! Routes browser traffic to the engine relays:
//!   - bearer-token guard on protected routes
//!   - per-route request validation (question bounds, PDF-only batches)
//!   - uniform JSON error envelope for auth, validation, and engine failures

pub mod auth;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
