//! Networking modules for the bias-check HTTP API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` exposes the call wrappers, `request` runs the shared pipeline,
//! `transport` is the network seam, and `types`/`error` define the wire
//! schema and failure taxonomy.

pub mod api;
pub mod error;
pub mod request;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;
