//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`session`, `notify`) so the request pipeline
//! and the router depend on small focused models.

pub mod notify;
pub mod session;
