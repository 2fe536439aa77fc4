//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page is mounted behind the navigation guard. Pages call `net::api`
//! and leave error display to the pipeline's notifications.

pub mod charts;
pub mod chat;
pub mod feedback;
pub mod history;
pub mod login;
