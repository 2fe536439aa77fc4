//! Reusable UI components shared across pages.

pub mod toasts;
