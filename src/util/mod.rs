//! Browser glue kept out of state and pipeline code.
//!
//! `storage` backs the session with `window.localStorage`.

pub mod storage;
