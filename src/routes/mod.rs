//! Client-side routing: the static route table and the navigation guard.

pub mod guard;
pub mod table;
