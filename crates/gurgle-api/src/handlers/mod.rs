//! Route handlers.

pub mod clip;
pub mod search;
pub mod site;
