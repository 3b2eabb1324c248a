//! API endpoint handlers.

pub mod records;
pub mod status;
