//! API middleware stack.
//!
//! Execution order (outermost → innermost):
//! 1. Auth: resolves the authenticated user
//! 2. Access log: records user, route and status

pub mod audit;
pub mod auth;
