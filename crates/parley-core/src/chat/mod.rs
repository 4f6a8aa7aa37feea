//! Chat session and submission gateway.

pub mod gateway;
pub mod session;
