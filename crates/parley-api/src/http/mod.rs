//! HTTP layer for Parley.
//!
//! Axum-based gateway exposing `POST /api/chat` with the original
//! always-200 result/error envelope, plus a health check and optional
//! static serving of a web client.

pub mod handlers;
pub mod router;
