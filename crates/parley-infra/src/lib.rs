//! Infrastructure layer for Parley.
//!
//! Contains the concrete implementations behind the ports defined in
//! `parley-core`: the OpenAI-compatible provider client, the TOML config
//! loader, and environment-based credential resolution.

pub mod config;
pub mod llm;
pub mod secret;
