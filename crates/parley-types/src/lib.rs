//! Shared domain types for Parley.
//!
//! This crate contains the conversation and gateway types used across the
//! Parley workspace: messages, transcripts, submission requests, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod llm;
