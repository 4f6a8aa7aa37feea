//! Business logic for Parley.
//!
//! This crate defines the chat session (transcript ownership and the
//! idle/pending submission cycle) and the submission gateway that turns a
//! transcript into exactly one provider call. It depends only on
//! `parley-types` -- never on HTTP or provider-client crates; those live
//! in `parley-infra`.

pub mod chat;
pub mod llm;
