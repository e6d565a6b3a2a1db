//! Business logic and port trait definitions for Hearth.
//!
//! This crate defines the "ports" (store and provider traits) that the
//! infrastructure layer implements, plus the three stateful pieces of the
//! application: the chat state manager, the response generator, and the
//! authentication gate. It depends only on `hearth-types` -- never on
//! `hearth-infra` or any database/HTTP crate.

pub mod auth;
pub mod chat;
pub mod generate;
pub mod llm;
