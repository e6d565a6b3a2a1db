//! Shared domain types for Hearth.
//!
//! This crate contains the core domain types used across the Hearth
//! application: Chat, ChatMessage, User, auth state, LLM request/response
//! shapes, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod auth;
pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod user;
