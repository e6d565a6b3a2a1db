//! Infrastructure implementations for Hearth.
//!
//! Concrete adapters behind the ports defined in `hearth-core`: the SQLite
//! chat store and identity provider, the OpenAI completion client, and the
//! global configuration loader.

pub mod config;
pub mod llm;
pub mod sqlite;
