//! OpenAI provider: HTTP client plus wire types for the Chat Completions API.

mod client;
mod types;

pub use client::OpenAiProvider;
