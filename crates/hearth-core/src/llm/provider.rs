//! LlmProvider trait definition.
//!
//! The single abstraction over completion backends. Uses native async fn in
//! traits (RPITIT, Rust 2024 edition). Implementations live in hearth-infra
//! (e.g., `OpenAiProvider`).

use hearth_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for completion endpoint backends.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
