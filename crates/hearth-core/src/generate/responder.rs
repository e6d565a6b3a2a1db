//! Response generator for one user turn.
//!
//! Builds the role-tagged message sequence -- persona system prompt, at
//! most the [`HISTORY_WINDOW`] most recent prior messages (oldest first),
//! then the new user message -- and requests a completion. Stateless: the
//! caller supplies the history.

use tracing::warn;

use hearth_types::chat::{ChatMessage, MessageAuthor};
use hearth_types::config::GlobalConfig;
use hearth_types::llm::{CompletionRequest, Message, MessageRole};

use crate::generate::fallback;
use crate::generate::persona::PERSONA_SYSTEM_PROMPT;
use crate::llm::LlmProvider;

/// Maximum number of prior messages included in a request. Older entries
/// are dropped to stay within token limits.
pub const HISTORY_WINDOW: usize = 10;

/// Produces the assistant's reply text for one user turn.
///
/// `provider` is `None` when no model credential is configured; every call
/// then returns an offline fallback after a short typing delay. Callers
/// never observe an error, only a non-empty string.
pub struct ResponseGenerator<P> {
    provider: Option<P>,
    persona: String,
    model: String,
    max_tokens: u32,
    temperature: f64,
}

impl<P: LlmProvider> ResponseGenerator<P> {
    /// Create a generator from the global configuration.
    ///
    /// Uses the built-in persona template unless the config overrides it.
    pub fn new(provider: Option<P>, config: &GlobalConfig) -> Self {
        let persona = config
            .persona
            .clone()
            .unwrap_or_else(|| PERSONA_SYSTEM_PROMPT.to_string());
        Self {
            provider,
            persona,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    /// Whether a live provider is configured.
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Build the completion request for one turn.
    ///
    /// The persona goes in the system slot; history is trimmed to the most
    /// recent [`HISTORY_WINDOW`] entries with their order preserved; the
    /// new user message comes last.
    pub fn build_request(&self, user_message: &str, history: &[ChatMessage]) -> CompletionRequest {
        let start = history.len().saturating_sub(HISTORY_WINDOW);
        let mut messages = Vec::with_capacity(history.len() - start + 1);

        for msg in &history[start..] {
            messages.push(Message {
                role: match msg.author {
                    MessageAuthor::User => MessageRole::User,
                    MessageAuthor::Assistant => MessageRole::Assistant,
                },
                content: msg.content.clone(),
            });
        }

        messages.push(Message {
            role: MessageRole::User,
            content: user_message.to_string(),
        });

        CompletionRequest {
            model: self.model.clone(),
            messages,
            system: Some(self.persona.clone()),
            max_tokens: self.max_tokens,
            temperature: Some(self.temperature),
        }
    }

    /// Generate the assistant's reply for `user_message`.
    ///
    /// `history` is the chat's prior messages, oldest first, not including
    /// the new user message. Always returns a non-empty string.
    pub async fn generate(&self, user_message: &str, history: &[ChatMessage]) -> String {
        let Some(provider) = &self.provider else {
            tokio::time::sleep(fallback::typing_delay()).await;
            return fallback::offline_reply().to_string();
        };

        let request = self.build_request(user_message, history);

        match provider.complete(&request).await {
            Ok(response) if !response.content.is_empty() => response.content,
            Ok(_) => {
                warn!(provider = provider.name(), "completion returned empty content");
                fallback::BLANK_REPLY.to_string()
            }
            Err(err) => {
                warn!(provider = provider.name(), error = %err, "completion failed, using fallback reply");
                fallback::ERROR_REPLY.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use hearth_types::llm::{CompletionResponse, LlmError, Usage};
    use std::sync::Mutex;
    use uuid::Uuid;

    /// Captures the last request and replies with a fixed outcome.
    struct MockProvider {
        last_request: Mutex<Option<CompletionRequest>>,
        outcome: MockOutcome,
    }

    enum MockOutcome {
        Reply(&'static str),
        Empty,
        Fail,
    }

    impl MockProvider {
        fn new(outcome: MockOutcome) -> Self {
            Self {
                last_request: Mutex::new(None),
                outcome,
            }
        }
    }

    impl LlmProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            *self.last_request.lock().unwrap() = Some(request.clone());
            match self.outcome {
                MockOutcome::Reply(text) => Ok(CompletionResponse {
                    id: "resp_1".to_string(),
                    content: text.to_string(),
                    model: request.model.clone(),
                    usage: Usage::default(),
                }),
                MockOutcome::Empty => Ok(CompletionResponse {
                    id: "resp_2".to_string(),
                    content: String::new(),
                    model: request.model.clone(),
                    usage: Usage::default(),
                }),
                MockOutcome::Fail => Err(LlmError::Provider {
                    message: "boom".to_string(),
                }),
            }
        }
    }

    fn message(author: MessageAuthor, content: &str) -> ChatMessage {
        ChatMessage {
            id: Uuid::now_v7(),
            chat_id: Uuid::now_v7(),
            content: content.to_string(),
            author,
            created_at: Utc::now(),
        }
    }

    fn history(len: usize) -> Vec<ChatMessage> {
        (0..len)
            .map(|i| {
                let author = if i % 2 == 0 {
                    MessageAuthor::User
                } else {
                    MessageAuthor::Assistant
                };
                message(author, &format!("turn {i}"))
            })
            .collect()
    }

    fn generator(outcome: MockOutcome) -> ResponseGenerator<MockProvider> {
        ResponseGenerator::new(Some(MockProvider::new(outcome)), &GlobalConfig::default())
    }

    #[test]
    fn test_request_carries_persona_and_params() {
        let generator = generator(MockOutcome::Reply("hi"));
        let request = generator.build_request("hello", &[]);

        assert_eq!(request.system.as_deref(), Some(PERSONA_SYSTEM_PROMPT));
        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.max_tokens, 500);
        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, MessageRole::User);
        assert_eq!(request.messages[0].content, "hello");
    }

    #[test]
    fn test_history_window_keeps_most_recent_ten() {
        let generator = generator(MockOutcome::Reply("hi"));
        let history = history(14);
        let request = generator.build_request("newest", &history);

        // 10 prior entries plus the new message
        assert_eq!(request.messages.len(), 11);
        // Oldest four were dropped; order of the rest preserved
        assert_eq!(request.messages[0].content, "turn 4");
        assert_eq!(request.messages[9].content, "turn 13");
        assert_eq!(request.messages[10].content, "newest");
        assert_eq!(request.messages[10].role, MessageRole::User);
    }

    #[test]
    fn test_short_history_kept_whole() {
        let generator = generator(MockOutcome::Reply("hi"));
        let history = history(3);
        let request = generator.build_request("next", &history);
        assert_eq!(request.messages.len(), 4);
        assert_eq!(request.messages[0].content, "turn 0");
        assert_eq!(request.messages[1].role, MessageRole::Assistant);
    }

    #[tokio::test]
    async fn test_generate_returns_completion_text() {
        let generator = generator(MockOutcome::Reply("There you are, dear."));
        let reply = generator.generate("hello", &[]).await;
        assert_eq!(reply, "There you are, dear.");
    }

    #[tokio::test]
    async fn test_generate_converts_failure_to_fallback() {
        let generator = generator(MockOutcome::Fail);
        let reply = generator.generate("hello", &[]).await;
        assert_eq!(reply, fallback::ERROR_REPLY);
    }

    #[tokio::test]
    async fn test_generate_converts_empty_content_to_fallback() {
        let generator = generator(MockOutcome::Empty);
        let reply = generator.generate("hello", &[]).await;
        assert_eq!(reply, fallback::BLANK_REPLY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_credential_draws_from_offline_set() {
        let generator: ResponseGenerator<MockProvider> =
            ResponseGenerator::new(None, &GlobalConfig::default());
        for input in ["hi", "", "a very long message indeed"] {
            let reply = generator.generate(input, &[]).await;
            assert!(!reply.is_empty());
            assert!(fallback::OFFLINE_REPLIES.contains(&reply.as_str()));
        }
    }

    #[test]
    fn test_persona_override_from_config() {
        let config = GlobalConfig {
            persona: Some("Be terse.".to_string()),
            ..GlobalConfig::default()
        };
        let generator: ResponseGenerator<MockProvider> = ResponseGenerator::new(None, &config);
        let request = generator.build_request("x", &[]);
        assert_eq!(request.system.as_deref(), Some("Be terse."));
    }
}
