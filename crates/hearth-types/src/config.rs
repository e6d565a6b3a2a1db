//! Global configuration for Hearth.
//!
//! Deserialized from `config.toml` in the data directory. Every field has a
//! serde default so a partial (or missing) file still yields a usable
//! configuration.

use serde::{Deserialize, Serialize};

/// Application-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Model identifier for the completion endpoint.
    #[serde(default = "default_model")]
    pub model: String,

    /// Bounded output length for a single reply.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Fixed sampling temperature for every completion call.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Optional persona prompt override. When absent, the built-in
    /// versioned persona template is used.
    #[serde(default)]
    pub persona: Option<String>,
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_temperature() -> f64 {
    0.7
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            persona: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GlobalConfig::default();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.max_tokens, 500);
        assert!((config.temperature - 0.7).abs() < f64::EPSILON);
        assert!(config.persona.is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: GlobalConfig = toml::from_str("model = \"gpt-4o\"").unwrap();
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.max_tokens, 500);
    }

    #[test]
    fn test_full_toml() {
        let config: GlobalConfig = toml::from_str(
            r#"
            model = "gpt-4o"
            max_tokens = 1024
            temperature = 0.4
            persona = "You are a terse assistant."
            "#,
        )
        .unwrap();
        assert_eq!(config.max_tokens, 1024);
        assert_eq!(config.persona.as_deref(), Some("You are a terse assistant."));
    }
}
