//! Assistant configuration
//!
//! Settings for the remote conversational-completion service: credentials,
//! model/assistant identifiers, prompt sources, sampling parameters, and the
//! polling budget for stateful runs.

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::chat::SessionPolicy;

/// Assistant service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// API key for the assistant service
    pub api_key: Option<Secret<String>>,

    /// Model identifier for stateless completions
    #[serde(default = "default_model")]
    pub model: String,

    /// Assistant identifier for thread-backed runs.
    ///
    /// Optional: when absent, thread-backed policies answer with the fixed
    /// "Assistant not configured." reply instead of failing startup.
    pub assistant_id: Option<String>,

    /// Base URL for the assistant API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Base instruction text for the system prompt
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Path to the static reference document embedded into every system prompt
    pub reference_document_path: Option<String>,

    /// Session lifecycle policy for the chat route
    #[serde(default)]
    pub session_policy: SessionPolicy,

    /// Sampling temperature for stateless completions
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum output length in tokens for stateless completions
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Interval between run-status polls, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Hard cap on run-status poll attempts.
    ///
    /// 30 gives a ~15s wall-clock budget at the default interval; patient
    /// deployments use 60 for ~30s.
    #[serde(default = "default_poll_max_attempts")]
    pub poll_max_attempts: u32,

    /// Page size for the post-run message fetch
    #[serde(default = "default_message_fetch_limit")]
    pub message_fetch_limit: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AssistantConfig {
    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get poll interval as Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Check if a thread-backed assistant is configured
    pub fn has_assistant(&self) -> bool {
        self.assistant_id.as_ref().is_some_and(|id| !id.is_empty())
    }

    /// Validate assistant configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("ASSISTANT_API_KEY"));
        }
        if self.poll_interval_ms == 0 {
            return Err(ValidationError::InvalidPollInterval);
        }
        if self.poll_max_attempts == 0 || self.poll_max_attempts > 120 {
            return Err(ValidationError::InvalidPollAttempts);
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        if self.max_output_tokens == 0 {
            return Err(ValidationError::InvalidMaxTokens);
        }
        Ok(())
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            assistant_id: None,
            base_url: default_base_url(),
            system_prompt: default_system_prompt(),
            reference_document_path: None,
            session_policy: SessionPolicy::default(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            poll_interval_ms: default_poll_interval_ms(),
            poll_max_attempts: default_poll_max_attempts(),
            message_fetch_limit: default_message_fetch_limit(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "gpt-4.1".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_system_prompt() -> String {
    "You are a helpful assistant.".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_output_tokens() -> u32 {
    400
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_poll_max_attempts() -> u32 {
    30
}

fn default_message_fetch_limit() -> u32 {
    10
}

fn default_timeout() -> u64 {
    60
}
