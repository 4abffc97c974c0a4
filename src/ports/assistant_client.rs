//! Assistant Client Port - interface to the remote conversational service.
//!
//! Two call styles are exposed, matching the remote service:
//!
//! - Stateless: submit a full message list, get one reply synchronously.
//! - Stateful: create a thread, post a message, start a run, poll its status,
//!   then fetch the latest messages once the run is terminal.
//!
//! The remote thread and run are owned by the remote service; this port only
//! references them by identifier and never assumes transition authority.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::chat::RunStatus;

/// Port for the remote assistant service.
#[async_trait]
pub trait AssistantClient: Send + Sync {
    /// Generates a single synchronous completion from a full message list.
    ///
    /// Returns the text of the first returned choice.
    async fn complete(&self, request: CompletionRequest) -> Result<String, AssistantError>;

    /// Mints a new remote thread.
    async fn create_thread(&self) -> Result<ThreadId, AssistantError>;

    /// Appends a message to a thread.
    async fn post_message(
        &self,
        thread_id: &ThreadId,
        role: MessageRole,
        content: &str,
    ) -> Result<(), AssistantError>;

    /// Starts a run of the given assistant against a thread's current state.
    async fn create_run(
        &self,
        thread_id: &ThreadId,
        assistant_id: &str,
    ) -> Result<RunId, AssistantError>;

    /// Fetches the current status of a run.
    async fn retrieve_run(
        &self,
        thread_id: &ThreadId,
        run_id: &RunId,
    ) -> Result<RunStatus, AssistantError>;

    /// Lists a thread's messages in the requested order, up to `limit`.
    async fn list_messages(
        &self,
        thread_id: &ThreadId,
        order: MessageOrder,
        limit: u32,
    ) -> Result<Vec<ThreadMessage>, AssistantError>;
}

/// Request for a stateless completion.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Model identifier to complete with.
    pub model: String,
    /// Full ordered message list (system, history, new user message).
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum output length in tokens.
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// Creates a request with default sampling parameters.
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: 0.7,
            max_tokens: 400,
        }
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the maximum output length.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// A message submitted to the stateless completion operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who sent this message.
    pub role: MessageRole,
    /// Message content.
    pub content: String,
}

impl ChatMessage {
    /// Creates a new message.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// Role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instructions (guides model behavior).
    System,
    /// User input.
    User,
    /// Assistant (model) response.
    Assistant,
}

/// Identifier of a remote thread.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreadId(String);

impl ThreadId {
    /// Wraps an existing identifier. Trusted as-is: no existence check.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ThreadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ThreadId> for String {
    fn from(id: ThreadId) -> Self {
        id.0
    }
}

/// Identifier of a remote run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(String);

impl RunId {
    /// Wraps an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordering of a thread-message listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOrder {
    /// Oldest first.
    Ascending,
    /// Newest first.
    Descending,
}

impl MessageOrder {
    /// Wire value for the listing query parameter.
    pub fn as_query_param(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// A message fetched from a remote thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadMessage {
    /// Who sent this message.
    pub role: MessageRole,
    /// Typed content parts in the message's own order.
    pub content: Vec<MessageContent>,
}

/// One typed content part of a thread message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContent {
    /// A text part.
    Text {
        /// The text payload.
        text: TextContent,
    },
    /// Any part type this backend does not consume (images, files, ...).
    #[serde(other)]
    Other,
}

impl MessageContent {
    /// Creates a text part.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            text: TextContent {
                value: value.into(),
            },
        }
    }

    /// Returns the text value if this is a text part.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(&text.value),
            Self::Other => None,
        }
    }
}

/// Text payload of a content part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextContent {
    /// The text value.
    pub value: String,
}

/// Assistant service errors.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    /// Network error during a request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the service response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The service answered with a non-success status.
    #[error("api error {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error body returned by the service.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },
}

impl AssistantError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}
