//! OpenAI implementation of the AssistantClient port.
//!
//! Covers both call styles: the synchronous `/chat/completions` endpoint and
//! the Assistants v2 thread/run/message endpoints (which require the
//! `OpenAI-Beta: assistants=v2` header).
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAiConfig::new(api_key)
//!     .with_base_url("https://api.openai.com/v1");
//!
//! let client = OpenAiAssistantClient::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::chat::RunStatus;
use crate::ports::{
    AssistantClient, AssistantError, ChatMessage, CompletionRequest, MessageOrder, MessageRole,
    RunId, ThreadId, ThreadMessage,
};

/// Configuration for the OpenAI client.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl OpenAiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI API client implementation.
pub struct OpenAiAssistantClient {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiAssistantClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: OpenAiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Adds auth headers common to every request.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
    }

    /// Adds the beta header required by the thread/run endpoints.
    fn authorize_beta(&self, request: RequestBuilder) -> RequestBuilder {
        self.authorize(request)
            .header("OpenAI-Beta", "assistants=v2")
    }

    fn map_transport_error(&self, err: reqwest::Error) -> AssistantError {
        if err.is_timeout() {
            AssistantError::Timeout {
                timeout_secs: self.config.timeout.as_secs() as u32,
            }
        } else if err.is_connect() {
            AssistantError::network(format!("Connection failed: {}", err))
        } else {
            AssistantError::network(err.to_string())
        }
    }

    /// Maps non-success statuses to errors and passes success through.
    async fn handle_response_status(&self, response: Response) -> Result<Response, AssistantError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 => Err(AssistantError::AuthenticationFailed),
            code => Err(AssistantError::api(code, error_body)),
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, AssistantError> {
        let response = request
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;
        self.handle_response_status(response).await
    }

    async fn parse_json<T: serde::de::DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T, AssistantError> {
        response
            .json()
            .await
            .map_err(|e| AssistantError::parse(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl AssistantClient for OpenAiAssistantClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, AssistantError> {
        let body = ChatCompletionRequest {
            model: request.model,
            messages: request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .send(self.authorize(self.client.post(self.url("/chat/completions")).json(&body)))
            .await?;
        let completion: ChatCompletionResponse = self.parse_json(response).await?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AssistantError::parse("No choices in response"))?;

        Ok(choice.message.content)
    }

    async fn create_thread(&self) -> Result<ThreadId, AssistantError> {
        let response = self
            .send(
                self.authorize_beta(self.client.post(self.url("/threads")))
                    .json(&serde_json::json!({})),
            )
            .await?;
        let thread: ObjectRef = self.parse_json(response).await?;
        Ok(ThreadId::new(thread.id))
    }

    async fn post_message(
        &self,
        thread_id: &ThreadId,
        role: MessageRole,
        content: &str,
    ) -> Result<(), AssistantError> {
        let body = PostMessageRequest {
            role,
            content: content.to_string(),
        };
        let path = format!("/threads/{}/messages", thread_id);

        self.send(self.authorize_beta(self.client.post(self.url(&path)).json(&body)))
            .await?;
        Ok(())
    }

    async fn create_run(
        &self,
        thread_id: &ThreadId,
        assistant_id: &str,
    ) -> Result<RunId, AssistantError> {
        let body = CreateRunRequest {
            assistant_id: assistant_id.to_string(),
        };
        let path = format!("/threads/{}/runs", thread_id);

        let response = self
            .send(self.authorize_beta(self.client.post(self.url(&path)).json(&body)))
            .await?;
        let run: ObjectRef = self.parse_json(response).await?;
        Ok(RunId::new(run.id))
    }

    async fn retrieve_run(
        &self,
        thread_id: &ThreadId,
        run_id: &RunId,
    ) -> Result<RunStatus, AssistantError> {
        let path = format!("/threads/{}/runs/{}", thread_id, run_id);

        let response = self
            .send(self.authorize_beta(self.client.get(self.url(&path))))
            .await?;
        let run: RunStatusResponse = self.parse_json(response).await?;
        Ok(RunStatus::from_wire(&run.status))
    }

    async fn list_messages(
        &self,
        thread_id: &ThreadId,
        order: MessageOrder,
        limit: u32,
    ) -> Result<Vec<ThreadMessage>, AssistantError> {
        let path = format!("/threads/{}/messages", thread_id);

        let response = self
            .send(
                self.authorize_beta(self.client.get(self.url(&path)))
                    .query(&[("order", order.as_query_param()), ("limit", &limit.to_string())]),
            )
            .await?;
        let list: MessageListResponse = self.parse_json(response).await?;
        Ok(list.data)
    }
}

// ----- OpenAI API Types -----

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatCompletionMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionMessage {
    content: String,
}

#[derive(Debug, Serialize)]
struct PostMessageRequest {
    role: MessageRole,
    content: String,
}

#[derive(Debug, Serialize)]
struct CreateRunRequest {
    assistant_id: String,
}

#[derive(Debug, Deserialize)]
struct ObjectRef {
    id: String,
}

#[derive(Debug, Deserialize)]
struct RunStatusResponse {
    status: String,
}

#[derive(Debug, Deserialize)]
struct MessageListResponse {
    data: Vec<ThreadMessage>,
}
