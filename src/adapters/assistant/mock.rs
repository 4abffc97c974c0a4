//! Mock assistant client for testing.
//!
//! Configurable implementation of the AssistantClient port so orchestration
//! tests run without the real service: scripted completions, scripted
//! run-status sequences, error injection, and call counting for verifying
//! exactly how many polls and fetches a flow performed.
//!
//! # Example
//!
//! ```ignore
//! let client = MockAssistantClient::new()
//!     .with_run_statuses([RunStatus::InProgress, RunStatus::Completed])
//!     .with_thread_messages(vec![assistant_text("Hello!")]);
//!
//! // drive the orchestrator, then:
//! assert_eq!(client.calls().retrieve_run, 2);
//! assert_eq!(client.calls().list_messages, 1);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::chat::RunStatus;
use crate::ports::{
    AssistantClient, AssistantError, CompletionRequest, MessageOrder, MessageRole, RunId, ThreadId,
    ThreadMessage,
};

/// Failure modes injectable into any mock operation.
#[derive(Debug, Clone)]
pub enum MockFailure {
    /// Simulate a network error.
    Network(String),
    /// Simulate a non-success API status.
    Api { status: u16, message: String },
    /// Simulate a request timeout.
    Timeout { timeout_secs: u32 },
    /// Simulate an authentication failure.
    AuthenticationFailed,
}

impl From<MockFailure> for AssistantError {
    fn from(failure: MockFailure) -> Self {
        match failure {
            MockFailure::Network(message) => AssistantError::network(message),
            MockFailure::Api { status, message } => AssistantError::api(status, message),
            MockFailure::Timeout { timeout_secs } => AssistantError::Timeout { timeout_secs },
            MockFailure::AuthenticationFailed => AssistantError::AuthenticationFailed,
        }
    }
}

/// Per-operation call counts, for test verification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub complete: usize,
    pub create_thread: usize,
    pub post_message: usize,
    pub create_run: usize,
    pub retrieve_run: usize,
    pub list_messages: usize,
}

impl CallCounts {
    /// Total calls across every operation.
    pub fn total(&self) -> usize {
        self.complete
            + self.create_thread
            + self.post_message
            + self.create_run
            + self.retrieve_run
            + self.list_messages
    }
}

#[derive(Debug, Default)]
struct MockState {
    completions: VecDeque<Result<String, MockFailure>>,
    thread_ids: VecDeque<String>,
    run_statuses: VecDeque<RunStatus>,
    thread_messages: Vec<ThreadMessage>,
    posted_messages: Vec<(String, MessageRole, String)>,
    fail_create_thread: Option<MockFailure>,
    fail_post_message: Option<MockFailure>,
    fail_create_run: Option<MockFailure>,
    fail_retrieve_run: Option<MockFailure>,
    fail_list_messages: Option<MockFailure>,
    last_list_order: Option<MessageOrder>,
    last_list_limit: Option<u32>,
    minted: usize,
    calls: CallCounts,
}

/// Mock assistant client.
///
/// Clones share state, so a test can keep a handle for verification while the
/// orchestrator owns another.
#[derive(Debug, Clone, Default)]
pub struct MockAssistantClient {
    state: Arc<Mutex<MockState>>,
}

impl MockAssistantClient {
    /// Creates a mock with no scripted behavior.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful completion.
    pub fn with_completion(self, content: impl Into<String>) -> Self {
        self.state
            .lock()
            .unwrap()
            .completions
            .push_back(Ok(content.into()));
        self
    }

    /// Queues a failing completion.
    pub fn with_completion_failure(self, failure: MockFailure) -> Self {
        self.state
            .lock()
            .unwrap()
            .completions
            .push_back(Err(failure));
        self
    }

    /// Scripts the thread id minted by the next create-thread call.
    pub fn with_thread_id(self, id: impl Into<String>) -> Self {
        self.state.lock().unwrap().thread_ids.push_back(id.into());
        self
    }

    /// Scripts the status sequence returned by successive retrieve-run calls.
    ///
    /// When the script runs out, further polls observe `InProgress`, so an
    /// unscripted mock never reaches a terminal state.
    pub fn with_run_statuses(self, statuses: impl IntoIterator<Item = RunStatus>) -> Self {
        self.state.lock().unwrap().run_statuses.extend(statuses);
        self
    }

    /// Sets the message list returned by list-messages.
    pub fn with_thread_messages(self, messages: Vec<ThreadMessage>) -> Self {
        self.state.lock().unwrap().thread_messages = messages;
        self
    }

    /// Injects a failure into the given operation.
    pub fn with_create_thread_failure(self, failure: MockFailure) -> Self {
        self.state.lock().unwrap().fail_create_thread = Some(failure);
        self
    }

    /// Injects a failure into post-message.
    pub fn with_post_message_failure(self, failure: MockFailure) -> Self {
        self.state.lock().unwrap().fail_post_message = Some(failure);
        self
    }

    /// Injects a failure into create-run.
    pub fn with_create_run_failure(self, failure: MockFailure) -> Self {
        self.state.lock().unwrap().fail_create_run = Some(failure);
        self
    }

    /// Injects a failure into retrieve-run.
    pub fn with_retrieve_run_failure(self, failure: MockFailure) -> Self {
        self.state.lock().unwrap().fail_retrieve_run = Some(failure);
        self
    }

    /// Injects a failure into list-messages.
    pub fn with_list_messages_failure(self, failure: MockFailure) -> Self {
        self.state.lock().unwrap().fail_list_messages = Some(failure);
        self
    }

    /// Returns a snapshot of per-operation call counts.
    pub fn calls(&self) -> CallCounts {
        self.state.lock().unwrap().calls
    }

    /// Returns the messages posted to threads, in order.
    pub fn posted_messages(&self) -> Vec<(String, MessageRole, String)> {
        self.state.lock().unwrap().posted_messages.clone()
    }

    /// Returns the order and limit of the last list-messages call.
    pub fn last_list_params(&self) -> Option<(MessageOrder, u32)> {
        let state = self.state.lock().unwrap();
        state.last_list_order.zip(state.last_list_limit)
    }
}

#[async_trait]
impl AssistantClient for MockAssistantClient {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, AssistantError> {
        let mut state = self.state.lock().unwrap();
        state.calls.complete += 1;
        match state.completions.pop_front() {
            Some(Ok(content)) => Ok(content),
            Some(Err(failure)) => Err(failure.into()),
            None => Err(AssistantError::network("no scripted completion")),
        }
    }

    async fn create_thread(&self) -> Result<ThreadId, AssistantError> {
        let mut state = self.state.lock().unwrap();
        state.calls.create_thread += 1;
        if let Some(failure) = state.fail_create_thread.clone() {
            return Err(failure.into());
        }
        if let Some(id) = state.thread_ids.pop_front() {
            return Ok(ThreadId::new(id));
        }
        state.minted += 1;
        Ok(ThreadId::new(format!("thread_mock_{}", state.minted)))
    }

    async fn post_message(
        &self,
        thread_id: &ThreadId,
        role: MessageRole,
        content: &str,
    ) -> Result<(), AssistantError> {
        let mut state = self.state.lock().unwrap();
        state.calls.post_message += 1;
        if let Some(failure) = state.fail_post_message.clone() {
            return Err(failure.into());
        }
        state
            .posted_messages
            .push((thread_id.as_str().to_string(), role, content.to_string()));
        Ok(())
    }

    async fn create_run(
        &self,
        _thread_id: &ThreadId,
        _assistant_id: &str,
    ) -> Result<RunId, AssistantError> {
        let mut state = self.state.lock().unwrap();
        state.calls.create_run += 1;
        if let Some(failure) = state.fail_create_run.clone() {
            return Err(failure.into());
        }
        state.minted += 1;
        Ok(RunId::new(format!("run_mock_{}", state.minted)))
    }

    async fn retrieve_run(
        &self,
        _thread_id: &ThreadId,
        _run_id: &RunId,
    ) -> Result<RunStatus, AssistantError> {
        let mut state = self.state.lock().unwrap();
        state.calls.retrieve_run += 1;
        if let Some(failure) = state.fail_retrieve_run.clone() {
            return Err(failure.into());
        }
        Ok(state
            .run_statuses
            .pop_front()
            .unwrap_or(RunStatus::InProgress))
    }

    async fn list_messages(
        &self,
        _thread_id: &ThreadId,
        order: MessageOrder,
        limit: u32,
    ) -> Result<Vec<ThreadMessage>, AssistantError> {
        let mut state = self.state.lock().unwrap();
        state.calls.list_messages += 1;
        if let Some(failure) = state.fail_list_messages.clone() {
            return Err(failure.into());
        }
        state.last_list_order = Some(order);
        state.last_list_limit = Some(limit);
        Ok(state.thread_messages.clone())
    }
}

/// Builds an assistant-role message holding one text part.
pub fn assistant_text(value: impl Into<String>) -> ThreadMessage {
    ThreadMessage {
        role: MessageRole::Assistant,
        content: vec![crate::ports::MessageContent::text(value)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ChatMessage;

    fn request() -> CompletionRequest {
        CompletionRequest::new("mock-model", vec![ChatMessage::user("hi")])
    }

    #[tokio::test]
    async fn returns_scripted_completions_in_order() {
        let client = MockAssistantClient::new()
            .with_completion("first")
            .with_completion("second");

        assert_eq!(client.complete(request()).await.unwrap(), "first");
        assert_eq!(client.complete(request()).await.unwrap(), "second");
        assert_eq!(client.calls().complete, 2);
    }

    #[tokio::test]
    async fn injected_completion_failure_surfaces() {
        let client = MockAssistantClient::new()
            .with_completion_failure(MockFailure::Network("down".to_string()));

        let err = client.complete(request()).await.unwrap_err();
        assert!(matches!(err, AssistantError::Network(_)));
    }

    #[tokio::test]
    async fn mints_thread_ids_when_unscripted() {
        let client = MockAssistantClient::new();
        let first = client.create_thread().await.unwrap();
        let second = client.create_thread().await.unwrap();
        assert_ne!(first, second);
        assert_eq!(client.calls().create_thread, 2);
    }

    #[tokio::test]
    async fn run_statuses_drain_then_stay_in_progress() {
        let client = MockAssistantClient::new().with_run_statuses([RunStatus::Completed]);
        let thread = ThreadId::new("t");
        let run = RunId::new("r");

        assert_eq!(
            client.retrieve_run(&thread, &run).await.unwrap(),
            RunStatus::Completed
        );
        assert_eq!(
            client.retrieve_run(&thread, &run).await.unwrap(),
            RunStatus::InProgress
        );
    }

    #[tokio::test]
    async fn records_posted_messages() {
        let client = MockAssistantClient::new();
        let thread = ThreadId::new("thread_1");
        client
            .post_message(&thread, MessageRole::User, "hello")
            .await
            .unwrap();

        let posted = client.posted_messages();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].0, "thread_1");
        assert_eq!(posted[0].1, MessageRole::User);
        assert_eq!(posted[0].2, "hello");
    }

    #[tokio::test]
    async fn records_list_params() {
        let client = MockAssistantClient::new()
            .with_thread_messages(vec![assistant_text("reply")]);
        let thread = ThreadId::new("t");

        let messages = client
            .list_messages(&thread, MessageOrder::Descending, 10)
            .await
            .unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(
            client.last_list_params(),
            Some((MessageOrder::Descending, 10))
        );
    }
}
