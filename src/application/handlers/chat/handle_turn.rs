//! Chat turn orchestration.
//!
//! Drives one inbound user turn end to end: validation short-circuits, policy
//! dispatch (stateless completion vs thread-backed run), bounded run polling,
//! reply extraction, and the fire-and-forget transcript write.
//!
//! The user-facing contract is "always get a reply-shaped response": no error
//! kind escapes this handler. Upstream and persistence failures resolve to
//! the fixed strings in [`replies`] while full detail is logged server-side.

use std::sync::Arc;

use tracing::warn;

use crate::config::AssistantConfig;
use crate::domain::chat::{
    build_messages, extract_reply, replies, SessionPolicy, TranscriptRecord, Turn,
};
use crate::ports::{
    AssistantClient, AssistantError, CompletionRequest, MessageOrder, MessageRole, RunId, Sleeper,
    ThreadId, TranscriptStore,
};

/// One inbound user turn with its client-declared context.
#[derive(Debug, Clone)]
pub struct ChatTurnRequest {
    /// The new user message.
    pub message: String,
    /// Prior history as ordered turns, as resent by the caller.
    pub history: Vec<Turn>,
    /// Caller-supplied session identifier, if any.
    pub session_id: Option<String>,
}

impl ChatTurnRequest {
    /// Creates a request with no history or session.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            history: Vec::new(),
            session_id: None,
        }
    }

    /// Sets the prior history.
    pub fn with_history(mut self, history: Vec<Turn>) -> Self {
        self.history = history;
        self
    }

    /// Sets the session identifier.
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

/// The resolved reply for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurnOutcome {
    /// The reply text; always present, never an error.
    pub reply: String,
    /// The session identifier handed back to the caller, only under a policy
    /// that exposes one.
    pub session_id: Option<String>,
}

/// How a turn was resolved internally, before session-id exposure is decided.
#[derive(Debug)]
struct Resolution {
    reply: String,
    thread_id: Option<ThreadId>,
}

/// Orchestrates chat turns over the assistant and transcript ports.
///
/// Holds only read-only startup state; one instance serves all requests.
pub struct ChatOrchestrator {
    config: AssistantConfig,
    system_prompt: String,
    client: Arc<dyn AssistantClient>,
    transcripts: Arc<dyn TranscriptStore>,
    sleeper: Arc<dyn Sleeper>,
}

impl ChatOrchestrator {
    /// Creates an orchestrator.
    ///
    /// `system_prompt` is the composed base-instructions-plus-reference text,
    /// assembled once at startup.
    pub fn new(
        config: AssistantConfig,
        system_prompt: String,
        client: Arc<dyn AssistantClient>,
        transcripts: Arc<dyn TranscriptStore>,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        Self {
            config,
            system_prompt,
            client,
            transcripts,
            sleeper,
        }
    }

    /// Handles one inbound turn. Infallible by contract.
    pub async fn handle(&self, request: ChatTurnRequest) -> ChatTurnOutcome {
        // Validation and configuration short-circuits answer before any
        // external collaborator is touched, transcript store included.
        if request.message.is_empty() {
            return ChatTurnOutcome {
                reply: replies::NO_MESSAGE.to_string(),
                session_id: None,
            };
        }

        let resolution = match self.config.session_policy {
            SessionPolicy::StatelessReplay => self.resolve_stateless(&request).await,
            SessionPolicy::ReusableThread | SessionPolicy::EphemeralThread => {
                match self.config.assistant_id.as_deref().filter(|id| !id.is_empty()) {
                    Some(assistant_id) => self.resolve_threaded(&request, assistant_id).await,
                    None => {
                        return ChatTurnOutcome {
                            reply: replies::NOT_CONFIGURED.to_string(),
                            session_id: None,
                        }
                    }
                }
            }
        };

        self.record_transcript(&request, &resolution).await;

        ChatTurnOutcome {
            session_id: if self.config.session_policy.exposes_session_id() {
                resolution.thread_id.map(String::from)
            } else {
                None
            },
            reply: resolution.reply,
        }
    }

    /// Stateless replay: rebuild the full model context from the caller's
    /// history and ask for one synchronous completion.
    async fn resolve_stateless(&self, request: &ChatTurnRequest) -> Resolution {
        let messages = build_messages(&self.system_prompt, &request.history, &request.message);
        let completion = CompletionRequest::new(self.config.model.clone(), messages)
            .with_temperature(self.config.temperature)
            .with_max_tokens(self.config.max_output_tokens);

        match self.client.complete(completion).await {
            Ok(content) => Resolution {
                reply: content.trim().to_string(),
                thread_id: None,
            },
            Err(err) => {
                warn!(error = %err, "Completion call failed");
                Resolution {
                    reply: replies::COMPLETION_UNAVAILABLE.to_string(),
                    thread_id: None,
                }
            }
        }
    }

    /// Thread-backed resolution with the catch-all fallback applied.
    async fn resolve_threaded(&self, request: &ChatTurnRequest, assistant_id: &str) -> Resolution {
        match self.drive_run(request, assistant_id).await {
            Ok(resolution) => resolution,
            Err(err) => {
                warn!(error = %err, "Assistant thread flow failed");
                Resolution {
                    reply: replies::ASSISTANT_UNAVAILABLE.to_string(),
                    thread_id: None,
                }
            }
        }
    }

    /// NoThread → ThreadCreated → MessagePosted → RunStarted → Polling.
    async fn drive_run(
        &self,
        request: &ChatTurnRequest,
        assistant_id: &str,
    ) -> Result<Resolution, AssistantError> {
        // A caller-supplied session id is trusted as an existing thread, but
        // only a reusable-thread policy may adopt it; the ephemeral policy
        // mints a fresh thread on every call.
        let reuse = self.config.session_policy == SessionPolicy::ReusableThread;
        let thread_id = match request.session_id.as_deref().filter(|id| !id.is_empty()) {
            Some(id) if reuse => ThreadId::new(id),
            _ => self.client.create_thread().await?,
        };

        self.client
            .post_message(&thread_id, MessageRole::User, &request.message)
            .await?;
        let run_id = self.client.create_run(&thread_id, assistant_id).await?;

        let reply = self.poll_run(&thread_id, &run_id).await?;
        Ok(Resolution {
            reply,
            thread_id: Some(thread_id),
        })
    }

    /// Polls the run to a terminal state within the configured budget.
    ///
    /// Sleeps between attempts, never after the last one: a budget of `max`
    /// attempts performs at most `max` polls and `max - 1` sleeps.
    async fn poll_run(&self, thread_id: &ThreadId, run_id: &RunId) -> Result<String, AssistantError> {
        let max_attempts = self.config.poll_max_attempts;
        for attempt in 1..=max_attempts {
            let status = self.client.retrieve_run(thread_id, run_id).await?;

            if status.is_success() {
                let messages = self
                    .client
                    .list_messages(
                        thread_id,
                        MessageOrder::Descending,
                        self.config.message_fetch_limit,
                    )
                    .await?;
                return Ok(extract_reply(&messages)
                    .unwrap_or_else(|| replies::EMPTY_REPLY.to_string()));
            }

            if status.is_terminal() {
                warn!(%thread_id, %run_id, ?status, "Run ended without a reply");
                return Ok(replies::RUN_INCOMPLETE.to_string());
            }

            if attempt < max_attempts {
                self.sleeper.sleep(self.config.poll_interval()).await;
            }
        }

        warn!(
            %thread_id,
            %run_id,
            attempts = max_attempts,
            "Run did not reach a terminal state within the poll budget"
        );
        Ok(replies::RUN_TIMED_OUT.to_string())
    }

    /// Appends one transcript record: prior history plus the new turn.
    ///
    /// Fire-and-forget: at-most-once attempt, failure logged and swallowed,
    /// zero effect on the reply already determined.
    async fn record_transcript(&self, request: &ChatTurnRequest, resolution: &Resolution) {
        let session_id = request
            .session_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .or_else(|| {
                resolution
                    .thread_id
                    .as_ref()
                    .map(|id| id.as_str().to_string())
            })
            .unwrap_or_else(|| TranscriptRecord::ANONYMOUS_SESSION.to_string());

        let mut turns = request.history.clone();
        turns.push(Turn::new(
            request.message.clone(),
            resolution.reply.clone(),
        ));

        let record = TranscriptRecord::new(session_id, turns);
        if let Err(err) = self.transcripts.append(&record).await {
            warn!(
                error = %err,
                session_id = %record.session_id,
                "Failed to save transcript"
            );
        }
    }
}
