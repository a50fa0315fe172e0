//! Exercise query pipeline
//!
//! Sends a [`RequestSpec`] to a chat-completions endpoint and recovers a list
//! of exercises from whatever text comes back.
//!
//! # Stages
//!
//! ```text
//! credential check → transport → content extraction → structural parsing
//!        │               │               │                    │
//!  MissingCredential  Transport     EmptyResponse      always renderable
//! ```
//!
//! Parsing never fails: model output that cannot be read as an exercise
//! array becomes a single synthesized record carrying the raw text, so the
//! result panel always has something to show.

pub mod extract;
pub mod parse;
mod record;
pub mod transport;

pub use extract::ContentLocation;
pub use parse::{parse_exercises, ParsePath, Parsed};
pub use record::{Difficulty, ExerciseRecord, NEUTRAL_SCORE};
pub use transport::{HttpTransport, Transport, TransportError, TransportResponse};

use crate::config::Credential;
use crate::prompt::RequestSpec;
use crate::util::truncate_utf8_safe;
use std::sync::Arc;
use std::time::Instant;

/// Maximum bytes of an error body kept in a failure
const MAX_ERROR_BODY: usize = 2048;

// ─────────────────────────────────────────────────────────────────────────────
// Outcome
// ─────────────────────────────────────────────────────────────────────────────

/// Why a query produced no exercises
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryFailure {
    /// No API key configured. Fatal to this query only.
    #[error("Missing API key: set the provider key in the environment or config file")]
    MissingCredential,

    /// Non-success HTTP status, or no response at all (`status: None`)
    #[error("{}", transport_message(*status, body))]
    Transport { status: Option<u16>, body: String },

    /// Envelope parsed but held no text in any known location.
    /// Selecting another region (or the same one later) retries.
    #[error("No content returned from the model")]
    EmptyResponse,
}

fn transport_message(status: Option<u16>, body: &str) -> String {
    match status {
        Some(code) => format!("API error {}: {}", code, body),
        None => format!("API request failed: {}", body),
    }
}

/// Result of one query
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Success(Vec<ExerciseRecord>),
    /// Model returned a well-formed but empty array
    Empty,
    Failure(QueryFailure),
}

impl QueryOutcome {
    pub fn kind(&self) -> &'static str {
        match self {
            QueryOutcome::Success(_) => "success",
            QueryOutcome::Empty => "empty",
            QueryOutcome::Failure(QueryFailure::MissingCredential) => "missing_credential",
            QueryOutcome::Failure(QueryFailure::Transport { .. }) => "transport_error",
            QueryOutcome::Failure(QueryFailure::EmptyResponse) => "empty_response",
        }
    }

    pub fn records(&self) -> &[ExerciseRecord] {
        match self {
            QueryOutcome::Success(records) => records,
            _ => &[],
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pipeline
// ─────────────────────────────────────────────────────────────────────────────

/// Executes exercise queries. Cheap to clone; share it between tasks.
#[derive(Clone)]
pub struct ExerciseQueryPipeline {
    transport: Arc<dyn Transport>,
    credential: Option<Credential>,
}

impl ExerciseQueryPipeline {
    pub fn new(transport: Arc<dyn Transport>, credential: Option<Credential>) -> Self {
        Self {
            transport,
            credential,
        }
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    pub async fn execute(&self, request: &RequestSpec) -> QueryOutcome {
        let started = Instant::now();
        let target = request.user_content().unwrap_or_default();
        let outcome = self.run(request).await;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &outcome {
            QueryOutcome::Failure(failure) => tracing::warn!(
                model = %request.model,
                elapsed_ms,
                outcome = outcome.kind(),
                "Exercise query failed: {}",
                failure
            ),
            _ => tracing::info!(
                model = %request.model,
                elapsed_ms,
                outcome = outcome.kind(),
                records = outcome.records().len(),
                "Exercise query finished for {}",
                target.lines().next().unwrap_or_default()
            ),
        }
        outcome
    }

    async fn run(&self, request: &RequestSpec) -> QueryOutcome {
        // 1. Precondition: no key, no network
        let Some(credential) = &self.credential else {
            return QueryOutcome::Failure(QueryFailure::MissingCredential);
        };

        // 2. Transport
        let response = match self.transport.send(request, credential).await {
            Ok(response) => response,
            Err(e) => {
                return QueryOutcome::Failure(QueryFailure::Transport {
                    status: None,
                    body: e.to_string(),
                })
            }
        };

        if !response.is_success() {
            return QueryOutcome::Failure(QueryFailure::Transport {
                status: Some(response.status),
                body: truncate_utf8_safe(&response.body, MAX_ERROR_BODY).to_string(),
            });
        }

        // 3. Content extraction
        let envelope: serde_json::Value = match serde_json::from_str(&response.body) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("Response envelope is not JSON: {}", e);
                return QueryOutcome::Failure(QueryFailure::EmptyResponse);
            }
        };

        let Some((location, content)) = extract::extract_content(&envelope) else {
            return QueryOutcome::Failure(QueryFailure::EmptyResponse);
        };
        tracing::debug!(location = location.as_str(), "Extracted model content");

        // 4. Structural parsing
        let parsed = parse_exercises(&content);
        tracing::debug!(path = parsed.path.as_str(), "Parsed exercise records");

        // 5. Result
        if parsed.records.is_empty() {
            QueryOutcome::Empty
        } else {
            QueryOutcome::Success(parsed.records)
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted transport for pipeline and session tests

    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    pub enum Scripted {
        Ready(Result<TransportResponse, TransportError>),
        /// Resolves when the sender fires
        Gated(oneshot::Receiver<Result<TransportResponse, TransportError>>),
    }

    #[derive(Default)]
    pub struct MockTransport {
        script: Mutex<VecDeque<Scripted>>,
        calls: AtomicUsize,
        requests: Mutex<Vec<RequestSpec>>,
    }

    impl MockTransport {
        pub fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        pub fn push(&self, item: Scripted) {
            self.script.lock().unwrap().push_back(item);
        }

        pub fn push_ok(&self, body: &str) {
            self.push(Scripted::Ready(Ok(TransportResponse {
                status: 200,
                body: body.to_string(),
            })));
        }

        /// Queue a response that arrives only when the returned sender fires
        pub fn push_gated(&self) -> oneshot::Sender<Result<TransportResponse, TransportError>> {
            let (tx, rx) = oneshot::channel();
            self.push(Scripted::Gated(rx));
            tx
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn requests(&self) -> Vec<RequestSpec> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn send(
            &self,
            request: &RequestSpec,
            _credential: &Credential,
        ) -> Result<TransportResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request.clone());
            let next = self.script.lock().unwrap().pop_front();
            match next {
                Some(Scripted::Ready(result)) => result,
                Some(Scripted::Gated(rx)) => rx
                    .await
                    .unwrap_or_else(|_| Err(TransportError::Other("gate dropped".into()))),
                None => Err(TransportError::Other("no scripted response".into())),
            }
        }
    }

    /// Wrap model text in a chat-completions envelope
    pub fn chat_envelope(content: &str) -> String {
        serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }]
        })
        .to_string()
    }
}
