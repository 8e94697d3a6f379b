//! Assistant orchestrator: the single-flight conversational request loop.
//!
//! `submit` never blocks the caller. The first request starts a background
//! drain task; anything arriving while that task is busy waits in a FIFO
//! queue and is processed strictly in arrival order by the same task — an
//! iterative loop, so an arbitrarily long queue cannot grow the stack.
//!
//! Each request either short-circuits on an identity question or walks the
//! provider fallback chain until one backend produces a usable answer. A
//! failure processing one request is localized: it becomes a single
//! user-visible error and the drain moves on to the next queued request.

use crate::config::OrchestratorSettings;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
use crate::ports::provider_client::{ProgressCallback, ProgressUpdate};
use crate::ports::speech::SpeechSynthesizer;
use crate::ports::ui_event::{EventChannel, UiEvent};
use crate::use_cases::gateway::ProviderGateway;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use vox_domain::{
    AttemptOutcome, ConversationSession, ConversationTurn, IDENTITY_RESPONSE,
    IDENTITY_RESPONSE_SPOKEN, ProviderAttempt, RequestQueue, fallback_chain,
    is_identity_question, scrub_brands, spoken_excerpt,
};

/// Spoken when the first request lands in the queue.
const QUEUE_ACK_SPOKEN: &str = "Your request is in the queue.";

/// Spoken alongside every user-visible failure.
const APOLOGY_SPOKEN: &str = "Sorry, I could not get an answer. Please try again.";

/// Spoken after a session reset.
const RESET_SPOKEN: &str = "Conversation history cleared.";

/// Spoken when the preferred backend is missing at activation.
const PREFERRED_UNAVAILABLE_SPOKEN: &str =
    "The preferred answer engine is not available right now.";

/// Terminal failures of one request. Individual provider failures recover
/// locally by advancing the chain; only these surface to the user.
#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("No answer engine could respond ({attempts} attempts, last: {last})")]
    AllProvidersExhausted { attempts: usize, last: String },

    #[error("Unexpected failure while processing the request: {0}")]
    Unexpected(String),
}

/// Mutable session state, guarded by a single mutex so the busy flag, the
/// queue, and the history can never disagree.
struct SessionState {
    busy: bool,
    queue: RequestQueue,
    history: ConversationSession,
    /// Bumped by `reset_session`; a drain that outlives a reset discards
    /// its result instead of touching the new session.
    generation: u64,
}

struct Inner {
    gateway: ProviderGateway,
    speech: Arc<dyn SpeechSynthesizer>,
    events: EventChannel,
    logger: Arc<dyn ConversationLogger>,
    settings: OrchestratorSettings,
    state: Mutex<SessionState>,
}

/// Drives the conversational request loop for one session.
pub struct AssistantOrchestrator {
    inner: Arc<Inner>,
    /// Handle of the current drain task, retained so callers (and tests)
    /// can await completion deterministically instead of sleeping.
    drain: Mutex<Option<JoinHandle<()>>>,
}

impl AssistantOrchestrator {
    pub fn new(
        gateway: ProviderGateway,
        speech: Arc<dyn SpeechSynthesizer>,
        events: EventChannel,
        settings: OrchestratorSettings,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                gateway,
                speech,
                events,
                logger: Arc::new(NoConversationLogger),
                settings,
                state: Mutex::new(SessionState {
                    busy: false,
                    queue: RequestQueue::new(),
                    history: ConversationSession::new(),
                    generation: 0,
                }),
            }),
            drain: Mutex::new(None),
        }
    }

    /// Attach a transcript logger.
    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        let inner = Arc::get_mut(&mut self.inner)
            .expect("with_logger must be called before the orchestrator is shared");
        inner.logger = logger;
        self
    }

    /// Enter assistant mode: announce activation and probe the preferred
    /// backend in the background, warning the user if it is missing.
    pub fn activate(&self) {
        info!("assistant mode activated");
        self.inner.events.emit(UiEvent::ModeActivated);

        let inner = self.inner.clone();
        tokio::spawn(async move {
            let preferred = inner.settings.preferred_provider;
            if !inner.gateway.probe(preferred).await {
                warn!(provider = %preferred, "preferred provider unavailable at activation");
                inner.events.emit(UiEvent::Error {
                    message: "The preferred answer engine was not found. \
                              Requests will fall back to the alternates."
                        .to_string(),
                });
                inner.speech.speak(PREFERRED_UNAVAILABLE_SPOKEN).await;
            }
        });
    }

    /// Leave assistant mode, discarding any queued requests. An in-flight
    /// request is allowed to finish.
    pub fn deactivate(&self) {
        let discarded = {
            let mut state = self.state();
            let discarded = state.queue.len();
            state.queue.clear();
            discarded
        };
        if discarded > 0 {
            info!(discarded, "cleared queued requests on deactivate");
        }
        self.inner.events.emit(UiEvent::ModeDeactivated);
    }

    /// Accept a request for processing. Never blocks: if the session is
    /// idle, processing starts on a background task; otherwise the request
    /// is queued in arrival order and its 1-based position is reported.
    ///
    /// Must be called from within a tokio runtime. Always returns `true`;
    /// blank input is ignored.
    pub fn submit(&self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            debug!("ignoring blank submission");
            return true;
        }

        let generation = {
            let mut state = self.state();
            if state.busy {
                let position = state.queue.enqueue(text);
                drop(state);
                info!(position, "request queued");
                self.inner.events.emit(UiEvent::Queued {
                    position,
                    text: text.to_string(),
                });
                // Spoken acknowledgment for the first queued item only.
                if position == 1 {
                    let speech = self.inner.speech.clone();
                    tokio::spawn(async move {
                        speech.speak(QUEUE_ACK_SPOKEN).await;
                    });
                }
                return true;
            }
            state.busy = true;
            state.generation
        };

        let inner = self.inner.clone();
        let first = text.to_string();
        let handle = tokio::spawn(async move {
            Inner::drain(inner, first, generation).await;
        });
        *self.drain.lock().expect("drain handle lock poisoned") = Some(handle);
        true
    }

    /// Clear the queue, the history, and the busy indicator, and reset
    /// backend-side sessions. An in-flight provider call is not aborted;
    /// its result is discarded on arrival via the generation counter.
    pub fn reset_session(&self) {
        {
            let mut state = self.state();
            state.generation += 1;
            state.queue.clear();
            state.history.clear();
            state.busy = false;
        }
        info!("session reset");
        self.inner.logger.log(ConversationEvent::new(
            "session_reset",
            serde_json::json!({}),
        ));
        self.inner.events.emit(UiEvent::SessionReset);

        let inner = self.inner.clone();
        tokio::spawn(async move {
            inner.gateway.reset_all().await;
            inner.speech.speak(RESET_SPOKEN).await;
        });
    }

    /// Snapshot of the conversation history, oldest first.
    pub fn history(&self) -> Vec<ConversationTurn> {
        self.state().history.turns().to_vec()
    }

    /// Number of requests currently waiting.
    pub fn queue_len(&self) -> usize {
        self.state().queue.len()
    }

    /// Is a request currently being processed?
    pub fn is_busy(&self) -> bool {
        self.state().busy
    }

    /// Await the current drain task, if any. Returns once the session is
    /// idle; used by the one-shot CLI mode and by tests.
    pub async fn wait_idle(&self) {
        let handle = self.drain.lock().expect("drain handle lock poisoned").take();
        if let Some(handle) = handle
            && handle.await.is_err()
        {
            warn!("drain task panicked");
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.inner.state.lock().expect("session state lock poisoned")
    }
}

impl Inner {
    /// Process `first`, then keep popping queued requests until the queue
    /// is empty. Runs as one background task per busy period.
    async fn drain(inner: Arc<Inner>, first: String, generation: u64) {
        let mut text = first;
        loop {
            // A defect in request processing must not kill the drain: it
            // becomes one user-visible error and the loop continues.
            let result = AssertUnwindSafe(Inner::process_request(&inner, &text, generation))
                .catch_unwind()
                .await
                .unwrap_or_else(|panic| Err(OrchestratorError::Unexpected(panic_message(panic))));

            if let Err(err) = result {
                error!(error = %err, "request processing failed");
                inner.logger.log(ConversationEvent::new(
                    "request_failed",
                    serde_json::json!({ "error": err.to_string() }),
                ));
                inner.events.emit(UiEvent::Error {
                    message: scrub_brands(&err.to_string()),
                });
                inner.speech.speak(APOLOGY_SPOKEN).await;
            }

            let next = {
                let mut state = inner.state.lock().expect("session state lock poisoned");
                if state.generation != generation {
                    // Reset happened while we were processing; a fresh
                    // drain owns the queue and busy flag now.
                    debug!("drain exiting after session reset");
                    return;
                }
                match state.queue.dequeue() {
                    Some(request) => {
                        let remaining = state.queue.len();
                        Some((request, remaining))
                    }
                    None => {
                        state.busy = false;
                        None
                    }
                }
            };

            match next {
                Some((request, remaining)) => {
                    info!(remaining, "processing next queued request");
                    inner.events.emit(UiEvent::Processing {
                        text: request.text.clone(),
                        remaining,
                    });
                    text = request.text;
                }
                None => {
                    debug!("queue empty, returning to idle");
                    return;
                }
            }
        }
    }

    async fn process_request(
        inner: &Arc<Inner>,
        text: &str,
        generation: u64,
    ) -> Result<(), OrchestratorError> {
        inner.events.emit(UiEvent::UserMessage {
            content: text.to_string(),
        });
        {
            let mut state = inner.state.lock().expect("session state lock poisoned");
            if state.generation != generation {
                return Ok(());
            }
            state.history.push_user(text);
        }
        inner.logger.log(ConversationEvent::new(
            "user_turn",
            serde_json::json!({ "content": text }),
        ));

        if is_identity_question(text) {
            return Inner::answer_identity(inner, generation).await;
        }

        inner.events.emit(UiEvent::Thinking);

        let chain = fallback_chain(inner.settings.preferred_provider);
        let attempts = chain.len();
        let mut last_failure: Option<ProviderAttempt> = None;

        for (index, provider) in chain.into_iter().enumerate() {
            let events = inner.events.clone();
            let progress: ProgressCallback = Arc::new(move |update: ProgressUpdate| {
                events.emit(UiEvent::Progress {
                    elapsed: update.elapsed,
                    status: update.status,
                });
            });

            let started = Instant::now();
            let attempt = inner.gateway.call(provider, text, Some(progress)).await;
            inner.logger.log(ConversationEvent::new(
                "provider_attempt",
                serde_json::json!({
                    "provider": provider.as_str(),
                    "outcome": attempt.outcome.describe(),
                }),
            ));

            match attempt.outcome {
                AttemptOutcome::Success(content) => {
                    inner.events.emit(UiEvent::ThinkingDone);
                    info!(
                        provider = %provider,
                        chars = content.len(),
                        "provider answered"
                    );
                    if !Inner::finalize_success(inner, generation, &content, started.elapsed()) {
                        return Ok(());
                    }
                    let spoken = spoken_excerpt(&content);
                    inner.speech.speak(&spoken).await;
                    return Ok(());
                }
                outcome => {
                    warn!(
                        provider = %provider,
                        outcome = %outcome.describe(),
                        "provider attempt failed"
                    );
                    last_failure = Some(ProviderAttempt::new(provider, outcome));
                    // Announce the switch between attempts, never after the
                    // last one — exhaustion gets its own consolidated error.
                    if index + 1 < attempts {
                        inner
                            .events
                            .emit(UiEvent::SwitchingProvider { attempt: index + 2 });
                    }
                }
            }
        }

        inner.events.emit(UiEvent::ThinkingDone);
        Err(OrchestratorError::AllProvidersExhausted {
            attempts,
            last: last_failure
                .map(|attempt| attempt.outcome.describe())
                .unwrap_or_else(|| "no providers registered".to_string()),
        })
    }

    /// Answer an identity question locally after the fixed delay; no
    /// provider is ever called for these.
    async fn answer_identity(
        inner: &Arc<Inner>,
        generation: u64,
    ) -> Result<(), OrchestratorError> {
        debug!("identity question short-circuited");
        inner.events.emit(UiEvent::Thinking);
        let delay = inner.settings.identity_delay;
        tokio::time::sleep(delay).await;
        inner.events.emit(UiEvent::ThinkingDone);

        if !Inner::finalize_success(inner, generation, IDENTITY_RESPONSE, delay) {
            return Ok(());
        }
        inner.speech.speak(IDENTITY_RESPONSE_SPOKEN).await;
        Ok(())
    }

    /// Append the assistant turn and emit the answer. Returns `false` when
    /// the session generation moved on (reset mid-flight) and the result
    /// was discarded.
    fn finalize_success(
        inner: &Arc<Inner>,
        generation: u64,
        content: &str,
        elapsed: std::time::Duration,
    ) -> bool {
        {
            let mut state = inner.state.lock().expect("session state lock poisoned");
            if state.generation != generation {
                debug!("discarding answer for a reset session");
                return false;
            }
            state.history.push_assistant(content);
        }
        inner.logger.log(ConversationEvent::new(
            "assistant_turn",
            serde_json::json!({
                "content": content,
                "duration_ms": elapsed.as_millis() as u64,
            }),
        ));
        inner.events.emit(UiEvent::AssistantMessage {
            content: content.to_string(),
            elapsed,
        });
        true
    }
}

fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}
