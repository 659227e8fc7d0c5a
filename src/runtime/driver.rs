//! Turn driver
//!
//! Runs one user submission against the agent runtime, pushes every event
//! through the handler chain and yields a transcript snapshot after each
//! handled event.

use super::traits::{AgentRunner, EventStream, RunRequest};
use super::RunError;
use crate::agents::AgentSpec;
use crate::dispatch::HandlerChain;
use crate::transcript::{DisplayMessage, RunContext};
use futures::{Stream, StreamExt};
use std::sync::Arc;

/// Lifecycle of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// Submitted, run not started yet
    Idle,
    /// Waiting for the next event
    Running,
    /// Last event produced a snapshot
    Streaming,
    /// Feed finished or failed
    Done,
}

/// Per-session chat entry point. Owns the agent, the runner and the shared
/// handler chain; every turn gets its own [`RunContext`].
pub struct TurnDriver {
    runner: Arc<dyn AgentRunner>,
    chain: Arc<HandlerChain>,
    agent: AgentSpec,
}

impl TurnDriver {
    pub fn new(runner: Arc<dyn AgentRunner>, chain: HandlerChain, agent: AgentSpec) -> Self {
        Self {
            runner,
            chain: Arc::new(chain),
            agent,
        }
    }

    pub fn agent(&self) -> &AgentSpec {
        &self.agent
    }

    /// Prepare a turn without starting the run
    pub fn start(&self, user_text: &str, history: &[DisplayMessage]) -> Turn {
        Turn::new(
            Arc::clone(&self.runner),
            Arc::clone(&self.chain),
            RunRequest::new(self.agent.clone(), history, user_text),
        )
    }

    /// Lazy stream of full transcript snapshots for one user message.
    ///
    /// Ends when the run completes. A feed failure is yielded once as an
    /// error and ends the stream.
    pub fn chat(
        &self,
        user_text: &str,
        history: &[DisplayMessage],
    ) -> impl Stream<Item = Result<Vec<DisplayMessage>, RunError>> + Send + 'static {
        self.start(user_text, history).into_stream()
    }
}

/// One in-flight turn
pub struct Turn {
    id: String,
    state: TurnState,
    runner: Arc<dyn AgentRunner>,
    chain: Arc<HandlerChain>,
    request: Option<RunRequest>,
    events: Option<EventStream>,
    context: RunContext,
    handled: usize,
    dropped: usize,
}

impl Turn {
    fn new(runner: Arc<dyn AgentRunner>, chain: Arc<HandlerChain>, request: RunRequest) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            state: TurnState::Idle,
            runner,
            chain,
            request: Some(request),
            events: None,
            context: RunContext::new(),
            handled: 0,
            dropped: 0,
        }
    }

    #[allow(dead_code)] // Inspection API for callers driving turns by hand
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    #[allow(dead_code)] // Inspection API for callers driving turns by hand
    pub fn context(&self) -> &RunContext {
        &self.context
    }

    /// Advance until the next snapshot, the end of the feed, or a failure.
    ///
    /// Does not pull another event until called again.
    pub async fn next_snapshot(&mut self) -> Option<Result<Vec<DisplayMessage>, RunError>> {
        loop {
            match self.state {
                TurnState::Idle => {
                    if let Err(e) = self.begin().await {
                        return Some(Err(e));
                    }
                }
                TurnState::Running | TurnState::Streaming => {
                    let next = match self.events.as_mut() {
                        Some(events) => events.next().await,
                        None => None,
                    };
                    match next {
                        Some(Ok(event)) => {
                            if self.chain.dispatch(&event, &mut self.context) {
                                self.handled += 1;
                                self.state = TurnState::Streaming;
                                return Some(Ok(self.context.snapshot()));
                            }
                            self.dropped += 1;
                            self.state = TurnState::Running;
                        }
                        Some(Err(e)) => {
                            tracing::error!(
                                turn_id = %self.id,
                                error = %e,
                                kind = ?e.kind,
                                "Agent run failed"
                            );
                            self.finish();
                            return Some(Err(e));
                        }
                        None => {
                            self.finish();
                            return None;
                        }
                    }
                }
                TurnState::Done => return None,
            }
        }
    }

    async fn begin(&mut self) -> Result<(), RunError> {
        let Some(request) = self.request.take() else {
            self.finish();
            return Ok(());
        };

        tracing::info!(
            turn_id = %self.id,
            agent = %request.agent.name,
            input_len = request.input.len(),
            "Starting turn"
        );

        match self.runner.run_streamed(&request).await {
            Ok(events) => {
                self.events = Some(events);
                self.state = TurnState::Running;
                Ok(())
            }
            Err(e) => {
                tracing::error!(turn_id = %self.id, error = %e, "Failed to start agent run");
                self.finish();
                Err(e)
            }
        }
    }

    fn finish(&mut self) {
        self.events = None;
        self.state = TurnState::Done;
        tracing::info!(
            turn_id = %self.id,
            handled = self.handled,
            dropped = self.dropped,
            messages = self.context.messages().len(),
            "Turn finished"
        );
    }

    /// Convert into a snapshot stream. Dropping the stream cancels the run.
    pub fn into_stream(
        self,
    ) -> impl Stream<Item = Result<Vec<DisplayMessage>, RunError>> + Send + 'static {
        futures::stream::unfold(self, |mut turn| async move {
            turn.next_snapshot().await.map(|snapshot| (snapshot, turn))
        })
    }
}
