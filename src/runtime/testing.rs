//! Mock runner for testing
//!
//! Replays queued event feeds instead of talking to a real runtime.

use super::traits::{AgentRunner, EventStream, RunRequest};
use super::RunError;
use crate::event::StreamEvent;
use async_trait::async_trait;
use futures::StreamExt;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

type ScriptedRun = Result<Vec<Result<StreamEvent, RunError>>, RunError>;

/// Runner that returns queued feeds, one per `run_streamed` call
pub struct ScriptedRunner {
    runs: Mutex<VecDeque<ScriptedRun>>,
    /// Record of all requests made
    pub requests: Mutex<Vec<RunRequest>>,
    pulled: Arc<AtomicUsize>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self {
            runs: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            pulled: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Queue a feed that completes normally
    pub fn queue_feed(&self, events: Vec<StreamEvent>) {
        self.queue_results(events.into_iter().map(Ok).collect());
    }

    /// Queue a feed that may fail part-way
    pub fn queue_results(&self, items: Vec<Result<StreamEvent, RunError>>) {
        self.runs.lock().unwrap().push_back(Ok(items));
    }

    /// Queue a run that fails to start
    pub fn queue_start_error(&self, error: RunError) {
        self.runs.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_requests(&self) -> Vec<RunRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Counts items pulled from every feed handed out
    pub fn pulled_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.pulled)
    }
}

impl Default for ScriptedRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AgentRunner for ScriptedRunner {
    async fn run_streamed(&self, request: &RunRequest) -> Result<EventStream, RunError> {
        self.requests.lock().unwrap().push(request.clone());
        let run = self
            .runs
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RunError::unavailable("No scripted run queued")))?;

        let pulled = Arc::clone(&self.pulled);
        Ok(futures::stream::iter(run)
            .inspect(move |_| {
                pulled.fetch_add(1, Ordering::SeqCst);
            })
            .boxed())
    }
}
