//! Trait abstraction over the agent orchestration runtime
//!
//! Lets the turn driver run against a scripted feed in tests.

use super::RunError;
use crate::agents::AgentSpec;
use crate::event::StreamEvent;
use crate::transcript::{DisplayMessage, Role};
use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Feed of events for one run, ending when the run completes
pub type EventStream = BoxStream<'static, Result<StreamEvent, RunError>>;

/// One input message for a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputItem {
    pub role: Role,
    pub content: String,
}

/// Everything the runtime needs to start a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunRequest {
    pub agent: AgentSpec,
    pub input: Vec<InputItem>,
}

impl RunRequest {
    /// Build a request from the visible chat history plus the new message.
    ///
    /// Labeled bubbles (tool calls, hand-offs, ...) are display artifacts and
    /// are not replayed; neither are empty messages.
    pub fn new(agent: AgentSpec, history: &[DisplayMessage], user_text: &str) -> Self {
        let mut input: Vec<InputItem> = history
            .iter()
            .filter(|m| m.category.is_none() && !m.content.trim().is_empty())
            .map(|m| InputItem {
                role: m.role,
                content: m.content.clone(),
            })
            .collect();
        input.push(InputItem {
            role: Role::User,
            content: user_text.to_string(),
        });
        Self { agent, input }
    }
}

/// Starts streamed agent runs
#[async_trait]
pub trait AgentRunner: Send + Sync {
    /// Start a run and return its event feed
    async fn run_streamed(&self, request: &RunRequest) -> Result<EventStream, RunError>;
}

#[async_trait]
impl<T: AgentRunner + ?Sized> AgentRunner for Arc<T> {
    async fn run_streamed(&self, request: &RunRequest) -> Result<EventStream, RunError> {
        (**self).run_streamed(request).await
    }
}
