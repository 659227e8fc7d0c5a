//! Chat transcript types
//!
//! `DisplayMessage` is one rendered chat bubble. `RunContext` is the per-turn
//! state the event handlers write into.

use serde::{Deserialize, Serialize};

/// Category labels attached to non-text messages
pub mod labels {
    pub const TOOL_CALL: &str = "Tool Call";
    pub const TOOL_OUTPUT: &str = "Tool Output";
    pub const AGENT_UPDATE: &str = "Agent Update";
    pub const HANDOFF_REQUESTED: &str = "Handoff Requested";
    pub const HANDOFF_COMPLETED: &str = "Handoff Completed";
    pub const REASONING: &str = "Reasoning";
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One chat bubble
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayMessage {
    pub role: Role,
    pub content: String,
    /// Label shown on tool/system bubbles; `None` for plain text replies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl DisplayMessage {
    #[allow(dead_code)] // Constructor for API completeness
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            category: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            category: None,
        }
    }

    pub fn labeled(content: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            category: Some(category.into()),
        }
    }

    /// Whether this is the bubble streamed text is merged into
    pub fn is_text_reply(&self) -> bool {
        self.role == Role::Assistant && self.category.is_none()
    }
}

/// Mutable state for one in-flight turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    buffer: String,
    messages: Vec<DisplayMessage>,
}

impl RunContext {
    /// Fresh context holding the empty assistant placeholder
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            messages: vec![DisplayMessage::assistant("")],
        }
    }

    /// Context with no placeholder
    #[allow(dead_code)] // Used by tests and custom chains
    pub fn empty() -> Self {
        Self {
            buffer: String::new(),
            messages: Vec::new(),
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn messages(&self) -> &[DisplayMessage] {
        &self.messages
    }

    pub fn push(&mut self, message: DisplayMessage) {
        self.messages.push(message);
    }

    /// Append a streamed delta and render the whole buffer into the text bubble.
    ///
    /// The first unlabeled assistant message is the text bubble; if there is
    /// none, a new one is appended.
    pub fn append_delta(&mut self, delta: &str) {
        self.buffer.push_str(delta);
        match self.messages.iter_mut().find(|m| m.is_text_reply()) {
            Some(message) => message.content.clone_from(&self.buffer),
            None => self.messages.push(DisplayMessage::assistant(self.buffer.clone())),
        }
    }

    /// Immutable copy of the transcript for rendering
    pub fn snapshot(&self) -> Vec<DisplayMessage> {
        self.messages.clone()
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}
