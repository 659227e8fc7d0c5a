//! Event classification
//!
//! Chain of responsibility over [`StreamEvent`]s. Each handler decides whether
//! it owns an event and, if so, writes display messages into the turn's
//! [`RunContext`].

mod chain;
mod handlers;

#[cfg(test)]
mod proptests;

pub use chain::HandlerChain;
#[allow(unused_imports)] // Public API re-exports
pub use handlers::{
    AgentUpdateHandler, HandoffOccurredHandler, HandoffRequestedHandler, McpApprovalHandler,
    McpListToolsHandler, ReasoningHandler, TextDeltaHandler, ToolCallHandler, ToolOutputHandler,
};

use crate::event::StreamEvent;
use crate::transcript::RunContext;

/// A classifier unit in the dispatch chain
pub trait EventHandler: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Whether this handler owns the event. Must not have side effects.
    fn can_handle(&self, event: &StreamEvent) -> bool;

    /// Render the event into the context. Only called after `can_handle`
    /// returned true; returns true when the transcript should be re-rendered.
    fn apply(&self, event: &StreamEvent, context: &mut RunContext) -> bool;
}
