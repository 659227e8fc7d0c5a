//! Ordered handler chain

use super::handlers::{
    AgentUpdateHandler, HandoffOccurredHandler, HandoffRequestedHandler, McpApprovalHandler,
    McpListToolsHandler, ReasoningHandler, TextDeltaHandler, ToolCallHandler, ToolOutputHandler,
};
use super::EventHandler;
use crate::event::StreamEvent;
use crate::transcript::RunContext;

/// Handlers consulted in registration order; the first match wins.
pub struct HandlerChain {
    handlers: Vec<Box<dyn EventHandler>>,
}

impl HandlerChain {
    /// Chain with no handlers; every event is dropped
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// The standard chain. Text deltas are consulted last.
    pub fn standard() -> Self {
        Self::new()
            .with(ToolCallHandler)
            .with(ToolOutputHandler)
            .with(AgentUpdateHandler)
            .with(HandoffRequestedHandler)
            .with(HandoffOccurredHandler)
            .with(McpApprovalHandler)
            .with(McpListToolsHandler)
            .with(ReasoningHandler)
            .with(TextDeltaHandler)
    }

    /// Append a handler to the end of the chain
    pub fn with(mut self, handler: impl EventHandler + 'static) -> Self {
        self.push(Box::new(handler));
        self
    }

    pub fn push(&mut self, handler: Box<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    /// Route one event to the first handler that claims it.
    ///
    /// Returns false, leaving the context untouched, when no handler matches.
    pub fn dispatch(&self, event: &StreamEvent, context: &mut RunContext) -> bool {
        let Some(handler) = self.handlers.iter().find(|h| h.can_handle(event)) else {
            tracing::trace!(event_type = event.kind(), "No handler for event, dropping");
            return false;
        };

        let handled = handler.apply(event, context);
        tracing::debug!(
            handler = handler.name(),
            event_type = event.kind(),
            handled,
            messages = context.messages().len(),
            "Dispatched event"
        );
        handled
    }

    /// Names of every handler whose predicate accepts the event
    #[cfg(test)]
    pub fn matching(&self, event: &StreamEvent) -> Vec<&'static str> {
        self.handlers
            .iter()
            .filter(|h| h.can_handle(event))
            .map(|h| h.name())
            .collect()
    }
}

impl Default for HandlerChain {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for HandlerChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerChain")
            .field("handlers", &self.handler_names())
            .finish()
    }
}
