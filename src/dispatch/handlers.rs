//! The standard event handlers
//!
//! One handler per rendered event category. Missing fields on a matched event
//! are replaced by placeholder text rather than treated as errors.

use super::EventHandler;
use crate::event::{RawResponseData, RunItem, RunItemName, StreamEvent};
use crate::transcript::{labels, DisplayMessage, RunContext};
use serde_json::Value;

const UNKNOWN_TOOL: &str = "unknown_tool";
const UNKNOWN_OUTPUT: &str = "unknown_output";
const UNKNOWN_AGENT: &str = "unknown_agent";
const UNKNOWN: &str = "unknown";
const UNKNOWN_ARGUMENTS: &str = "unknown_arguments";
const UNKNOWN_NAME: &str = "unknown_name";

/// Render a JSON value for display; strings are shown without quotes
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_run_item(event: &StreamEvent, expected: RunItemName) -> bool {
    matches!(event, StreamEvent::RunItem { name, .. } if *name == expected)
}

fn run_item(event: &StreamEvent) -> Option<&RunItem> {
    match event {
        StreamEvent::RunItem { item, .. } => Some(item),
        _ => None,
    }
}

// ============================================================================
// Tool calls
// ============================================================================

pub struct ToolCallHandler;

impl EventHandler for ToolCallHandler {
    fn name(&self) -> &'static str {
        "tool_call"
    }

    fn can_handle(&self, event: &StreamEvent) -> bool {
        matches!(
            event,
            StreamEvent::RunItem {
                name: RunItemName::ToolCalled,
                item: RunItem::ToolCall { .. },
            }
        )
    }

    fn apply(&self, event: &StreamEvent, context: &mut RunContext) -> bool {
        let Some(RunItem::ToolCall { raw_item }) = run_item(event) else {
            return false;
        };
        let tool_name = raw_item.name.as_deref().unwrap_or(UNKNOWN_TOOL);
        let arguments = raw_item
            .arguments
            .as_ref()
            .map_or_else(|| "{}".to_string(), render_value);

        context.push(DisplayMessage::labeled(
            format!("🛠️ {tool_name} parameters: {arguments}"),
            labels::TOOL_CALL,
        ));
        true
    }
}

pub struct ToolOutputHandler;

impl EventHandler for ToolOutputHandler {
    fn name(&self) -> &'static str {
        "tool_output"
    }

    fn can_handle(&self, event: &StreamEvent) -> bool {
        matches!(
            event,
            StreamEvent::RunItem {
                name: RunItemName::ToolOutput,
                item: RunItem::ToolCallOutput { .. },
            }
        )
    }

    fn apply(&self, event: &StreamEvent, context: &mut RunContext) -> bool {
        let Some(RunItem::ToolCallOutput { output }) = run_item(event) else {
            return false;
        };
        let output = output
            .as_ref()
            .map_or_else(|| UNKNOWN_OUTPUT.to_string(), render_value);

        context.push(DisplayMessage::labeled(
            format!("🛠️ {output}"),
            labels::TOOL_OUTPUT,
        ));
        true
    }
}

// ============================================================================
// Agents and hand-offs
// ============================================================================

pub struct AgentUpdateHandler;

impl EventHandler for AgentUpdateHandler {
    fn name(&self) -> &'static str {
        "agent_update"
    }

    fn can_handle(&self, event: &StreamEvent) -> bool {
        matches!(event, StreamEvent::AgentUpdated { .. })
    }

    fn apply(&self, event: &StreamEvent, context: &mut RunContext) -> bool {
        let StreamEvent::AgentUpdated { new_agent } = event else {
            return false;
        };
        let agent_name = new_agent.name.as_deref().unwrap_or(UNKNOWN_AGENT);

        context.push(DisplayMessage::labeled(
            format!("🤖 Agent {agent_name} updated"),
            labels::AGENT_UPDATE,
        ));
        true
    }
}

pub struct HandoffRequestedHandler;

impl EventHandler for HandoffRequestedHandler {
    fn name(&self) -> &'static str {
        "handoff_requested"
    }

    fn can_handle(&self, event: &StreamEvent) -> bool {
        is_run_item(event, RunItemName::HandoffRequested)
    }

    fn apply(&self, event: &StreamEvent, context: &mut RunContext) -> bool {
        let from = match run_item(event) {
            Some(RunItem::HandoffCall { raw_item }) => raw_item.name.as_deref(),
            _ => None,
        }
        .unwrap_or(UNKNOWN);

        context.push(DisplayMessage::labeled(
            format!("🤝 Handoff requested from {from}"),
            labels::HANDOFF_REQUESTED,
        ));
        true
    }
}

pub struct HandoffOccurredHandler;

impl EventHandler for HandoffOccurredHandler {
    fn name(&self) -> &'static str {
        "handoff_occurred"
    }

    fn can_handle(&self, event: &StreamEvent) -> bool {
        is_run_item(event, RunItemName::HandoffOccurred)
    }

    fn apply(&self, event: &StreamEvent, context: &mut RunContext) -> bool {
        let (source, target) = match run_item(event) {
            Some(RunItem::HandoffOutput {
                source_agent,
                target_agent,
            }) => (source_agent.as_ref(), target_agent.as_ref()),
            _ => (None, None),
        };
        let from = source.and_then(|a| a.name.as_deref()).unwrap_or(UNKNOWN);
        let to = target.and_then(|a| a.name.as_deref()).unwrap_or(UNKNOWN);

        context.push(DisplayMessage::labeled(
            format!("🤝 Handoff completed from {from} to {to}"),
            labels::HANDOFF_COMPLETED,
        ));
        true
    }
}

// ============================================================================
// MCP
// ============================================================================

pub struct McpApprovalHandler;

impl EventHandler for McpApprovalHandler {
    fn name(&self) -> &'static str {
        "mcp_approval"
    }

    fn can_handle(&self, event: &StreamEvent) -> bool {
        is_run_item(event, RunItemName::McpApprovalRequested)
    }

    fn apply(&self, event: &StreamEvent, context: &mut RunContext) -> bool {
        let raw_item = match run_item(event) {
            Some(RunItem::McpApprovalRequest { raw_item }) => Some(raw_item),
            _ => None,
        };
        let arguments = raw_item
            .and_then(|r| r.arguments.as_ref())
            .map_or_else(|| UNKNOWN_ARGUMENTS.to_string(), render_value);
        let tool_name = raw_item
            .and_then(|r| r.name.as_deref())
            .unwrap_or(UNKNOWN_NAME);

        let content = format!("🔧 MCP approval requested: {arguments} for {tool_name}");
        tracing::debug!(tool = %tool_name, "{content}");

        context.push(DisplayMessage::labeled(
            content,
            format!("MCP approval requested: {tool_name}"),
        ));
        true
    }
}

pub struct McpListToolsHandler;

impl EventHandler for McpListToolsHandler {
    fn name(&self) -> &'static str {
        "mcp_list_tools"
    }

    fn can_handle(&self, event: &StreamEvent) -> bool {
        is_run_item(event, RunItemName::McpListTools)
    }

    // An empty tool list still produces a message.
    fn apply(&self, event: &StreamEvent, context: &mut RunContext) -> bool {
        let names: Vec<&str> = match run_item(event) {
            Some(RunItem::McpListTools { raw_item }) => {
                raw_item.tools.iter().map(|t| t.name.as_str()).collect()
            }
            _ => Vec::new(),
        };

        let content = format!("🔧 MCP Tools: {}", names.join(", "));
        tracing::debug!(count = names.len(), "{content}");

        context.push(DisplayMessage::labeled(
            content,
            format!("MCP Tools: {names:?}"),
        ));
        true
    }
}

// ============================================================================
// Reasoning
// ============================================================================

pub struct ReasoningHandler;

impl ReasoningHandler {
    fn summary_text(item: Option<&RunItem>) -> String {
        if let Some(RunItem::Reasoning { raw_item }) = item {
            let text = raw_item
                .summary
                .iter()
                .map(|s| s.text.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            if !text.trim().is_empty() {
                return text;
            }
            return serde_json::to_string(raw_item).unwrap_or_else(|_| UNKNOWN.to_string());
        }
        item.and_then(|i| serde_json::to_string(i).ok())
            .unwrap_or_else(|| UNKNOWN.to_string())
    }
}

impl EventHandler for ReasoningHandler {
    fn name(&self) -> &'static str {
        "reasoning"
    }

    fn can_handle(&self, event: &StreamEvent) -> bool {
        is_run_item(event, RunItemName::ReasoningItemCreated)
    }

    fn apply(&self, event: &StreamEvent, context: &mut RunContext) -> bool {
        let summary = Self::summary_text(run_item(event));
        tracing::debug!(summary = %summary, "Reasoning");

        context.push(DisplayMessage::labeled(summary, labels::REASONING));
        true
    }
}

// ============================================================================
// Streamed text
// ============================================================================

/// Merges output-text deltas into a single growing text bubble
pub struct TextDeltaHandler;

impl EventHandler for TextDeltaHandler {
    fn name(&self) -> &'static str {
        "text_delta"
    }

    fn can_handle(&self, event: &StreamEvent) -> bool {
        matches!(
            event,
            StreamEvent::RawResponse {
                data: RawResponseData::TextDelta { .. }
            }
        )
    }

    fn apply(&self, event: &StreamEvent, context: &mut RunContext) -> bool {
        let StreamEvent::RawResponse {
            data: RawResponseData::TextDelta { delta },
        } = event
        else {
            return false;
        };
        context.append_delta(delta);
        true
    }
}
