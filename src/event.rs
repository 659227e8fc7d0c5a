//! Events streamed by the agent runtime during a run
//!
//! The runtime emits one wide union of event shapes. Every tag set here has an
//! `Other` fallback so that event kinds this crate does not render still
//! deserialize and can be dropped by the dispatcher instead of failing the feed.
//! Payload fields are lenient: a null or wrongly typed value decodes to the
//! field's default, which the handlers render as placeholder text.

#[cfg(test)]
pub mod fixtures;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One event from a streamed agent run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StreamEvent {
    /// Low-level model output (token deltas and friends)
    #[serde(rename = "raw_response_event")]
    RawResponse {
        #[serde(default, deserialize_with = "lenient")]
        data: RawResponseData,
    },
    /// A discrete step taken during the run
    #[serde(rename = "run_item_stream_event")]
    RunItem {
        #[serde(default, deserialize_with = "lenient")]
        name: RunItemName,
        #[serde(default, deserialize_with = "lenient")]
        item: RunItem,
    },
    /// Control passed to a different agent
    #[serde(rename = "agent_updated_stream_event")]
    AgentUpdated {
        #[serde(default, deserialize_with = "lenient")]
        new_agent: AgentRef,
    },
    #[serde(other)]
    Other,
}

impl StreamEvent {
    /// Wire tag, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            StreamEvent::RawResponse { .. } => "raw_response_event",
            StreamEvent::RunItem { .. } => "run_item_stream_event",
            StreamEvent::AgentUpdated { .. } => "agent_updated_stream_event",
            StreamEvent::Other => "other",
        }
    }
}

/// Payload of a raw response event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RawResponseData {
    #[serde(rename = "response.output_text.delta")]
    TextDelta {
        #[serde(default, deserialize_with = "lenient")]
        delta: String,
    },
    #[default]
    #[serde(other)]
    Other,
}

/// Secondary discriminator of a run-item event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunItemName {
    MessageOutputCreated,
    HandoffRequested,
    // The runtime spells it this way on the wire.
    #[serde(rename = "handoff_occured", alias = "handoff_occurred")]
    HandoffOccurred,
    ToolCalled,
    ToolOutput,
    ReasoningItemCreated,
    McpApprovalRequested,
    McpListTools,
    #[default]
    #[serde(other)]
    Other,
}

/// The item carried by a run-item event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RunItem {
    #[serde(rename = "tool_call_item")]
    ToolCall {
        #[serde(default, deserialize_with = "lenient")]
        raw_item: CallRaw,
    },
    #[serde(rename = "tool_call_output_item")]
    ToolCallOutput {
        #[serde(default, deserialize_with = "lenient")]
        output: Option<Value>,
    },
    #[serde(rename = "handoff_call_item")]
    HandoffCall {
        #[serde(default, deserialize_with = "lenient")]
        raw_item: CallRaw,
    },
    #[serde(rename = "handoff_output_item")]
    HandoffOutput {
        #[serde(default, deserialize_with = "lenient")]
        source_agent: Option<AgentRef>,
        #[serde(default, deserialize_with = "lenient")]
        target_agent: Option<AgentRef>,
    },
    #[serde(rename = "message_output_item")]
    MessageOutput {
        #[serde(default, deserialize_with = "lenient")]
        raw_item: Value,
    },
    #[serde(rename = "reasoning_item")]
    Reasoning {
        #[serde(default, deserialize_with = "lenient")]
        raw_item: ReasoningRaw,
    },
    #[serde(rename = "mcp_approval_request_item")]
    McpApprovalRequest {
        #[serde(default, deserialize_with = "lenient")]
        raw_item: CallRaw,
    },
    #[serde(rename = "mcp_list_tools_item")]
    McpListTools {
        #[serde(default, deserialize_with = "lenient")]
        raw_item: McpListToolsRaw,
    },
    #[default]
    #[serde(other)]
    Other,
}

/// A function-style call: tool calls, hand-off calls and MCP approval requests
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallRaw {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Usually a JSON-encoded string, occasionally an object
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Value>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub server_label: Option<String>,
}

/// Reference to an agent by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRef {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AgentRef {
    #[allow(dead_code)] // Constructor for API completeness
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

/// Raw reasoning item; everything besides the summary is kept verbatim
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReasoningRaw {
    #[serde(default, deserialize_with = "lenient")]
    pub summary: Vec<SummaryText>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryText {
    #[serde(default, deserialize_with = "lenient")]
    pub text: String,
}

/// Tools advertised by an MCP server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct McpListToolsRaw {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub server_label: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub tools: Vec<McpToolInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpToolInfo {
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Decode a payload field, falling back to its default when the value is null
/// or has an unexpected shape
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Malformed event field, using default");
        T::default()
    }))
}
