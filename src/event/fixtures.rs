//! Event builders for tests

use super::{
    AgentRef, CallRaw, McpListToolsRaw, McpToolInfo, RawResponseData, ReasoningRaw, RunItem,
    RunItemName, StreamEvent, SummaryText,
};
use serde_json::{Map, Value};

fn run_item(name: RunItemName, item: RunItem) -> StreamEvent {
    StreamEvent::RunItem { name, item }
}

fn call(name: &str, arguments: Value) -> CallRaw {
    CallRaw {
        name: Some(name.to_string()),
        arguments: Some(arguments),
        server_label: None,
    }
}

pub fn tool_called(name: &str, arguments: Value) -> StreamEvent {
    run_item(
        RunItemName::ToolCalled,
        RunItem::ToolCall {
            raw_item: call(name, arguments),
        },
    )
}

pub fn tool_output(output: impl Into<Value>) -> StreamEvent {
    run_item(
        RunItemName::ToolOutput,
        RunItem::ToolCallOutput {
            output: Some(output.into()),
        },
    )
}

pub fn agent_updated(name: &str) -> StreamEvent {
    StreamEvent::AgentUpdated {
        new_agent: AgentRef::named(name),
    }
}

pub fn handoff_requested(name: &str) -> StreamEvent {
    run_item(
        RunItemName::HandoffRequested,
        RunItem::HandoffCall {
            raw_item: call(name, Value::String("{}".to_string())),
        },
    )
}

pub fn handoff_occurred(from: &str, to: &str) -> StreamEvent {
    run_item(
        RunItemName::HandoffOccurred,
        RunItem::HandoffOutput {
            source_agent: Some(AgentRef::named(from)),
            target_agent: Some(AgentRef::named(to)),
        },
    )
}

pub fn mcp_approval_requested(name: &str, arguments: Value) -> StreamEvent {
    run_item(
        RunItemName::McpApprovalRequested,
        RunItem::McpApprovalRequest {
            raw_item: call(name, arguments),
        },
    )
}

pub fn mcp_list_tools(names: &[&str]) -> StreamEvent {
    run_item(
        RunItemName::McpListTools,
        RunItem::McpListTools {
            raw_item: McpListToolsRaw {
                server_label: Some("campus".to_string()),
                tools: names
                    .iter()
                    .map(|name| McpToolInfo {
                        name: (*name).to_string(),
                        description: None,
                    })
                    .collect(),
            },
        },
    )
}

pub fn reasoning(summary: &[&str]) -> StreamEvent {
    run_item(
        RunItemName::ReasoningItemCreated,
        RunItem::Reasoning {
            raw_item: ReasoningRaw {
                summary: summary
                    .iter()
                    .map(|text| SummaryText {
                        text: (*text).to_string(),
                    })
                    .collect(),
                rest: Map::new(),
            },
        },
    )
}

pub fn text_delta(delta: &str) -> StreamEvent {
    StreamEvent::RawResponse {
        data: RawResponseData::TextDelta {
            delta: delta.to_string(),
        },
    }
}

pub fn raw_other() -> StreamEvent {
    StreamEvent::RawResponse {
        data: RawResponseData::Other,
    }
}

pub fn message_output(text: &str) -> StreamEvent {
    run_item(
        RunItemName::MessageOutputCreated,
        RunItem::MessageOutput {
            raw_item: serde_json::json!({
                "role": "assistant",
                "content": [{"type": "output_text", "text": text}]
            }),
        },
    )
}
