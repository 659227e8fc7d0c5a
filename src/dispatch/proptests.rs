//! Property-based tests for event dispatch
//!
//! These tests verify the chain invariants across generated event feeds.

use super::*;
use crate::event::{
    AgentRef, CallRaw, McpListToolsRaw, McpToolInfo, RawResponseData, ReasoningRaw, RunItem,
    RunItemName, SummaryText,
};
use crate::transcript::DisplayMessage;
use proptest::prelude::*;
use serde_json::{Map, Value};

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_name() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[A-Za-z_ ]{1,16}")
}

fn arb_call() -> impl Strategy<Value = CallRaw> {
    (arb_name(), proptest::option::of("[a-z0-9{}:\" ]{0,20}")).prop_map(|(name, args)| CallRaw {
        name,
        arguments: args.map(Value::String),
        server_label: None,
    })
}

fn arb_agent() -> impl Strategy<Value = AgentRef> {
    arb_name().prop_map(|name| AgentRef { name })
}

fn arb_run_item_name() -> impl Strategy<Value = RunItemName> {
    prop_oneof![
        Just(RunItemName::MessageOutputCreated),
        Just(RunItemName::HandoffRequested),
        Just(RunItemName::HandoffOccurred),
        Just(RunItemName::ToolCalled),
        Just(RunItemName::ToolOutput),
        Just(RunItemName::ReasoningItemCreated),
        Just(RunItemName::McpApprovalRequested),
        Just(RunItemName::McpListTools),
        Just(RunItemName::Other),
    ]
}

fn arb_run_item() -> impl Strategy<Value = RunItem> {
    prop_oneof![
        arb_call().prop_map(|raw_item| RunItem::ToolCall { raw_item }),
        proptest::option::of("[a-z ]{0,12}")
            .prop_map(|o| RunItem::ToolCallOutput { output: o.map(Value::String) }),
        arb_call().prop_map(|raw_item| RunItem::HandoffCall { raw_item }),
        (proptest::option::of(arb_agent()), proptest::option::of(arb_agent())).prop_map(
            |(source_agent, target_agent)| RunItem::HandoffOutput {
                source_agent,
                target_agent,
            }
        ),
        Just(RunItem::MessageOutput { raw_item: Value::Null }),
        proptest::collection::vec("[a-z ]{0,12}", 0..3).prop_map(|texts| RunItem::Reasoning {
            raw_item: ReasoningRaw {
                summary: texts.into_iter().map(|text| SummaryText { text }).collect(),
                rest: Map::new(),
            },
        }),
        arb_call().prop_map(|raw_item| RunItem::McpApprovalRequest { raw_item }),
        proptest::collection::vec("[a-z_]{1,8}", 0..4).prop_map(|names| RunItem::McpListTools {
            raw_item: McpListToolsRaw {
                server_label: None,
                tools: names
                    .into_iter()
                    .map(|name| McpToolInfo {
                        name,
                        description: None,
                    })
                    .collect(),
            },
        }),
        Just(RunItem::Other),
    ]
}

fn arb_event() -> impl Strategy<Value = StreamEvent> {
    prop_oneof![
        "[a-zA-Z .']{0,8}".prop_map(|delta| StreamEvent::RawResponse {
            data: RawResponseData::TextDelta { delta },
        }),
        Just(StreamEvent::RawResponse {
            data: RawResponseData::Other
        }),
        (arb_run_item_name(), arb_run_item())
            .prop_map(|(name, item)| StreamEvent::RunItem { name, item }),
        arb_agent().prop_map(|new_agent| StreamEvent::AgentUpdated { new_agent }),
        Just(StreamEvent::Other),
    ]
}

fn arb_feed(max_len: usize) -> impl Strategy<Value = Vec<StreamEvent>> {
    proptest::collection::vec(arb_event(), 0..max_len)
}

fn is_text_delta(event: &StreamEvent) -> bool {
    matches!(
        event,
        StreamEvent::RawResponse {
            data: RawResponseData::TextDelta { .. }
        }
    )
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// No event is claimed by more than one standard handler
    #[test]
    fn prop_standard_predicates_are_exclusive(event in arb_event()) {
        let chain = HandlerChain::standard();
        let matching = chain.matching(&event);
        prop_assert!(matching.len() <= 1, "{event:?} matched {matching:?}");
    }

    /// Dispatch reports handled exactly when some handler matches
    #[test]
    fn prop_dispatch_result_matches_predicates(event in arb_event()) {
        let chain = HandlerChain::standard();
        let mut ctx = RunContext::new();
        let handled = chain.dispatch(&event, &mut ctx);
        prop_assert_eq!(handled, !chain.matching(&event).is_empty());
    }

    /// Unmatched events leave the context untouched
    #[test]
    fn prop_unmatched_events_have_no_effect(events in arb_feed(20)) {
        let chain = HandlerChain::standard();
        let mut ctx = RunContext::new();
        for event in &events {
            let before = ctx.clone();
            if !chain.dispatch(event, &mut ctx) {
                prop_assert_eq!(&ctx, &before);
            }
        }
    }

    /// Any run of deltas yields one text bubble holding their concatenation
    #[test]
    fn prop_text_deltas_merge(deltas in proptest::collection::vec("[a-z ]{0,6}", 1..30)) {
        let chain = HandlerChain::standard();
        let mut ctx = RunContext::new();
        for delta in &deltas {
            let event = StreamEvent::RawResponse {
                data: RawResponseData::TextDelta { delta: delta.clone() },
            };
            prop_assert!(chain.dispatch(&event, &mut ctx));
        }
        prop_assert_eq!(ctx.messages(), &[DisplayMessage::assistant(deltas.concat())]);
    }

    /// Labeled messages appear in event order, one per labeled event, and
    /// the buffer only ever grows by text deltas
    #[test]
    fn prop_labeled_messages_follow_event_order(events in arb_feed(30)) {
        let chain = HandlerChain::standard();
        let mut ctx = RunContext::new();
        let mut labeled_count = 0;
        let mut expected_buffer = String::new();

        for event in &events {
            let before_len = ctx.messages().len();
            let handled = chain.dispatch(event, &mut ctx);
            if let StreamEvent::RawResponse { data: RawResponseData::TextDelta { delta } } = event {
                expected_buffer.push_str(delta);
            } else if handled {
                labeled_count += 1;
                prop_assert_eq!(ctx.messages().len(), before_len + 1);
                let last = ctx.messages().last().unwrap();
                prop_assert!(last.category.is_some());
                prop_assert!(!last.content.is_empty());
            }
            prop_assert_eq!(ctx.buffer(), expected_buffer.as_str());
        }

        let labeled: Vec<_> = ctx.messages().iter().filter(|m| m.category.is_some()).collect();
        prop_assert_eq!(labeled.len(), labeled_count);

        let text_bubbles = ctx.messages().iter().filter(|m| m.is_text_reply()).count();
        prop_assert_eq!(text_bubbles, 1);
        if events.iter().any(is_text_delta) {
            prop_assert_eq!(&ctx.messages()[0].content, &expected_buffer);
        }
    }
}
