//! Server-Sent Events for chat turns

use crate::runtime::RunError;
use crate::transcript::DisplayMessage;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use serde_json::json;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::StreamExt;

/// Update sent to the browser during a turn
#[derive(Debug, Clone, PartialEq)]
pub enum TurnUpdate {
    /// Full transcript, replaces whatever was rendered
    Snapshot { messages: Vec<DisplayMessage> },
    Error { message: String, retryable: bool },
    Done,
}

impl From<Result<Vec<DisplayMessage>, RunError>> for TurnUpdate {
    fn from(result: Result<Vec<DisplayMessage>, RunError>) -> Self {
        match result {
            Ok(messages) => TurnUpdate::Snapshot { messages },
            Err(e) => TurnUpdate::Error {
                retryable: e.kind.is_retryable(),
                message: e.message,
            },
        }
    }
}

/// Wrap a snapshot stream as an SSE response terminated by `done`
pub fn turn_stream<S>(snapshots: S) -> Sse<impl Stream<Item = Result<Event, Infallible>>>
where
    S: Stream<Item = Result<Vec<DisplayMessage>, RunError>> + Send + 'static,
{
    let updates = snapshots
        .map(TurnUpdate::from)
        .chain(tokio_stream::once(TurnUpdate::Done))
        .map(|update| Ok(turn_update_to_axum(update)));

    Sse::new(updates).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn turn_update_to_axum(update: TurnUpdate) -> Event {
    let (event_type, data) = match update {
        TurnUpdate::Snapshot { messages } => (
            "snapshot",
            json!({
                "type": "snapshot",
                "messages": messages
            }),
        ),
        TurnUpdate::Error { message, retryable } => (
            "error",
            json!({
                "type": "error",
                "message": message,
                "retryable": retryable
            }),
        ),
        TurnUpdate::Done => (
            "done",
            json!({
                "type": "done"
            }),
        ),
    };

    Event::default().event(event_type).data(data.to_string())
}
