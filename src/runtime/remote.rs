//! HTTP client for a remote agent runtime
//!
//! The runtime accepts a [`RunRequest`] as JSON and answers with a
//! newline-delimited JSON body, one [`StreamEvent`] per line.

use super::traits::{AgentRunner, EventStream, RunRequest};
use super::RunError;
use crate::event::StreamEvent;
use async_trait::async_trait;
use futures::{future, StreamExt, TryStreamExt};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tokio_util::codec::{FramedRead, LinesCodec};
use tokio_util::io::StreamReader;

/// Longest feed line accepted before the run is failed
const MAX_LINE_LENGTH: usize = 4 * 1024 * 1024;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Runner backed by an HTTP agent runtime
pub struct RemoteRunner {
    client: Client,
    endpoint: String,
}

impl RemoteRunner {
    /// `idle_timeout` bounds each wait for the next chunk of the feed, not the
    /// whole run.
    pub fn new(base_url: &str, idle_timeout: Duration) -> Result<Self, RunError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .read_timeout(idle_timeout)
            .build()
            .map_err(|e| RunError::unavailable(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!("{}/runs/stream", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AgentRunner for RemoteRunner {
    async fn run_streamed(&self, request: &RunRequest) -> Result<EventStream, RunError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Accept", "application/x-ndjson")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(
                    error = %e,
                    endpoint = %self.endpoint,
                    "Agent runtime request failed"
                );
                RunError::network(format!("Failed to reach agent runtime: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %body, "Agent runtime error");
            return Err(RunError::upstream(format!(
                "Agent runtime returned {status}: {body}"
            )));
        }

        let body = response.bytes_stream().map_err(std::io::Error::other);
        let lines = FramedRead::new(
            StreamReader::new(body),
            LinesCodec::new_with_max_length(MAX_LINE_LENGTH),
        );

        let events = lines.filter_map(|line| {
            future::ready(match line {
                Ok(line) => parse_event_line(&line),
                Err(e) => Some(Err(RunError::network(format!(
                    "Agent runtime feed interrupted: {e}"
                )))),
            })
        });

        Ok(events.boxed())
    }
}

/// Decode one feed line. Blank lines are keep-alives and yield nothing.
///
/// Only a line that is not JSON at all is an error. JSON that does not look
/// like any known event becomes [`StreamEvent::Other`] and is dropped later.
fn parse_event_line(line: &str) -> Option<Result<StreamEvent, RunError>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let value: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(error = %e, line = %line, "Undecodable event in agent feed");
            return Some(Err(RunError::decode(format!(
                "Invalid event from agent runtime: {e}"
            ))));
        }
    };
    Some(Ok(StreamEvent::deserialize(value).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Unrecognized event shape in agent feed");
        StreamEvent::Other
    })))
}
