use std::future::Future;

use futures::StreamExt;
use log::{debug, error, info};
use serde_json::Value;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::extractor::JsonArrayExtractor;
use crate::llm::{FragmentStream, LlmError};

pub const STREAM_ERROR_MESSAGE: &str = "Failed to stream data.";

/// One server-sent event body.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamMessage {
    /// The whole array extracted so far. Clients keep only the latest one.
    Snapshot(Vec<Value>),
    /// Terminal; nothing follows it.
    Error(String),
}

impl StreamMessage {
    pub fn payload(&self) -> String {
        match self {
            StreamMessage::Snapshot(items) => serde_json::to_string(items).unwrap_or_default(),
            StreamMessage::Error(message) => serde_json::json!({ "error": message }).to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEnd {
    Exhausted,
    Disconnected,
    Failed,
}

/// Drives `source` to completion, pushing a snapshot to `tx` every time the
/// accumulated text parses as a JSON array.
///
/// The client is checked once per fragment: when `disconnect` is cancelled or
/// the receiving half is gone, the source is dropped without being polled
/// again. A source error becomes a single `StreamMessage::Error`.
pub async fn publish<F>(
    source: F,
    tx: mpsc::Sender<StreamMessage>,
    disconnect: CancellationToken,
) -> StreamEnd
where
    F: Future<Output = Result<FragmentStream, LlmError>>,
{
    let mut fragments = match source.await {
        Ok(fragments) => fragments,
        Err(e) => return fail(&tx, e).await,
    };

    let mut extractor = JsonArrayExtractor::new();
    let mut snapshots = 0usize;

    while let Some(item) = fragments.next().await {
        if disconnect.is_cancelled() || tx.is_closed() {
            info!("Client disconnected after {snapshots} snapshots, stopping generation");
            return StreamEnd::Disconnected;
        }

        let fragment = match item {
            Ok(fragment) => fragment,
            Err(e) => return fail(&tx, e).await,
        };

        if let Some(items) = extractor.feed(&fragment) {
            snapshots += 1;
            debug!("Snapshot {snapshots}: {} items", items.len());
            if tx.send(StreamMessage::Snapshot(items)).await.is_err() {
                info!("Client went away while sending snapshot {snapshots}");
                return StreamEnd::Disconnected;
            }
        }
    }

    if snapshots == 0 {
        info!(
            "Model stream ended without a parseable array ({} bytes buffered)",
            extractor.buffer().len()
        );
    } else {
        info!("Model stream finished after {snapshots} snapshots");
    }
    StreamEnd::Exhausted
}

async fn fail(tx: &mpsc::Sender<StreamMessage>, e: LlmError) -> StreamEnd {
    error!("Error during AI data streaming: {e}");
    // the client may already be gone; nothing left to do in that case
    let _ = tx
        .send(StreamMessage::Error(STREAM_ERROR_MESSAGE.to_string()))
        .await;
    StreamEnd::Failed
}
