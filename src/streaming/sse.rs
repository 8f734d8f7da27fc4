use std::{
    convert::Infallible,
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use axum::response::sse::{Event, Sse};
use futures::stream::Stream;
use tokio::sync::mpsc;
use tokio_util::sync::{CancellationToken, DropGuard};

use super::publisher::{publish, StreamMessage};
use crate::llm::{FragmentStream, LlmError};

const CHANNEL_CAPACITY: usize = 16;

/// SSE body fed by a publisher task. Dropping it (axum does so when the client
/// hangs up) cancels the task's disconnect token.
pub struct SnapshotStream {
    receiver: mpsc::Receiver<StreamMessage>,
    _disconnect: DropGuard,
}

impl Stream for SnapshotStream {
    type Item = Result<Event, Infallible>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver
            .poll_recv(cx)
            .map(|message| message.map(|m| Ok(Event::default().data(m.payload()))))
    }
}

/// Spawns the publisher for `source` and returns the response half.
pub fn spawn_snapshot_stream<F>(source: F) -> Sse<SnapshotStream>
where
    F: Future<Output = Result<FragmentStream, LlmError>> + Send + 'static,
{
    let (tx, receiver) = mpsc::channel(CHANNEL_CAPACITY);
    let token = CancellationToken::new();
    let task_token = token.clone();

    tokio::spawn(async move {
        let end = publish(source, tx, task_token).await;
        log::debug!("Snapshot stream closed: {end:?}");
    });

    Sse::new(SnapshotStream {
        receiver,
        _disconnect: token.drop_guard(),
    })
}
