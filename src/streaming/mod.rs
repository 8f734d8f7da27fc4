pub mod extractor;
pub mod publisher;
pub mod sse;

pub use extractor::JsonArrayExtractor;
pub use publisher::{publish, StreamEnd, StreamMessage, STREAM_ERROR_MESSAGE};
pub use sse::{spawn_snapshot_stream, SnapshotStream};
