use axum::{extract::Request, middleware::Next, response::Response};
use tracing::Instrument;
use uuid::Uuid;

/// Wraps each request in a span carrying a fresh `request_id`.
pub async fn trace_requests(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();

    let span = tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    );

    async move {
        let response = next.run(request).await;
        tracing::info!(status = %response.status(), "request completed");
        response
    }
    .instrument(span)
    .await
}
