use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, patch, post},
    Router,
};
use log::warn;
use tower_http::cors::CorsLayer;

use crate::{
    handlers::{self, auth, data, users},
    middleware::trace_requests,
    state::AppState,
};

pub fn app(state: AppState, cors_origins: &[String]) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/check-username", post(auth::check_username))
        .route("/check-email", post(auth::check_email));

    let user_routes = Router::new()
        .route("/me", get(users::read_me))
        .route("/me/usage", get(users::read_usage))
        .route("/sessions/{session_id}/archive", patch(users::archive_session))
        .route("/sessions/{session_id}/unarchive", patch(users::unarchive_session));

    let data_routes = Router::new()
        .route("/generate-ai-stream", post(data::generate_ai_stream))
        .route("/generate-title", post(data::generate_title));

    Router::new()
        .route("/api", get(handlers::root))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/data", data_routes)
        .layer(middleware::from_fn(trace_requests))
        .layer(cors(cors_origins))
        .with_state(state)
}

fn cors(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {origin}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}
