pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod llm;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod schema;
pub mod services;
pub mod state;
pub mod streaming;
pub mod types;

pub use routes::app;
