use std::sync::Arc;

use anyhow::Context;
use dotenv::dotenv;
use env_logger::Env;
use tokio::{net::TcpListener, signal};

use datagen::{
    app,
    auth::TokenService,
    config::Config,
    database::{establish_connection, PgUserStore},
    llm::OpenAiCompatModel,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::load()?;

    let pool = establish_connection(&config.database_url).context("Failed to create database pool")?;

    let app_state = AppState::new(
        Arc::new(PgUserStore::new(pool)),
        Arc::new(OpenAiCompatModel::from_config(&config)),
        TokenService::new(&config.jwt_secret, config.token_ttl_minutes),
    );

    let app = app(app_state, &config.cors_origins);

    let listener = TcpListener::bind(&config.site_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.site_addr))?;
    log::info!("listening on http://{}", &config.site_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        log::error!("Failed to install Ctrl+C handler: {e}");
        std::future::pending::<()>().await;
    }
    log::info!("Received Ctrl+C, shutting down");
}
