//! Campus Agent - streamed chat front end for a multi-agent campus assistant
//!
//! Turns the agent runtime's event feed into a progressively rendered chat
//! transcript served over Server-Sent Events.

mod agents;
mod api;
mod config;
mod dispatch;
mod event;
mod runtime;
mod transcript;

use api::{create_router, AppState};
use config::AppConfig;
use dispatch::HandlerChain;
use runtime::{RemoteRunner, TurnDriver};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campus_agent=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = AppConfig::from_env();

    let runner = RemoteRunner::new(&config.runtime_url, config.runtime_timeout)?;
    tracing::info!(
        endpoint = %runner.endpoint(),
        idle_timeout_secs = config.runtime_timeout.as_secs(),
        "Agent runtime configured"
    );

    let agent = config.demo.agent();
    let chain = HandlerChain::standard();
    tracing::info!(
        demo = config.demo.as_str(),
        agent = %agent.name,
        handoffs = agent.handoffs.len(),
        handlers = ?chain.handler_names(),
        "Chatbot initialized"
    );

    let driver = TurnDriver::new(Arc::new(runner), chain, agent);
    let state = AppState::new(driver, config.demo.info());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Campus agent server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
