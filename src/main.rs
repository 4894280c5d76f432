//! LifeLegacy gateway server.

use std::sync::Arc;

use axum::Router;
use sqlx::postgres::PgPoolOptions;

use lifelegacy_gateway::adapters::auth::{JwtSessionValidator, TokenSessionAccessor};
use lifelegacy_gateway::adapters::http::{app_router, TenantRoutingState};
use lifelegacy_gateway::adapters::{InMemoryTenantDirectory, PostgresTenantDirectory};
use lifelegacy_gateway::application::ResolveRouteHandler;
use lifelegacy_gateway::config::{AppConfig, DatabaseConfig};
use lifelegacy_gateway::ports::{SessionAccessor, TenantDirectory};
use lifelegacy_gateway::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.server)?;

    let router_config = Arc::new(config.router_config()?);
    tracing::info!(
        environment = ?config.server.environment,
        app_domain = %router_config.app_domain,
        "Starting LifeLegacy gateway"
    );

    let directory = tenant_directory(&config.database).await?;

    let validator = Arc::new(JwtSessionValidator::new(config.auth.jwt_config()?)?);
    let sessions: Arc<dyn SessionAccessor> = Arc::new(TokenSessionAccessor::new(validator));

    let handler = Arc::new(ResolveRouteHandler::new(router_config, directory, sessions));
    let state = TenantRoutingState::new(handler, config.auth.session_cookie.clone());
    let app = app_router(Router::new(), state, config.server.request_timeout());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn tenant_directory(
    config: &DatabaseConfig,
) -> Result<Arc<dyn TenantDirectory>, Box<dyn std::error::Error>> {
    let Some(url) = config.url() else {
        tracing::warn!("No database configured, using an empty in-memory tenant directory");
        return Ok(Arc::new(InMemoryTenantDirectory::new()));
    };

    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .connect(url)
        .await?;

    if config.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    Ok(Arc::new(PostgresTenantDirectory::new(pool)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
