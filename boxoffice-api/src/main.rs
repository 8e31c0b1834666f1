use std::sync::Arc;
use std::net::SocketAddr;
use anyhow::Context;
use boxoffice_api::{app, state::AppState, worker};
use boxoffice_core::{SeatRegistry, SeatRepository, SystemClock};
use boxoffice_store::{app_config::Config, InMemorySeatRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "boxoffice_api=debug,boxoffice_store=debug,boxoffice_core=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!(
        "Loaded config: {} seats, lock timeout {:?}, sweep every {:?}",
        config.inventory.seat_ids.len(),
        config.reservation.lock_timeout(),
        config.reservation.sweep_interval(),
    );

    let registry = SeatRegistry::new(
        config.inventory.seat_ids.clone(),
        config.reservation.lock_timeout(),
        Arc::new(SystemClock),
    )
    .context("Invalid seat inventory")?;
    let seat_repo: Arc<dyn SeatRepository> = Arc::new(InMemorySeatRepository::new(registry));

    let sweeper = worker::start_expiry_sweeper(seat_repo.clone(), config.reservation.sweep_interval());

    let app = app(AppState::new(seat_repo));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Box Office API running on port {}", config.server.port);
    tracing::info!("Server started at: {}", chrono::Local::now().to_rfc2822());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    sweeper.abort();
    tracing::info!("Box Office API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
