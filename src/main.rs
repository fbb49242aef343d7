use dotenvy::dotenv;
use tracing::{error, info, warn};

use hostelhub::logging::{init_tracing, shutdown_tracer};
use hostelhub::metrics::{init_metrics, metrics_app};
use hostelhub::router::init_router;
use hostelhub::state::init_app_state;

fn run_migrations_enabled() -> bool {
    std::env::var("RUN_MIGRATIONS")
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(false)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let state = match init_app_state().await {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to initialize application state");
            shutdown_tracer();
            return Err(e);
        }
    };

    if run_migrations_enabled() {
        hostelhub_db::run_migrations(&state.db).await?;
    }

    if !state.sms.is_enabled() {
        warn!("SMS delivery is disabled; OTPs are only logged");
    }

    let address = state.server_config.bind_address();
    let mut app = init_router(state);

    match init_metrics() {
        Ok(Some(handle)) => app = app.merge(metrics_app(handle)),
        Ok(None) => info!("Observability disabled, /metrics not mounted"),
        Err(e) => warn!(error = %e, "Failed to install Prometheus recorder"),
    }

    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(%address, "Server running");
    info!("Swagger UI at http://{address}/swagger-ui, Scalar at http://{address}/scalar");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown_tracer();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
