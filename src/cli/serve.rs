use std::time::Duration;

use poem::{listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;
use tokio::signal;

use crate::api::{AuditApi, HealthApi};
use crate::app_data::AppData;
use crate::config::{init_database, migrate_database, Settings};

/// Time given to open HTTP connections once a shutdown signal arrives
const HTTP_GRACE_PERIOD: Duration = Duration::from_secs(5);

/// Serve the HTTP API until SIGINT/SIGTERM, then drain the audit recorder
///
/// Returns an error when the recorder could not drain within
/// `AUDIT_SHUTDOWN_TIMEOUT`.
pub async fn run_server(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let db = init_database(settings).await?;
    migrate_database(&db).await?;

    let app_data = AppData::init(db, settings);

    let api_service = OpenApiService::new(
        (
            HealthApi::new(app_data.db.clone(), app_data.recorder.clone()),
            AuditApi::new(app_data.recorder.clone()),
        ),
        "Audit Backend API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(format!("http://{}/api", settings.server_address()));

    let ui = api_service.swagger_ui();

    let app = Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui);

    let address = settings.server_address();
    tracing::info!(address = %address, "Starting server");
    tracing::info!("Swagger UI available at http://{}/swagger", address);

    Server::new(TcpListener::bind(address))
        .run_with_graceful_shutdown(app, shutdown_signal(), Some(HTTP_GRACE_PERIOD))
        .await?;

    tracing::info!("HTTP server stopped, draining audit records");
    app_data.shutdown(settings.audit_shutdown_timeout()).await?;

    Ok(())
}

/// Wait for a shutdown signal (SIGINT or SIGTERM)
///
/// A handler that fails to install is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
