//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use common::{AppError, AppResult};

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::infra::Database;
use crate::services::Services;

/// Execute the serve command
pub async fn execute(args: ServeArgs, mut config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    config.override_server(args.host, args.port);

    // Primary account store
    let db = if args.migrate {
        Database::connect(&config.database).await?
    } else {
        Database::connect_without_migrations(&config.database).await?
    };
    let db = Arc::new(db);
    tracing::info!("Database connected");

    // 3K directory is optional; the pool connects on first use
    let three_k = match &config.three_k_database {
        Some(three_k_config) => match Database::connect_without_migrations(three_k_config).await {
            Ok(three_k_db) => {
                tracing::info!("3K database configured");
                Some(Arc::new(three_k_db))
            }
            Err(e) => {
                tracing::warn!("3K database unavailable, continuing without it: {}", e);
                None
            }
        },
        None => {
            tracing::warn!("3K database not configured");
            None
        }
    };

    let services = Services::from_databases(db, three_k, &config);
    let app_state = AppState::from_container(&services);

    // Build router
    let app = create_router(app_state);

    // Start server
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
