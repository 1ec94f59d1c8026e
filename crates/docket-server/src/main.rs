//! # Docket Server
//!
//! Main entry point: load configuration, wire the record store, cache and
//! service, then serve the REST API until Ctrl+C or SIGTERM.

use docket_config::{AppConfig, ConfigLoader, ObservabilityConfig};
use docket_core::{DocketError, DocketResult};
use docket_repository::{create_pool, DatabasePoolInterface};
use docket_rest::{create_router, AppState};
use docket_server::di::AppModuleBuilder;
use docket_server::startup::{
    connect_cache, init_metrics, print_banner, print_startup_info, spawn_count_reporter,
};
use docket_service::ServiceTimeouts;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match load_config().await {
        Ok(config) => config,
        Err(e) => {
            init_logging(&ObservabilityConfig::default());
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.observability);

    print_banner();
    info!("Starting Docket Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn load_config() -> DocketResult<AppConfig> {
    let loader = ConfigLoader::from_default_location()?;
    Ok(loader.get().await)
}

async fn run(config: AppConfig) -> DocketResult<()> {
    info!("Environment: {}", config.app.environment);

    let metrics = init_metrics(config.observability.metrics_enabled)?;

    let db_pool = create_pool(&config.database).await?;
    db_pool.ensure_schema().await?;

    let cache = connect_cache(&config.cache).await;

    let module = AppModuleBuilder::new()
        .with_database_pool(db_pool.clone())
        .with_cache(cache)
        .with_cache_ttl(config.cache.ttl())
        .with_timeouts(ServiceTimeouts::from_config(&config))
        .build()?;

    let task_service = module.task_service();

    let mut state = AppState::new(task_service.clone());
    for check in module.health_checks() {
        state = state.with_health_check(check);
    }
    if let Some(handle) = metrics {
        state = state.with_metrics(handle);
    }

    let router = create_router(state, &config.server);

    let reporter = spawn_count_reporter(
        task_service,
        config.observability.count_report_interval(),
    );

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| DocketError::Internal(format!("Failed to bind {addr}: {e}")))?;

    print_startup_info(&addr, module.cache_backend());

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| DocketError::Internal(format!("REST server error: {e}")));

    reporter.abort();
    db_pool.close().await;

    served?;
    info!("Server shutdown complete");
    Ok(())
}

fn init_logging(config: &ObservabilityConfig) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{},docket=debug,tower_http=debug",
            config.log_level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
