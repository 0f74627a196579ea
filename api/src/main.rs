use api::auth::middleware::log_request;
use api::routes::routes;
use api::state::AppState;
use api::ws::ws_routes;
use axum::{Router, middleware::from_fn_with_state};
use migration::Migrator;
use sea_orm_migration::MigratorTrait;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tracing_appender::rolling;
use util::config::AppConfig;

#[tokio::main]
async fn main() {
    // Load configuration and initialize logging
    let config = AppConfig::from_env().expect("Invalid configuration");
    let _log_guard = init_logging(&config);

    // Set up dependencies
    let db = db::connect(&config.database_path)
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid address");
    let app_state = AppState::new(db, &config).expect("Failed to build OAuth client");

    // Build app router
    let app = Router::new()
        .nest("/api", routes())
        .merge(ws_routes())
        .layer(from_fn_with_state(app_state.clone(), log_request))
        .layer(CorsLayer::very_permissive())
        .with_state(app_state);

    tracing::info!("Starting {} on http://{addr}", config.project_name);

    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server crashed");
}

fn init_logging(config: &AppConfig) -> tracing_appender::non_blocking::WorkerGuard {
    use std::fs;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    fs::create_dir_all("logs").ok();

    let file_appender = rolling::daily("logs", &config.log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    // No colour codes on production stdout.
    let stdout_layer = config.log_to_stdout.then(|| {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_ansi(!config.is_production())
            .with_target(true)
    });

    let env_filter =
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("api=info,services=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    guard
}
