use axum::extract::DefaultBodyLimit;
use std::net::SocketAddr;
use std::path::Path;
use tokio::net::TcpListener;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use user_directory::{
    config::{get_config, init_config},
    database::pool::{create_pool, run_migrations},
    middleware::cors::permissive_cors,
    routes, AppState,
};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("user_directory=debug,tower_http=info"));
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_config()?;
    init_tracing();
    let config = get_config()?;

    let pool = create_pool(config).await?;
    info!("Database connected");
    run_migrations(&pool).await?;

    let app_state = AppState::new(pool);

    let frontend_dir = Path::new(&config.frontend_dir);
    info!("Serving frontend from: {}", frontend_dir.display());
    let frontend = ServeDir::new(frontend_dir)
        .fallback(ServeFile::new(frontend_dir.join("index.html")));

    let app = routes::api_router()
        .fallback_service(frontend)
        .with_state(app_state)
        .layer(permissive_cors())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(config.body_limit_bytes));

    let addr: SocketAddr = config.server_address().parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
