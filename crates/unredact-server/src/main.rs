mod app;
mod config;
mod error;
mod filename;

use config::ServerConfig;
use error::StartupError;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = serve().await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

async fn serve() -> Result<(), StartupError> {
    let config = ServerConfig::from_env()?;
    let addr = config.addr();

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app::router())
        .await
        .map_err(StartupError::Serve)
}
