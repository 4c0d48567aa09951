use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookshelf::config::Config;
use bookshelf::infrastructure::AppState;
use bookshelf::server;

#[tokio::main]
async fn main() {
    // Load .env before the filter reads RUST_LOG
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookshelf=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let config = Config::from_env().with_args(&args);

    // Catalog starts empty and lives as long as the process
    let state = AppState::new();

    if let Err(e) = server::run_server(&config, state).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
