use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tower_http::services::ServeDir;

use memotrack_core::auth::StaticCredentials;
use memotrack_core::query::MemoEngine;
use memotrack_core::session::InMemorySessionStore;
use memotrack_core::storage::json_file::JsonFileStorage;
use memotrack_rest::AppState;

#[derive(Parser)]
#[command(name = "memotrack", about = "Memo tracking backend for market administration")]
struct Cli {
    /// Path to the memo data file
    #[arg(long, default_value = "memos.json", env = "MEMOTRACK_DATA_PATH")]
    data_path: PathBuf,

    /// Listening port
    #[arg(long, default_value = "3000", env = "PORT")]
    port: u16,

    /// Directory of static front-end assets (served at `/` when set)
    #[arg(long, env = "MEMOTRACK_STATIC_DIR")]
    static_dir: Option<PathBuf>,

    /// Login username
    #[arg(long, default_value = "admin", env = "MEMOTRACK_ADMIN_USER")]
    admin_user: String,

    /// Login password
    #[arg(long, default_value = "changeme", env = "MEMOTRACK_ADMIN_PASSWORD")]
    admin_password: String,

    /// Session time-to-live in seconds (0 = sessions never expire)
    #[arg(long, default_value = "0", env = "MEMOTRACK_SESSION_TTL")]
    session_ttl_seconds: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Opening the storage also backfills ids on legacy records.
    let storage = Arc::new(JsonFileStorage::open(&cli.data_path).await?);
    tracing::info!("Memo data file ready at {:?}", storage.path());

    let ttl = match cli.session_ttl_seconds {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };

    let state = AppState {
        engine: Arc::new(MemoEngine::new(storage)),
        sessions: Arc::new(InMemorySessionStore::new(ttl)),
        auth: Arc::new(StaticCredentials::new(cli.admin_user, cli.admin_password)),
    };

    let mut app = memotrack_rest::router(state);
    if let Some(ref dir) = cli.static_dir {
        tracing::info!("Serving static front-end from {:?}", dir);
        app = app.fallback_service(ServeDir::new(dir));
    }

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", cli.port)).await?;
    tracing::info!("Memotrack listening on 0.0.0.0:{}", cli.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {e}");
        return;
    }
    tracing::info!("Received shutdown signal");
}
