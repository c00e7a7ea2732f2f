use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eating_routine::config::Config;
use eating_routine::db::{init_db, MealRepository};
use eating_routine::server::{router, AppState};

#[derive(Parser)]
#[command(name = "eating-routine")]
#[command(version)]
#[command(about = "HTTP backend for meal records", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config file and environment)
    #[arg(long, short)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eating_routine=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config)?;
    if let Some(port) = cli.port {
        config.port = port;
    }

    let pool = init_db(&config.database_path).await.map_err(|e| {
        tracing::error!("Connection error: {}", e);
        e
    })?;
    let meals = MealRepository::new(pool);

    let app = router(AppState::new(meals.clone()));

    let address = config.listen_address();
    let listener = TcpListener::bind(&address).await?;
    tracing::info!("Server started on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutting down, closing store connection");
    meals.close().await;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                tracing::info!("Received terminate signal");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
