//! Bookshelf REST API entry point.
//!
//! Binary name: `bookshelf`
//!
//! Parses CLI arguments, resolves configuration, opens the database and
//! serves the book API until Ctrl+C or SIGTERM.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use bookshelf_infra::config::{load_server_config, resolve_data_dir};
use bookshelf_infra::sqlite::pool::default_database_url;
use bookshelf_observe::tracing_setup::{init_tracing, shutdown_tracing};

use cli::{Cli, Commands, ServeArgs};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need logging or a database
    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "bookshelf", &mut std::io::stdout());
        return Ok(());
    }

    init_tracing(cli.log_directive(), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = serve(cli.into_serve_args()).await;

    shutdown_tracing();
    result
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let data_dir = resolve_data_dir();
    tokio::fs::create_dir_all(&data_dir).await?;

    let config = args.apply(load_server_config(&data_dir).await);
    let database_url = config
        .database_url
        .clone()
        .unwrap_or_else(|| default_database_url(&data_dir));

    let state = AppState::init(&database_url).await?;

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(%addr, data_dir = %data_dir.display(), "bookshelf listening");
    println!(
        "  {} Bookshelf API listening on {}",
        console::style("📚").bold(),
        console::style(format!("http://{addr}")).cyan()
    );
    println!("  {}", console::style("Press Ctrl+C to stop").dim());

    let router = http::router::build_router(state.clone());

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.close().await;
    println!("\n  Server stopped.");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
