use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use regsearch_core::{Config, DatasetStore, SearchService};
use regsearch_server::{router, AppState, Mode};

#[derive(Parser)]
#[command(name = "regsearch", about = "Privacy-filtered search over a registration dataset")]
struct Cli {
    /// Field policy and server configuration.
    #[arg(long, env = "REGSEARCH_CONFIG", default_value = "config/fields_config.yaml")]
    config: PathBuf,

    /// Request framing: `simple` JSON or A2A `compliant`.
    #[arg(long, default_value_t = Mode::Simple)]
    mode: Mode,

    /// Override `server.host`.
    #[arg(long)]
    host: Option<String>,

    /// Override `server.port`.
    #[arg(long)]
    port: Option<u16>,

    /// Override `data.csv_path`.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Default the log filter to `debug` instead of `info`.
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    let mut config = Config::load(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(data) = cli.data {
        config.data.csv_path = data;
    }

    let store = DatasetStore::open(&config.data.csv_path)
        .with_context(|| format!("loading dataset from {}", config.data.csv_path.display()))?;
    let service = SearchService::new(Arc::new(store), config.fields.clone());

    tracing::info!(
        searchable = ?service.policy().searchable.to_vec(),
        exposed = ?service.policy().exposed.to_vec(),
        "field policy"
    );
    if let Some(snapshot) = service.snapshot() {
        let missing = service.unmatched_fields(&snapshot);
        if !missing.is_empty() {
            tracing::debug!(
                fields = ?missing,
                "configured fields not present in dataset; they will be ignored"
            );
        }
    }

    #[cfg(unix)]
    spawn_reload_on_sighup(service.clone())?;

    let state = AppState::new(&config, service, cli.mode);
    let app = router(state, &config.server.metadata_endpoint);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(
        %addr,
        mode = %cli.mode,
        metadata = %config.server.metadata_endpoint,
        "{} listening",
        config.agent.display_name
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

/// Re-read the dataset whenever the process receives `SIGHUP`.
#[cfg(unix)]
fn spawn_reload_on_sighup(service: SearchService) -> anyhow::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut hangup = signal(SignalKind::hangup()).context("installing SIGHUP handler")?;
    tokio::spawn(async move {
        while hangup.recv().await.is_some() {
            let svc = service.clone();
            match tokio::task::spawn_blocking(move || svc.reload()).await {
                Ok(Ok(report)) => tracing::info!(
                    rows = report.rows,
                    previous_rows = ?report.previous_rows,
                    "reloaded on SIGHUP"
                ),
                Ok(Err(e)) => tracing::warn!(error = %e, "reload on SIGHUP failed"),
                Err(e) => tracing::error!(error = %e, "reload task panicked"),
            }
        }
    });
    Ok(())
}
