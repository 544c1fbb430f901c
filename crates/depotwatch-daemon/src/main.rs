use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use depotwatch_daemon::services::spawn_status_monitor;
use depotwatch_daemon::watcher::spawn_snapshot_watcher;
use depotwatch_daemon::Config;
use depotwatch_notify::{LogSink, NotifySink};
use depotwatch_storage::{JsonFileStore, StateStore};
use tokio::signal;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "depotwatch", version, about = "Change detection and notification daemon")]
struct Cli {
    /// Path to the TOML config file. Defaults apply if it does not exist.
    #[arg(long, default_value = "depotwatch.toml")]
    config: PathBuf,

    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the polling loops (the default).
    Run,

    /// Print the effective configuration and exit.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let cfg = if cli.config.exists() {
        Config::load_from(&cli.config)?
    } else {
        info!("no config at {}, using defaults", cli.config.display());
        Config::default()
    };

    match cli.cmd.unwrap_or(Command::Run) {
        Command::CheckConfig => {
            print!("{}", toml::to_string_pretty(&cfg)?);
        }
        Command::Run => run(cfg).await?,
    }

    Ok(())
}

async fn run(cfg: Config) -> anyhow::Result<()> {
    info!(
        "starting depotwatch: snapshot={} state_root={}",
        cfg.snapshot_path().display(),
        cfg.state_root().display()
    );

    let store: Arc<dyn StateStore> = Arc::new(JsonFileStore::new(cfg.state_root()));
    let sink: Arc<dyn NotifySink> = Arc::new(LogSink);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let snapshot_loop = spawn_snapshot_watcher(cfg.clone(), sink.clone(), shutdown_rx.clone());
    let status_loop = spawn_status_monitor(cfg, store, sink, shutdown_rx);

    signal::ctrl_c().await?;
    info!("shutdown requested");
    let _ = shutdown_tx.send(true);

    let _ = snapshot_loop.await;
    let _ = status_loop.await;
    Ok(())
}
