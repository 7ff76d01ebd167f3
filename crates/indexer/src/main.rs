mod cli;
mod extract;
mod ingest;
mod metrics;
mod progress;
mod retry;
mod server;


use anyhow::Context;
use hive_chain_client::ReqwestChainClient;
use hive_post_store::SqlitePostStore;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};


fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .init();
}


fn main() -> anyhow::Result<()> {
    let args = <cli::Cli as clap::Parser>::parse();

    init_logging();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run(&args))?;
    Ok(())
}


async fn run(args: &cli::Cli) -> anyhow::Result<()> {
    if let Some(port) = args.prom_port {
        let mut registry = prometheus_client::registry::Registry::default();
        metrics::register_metrics(&mut registry);
        tokio::spawn(async move {
            if let Err(err) = server::run_server(registry, port).await {
                error!("metrics server failed: {:#}", err);
            }
        });
        info!("metrics server listening on port {}", port);
    }

    let retry_delay = Duration::from_secs(args.retry_delay);

    let store = retry::retry_with_backoff(args.max_retries, retry_delay, "database open", || async move {
        SqlitePostStore::open(&args.db).await
    })
    .await
    .context("could not open the post store")?;

    let chain = ReqwestChainClient::from_url(args.src.clone());

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            signal_cancel.cancel();
        }
    });

    let ingestion = ingest::IngestionLoop::new(
        Arc::new(chain),
        Arc::new(store),
        ingest::IngestionConfig {
            genesis_block: args.genesis_block,
            batch_size: args.batch_size,
            max_retries: args.max_retries,
            retry_delay,
        },
        cancel,
    );

    ingestion.run().await?;
    Ok(())
}
