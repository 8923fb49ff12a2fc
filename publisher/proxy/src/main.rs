use abstractbuilder::{ApplicationLister, ApplicationResolver, NoopResolver};
use anyhow::{Context, Result};
use backends::new_builder;
use clap::Parser;
use std::sync::Arc;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use tracing::{info, info_span, warn};

mod config;
mod logging;
mod pipe;

use config::ProxyConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = ProxyConfig::parse();
    logging::init(cfg.log_format, &cfg.log_level)?;
    cfg.validate()?;

    let resolver: Arc<dyn ApplicationResolver> = match &cfg.applications_file {
        Some(path) => {
            let lister = ApplicationLister::load_json(path)
                .await
                .with_context(|| format!("failed to load applications from {}", path.display()))?;
            Arc::new(lister)
        }
        None => {
            info!("No applications file configured, raw sources are used as is.");
            Arc::new(NoopResolver)
        }
    };

    let logger = info_span!("publisherproxy", backend = %cfg.backend);
    let builder = new_builder(cfg.backend, &cfg.builder_options(), resolver, logger.clone())?;

    info!(
        backend = %cfg.backend,
        prefix = %cfg.event_type_prefix,
        "Publisher proxy started, reading events from stdin."
    );

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Ctrl+C received, shutting down...");
                    shutdown.cancel();
                }
                Err(err) => warn!(error = %err, "Failed to listen for Ctrl+C."),
            }
        }
    });

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    let stats = pipe::run(builder.as_ref(), stdin, stdout, &logger, shutdown).await?;
    info!(
        built = stats.built,
        rejected = stats.rejected,
        retryable = stats.retryable,
        "Publisher proxy finished."
    );

    Ok(())
}
