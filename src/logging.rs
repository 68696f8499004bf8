use anyhow::Result;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Log to stderr so rendered views on stdout stay clean. `RUST_LOG` overrides
/// the default level.
pub fn init_logging() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set up logging: {}", e))?;

    Ok(())
}
