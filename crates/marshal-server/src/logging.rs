use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging to stderr.
///
/// The level comes from `RUST_LOG` and defaults to `marshal_server=info`.
/// `verbose` forces debug output for this crate regardless of `RUST_LOG`.
pub fn init(verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        EnvFilter::new("marshal_server=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("marshal_server=info"))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    Ok(())
}
