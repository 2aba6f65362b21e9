use anyhow::Result;

/// Installs the fmt subscriber. `RUST_LOG` takes precedence over the configured
/// directives. Calling it twice leaves the first subscriber in place.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging(default_filter: &str) -> Result<()> {
    use anyhow::Context;
    use tracing_subscriber::EnvFilter;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)
            .with_context(|| format!("invalid log filter: {default_filter}"))?,
    };

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}

/// The browser build logs through the subscriber Dioxus installs at launch.
#[cfg(target_arch = "wasm32")]
pub fn init_logging(_default_filter: &str) -> Result<()> {
    Ok(())
}
