use tracing_subscriber::EnvFilter;

use crate::error::{DemoError, Result};

/// Install the stderr subscriber. `RUST_LOG` wins over `default_directive`.
pub fn init(default_directive: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_filter(default_directive)?,
    };
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
    if installed.is_err() {
        tracing::debug!(target: "rewind_demo", "subscriber already installed");
    }
    Ok(())
}

fn build_filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive)
        .map_err(|err| DemoError::invalid_argument(format!("log level `{directive}`: {err}")))
}
