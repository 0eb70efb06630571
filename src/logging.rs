use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Install the global tracing subscriber writing to stderr.
///
/// `verbose` forces `debug` and ignores `RUST_LOG`. Otherwise `RUST_LOG` wins
/// over the configured level.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let env_filter = env_filter(&config.level, verbose)?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    let installed = if config.format == "json" {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| anyhow!("Failed to initialise logging: {e}"))
}

fn env_filter(level: &str, verbose: bool) -> Result<EnvFilter> {
    if verbose {
        return Ok(EnvFilter::try_new("debug")?);
    }
    Ok(EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_ignores_rust_log() {
        // Whatever RUST_LOG holds in the test environment, verbose is debug
        let filter = env_filter("warn", true).unwrap();
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn test_configured_level_is_used() {
        let filter = env_filter("warn", false).unwrap();
        if std::env::var_os("RUST_LOG").is_none() {
            assert_eq!(filter.to_string(), "warn");
        }
    }
}
