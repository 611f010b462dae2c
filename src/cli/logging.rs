//! stderr logging for the `pfx` binary

use tracing_subscriber::EnvFilter;

/// Pick the log filter: `-q`/`-v` flags win, then `RUST_LOG`, then the config.
pub fn filter_for(verbose: u8, quiet: bool, config_level: &str) -> EnvFilter {
    let flag_level = if quiet {
        Some("error")
    } else {
        match verbose {
            0 => None,
            1 => Some("info"),
            2 => Some("debug"),
            _ => Some("trace"),
        }
    };

    match flag_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config_level)),
    }
}

/// Install the global subscriber. Calling this twice is harmless.
pub fn init(verbose: u8, quiet: bool, config_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_for(verbose, quiet, config_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
