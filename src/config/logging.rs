use tracing_subscriber::EnvFilter;

/// Environment variable overriding the diagnostic log filter.
pub const LOG_ENV: &str = "KENJA_LOG";

/// Pick the default filter from the CLI verbosity flags.
pub fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Initialize diagnostic logging on stderr.
///
/// User-facing output goes through `cli::output`; this only carries
/// tracing events. `KENJA_LOG` takes precedence over the flags.
pub fn init_logging(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();

    if let Err(e) = result {
        eprintln!("warning: could not initialize logging: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(default_directive(true, true), "error");
        assert_eq!(default_directive(true, false), "debug");
        assert_eq!(default_directive(false, false), "warn");
    }
}
