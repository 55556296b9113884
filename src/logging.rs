//! Diagnostic logging setup for the binary.

use tracing_subscriber::{EnvFilter, fmt};

/// Maps `-q` / `-v` counts to a default filter directive.
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs a stderr `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over the command-line verbosity so library
/// targets can be tuned individually. Results go to stdout, so diagnostics
/// never mix with the reported curve.
pub fn init_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::default_directive;

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(default_directive(3, true), "error");
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(default_directive(0, false), "warn");
        assert_eq!(default_directive(1, false), "info");
        assert_eq!(default_directive(2, false), "debug");
        assert_eq!(default_directive(9, false), "trace");
    }
}
