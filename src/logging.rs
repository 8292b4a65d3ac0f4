//! Operator-facing log output.
//!
//! Messages go to stdout as plain lines (no timestamps, no targets) so the
//! tool reads like a build script inside CI logs. `RUST_LOG` overrides the
//! level picked from the command line.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Log level implied by the verbosity flags.
pub fn level_for(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "warn";
    }
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(verbose: u8, quiet: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbose, quiet)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .with_ansi(!no_color && std::io::stdout().is_terminal())
        .with_target(false)
        .without_time()
        .with_level(verbose > 0)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_overrides_verbosity() {
        assert_eq!(level_for(3, true), "warn");
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for(0, false), "info");
        assert_eq!(level_for(1, false), "debug");
        assert_eq!(level_for(2, false), "trace");
        assert_eq!(level_for(9, false), "trace");
    }
}
