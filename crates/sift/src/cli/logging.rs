//! Diagnostic logging to stderr.

use std::io;

use tracing::Level;

/// Chooses the log level for the verbosity flags.
///
/// Without flags only warnings are shown.
pub fn level(verbose: u8, debug: bool) -> Level {
    match (debug, verbose) {
        (true, _) | (false, 2..) => Level::DEBUG,
        (false, 1) => Level::INFO,
        (false, 0) => Level::WARN,
    }
}

/// Installs the global subscriber writing to stderr.
pub fn init(verbose: u8, debug: bool) {
    tracing_subscriber::fmt()
        .with_max_level(level(verbose, debug))
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels() {
        assert_eq!(level(0, false), Level::WARN);
        assert_eq!(level(1, false), Level::INFO);
        assert_eq!(level(2, false), Level::DEBUG);
        assert_eq!(level(5, false), Level::DEBUG);
        assert_eq!(level(0, true), Level::DEBUG);
    }
}
