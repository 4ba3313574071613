//! Logging setup for the command line tool.
//!
//! The library crates only emit `tracing` events. The binary installs a
//! subscriber once at startup with [`init`]; `RUST_LOG` overrides the level
//! chosen from the command line.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Target names for log filtering.
///
/// Use these with `RUST_LOG` directives, e.g. `RUST_LOG=fontscope::scraper=debug`.
/// HTTP requests log under `fontscope_net::http`.
pub mod targets {
    /// Site analysis.
    pub const SCRAPER: &str = "fontscope::scraper";
    /// Result rendering and saving.
    pub const OUTPUT: &str = "fontscope::output";
}

/// The default level: warnings only, or everything down to `debug`.
pub fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    }
}

/// Install the global subscriber, writing to stderr.
pub fn init(verbose: bool) {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level(verbose).into())
        .from_env_lossy();

    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();
}
