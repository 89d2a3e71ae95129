//! Log output for the `skilltree` binary.
//!
//! The libraries log through the `log` facade; the subscriber installed
//! here also collects those records. `RUST_LOG` overrides the level.

use tracing_subscriber::EnvFilter;

/// Installs a stderr subscriber. `verbose` raises skilltree crates to debug.
pub fn init(verbose: bool) {
    // Target directives match by prefix, so `skilltree` covers every crate.
    let fallback = if verbose {
        "warn,skilltree=debug"
    } else {
        "warn,skilltree=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into());

    // A second init (e.g. from tests) is not an error.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
