use tracing_subscriber::EnvFilter;

/// Initialise the global `tracing` subscriber, writing to stderr.
///
/// `verbose` forces `debug`. Otherwise `RUST_LOG` is respected, falling back
/// to `warn` so regular runs only show the command's own output.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
