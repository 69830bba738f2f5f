use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Install the global tracing subscriber. Logs go to stderr so stdout carries
/// only the check report. `RUST_LOG` wins over the `--verbose` default.
pub fn initialise_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        // Already installed (tests); keep the existing one.
    }
}
