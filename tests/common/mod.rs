use tracing_subscriber::EnvFilter;

/// Sets up logging of events reported by the crate.
///
/// Use the RUST_LOG environment variable to pick the level, e.g.
/// `RUST_LOG=dnscore=trace`. Nothing is logged by default.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .without_time()
        .try_init()
        .ok();
}
