// tests/common.rs
//! Log capture for integration tests; set RUST_LOG to see parser output

#[cfg(feature = "logging")]
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[allow(dead_code)]
pub fn setup() {
    // Later calls find a subscriber already installed and do nothing.
    #[cfg(feature = "logging")]
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_test_writer().with_target(false))
        .try_init();
}
