//! Test utilities for assetgraph
//!
//! Helpers shared by unit tests and the `tests/` suites (enabled there
//! through the `test-utils` feature):
//! - Once-only logging initialisation
//! - Install config fixtures
//! - Temporary project directories
//!
//! # Example
//!
//! ```rust,no_run
//! use assetgraph::test_utils::{InstallConfigFixture, TestEnvironment};
//!
//! let env = TestEnvironment::new().unwrap();
//! let path = env.write_install_config(&InstallConfigFixture::gcp("prod")).unwrap();
//! assert!(path.exists());
//! ```

pub mod environment;
pub mod fixtures;

pub use environment::TestEnvironment;
pub use fixtures::InstallConfigFixture;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` if given, otherwise
/// `RUST_LOG`; with neither, tests run without a subscriber.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer() // captured per test
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
