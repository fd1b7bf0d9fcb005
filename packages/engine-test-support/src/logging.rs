//! Test logging bootstrap shared by unit and integration tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

/// Default filter: engine internals at info, everything else quiet.
const DEFAULT_FILTER: &str = "warn,impostor_engine=info";

static LOGGING: OnceCell<()> = OnceCell::new();

/// Installs the test subscriber. Idempotent and race-safe; `TEST_LOG` takes
/// precedence over `RUST_LOG`, and [`DEFAULT_FILTER`] applies when neither is
/// set. Output goes through the test writer so cargo captures it per test.
pub fn init() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        fmt()
            .compact()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
