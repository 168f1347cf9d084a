//! Shared setup for this crate's integration tests.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes `pretty_env_logger` exactly once per test binary, matching
/// `kneasle-sapling/src/main.rs`'s one-shot logger setup. Safe to call from
/// every test; later calls are no-ops.
pub fn init_logger() {
    INIT.call_once(|| {
        let _ = pretty_env_logger::formatted_builder()
            .filter_level(log::LevelFilter::Trace)
            .is_test(true)
            .try_init();
    });
}
