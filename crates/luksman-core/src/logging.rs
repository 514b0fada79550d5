//! Logging bootstrap shared by luksman binaries.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialise the global logger once, honouring `RUST_LOG` overrides.
pub fn init(default_level: &str) {
    let env = env_logger::Env::default().default_filter_or(default_level.to_string());
    INIT.call_once(|| {
        let _ = env_logger::Builder::from_env(env)
            .format_timestamp_secs()
            .try_init();
    });
}
