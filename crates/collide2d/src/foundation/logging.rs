//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
pub fn init() {
    env_logger::init();
}

/// Initialize logging, tolerating an already-installed logger (tests, embedding hosts)
pub fn try_init() -> bool {
    env_logger::try_init().is_ok()
}
