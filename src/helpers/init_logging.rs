use env_logger::Env;

use crate::constants::{defaults, envvars};

/// Initialize env_logger
///
/// Respects LOG_LEVEL env var, defaulting to "info". Output goes to stderr.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(
        Env::default().filter_or(envvars::LOG_LEVEL, defaults::LOG_LEVEL),
    )
    .try_init();
}
