//! Application context and the debug log.

mod logging;
mod state;

#[cfg(test)]
pub(crate) use logging::set_logging_for_tests;
pub use logging::{
    crash_log_path, init_logging, log_debug, log_debug_content, log_file_path, log_panic,
    log_timings_enabled,
};
pub(crate) use state::{ANIMATION_FRAME, KEY_STEP};
pub use state::{Capabilities, CallerProfile, PhoneApp};
