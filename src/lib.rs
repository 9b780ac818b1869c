pub mod app;
pub mod audio;
pub mod clipboard;
pub mod clock;
pub mod config;
pub mod flow;
pub mod gesture;
pub mod links;
mod lock;
pub mod screens;
mod telemetry;
pub mod terminal_restore;
pub mod ticker;
pub mod ui;

pub(crate) use lock::lock_or_recover;
pub use app::{
    crash_log_path, init_logging, log_debug, log_debug_content, log_file_path, log_panic,
    log_timings_enabled, Capabilities, PhoneApp,
};
pub use telemetry::{init_tracing, tracing_log_path};
