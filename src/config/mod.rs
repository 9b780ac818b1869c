//! Command-line parsing and validation helpers.

mod defaults;
mod validation;

use clap::Parser;
use std::path::PathBuf;

pub use defaults::{
    DEFAULT_CALLER_INITIALS, DEFAULT_CALLER_LABEL, DEFAULT_CALLER_NAME, DEFAULT_CALL_AUDIO,
    DEFAULT_CONTRACT_ADDRESS, DEFAULT_HOME_AUDIO, DEFAULT_THEME, MAX_CALLER_INITIALS_CHARS,
    MAX_CALLER_LABEL_CHARS, MAX_CALLER_NAME_CHARS, MAX_CONTRACT_ADDRESS_CHARS,
};

/// CLI options for the phone simulator.
#[derive(Debug, Parser, Clone)]
#[command(about = "Slidephone: a slide-to-answer phone call in your terminal", author, version)]
pub struct AppConfig {
    /// Sound played when the call is answered; its end drops you on the home screen
    #[arg(long = "call-audio", env = "SLIDEPHONE_CALL_AUDIO", default_value = DEFAULT_CALL_AUDIO)]
    pub call_audio: PathBuf,

    /// Sound played whenever the home screen is reached
    #[arg(long = "home-audio", env = "SLIDEPHONE_HOME_AUDIO", default_value = DEFAULT_HOME_AUDIO)]
    pub home_audio: PathBuf,

    /// Run without opening an audio output device
    #[arg(long = "no-audio", default_value_t = false)]
    pub no_audio: bool,

    /// Preferred audio output device name
    #[arg(long = "output-device")]
    pub output_device: Option<String>,

    /// Print detected audio output devices and exit
    #[arg(long = "list-output-devices", default_value_t = false)]
    pub list_output_devices: bool,

    /// Name shown for the caller
    #[arg(long = "caller-name", default_value = DEFAULT_CALLER_NAME)]
    pub caller_name: String,

    /// Initials shown inside the caller avatar
    #[arg(long = "caller-initials", default_value = DEFAULT_CALLER_INITIALS)]
    pub caller_initials: String,

    /// Line shown above the caller name on the incoming screen
    #[arg(long = "caller-label", default_value = DEFAULT_CALLER_LABEL)]
    pub caller_label: String,

    /// Address shown (and copied) below the phone
    #[arg(long = "contract-address", default_value = DEFAULT_CONTRACT_ADDRESS)]
    pub contract_address: String,

    /// Color theme (graphite, midnight, plain)
    #[arg(long = "theme", default_value = DEFAULT_THEME)]
    pub theme: String,

    /// Enable file logging (debug)
    #[arg(long = "logs", env = "SLIDEPHONE_LOGS", default_value_t = false)]
    pub logs: bool,

    /// Disable all file logging (overrides --logs and log env vars)
    #[arg(long = "no-logs", env = "SLIDEPHONE_NO_LOGS", default_value_t = false)]
    pub no_logs: bool,

    /// Allow clipboard text and opened URLs in the debug log
    #[arg(
        long = "log-content",
        env = "SLIDEPHONE_LOG_CONTENT",
        default_value_t = false
    )]
    pub log_content: bool,

    /// Log audio decode and device setup timings
    #[arg(long = "log-timings", default_value_t = false)]
    pub log_timings: bool,
}

impl AppConfig {
    /// File logging and tracing share one switch.
    pub fn logging_enabled(&self) -> bool {
        (self.logs || self.log_timings) && !self.no_logs
    }
}
