use anyhow::Result;
use clap::Parser;
use slidephone::{
    audio::list_output_devices, config::AppConfig, init_logging, init_tracing, log_debug,
    log_file_path, ui, Capabilities, PhoneApp,
};
use std::env;
use std::time::Instant;

#[cfg(not(test))]
fn main() -> Result<()> {
    run_with_args(env::args_os())
}

#[cfg_attr(test, allow(dead_code))]
fn run_with_args<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let mut config = AppConfig::parse_from(args);
    if config.list_output_devices {
        let output = output_device_report()?;
        print!("{output}");
        return Ok(());
    }

    config.validate()?;
    init_logging(&config);
    init_tracing(&config);
    log_debug("=== Slidephone Started ===");
    log_debug(&format!("Log file: {:?}", log_file_path()));

    let mut app = PhoneApp::new(&config, Capabilities::system(&config), Instant::now());
    let result = ui::run_app(&mut app);
    app.shutdown();

    log_debug("=== Slidephone Exiting ===");
    if let Err(ref e) = result {
        log_debug(&format!("Exit with error: {e:#}"));
    }

    result
}

fn output_device_report() -> Result<String> {
    let devices = if let Ok(raw) = env::var("SLIDEPHONE_TEST_DEVICES") {
        raw.split(',')
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    } else {
        list_output_devices()?
    };
    let mut output = String::new();
    if devices.is_empty() {
        output.push_str("No audio output devices detected.\n");
    } else {
        output.push_str("Available audio output devices:\n");
        for name in devices {
            output.push_str(&format!("  - {name}\n"));
        }
    }
    Ok(output)
}
