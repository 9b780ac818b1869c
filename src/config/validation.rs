use super::defaults::MAX_DEVICE_NAME_BYTES;
use super::{
    AppConfig, MAX_CALLER_INITIALS_CHARS, MAX_CALLER_LABEL_CHARS, MAX_CALLER_NAME_CHARS,
    MAX_CONTRACT_ADDRESS_CHARS,
};
use crate::log_debug;
use crate::ui::PhoneTheme;
use anyhow::{anyhow, bail, Result};

impl AppConfig {
    /// Check CLI values and normalize display strings.
    pub fn validate(&mut self) -> Result<()> {
        self.caller_name = display_text("--caller-name", &self.caller_name, MAX_CALLER_NAME_CHARS)?;
        self.caller_initials = display_text(
            "--caller-initials",
            &self.caller_initials,
            MAX_CALLER_INITIALS_CHARS,
        )?;
        self.caller_label =
            display_text("--caller-label", &self.caller_label, MAX_CALLER_LABEL_CHARS)?;
        self.contract_address = display_text(
            "--contract-address",
            &self.contract_address,
            MAX_CONTRACT_ADDRESS_CHARS,
        )?;
        if self.contract_address.contains(char::is_whitespace) {
            bail!("--contract-address must not contain whitespace");
        }

        if PhoneTheme::from_name(&self.theme).is_none() {
            bail!(
                "--theme must be one of {}, got '{}'",
                PhoneTheme::NAMES.join(", "),
                self.theme
            );
        }

        if let Some(device) = self.output_device.as_deref() {
            let trimmed = device.trim();
            if trimmed.is_empty() {
                bail!("--output-device cannot be empty");
            }
            if trimmed.len() > MAX_DEVICE_NAME_BYTES {
                bail!("--output-device exceeds {MAX_DEVICE_NAME_BYTES} bytes");
            }
            if trimmed.chars().any(char::is_control) {
                bail!("--output-device contains control characters");
            }
            self.output_device = Some(trimmed.to_string());
        }

        // A missing sound only silences that cue; it is not worth refusing to start.
        if !self.no_audio {
            for (flag, path) in [
                ("--call-audio", &self.call_audio),
                ("--home-audio", &self.home_audio),
            ] {
                if !path.is_file() {
                    log_debug(&format!(
                        "{flag} {} not found; that sound will stay silent",
                        path.display()
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Trim, reject blanks/control characters, and bound the length in chars.
pub(super) fn display_text(flag: &str, raw: &str, max_chars: usize) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("{flag} cannot be empty"));
    }
    if trimmed.chars().any(char::is_control) {
        return Err(anyhow!("{flag} contains control characters"));
    }
    let count = trimmed.chars().count();
    if count > max_chars {
        return Err(anyhow!(
            "{flag} must be at most {max_chars} characters, got {count}"
        ));
    }
    Ok(trimmed.to_string())
}
