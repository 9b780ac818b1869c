//! Copy-to-clipboard with a short-lived "copied" confirmation.

use crate::log_debug;
use crate::ticker::Deadline;
use anyhow::{anyhow, Result};
use std::time::{Duration, Instant};

/// How long the check mark stays after a copy.
pub const COPIED_RESET: Duration = Duration::from_millis(2000);

pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The desktop clipboard. A fresh handle per copy keeps a missing display
/// server from failing startup.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|err| anyhow!("clipboard unavailable: {err}"))?;
        clipboard
            .set_text(text.to_owned())
            .map_err(|err| anyhow!("clipboard write failed: {err}"))
    }
}

/// Owns the `copied` flag and its reset timer.
pub struct CopyFeedback {
    sink: Box<dyn ClipboardSink>,
    reset: Deadline,
}

impl CopyFeedback {
    pub fn new(sink: Box<dyn ClipboardSink>) -> Self {
        Self {
            sink,
            reset: Deadline::new(),
        }
    }

    /// Write `text` and show the confirmation. A failed write is logged and
    /// the confirmation still shows.
    pub fn copy(&mut self, text: &str, now: Instant) {
        match self.sink.set_text(text) {
            Ok(()) => crate::log_debug_content(&format!("copied to clipboard: {text}")),
            Err(err) => {
                log_debug(&format!("clipboard copy failed: {err:#}"));
                tracing::warn!(error = %format!("{err:#}"), "clipboard copy failed");
            }
        }
        self.reset.arm(now, COPIED_RESET);
    }

    /// Clear the flag once its time is up. Returns true when it flipped.
    pub fn poll(&mut self, now: Instant) -> bool {
        self.reset.fire(now)
    }

    pub fn is_copied(&self) -> bool {
        self.reset.is_armed()
    }

    pub fn reset_due_at(&self) -> Option<Instant> {
        self.reset.at()
    }
}
