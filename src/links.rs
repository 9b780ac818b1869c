//! Home screen catalog and the outbound link capability.

use crate::log_debug;
use anyhow::{Context, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomeApp {
    pub name: &'static str,
    /// `None` for decorative dock icons.
    pub url: Option<&'static str>,
    pub glyph: &'static str,
    pub color: (u8, u8, u8),
}

/// Linked apps. The URLs point at the launch coin and stay fixed even when
/// `--contract-address` changes what the footer shows and copies.
pub const HOME_APPS: [HomeApp; 3] = [
    HomeApp {
        name: "pump.fun",
        url: Some("https://pump.fun/coin/7PVk3W4kXAWkSy15TTfbXdrFSg6FB3tPaUrYjeJdpump"),
        glyph: "◉",
        color: (0x10, 0xB9, 0x81),
    },
    HomeApp {
        name: "X",
        url: Some("https://x.com/bigleaguesonsol"),
        glyph: "✕",
        color: (0x00, 0x00, 0x00),
    },
    HomeApp {
        name: "Dexscreener",
        url: Some("https://dexscreener.com/solana/H7b6LA7Cgdaz6k946fbAz7BtfsbsbyHJir8TfVxPtg4a"),
        glyph: "◆",
        color: (0x2B, 0x2B, 0x2B),
    },
];

pub const DOCK: [HomeApp; 4] = [
    HomeApp {
        name: "Phone",
        url: None,
        glyph: "☎",
        color: (0x34, 0xC7, 0x59),
    },
    HomeApp {
        name: "Compass",
        url: None,
        glyph: "◎",
        color: (0x00, 0x7A, 0xFF),
    },
    HomeApp {
        name: "Messages",
        url: None,
        glyph: "✉",
        color: (0x58, 0x56, 0xD6),
    },
    HomeApp {
        name: "Music",
        url: None,
        glyph: "♪",
        color: (0xFA, 0x2D, 0x48),
    },
];

pub trait LinkOpener {
    fn open(&mut self, url: &str) -> Result<()>;
}

/// Hands URLs to the desktop's default browser without waiting on it.
#[derive(Debug, Default)]
pub struct SystemBrowser;

impl LinkOpener for SystemBrowser {
    fn open(&mut self, url: &str) -> Result<()> {
        open::that_detached(url).with_context(|| format!("failed to open {url}"))
    }
}

/// Open `app`'s URL; decorative apps and failures are only logged.
pub fn launch(opener: &mut dyn LinkOpener, app: &HomeApp) -> bool {
    let Some(url) = app.url else {
        return false;
    };
    match opener.open(url) {
        Ok(()) => {
            crate::log_debug_content(&format!("opened {}: {url}", app.name));
            true
        }
        Err(err) => {
            log_debug(&format!("link for {} failed: {err:#}", app.name));
            tracing::warn!(app = app.name, error = %format!("{err:#}"), "link open failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[derive(Default)]
    struct RecordingOpener {
        opened: Vec<String>,
        fail: bool,
    }

    impl LinkOpener for RecordingOpener {
        fn open(&mut self, url: &str) -> Result<()> {
            if self.fail {
                return Err(anyhow!("no browser"));
            }
            self.opened.push(url.to_string());
            Ok(())
        }
    }

    #[test]
    fn every_linked_app_has_an_https_url() {
        for app in HOME_APPS {
            let url = app.url.expect("linked app");
            assert!(url.starts_with("https://"), "{url}");
        }
        assert!(DOCK.iter().all(|app| app.url.is_none()));
    }

    #[test]
    fn launch_opens_the_app_url() {
        let mut opener = RecordingOpener::default();
        assert!(launch(&mut opener, &HOME_APPS[1]));
        assert_eq!(opener.opened, vec!["https://x.com/bigleaguesonsol".to_string()]);
    }

    #[test]
    fn launch_swallows_failures_and_ignores_dock_icons() {
        let mut opener = RecordingOpener {
            fail: true,
            ..Default::default()
        };
        assert!(!launch(&mut opener, &HOME_APPS[0]));

        let mut opener = RecordingOpener::default();
        assert!(!launch(&mut opener, &DOCK[0]));
        assert!(opener.opened.is_empty());
    }
}
