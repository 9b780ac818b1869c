//! The audio capability the call flow talks to.

use super::decode::{decode_file, DecodedClip};
use super::events::{EndedHub, EndedSubscription};
use super::player::OutputPlayer;
use super::Cue;
use crate::config::AppConfig;
use crate::{log_debug, log_timings_enabled};
use std::path::Path;
use std::time::Instant;

/// Play / pause / rewind two fixed cues and hear about natural ends.
///
/// Failures never surface to the caller: a cue that cannot play is logged
/// and stays silent.
pub trait AudioService {
    fn play(&mut self, cue: Cue);
    fn pause(&mut self, cue: Cue);
    fn seek_start(&mut self, cue: Cue);
    fn on_ended(&mut self, cue: Cue) -> EndedSubscription;
}

/// Audio through the system output device.
pub struct DeviceAudio {
    hub: EndedHub,
    player: Option<OutputPlayer>,
}

impl DeviceAudio {
    /// Decode both cue files and open the output device. Anything that fails
    /// is logged; the service still works, just without that sound.
    pub fn open(config: &AppConfig) -> Self {
        let hub = EndedHub::new();
        let mut clips = Vec::new();
        for (cue, path) in [
            (Cue::Connect, config.call_audio.as_path()),
            (Cue::Home, config.home_audio.as_path()),
        ] {
            if let Some(clip) = preload(cue, path) {
                clips.push((cue, clip));
            }
        }

        let player = if clips.is_empty() {
            log_debug("no cue audio decoded; output device left closed");
            None
        } else {
            match OutputPlayer::open(config.output_device.as_deref(), clips, hub.clone()) {
                Ok(player) => {
                    log_debug(&format!("audio output: {}", player.device_name()));
                    for cue in Cue::ALL {
                        if !player.tracks().is_loaded(cue) {
                            log_debug(&format!("{} cue will stay silent", cue.label()));
                        }
                    }
                    tracing::info!(device = player.device_name(), "audio output opened");
                    Some(player)
                }
                Err(err) => {
                    log_debug(&format!("audio output unavailable: {err:#}"));
                    tracing::warn!(error = %format!("{err:#}"), "audio output unavailable");
                    None
                }
            }
        };

        Self { hub, player }
    }
}

fn preload(cue: Cue, path: &Path) -> Option<DecodedClip> {
    let started = Instant::now();
    match decode_file(path) {
        Ok(clip) => {
            if log_timings_enabled() {
                log_debug(&format!(
                    "timing|phase=decode|cue={}|ms={:.1}|audio_s={:.2}",
                    cue.label(),
                    started.elapsed().as_secs_f64() * 1000.0,
                    clip.duration_secs()
                ));
            }
            Some(clip)
        }
        Err(err) => {
            log_debug(&format!("{} audio skipped: {err:#}", cue.label()));
            tracing::warn!(cue = cue.label(), error = %format!("{err:#}"), "cue audio unavailable");
            None
        }
    }
}

impl AudioService for DeviceAudio {
    fn play(&mut self, cue: Cue) {
        let Some(player) = &self.player else {
            return;
        };
        if !player.tracks().play(cue) {
            log_debug(&format!("play ignored: {} audio not loaded", cue.label()));
        }
    }

    fn pause(&mut self, cue: Cue) {
        if let Some(player) = &self.player {
            player.tracks().pause(cue);
        }
    }

    fn seek_start(&mut self, cue: Cue) {
        if let Some(player) = &self.player {
            player.tracks().seek_start(cue);
        }
    }

    fn on_ended(&mut self, cue: Cue) -> EndedSubscription {
        self.hub.subscribe(cue)
    }
}

/// Backs `--no-audio`: accepts every command and never reports an end.
#[derive(Default)]
pub struct SilentAudio {
    hub: EndedHub,
}

impl SilentAudio {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioService for SilentAudio {
    fn play(&mut self, _cue: Cue) {}

    fn pause(&mut self, _cue: Cue) {}

    fn seek_start(&mut self, _cue: Cue) {}

    fn on_ended(&mut self, cue: Cue) -> EndedSubscription {
        self.hub.subscribe(cue)
    }
}

/// Pick the audio backend for this run.
pub fn open_audio(config: &AppConfig) -> Box<dyn AudioService> {
    if config.no_audio {
        log_debug("audio disabled (--no-audio)");
        return Box::new(SilentAudio::new());
    }
    Box::new(DeviceAudio::open(config))
}

pub fn list_output_devices() -> anyhow::Result<Vec<String>> {
    OutputPlayer::list_devices()
}
