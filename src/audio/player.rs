//! cpal output for the two cues.
//!
//! Both cues share one output stream. The callback mixes whichever tracks are
//! flagged as playing and reports natural ends through the [`EndedHub`].

use super::decode::DecodedClip;
use super::events::EndedHub;
use super::mix::{f32_to_i16, f32_to_u16, mix_track, write_interleaved};
use super::resample::resample;
use super::Cue;
use crate::log_debug;
use anyhow::{anyhow, Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, StreamConfig};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

struct Track {
    samples: Vec<f32>,
    position: AtomicUsize,
    playing: AtomicBool,
}

/// Playback state shared between the UI thread and the output callback.
pub(super) struct TrackTable {
    tracks: [Option<Track>; Cue::COUNT],
}

impl TrackTable {
    pub(super) fn new(clips: Vec<(Cue, Vec<f32>)>) -> Self {
        let mut tracks: [Option<Track>; Cue::COUNT] = std::array::from_fn(|_| None);
        for (cue, samples) in clips {
            tracks[cue.index()] = Some(Track {
                samples,
                position: AtomicUsize::new(0),
                playing: AtomicBool::new(false),
            });
        }
        Self { tracks }
    }

    fn track(&self, cue: Cue) -> Option<&Track> {
        self.tracks[cue.index()].as_ref()
    }

    pub(super) fn is_loaded(&self, cue: Cue) -> bool {
        self.track(cue).is_some()
    }

    /// Start or resume `cue`. A track sitting at its end starts over.
    /// Returns false when the cue has no audio.
    pub(super) fn play(&self, cue: Cue) -> bool {
        let Some(track) = self.track(cue) else {
            return false;
        };
        if track.position.load(Ordering::Acquire) >= track.samples.len() {
            track.position.store(0, Ordering::Release);
        }
        track.playing.store(true, Ordering::Release);
        true
    }

    pub(super) fn pause(&self, cue: Cue) {
        if let Some(track) = self.track(cue) {
            track.playing.store(false, Ordering::Release);
        }
    }

    pub(super) fn seek_start(&self, cue: Cue) {
        if let Some(track) = self.track(cue) {
            track.position.store(0, Ordering::Release);
        }
    }

    #[cfg(test)]
    pub(super) fn is_playing(&self, cue: Cue) -> bool {
        self.track(cue)
            .map(|track| track.playing.load(Ordering::Acquire))
            .unwrap_or(false)
    }

    #[cfg(test)]
    pub(super) fn position(&self, cue: Cue) -> usize {
        self.track(cue)
            .map(|track| track.position.load(Ordering::Acquire))
            .unwrap_or(0)
    }

    /// Fill `mix` (mono frames) from every playing track.
    pub(super) fn render(&self, mix: &mut [f32], hub: &EndedHub) {
        mix.fill(0.0);
        for cue in Cue::ALL {
            let Some(track) = self.track(cue) else {
                continue;
            };
            if !track.playing.load(Ordering::Acquire) {
                continue;
            }
            let start = track.position.load(Ordering::Acquire);
            let consumed = mix_track(mix, &track.samples, start);
            let end = start + consumed;
            // A seek from the UI thread mid-callback wins over our advance.
            let _ = track.position.compare_exchange(
                start,
                end,
                Ordering::AcqRel,
                Ordering::Acquire,
            );
            if end >= track.samples.len() && track.playing.swap(false, Ordering::AcqRel) {
                hub.notify(cue);
            }
        }
    }
}

/// Live output stream plus the track table it reads from.
pub(super) struct OutputPlayer {
    _stream: cpal::Stream,
    tracks: Arc<TrackTable>,
    device_name: String,
}

impl OutputPlayer {
    pub(super) fn list_devices() -> Result<Vec<String>> {
        let host = cpal::default_host();
        let devices = host
            .output_devices()
            .context("no output devices available")?;
        let mut names = Vec::new();
        for device in devices {
            if let Ok(name) = device.name() {
                names.push(name);
            }
        }
        Ok(names)
    }

    /// Open the output device and start a stream that is silent until a cue
    /// plays. Clips are resampled to the device rate up front.
    pub(super) fn open(
        preferred_device: Option<&str>,
        clips: Vec<(Cue, DecodedClip)>,
        hub: EndedHub,
    ) -> Result<Self> {
        // ALSA prints probe chatter straight to stderr, which would land on
        // top of the phone.
        let _quiet = gag::Gag::stderr().ok();

        let host = cpal::default_host();
        let device = match preferred_device {
            Some(name) => {
                let mut devices = host
                    .output_devices()
                    .context("no output devices available")?;
                devices
                    .find(|d| d.name().map(|n| n == name).unwrap_or(false))
                    .ok_or_else(|| anyhow!("output device '{name}' not found"))?
            }
            None => host
                .default_output_device()
                .context("no default output device available")?,
        };
        let device_name = device
            .name()
            .unwrap_or_else(|_| "unknown output device".to_string());

        let default_config = device
            .default_output_config()
            .context("output device has no default config")?;
        let format = default_config.sample_format();
        let config: StreamConfig = default_config.into();
        let rate = config.sample_rate.0;
        let channels = usize::from(config.channels.max(1));
        log_debug(&format!(
            "Output config: device={device_name} format={format:?} sample_rate={rate}Hz channels={channels}"
        ));

        let clips = clips
            .into_iter()
            .map(|(cue, clip)| (cue, resample(&clip.samples, clip.sample_rate, rate)))
            .collect();
        let tracks = Arc::new(TrackTable::new(clips));

        let err_fn = |err: cpal::StreamError| log_debug(&format!("audio_stream_error: {err}"));

        let stream = match format {
            SampleFormat::F32 => {
                let tracks = tracks.clone();
                let hub = hub.clone();
                let mut mix = Vec::new();
                device.build_output_stream(
                    &config,
                    move |data: &mut [f32], _| {
                        mix.resize(data.len() / channels, 0.0);
                        tracks.render(&mut mix, &hub);
                        write_interleaved(data, channels, &mix, |sample| sample);
                    },
                    err_fn,
                    None,
                )?
            }
            SampleFormat::I16 => {
                let tracks = tracks.clone();
                let hub = hub.clone();
                let mut mix = Vec::new();
                device.build_output_stream(
                    &config,
                    move |data: &mut [i16], _| {
                        mix.resize(data.len() / channels, 0.0);
                        tracks.render(&mut mix, &hub);
                        write_interleaved(data, channels, &mix, f32_to_i16);
                    },
                    err_fn,
                    None,
                )?
            }
            SampleFormat::U16 => {
                let tracks = tracks.clone();
                let hub = hub.clone();
                let mut mix = Vec::new();
                device.build_output_stream(
                    &config,
                    move |data: &mut [u16], _| {
                        mix.resize(data.len() / channels, 0.0);
                        tracks.render(&mut mix, &hub);
                        write_interleaved(data, channels, &mix, f32_to_u16);
                    },
                    err_fn,
                    None,
                )?
            }
            other => return Err(anyhow!("unsupported sample format: {other:?}")),
        };
        stream.play().context("failed to start output stream")?;

        Ok(Self {
            _stream: stream,
            tracks,
            device_name,
        })
    }

    pub(super) fn tracks(&self) -> &TrackTable {
        &self.tracks
    }

    pub(super) fn device_name(&self) -> &str {
        &self.device_name
    }
}
