//! Cue playback: decoding, resampling, a shared cpal output stream and the
//! ended notifications the call flow listens for.

mod decode;
mod events;
mod mix;
mod player;
mod resample;
mod service;
#[cfg(test)]
mod tests;

pub use decode::{decode_file, DecodedClip};
pub use events::{EndedHub, EndedSubscription};
pub use service::{list_output_devices, open_audio, AudioService, DeviceAudio, SilentAudio};

/// The two sounds the phone plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Played once the call is answered; its end drops the call to Home.
    Connect,
    /// Played on every entry to the home screen.
    Home,
}

impl Cue {
    pub const COUNT: usize = 2;
    pub const ALL: [Cue; Cue::COUNT] = [Cue::Connect, Cue::Home];

    pub(crate) fn index(self) -> usize {
        match self {
            Cue::Connect => 0,
            Cue::Home => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Cue::Connect => "connect",
            Cue::Home => "home",
        }
    }
}
