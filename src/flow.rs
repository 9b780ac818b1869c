//! The three-state call flow and the audio side effects of each transition.

use crate::audio::{AudioService, Cue, EndedSubscription};
use crate::log_debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallState {
    Incoming,
    Connected,
    Home,
}

impl CallState {
    pub fn label(self) -> &'static str {
        match self {
            CallState::Incoming => "incoming",
            CallState::Connected => "connected",
            CallState::Home => "home",
        }
    }
}

/// Owns the audio service and the connect-audio "ended" subscription.
///
/// Home audio plays exactly while the state is `Home`: every transition
/// re-applies that rule, so each entry to Home restarts it from zero.
pub struct CallFlow {
    state: CallState,
    audio: Box<dyn AudioService>,
    connect_ended: Option<EndedSubscription>,
}

impl CallFlow {
    pub fn new(mut audio: Box<dyn AudioService>) -> Self {
        let connect_ended = Some(audio.on_ended(Cue::Connect));
        let mut flow = Self {
            state: CallState::Incoming,
            audio,
            connect_ended,
        };
        flow.apply_home_audio();
        flow
    }

    pub fn state(&self) -> CallState {
        self.state
    }

    /// The slide completed. Starts connect audio from the top.
    pub fn answer(&mut self) -> bool {
        if self.state != CallState::Incoming {
            return false;
        }
        self.audio.seek_start(Cue::Connect);
        self.audio.play(Cue::Connect);
        self.transition(CallState::Connected, "answered")
    }

    /// The red button. Stops and rewinds connect audio.
    pub fn hang_up(&mut self) -> bool {
        if self.state != CallState::Connected {
            return false;
        }
        self.stop_connect_audio();
        self.transition(CallState::Home, "hung up")
    }

    /// Drain connect-audio "ended" notifications. Returns true on a transition.
    pub fn poll_audio_events(&mut self) -> bool {
        let ended = self
            .connect_ended
            .as_ref()
            .map(EndedSubscription::take_ended)
            .unwrap_or(false);
        if !ended {
            return false;
        }
        match self.state {
            CallState::Incoming | CallState::Connected => {
                self.transition(CallState::Home, "connect audio ended")
            }
            CallState::Home => false,
        }
    }

    /// Back to a fresh incoming call from anywhere.
    pub fn restart(&mut self) -> bool {
        self.stop_connect_audio();
        self.transition(CallState::Incoming, "restart")
    }

    /// Unsubscribe from connect audio and silence both cues. Safe to call twice.
    pub fn shutdown(&mut self) {
        if self.connect_ended.take().is_none() {
            return;
        }
        self.audio.pause(Cue::Connect);
        self.audio.pause(Cue::Home);
        log_debug("call flow shut down");
    }

    /// Pause and rewind connect audio, and forget any "ended" it already
    /// queued so the next call does not inherit it.
    fn stop_connect_audio(&mut self) {
        self.audio.pause(Cue::Connect);
        self.audio.seek_start(Cue::Connect);
        if let Some(subscription) = &self.connect_ended {
            subscription.take_ended();
        }
    }

    fn transition(&mut self, next: CallState, reason: &str) -> bool {
        if next == self.state {
            return false;
        }
        let previous = self.state;
        self.state = next;
        self.apply_home_audio();
        log_debug(&format!(
            "call state: {} -> {} ({reason})",
            previous.label(),
            next.label()
        ));
        tracing::info!(
            from = previous.label(),
            to = next.label(),
            reason,
            "call state transition"
        );
        true
    }

    fn apply_home_audio(&mut self) {
        self.audio.seek_start(Cue::Home);
        if self.state == CallState::Home {
            self.audio.play(Cue::Home);
        } else {
            self.audio.pause(Cue::Home);
        }
    }
}

impl Drop for CallFlow {
    fn drop(&mut self) {
        self.shutdown();
    }
}
