use std::time::{Duration, Instant};

use crate::audio::{open_audio, AudioService};
use crate::clipboard::{ClipboardSink, CopyFeedback, SystemClipboard};
use crate::clock::{LocalClock, StatusClock, WallClock};
use crate::config::AppConfig;
use crate::flow::{CallFlow, CallState};
use crate::gesture::{SlideGesture, SlideRelease, TrackLayout};
use crate::links::{self, LinkOpener, SystemBrowser, HOME_APPS};
use crate::log_debug;
use crate::screens::ConnectedScreen;
use crate::ticker::earliest;
use crate::ui::PhoneTheme;

/// Keyboard slider step, in gesture units (two terminal columns).
pub(crate) const KEY_STEP: f32 = 16.0;
/// Frame interval for the connected-screen visualizer.
pub(crate) const ANIMATION_FRAME: Duration = Duration::from_millis(100);

macro_rules! state_change {
    ($self:expr, $field:ident, $value:expr) => {{
        $self.$field = $value;
        $self.request_redraw();
    }};
    ($self:expr, $body:block) => {{
        $body
        $self.request_redraw();
    }};
}

/// Who is calling, as shown on the incoming and connected screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerProfile {
    pub name: String,
    pub initials: String,
    pub label: String,
}

/// The outside-world collaborators. Tests swap in fakes.
pub struct Capabilities {
    pub audio: Box<dyn AudioService>,
    pub clipboard: Box<dyn ClipboardSink>,
    pub links: Box<dyn LinkOpener>,
    pub wall_clock: Box<dyn WallClock>,
}

impl Capabilities {
    pub fn system(config: &AppConfig) -> Self {
        Self {
            audio: open_audio(config),
            clipboard: Box::new(SystemClipboard),
            links: Box::new(SystemBrowser),
            wall_clock: Box::new(LocalClock),
        }
    }
}

/// Application context: the call flow plus whatever screen state is live.
pub struct PhoneApp {
    caller: CallerProfile,
    contract_address: String,
    theme: PhoneTheme,
    flow: CallFlow,
    /// Mounted after the incoming screen's first draw measured the track.
    gesture: Option<SlideGesture>,
    remeasure_pending: bool,
    connected: Option<ConnectedScreen>,
    clock: StatusClock,
    copy: CopyFeedback,
    links: Box<dyn LinkOpener>,
    needs_redraw: bool,
}

impl PhoneApp {
    pub fn new(config: &AppConfig, capabilities: Capabilities, now: Instant) -> Self {
        let Capabilities {
            audio,
            clipboard,
            links,
            wall_clock,
        } = capabilities;
        Self {
            caller: CallerProfile {
                name: config.caller_name.clone(),
                initials: config.caller_initials.clone(),
                label: config.caller_label.clone(),
            },
            contract_address: config.contract_address.clone(),
            theme: PhoneTheme::from_name(&config.theme).unwrap_or_default(),
            flow: CallFlow::new(audio),
            gesture: None,
            remeasure_pending: false,
            connected: None,
            clock: StatusClock::new(wall_clock, now),
            copy: CopyFeedback::new(clipboard),
            links,
            needs_redraw: true,
        }
    }

    pub fn state(&self) -> CallState {
        self.flow.state()
    }

    pub fn caller(&self) -> &CallerProfile {
        &self.caller
    }

    pub fn contract_address(&self) -> &str {
        &self.contract_address
    }

    pub fn theme(&self) -> PhoneTheme {
        self.theme
    }

    pub fn clock_text(&self) -> &str {
        self.clock.text()
    }

    pub fn gesture(&self) -> Option<&SlideGesture> {
        self.gesture.as_ref()
    }

    pub fn connected(&self) -> Option<&ConnectedScreen> {
        self.connected.as_ref()
    }

    pub fn is_copied(&self) -> bool {
        self.copy.is_copied()
    }

    /// Called after each draw with the freshly measured layout.
    pub fn layout_ready(&mut self, layout: &impl TrackLayout, has_track: bool) {
        if self.state() != CallState::Incoming || !has_track {
            return;
        }
        match self.gesture.as_mut() {
            None => {
                let gesture = SlideGesture::mount(layout);
                log_debug(&format!("slider mounted: max_drag={}", gesture.max_drag()));
                self.gesture = Some(gesture);
                self.remeasure_pending = false;
                self.request_redraw();
            }
            Some(gesture) if self.remeasure_pending => {
                gesture.remeasure(layout);
                self.remeasure_pending = false;
                log_debug(&format!("slider remeasured: max_drag={}", gesture.max_drag()));
                self.request_redraw();
            }
            Some(_) => {}
        }
    }

    /// The terminal was resized; measure the track again after the next draw.
    pub fn request_remeasure(&mut self) {
        state_change!(self, remeasure_pending, true);
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture
            .as_ref()
            .map(SlideGesture::is_dragging)
            .unwrap_or(false)
    }

    pub fn grab_knob(&mut self, pointer_x: f32) {
        if let Some(gesture) = self.gesture.as_mut() {
            state_change!(self, {
                gesture.begin();
                gesture.update(pointer_x);
            });
        }
    }

    pub fn drag_knob(&mut self, pointer_x: f32) {
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };
        if gesture.is_dragging() {
            state_change!(self, {
                gesture.update(pointer_x);
            });
        }
    }

    pub fn nudge_knob(&mut self, delta: f32) {
        if let Some(gesture) = self.gesture.as_mut() {
            state_change!(self, {
                gesture.step(delta);
            });
        }
    }

    pub fn release_knob(&mut self, now: Instant) {
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };
        match gesture.end(now) {
            SlideRelease::Ignored => {}
            SlideRelease::Reverted => {
                log_debug("slide released short of the threshold");
                self.request_redraw();
            }
            SlideRelease::Completed => {
                log_debug("slide completed; answering shortly");
                self.request_redraw();
            }
        }
    }

    pub fn hang_up(&mut self, now: Instant) {
        if self.flow.hang_up() {
            self.sync_screens(now);
        }
    }

    pub fn toggle_mute(&mut self) {
        if let Some(screen) = self.connected.as_mut() {
            state_change!(self, {
                screen.toggle_mute();
            });
        }
    }

    pub fn toggle_speaker(&mut self) {
        if let Some(screen) = self.connected.as_mut() {
            state_change!(self, {
                screen.toggle_speaker();
            });
        }
    }

    pub fn copy_contract(&mut self, now: Instant) {
        state_change!(self, {
            self.copy.copy(&self.contract_address, now);
        });
    }

    /// Open home-screen app `index`. Only works while the home screen shows.
    pub fn open_app(&mut self, index: usize) -> bool {
        if self.state() != CallState::Home {
            return false;
        }
        let Some(app) = HOME_APPS.get(index) else {
            return false;
        };
        links::launch(self.links.as_mut(), app)
    }

    pub fn restart(&mut self, now: Instant) {
        if self.flow.restart() {
            self.gesture = None;
            self.sync_screens(now);
        }
    }

    /// Run every timer that came due by `now`.
    pub fn tick(&mut self, now: Instant) {
        if self.clock.poll(now) {
            self.request_redraw();
        }
        if let Some(screen) = self.connected.as_mut() {
            if screen.tick(now) {
                self.needs_redraw = true;
            }
        }
        if self.copy.poll(now) {
            self.request_redraw();
        }
        let answer_due = self
            .gesture
            .as_mut()
            .map(|gesture| gesture.poll_answer(now))
            .unwrap_or(false);
        if answer_due && self.flow.answer() {
            self.sync_screens(now);
        }
        if self.flow.poll_audio_events() {
            self.sync_screens(now);
        }
    }

    /// Soonest instant at which `tick` has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        earliest([
            Some(self.clock.next_refresh()),
            self.connected.as_ref().map(ConnectedScreen::next_tick),
            self.gesture.as_ref().and_then(SlideGesture::answer_due_at),
            self.copy.reset_due_at(),
        ])
    }

    /// The visualizer wants a frame every `ANIMATION_FRAME`.
    pub fn is_animating(&self) -> bool {
        self.connected
            .as_ref()
            .map(|screen| !screen.is_muted())
            .unwrap_or(false)
    }

    pub fn shutdown(&mut self) {
        self.connected = None;
        self.gesture = None;
        self.flow.shutdown();
    }

    pub(crate) fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    pub(crate) fn take_redraw_request(&mut self) -> bool {
        let requested = self.needs_redraw;
        self.needs_redraw = false;
        requested
    }

    /// Bring screen-owned state in line with the flow after a transition.
    fn sync_screens(&mut self, now: Instant) {
        match self.state() {
            CallState::Incoming => {
                self.connected = None;
            }
            CallState::Connected => {
                self.gesture = None;
                if self.connected.is_none() {
                    self.connected = Some(ConnectedScreen::enter(now));
                }
            }
            CallState::Home => {
                self.gesture = None;
                self.connected = None;
            }
        }
        self.request_redraw();
    }
}
