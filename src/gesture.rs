//! Slide-to-answer gesture controller.
//!
//! Geometry is measured through an injected [`TrackLayout`] so the renderer
//! decides what a unit is. The terminal renderer reports eighth-of-a-column
//! units, which makes the fixed 8-unit padding one column wide.

use crate::ticker::Deadline;
use std::time::{Duration, Instant};

/// Drag must go strictly past this share of `max_drag` to count as answered.
pub const COMPLETE_RATIO: f32 = 0.85;
/// Inset of the knob inside the track, split evenly between both ends.
pub const TRACK_PADDING: f32 = 8.0;
/// Label fades as `1 - LABEL_FADE_RATE * progress`, gone at 2/3 progress.
pub const LABEL_FADE_RATE: f32 = 1.5;
/// Time the knob sits at the end before the answer fires.
pub const ANSWER_DELAY: Duration = Duration::from_millis(200);

/// Rendered position and size of the track and its knob.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackExtents {
    pub left: f32,
    pub width: f32,
    pub knob_width: f32,
}

impl TrackExtents {
    pub fn new(left: f32, width: f32, knob_width: f32) -> Self {
        Self {
            left,
            width,
            knob_width,
        }
    }

    /// Travel available to the knob; never negative.
    pub fn max_drag(&self) -> f32 {
        (self.width - self.knob_width - TRACK_PADDING).max(0.0)
    }

    /// Pointer x that puts the knob at position 0: the pointer is assumed to
    /// hold the knob by its centre.
    pub fn origin(&self) -> f32 {
        self.left + TRACK_PADDING / 2.0 + self.knob_width / 2.0
    }
}

/// Anything that can report the current track geometry.
pub trait TrackLayout {
    fn track_extents(&self) -> TrackExtents;
}

impl<F> TrackLayout for F
where
    F: Fn() -> TrackExtents,
{
    fn track_extents(&self) -> TrackExtents {
        self()
    }
}

/// Result of letting go of the knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideRelease {
    /// Not dragging; nothing happened.
    Ignored,
    /// Released short of the threshold; knob springs back.
    Reverted,
    /// Past the threshold; knob snapped to the end and the answer is pending.
    Completed,
}

#[derive(Debug, Clone)]
pub struct SlideGesture {
    extents: TrackExtents,
    max_drag: f32,
    dragging: bool,
    position: f32,
    label_opacity: f32,
    answer: Deadline,
}

impl SlideGesture {
    /// Mount the controller, measuring the track once.
    pub fn mount(layout: &impl TrackLayout) -> Self {
        let extents = layout.track_extents();
        Self {
            extents,
            max_drag: extents.max_drag(),
            dragging: false,
            position: 0.0,
            label_opacity: 1.0,
            answer: Deadline::new(),
        }
    }

    /// Measure again after the track moved or changed size. The knob keeps
    /// its travel, clamped into the new range.
    pub fn remeasure(&mut self, layout: &impl TrackLayout) {
        self.extents = layout.track_extents();
        self.max_drag = self.extents.max_drag();
        if self.answer.is_armed() {
            self.position = self.max_drag;
        } else {
            self.position = self.position.clamp(0.0, self.max_drag);
        }
        if self.dragging {
            self.label_opacity = fade_for(self.progress());
        }
    }

    pub fn begin(&mut self) {
        if self.answer.is_armed() {
            return;
        }
        self.dragging = true;
    }

    pub fn update(&mut self, pointer_x: f32) {
        if !self.dragging {
            return;
        }
        let offset = pointer_x - self.extents.origin();
        self.position = if offset.is_nan() {
            0.0
        } else {
            offset.clamp(0.0, self.max_drag)
        };
        self.label_opacity = fade_for(self.progress());
    }

    /// Keyboard drag: grab the knob if needed and move it by `delta` units.
    pub fn step(&mut self, delta: f32) {
        self.begin();
        self.update(self.extents.origin() + self.position + delta);
    }

    pub fn end(&mut self, now: Instant) -> SlideRelease {
        if !self.dragging {
            return SlideRelease::Ignored;
        }
        self.dragging = false;
        if self.position > self.max_drag * COMPLETE_RATIO {
            self.position = self.max_drag;
            self.label_opacity = fade_for(1.0);
            self.answer.arm(now, ANSWER_DELAY);
            SlideRelease::Completed
        } else {
            self.position = 0.0;
            self.label_opacity = 1.0;
            SlideRelease::Reverted
        }
    }

    /// True once, when the post-snap delay has passed.
    pub fn poll_answer(&mut self, now: Instant) -> bool {
        self.answer.fire(now)
    }

    pub fn answer_due_at(&self) -> Option<Instant> {
        self.answer.at()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn max_drag(&self) -> f32 {
        self.max_drag
    }

    pub fn extents(&self) -> TrackExtents {
        self.extents
    }

    /// Share of the travel covered, 0..=1.
    pub fn progress(&self) -> f32 {
        if self.max_drag <= 0.0 {
            0.0
        } else {
            self.position / self.max_drag
        }
    }

    /// "slide to answer" label opacity, clamped for display.
    pub fn label_opacity(&self) -> f32 {
        self.label_opacity
    }
}

fn fade_for(progress: f32) -> f32 {
    (1.0 - LABEL_FADE_RATE * progress).clamp(0.0, 1.0)
}
