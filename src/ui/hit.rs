//! Clickable regions recorded during each draw, plus the slide track's
//! measured geometry.

use crate::gesture::{TrackExtents, TrackLayout, TRACK_PADDING};
use ratatui::layout::Rect;

/// Horizontal sub-cell resolution handed to the gesture controller.
pub const UNITS_PER_COLUMN: f32 = 8.0;

/// Pointer x, in gesture units, for a click in terminal column `column`
/// (the middle of the cell).
pub fn pointer_units(column: u16) -> f32 {
    column as f32 * UNITS_PER_COLUMN + UNITS_PER_COLUMN / 2.0
}

/// What a click on a region does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitAction {
    Knob,
    Mute,
    Speaker,
    EndCall,
    CopyContract,
    OpenApp(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HitRegion {
    area: Rect,
    action: HitAction,
}

/// Regions from the most recent frame. Cleared at the start of every draw.
#[derive(Debug, Default, Clone)]
pub struct HitRegistry {
    regions: Vec<HitRegion>,
    track: Option<Rect>,
    container: Option<Rect>,
    knob_cols: u16,
}

impl HitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.regions.clear();
        self.track = None;
        self.container = None;
        self.knob_cols = 0;
    }

    pub fn register(&mut self, area: Rect, action: HitAction) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.regions.push(HitRegion { area, action });
    }

    /// Record where the knob can travel (`lane`, the row inside the track
    /// border) and the block around it that keeps a drag alive.
    pub fn set_track(&mut self, lane: Rect, container: Rect, knob_cols: u16) {
        self.track = Some(lane);
        self.container = Some(container);
        self.knob_cols = knob_cols;
    }

    pub fn has_track(&self) -> bool {
        self.track.is_some()
    }

    /// Whether (`x`, `y`) is still over the slider; leaving it ends a drag.
    pub fn in_slider(&self, x: u16, y: u16) -> bool {
        self.container
            .map(|area| contains(area, x, y))
            .unwrap_or(false)
    }

    /// Topmost region under (`x`, `y`); later registrations win.
    pub fn find_at(&self, x: u16, y: u16) -> Option<HitAction> {
        self.regions
            .iter()
            .rev()
            .find(|region| contains(region.area, x, y))
            .map(|region| region.action)
    }
}

impl TrackLayout for HitRegistry {
    /// The fixed padding is one column, split as half a column beyond each
    /// end of the lane, so the knob's travel is exactly the lane width minus
    /// the knob.
    fn track_extents(&self) -> TrackExtents {
        let Some(lane) = self.track else {
            return TrackExtents::default();
        };
        let half_pad = TRACK_PADDING / 2.0;
        TrackExtents::new(
            lane.x as f32 * UNITS_PER_COLUMN - half_pad,
            lane.width as f32 * UNITS_PER_COLUMN + TRACK_PADDING,
            self.knob_cols as f32 * UNITS_PER_COLUMN,
        )
    }
}

fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x
        && y >= area.y
        && x < area.x.saturating_add(area.width)
        && y < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_registers_and_finds() {
        let mut hits = HitRegistry::new();
        hits.register(Rect::new(2, 10, 5, 2), HitAction::Mute);
        hits.register(Rect::new(8, 10, 5, 2), HitAction::Speaker);

        assert_eq!(hits.find_at(2, 10), Some(HitAction::Mute));
        assert_eq!(hits.find_at(6, 11), Some(HitAction::Mute));
        assert_eq!(hits.find_at(8, 11), Some(HitAction::Speaker));
        assert_eq!(hits.find_at(7, 10), None);
        assert_eq!(hits.find_at(3, 12), None);
    }

    #[test]
    fn later_regions_win_and_clear_forgets_everything() {
        let mut hits = HitRegistry::new();
        hits.register(Rect::new(0, 0, 10, 3), HitAction::CopyContract);
        hits.register(Rect::new(2, 1, 2, 1), HitAction::OpenApp(1));
        hits.set_track(Rect::new(0, 5, 10, 1), Rect::new(0, 4, 12, 3), 3);
        assert_eq!(hits.find_at(2, 1), Some(HitAction::OpenApp(1)));

        hits.clear();
        assert_eq!(hits.find_at(2, 1), None);
        assert!(!hits.has_track());
        assert!(!hits.in_slider(1, 5));
    }

    #[test]
    fn empty_regions_are_ignored() {
        let mut hits = HitRegistry::new();
        hits.register(Rect::new(1, 1, 0, 3), HitAction::EndCall);
        assert_eq!(hits.find_at(1, 1), None);
    }

    #[test]
    fn track_extents_make_travel_equal_lane_minus_knob() {
        let mut hits = HitRegistry::new();
        hits.set_track(Rect::new(10, 20, 30, 1), Rect::new(9, 19, 32, 3), 5);
        let extents = hits.track_extents();
        assert_eq!(extents.max_drag(), 25.0 * UNITS_PER_COLUMN);
        // Pointer on the knob's middle column sits exactly on the origin.
        assert_eq!(pointer_units(12), extents.origin());
    }

    #[test]
    fn missing_track_measures_as_zero() {
        let hits = HitRegistry::new();
        assert_eq!(hits.track_extents().max_drag(), 0.0);
    }

    #[test]
    fn slider_container_bounds() {
        let mut hits = HitRegistry::new();
        hits.set_track(Rect::new(10, 20, 30, 1), Rect::new(9, 19, 32, 3), 5);
        assert!(hits.in_slider(9, 19));
        assert!(hits.in_slider(40, 21));
        assert!(!hits.in_slider(41, 20));
        assert!(!hits.in_slider(20, 22));
    }
}
