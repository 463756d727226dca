//! The index finger as a pen.
//!
//! Each tick a short ray is cast from the index finger's distal joint to its
//! tip. When that ray reaches a board the fingertip is in contact with it;
//! the hit's surface coordinate becomes the stroke sample for that board.

use super::tracking::{Finger, Hand, TrackingFrame};
use crate::geometry::Ray;
use crate::scene::{Intersector, Scene, SurfaceHit, SurfaceId};
use log::{debug, trace};

/// What the pen did during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PenUpdate {
    /// Board touched this tick, if any
    pub contact: Option<SurfaceHit>,
    /// Board wiped by the clear gesture this tick, if any
    pub cleared: Option<SurfaceId>,
}

/// Contact detection for one hand's index finger.
#[derive(Debug)]
pub struct Pen {
    hand: Hand,
    clear_on_pinky: bool,
    last_surface: Option<SurfaceId>,
    pinky_held: bool,
}

impl Pen {
    pub fn new(hand: Hand, clear_on_pinky: bool) -> Self {
        Self {
            hand,
            clear_on_pinky,
            last_surface: None,
            pinky_held: false,
        }
    }

    pub fn hand(&self) -> Hand {
        self.hand
    }

    /// Board the pen touched most recently.
    pub fn last_surface(&self) -> Option<SurfaceId> {
        self.last_surface
    }

    /// Hit-tests the pen against the scene and feeds every board its contact sample.
    ///
    /// Boards the pen is not touching receive "no contact" for this hand. A
    /// hand that is not tracked this tick touches nothing.
    pub fn update(&mut self, frame: &TrackingFrame, scene: &mut Scene) -> PenUpdate {
        let snapshot = frame.hand(self.hand);
        let contact = snapshot.and_then(|hand| {
            let (ray, reach) = Ray::between(hand.index_distal, hand.index_tip)?;
            scene.raycast(&ray, reach)
        });

        if let Some(hit) = contact {
            if self.last_surface != Some(hit.surface) {
                debug!("{:?} pen touching {}", self.hand, hit.surface);
            }
            trace!("{:?} pen at {:?} on {}", self.hand, hit.uv, hit.surface);
            self.last_surface = Some(hit.surface);
        }

        let pinky = snapshot.is_some_and(|hand| hand.is_pinching(Finger::Pinky));
        let pinch_started = pinky && !self.pinky_held;
        self.pinky_held = pinky;

        let mut cleared = None;
        if pinch_started && self.clear_on_pinky {
            if let Some(surface) = self.last_surface.and_then(|id| scene.surface_mut(id)) {
                surface.clear();
                debug!("Cleared {} by pinky pinch", surface.id());
                cleared = Some(surface.id());
            }
        }

        // Sampled after the clear, which resets the board's strokes.
        for surface in scene.surfaces_mut() {
            let sample = contact
                .filter(|hit| hit.surface == surface.id())
                .map(|hit| hit.uv);
            surface.sample_contact(self.hand, sample);
        }

        PenUpdate { contact, cleared }
    }

    /// Forgets the last touched board and any held gesture.
    pub fn reset(&mut self) {
        self.last_surface = None;
        self.pinky_held = false;
    }
}
