//! The interaction session: every gesture, driven by a fixed tick.
//!
//! One [`InteractionSession`] owns the scene and the three gesture
//! controllers. Each call to [`InteractionSession::tick`] samples the hand
//! tracker once and then runs, in order:
//!
//! 1. the support-hand pinky reset,
//! 2. board creation ([`CalibrationStateMachine`]),
//! 3. board repositioning ([`RepositioningController`]),
//! 4. the dominant-hand pen and its clear gesture,
//! 5. stroke processing on every board,
//! 6. a single batched publish of changed pixels to the renderer.

mod calibration;
mod indicator;
mod reposition;

pub use calibration::{CalibrationPhase, CalibrationSettings, CalibrationStateMachine};
pub use indicator::Indicator;
pub use reposition::{RepositionSettings, RepositioningController};

use crate::config::Config;
use crate::input::{Finger, Hand, HandTracker, Pen, TrackingFrame};
use crate::render::SurfaceRenderer;
use crate::scene::{Scene, SurfaceHit, SurfaceId};
use log::{info, trace};
use std::time::Duration;

/// What happened during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    pub calibration: CalibrationPhase,
    /// Pen contact, if the dominant fingertip touched a board
    pub contact: Option<SurfaceHit>,
    /// Board wiped by the clear gesture
    pub cleared: Option<SurfaceId>,
    /// Whether any stroke put down ink
    pub inked: bool,
    /// Boards uploaded to the renderer
    pub uploads: usize,
    /// Whether the session was reset
    pub reset: bool,
}

/// A hand-tracked whiteboard session.
#[derive(Debug)]
pub struct InteractionSession {
    dominant: Hand,
    reset_on_pinky: bool,
    scene: Scene,
    calibration: CalibrationStateMachine,
    reposition: RepositioningController,
    pen: Pen,
    support_pinky_held: bool,
    removed: Vec<SurfaceId>,
    ticks: u64,
}

impl InteractionSession {
    pub fn new(config: &Config) -> Self {
        let dominant = config.gestures.dominant_hand;
        info!(
            "Starting session: {:?} hand draws, {:?} hand places boards",
            dominant,
            dominant.other()
        );
        Self {
            dominant,
            reset_on_pinky: config.gestures.reset_session_on_pinky,
            scene: Scene::new(config.surface_style(), config.drawing.pixels_per_meter),
            calibration: CalibrationStateMachine::new(CalibrationSettings::from(&config.calibration)),
            reposition: RepositioningController::new(RepositionSettings::from(&config.reposition)),
            pen: Pen::new(dominant, config.gestures.clear_board_on_pinky),
            support_pinky_held: false,
            removed: Vec::new(),
            ticks: 0,
        }
    }

    pub fn dominant_hand(&self) -> Hand {
        self.dominant
    }

    /// The hand that creates, grabs and resets boards.
    pub fn support_hand(&self) -> Hand {
        self.dominant.other()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn calibration(&self) -> &CalibrationStateMachine {
        &self.calibration
    }

    pub fn reposition(&self) -> &RepositioningController {
        &self.reposition
    }

    pub fn pen(&self) -> &Pen {
        &self.pen
    }

    /// Ticks run since the session started.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Indicator spheres the host should currently draw.
    pub fn indicators(&self) -> Vec<Indicator> {
        self.calibration
            .indicator()
            .into_iter()
            .chain(self.reposition.markers())
            .filter(|indicator| indicator.visible)
            .copied()
            .collect()
    }

    /// Samples `tracker` once and advances the session by `dt`.
    pub fn tick(
        &mut self,
        dt: Duration,
        tracker: &dyn HandTracker,
        renderer: &mut dyn SurfaceRenderer,
    ) -> TickReport {
        let frame = TrackingFrame::capture(tracker);
        self.tick_frame(dt, &frame, renderer)
    }

    /// Advances the session by `dt` using an already captured frame.
    pub fn tick_frame(
        &mut self,
        dt: Duration,
        frame: &TrackingFrame,
        renderer: &mut dyn SurfaceRenderer,
    ) -> TickReport {
        self.ticks += 1;
        let support = frame.hand(self.support_hand()).copied();
        let dominant = frame.hand(self.dominant).copied();
        let mut report = TickReport::default();

        let pinky = support.is_some_and(|hand| hand.is_pinching(Finger::Pinky));
        let reset_requested = pinky && !self.support_pinky_held && self.reset_on_pinky;
        self.support_pinky_held = pinky;

        if reset_requested {
            self.reset();
            report.reset = true;
        } else {
            let pinch = support
                .filter(|hand| hand.is_pinching(Finger::Middle))
                .map(|hand| hand.thumb_middle_midpoint());
            report.calibration = self.calibration.update(pinch, dt, &mut self.scene);
            self.reposition
                .update(support.as_ref(), dominant.as_ref(), &mut self.scene);

            let pen = self.pen.update(frame, &mut self.scene);
            report.contact = pen.contact;
            report.cleared = pen.cleared;

            for surface in self.scene.surfaces_mut() {
                report.inked |= surface.process_strokes();
            }
        }

        report.uploads = self.publish(renderer);
        trace!("Tick {}: {:?}", self.ticks, report);
        report
    }

    /// Removes every board and drops all gesture state.
    ///
    /// The renderer is told about the removed boards on the next publish.
    pub fn reset(&mut self) {
        let removed = self.scene.clear();
        info!("Session reset, removed {} board(s)", removed.len());
        self.removed.extend(removed);
        self.calibration.release();
        self.reposition.reset();
        self.pen.reset();
    }

    /// Hands removals and committed pixel regions to the renderer.
    fn publish(&mut self, renderer: &mut dyn SurfaceRenderer) -> usize {
        for id in self.removed.drain(..) {
            renderer.remove(id);
        }

        let mut uploads = 0;
        for surface in self.scene.surfaces_mut() {
            let id = surface.id();
            let canvas = surface.canvas_mut();
            canvas.commit();
            if let Some(region) = canvas.take_committed() {
                renderer.upload(id, canvas.buffer(), region);
                uploads += 1;
            }
        }
        uploads
    }
}
