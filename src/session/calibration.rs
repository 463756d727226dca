//! Board creation by a sustained pinch.
//!
//! The support hand's thumb-middle pinch starts a hold. The point where the
//! pinch began becomes the board's anchor corner. Once the hold has lasted
//! long enough a board is created, and for as long as the pinch stays closed
//! the board spans from the anchor to the current pinch point: always
//! vertical, facing away from the horizontal offset between the two.

use super::indicator::Indicator;
use crate::config::CalibrationConfig;
use crate::draw::{self, Color};
use crate::geometry::{self, Pose};
use crate::scene::{Scene, SurfaceId};
use crate::util;
use glam::{Quat, Vec2, Vec3};
use log::{debug, trace};
use std::time::Duration;

/// Runtime settings for the creation gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationSettings {
    pub threshold: Duration,
    pub min_size: f32,
    pub max_size: f32,
    pub min_color: Color,
    pub max_color: Color,
}

impl Default for CalibrationSettings {
    fn default() -> Self {
        Self::from(&CalibrationConfig::default())
    }
}

impl From<&CalibrationConfig> for CalibrationSettings {
    fn from(cfg: &CalibrationConfig) -> Self {
        Self {
            threshold: Duration::try_from_secs_f32(cfg.hold_seconds).unwrap_or(Duration::ZERO),
            min_size: cfg.indicator_min_size,
            max_size: cfg.indicator_max_size,
            min_color: cfg.indicator_min_color.to_color_or(draw::RED),
            max_color: cfg.indicator_max_color.to_color_or(draw::GREEN),
        }
    }
}

/// Where the creation gesture stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CalibrationPhase {
    /// No pinch held
    #[default]
    Idle,
    /// Pinch held, threshold not reached yet
    Sizing,
    /// Board created and following the pinch
    Created(SurfaceId),
}

/// State that lives only while the pinch is held.
#[derive(Debug)]
struct CalibrationSession {
    anchor: Vec3,
    elapsed: Duration,
    indicator: Indicator,
    surface: Option<SurfaceId>,
}

/// Drives board creation, sizing and orientation from the hold gesture.
#[derive(Debug)]
pub struct CalibrationStateMachine {
    settings: CalibrationSettings,
    session: Option<CalibrationSession>,
}

impl CalibrationStateMachine {
    pub fn new(settings: CalibrationSettings) -> Self {
        Self {
            settings,
            session: None,
        }
    }

    pub fn settings(&self) -> &CalibrationSettings {
        &self.settings
    }

    pub fn phase(&self) -> CalibrationPhase {
        match &self.session {
            None => CalibrationPhase::Idle,
            Some(CalibrationSession {
                surface: Some(id), ..
            }) => CalibrationPhase::Created(*id),
            Some(_) => CalibrationPhase::Sizing,
        }
    }

    /// How long the current pinch has been held (zero when idle).
    pub fn elapsed(&self) -> Duration {
        self.session
            .as_ref()
            .map_or(Duration::ZERO, |session| session.elapsed)
    }

    pub fn anchor(&self) -> Option<Vec3> {
        self.session.as_ref().map(|session| session.anchor)
    }

    pub fn indicator(&self) -> Option<&Indicator> {
        self.session.as_ref().map(|session| &session.indicator)
    }

    /// Hold progress toward the threshold, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        progress(self.elapsed(), self.settings.threshold)
    }

    /// Advances the gesture by one tick.
    ///
    /// `pinch` is the current thumb-middle midpoint while the pinch is held,
    /// `None` once it is released.
    pub fn update(&mut self, pinch: Option<Vec3>, dt: Duration, scene: &mut Scene) -> CalibrationPhase {
        let Some(point) = pinch.filter(|p| p.is_finite()) else {
            self.release();
            return CalibrationPhase::Idle;
        };

        let settings = &self.settings;
        let session = self.session.get_or_insert_with(|| {
            debug!("Calibration hold started at {:?}", point);
            CalibrationSession {
                anchor: point,
                elapsed: Duration::ZERO,
                indicator: Indicator::new(point, settings.min_size, settings.min_color),
                surface: None,
            }
        });

        session.elapsed = session.elapsed.saturating_add(dt);
        let t = progress(session.elapsed, settings.threshold);
        session.indicator.size = util::lerp(settings.min_size, settings.max_size, t);
        session.indicator.color = settings.min_color.lerp(settings.max_color, t);

        if session.elapsed < settings.threshold {
            return CalibrationPhase::Sizing;
        }

        let anchor = session.anchor;
        let id = *session.surface.get_or_insert_with(|| {
            let id = scene.spawn_surface(Pose::new(anchor, Quat::IDENTITY), Vec2::ZERO);
            debug!("Calibration threshold reached, created {}", id);
            id
        });
        if let Some(surface) = scene.surface_mut(id) {
            let (pose, size) = span(anchor, point, surface.pose().orientation);
            trace!("Sizing {} to {:?}", id, size);
            surface.set_pose(pose);
            surface.resize(size);
        }
        CalibrationPhase::Created(id)
    }

    /// Ends the gesture: drops the indicator, zeroes the hold and clears the anchor.
    pub fn release(&mut self) {
        if let Some(session) = self.session.take() {
            match session.surface {
                Some(id) => debug!("Calibration released, {} placed", id),
                None => debug!("Calibration released after {:?}, no board", session.elapsed),
            }
        }
    }
}

/// Pose and size of a vertical board spanning from `anchor` to `corner`.
///
/// Keeps `fallback` orientation when the two points are vertically aligned
/// and no facing direction can be derived.
pub fn span(anchor: Vec3, corner: Vec3, fallback: Quat) -> (Pose, Vec2) {
    let width = geometry::planar_distance(anchor, corner);
    let height = geometry::vertical_distance(anchor, corner);
    let normal = geometry::plane_normal(anchor, anchor + Vec3::NEG_Y, corner);
    let orientation = geometry::facing_rotation(normal).unwrap_or(fallback);
    (
        Pose::new((anchor + corner) * 0.5, orientation),
        Vec2::new(width, height),
    )
}

fn progress(elapsed: Duration, threshold: Duration) -> f32 {
    if threshold.is_zero() {
        1.0
    } else {
        (elapsed.as_secs_f32() / threshold.as_secs_f32()).clamp(0.0, 1.0)
    }
}
