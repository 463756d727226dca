//! Two-handed board move and re-orientation.
//!
//! With both index pinches closed, the support hand reaches for the board in
//! front of it. The grabbed board is suspended (no inking) and follows the
//! hands: its plane is translated so the support hand's pinch lies on it, and
//! re-oriented to stay vertical while facing across the line between the two
//! pinches. Releasing either pinch restores inking.

use super::indicator::Indicator;
use crate::config::RepositionConfig;
use crate::draw::{self, Color};
use crate::geometry::{self, Pose, Ray};
use crate::input::{Finger, HandSnapshot};
use crate::scene::{Intersector, Scene, SurfaceId};
use glam::Vec3;
use log::{debug, trace};

/// Runtime settings for the repositioning gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct RepositionSettings {
    pub reach_distance: f32,
    pub marker_size: f32,
    pub marker_color: Color,
}

impl Default for RepositionSettings {
    fn default() -> Self {
        Self::from(&RepositionConfig::default())
    }
}

impl From<&RepositionConfig> for RepositionSettings {
    fn from(cfg: &RepositionConfig) -> Self {
        Self {
            reach_distance: cfg.reach_distance,
            marker_size: cfg.marker_size,
            marker_color: cfg.marker_color.to_color_or(draw::WHITE),
        }
    }
}

/// Moves a grabbed board along with both hands.
#[derive(Debug)]
pub struct RepositioningController {
    settings: RepositionSettings,
    target: Option<SurfaceId>,
    engaged: bool,
    markers: [Indicator; 2],
}

impl RepositioningController {
    pub fn new(settings: RepositionSettings) -> Self {
        let marker = Indicator::hidden(settings.marker_size, settings.marker_color);
        Self {
            settings,
            target: None,
            engaged: false,
            markers: [marker; 2],
        }
    }

    pub fn target(&self) -> Option<SurfaceId> {
        self.target
    }

    /// Whether both index pinches were held on the last update.
    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Projections of the support and dominant pinch points onto the grabbed board.
    pub fn markers(&self) -> &[Indicator; 2] {
        &self.markers
    }

    /// Advances the gesture by one tick.
    ///
    /// `support` grabs and anchors the board; `dominant` sets its facing.
    pub fn update(
        &mut self,
        support: Option<&HandSnapshot>,
        dominant: Option<&HandSnapshot>,
        scene: &mut Scene,
    ) {
        let pinched = |hand: Option<&HandSnapshot>| hand.filter(|h| h.is_pinching(Finger::Index)).copied();
        let (Some(support), Some(dominant)) = (pinched(support), pinched(dominant)) else {
            self.release(scene);
            return;
        };

        if !self.engaged {
            debug!("Reposition gesture engaged");
            self.engaged = true;
        }

        if self.target.is_none() {
            self.acquire(&support, scene);
        }
        let Some(id) = self.target else {
            return;
        };
        let Some(surface) = scene.surface_mut(id) else {
            debug!("Reposition target {} no longer exists", id);
            self.target = None;
            self.hide_markers();
            return;
        };

        let anchor = support.thumb_index_midpoint();
        let aim = dominant.thumb_index_midpoint();
        let pose = *surface.pose();
        let normal = pose.normal();
        let anchor_proj = geometry::project_point_on_plane(anchor, pose.position, normal);
        let aim_proj = geometry::project_point_on_plane(aim, pose.position, normal);

        let facing = geometry::plane_normal(anchor + Vec3::Y, anchor, aim);
        let orientation = geometry::facing_rotation(facing).unwrap_or(pose.orientation);
        let position = pose.position + (anchor - anchor_proj);
        trace!("Moving {} to {:?}", id, position);
        surface.set_pose(Pose::new(position, orientation));

        for (marker, point) in self.markers.iter_mut().zip([anchor_proj, aim_proj]) {
            marker.position = point;
            marker.visible = true;
        }
    }

    /// Ends the gesture, reactivating the grabbed board if there is one.
    pub fn release(&mut self, scene: &mut Scene) {
        if let Some(id) = self.target.take() {
            if let Some(surface) = scene.surface_mut(id) {
                surface.set_active(true);
                debug!("Released {}", id);
            }
        }
        if self.engaged {
            debug!("Reposition gesture released");
        }
        self.engaged = false;
        self.hide_markers();
    }

    /// Drops any grab without touching the scene.
    pub fn reset(&mut self) {
        self.target = None;
        self.engaged = false;
        self.hide_markers();
    }

    fn acquire(&mut self, support: &HandSnapshot, scene: &mut Scene) {
        let Some(ray) = Ray::new(support.thumb_index_midpoint(), support.index_direction()) else {
            return;
        };
        let Some(hit) = scene.raycast(&ray, self.settings.reach_distance) else {
            return;
        };
        if let Some(surface) = scene.surface_mut(hit.surface) {
            surface.set_active(false);
            self.target = Some(hit.surface);
            debug!("Grabbed {} at {:.3}m", hit.surface, hit.distance);
        }
    }

    fn hide_markers(&mut self) {
        for marker in &mut self.markers {
            marker.visible = false;
        }
    }
}
