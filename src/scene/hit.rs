//! Ray hit-testing against boards.

use super::SurfaceId;
use crate::geometry::Ray;
use glam::{Vec2, Vec3};

/// Result of a successful raycast against a board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    pub surface: SurfaceId,
    /// World-space hit point
    pub point: Vec3,
    /// Normalized surface coordinate of the hit
    pub uv: Vec2,
    /// Distance from the ray origin
    pub distance: f32,
}

/// Intersection service restricted to board surfaces.
pub trait Intersector {
    /// Nearest board hit by `ray` within `max_distance`, if any.
    fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<SurfaceHit>;
}
