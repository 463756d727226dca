//! Ownership of every board in the session.
//!
//! Boards are created and destroyed only through [`Scene`] and referenced
//! elsewhere by [`SurfaceId`]. A stale id simply resolves to `None`.

pub mod hit;
pub mod surface;

pub use hit::{Intersector, SurfaceHit};
pub use surface::{MAX_PIXEL_DIMENSION, Surface, pixel_dimensions};

use crate::draw::SurfaceStyle;
use crate::geometry::{Pose, Ray};
use glam::Vec2;
use log::{debug, info};
use std::fmt;

/// Identifier of a board, unique for the lifetime of a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u64);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "board#{}", self.0)
    }
}

/// Owns all boards and answers raycasts against their current poses.
#[derive(Debug)]
pub struct Scene {
    surfaces: Vec<Surface>,
    next_id: u64,
    style: SurfaceStyle,
    pixels_per_meter: f32,
}

impl Scene {
    pub fn new(style: SurfaceStyle, pixels_per_meter: f32) -> Self {
        Self {
            surfaces: Vec::new(),
            next_id: 1,
            style,
            pixels_per_meter,
        }
    }

    /// Creates a board at `pose` and returns its id.
    pub fn spawn_surface(&mut self, pose: Pose, size: Vec2) -> SurfaceId {
        let id = SurfaceId(self.next_id);
        self.next_id += 1;
        self.surfaces.push(Surface::new(
            id,
            pose,
            size,
            self.style,
            self.pixels_per_meter,
        ));
        info!("Created {} at {:?}", id, pose.position);
        id
    }

    /// Destroys a board. Returns `false` if it did not exist.
    pub fn remove_surface(&mut self, id: SurfaceId) -> bool {
        let before = self.surfaces.len();
        self.surfaces.retain(|s| s.id() != id);
        let removed = self.surfaces.len() != before;
        if removed {
            debug!("Removed {}", id);
        }
        removed
    }

    /// Destroys every board, returning the ids that existed.
    pub fn clear(&mut self) -> Vec<SurfaceId> {
        let ids = self.ids();
        self.surfaces.clear();
        ids
    }

    pub fn surface(&self, id: SurfaceId) -> Option<&Surface> {
        self.surfaces.iter().find(|s| s.id() == id)
    }

    pub fn surface_mut(&mut self, id: SurfaceId) -> Option<&mut Surface> {
        self.surfaces.iter_mut().find(|s| s.id() == id)
    }

    pub fn surfaces(&self) -> impl Iterator<Item = &Surface> {
        self.surfaces.iter()
    }

    pub fn surfaces_mut(&mut self) -> impl Iterator<Item = &mut Surface> {
        self.surfaces.iter_mut()
    }

    pub fn ids(&self) -> Vec<SurfaceId> {
        self.surfaces.iter().map(Surface::id).collect()
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

impl Intersector for Scene {
    fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<SurfaceHit> {
        if !(max_distance.is_finite() && max_distance >= 0.0) {
            return None;
        }
        self.surfaces
            .iter()
            .filter_map(|surface| {
                surface
                    .intersect(ray, max_distance)
                    .map(|(distance, point, uv)| SurfaceHit {
                        surface: surface.id(),
                        point,
                        uv,
                        distance,
                    })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn scene() -> Scene {
        Scene::new(SurfaceStyle::default(), 1024.0)
    }

    #[test]
    fn ids_are_unique_and_stale_ids_resolve_to_none() {
        let mut scene = scene();
        let a = scene.spawn_surface(Pose::default(), Vec2::splat(0.5));
        let b = scene.spawn_surface(Pose::default(), Vec2::splat(0.5));
        assert_ne!(a, b);
        assert!(scene.remove_surface(a));
        assert!(!scene.remove_surface(a));
        assert!(scene.surface(a).is_none());
        assert!(scene.surface(b).is_some());
        assert_eq!(scene.clear(), vec![b]);
        assert!(scene.is_empty());
    }

    #[test]
    fn raycast_returns_nearest_board() {
        let mut scene = scene();
        let far = scene.spawn_surface(
            Pose::new(Vec3::new(0.0, 0.0, -1.0), Default::default()),
            Vec2::splat(1.0),
        );
        let near = scene.spawn_surface(Pose::default(), Vec2::splat(1.0));

        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::NEG_Z).unwrap();
        let hit = scene.raycast(&ray, 5.0).unwrap();
        assert_eq!(hit.surface, near);

        scene.remove_surface(near);
        assert_eq!(scene.raycast(&ray, 5.0).unwrap().surface, far);
        assert!(scene.raycast(&ray, 1.5).is_none());
        assert!(scene.raycast(&ray, f32::NAN).is_none());
    }
}
