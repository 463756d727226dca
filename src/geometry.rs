//! 3D helpers for posing boards in world space.
//!
//! World space is right-handed with `+Y` up. A board's local frame maps
//! `+X` to its right edge direction, `+Y` to its up edge direction and `+Z`
//! to the direction it faces.

use glam::{Mat3, Quat, Vec3};

/// Below this length a direction is treated as degenerate.
pub const EPSILON: f32 = 1e-5;

/// Rigid placement of a board: center position plus orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}

impl Pose {
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Direction the board faces (its plane normal).
    pub fn normal(&self) -> Vec3 {
        self.orientation * Vec3::Z
    }

    /// Direction of increasing horizontal surface coordinate.
    pub fn right(&self) -> Vec3 {
        self.orientation * Vec3::X
    }

    /// Direction toward the board's top edge.
    pub fn up(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }
}

/// A half-line used for hit testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
}

impl Ray {
    /// Builds a ray, normalizing `direction`.
    ///
    /// Returns `None` for zero-length or non-finite directions.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        if !origin.is_finite() {
            return None;
        }
        let direction = direction.try_normalize()?;
        Some(Self { origin, direction })
    }

    /// Builds the ray from `from` toward `to`, along with the distance between them.
    pub fn between(from: Vec3, to: Vec3) -> Option<(Self, f32)> {
        let ray = Self::new(from, to - from)?;
        Some((ray, from.distance(to)))
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// Normal of the plane through three points, `(p3 - p1) x (p2 - p1)`.
///
/// The result is not normalized and is zero when the points are collinear.
pub fn plane_normal(p1: Vec3, p2: Vec3, p3: Vec3) -> Vec3 {
    (p3 - p1).cross(p2 - p1)
}

/// Removes the component of `v` along `normal`.
pub fn project_on_plane(v: Vec3, normal: Vec3) -> Vec3 {
    match normal.try_normalize() {
        Some(n) => v - n * v.dot(n),
        None => v,
    }
}

/// Projects `point` onto the plane through `origin` with the given normal.
pub fn project_point_on_plane(point: Vec3, origin: Vec3, normal: Vec3) -> Vec3 {
    project_on_plane(point - origin, normal) + origin
}

/// Orientation whose local `+Z` faces `normal` while local `+Y` stays as
/// close to world up as possible.
///
/// Returns `None` when `normal` is degenerate or points straight up or down,
/// since no upright orientation exists for it.
pub fn facing_rotation(normal: Vec3) -> Option<Quat> {
    let forward = normal.try_normalize()?;
    let right = Vec3::Y.cross(forward);
    if right.length_squared() < EPSILON {
        return None;
    }
    let right = right.normalize();
    let up = forward.cross(right);
    Some(Quat::from_mat3(&Mat3::from_cols(right, up, forward)))
}

/// Distance between two points ignoring the vertical axis.
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    (a.x - b.x).hypot(a.z - b.z)
}

/// Absolute vertical distance between two points.
pub fn vertical_distance(a: Vec3, b: Vec3) -> f32 {
    (a.y - b.y).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        a.distance(b) < 1e-4
    }

    #[test]
    fn plane_normal_of_vertical_plane_is_horizontal() {
        let anchor = Vec3::ZERO;
        let n = plane_normal(anchor, anchor + Vec3::NEG_Y, Vec3::new(0.3, -0.2, 0.0));
        assert!(n.y.abs() < 1e-6);
        assert!(close(n, Vec3::new(0.0, 0.0, -0.3)));
    }

    #[test]
    fn facing_rotation_keeps_board_upright() {
        let q = facing_rotation(Vec3::new(1.0, 0.0, 1.0)).unwrap();
        let pose = Pose::new(Vec3::ZERO, q);
        assert!(close(pose.normal(), Vec3::new(1.0, 0.0, 1.0).normalize()));
        assert!(close(pose.up(), Vec3::Y));
        assert!(pose.right().y.abs() < 1e-5);
    }

    #[test]
    fn facing_rotation_rejects_degenerate_normals() {
        assert!(facing_rotation(Vec3::ZERO).is_none());
        assert!(facing_rotation(Vec3::Y).is_none());
        assert!(facing_rotation(Vec3::new(f32::NAN, 0.0, 1.0)).is_none());
    }

    #[test]
    fn project_point_lands_on_plane() {
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let p = project_point_on_plane(Vec3::new(4.0, 5.0, 9.0), origin, Vec3::Z);
        assert!(close(p, Vec3::new(4.0, 5.0, 3.0)));
    }

    #[test]
    fn ray_between_rejects_coincident_points() {
        assert!(Ray::between(Vec3::ONE, Vec3::ONE).is_none());
        let (ray, dist) = Ray::between(Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0)).unwrap();
        assert_eq!(dist, 2.0);
        assert!(close(ray.at(1.0), Vec3::Z));
    }

    #[test]
    fn planar_and_vertical_distances() {
        let a = Vec3::ZERO;
        let b = Vec3::new(0.3, -0.2, 0.4);
        assert!((planar_distance(a, b) - 0.5).abs() < 1e-6);
        assert!((vertical_distance(a, b) - 0.2).abs() < 1e-6);
    }
}
