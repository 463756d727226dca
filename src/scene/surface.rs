//! A posed, drawable board in world space.

use super::SurfaceId;
use crate::draw::{DrawSurface, SurfaceStyle};
use crate::geometry::{EPSILON, Pose, Ray};
use crate::input::{Hand, StrokeInputProcessor};
use glam::{Vec2, Vec3};
use log::debug;

/// Largest pixel buffer edge a board may allocate.
pub const MAX_PIXEL_DIMENSION: u32 = 4096;

/// Pixel dimensions for a board of `size` meters.
///
/// Deterministic in `size`; each axis is clamped to
/// `1..=MAX_PIXEL_DIMENSION` and NaN or negative sizes collapse to one pixel.
pub fn pixel_dimensions(size: Vec2, pixels_per_meter: f32) -> (u32, u32) {
    let axis = |meters: f32| -> u32 {
        let pixels = (meters * pixels_per_meter).floor();
        if pixels.is_nan() || pixels < 1.0 {
            1
        } else if pixels > MAX_PIXEL_DIMENSION as f32 {
            debug!(
                "Clamping {} m board edge to {} px",
                meters, MAX_PIXEL_DIMENSION
            );
            MAX_PIXEL_DIMENSION
        } else {
            pixels as u32
        }
    };
    (axis(size.x), axis(size.y))
}

/// A planar board: pose, physical size, pixel buffer and per-hand stroke state.
#[derive(Debug)]
pub struct Surface {
    id: SurfaceId,
    pose: Pose,
    size: Vec2,
    pixels_per_meter: f32,
    canvas: DrawSurface,
    active: bool,
    strokes: [StrokeInputProcessor; 2],
}

impl Surface {
    pub(crate) fn new(
        id: SurfaceId,
        pose: Pose,
        size: Vec2,
        style: SurfaceStyle,
        pixels_per_meter: f32,
    ) -> Self {
        let size = sanitize_size(size);
        let (width, height) = pixel_dimensions(size, pixels_per_meter);
        Self {
            id,
            pose,
            size,
            pixels_per_meter,
            canvas: DrawSurface::new(style, width, height),
            active: true,
            strokes: Default::default(),
        }
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn set_pose(&mut self, pose: Pose) {
        if pose.position.is_finite() && pose.orientation.is_finite() {
            self.pose = pose;
        }
    }

    /// Width and height in meters.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn canvas(&self) -> &DrawSurface {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut DrawSurface {
        &mut self.canvas
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enables or suspends inking. Suspending drops any contact in progress.
    pub fn set_active(&mut self, active: bool) {
        if !active {
            for stroke in &mut self.strokes {
                stroke.reset();
            }
        }
        self.active = active;
    }

    /// Resizes the board and reinitializes its pixel buffer to match.
    ///
    /// Destructive: the previous drawing is discarded.
    pub fn resize(&mut self, size: Vec2) {
        self.size = sanitize_size(size);
        self.clear();
    }

    /// Wipes the drawing, keeping the current size.
    pub fn clear(&mut self) {
        let (width, height) = pixel_dimensions(self.size, self.pixels_per_meter);
        self.canvas.initialize(width, height);
        for stroke in &mut self.strokes {
            stroke.reset();
        }
    }

    pub fn stroke(&self, hand: Hand) -> &StrokeInputProcessor {
        &self.strokes[hand.index()]
    }

    /// Feeds this tick's contact for `hand`.
    pub fn sample_contact(&mut self, hand: Hand, contact: Option<Vec2>) {
        self.strokes[hand.index()].sample(contact);
    }

    /// Runs every hand's stroke processor for this tick.
    ///
    /// Inactive boards never draw. Returns `true` when any ink was drawn.
    pub fn process_strokes(&mut self) -> bool {
        if !self.active {
            for stroke in &mut self.strokes {
                stroke.reset();
            }
            return false;
        }
        let mut drew = false;
        for stroke in &mut self.strokes {
            drew |= stroke.tick(&mut self.canvas);
        }
        drew
    }

    /// Normalized surface coordinate of a world point on the board plane.
    ///
    /// `(0, 0)` is the top-left corner as seen from the facing side.
    pub fn local_uv(&self, point: Vec3) -> Vec2 {
        let local = point - self.pose.position;
        let u = local.dot(self.pose.right()) / self.size.x + 0.5;
        let v = 0.5 - local.dot(self.pose.up()) / self.size.y;
        Vec2::new(u, v)
    }

    /// Intersects `ray` with the board rectangle within `max_distance`.
    ///
    /// Returns the distance along the ray, the world hit point and its uv.
    pub fn intersect(&self, ray: &Ray, max_distance: f32) -> Option<(f32, Vec3, Vec2)> {
        if self.size.x <= EPSILON || self.size.y <= EPSILON {
            return None;
        }
        let normal = self.pose.normal();
        let denom = ray.direction.dot(normal);
        if denom.abs() < EPSILON {
            return None;
        }
        let distance = (self.pose.position - ray.origin).dot(normal) / denom;
        if !(0.0..=max_distance).contains(&distance) {
            return None;
        }
        let point = ray.at(distance);
        let uv = self.local_uv(point);
        let inside = (0.0..=1.0).contains(&uv.x) && (0.0..=1.0).contains(&uv.y);
        inside.then_some((distance, point, uv))
    }
}

fn sanitize_size(size: Vec2) -> Vec2 {
    let axis = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
    Vec2::new(axis(size.x), axis(size.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::WHITE;

    fn board(size: Vec2) -> Surface {
        Surface::new(
            SurfaceId(1),
            Pose::default(),
            size,
            SurfaceStyle::default(),
            1024.0,
        )
    }

    #[test]
    fn pixel_dimensions_follow_size() {
        assert_eq!(pixel_dimensions(Vec2::new(0.3, 0.2), 1024.0), (307, 204));
        assert_eq!(pixel_dimensions(Vec2::ZERO, 1024.0), (1, 1));
        assert_eq!(pixel_dimensions(Vec2::new(-1.0, f32::NAN), 1024.0), (1, 1));
    }

    #[test]
    fn pixel_dimensions_are_capped() {
        let max = MAX_PIXEL_DIMENSION;
        assert_eq!(pixel_dimensions(Vec2::new(1e7, 1e7), 1024.0), (max, max));
        assert_eq!(pixel_dimensions(Vec2::new(10.0, 0.5), 1024.0), (max, 512));
        assert_eq!(pixel_dimensions(Vec2::splat(f32::MAX), 4096.0), (max, max));

        let mut surface = board(Vec2::new(0.1, 0.1));
        surface.resize(Vec2::new(1e7, 1e7));
        let buffer = surface.canvas().buffer();
        assert_eq!((buffer.width(), buffer.height()), (max, max));
    }

    #[test]
    fn resize_reallocates_buffer() {
        let mut surface = board(Vec2::new(0.1, 0.1));
        surface.canvas_mut().stamp_circle(crate::draw::BLACK, 5, 5, 3);
        surface.resize(Vec2::new(0.5, 0.25));
        let buffer = surface.canvas().buffer();
        assert_eq!((buffer.width(), buffer.height()), (512, 256));
        assert_eq!(buffer.count_not(WHITE), 0);
    }

    #[test]
    fn ray_hits_inside_rectangle_only() {
        // Default pose faces +Z; shoot back along -Z.
        let surface = board(Vec2::new(1.0, 0.5));
        let ray = Ray::new(Vec3::new(0.25, 0.125, 1.0), Vec3::NEG_Z).unwrap();
        let (distance, point, uv) = surface.intersect(&ray, 2.0).unwrap();
        assert!((distance - 1.0).abs() < 1e-5);
        assert!(point.distance(Vec3::new(0.25, 0.125, 0.0)) < 1e-5);
        assert!(uv.distance(Vec2::new(0.75, 0.25)) < 1e-5);

        assert!(surface.intersect(&ray, 0.5).is_none(), "out of reach");
        let miss = Ray::new(Vec3::new(0.9, 0.0, 1.0), Vec3::NEG_Z).unwrap();
        assert!(surface.intersect(&miss, 2.0).is_none(), "beyond right edge");
        let parallel = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::X).unwrap();
        assert!(surface.intersect(&parallel, 2.0).is_none());
    }

    #[test]
    fn inactive_board_never_draws() {
        let mut surface = board(Vec2::new(0.2, 0.2));
        surface.set_active(false);
        surface.sample_contact(Hand::Right, Some(Vec2::splat(0.5)));
        assert!(!surface.process_strokes());
        surface.sample_contact(Hand::Right, Some(Vec2::splat(0.5)));
        assert!(!surface.process_strokes());
        assert_eq!(surface.canvas().buffer().count_not(WHITE), 0);
    }
}
