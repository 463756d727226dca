//! Pixel buffer and stroke rasterizer backing every drawable board.
//!
//! Ink arrives as a sparse stream of contact points (one per tick), so a fast
//! pen leaves large jumps between samples. [`DrawSurface::draw_segment`]
//! fills those jumps with overlapping circle stamps so the trail reads as a
//! continuous stroke.

use super::Color;
use super::dirty::DirtyTracker;
use crate::util::Rect;
use glam::Vec2;

/// Minimum number of interpolation steps per segment (1% of the segment per step).
pub const MIN_SEGMENT_STEPS: u32 = 100;

/// Upper bound on interpolation steps, reached only by segments spanning
/// enormous buffers.
const MAX_SEGMENT_STEPS: u32 = 65_536;

/// Row-major buffer of packed `0xAARRGGBB` pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    /// Allocates a `width x height` buffer filled with `fill`.
    ///
    /// Each dimension is clamped to at least one pixel.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![fill.to_argb(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw pixel rows, top row first.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the buffer.
    pub fn get(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }

    /// Writes a pixel; coordinates outside the buffer are ignored.
    #[inline]
    fn put(&mut self, x: i32, y: i32, argb: u32) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = argb;
        }
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Number of pixels that differ from `color`.
    pub fn count_not(&self, color: Color) -> usize {
        let argb = color.to_argb();
        self.pixels.iter().filter(|p| **p != argb).count()
    }
}

/// Appearance defaults applied whenever a surface is (re)initialized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceStyle {
    /// Fill color of a freshly initialized buffer
    pub background: Color,
    /// Ink color restored on every initialize
    pub pen_color: Color,
    /// Pen radius in pixels
    pub pen_radius: i32,
}

impl Default for SurfaceStyle {
    fn default() -> Self {
        Self {
            background: super::WHITE,
            pen_color: super::BLACK,
            pen_radius: 2,
        }
    }
}

/// A drawable pixel buffer with pen state and batched publishing.
#[derive(Debug)]
pub struct DrawSurface {
    buffer: PixelBuffer,
    style: SurfaceStyle,
    pen_color: Color,
    dirty: DirtyTracker,
    committed: Option<Rect>,
    generation: u64,
}

impl DrawSurface {
    /// Creates a surface and initializes it to `width x height` pixels.
    pub fn new(style: SurfaceStyle, width: u32, height: u32) -> Self {
        let mut surface = Self {
            buffer: PixelBuffer::new(1, 1, style.background),
            style,
            pen_color: style.pen_color,
            dirty: DirtyTracker::new(),
            committed: None,
            generation: 0,
        };
        surface.initialize(width, height);
        surface
    }

    /// Replaces the buffer with a fresh background-filled one and resets the pen color.
    ///
    /// Prior contents and sizing are discarded; calling this twice in a row
    /// leaves the same buffer as calling it once.
    pub fn initialize(&mut self, width: u32, height: u32) {
        self.buffer = PixelBuffer::new(width, height, self.style.background);
        self.pen_color = self.style.pen_color;
        self.dirty.mark_full();
        log::trace!(
            "Initialized draw surface to {}x{}",
            self.buffer.width,
            self.buffer.height
        );
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn style(&self) -> &SurfaceStyle {
        &self.style
    }

    pub fn pen_color(&self) -> Color {
        self.pen_color
    }

    pub fn set_pen_color(&mut self, color: Color) {
        self.pen_color = color;
    }

    pub fn pen_radius(&self) -> i32 {
        self.style.pen_radius
    }

    /// Number of commits that published at least one region.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Sets every pixel within `radius` of `(cx, cy)` to `color`.
    ///
    /// Out-of-bounds pixels are clipped; a negative radius draws nothing.
    pub fn stamp_circle(&mut self, color: Color, cx: i32, cy: i32, radius: i32) {
        if radius < 0 {
            return;
        }
        let argb = color.to_argb();
        let r = i64::from(radius);
        let (cx, cy) = (i64::from(cx), i64::from(cy));
        let max_x = i64::from(self.buffer.width) - 1;
        let max_y = i64::from(self.buffer.height) - 1;

        let y_start = (cy - r).max(0);
        let y_end = (cy + r).min(max_y);
        let x_start = (cx - r).max(0);
        let x_end = (cx + r).min(max_x);
        if y_start > y_end || x_start > x_end {
            return;
        }

        for y in y_start..=y_end {
            let dy = y - cy;
            for x in x_start..=x_end {
                let dx = x - cx;
                if dx * dx + dy * dy <= r * r {
                    self.buffer.put(x as i32, y as i32, argb);
                }
            }
        }
        self.dirty.mark_circle(cx as i32, cy as i32, radius);
    }

    /// Maps a normalized surface coordinate to the pixel where a stamp of
    /// `radius` is placed, shifted by half the pen diameter on each axis.
    pub fn to_pixel(&self, point: Vec2, radius: i32) -> (i32, i32) {
        let point = point.clamp(Vec2::ZERO, Vec2::ONE);
        let offset = radius.max(0) as f32;
        let x = point.x * self.buffer.width as f32 - offset;
        let y = point.y * self.buffer.height as f32 - offset;
        (x.floor() as i32, y.floor() as i32)
    }

    /// Stamps a stroke from `from` to `to` (normalized coordinates).
    ///
    /// Without a prior point only the destination is stamped. Returns the
    /// number of stamps placed.
    pub fn draw_segment(&mut self, color: Color, from: Option<Vec2>, to: Vec2, radius: i32) -> usize {
        if !to.is_finite() || radius < 0 {
            return 0;
        }
        let dest = self.to_pixel(to, radius);
        match from.filter(|p| p.is_finite()) {
            None => {
                self.stamp_circle(color, dest.0, dest.1, radius);
                1
            }
            Some(from) => {
                let start = self.to_pixel(from, radius);
                let centers = segment_centers(start, dest, radius);
                for &(x, y) in &centers {
                    self.stamp_circle(color, x, y, radius);
                }
                centers.len()
            }
        }
    }

    /// Publishes everything drawn since the last commit.
    ///
    /// Returns `true` when there was something to publish.
    pub fn commit(&mut self) -> bool {
        if !self.dirty.is_dirty() {
            return false;
        }
        let regions = self
            .dirty
            .take_regions(self.buffer.width as i32, self.buffer.height as i32);
        let Some(region) = regions.into_iter().reduce(Rect::union) else {
            return false;
        };
        self.committed = Some(match self.committed {
            Some(existing) => existing.union(region),
            None => region,
        });
        self.generation += 1;
        true
    }

    /// Takes the region committed since the renderer last saw this surface.
    pub fn take_committed(&mut self) -> Option<Rect> {
        self.committed.take()
    }
}

/// Pixel centers stamped along the line from `start` to `end`, both inclusive.
///
/// The line is sampled at `max(100, len / radius)` evenly spaced steps so each
/// step covers at most 1% of the segment and never more than the pen radius;
/// consecutive duplicates are skipped.
pub fn segment_centers(start: (i32, i32), end: (i32, i32), radius: i32) -> Vec<(i32, i32)> {
    let (sx, sy) = (start.0 as f32, start.1 as f32);
    let (ex, ey) = (end.0 as f32, end.1 as f32);
    let length = (ex - sx).hypot(ey - sy);
    let spacing = radius.max(1) as f32;
    let steps = ((length / spacing).ceil() as u32).clamp(MIN_SEGMENT_STEPS, MAX_SEGMENT_STEPS);

    let mut centers: Vec<(i32, i32)> = Vec::new();
    for k in 0..=steps {
        let t = k as f32 / steps as f32;
        let point = (
            (sx + (ex - sx) * t).round() as i32,
            (sy + (ey - sy) * t).round() as i32,
        );
        if centers.last() != Some(&point) {
            centers.push(point);
        }
    }
    centers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLACK, RED, WHITE};

    fn surface(width: u32, height: u32) -> DrawSurface {
        DrawSurface::new(SurfaceStyle::default(), width, height)
    }

    #[test]
    fn initialize_clamps_zero_dimensions() {
        let s = surface(0, 0);
        assert_eq!((s.buffer().width(), s.buffer().height()), (1, 1));
    }

    #[test]
    fn reinitialize_is_idempotent() {
        let mut once = surface(64, 32);
        once.stamp_circle(BLACK, 10, 10, 4);
        once.initialize(40, 20);

        let mut twice = surface(64, 32);
        twice.stamp_circle(BLACK, 10, 10, 4);
        twice.initialize(40, 20);
        twice.initialize(40, 20);

        assert_eq!(once.buffer(), twice.buffer());
        assert_eq!(twice.buffer().count_not(WHITE), 0);
    }

    #[test]
    fn initialize_resets_pen_color() {
        let mut s = surface(8, 8);
        s.set_pen_color(RED);
        s.initialize(8, 8);
        assert_eq!(s.pen_color(), BLACK);
    }

    #[test]
    fn stamp_circle_is_centered() {
        let mut s = surface(21, 21);
        s.stamp_circle(BLACK, 10, 10, 3);
        let ink = BLACK.to_argb();
        assert_eq!(s.buffer().get(10, 10), Some(ink));
        assert_eq!(s.buffer().get(13, 10), Some(ink));
        assert_eq!(s.buffer().get(7, 10), Some(ink));
        assert_eq!(s.buffer().get(10, 7), Some(ink));
        assert_ne!(s.buffer().get(13, 13), Some(ink));
        assert_ne!(s.buffer().get(14, 10), Some(ink));
    }

    #[test]
    fn stamp_circle_clips_out_of_bounds() {
        let mut s = surface(10, 10);
        s.stamp_circle(BLACK, -2, -2, 3);
        assert_eq!(s.buffer().get(0, 0), Some(BLACK.to_argb()));
        s.stamp_circle(BLACK, 1_000, 1_000, 5);
        s.stamp_circle(BLACK, i32::MAX, i32::MIN, 4);
        assert_eq!(s.buffer().width(), 10);
    }

    #[test]
    fn negative_radius_is_noop() {
        let mut s = surface(10, 10);
        s.commit();
        s.stamp_circle(BLACK, 5, 5, -1);
        assert_eq!(s.draw_segment(BLACK, None, Vec2::splat(0.5), -3), 0);
        assert_eq!(s.buffer().count_not(WHITE), 0);
        assert!(!s.commit());
    }

    #[test]
    fn nan_destination_is_ignored_and_nan_source_is_absent() {
        let mut s = surface(50, 50);
        assert_eq!(s.draw_segment(BLACK, None, Vec2::new(f32::NAN, 0.5), 2), 0);
        assert_eq!(
            s.draw_segment(BLACK, Some(Vec2::new(f32::NAN, 0.0)), Vec2::splat(0.5), 2),
            1
        );
    }

    #[test]
    fn first_point_stamps_once() {
        let mut s = surface(100, 100);
        assert_eq!(s.draw_segment(BLACK, None, Vec2::new(0.5, 0.5), 2), 1);
        let (x, y) = s.to_pixel(Vec2::new(0.5, 0.5), 2);
        assert_eq!((x, y), (48, 48));
        assert_eq!(s.buffer().get(x, y), Some(BLACK.to_argb()));
    }

    #[test]
    fn segment_steps_cover_at_most_one_percent() {
        let start = (0, 0);
        let end = (900, 400);
        let centers = segment_centers(start, end, 2);
        let length = 900f32.hypot(400.0);
        let dir = (900.0 / length, 400.0 / length);

        assert_eq!(centers.first(), Some(&start));
        assert_eq!(centers.last(), Some(&end));
        for pair in centers.windows(2) {
            let a = pair[0].0 as f32 * dir.0 + pair[0].1 as f32 * dir.1;
            let b = pair[1].0 as f32 * dir.0 + pair[1].1 as f32 * dir.1;
            let gap = b - a;
            assert!(gap >= 0.0, "stamps must advance along the segment");
            assert!(gap <= length * 0.01 + 1.5, "gap {gap} too large");
            assert!(gap <= 2.0 + 1.5, "gap {gap} exceeds pen radius");
        }
    }

    #[test]
    fn fast_stroke_leaves_no_gaps() {
        let mut s = surface(400, 100);
        s.draw_segment(BLACK, Some(Vec2::new(0.05, 0.5)), Vec2::new(0.95, 0.5), 2);
        let (x0, y) = s.to_pixel(Vec2::new(0.05, 0.5), 2);
        let (x1, _) = s.to_pixel(Vec2::new(0.95, 0.5), 2);
        let ink = BLACK.to_argb();
        for x in x0..=x1 {
            assert_eq!(s.buffer().get(x, y), Some(ink), "gap at x={x}");
        }
    }

    #[test]
    fn commit_batches_stamps_into_one_region() {
        let mut s = surface(100, 100);
        assert!(s.commit());
        assert_eq!(s.take_committed(), Rect::new(0, 0, 100, 100));

        s.stamp_circle(BLACK, 10, 10, 1);
        s.stamp_circle(BLACK, 20, 20, 1);
        assert!(s.commit());
        assert_eq!(s.generation(), 2);
        assert_eq!(s.take_committed(), Rect::from_min_max(9, 9, 22, 22));
        assert!(!s.commit());
        assert_eq!(s.take_committed(), None);
    }
}
