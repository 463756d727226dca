//! Dirty region tracking for incremental texture uploads.
//!
//! Stamps accumulate into a single bounding rectangle between commits so a
//! renderer can upload only the part of the buffer that changed.

use crate::util::Rect;

/// Tracks the damaged area of a pixel buffer accumulated between commits.
#[derive(Debug, Default)]
pub struct DirtyTracker {
    bounds: Option<Rect>,
    force_full: bool,
}

impl DirtyTracker {
    /// Creates a new, empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the entire buffer as dirty. Clears any accumulated rectangle.
    pub fn mark_full(&mut self) {
        self.force_full = true;
        self.bounds = None;
    }

    /// Grows the damaged area to include `rect` unless the tracker is already full.
    pub fn mark_rect(&mut self, rect: Rect) {
        if !rect.is_valid() || self.force_full {
            return;
        }
        self.bounds = Some(match self.bounds {
            Some(existing) => existing.union(rect),
            None => rect,
        });
    }

    /// Marks the bounding square of a stamped circle.
    pub fn mark_circle(&mut self, cx: i32, cy: i32, radius: i32) {
        if radius < 0 {
            return;
        }
        let side = radius.saturating_mul(2).saturating_add(1);
        if let Some(rect) = Rect::new(cx.saturating_sub(radius), cy.saturating_sub(radius), side, side)
        {
            self.mark_rect(rect);
        }
    }

    /// Whether anything has been marked since the last drain.
    pub fn is_dirty(&self) -> bool {
        self.force_full || self.bounds.is_some()
    }

    /// Drains the dirty regions gathered so far, clipped to the buffer.
    ///
    /// When the full buffer is marked, returns a single rectangle covering the
    /// entire buffer; otherwise returns the accumulated bounds, if any.
    pub fn take_regions(&mut self, width: i32, height: i32) -> Vec<Rect> {
        let bounds = self.bounds.take();
        if std::mem::take(&mut self.force_full) {
            return Rect::new(0, 0, width, height).into_iter().collect();
        }
        bounds
            .and_then(|rect| rect.clamp_to_bounds(width, height))
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_circle_records_bounding_square() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_circle(10, 10, 2);

        let rects = tracker.take_regions(100, 100);
        assert_eq!(rects, vec![Rect::new(8, 8, 5, 5).unwrap()]);
        assert!(!tracker.is_dirty());
    }

    #[test]
    fn stamps_coalesce_into_one_region() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_circle(5, 5, 1);
        tracker.mark_circle(20, 30, 1);

        let rects = tracker.take_regions(100, 100);
        assert_eq!(rects, vec![Rect::from_min_max(4, 4, 22, 32).unwrap()]);
    }

    #[test]
    fn mark_full_takes_precedence() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_circle(5, 5, 3);
        tracker.mark_full();
        tracker.mark_circle(20, 20, 3);

        let rects = tracker.take_regions(200, 100);
        assert_eq!(rects, vec![Rect::new(0, 0, 200, 100).unwrap()]);
    }

    #[test]
    fn offscreen_damage_is_dropped() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_circle(-50, -50, 2);
        assert!(tracker.take_regions(10, 10).is_empty());
    }
}
