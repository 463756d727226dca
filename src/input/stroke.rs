//! Contact stream to stroke conversion.
//!
//! Drawing deliberately lags contact detection by one tick: a tick draws only
//! when the *previous* tick was touching. The first tick of a contact
//! therefore never inks, and the tick right after contact is lost inks once
//! more at the last known point.

use crate::draw::DrawSurface;
use glam::Vec2;

/// Per-contact-session stroke state in normalized surface coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StrokeState {
    /// Point drawn from on the next inking tick
    pub last: Option<Vec2>,
    /// Most recent contact point
    pub current: Option<Vec2>,
    /// Contact flag sampled this tick
    pub touching_now: bool,
    /// Contact flag from the immediately preceding tick
    pub touching_previous: bool,
}

/// Turns one `(point, touching)` sample per tick into draw calls.
#[derive(Debug, Default)]
pub struct StrokeInputProcessor {
    state: StrokeState,
}

impl StrokeInputProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &StrokeState {
        &self.state
    }

    /// Whether this tick will draw (the previous tick was touching).
    pub fn is_inking(&self) -> bool {
        self.state.touching_previous
    }

    /// Records this tick's contact: `Some(point)` when touching, `None` otherwise.
    ///
    /// The last known point is kept when contact is lost so the trailing tick
    /// can still ink at it.
    pub fn sample(&mut self, contact: Option<Vec2>) {
        match contact.filter(|p| p.is_finite()) {
            Some(point) => {
                self.state.current = Some(point);
                self.state.touching_now = true;
            }
            None => self.state.touching_now = false,
        }
    }

    /// Advances one tick, drawing onto `surface` if the previous tick was touching.
    ///
    /// Returns `true` when ink was drawn and committed.
    pub fn tick(&mut self, surface: &mut DrawSurface) -> bool {
        let mut drew = false;
        if self.state.touching_previous {
            if let Some(current) = self.state.current {
                let stamps = surface.draw_segment(
                    surface.pen_color(),
                    self.state.last,
                    current,
                    surface.pen_radius(),
                );
                surface.commit();
                drew = stamps > 0;
            }
        }

        self.state.last = self.state.current;
        self.state.touching_previous = self.state.touching_now;
        if !self.state.touching_now {
            self.state = StrokeState::default();
        }
        drew
    }

    /// Drops any contact in progress without drawing.
    pub fn reset(&mut self) {
        self.state = StrokeState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{SurfaceStyle, WHITE};

    fn canvas() -> DrawSurface {
        let mut surface = DrawSurface::new(SurfaceStyle::default(), 200, 100);
        surface.commit();
        surface.take_committed();
        surface
    }

    #[test]
    fn first_tick_of_contact_never_draws() {
        let mut surface = canvas();
        let mut stroke = StrokeInputProcessor::new();

        stroke.sample(Some(Vec2::new(0.5, 0.5)));
        assert!(!stroke.tick(&mut surface));
        assert_eq!(surface.buffer().count_not(WHITE), 0);
        assert!(stroke.state().touching_previous);
    }

    #[test]
    fn draw_lags_contact_by_one_tick() {
        let mut surface = canvas();
        let mut stroke = StrokeInputProcessor::new();

        // tick N: touching
        stroke.sample(Some(Vec2::new(0.2, 0.5)));
        assert!(!stroke.tick(&mut surface));

        // tick N+1: contact lost, still draws using tick N's flag
        stroke.sample(None);
        assert!(stroke.tick(&mut surface));
        assert!(surface.buffer().count_not(WHITE) > 0);

        // tick N+2: nothing more
        let generation = surface.generation();
        stroke.sample(None);
        assert!(!stroke.tick(&mut surface));
        assert_eq!(surface.generation(), generation);
    }

    #[test]
    fn continued_contact_connects_points() {
        let mut surface = canvas();
        let mut stroke = StrokeInputProcessor::new();

        stroke.sample(Some(Vec2::new(0.1, 0.5)));
        stroke.tick(&mut surface);
        stroke.sample(Some(Vec2::new(0.9, 0.5)));
        assert!(stroke.tick(&mut surface));

        let ink = surface.pen_color().to_argb();
        let (x0, y) = surface.to_pixel(Vec2::new(0.1, 0.5), surface.pen_radius());
        let (x1, _) = surface.to_pixel(Vec2::new(0.9, 0.5), surface.pen_radius());
        for x in x0..=x1 {
            assert_eq!(surface.buffer().get(x, y), Some(ink));
        }
        assert_eq!(stroke.state().last, Some(Vec2::new(0.9, 0.5)));
    }

    #[test]
    fn state_resets_after_contact_is_lost() {
        let mut surface = canvas();
        let mut stroke = StrokeInputProcessor::new();

        stroke.sample(Some(Vec2::new(0.1, 0.1)));
        stroke.tick(&mut surface);
        stroke.sample(None);
        stroke.tick(&mut surface);
        assert_eq!(*stroke.state(), StrokeState::default());

        // A new contact elsewhere must not connect back to the old stroke.
        stroke.sample(Some(Vec2::new(0.9, 0.9)));
        stroke.tick(&mut surface);
        let before = surface.buffer().count_not(WHITE);
        stroke.sample(Some(Vec2::new(0.9, 0.9)));
        stroke.tick(&mut surface);
        let mid_old_stroke = surface.to_pixel(Vec2::new(0.5, 0.5), 2);
        assert_ne!(
            surface.buffer().get(mid_old_stroke.0, mid_old_stroke.1),
            Some(surface.pen_color().to_argb())
        );
        assert!(surface.buffer().count_not(WHITE) >= before);
    }

    #[test]
    fn non_finite_samples_count_as_no_contact() {
        let mut stroke = StrokeInputProcessor::new();
        stroke.sample(Some(Vec2::new(f32::NAN, 0.5)));
        assert!(!stroke.state().touching_now);
        assert_eq!(stroke.state().current, None);
    }
}
