//! Hand-off of board pixels to the host's rendering layer.

use crate::draw::{Color, PixelBuffer};
use crate::scene::SurfaceId;
use crate::util::Rect;
use log::debug;
use std::collections::BTreeMap;

/// Receives committed board contents once per tick.
pub trait SurfaceRenderer {
    /// Publishes `pixels` for `surface`; only `region` changed since the last upload.
    fn upload(&mut self, surface: SurfaceId, pixels: &PixelBuffer, region: Rect);

    /// The board no longer exists.
    fn remove(&mut self, surface: SurfaceId);
}

/// Per-board statistics kept by [`SummaryRenderer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadStats {
    pub uploads: usize,
    pub width: u32,
    pub height: u32,
    /// Pixels that differ from the background
    pub inked: usize,
}

/// Headless renderer that only records what would have been drawn.
#[derive(Debug)]
pub struct SummaryRenderer {
    background: Color,
    boards: BTreeMap<SurfaceId, UploadStats>,
    removed: Vec<SurfaceId>,
    total_uploads: usize,
}

impl SummaryRenderer {
    pub fn new(background: Color) -> Self {
        Self {
            background,
            boards: BTreeMap::new(),
            removed: Vec::new(),
            total_uploads: 0,
        }
    }

    pub fn boards(&self) -> &BTreeMap<SurfaceId, UploadStats> {
        &self.boards
    }

    pub fn removed(&self) -> &[SurfaceId] {
        &self.removed
    }

    pub fn total_uploads(&self) -> usize {
        self.total_uploads
    }
}

impl SurfaceRenderer for SummaryRenderer {
    fn upload(&mut self, surface: SurfaceId, pixels: &PixelBuffer, region: Rect) {
        let stats = self.boards.entry(surface).or_default();
        stats.uploads += 1;
        stats.width = pixels.width();
        stats.height = pixels.height();
        stats.inked = pixels.count_not(self.background);
        self.total_uploads += 1;
        debug!(
            "Upload {} {}x{} region {:?}",
            surface,
            pixels.width(),
            pixels.height(),
            region
        );
    }

    fn remove(&mut self, surface: SurfaceId) {
        self.boards.remove(&surface);
        self.removed.push(surface);
    }
}
