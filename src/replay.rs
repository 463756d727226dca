//! Recorded hand-tracking scripts played back through a session.
//!
//! A script is a TOML file listing tracking frames; each frame holds the
//! landmarks and pinching fingers of whichever hands are tracked and may be
//! repeated for several ticks. A frame without a hand means that hand is not
//! ready during those ticks.
//!
//! ```toml
//! tick_hz = 30.0
//!
//! [[frames]]
//! repeat = 60
//! [frames.left]
//! index_tip = [0.0, 1.3, -0.2]
//! index_distal = [0.0, 1.3, -0.17]
//! thumb_tip = [0.0, 1.2, -0.5]
//! middle_tip = [0.0, 1.2, -0.5]
//! pinching = ["middle"]
//! ```

use crate::input::{Finger, Hand, HandTracker, Landmark};
use crate::render::SurfaceRenderer;
use crate::session::InteractionSession;
use glam::Vec3;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::iter;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const DEMO_SCRIPT: &str = include_str!("../demos/calibrate_and_draw.toml");

/// Errors raised while loading a replay script.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read replay script {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse replay script: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("replay script has no frames")]
    Empty,

    #[error("invalid tick_hz {0}, expected a positive number of ticks per second")]
    TickRate(f32),
}

/// One tracked hand in a recorded frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandPose {
    pub index_tip: [f32; 3],
    pub index_distal: [f32; 3],
    pub thumb_tip: [f32; 3],
    pub middle_tip: [f32; 3],
    /// Fingers touching the thumb
    #[serde(default)]
    pub pinching: Vec<Finger>,
}

/// A tracking frame held for `repeat` ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayFrame {
    #[serde(default = "default_repeat")]
    pub repeat: u32,
    #[serde(default)]
    pub left: Option<HandPose>,
    #[serde(default)]
    pub right: Option<HandPose>,
}

impl ReplayFrame {
    fn hand(&self, hand: Hand) -> Option<&HandPose> {
        match hand {
            Hand::Left => self.left.as_ref(),
            Hand::Right => self.right.as_ref(),
        }
    }
}

/// A recorded tracking session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    #[serde(default = "default_tick_hz")]
    pub tick_hz: f32,
    #[serde(default)]
    pub frames: Vec<ReplayFrame>,
}

impl ReplayScript {
    /// Parses and validates a script.
    pub fn from_toml(text: &str) -> Result<Self, ReplayError> {
        let script: ReplayScript = toml::from_str(text)?;
        if !(script.tick_hz.is_finite() && script.tick_hz > 0.0) {
            return Err(ReplayError::TickRate(script.tick_hz));
        }
        if script.total_ticks() == 0 {
            return Err(ReplayError::Empty);
        }
        Ok(script)
    }

    /// Loads a script from disk.
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let text = fs::read_to_string(path).map_err(|source| ReplayError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let script = Self::from_toml(&text)?;
        debug!(
            "Loaded replay script {} ({} ticks)",
            path.display(),
            script.total_ticks()
        );
        Ok(script)
    }

    /// The built-in calibrate-and-draw script.
    pub fn demo() -> Result<Self, ReplayError> {
        Self::from_toml(DEMO_SCRIPT)
    }

    /// Time step between ticks.
    pub fn tick_interval(&self) -> Duration {
        Duration::try_from_secs_f32(self.tick_hz.recip()).unwrap_or(Duration::ZERO)
    }

    pub fn total_ticks(&self) -> u64 {
        self.frames.iter().map(|frame| u64::from(frame.repeat)).sum()
    }

    /// One tracker per tick, in playback order.
    pub fn trackers(&self) -> impl Iterator<Item = ReplayTracker<'_>> {
        self.frames
            .iter()
            .flat_map(|frame| iter::repeat_n(ReplayTracker { frame }, frame.repeat as usize))
    }
}

/// Tracking state of a single recorded tick.
#[derive(Debug, Clone, Copy)]
pub struct ReplayTracker<'a> {
    frame: &'a ReplayFrame,
}

impl HandTracker for ReplayTracker<'_> {
    fn is_ready(&self, hand: Hand) -> bool {
        self.frame.hand(hand).is_some()
    }

    fn landmark(&self, hand: Hand, landmark: Landmark) -> Option<Vec3> {
        let pose = self.frame.hand(hand)?;
        let point = match landmark {
            Landmark::IndexTip => pose.index_tip,
            Landmark::IndexDistal => pose.index_distal,
            Landmark::ThumbTip => pose.thumb_tip,
            Landmark::MiddleTip => pose.middle_tip,
        };
        Some(Vec3::from_array(point))
    }

    fn is_pinching(&self, hand: Hand, finger: Finger) -> bool {
        self.frame
            .hand(hand)
            .is_some_and(|pose| pose.pinching.contains(&finger))
    }
}

/// Totals gathered while playing a script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub ticks: u64,
    pub boards: usize,
    pub uploads: usize,
    pub inked_ticks: u64,
    pub inked_pixels: usize,
    pub resets: usize,
}

impl fmt::Display for ReplaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ticks: {}, boards: {}, uploads: {}, inked ticks: {}, inked pixels: {}, resets: {}",
            self.ticks, self.boards, self.uploads, self.inked_ticks, self.inked_pixels, self.resets
        )
    }
}

/// Plays `script` through `session`, publishing to `renderer`.
pub fn run(
    script: &ReplayScript,
    session: &mut InteractionSession,
    renderer: &mut dyn SurfaceRenderer,
) -> ReplaySummary {
    let dt = script.tick_interval();
    let mut summary = ReplaySummary::default();
    for tracker in script.trackers() {
        let report = session.tick(dt, &tracker, renderer);
        summary.ticks += 1;
        summary.uploads += report.uploads;
        if report.inked {
            summary.inked_ticks += 1;
        }
        if report.reset {
            summary.resets += 1;
        }
    }

    summary.boards = session.scene().len();
    summary.inked_pixels = session
        .scene()
        .surfaces()
        .map(|surface| {
            let canvas = surface.canvas();
            canvas.buffer().count_not(canvas.style().background)
        })
        .sum();
    info!("Replay finished: {}", summary);
    summary
}

fn default_repeat() -> u32 {
    1
}

fn default_tick_hz() -> f32 {
    30.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::draw::WHITE;
    use crate::render::SummaryRenderer;

    #[test]
    fn demo_script_parses() {
        let script = ReplayScript::demo().unwrap();
        assert_eq!(script.tick_hz, 30.0);
        assert_eq!(script.total_ticks(), 81);
        assert_eq!(script.trackers().count(), 81);
    }

    #[test]
    fn tracker_reports_recorded_hand() {
        let script = ReplayScript::demo().unwrap();
        let first = script.trackers().next().unwrap();
        assert!(first.is_ready(Hand::Left));
        assert!(!first.is_ready(Hand::Right));
        assert!(first.is_pinching(Hand::Left, Finger::Middle));
        assert!(!first.is_pinching(Hand::Left, Finger::Index));
        assert_eq!(
            first.landmark(Hand::Left, Landmark::ThumbTip),
            Some(Vec3::new(0.0, 1.2, -0.5))
        );
        assert_eq!(first.landmark(Hand::Right, Landmark::IndexTip), None);
    }

    #[test]
    fn invalid_scripts_are_rejected() {
        assert!(matches!(
            ReplayScript::from_toml("tick_hz = 30.0"),
            Err(ReplayError::Empty)
        ));
        assert!(matches!(
            ReplayScript::from_toml("tick_hz = 0.0\n[[frames]]\n"),
            Err(ReplayError::TickRate(_))
        ));
        assert!(matches!(
            ReplayScript::from_toml("[[frames]]\nrepeat = \"x\""),
            Err(ReplayError::Parse(_))
        ));
    }

    #[test]
    fn demo_creates_and_inks_one_board() {
        let script = ReplayScript::demo().unwrap();
        let mut session = InteractionSession::new(&Config::default());
        let mut renderer = SummaryRenderer::new(WHITE);

        let summary = run(&script, &mut session, &mut renderer);
        assert_eq!(summary.ticks, 81);
        assert_eq!(summary.boards, 1);
        assert_eq!(summary.resets, 0);
        assert!(summary.inked_ticks > 0);
        assert!(summary.inked_pixels > 0);
        assert_eq!(summary.uploads, renderer.total_uploads());
    }
}
