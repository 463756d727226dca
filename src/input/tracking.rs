//! Hand-tracking provider interface and per-tick hand snapshots.
//!
//! The tracking backend is an external collaborator. It is queried exactly
//! once per tick through [`TrackingFrame::capture`]; hands that are not yet
//! initialized simply produce no snapshot and their work is deferred.

use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    /// Both hands, left first.
    pub const ALL: [Hand; 2] = [Hand::Left, Hand::Right];

    /// The opposite hand.
    pub fn other(self) -> Hand {
        match self {
            Hand::Left => Hand::Right,
            Hand::Right => Hand::Left,
        }
    }

    /// Stable index for per-hand arrays.
    pub fn index(self) -> usize {
        match self {
            Hand::Left => 0,
            Hand::Right => 1,
        }
    }
}

/// Named skeleton landmarks the gestures depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landmark {
    IndexTip,
    /// Second joint of the index finger; the pen ray starts here
    IndexDistal,
    ThumbTip,
    MiddleTip,
}

/// Fingers that can pinch against the thumb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Finger {
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 4] = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

    fn index(self) -> usize {
        match self {
            Finger::Index => 0,
            Finger::Middle => 1,
            Finger::Ring => 2,
            Finger::Pinky => 3,
        }
    }
}

/// Hand/skeleton tracking provider.
pub trait HandTracker {
    /// Whether the skeleton for `hand` is initialized and its landmarks valid.
    fn is_ready(&self, hand: Hand) -> bool;

    /// World position of a landmark, if currently tracked.
    fn landmark(&self, hand: Hand, landmark: Landmark) -> Option<Vec3>;

    /// Whether `finger` is pinching the thumb.
    fn is_pinching(&self, hand: Hand, finger: Finger) -> bool;
}

/// Everything the gestures need from one hand, sampled once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandSnapshot {
    pub index_tip: Vec3,
    pub index_distal: Vec3,
    pub thumb_tip: Vec3,
    pub middle_tip: Vec3,
    pinching: [bool; 4],
}

impl HandSnapshot {
    pub fn new(index_tip: Vec3, index_distal: Vec3, thumb_tip: Vec3, middle_tip: Vec3) -> Self {
        Self {
            index_tip,
            index_distal,
            thumb_tip,
            middle_tip,
            pinching: [false; 4],
        }
    }

    /// Builder-style pinch flag setter.
    pub fn with_pinch(mut self, finger: Finger, pinching: bool) -> Self {
        self.pinching[finger.index()] = pinching;
        self
    }

    /// Samples `hand` from the tracker.
    ///
    /// Returns `None` while the hand is not ready or any required landmark is
    /// missing or non-finite.
    pub fn capture(tracker: &dyn HandTracker, hand: Hand) -> Option<Self> {
        if !tracker.is_ready(hand) {
            return None;
        }
        let landmark = |which| tracker.landmark(hand, which).filter(|p: &Vec3| p.is_finite());
        let mut snapshot = Self::new(
            landmark(Landmark::IndexTip)?,
            landmark(Landmark::IndexDistal)?,
            landmark(Landmark::ThumbTip)?,
            landmark(Landmark::MiddleTip)?,
        );
        for finger in Finger::ALL {
            snapshot.pinching[finger.index()] = tracker.is_pinching(hand, finger);
        }
        Some(snapshot)
    }

    pub fn is_pinching(&self, finger: Finger) -> bool {
        self.pinching[finger.index()]
    }

    /// Point between the thumb and middle fingertips (calibration gesture).
    pub fn thumb_middle_midpoint(&self) -> Vec3 {
        (self.thumb_tip + self.middle_tip) * 0.5
    }

    /// Point between the thumb and index fingertips (repositioning gesture).
    pub fn thumb_index_midpoint(&self) -> Vec3 {
        (self.thumb_tip + self.index_tip) * 0.5
    }

    /// Pointing direction of the index finger (not normalized).
    pub fn index_direction(&self) -> Vec3 {
        self.index_tip - self.index_distal
    }
}

/// Snapshots of both hands for the current tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrackingFrame {
    hands: [Option<HandSnapshot>; 2],
}

impl TrackingFrame {
    /// Queries the tracker once for each hand.
    pub fn capture(tracker: &dyn HandTracker) -> Self {
        Self {
            hands: Hand::ALL.map(|hand| HandSnapshot::capture(tracker, hand)),
        }
    }

    pub fn with_hand(mut self, hand: Hand, snapshot: HandSnapshot) -> Self {
        self.hands[hand.index()] = Some(snapshot);
        self
    }

    pub fn hand(&self, hand: Hand) -> Option<&HandSnapshot> {
        self.hands[hand.index()].as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct HalfReady;

    impl HandTracker for HalfReady {
        fn is_ready(&self, hand: Hand) -> bool {
            hand == Hand::Right
        }

        fn landmark(&self, _hand: Hand, landmark: Landmark) -> Option<Vec3> {
            match landmark {
                Landmark::IndexTip => Some(Vec3::new(0.0, 0.0, 1.0)),
                Landmark::IndexDistal => Some(Vec3::ZERO),
                Landmark::ThumbTip => Some(Vec3::new(0.0, 1.0, 0.0)),
                Landmark::MiddleTip => Some(Vec3::new(0.0, 3.0, 0.0)),
            }
        }

        fn is_pinching(&self, _hand: Hand, finger: Finger) -> bool {
            finger == Finger::Middle
        }
    }

    #[test]
    fn capture_skips_hands_that_are_not_ready() {
        let frame = TrackingFrame::capture(&HalfReady);
        assert!(frame.hand(Hand::Left).is_none());

        let right = frame.hand(Hand::Right).unwrap();
        assert!(right.is_pinching(Finger::Middle));
        assert!(!right.is_pinching(Finger::Index));
        assert_eq!(right.thumb_middle_midpoint(), Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(right.thumb_index_midpoint(), Vec3::new(0.0, 0.5, 0.5));
        assert_eq!(right.index_direction(), Vec3::Z);
    }

    #[test]
    fn other_hand_flips() {
        assert_eq!(Hand::Left.other(), Hand::Right);
        assert_eq!(Hand::Right.other().index(), 0);
    }
}
