//! Facial landmark types for the 68-point annotation scheme.
//!
//! The core never touches pixels; it consumes the landmark sets a
//! `LandmarkSource` collaborator produces for each detected face. Eye
//! regions follow the standard scheme: points 36-41 for the left eye,
//! 42-47 for the right eye.

use crate::constants::{EYE_POINT_COUNT, LEFT_EYE_START, NUM_FACIAL_LANDMARKS, RIGHT_EYE_START};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A single 2D landmark coordinate in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPoint {
    /// Horizontal pixel coordinate
    pub x: f64,
    /// Vertical pixel coordinate
    pub y: f64,
}

impl LandmarkPoint {
    /// Create a new landmark point
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    #[must_use]
    pub fn distance_to(&self, other: &LandmarkPoint) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Six boundary points of one eye in canonical order: outer corner, two
/// upper-lid points, inner corner, two lower-lid points.
///
/// The order is an external contract with the landmark scheme; there is no
/// structural way to validate it, and a swapped order silently yields a
/// wrong aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyeLandmarkSet {
    points: [LandmarkPoint; EYE_POINT_COUNT],
}

impl EyeLandmarkSet {
    /// Create an eye landmark set from six points in canonical order
    #[must_use]
    pub fn new(points: [LandmarkPoint; EYE_POINT_COUNT]) -> Self {
        Self { points }
    }

    /// Access a point by canonical position (0-based: p1 is index 0)
    #[must_use]
    pub fn point(&self, index: usize) -> &LandmarkPoint {
        &self.points[index]
    }

    /// All six points in canonical order
    #[must_use]
    pub fn points(&self) -> &[LandmarkPoint; EYE_POINT_COUNT] {
        &self.points
    }
}

/// The full 68-point landmark set of one detected face.
///
/// Always constructed through [`FaceLandmarks::new`] so the point count
/// invariant holds.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceLandmarks {
    points: Vec<LandmarkPoint>,
}

impl FaceLandmarks {
    /// Create a face landmark set, validating the point count
    pub fn new(points: Vec<LandmarkPoint>) -> Result<Self> {
        if points.len() != NUM_FACIAL_LANDMARKS {
            return Err(Error::InvalidLandmarks(format!(
                "expected {} points, got {}",
                NUM_FACIAL_LANDMARKS,
                points.len()
            )));
        }
        Ok(Self { points })
    }

    /// All 68 points in scheme order
    #[must_use]
    pub fn points(&self) -> &[LandmarkPoint] {
        &self.points
    }

    /// Six points of the left eye (scheme indices 36-41)
    #[must_use]
    pub fn left_eye(&self) -> EyeLandmarkSet {
        self.eye_at(LEFT_EYE_START)
    }

    /// Six points of the right eye (scheme indices 42-47)
    #[must_use]
    pub fn right_eye(&self) -> EyeLandmarkSet {
        self.eye_at(RIGHT_EYE_START)
    }

    fn eye_at(&self, start: usize) -> EyeLandmarkSet {
        let mut points = [LandmarkPoint::new(0.0, 0.0); EYE_POINT_COUNT];
        points.copy_from_slice(&self.points[start..start + EYE_POINT_COUNT]);
        EyeLandmarkSet::new(points)
    }
}
