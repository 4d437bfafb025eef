//! Blink detection from eye landmark geometry.
//!
//! The eye aspect ratio (EAR) collapses the six boundary points of an eye
//! into a single openness scalar; a frame counts as a blink when the minimum
//! EAR over all eyes of all detected faces falls strictly below a threshold.
//! There is no temporal smoothing: one sub-threshold frame is sufficient.

use crate::constants::DEFAULT_EAR_THRESHOLD;
use crate::landmarks::{EyeLandmarkSet, FaceLandmarks};
use crate::{Error, Result};

/// Compute the eye aspect ratio for one eye.
///
/// With the six points p1..p6 in canonical order:
/// `EAR = (|p2-p6| + |p3-p5|) / (2 * |p1-p4|)`.
///
/// Fails with [`Error::DegenerateGeometry`] when the horizontal span
/// `|p1-p4|` is zero (collapsed detection); the caller must treat the frame
/// as carrying no decision rather than dividing by zero.
pub fn eye_aspect_ratio(eye: &EyeLandmarkSet) -> Result<f64> {
    let p2_p6 = eye.point(1).distance_to(eye.point(5));
    let p3_p5 = eye.point(2).distance_to(eye.point(4));
    let p1_p4 = eye.point(0).distance_to(eye.point(3));

    if p1_p4 == 0.0 {
        return Err(Error::DegenerateGeometry);
    }

    Ok((p2_p6 + p3_p5) / (2.0 * p1_p4))
}

/// Outcome of evaluating one frame's detections
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameVerdict {
    /// At least one face was detected and the minimum EAR fell below threshold
    Blink {
        /// The minimum EAR across all eyes of all faces
        min_ear: f64,
    },
    /// Faces were detected and all eyes stayed at or above threshold
    Open {
        /// The minimum EAR across all eyes of all faces
        min_ear: f64,
    },
    /// No face was detected in the frame
    NoFace,
}

impl FrameVerdict {
    /// Whether this verdict ends a running round
    #[must_use]
    pub fn is_blink(&self) -> bool {
        matches!(self, FrameVerdict::Blink { .. })
    }
}

/// Per-frame blink decision from facial landmarks
#[derive(Debug, Clone, Copy)]
pub struct BlinkDetector {
    threshold: f64,
}

impl Default for BlinkDetector {
    fn default() -> Self {
        Self::new(DEFAULT_EAR_THRESHOLD)
    }
}

impl BlinkDetector {
    /// Create a detector with the given EAR threshold
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// The configured EAR threshold
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Minimum EAR over all eyes of all detected faces.
    ///
    /// Returns `None` for a frame with no faces. A degenerate eye in any face
    /// poisons the whole frame: the error propagates and the frame carries no
    /// decision.
    pub fn min_ear(&self, faces: &[FaceLandmarks]) -> Result<Option<f64>> {
        let mut min: Option<f64> = None;
        for face in faces {
            for ear in [
                eye_aspect_ratio(&face.left_eye())?,
                eye_aspect_ratio(&face.right_eye())?,
            ] {
                min = Some(match min {
                    Some(current) => current.min(ear),
                    None => ear,
                });
            }
        }
        Ok(min)
    }

    /// Evaluate one frame's detections.
    ///
    /// A blink requires the minimum EAR to be strictly below the threshold;
    /// a value equal to the threshold is not a blink.
    pub fn evaluate(&self, faces: &[FaceLandmarks]) -> Result<FrameVerdict> {
        match self.min_ear(faces)? {
            None => Ok(FrameVerdict::NoFace),
            Some(min_ear) if min_ear < self.threshold => Ok(FrameVerdict::Blink { min_ear }),
            Some(min_ear) => Ok(FrameVerdict::Open { min_ear }),
        }
    }

    /// Whether the frame's detections amount to a blink
    pub fn is_blink(&self, faces: &[FaceLandmarks]) -> Result<bool> {
        Ok(self.evaluate(faces)?.is_blink())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::LandmarkPoint;

    /// Six eye points with horizontal span 2 and both vertical spans `lid_gap`,
    /// giving `EAR = lid_gap / 2`
    fn eye_points(origin_x: f64, lid_gap: f64) -> [LandmarkPoint; 6] {
        [
            LandmarkPoint::new(origin_x, 0.0),
            LandmarkPoint::new(origin_x + 0.5, lid_gap / 2.0),
            LandmarkPoint::new(origin_x + 1.5, lid_gap / 2.0),
            LandmarkPoint::new(origin_x + 2.0, 0.0),
            LandmarkPoint::new(origin_x + 1.5, -lid_gap / 2.0),
            LandmarkPoint::new(origin_x + 0.5, -lid_gap / 2.0),
        ]
    }

    fn eye_with_gap(lid_gap: f64) -> EyeLandmarkSet {
        EyeLandmarkSet::new(eye_points(0.0, lid_gap))
    }

    /// Full 68-point face whose eyes have the given lid gaps
    fn face_with_eye_gaps(left_gap: f64, right_gap: f64) -> FaceLandmarks {
        let mut points = vec![LandmarkPoint::new(0.0, 0.0); 68];
        points[36..42].copy_from_slice(&eye_points(10.0, left_gap));
        points[42..48].copy_from_slice(&eye_points(20.0, right_gap));
        FaceLandmarks::new(points).unwrap()
    }

    #[test]
    fn test_ear_formula() {
        // Vertical spans of 1.0 each, horizontal span 2.0 -> (1+1)/(2*2) = 0.5
        let ear = eye_aspect_ratio(&eye_with_gap(1.0)).unwrap();
        assert!((ear - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_ear_closed_eye_is_small() {
        let open = eye_aspect_ratio(&eye_with_gap(1.2)).unwrap();
        let closed = eye_aspect_ratio(&eye_with_gap(0.1)).unwrap();
        assert!(closed < open);
        assert!(closed > 0.0);
    }

    #[test]
    fn test_degenerate_horizontal_span() {
        let point = LandmarkPoint::new(1.0, 1.0);
        let eye = EyeLandmarkSet::new([point; 6]);
        assert!(matches!(
            eye_aspect_ratio(&eye),
            Err(Error::DegenerateGeometry)
        ));
    }

    #[test]
    fn test_threshold_boundary_is_exclusive() {
        // Power-of-two geometry keeps the arithmetic exact:
        // lid_gap 0.5 -> EAR exactly 0.25
        let ear = eye_aspect_ratio(&eye_with_gap(0.5)).unwrap();
        assert_eq!(ear, 0.25);

        let detector = BlinkDetector::new(0.25);
        let face = face_with_eye_gaps(0.5, 0.5);
        assert!(!detector.is_blink(&[face.clone()]).unwrap());

        // Nudge the threshold up and the same frame blinks.
        let detector = BlinkDetector::new(0.2500001);
        assert!(detector.is_blink(&[face]).unwrap());
    }

    #[test]
    fn test_no_faces_is_not_a_blink() {
        let detector = BlinkDetector::default();
        assert_eq!(detector.evaluate(&[]).unwrap(), FrameVerdict::NoFace);
        assert!(!detector.is_blink(&[]).unwrap());
    }

    #[test]
    fn test_minimum_across_faces_governs() {
        // One face well open (EAR 0.35), one blinking (EAR 0.15)
        let open_face = face_with_eye_gaps(0.7, 0.7);
        let blink_face = face_with_eye_gaps(0.3, 0.3);

        let detector = BlinkDetector::new(0.2);
        let min = detector
            .min_ear(&[open_face.clone(), blink_face.clone()])
            .unwrap()
            .unwrap();
        assert!((min - 0.15).abs() < 1e-12);
        assert!(detector.is_blink(&[open_face, blink_face]).unwrap());
    }

    #[test]
    fn test_single_closed_eye_triggers() {
        // Left eye open (EAR 0.35), right eye shut (EAR 0.1)
        let face = face_with_eye_gaps(0.7, 0.2);
        let detector = BlinkDetector::new(0.2);
        assert!(detector.is_blink(&[face]).unwrap());
    }
}
