//! Frame acquisition and landmark detection boundaries.
//!
//! The core never runs a camera or a landmark model itself; it consumes the
//! output contract of those collaborators. [`FrameSource`] yields decoded
//! pixel buffers, [`LandmarkSource`] turns one frame into zero or more
//! 68-point faces, and [`FaceStream`] is the composed per-frame view the
//! game loop pulls from. Frame cadence belongs to the source: a live camera
//! blocks until the next frame, a recording paces itself (or doesn't).

use crate::landmarks::{FaceLandmarks, LandmarkPoint};
use crate::{Error, Result};
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

/// One decoded video frame.
///
/// Channel order is whatever the landmark collaborator requires; the core
/// never inspects the pixels.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Raw pixel buffer
    pub data: Vec<u8>,
}

/// Supplies decoded frames at the camera's cadence
pub trait FrameSource: Send {
    /// Pull the next frame; `None` when the stream has ended
    fn next_frame(&mut self) -> Result<Option<Frame>>;
}

/// Detects faces and their 68-point landmark sets in one frame
pub trait LandmarkSource: Send {
    /// All face detections for the frame, in detector order
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceLandmarks>>;
}

/// Per-frame face detections, as the game loop consumes them
pub trait FaceStream: Send {
    /// Fail fast if the underlying source cannot deliver frames.
    ///
    /// Called before a round leaves Idle, so a dead camera surfaces as
    /// [`Error::CameraUnavailable`] before the countdown starts.
    fn ready(&mut self) -> Result<()> {
        Ok(())
    }

    /// Detections for the next frame; `None` when the stream has ended
    fn next_faces(&mut self) -> Result<Option<Vec<FaceLandmarks>>>;
}

/// A [`FrameSource`] composed with a [`LandmarkSource`]
pub struct DetectorStream<F: FrameSource, L: LandmarkSource> {
    frames: F,
    detector: L,
}

impl<F: FrameSource, L: LandmarkSource> DetectorStream<F, L> {
    /// Compose a frame source with a landmark detector
    pub fn new(frames: F, detector: L) -> Self {
        Self { frames, detector }
    }
}

impl<F: FrameSource, L: LandmarkSource> FaceStream for DetectorStream<F, L> {
    fn next_faces(&mut self) -> Result<Option<Vec<FaceLandmarks>>> {
        match self.frames.next_frame()? {
            Some(frame) => Ok(Some(self.detector.detect(&frame)?)),
            None => Ok(None),
        }
    }
}

/// Replays pre-detected landmarks from a JSON-lines recording.
///
/// Each line is one frame: an array of faces, each face an array of 68
/// `[x, y]` pairs. An empty array is a frame with no detected face.
pub struct RecordedFaceStream {
    frames: std::vec::IntoIter<Vec<FaceLandmarks>>,
    frame_interval: Option<Duration>,
    last_frame_at: Option<Instant>,
}

impl RecordedFaceStream {
    /// Load a recording, pacing playback at `fps` (0 replays unpaced)
    pub fn from_path<P: AsRef<Path>>(path: P, fps: u32) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            Error::CameraUnavailable(format!("cannot open recording {}: {e}", path.display()))
        })?;
        let stream = Self::from_reader(BufReader::new(file), fps)?;
        info!(
            "loaded landmark recording {} ({} frames)",
            path.display(),
            stream.frames.len()
        );
        Ok(stream)
    }

    /// Parse a recording from any reader
    pub fn from_reader<R: BufRead>(reader: R, fps: u32) -> Result<Self> {
        let mut frames = Vec::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let raw: Vec<Vec<(f64, f64)>> = serde_json::from_str(&line).map_err(|e| {
                Error::InvalidLandmarks(format!("recording line {}: {e}", line_no + 1))
            })?;
            let faces = raw
                .into_iter()
                .map(|points| {
                    FaceLandmarks::new(
                        points
                            .into_iter()
                            .map(|(x, y)| LandmarkPoint::new(x, y))
                            .collect(),
                    )
                })
                .collect::<Result<Vec<_>>>()?;
            frames.push(faces);
        }
        Ok(Self::from_frames(frames, fps))
    }

    /// Build a stream from already-parsed frames
    #[must_use]
    pub fn from_frames(frames: Vec<Vec<FaceLandmarks>>, fps: u32) -> Self {
        let frame_interval = if fps > 0 {
            Some(Duration::from_secs_f64(1.0 / f64::from(fps)))
        } else {
            None
        };
        Self {
            frames: frames.into_iter(),
            frame_interval,
            last_frame_at: None,
        }
    }

    fn pace(&mut self) {
        if let Some(interval) = self.frame_interval {
            if let Some(last) = self.last_frame_at {
                let elapsed = last.elapsed();
                if elapsed < interval {
                    thread::sleep(interval - elapsed);
                }
            }
            self.last_frame_at = Some(Instant::now());
        }
    }
}

impl FaceStream for RecordedFaceStream {
    fn ready(&mut self) -> Result<()> {
        if self.frames.len() == 0 {
            return Err(Error::CameraUnavailable(
                "recording contains no frames".to_string(),
            ));
        }
        Ok(())
    }

    fn next_faces(&mut self) -> Result<Option<Vec<FaceLandmarks>>> {
        match self.frames.next() {
            Some(faces) => {
                self.pace();
                debug!("frame replayed with {} face(s)", faces.len());
                Ok(Some(faces))
            }
            None => Ok(None),
        }
    }
}
