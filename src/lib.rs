//! Staring contest core: blink detection, game sessions and leaderboard
//! ranking.
//!
//! A round is a single-player "staring contest": facial landmarks arrive
//! frame by frame, the eye aspect ratio (EAR) of every detected eye is
//! computed, and the first frame whose minimum EAR falls below a threshold
//! ends the round. The elapsed time becomes the score, scores land in an
//! append-only leaderboard, and a rank engine turns the record set into a
//! stable display order with medal tiers.
//!
//! The pipeline, leaf to root:
//! 1. A [`capture::FaceStream`] yields per-frame 68-point landmark sets
//!    (live detection and camera I/O are external collaborators; recordings
//!    replay their output contract).
//! 2. [`blink_detection::BlinkDetector`] turns one frame's faces into a
//!    blink/open/no-face verdict.
//! 3. [`session::GameSession`] owns the clock: Idle, Countdown, Running,
//!    Ended, with the score captured at the blink.
//! 4. [`leaderboard::LeaderboardStore`] persists `{username, team, score}`
//!    rows with atomic username uniqueness.
//! 5. [`ranking::RankEngine`] recomputes the ranked view on every read.
//!
//! # Examples
//!
//! ## Eye aspect ratio
//!
//! ```
//! use staring_contest::blink_detection::eye_aspect_ratio;
//! use staring_contest::landmarks::{EyeLandmarkSet, LandmarkPoint};
//!
//! // Outer corner, two upper-lid points, inner corner, two lower-lid points
//! let eye = EyeLandmarkSet::new([
//!     LandmarkPoint::new(0.0, 0.0),
//!     LandmarkPoint::new(1.0, 0.4),
//!     LandmarkPoint::new(2.0, 0.4),
//!     LandmarkPoint::new(3.0, 0.0),
//!     LandmarkPoint::new(2.0, -0.4),
//!     LandmarkPoint::new(1.0, -0.4),
//! ]);
//!
//! let ear = eye_aspect_ratio(&eye).unwrap();
//! assert!(ear > 0.2, "open eye should be above the blink threshold");
//! ```
//!
//! ## Ranking with ties
//!
//! ```
//! use staring_contest::leaderboard::{LeaderboardStore, MemoryStore, ScoreRecord};
//! use staring_contest::ranking::{RankEngine, Tier};
//!
//! let store = MemoryStore::new();
//! store.append(ScoreRecord::new("ada", "UK", 5.0)).unwrap();
//! store.append(ScoreRecord::new("grace", "US", 5.0)).unwrap();
//! store.append(ScoreRecord::new("alan", "UK", 3.0)).unwrap();
//!
//! let ranked = RankEngine::rank(&store.read_all().unwrap());
//! // Equal scores keep insertion order: ada before grace
//! assert_eq!(ranked[0].record.username, "ada");
//! assert_eq!(ranked[0].tier, Tier::Gold);
//! assert_eq!(ranked[1].tier, Tier::Silver);
//! assert_eq!(ranked[2].tier, Tier::Bronze);
//! ```
//!
//! ## A full round from a recording
//!
//! ```no_run
//! use staring_contest::app::{Presenter, StaringApp};
//! use staring_contest::capture::RecordedFaceStream;
//! use staring_contest::config::Config;
//! use staring_contest::leaderboard::JsonFileStore;
//!
//! struct Quiet;
//! impl Presenter for Quiet {
//!     fn countdown_tick(&mut self, value: u32) { println!("starting in {value}..."); }
//!     fn go(&mut self) { println!("Go!"); }
//!     fn blink(&mut self, elapsed: f64, username: &str) {
//!         println!("blink detected at {elapsed:.2} seconds, {username}");
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let store = JsonFileStore::open("leaderboard.json")?;
//! let app = StaringApp::new(config, Box::new(store))?;
//!
//! let mut stream = RecordedFaceStream::from_path("round.jsonl", 30)?;
//! let outcome = app.run_round(&mut stream, "ada", "UK", &mut Quiet)?;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```

/// Facial landmark types for the 68-point scheme
pub mod landmarks;

/// Eye aspect ratio and per-frame blink decisions
pub mod blink_detection;

/// Game session state machine for one player's round
pub mod session;

/// Cancellable countdown timer
pub mod countdown;

/// Leaderboard records and stores
pub mod leaderboard;

/// Ranking and tier assignment
pub mod ranking;

/// Frame and landmark source boundaries
pub mod capture;

/// Round orchestration
pub mod app;

/// Error types and result handling
pub mod error;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
