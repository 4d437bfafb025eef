//! Game session state machine for a single player's round.
//!
//! A session moves strictly forward through Idle, Countdown, Running and
//! Ended. The start time is captured at the instant Running begins, never
//! during the countdown, and the score is the elapsed time on a monotonic
//! clock when the first blink frame arrives. Sessions are never reused; a
//! new round always starts from a fresh session in Idle.

use crate::blink_detection::FrameVerdict;
use crate::{Error, Result};
use log::{debug, info};
use std::time::Instant;

/// Lifecycle state of one round
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionState {
    /// Created, identity confirmed, round not started
    Idle,
    /// Counting down to the start
    Countdown {
        /// Ticks still to be observed before Running
        ticks_remaining: u32,
    },
    /// Consuming frames, waiting for the first blink
    Running {
        /// Instant at which Running began
        started: Instant,
    },
    /// Terminal: a blink was observed
    Ended {
        /// Seconds survived before the blink
        score: f64,
    },
}

/// One player's round from Idle through Ended
#[derive(Debug, Clone)]
pub struct GameSession {
    username: String,
    team: String,
    state: SessionState,
}

impl GameSession {
    /// Create a fresh session in Idle for the given identity
    #[must_use]
    pub fn new(username: impl Into<String>, team: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            team: team.into(),
            state: SessionState::Idle,
        }
    }

    /// The player's display name
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The player's team
    #[must_use]
    pub fn team(&self) -> &str {
        &self.team
    }

    /// Current lifecycle state
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Final score in seconds, available only once Ended
    #[must_use]
    pub fn score(&self) -> Option<f64> {
        match self.state {
            SessionState::Ended { score } => Some(score),
            _ => None,
        }
    }

    /// Idle -> Countdown. The caller must already have confirmed the
    /// identity is unique and a frame source is available.
    pub fn begin_countdown(&mut self, ticks: u32) -> Result<()> {
        match self.state {
            SessionState::Idle => {
                info!("session for '{}' entering countdown ({} ticks)", self.username, ticks);
                self.state = SessionState::Countdown { ticks_remaining: ticks };
                Ok(())
            }
            _ => Err(Error::InvalidTransition(format!(
                "cannot begin countdown from {:?}",
                self.state
            ))),
        }
    }

    /// Record one observed countdown tick
    pub fn observe_tick(&mut self) -> Result<u32> {
        match self.state {
            SessionState::Countdown { ticks_remaining } if ticks_remaining > 0 => {
                let remaining = ticks_remaining - 1;
                self.state = SessionState::Countdown { ticks_remaining: remaining };
                Ok(remaining)
            }
            _ => Err(Error::InvalidTransition(format!(
                "unexpected countdown tick in {:?}",
                self.state
            ))),
        }
    }

    /// Countdown -> Running. `now` becomes the round's start time.
    pub fn start(&mut self, now: Instant) -> Result<()> {
        match self.state {
            SessionState::Countdown { .. } => {
                info!("session for '{}' running", self.username);
                self.state = SessionState::Running { started: now };
                Ok(())
            }
            _ => Err(Error::InvalidTransition(format!(
                "cannot start from {:?}",
                self.state
            ))),
        }
    }

    /// Feed one frame verdict into a running session.
    ///
    /// Returns the final score when the frame ends the round. Frames with no
    /// detected face leave the session Running; there is no built-in timeout.
    pub fn observe_frame(&mut self, verdict: FrameVerdict, now: Instant) -> Result<Option<f64>> {
        let started = match self.state {
            SessionState::Running { started } => started,
            _ => {
                return Err(Error::InvalidTransition(format!(
                    "cannot observe frames in {:?}",
                    self.state
                )))
            }
        };

        match verdict {
            FrameVerdict::Blink { min_ear } => {
                let score = now.duration_since(started).as_secs_f64();
                info!(
                    "blink detected for '{}' (min EAR {:.3}) after {:.2}s",
                    self.username, min_ear, score
                );
                self.state = SessionState::Ended { score };
                Ok(Some(score))
            }
            FrameVerdict::Open { min_ear } => {
                debug!("eyes open, min EAR {min_ear:.3}");
                Ok(None)
            }
            FrameVerdict::NoFace => {
                debug!("no face detected, frame ignored");
                Ok(None)
            }
        }
    }

    /// Seconds elapsed since Running began, for an in-progress round
    #[must_use]
    pub fn elapsed(&self, now: Instant) -> Option<f64> {
        match self.state {
            SessionState::Running { started } => Some(now.duration_since(started).as_secs_f64()),
            _ => None,
        }
    }
}
