//! Round orchestration: wiring the face stream, blink detector, session and
//! leaderboard together.
//!
//! [`StaringApp`] is the explicit context the process creates once and keeps
//! for its lifetime; the store and stream are passed-in handles, never
//! global lookups. Exactly one session consumes frames at a time, pulled
//! synchronously at whatever cadence the source imposes.

use crate::blink_detection::BlinkDetector;
use crate::capture::FaceStream;
use crate::config::Config;
use crate::countdown::{start_countdown, CountdownEvent};
use crate::leaderboard::{LeaderboardStore, ScoreRecord};
use crate::ranking::{RankEngine, RankedEntry};
use crate::session::GameSession;
use crate::{Error, Result};
use log::{debug, info, warn};
use std::time::{Duration, Instant};

/// Poll interval while waiting for countdown events
const COUNTDOWN_POLL: Duration = Duration::from_millis(25);

/// Presentation boundary for round progress.
///
/// The core emits discrete countdown values and the terminal blink event;
/// rendering is the implementor's business.
pub trait Presenter {
    /// A countdown tick, descending from the configured count to 1
    fn countdown_tick(&mut self, value: u32);

    /// Countdown finished; the round is running
    fn go(&mut self);

    /// The round ended with a blink after `elapsed_seconds`
    fn blink(&mut self, elapsed_seconds: f64, username: &str);

    /// Polled between frames; return true to abandon the round
    fn abort_requested(&self) -> bool {
        false
    }
}

/// How a round finished
#[derive(Debug, Clone, PartialEq)]
pub enum RoundOutcome {
    /// A blink was detected and the score persisted; carries the fresh
    /// record with its rank on the current leaderboard
    Scored(RankedEntry),
    /// The round was abandoned (stream ended, cancellation, idle timeout);
    /// nothing was persisted
    Abandoned,
}

/// Process-lifetime context for playing rounds
pub struct StaringApp {
    config: Config,
    detector: BlinkDetector,
    store: Box<dyn LeaderboardStore>,
}

impl StaringApp {
    /// Create the application context from validated configuration and a
    /// store handle
    pub fn new(config: Config, store: Box<dyn LeaderboardStore>) -> Result<Self> {
        config.validate()?;
        let detector = BlinkDetector::new(config.detection.ear_threshold);
        Ok(Self {
            config,
            detector,
            store,
        })
    }

    /// The leaderboard store handle
    #[must_use]
    pub fn store(&self) -> &dyn LeaderboardStore {
        self.store.as_ref()
    }

    /// Current ranking, recomputed from the full record set
    pub fn ranked_leaderboard(&self) -> Result<Vec<RankedEntry>> {
        Ok(RankEngine::rank(&self.store.read_all()?))
    }

    /// Play one round for the given identity.
    ///
    /// Fails fast with [`Error::DuplicateIdentity`] or
    /// [`Error::CameraUnavailable`] before the countdown starts; in both
    /// cases the session never leaves Idle and nothing is persisted.
    pub fn run_round(
        &self,
        faces: &mut dyn FaceStream,
        username: &str,
        team: &str,
        presenter: &mut dyn Presenter,
    ) -> Result<RoundOutcome> {
        if self.store.contains(username)? {
            return Err(Error::DuplicateIdentity(username.to_string()));
        }
        faces.ready()?;

        let mut session = GameSession::new(username, team);
        let ticks = self.config.countdown.ticks;
        session.begin_countdown(ticks)?;

        info!("round starting for '{username}' (team {team})");
        let countdown = start_countdown(ticks, self.config.countdown.tick_interval());
        loop {
            match countdown.next_event(COUNTDOWN_POLL) {
                Some(CountdownEvent::Tick(value)) => {
                    session.observe_tick()?;
                    presenter.countdown_tick(value);
                }
                Some(CountdownEvent::Go) => {
                    presenter.go();
                    session.start(Instant::now())?;
                    break;
                }
                None => {
                    if presenter.abort_requested() {
                        countdown.cancel();
                        info!("round abandoned during countdown");
                        return Ok(RoundOutcome::Abandoned);
                    }
                    if countdown.is_cancelled() {
                        return Ok(RoundOutcome::Abandoned);
                    }
                }
            }
        }

        self.frame_loop(faces, &mut session, presenter)
    }

    /// Pull frames until a blink ends the session or the round is abandoned
    fn frame_loop(
        &self,
        faces: &mut dyn FaceStream,
        session: &mut GameSession,
        presenter: &mut dyn Presenter,
    ) -> Result<RoundOutcome> {
        let idle_timeout = self.config.session.idle_timeout();
        let mut last_face_at = Instant::now();

        loop {
            if presenter.abort_requested() {
                info!("round abandoned by caller");
                return Ok(RoundOutcome::Abandoned);
            }

            let detections = match faces.next_faces()? {
                Some(detections) => detections,
                None => {
                    warn!("frame stream ended before a blink; round abandoned");
                    return Ok(RoundOutcome::Abandoned);
                }
            };
            let now = Instant::now();

            let verdict = match self.detector.evaluate(&detections) {
                Ok(verdict) => verdict,
                // Collapsed eye geometry is a steady-state condition: the
                // frame carries no decision and is skipped.
                Err(Error::DegenerateGeometry) => {
                    debug!("degenerate eye geometry, frame skipped");
                    continue;
                }
                Err(e) => return Err(e),
            };

            if !detections.is_empty() {
                last_face_at = now;
            }

            if let Some(score) = session.observe_frame(verdict, now)? {
                return self.finish_round(session, score, presenter);
            }

            if let Some(limit) = idle_timeout {
                if now.duration_since(last_face_at) > limit {
                    warn!(
                        "no face for more than {:.1}s; round abandoned",
                        limit.as_secs_f64()
                    );
                    return Ok(RoundOutcome::Abandoned);
                }
            }
        }
    }

    /// Persist the score and compute the player's fresh rank
    fn finish_round(
        &self,
        session: &GameSession,
        score: f64,
        presenter: &mut dyn Presenter,
    ) -> Result<RoundOutcome> {
        presenter.blink(score, session.username());

        let record = ScoreRecord::new(session.username(), session.team(), score);
        // A duplicate here means the identity was claimed between the
        // pre-round check and this write; the conflict is surfaced so the
        // earned score is reported, not silently dropped.
        self.store.append(record)?;

        let entry = RankEngine::rank_of(&self.store.read_all()?, session.username())
            .ok_or_else(|| {
                Error::Store(format!(
                    "record for '{}' missing after append",
                    session.username()
                ))
            })?;
        info!(
            "'{}' ranked #{} ({}) with {:.2}s",
            entry.record.username, entry.rank, entry.tier, score
        );
        Ok(RoundOutcome::Scored(entry))
    }
}
